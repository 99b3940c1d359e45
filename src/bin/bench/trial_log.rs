// Per-Trial JSONL Recorder
// Outputs one JSON line per call attempt for independent analysis

use serde::Serialize;
use fca_engine::SimulationResult;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct TrialRecord {
    pub seed: u64,
    pub trial: usize,
    pub cell: u32,
    pub channel: Option<u32>,
    pub admitted: bool,
}

/// Accumulates trial records across runs and writes them as JSONL.
pub struct TrialLog {
    records: Vec<TrialRecord>,
}

impl TrialLog {
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    pub fn record(&mut self, seed: u64, result: &SimulationResult) {
        for (trial, t) in result.trials.iter().enumerate() {
            self.records.push(TrialRecord {
                seed,
                trial,
                cell: t.cell,
                channel: t.channel,
                admitted: t.admitted,
            });
        }
    }

    pub fn write_jsonl(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        for record in &self.records {
            let line = serde_json::to_string(record)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            writeln!(file, "{}", line)?;
        }
        file.flush()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
