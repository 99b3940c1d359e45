//! Adapter layer: converts between the caller's f64 percentages and the
//! Decimal arithmetic used for channel partitioning.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// Convert f64 to Decimal. Returns `None` for NaN, infinities, or values
/// outside Decimal's range.
pub fn to_decimal(v: f64) -> Option<Decimal> {
    if !v.is_finite() {
        return None;
    }
    Decimal::from_f64(v)
}

/// Convert Decimal to f64.
pub fn from_decimal(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

/// Round a non-negative Decimal up to the next whole channel count.
pub fn ceil_to_u32(d: Decimal) -> Option<u32> {
    d.ceil().to_u32()
}
