use crate::scalar::{Scalar, to_fixed};
use std::fmt;

/// Unit suffixes, largest first.
const UNITS: [(f64, &str); 5] = [
    (1e18, "H"),
    (1e12, "T"),
    (1e9, "B"),
    (1e6, "M"),
    (1e3, "K"),
];

/// Short human-readable form of a scalar, e.g. `10B` for `1e10` or `1.5K` for `1500`.
///
/// The integer part (truncated toward zero) picks the largest unit it reaches.
/// The scaled value is printed with two decimals (ties away from zero),
/// dropping a `.00` tail.
/// Below one thousand the canonical [`Scalar`] form is used.
pub fn compact(value: Scalar) -> Compact {
    Compact(value)
}

#[derive(Clone, Copy, Debug)]
pub struct Compact(Scalar);

impl fmt::Display for Compact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0.to_number().trunc();
        for (unit, symbol) in UNITS {
            if whole >= unit || whole <= -unit {
                let scaled = self.0.divide(Scalar::new(unit)).to_number();
                let text = to_fixed(scaled, 2);
                let text = text.strip_suffix(".00").unwrap_or(&text);
                return write!(f, "{text}{symbol}");
            }
        }
        write!(f, "{}", self.0)
    }
}
