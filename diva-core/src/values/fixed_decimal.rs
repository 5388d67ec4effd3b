use std::fmt;

use super::{impl_int_ops, shift_decimal, RawInt, ValueError};

/// Integer rendered with a fixed number of decimal places.
///
/// The stored integer is the scaled value: 151 with 2 places is "1.51".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedDecimal {
    places: u32,
    raw: i64,
}

impl FixedDecimal {
    pub const fn new(places: u32, raw: i64) -> Self {
        Self { places, raw }
    }

    /// Parse decimal text, padding or truncating the fraction to `places`.
    pub fn parse(places: u32, text: &str) -> Result<Self, ValueError> {
        let text = text.trim();
        let raw = shift_decimal(text, places).ok_or_else(|| ValueError::InvalidDecimal {
            text: text.to_string(),
        })?;
        Ok(Self { places, raw })
    }

    pub fn from_le_bytes(places: u32, bytes: [u8; 4]) -> Self {
        Self::new(places, i64::from(i32::from_le_bytes(bytes)))
    }

    pub fn places(&self) -> u32 {
        self.places
    }
}

impl RawInt for FixedDecimal {
    fn raw(&self) -> i64 {
        self.raw
    }

    fn with_raw(&self, raw: i64) -> Self {
        Self::new(self.places, raw)
    }
}

impl_int_ops!(FixedDecimal);

impl fmt::Display for FixedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let places = self.places as usize;
        let digits = format!("{:0>width$}", self.raw.unsigned_abs(), width = places + 1);
        let (int_part, frac) = digits.split_at(digits.len() - places);

        if self.raw < 0 {
            f.write_str("-")?;
        }
        f.write_str(int_part)?;
        if places > 0 {
            write!(f, ".{frac}")?;
        }
        Ok(())
    }
}
