use std::fmt;

use super::{impl_int_ops, parse_int, RawInt, ValueError};

/// Integer whose text form is a percentage of the range `min..=max`.
///
/// Text without a `%` is read as the raw integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScaledInt {
    min: i64,
    max: i64,
    raw: i64,
}

/// Most decimal places tried when rendering a percentage.
const MAX_PCT_PLACES: u32 = 9;

impl ScaledInt {
    pub const fn new(min: i64, max: i64, raw: i64) -> Self {
        Self { min, max, raw }
    }

    pub fn parse(min: i64, max: i64, text: &str) -> Result<Self, ValueError> {
        let text = text.trim();
        let raw = match text.find('%') {
            Some(idx) => pct_to_raw(min, max, text[..idx].trim()).ok_or_else(|| {
                ValueError::InvalidPercentage {
                    text: text.to_string(),
                }
            })?,
            None => parse_int(text)?,
        };
        Ok(Self { min, max, raw })
    }

    pub fn from_le_bytes(min: i64, max: i64, bytes: [u8; 4]) -> Self {
        Self::new(min, max, i64::from(i32::from_le_bytes(bytes)))
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Percentage as a float, for display purposes.
    pub fn percent(&self) -> f64 {
        (self.raw - self.min) as f64 / (self.max - self.min) as f64 * 100.0
    }
}

impl RawInt for ScaledInt {
    fn raw(&self) -> i64 {
        self.raw
    }

    fn with_raw(&self, raw: i64) -> Self {
        Self::new(self.min, self.max, raw)
    }
}

impl_int_ops!(ScaledInt);

/// `min + pct / 100 * (max - min)`, truncated towards zero.
///
/// The percentage is kept as an exact decimal fraction so that rendered
/// values read back to the same integer.
fn pct_to_raw(min: i64, max: i64, pct: &str) -> Option<i64> {
    let (negative, digits) = match pct.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, pct.strip_prefix('+').unwrap_or(pct)),
    };
    let (int_part, frac) = match digits.find('.') {
        Some(idx) => (&digits[..idx], &digits[idx + 1..]),
        None => (digits, ""),
    };
    if int_part.is_empty() && frac.is_empty() {
        return None;
    }
    if !int_part.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) || frac.len() > 18 {
        return None;
    }

    let mut numer: i128 = 0;
    for c in int_part.chars().chain(frac.chars()) {
        numer = numer.checked_mul(10)?.checked_add(i128::from(c.to_digit(10)?))?;
    }
    if negative {
        numer = -numer;
    }
    let denom = 100i128 * 10i128.pow(frac.len() as u32);

    let offset = numer.checked_mul(i128::from(max) - i128::from(min))? / denom;
    i64::try_from(i128::from(min) + offset).ok()
}

/// Render `numer / denom * 100` at `places` decimals, with trailing zeros and
/// point removed.
///
/// Rounds away from zero, since reading the text back truncates.
fn format_pct(numer: i128, denom: i128, places: u32) -> String {
    let scale = 10i128.pow(places);
    let scaled = numer * 100 * scale;
    let mut q = scaled / denom;
    let r = scaled % denom;
    if r != 0 {
        q += if (scaled < 0) != (denom < 0) { -1 } else { 1 };
    }

    let digits = format!("{:0>width$}", q.unsigned_abs(), width = places as usize + 1);
    let (int_part, frac) = digits.split_at(digits.len() - places as usize);
    let frac = frac.trim_end_matches('0');

    let mut out = String::new();
    if q < 0 {
        out.push('-');
    }
    out.push_str(int_part);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

impl fmt::Display for ScaledInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = i128::from(self.max) - i128::from(self.min);
        if range == 0 {
            return write!(f, "{}", self.raw);
        }
        let numer = i128::from(self.raw) - i128::from(self.min);

        for places in 0..=MAX_PCT_PLACES {
            let pct = format_pct(numer, range, places);
            if pct_to_raw(self.min, self.max, &pct) == Some(self.raw) {
                return write!(f, "{pct}%");
            }
        }
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_percentages() {
        assert_eq!(ScaledInt::new(0, 1000, 1220).to_string(), "122%");
        assert_eq!(ScaledInt::new(0, 1000, 500).to_string(), "50%");
        assert_eq!(ScaledInt::new(0, 1000, 155).to_string(), "15.5%");
        assert_eq!(ScaledInt::new(0, 1000, 0).to_string(), "0%");
        assert_eq!(ScaledInt::new(0, 1000, -150).to_string(), "-15%");
        assert_eq!(ScaledInt::new(100, 200, 150).to_string(), "50%");
    }

    #[test]
    fn parses_percentages_and_raw() {
        assert_eq!(ScaledInt::parse(0, 1000, "122%").unwrap().raw(), 1220);
        assert_eq!(ScaledInt::parse(0, 1000, "55.2%").unwrap().raw(), 552);
        assert_eq!(ScaledInt::parse(0, 1000, "1220").unwrap().raw(), 1220);
        assert_eq!(ScaledInt::parse(100, 200, "50%").unwrap().raw(), 150);
        // truncated, not rounded
        assert_eq!(ScaledInt::parse(0, 1000, "0.09%").unwrap().raw(), 0);
        assert!(ScaledInt::parse(0, 1000, "x%").is_err());
        assert!(ScaledInt::parse(0, 1000, "1.5").is_err());
    }

    #[test]
    fn text_round_trip_is_lossless() {
        for raw in [-7, 0, 1, 3, 333, 999, 1001, 123_457] {
            let v = ScaledInt::new(0, 3000, raw);
            assert_eq!(ScaledInt::parse(0, 3000, &v.to_string()).unwrap(), v);
        }
    }

    #[test]
    fn arithmetic_keeps_range() {
        let v = ScaledInt::new(0, 1000, 500) + 20;
        assert_eq!(v.to_string(), "52%");
        assert_eq!((v / 4).raw(), 130);
    }
}
