use std::fmt;
use std::str::FromStr;

use super::{impl_int_ops, parse_int, shift_decimal, RawInt, ValueError};

/// Game time in units of 1/100000 second.
///
/// Text form is `(-)(H:)(MM:)SS(.fraction)`, e.g. 6200003 is "1:02.00003".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DivaTime(pub i64);

impl DivaTime {
    pub const SECOND_DECIMALS: u32 = 5;
    pub const SECOND: i64 = 100_000;
    pub const MINUTE: i64 = 60 * Self::SECOND;
    pub const HOUR: i64 = 60 * Self::MINUTE;

    pub fn from_le_bytes(bytes: [u8; 4]) -> Self {
        DivaTime(i64::from(i32::from_le_bytes(bytes)))
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / Self::SECOND as f64
    }
}

impl RawInt for DivaTime {
    fn raw(&self) -> i64 {
        self.0
    }

    fn with_raw(&self, raw: i64) -> Self {
        DivaTime(raw)
    }
}

impl_int_ops!(DivaTime);

impl FromStr for DivaTime {
    type Err = ValueError;

    fn from_str(text: &str) -> Result<Self, ValueError> {
        let bad = |reason| ValueError::InvalidTimecode {
            text: text.to_string(),
            reason,
        };

        let trimmed = text.trim();
        let (negate, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        if body.contains('-') {
            return Err(bad("unexpected negative signs"));
        }

        let sections: Vec<&str> = body.split(':').map(str::trim).collect();
        if sections.len() > 3 {
            return Err(bad("too many sections"));
        }

        let mut value = 0i64;
        for (i, section) in sections.iter().rev().enumerate() {
            let part = match i {
                0 => Some(shift_decimal(section, Self::SECOND_DECIMALS).ok_or_else(|| bad("bad seconds"))?),
                1 => parse_int(section)?.checked_mul(Self::MINUTE),
                _ => parse_int(section)?.checked_mul(Self::HOUR),
            };
            value = part
                .and_then(|part| value.checked_add(part))
                .ok_or_else(|| bad("time out of range"))?;
        }

        Ok(DivaTime(if negate { -value } else { value }))
    }
}

impl fmt::Display for DivaTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.0.unsigned_abs();
        if self.0 < 0 {
            f.write_str("-")?;
        }

        let hour = Self::HOUR as u64;
        let minute = Self::MINUTE as u64;
        let mut force_lower = false;
        if value >= hour {
            write!(f, "{}:", value / hour)?;
            value %= hour;
            force_lower = true;
        }
        if force_lower || value >= minute {
            write!(f, "{:02}:", value / minute)?;
            value %= minute;
            force_lower = true;
        }

        let decimals = Self::SECOND_DECIMALS as usize;
        let width = decimals + if force_lower { 2 } else { 1 };
        let digits = format!("{:0>width$}", value, width = width);
        let (secs, frac) = digits.split_at(digits.len() - decimals);
        let frac = frac.trim_end_matches('0');

        f.write_str(secs)?;
        if !frac.is_empty() {
            write!(f, ".{frac}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> i64 {
        s.parse::<DivaTime>().unwrap().0
    }

    #[test]
    fn parses_timecodes() {
        assert_eq!(t("1"), 100_000);
        assert_eq!(t("2.4"), 240_000);
        assert_eq!(t("1:02.00003"), 6_200_003);
        assert_eq!(t("1:00:10"), 361_000_000);
        assert_eq!(t("-1:7"), -6_700_000);
        assert_eq!(t(" 0 "), 0);
        assert_eq!(t("1.1234567"), 112_345);
    }

    #[test]
    fn rejects_malformed_timecodes() {
        assert!("1:2:3:4".parse::<DivaTime>().is_err());
        assert!("1:-2".parse::<DivaTime>().is_err());
        assert!("--1".parse::<DivaTime>().is_err());
        assert!("abc".parse::<DivaTime>().is_err());
        assert!("".parse::<DivaTime>().is_err());
    }

    #[test]
    fn rejects_out_of_range_timecodes() {
        for text in ["999999999999999:00:00", "1:999999999999999:00", "9223372036854775807:0"] {
            assert!(matches!(
                text.parse::<DivaTime>(),
                Err(ValueError::InvalidTimecode { reason: "time out of range", .. })
            ));
        }
    }

    #[test]
    fn renders_timecodes() {
        assert_eq!(DivaTime(0).to_string(), "0");
        assert_eq!(DivaTime(100_000).to_string(), "1");
        assert_eq!(DivaTime(6_200_003).to_string(), "1:02.00003");
        assert_eq!(DivaTime(6_000_000).to_string(), "01:00");
        assert_eq!(DivaTime(361_000_000).to_string(), "1:00:10");
        assert_eq!(DivaTime(-150_000).to_string(), "-1.5");
        assert_eq!(DivaTime(5).to_string(), "0.00005");
    }

    #[test]
    fn text_round_trip() {
        for raw in [0, 1, 99_999, 6_200_003, -6_700_000, 361_000_000, 12_345_678_900] {
            let v = DivaTime(raw);
            assert_eq!(v.to_string().parse::<DivaTime>().unwrap(), v);
        }
    }

    #[test]
    fn arithmetic() {
        assert_eq!(DivaTime(100_000) + 50_000, DivaTime(150_000));
        assert_eq!(DivaTime(7) / 2, DivaTime(3));
        assert_eq!(DivaTime(150_000).true_div(100_000), 1.5);
    }
}
