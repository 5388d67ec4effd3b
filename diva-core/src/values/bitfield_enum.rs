use std::fmt;

use super::ValueError;

/// OR-combination of named flags; choice `i` is bit `1 << i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StringBitfieldEnum {
    choices: &'static [&'static str],
    mask: u64,
}

impl StringBitfieldEnum {
    pub fn from_mask(choices: &'static [&'static str], value: i64) -> Result<Self, ValueError> {
        let limit = 1u128 << choices.len().min(64);
        match u64::try_from(value) {
            Ok(mask) if u128::from(mask) < limit => Ok(Self { choices, mask }),
            _ => Err(ValueError::BitfieldOutOfRange {
                value,
                len: choices.len(),
            }),
        }
    }

    /// Parse `a|b|c`, or a plain integer mask.
    pub fn parse(choices: &'static [&'static str], text: &str) -> Result<Self, ValueError> {
        let text = text.trim();
        if let Ok(value) = text.parse::<i64>() {
            return Self::from_mask(choices, value);
        }

        let mut mask = 0u64;
        for part in text.split('|').map(str::trim) {
            let bit = choices
                .iter()
                .position(|c| *c == part)
                .ok_or_else(|| ValueError::InvalidEnum {
                    text: part.to_string(),
                })?;
            mask |= 1 << bit;
        }
        Ok(Self { choices, mask })
    }

    pub fn raw(&self) -> i64 {
        self.mask as i64
    }

    pub fn contains(&self, choice: &str) -> bool {
        self.choices
            .iter()
            .position(|c| *c == choice)
            .map_or(false, |bit| self.mask & (1 << bit) != 0)
    }

    pub fn choices(&self) -> &'static [&'static str] {
        self.choices
    }
}

impl fmt::Display for StringBitfieldEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mask == 0 {
            return f.write_str("0");
        }
        let selected: Vec<&str> = self
            .choices
            .iter()
            .enumerate()
            .filter(|(bit, _)| self.mask & (1 << bit) != 0)
            .map(|(_, c)| *c)
            .collect();
        f.write_str(&selected.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABC: &[&str] = &["a", "b", "c"];

    #[test]
    fn renders_joined_choices() {
        assert_eq!(StringBitfieldEnum::from_mask(ABC, 5).unwrap().to_string(), "a|c");
        assert_eq!(StringBitfieldEnum::from_mask(ABC, 7).unwrap().to_string(), "a|b|c");
        assert_eq!(StringBitfieldEnum::from_mask(ABC, 0).unwrap().to_string(), "0");
    }

    #[test]
    fn parses_joined_choices() {
        assert_eq!(StringBitfieldEnum::parse(ABC, "a|c").unwrap().raw(), 5);
        assert_eq!(StringBitfieldEnum::parse(ABC, " c | b ").unwrap().raw(), 6);
        assert_eq!(StringBitfieldEnum::parse(ABC, "0").unwrap().raw(), 0);
        assert_eq!(StringBitfieldEnum::parse(ABC, "3").unwrap().raw(), 3);
        assert!(StringBitfieldEnum::parse(ABC, "a|d").is_err());
    }

    #[test]
    fn out_of_range_masks_fail() {
        assert!(StringBitfieldEnum::from_mask(ABC, 8).is_err());
        assert!(StringBitfieldEnum::from_mask(ABC, -1).is_err());
        assert!(StringBitfieldEnum::parse(ABC, "8").is_err());
    }

    #[test]
    fn membership() {
        let v = StringBitfieldEnum::parse(ABC, "a|c").unwrap();
        assert!(v.contains("a"));
        assert!(!v.contains("b"));
    }
}
