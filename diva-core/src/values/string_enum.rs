use std::fmt;

use super::ValueError;

/// Index into a closed list of names.
///
/// Text that looks like an integer is never read as an index; use the raw
/// integer constructors (or the `i<N>` text escape) for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StringEnum {
    choices: &'static [&'static str],
    index: u32,
}

impl StringEnum {
    pub fn from_index(choices: &'static [&'static str], index: i64) -> Result<Self, ValueError> {
        match u32::try_from(index) {
            Ok(i) if (i as usize) < choices.len() => Ok(Self { choices, index: i }),
            _ => Err(ValueError::EnumOutOfRange {
                index,
                len: choices.len(),
            }),
        }
    }

    pub fn from_name(choices: &'static [&'static str], name: &str) -> Result<Self, ValueError> {
        choices
            .iter()
            .position(|c| *c == name)
            .map(|i| Self {
                choices,
                index: i as u32,
            })
            .ok_or_else(|| ValueError::InvalidEnum {
                text: name.to_string(),
            })
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn as_str(&self) -> &'static str {
        self.choices[self.index as usize]
    }

    pub fn choices(&self) -> &'static [&'static str] {
        self.choices
    }
}

impl fmt::Display for StringEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<i64> for StringEnum {
    fn eq(&self, other: &i64) -> bool {
        i64::from(self.index) == *other
    }
}

impl PartialEq<str> for StringEnum {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for StringEnum {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRUITS: &[&str] = &[
        "apple", "banana", "cherry", "durian", "elderberry", "fig", "grape",
    ];
    const HANDS: &[&str] = &["left", "right"];

    #[test]
    fn construct_from_index_and_name() {
        let a = StringEnum::from_index(FRUITS, 6).unwrap();
        let b = StringEnum::from_name(FRUITS, "grape").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "grape");
        assert_eq!(a.index(), 6);
    }

    #[test]
    fn out_of_range_and_unknown_names_fail() {
        assert!(StringEnum::from_index(FRUITS, 7).is_err());
        assert!(StringEnum::from_index(FRUITS, -1).is_err());
        assert!(StringEnum::from_name(FRUITS, "kiwi").is_err());
        // digits are not indexes
        assert!(StringEnum::from_name(FRUITS, "6").is_err());
    }

    #[test]
    fn compares_against_ints_and_strings() {
        let v = StringEnum::from_name(FRUITS, "cherry").unwrap();
        assert_eq!(v, 2i64);
        assert_eq!(v, "cherry");
        assert!(v != "kiwi");
        assert!(v != 3i64);
    }

    #[test]
    fn different_choice_lists_are_not_equal() {
        let fruit = StringEnum::from_index(FRUITS, 1).unwrap();
        let hand = StringEnum::from_index(HANDS, 1).unwrap();
        assert_ne!(fruit, hand);
    }
}
