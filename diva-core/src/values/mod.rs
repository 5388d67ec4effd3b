//! Parameter value types.
//!
//! Every value wraps the plain integer that is stored on disk and adds a
//! text projection used by the script text format. [`ParamValue`] is the
//! tagged union of all of them, [`ParamKind`] is the matching type tag that
//! the opcode schema carries for each parameter.

use std::fmt;
use thiserror::Error;

mod bitfield_enum;
mod diva_time;
mod fixed_decimal;
mod scaled_int;
mod string_enum;

pub use bitfield_enum::StringBitfieldEnum;
pub use diva_time::DivaTime;
pub use fixed_decimal::FixedDecimal;
pub use scaled_int::ScaledInt;
pub use string_enum::StringEnum;

/// Errors raised while converting text or raw integers into typed values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("invalid integer '{text}'")]
    InvalidInt { text: String },

    #[error("invalid decimal '{text}'")]
    InvalidDecimal { text: String },

    #[error("invalid percentage '{text}'")]
    InvalidPercentage { text: String },

    #[error("unknown timecode format '{text}' ({reason}), use (-)(hh:)(mm:)ss.sssss")]
    InvalidTimecode { text: String, reason: &'static str },

    #[error("invalid enum value '{text}'")]
    InvalidEnum { text: String },

    #[error("enum index {index} out of range for {len} choices")]
    EnumOutOfRange { index: i64, len: usize },

    #[error("bitfield value {value} out of range for {len} flags")]
    BitfieldOutOfRange { value: i64, len: usize },

    #[error("invalid boolean '{text}'")]
    InvalidBool { text: String },

    #[error("value {value} is not a boolean (expected 0 or 1)")]
    NotBoolean { value: i64 },

    #[error("value {value} does not fit in a 32-bit field")]
    OutOfRange { value: i64 },
}

/// Access to the underlying integer of a wrapper type.
///
/// Arithmetic on the wrappers is implemented on top of this: the operation
/// runs on the raw integer and the result is rebuilt with the same kind.
pub trait RawInt: Copy {
    fn raw(&self) -> i64;
    fn with_raw(&self, raw: i64) -> Self;

    /// True division, which leaves the wrapper type behind.
    fn true_div(&self, rhs: i64) -> f64 {
        self.raw() as f64 / rhs as f64
    }
}

/// Integer division rounding towards negative infinity.
pub(crate) fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

macro_rules! impl_int_ops {
    ($ty:ty) => {
        impl std::ops::Add<i64> for $ty {
            type Output = $ty;
            fn add(self, rhs: i64) -> $ty {
                self.with_raw(self.raw() + rhs)
            }
        }

        impl std::ops::Sub<i64> for $ty {
            type Output = $ty;
            fn sub(self, rhs: i64) -> $ty {
                self.with_raw(self.raw() - rhs)
            }
        }

        impl std::ops::Mul<i64> for $ty {
            type Output = $ty;
            fn mul(self, rhs: i64) -> $ty {
                self.with_raw(self.raw() * rhs)
            }
        }

        impl std::ops::Div<i64> for $ty {
            type Output = $ty;
            fn div(self, rhs: i64) -> $ty {
                self.with_raw($crate::values::floor_div(self.raw(), rhs))
            }
        }

        impl std::ops::Add for $ty {
            type Output = $ty;
            fn add(self, rhs: $ty) -> $ty {
                self + rhs.raw()
            }
        }

        impl std::ops::Sub for $ty {
            type Output = $ty;
            fn sub(self, rhs: $ty) -> $ty {
                self - rhs.raw()
            }
        }
    };
}

pub(crate) use impl_int_ops;

/// Parse a plain base-10 integer, tolerating surrounding whitespace.
pub(crate) fn parse_int(text: &str) -> Result<i64, ValueError> {
    text.trim().parse::<i64>().map_err(|_| ValueError::InvalidInt {
        text: text.to_string(),
    })
}

/// Move the decimal point of `text` `places` digits to the right and parse
/// the result, padding or truncating the fractional part as needed.
pub(crate) fn shift_decimal(text: &str, places: u32) -> Option<i64> {
    let (int_part, frac) = match text.find('.') {
        Some(idx) => (&text[..idx], &text[idx + 1..]),
        None => (text, ""),
    };

    let mut digits = String::with_capacity(int_part.len() + places as usize);
    digits.push_str(int_part);
    let mut taken = 0;
    for c in frac.chars().take(places as usize) {
        digits.push(c);
        taken += 1;
    }
    for _ in taken..places {
        digits.push('0');
    }

    digits.parse::<i64>().ok()
}

/// Type tag for a parameter, as carried by the opcode schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Int,
    Bool,
    Enum(&'static [&'static str]),
    Bitfield(&'static [&'static str]),
    Decimal { places: u32 },
    Scaled { min: i64, max: i64 },
    Time,
}

impl ParamKind {
    pub fn name(&self) -> &'static str {
        match self {
            ParamKind::Int => "int",
            ParamKind::Bool => "bool",
            ParamKind::Enum(_) => "enum",
            ParamKind::Bitfield(_) => "bitfield",
            ParamKind::Decimal { .. } => "decimal",
            ParamKind::Scaled { .. } => "scaled",
            ParamKind::Time => "time",
        }
    }

    /// Enumerated choices for enum and bitfield kinds.
    pub fn choices(&self) -> Option<&'static [&'static str]> {
        match self {
            ParamKind::Enum(choices) | ParamKind::Bitfield(choices) => Some(choices),
            _ => None,
        }
    }
}

/// One typed opcode parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamValue {
    Int(i64),
    Bool(bool),
    Enum(StringEnum),
    Bitfield(StringBitfieldEnum),
    Decimal(FixedDecimal),
    Scaled(ScaledInt),
    Time(DivaTime),
}

impl ParamValue {
    /// Build a value of `kind` from its raw integer.
    ///
    /// Booleans only accept 0 and 1; enums and bitfields are range-checked.
    pub fn from_raw(kind: ParamKind, raw: i64) -> Result<Self, ValueError> {
        Ok(match kind {
            ParamKind::Int => ParamValue::Int(raw),
            ParamKind::Bool => match raw {
                0 => ParamValue::Bool(false),
                1 => ParamValue::Bool(true),
                _ => return Err(ValueError::NotBoolean { value: raw }),
            },
            ParamKind::Enum(choices) => ParamValue::Enum(StringEnum::from_index(choices, raw)?),
            ParamKind::Bitfield(choices) => {
                ParamValue::Bitfield(StringBitfieldEnum::from_mask(choices, raw)?)
            }
            ParamKind::Decimal { places } => ParamValue::Decimal(FixedDecimal::new(places, raw)),
            ParamKind::Scaled { min, max } => ParamValue::Scaled(ScaledInt::new(min, max, raw)),
            ParamKind::Time => ParamValue::Time(DivaTime(raw)),
        })
    }

    /// Parse the natural text form of `kind`.
    pub fn parse(kind: ParamKind, text: &str) -> Result<Self, ValueError> {
        let text = text.trim();
        Ok(match kind {
            ParamKind::Int => ParamValue::Int(parse_int(text)?),
            ParamKind::Bool => ParamValue::Bool(parse_bool(text)?),
            ParamKind::Enum(choices) => ParamValue::Enum(StringEnum::from_name(choices, text)?),
            ParamKind::Bitfield(choices) => {
                ParamValue::Bitfield(StringBitfieldEnum::parse(choices, text)?)
            }
            ParamKind::Decimal { places } => {
                ParamValue::Decimal(FixedDecimal::parse(places, text)?)
            }
            ParamKind::Scaled { min, max } => {
                ParamValue::Scaled(ScaledInt::parse(min, max, text)?)
            }
            ParamKind::Time => ParamValue::Time(text.parse()?),
        })
    }

    /// Convert any value into `kind`, going through the raw integer.
    pub fn coerce(self, kind: ParamKind) -> Result<Self, ValueError> {
        if self.kind() == kind {
            return Ok(self);
        }
        ParamValue::from_raw(kind, self.raw())
    }

    pub fn raw(&self) -> i64 {
        match self {
            ParamValue::Int(v) => *v,
            ParamValue::Bool(v) => i64::from(*v),
            ParamValue::Enum(v) => i64::from(v.index()),
            ParamValue::Bitfield(v) => v.raw(),
            ParamValue::Decimal(v) => v.raw(),
            ParamValue::Scaled(v) => v.raw(),
            ParamValue::Time(v) => v.raw(),
        }
    }

    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Enum(v) => ParamKind::Enum(v.choices()),
            ParamValue::Bitfield(v) => ParamKind::Bitfield(v.choices()),
            ParamValue::Decimal(v) => ParamKind::Decimal { places: v.places() },
            ParamValue::Scaled(v) => ParamKind::Scaled {
                min: v.min(),
                max: v.max(),
            },
            ParamValue::Time(_) => ParamKind::Time,
        }
    }

    /// The 4-byte little-endian field for this value.
    ///
    /// Bitfields are written unsigned, everything else as a signed 32-bit
    /// integer.
    pub fn to_le_bytes(&self) -> Result<[u8; 4], ValueError> {
        let raw = self.raw();
        match self {
            ParamValue::Bitfield(_) => u32::try_from(raw).map(u32::to_le_bytes),
            _ => i32::try_from(raw).map(i32::to_le_bytes),
        }
        .map_err(|_| ValueError::OutOfRange { value: raw })
    }

    /// Read a value of `kind` from a 4-byte little-endian field.
    pub fn from_le_bytes(kind: ParamKind, bytes: [u8; 4]) -> Result<Self, ValueError> {
        let raw = match kind {
            ParamKind::Bool | ParamKind::Bitfield(_) => i64::from(u32::from_le_bytes(bytes)),
            _ => i64::from(i32::from_le_bytes(bytes)),
        };
        ParamValue::from_raw(kind, raw)
    }

    /// Render as the raw-integer escape, `i<raw>`.
    pub fn to_int_var(&self) -> String {
        format!("i{}", self.raw())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Bool(true) => f.write_str("True"),
            ParamValue::Bool(false) => f.write_str("False"),
            ParamValue::Enum(v) => write!(f, "{v}"),
            ParamValue::Bitfield(v) => write!(f, "{v}"),
            ParamValue::Decimal(v) => write!(f, "{v}"),
            ParamValue::Scaled(v) => write!(f, "{v}"),
            ParamValue::Time(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// Parse the text forms accepted for booleans.
pub fn parse_bool(text: &str) -> Result<bool, ValueError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "t" | "true" | "1" => Ok(true),
        "f" | "false" | "0" => Ok(false),
        _ => Err(ValueError::InvalidBool {
            text: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRUITS: &[&str] = &["apple", "banana", "cherry"];

    #[test]
    fn floor_division_matches_python() {
        assert_eq!(floor_div(7, 2), 3);
        assert_eq!(floor_div(-7, 2), -4);
        assert_eq!(floor_div(7, -2), -4);
        assert_eq!(floor_div(-6, 3), -2);
    }

    #[test]
    fn shift_decimal_pads_and_truncates() {
        assert_eq!(shift_decimal("1.5", 3), Some(1500));
        assert_eq!(shift_decimal("1.23456", 2), Some(123));
        assert_eq!(shift_decimal("-0.05", 2), Some(-5));
        assert_eq!(shift_decimal("42", 0), Some(42));
        assert_eq!(shift_decimal("abc", 1), None);
        assert_eq!(shift_decimal("", 0), None);
    }

    #[test]
    fn bool_text_forms() {
        for t in ["t", "TRUE", "1", "True"] {
            assert!(parse_bool(t).unwrap());
        }
        for f in ["f", "false", "0", "FALSE"] {
            assert!(!parse_bool(f).unwrap());
        }
        assert!(parse_bool("yes").is_err());
    }

    #[test]
    fn bool_from_raw_rejects_large_values() {
        assert_eq!(
            ParamValue::from_raw(ParamKind::Bool, 2),
            Err(ValueError::NotBoolean { value: 2 })
        );
    }

    #[test]
    fn coerce_int_into_enum() {
        let v = ParamValue::Int(1).coerce(ParamKind::Enum(FRUITS)).unwrap();
        assert_eq!(v.to_string(), "banana");
        assert!(ParamValue::Int(3).coerce(ParamKind::Enum(FRUITS)).is_err());
    }

    #[test]
    fn field_bytes_are_range_checked() {
        assert_eq!(ParamValue::Int(-1).to_le_bytes().unwrap(), [0xff; 4]);
        assert!(ParamValue::Int(i64::from(i32::MAX) + 1).to_le_bytes().is_err());
        let v = ParamValue::from_le_bytes(ParamKind::Decimal { places: 3 }, 1500i32.to_le_bytes())
            .unwrap();
        assert_eq!(v.to_string(), "1.500");
    }

    #[test]
    fn display_natural_forms() {
        assert_eq!(ParamValue::Bool(true).to_string(), "True");
        assert_eq!(ParamValue::Int(-12).to_string(), "-12");
        assert_eq!(ParamValue::Time(DivaTime(100000)).to_string(), "1");
        assert_eq!(ParamValue::Enum(StringEnum::from_index(FRUITS, 2).unwrap()).to_int_var(), "i2");
    }
}
