//! Identity tokens for graph nodes and pins.
//!
//! The editor identifies every graph node (`NodeGuid`) and every pin
//! (`PinId`) with a 128-bit value written as 32 upper-case hexadecimal
//! digits. [`Guid`] is a thin, `Copy` wrapper over that value.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Error returned when a string is not a valid 32-digit hexadecimal token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuidParseError {
    #[error("expected 32 hexadecimal digits, found {0}")]
    Length(usize),

    #[error("invalid hexadecimal digit in `{0}`")]
    Digit(String),
}

/// A 128-bit identity token.
///
/// # Examples
///
/// ```
/// # use cuegraph_core::identifier::Guid;
/// let guid = Guid::from_u128(0xABCD);
/// assert_eq!(guid.to_string(), "0000000000000000000000000000ABCD");
/// assert_eq!(Guid::ZERO.to_string(), "0".repeat(32));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Guid(u128);

impl Guid {
    /// The all-zero placeholder token.
    pub const ZERO: Guid = Guid(0);

    /// Creates a token from its raw value.
    pub const fn from_u128(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw value of the token.
    pub const fn as_u128(self) -> u128 {
        self.0
    }

    /// Returns `true` for the all-zero placeholder.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032X}", self.0)
    }
}

impl FromStr for Guid {
    type Err = GuidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(GuidParseError::Length(s.len()));
        }
        u128::from_str_radix(s, 16)
            .map(Guid)
            .map_err(|_| GuidParseError::Digit(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_zero_padded_upper_hex() {
        let guid = Guid::from_u128(0x1f);
        assert_eq!(guid.to_string(), "0000000000000000000000000000001F");
        assert_eq!(guid.to_string().len(), 32);
    }

    #[test]
    fn test_zero_placeholder() {
        assert!(Guid::ZERO.is_zero());
        assert!(!Guid::from_u128(1).is_zero());
        assert_eq!(Guid::ZERO.to_string(), "00000000000000000000000000000000");
    }

    #[test]
    fn test_parse_accepts_either_case() {
        let upper: Guid = "0000000000000000000000000000ABCD".parse().unwrap();
        let lower: Guid = "0000000000000000000000000000abcd".parse().unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.as_u128(), 0xABCD);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!("ABCD".parse::<Guid>(), Err(GuidParseError::Length(4)));
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let err = "ZZ000000000000000000000000000000".parse::<Guid>();
        assert!(matches!(err, Err(GuidParseError::Digit(_))));
    }
}
