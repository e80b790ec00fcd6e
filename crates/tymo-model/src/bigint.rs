//! Arbitrary-precision integer literal values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The value of a big-integer literal type.
///
/// Stored as sign plus the exact base-10 digit text reported by the engine,
/// so no precision is lost regardless of magnitude.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PseudoBigInt {
    pub negative: bool,
    pub base10_value: String,
}

impl PseudoBigInt {
    pub fn new(negative: bool, base10_value: impl Into<String>) -> Self {
        Self {
            negative,
            base10_value: base10_value.into(),
        }
    }

    /// Parse literal text such as `123`, `-123` or `123n`.
    ///
    /// Only decimal digits are accepted; the digits are kept verbatim.
    pub fn parse(text: &str) -> Option<Self> {
        let (negative, rest) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let digits = rest.strip_suffix('n').unwrap_or(rest);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self::new(negative, digits))
    }

    pub fn is_zero(&self) -> bool {
        self.base10_value.bytes().all(|b| b == b'0')
    }
}

impl fmt::Display for PseudoBigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&self.base10_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_sign_and_digits() {
        let value = PseudoBigInt::parse("-123456789012345678901234567890n").unwrap();
        assert!(value.negative);
        assert_eq!(value.base10_value, "123456789012345678901234567890");
        assert_eq!(value.to_string(), "-123456789012345678901234567890");
    }

    #[test]
    fn parse_rejects_non_decimal() {
        assert_eq!(PseudoBigInt::parse(""), None);
        assert_eq!(PseudoBigInt::parse("-"), None);
        assert_eq!(PseudoBigInt::parse("n"), None);
        assert_eq!(PseudoBigInt::parse("0x1f"), None);
        assert_eq!(PseudoBigInt::parse("1.5"), None);
    }

    #[test]
    fn zero_detection() {
        assert!(PseudoBigInt::new(false, "0").is_zero());
        assert!(PseudoBigInt::new(true, "000").is_zero());
        assert!(!PseudoBigInt::new(false, "10").is_zero());
    }

    #[test]
    fn serializes_like_engine_value() {
        let json = serde_json::to_string(&PseudoBigInt::new(true, "42")).unwrap();
        assert_eq!(json, r#"{"negative":true,"base10Value":"42"}"#);
    }
}
