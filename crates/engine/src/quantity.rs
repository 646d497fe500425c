use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Non-negative amount logged for one category of a record.
///
/// The value is a plain `f64` so the stored JSON keeps full precision; the
/// constructor is the only way in and rejects negative or non-finite values.
///
/// # Examples
///
/// ```rust
/// use engine::Quantity;
///
/// assert_eq!("3,5".parse::<Quantity>().unwrap().value(), 3.5);
/// assert_eq!("3.5".parse::<Quantity>().unwrap().value(), 3.5);
/// assert!("-1".parse::<Quantity>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Quantity(f64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0.0);

    /// Creates a quantity, failing with [`EngineError::Validation`] when the
    /// value is negative.
    pub fn new(value: f64) -> Result<Self, EngineError> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount(format!("{value} is not a number")));
        }
        if value < 0.0 {
            return Err(EngineError::Validation(
                "values cannot be negative".to_string(),
            ));
        }
        // Normalise -0.0 so it serialises as 0.
        Ok(Self(value.abs()))
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Quantity {
    type Error = EngineError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for f64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl FromStr for Quantity {
    type Err = EngineError;

    /// Parses user input into a quantity.
    ///
    /// See [`parse_decimal`] for the accepted text forms. A well-formed
    /// negative number fails with [`EngineError::Validation`]; malformed text
    /// fails with [`EngineError::InvalidAmount`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_decimal(s)?)
    }
}

/// Parses a decimal number written with either `.` or `,` as separator.
///
/// Accepts an optional leading `+`/`-` and surrounding whitespace. Rejects
/// empty input, more than one separator, and anything that is not an ASCII
/// digit.
pub fn parse_decimal(s: &str) -> Result<f64, EngineError> {
    let empty = || EngineError::InvalidAmount("empty amount".to_string());
    let invalid = || EngineError::InvalidAmount(format!("\"{}\" is not a number", s.trim()));

    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(empty());
    }

    let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
        (true, stripped.trim_start())
    } else if let Some(stripped) = trimmed.strip_prefix('+') {
        (false, stripped.trim_start())
    } else {
        (false, trimmed)
    };
    if rest.is_empty() {
        return Err(empty());
    }

    let normalized = rest.replace(',', ".");
    let mut parts = normalized.split('.');
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next();
    if parts.next().is_some() {
        return Err(invalid());
    }

    let digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    match fraction {
        None if whole.is_empty() || !digits(whole) => return Err(invalid()),
        Some(frac) if !digits(whole) || !digits(frac) || (whole.is_empty() && frac.is_empty()) => {
            return Err(invalid());
        }
        _ => {}
    }

    let value: f64 = normalized.parse().map_err(|_| invalid())?;
    Ok(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!(parse_decimal("3,5").unwrap(), 3.5);
        assert_eq!(parse_decimal("3.5").unwrap(), 3.5);
        assert_eq!(parse_decimal("10").unwrap(), 10.0);
        assert_eq!(parse_decimal("  2,25 ").unwrap(), 2.25);
        assert_eq!(parse_decimal("+1").unwrap(), 1.0);
        assert_eq!(parse_decimal(",5").unwrap(), 0.5);
        assert_eq!(parse_decimal("4.").unwrap(), 4.0);
    }

    #[test]
    fn parse_keeps_sign() {
        assert_eq!(parse_decimal("-0,5").unwrap(), -0.5);
        assert_eq!(parse_decimal("- 2").unwrap(), -2.0);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_decimal("").is_err());
        assert!(parse_decimal("-").is_err());
        assert!(parse_decimal("abc").is_err());
        assert!(parse_decimal("1,2,3").is_err());
        assert!(parse_decimal("1.2.3").is_err());
        assert!(parse_decimal("1e3").is_err());
        assert!(parse_decimal(".").is_err());
    }

    #[test]
    fn negative_is_a_validation_error() {
        let err = "-1,5".parse::<Quantity>().unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
        assert!(err.is_validation());
    }

    #[test]
    fn garbage_is_an_invalid_amount() {
        let err = "two".parse::<Quantity>().unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    #[test]
    fn negative_zero_is_normalised() {
        let q = "-0".parse::<Quantity>().unwrap();
        assert_eq!(q, Quantity::ZERO);
        assert!(q.value().is_sign_positive());
    }

    #[test]
    fn deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Quantity>("-2.5").is_err());
        assert_eq!(
            serde_json::from_str::<Quantity>("2.5").unwrap().value(),
            2.5
        );
    }
}
