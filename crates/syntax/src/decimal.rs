//! An opaque arbitrary-precision decimal value.
//!
//! Number literals of any length must survive parsing without precision
//! loss, so values are kept as an unscaled [`BigInt`] plus the count of
//! fraction digits. Only parsing, equality, and display live here;
//! arithmetic is out of scope for the parser.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, Sign};
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Decimal {
    /// All significant digits, sign included, with the decimal point removed.
    unscaled: BigInt,
    /// How many of the unscaled digits sit after the decimal point.
    scale: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a decimal literal: {text:?}")]
pub struct ParseDecimalError {
    pub text: String,
}

impl Decimal {
    /// Parses the digits following a `0b` prefix as a binary integer.
    pub fn from_binary_text(digits: &str) -> Result<Self, ParseDecimalError> {
        if digits.is_empty() || !digits.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(ParseDecimalError {
                text: digits.to_string(),
            });
        }
        let unscaled = BigInt::parse_bytes(digits.as_bytes(), 2).ok_or_else(|| ParseDecimalError {
            text: digits.to_string(),
        })?;
        Ok(Self { unscaled, scale: 0 })
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    /// Accepts `-?digits(.digits)?`. Trailing fraction zeros are kept so the
    /// value renders back with its source scale.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let error = || ParseDecimalError {
            text: text.to_string(),
        };
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (digits, None),
        };
        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(error());
        }
        if let Some(frac_part) = frac_part {
            if frac_part.is_empty() || !frac_part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(error());
            }
        }
        let mut all_digits = String::from(int_part);
        if let Some(frac_part) = frac_part {
            all_digits.push_str(frac_part);
        }
        let mut unscaled = BigInt::parse_bytes(all_digits.as_bytes(), 10).ok_or_else(error)?;
        if negative {
            unscaled = -unscaled;
        }
        Ok(Self {
            unscaled,
            scale: frac_part.map_or(0, str::len),
        })
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self {
            unscaled: BigInt::from(value),
            scale: 0,
        }
    }
}

fn pow10(exponent: usize) -> BigInt {
    let ten = BigInt::from(10);
    let mut result = BigInt::from(1);
    for _ in 0..exponent {
        result *= &ten;
    }
    result
}

/// Equality aligns scales first, so `11.500 == 11.50` and `3 == 3.0`.
impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        match self.scale.cmp(&other.scale) {
            Ordering::Equal => self.unscaled == other.unscaled,
            Ordering::Less => &self.unscaled * pow10(other.scale - self.scale) == other.unscaled,
            Ordering::Greater => self.unscaled == &other.unscaled * pow10(self.scale - other.scale),
        }
    }
}

impl Eq for Decimal {}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.unscaled);
        }
        let mut digits = self.unscaled.magnitude().to_string();
        if digits.len() <= self.scale {
            let padding = self.scale - digits.len() + 1;
            digits.insert_str(0, &"0".repeat(padding));
        }
        let (int_part, frac_part) = digits.split_at(digits.len() - self.scale);
        if self.unscaled.sign() == Sign::Minus {
            write!(f, "-{int_part}.{frac_part}")
        } else {
            write!(f, "{int_part}.{frac_part}")
        }
    }
}
