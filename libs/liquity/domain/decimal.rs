//! Fixed-point decimal amounts
//!
//! Every protocol amount is an 18-decimal token-precision integer. `Decimal`
//! keeps that raw integer in a `U256` and does all arithmetic on it directly,
//! so ratios and percentages never pass through floating point.

use ethers::types::{U256, U512};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of fractional digits carried by every `Decimal`
pub const DECIMALS: usize = 18;

const MAGNITUDES: [&str; 5] = ["", "K", "M", "B", "T"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecimalError {
    #[error("Empty decimal string")]
    Empty,

    #[error("Invalid decimal string: {0}")]
    Invalid(String),

    #[error("Decimal out of range: {0}")]
    Overflow(String),
}

fn one() -> U256 {
    U256::exp10(DECIMALS)
}

fn saturate(value: U512) -> U256 {
    U256::try_from(value).unwrap_or(U256::MAX)
}

/// Unsigned 18-digit fixed-point number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Decimal(U256);

impl Decimal {
    pub const ZERO: Decimal = Decimal(U256::zero());

    /// Wrap a raw value already scaled by 10^18
    pub fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Raw value scaled by 10^18
    pub fn raw(&self) -> U256 {
        self.0
    }

    pub fn one() -> Self {
        Self(one())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// `Some(self)` unless the value is zero
    pub fn non_zero(&self) -> Option<Decimal> {
        if self.is_zero() {
            None
        } else {
            Some(*self)
        }
    }

    pub fn add(&self, other: Decimal) -> Decimal {
        Decimal(self.0.saturating_add(other.0))
    }

    pub fn checked_sub(&self, other: Decimal) -> Option<Decimal> {
        self.0.checked_sub(other.0).map(Decimal)
    }

    /// Fixed-point product, truncated to 18 digits.
    ///
    /// Products above 2^256 saturate at `U256::MAX`; a saturated result is a
    /// display bound, not an exact amount.
    pub fn mul(&self, other: Decimal) -> Decimal {
        Decimal(saturate(self.0.full_mul(other.0) / U512::from(one())))
    }

    /// Fixed-point quotient, truncated to 18 digits. `None` for a zero divisor.
    pub fn checked_div(&self, divisor: Decimal) -> Option<Decimal> {
        if divisor.is_zero() {
            return None;
        }
        Some(Decimal(saturate(
            self.0.full_mul(one()) / U512::from(divisor.0),
        )))
    }

    /// `self * multiplier / divisor` with a 512-bit intermediate product
    pub fn mul_div(&self, multiplier: Decimal, divisor: Decimal) -> Option<Decimal> {
        if divisor.is_zero() {
            return None;
        }
        Some(Decimal(saturate(
            self.0.full_mul(multiplier.0) / U512::from(divisor.0),
        )))
    }

    /// Render with exactly `precision` fractional digits, rounding half up.
    ///
    /// Precision above 18 is clamped; a precision of zero prints only the
    /// integer part.
    pub fn to_string_with_precision(&self, precision: usize) -> String {
        let precision = precision.min(DECIMALS);
        let half = U256::exp10(DECIMALS - precision) / 2;
        let (characteristic, mantissa) = split_raw(self.0.saturating_add(half));

        if precision == 0 {
            characteristic
        } else {
            format!("{}.{}", characteristic, &mantissa[..precision])
        }
    }

    /// Like `to_string_with_precision`, with the integer part grouped by commas
    pub fn prettify(&self, precision: usize) -> String {
        let formatted = self.to_string_with_precision(precision);
        match formatted.split_once('.') {
            Some((characteristic, mantissa)) => {
                format!("{}.{}", group_thousands(characteristic), mantissa)
            }
            None => group_thousands(&formatted),
        }
    }

    /// Compact rendering with a magnitude suffix (K, M, B, T).
    ///
    /// Keeps three significant integer digits where possible:
    /// 1,234,567 becomes "1.23M" and 500,000 becomes "500K".
    pub fn shorten(&self) -> String {
        let characteristic_length = self.to_string_with_precision(0).len();
        let magnitude = ((characteristic_length - 1) / 3).min(MAGNITUDES.len() - 1);
        let precision = (3 * (magnitude + 1)).saturating_sub(characteristic_length);
        let normalized = Decimal(self.0 / U256::exp10(3 * magnitude));

        format!("{}{}", normalized.prettify(precision), MAGNITUDES[magnitude])
    }
}

/// Split a raw value into its integer digits and its 18 fractional digits
fn split_raw(raw: U256) -> (String, String) {
    let digits = format!("{:0>width$}", raw.to_string(), width = DECIMALS + 1);
    let (characteristic, mantissa) = digits.split_at(digits.len() - DECIMALS);
    (characteristic.to_string(), mantissa.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Decimal(U256::from(value) * one())
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (characteristic, mantissa) = s.split_once('.').unwrap_or((s, ""));

        if characteristic.is_empty() && mantissa.is_empty() {
            return Err(DecimalError::Empty);
        }
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(characteristic) || !all_digits(mantissa) {
            return Err(DecimalError::Invalid(s.to_string()));
        }

        let mantissa = &mantissa[..mantissa.len().min(DECIMALS)];
        let characteristic = if characteristic.is_empty() { "0" } else { characteristic };
        let padded = format!("{}{:0<width$}", characteristic, mantissa, width = DECIMALS);

        U256::from_dec_str(&padded)
            .map(Decimal)
            .map_err(|_| DecimalError::Overflow(s.to_string()))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (characteristic, mantissa) = split_raw(self.0);
        let mantissa = mantissa.trim_end_matches('0');
        if mantissa.is_empty() {
            write!(f, "{}", characteristic)
        } else {
            write!(f, "{}.{}", characteristic, mantissa)
        }
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// A ratio displayed as a percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Percent {
    percent: Decimal,
}

impl Percent {
    pub fn new(ratio: Decimal) -> Self {
        Self {
            percent: ratio.mul(Decimal::from(100)),
        }
    }

    /// The ratio scaled by 100
    pub fn value(&self) -> Decimal {
        self.percent
    }

    /// `Some` when the percentage would not print as zero at `precision` digits
    pub fn non_zeroish(&self, precision: usize) -> Option<&Self> {
        let zeroish: Decimal = format!("0.{}5", "0".repeat(precision.min(DECIMALS - 1)))
            .parse()
            .unwrap_or(Decimal::ZERO);
        (self.percent >= zeroish).then_some(self)
    }

    pub fn to_string_with_precision(&self, precision: usize) -> String {
        format!("{}%", self.percent.to_string_with_precision(precision))
    }

    /// Precision scales down as the percentage grows; large values are never capped
    pub fn prettify(&self) -> String {
        if self.percent >= Decimal::from(1000) {
            self.to_string_with_precision(0)
        } else if self.percent >= Decimal::from(10) {
            self.to_string_with_precision(1)
        } else {
            self.to_string_with_precision(2)
        }
    }
}
