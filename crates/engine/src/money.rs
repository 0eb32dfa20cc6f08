use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::EngineError;

/// Signed money amount represented as **integer minor units** (kuruş, cents).
///
/// Use this type for **all** monetary values in the engine (transaction
/// amounts, category limits, budget totals) to avoid floating-point drift.
/// The REST API exchanges decimal numbers; convert at the boundary with
/// [`MoneyCents::from_major`] and [`MoneyCents::to_major`].
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals):
///
/// ```rust
/// use engine::MoneyCents;
///
/// assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<MoneyCents>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<MoneyCents>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

/// Largest magnitude, in major units, accepted from outside the engine.
///
/// Keeps sums over many amounts well inside `i64` cents.
pub const MAX_MAJOR_AMOUNT: f64 = 1e12;

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates an amount from whole major units (`8500` → `8500.00`).
    #[must_use]
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Converts a decimal amount, rounding half away from zero to 2 decimals.
    ///
    /// Non-finite input maps to zero.
    #[must_use]
    pub fn from_major(value: f64) -> Self {
        if !value.is_finite() {
            return Self::ZERO;
        }
        Self((value * 100.0).round() as i64)
    }

    /// Like [`MoneyCents::from_major`], but rejects non-finite values and
    /// magnitudes above [`MAX_MAJOR_AMOUNT`] instead of saturating.
    pub fn try_from_major(value: f64) -> Result<Self, EngineError> {
        if !value.is_finite() || value.abs() > MAX_MAJOR_AMOUNT {
            return Err(EngineError::InvalidAmount(format!("amount out of range: {value}")));
        }
        Ok(Self::from_major(value))
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns the amount as a decimal number.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Divides into `parts` equal shares rounded to the nearest minor unit
    /// (halves away from zero).
    ///
    /// The shares are not adjusted to add back up to `self`: `100.00 / 3`
    /// yields `33.33`, and three of them make `99.99`.
    ///
    /// Returns zero when `parts` is 0.
    #[must_use]
    pub fn divide_rounded(self, parts: u32) -> MoneyCents {
        if parts == 0 {
            return Self::ZERO;
        }
        let parts = i64::from(parts);
        let quotient = self.0 / parts;
        let remainder = self.0 % parts;
        if remainder.abs() * 2 >= parts {
            MoneyCents(quotient + self.0.signum())
        } else {
            MoneyCents(quotient)
        }
    }

    /// Multiplies by a conversion rate, rounded to the nearest minor unit.
    #[must_use]
    pub fn scale(self, rate: f64) -> MoneyCents {
        MoneyCents::new((self.0 as f64 * rate).round() as i64)
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl From<i64> for MoneyCents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}

impl Add for MoneyCents {
    type Output = MoneyCents;

    fn add(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 + rhs.0)
    }
}

impl AddAssign for MoneyCents {
    fn add_assign(&mut self, rhs: MoneyCents) {
        self.0 += rhs.0;
    }
}

impl Sub for MoneyCents {
    type Output = MoneyCents;

    fn sub(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 - rhs.0)
    }
}

impl Sum for MoneyCents {
    fn sum<I: Iterator<Item = MoneyCents>>(iter: I) -> Self {
        iter.fold(MoneyCents::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a MoneyCents> for MoneyCents {
    fn sum<I: Iterator<Item = &'a MoneyCents>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Serialized as a decimal number, the way the REST API and config files carry amounts.
impl Serialize for MoneyCents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major())
    }
}

impl<'de> Deserialize<'de> for MoneyCents {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(serde::de::Error::custom("amount must be finite"));
        }
        Ok(MoneyCents::from_major(value))
    }
}

impl FromStr for MoneyCents {
    type Err = EngineError;

    /// Parses `1234`, `1234.5` or `1234,56` (optional sign, at most two
    /// decimals) into minor units.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let reject = |reason: &str| EngineError::InvalidAmount(format!("{reason}: {:?}", s.trim()));

        let text = s.trim();
        let (negative, digits) = match text.as_bytes().first() {
            Some(b'-') => (true, text[1..].trim_start()),
            Some(b'+') => (false, text[1..].trim_start()),
            _ => (false, text),
        };
        if digits.is_empty() {
            return Err(reject("empty amount"));
        }

        let (whole, fraction) = match digits.split_once(['.', ',']) {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(reject("invalid amount"));
        }
        if fraction.len() > 2 {
            return Err(reject("too many decimals"));
        }

        let cents = format!("{fraction:0<2}")
            .parse::<i64>()
            .map_err(|_| reject("invalid amount"))?;
        let total = whole
            .parse::<i64>()
            .ok()
            .and_then(|units| units.checked_mul(100))
            .and_then(|units| units.checked_add(cents))
            .ok_or_else(|| reject("amount too large"))?;

        Ok(MoneyCents(if negative { -total } else { total }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_two_decimals() {
        assert_eq!(MoneyCents::new(0).to_string(), "0.00");
        assert_eq!(MoneyCents::new(1).to_string(), "0.01");
        assert_eq!(MoneyCents::new(1050).to_string(), "10.50");
        assert_eq!(MoneyCents::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<MoneyCents>().unwrap().cents(), 1050);
        assert_eq!("10,50".parse::<MoneyCents>().unwrap().cents(), 1050);
        assert_eq!("-0.01".parse::<MoneyCents>().unwrap().cents(), -1);
        assert_eq!("  2.30 ".parse::<MoneyCents>().unwrap().cents(), 230);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("12.345".parse::<MoneyCents>().is_err());
        assert!("".parse::<MoneyCents>().is_err());
        assert!("1.2.3".parse::<MoneyCents>().is_err());
        assert!("abc".parse::<MoneyCents>().is_err());
    }

    #[test]
    fn divide_rounded_keeps_per_share_rounding() {
        assert_eq!(MoneyCents::from_units(18_000).divide_rounded(9), MoneyCents::from_units(2_000));
        assert_eq!(MoneyCents::from_units(100).divide_rounded(3), MoneyCents::new(3_333));
        // 200.00 / 3 = 66.666… rounds up.
        assert_eq!(MoneyCents::from_units(200).divide_rounded(3), MoneyCents::new(6_667));
        assert_eq!(MoneyCents::new(-200_00).divide_rounded(3), MoneyCents::new(-6_667));
        assert_eq!(MoneyCents::from_units(5).divide_rounded(0), MoneyCents::ZERO);
    }

    #[test]
    fn from_major_rounds_to_cents() {
        assert_eq!(MoneyCents::from_major(32_130.0).cents(), 3_213_000);
        assert_eq!(MoneyCents::from_major(0.125).cents(), 13);
        assert_eq!(MoneyCents::from_major(f64::NAN), MoneyCents::ZERO);
    }

    #[test]
    fn try_from_major_rejects_out_of_range() {
        assert_eq!(MoneyCents::try_from_major(-950.5).unwrap().cents(), -95_050);
        assert!(MoneyCents::try_from_major(MAX_MAJOR_AMOUNT).is_ok());
        assert!(MoneyCents::try_from_major(1e300).is_err());
        assert!(MoneyCents::try_from_major(-1e13).is_err());
        assert!(MoneyCents::try_from_major(f64::INFINITY).is_err());
    }

    #[test]
    fn scale_applies_rate() {
        assert_eq!(MoneyCents::from_units(1_190).scale(27.0), MoneyCents::from_units(32_130));
        assert_eq!(MoneyCents::from_units(1_000).scale(34.1234), MoneyCents::new(3_412_340));
    }

    #[test]
    fn serde_uses_decimal_numbers() {
        let json = serde_json::to_string(&MoneyCents::new(850_050)).unwrap();
        assert_eq!(json, "8500.5");
        let parsed: MoneyCents = serde_json::from_str("9000").unwrap();
        assert_eq!(parsed, MoneyCents::from_units(9_000));
    }
}
