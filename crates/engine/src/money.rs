use std::{
    fmt,
    ops::{Add, Neg, Sub},
    str::FromStr,
};

use crate::{EngineError, FieldErrors};

/// Signed money amount represented as **integer minor units** (cents).
///
/// Use this type for all monetary values in the engine, request amounts and
/// entry amounts alike, to avoid floating-point drift. Request amounts are
/// absolute (validated strictly positive); entry amounts carry the sign
/// produced by the behavior matrix.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing from caller input (accepts `.` or `,` as decimal separator;
/// rejects more than 2 decimals):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<Money>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is strictly negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Returns the magnitude of the amount.
    #[must_use]
    pub const fn abs(self) -> Money {
        Money(self.0.abs())
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading
    /// `+`/`-`. Rejects empty strings, non-digit input and more than 2
    /// fractional digits. Failures come back as a validation error keyed on
    /// the `amount` field.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn reject(message: &str) -> EngineError {
            let mut fields = FieldErrors::new();
            fields.push("amount", message);
            EngineError::Validation(fields)
        }

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(reject("amount must not be empty"));
        }

        let (sign, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (-1i64, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (1i64, stripped)
        } else {
            (1i64, trimmed)
        };

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let units_str = parts.next().unwrap_or_default();
        let cents_str = parts.next();

        if parts.next().is_some() {
            return Err(reject("invalid amount"));
        }
        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(reject("invalid amount"));
        }

        let units: i64 = units_str.parse().map_err(|_| reject("invalid amount"))?;

        let cents: i64 = match cents_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(reject("invalid amount"));
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| reject("invalid amount"))? * 10,
                    2 => frac.parse::<i64>().map_err(|_| reject("invalid amount"))?,
                    _ => return Err(reject("amount has too many decimals")),
                }
            }
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(|| reject("amount too large"))?;

        let signed = if sign < 0 {
            total.checked_neg().ok_or_else(|| reject("amount too large"))?
        } else {
            total
        };

        Ok(Money(signed))
    }
}
