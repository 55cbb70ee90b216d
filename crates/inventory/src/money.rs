use core::str::FromStr;

use serde::{Deserialize, Serialize};

use shelfkeep_core::{DomainError, DomainResult, ValueObject};

/// Minor units per major unit (two decimal places).
const MINOR_PER_MAJOR: u64 = 100;

/// Non-negative monetary amount stored in minor units (hundredths).
///
/// Parsed from decimal text, rounding half-up to the hundredth, and displayed
/// with exactly two fractional digits (`"250"` -> `250.00`).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Whole units, e.g. `Money::from_major(250)` is 250.00.
    pub fn from_major(major: u64) -> Self {
        Self(major.saturating_mul(MINOR_PER_MAJOR))
    }

    pub fn minor_units(&self) -> u64 {
        self.0
    }

    /// Line value: `self * quantity`, saturating at `u64::MAX` minor units.
    pub fn times(self, quantity: u64) -> Self {
        Self(self.0.saturating_mul(quantity))
    }

    pub fn saturating_add(self, other: Money) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / MINOR_PER_MAJOR, self.0 % MINOR_PER_MAJOR)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Decimal or exponent notation (`"250"`, `"250.5"`, `"2.5e2"`), rounded
    /// half-up to the nearest minor unit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || DomainError::validation(format!("invalid price: '{raw}'"));

        let (negative, unsigned) = match raw.strip_prefix('-') {
            Some(magnitude) => (true, magnitude),
            None => (false, raw.strip_prefix('+').unwrap_or(raw)),
        };
        let amount = Decimal::parse(unsigned).ok_or_else(invalid)?;

        // "-0" and "-0.00" are zero, not negative.
        if amount.is_zero() {
            return Ok(Money::ZERO);
        }
        if negative {
            return Err(DomainError::validation("Price cannot be negative."));
        }
        amount
            .round_to_minor()
            .map(Money)
            .ok_or_else(|| DomainError::validation("Price is too large."))
    }
}

impl<'a> core::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc.saturating_add(*m))
    }
}

/// Digits of `Money` below the decimal point.
const MINOR_DIGITS: i64 = 2;

/// Exponents are clamped here; past it every non-zero amount overflows or
/// rounds to zero anyway.
const EXPONENT_LIMIT: i64 = 1_000_000;

/// Unsigned decimal text split into significant digits and the position of
/// the decimal point: digits `[1, 2, 5]` with `point` 1 is 1.25.
#[derive(Debug)]
struct Decimal {
    digits: Vec<u8>,
    point: i64,
}

impl Decimal {
    fn parse(text: &str) -> Option<Self> {
        let (mantissa, exponent) = match text.split_once(['e', 'E']) {
            Some((mantissa, exponent)) => (mantissa, parse_exponent(exponent)?),
            None => (text, 0),
        };
        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }

        let mut digits: Vec<u8> = whole.bytes().chain(fraction.bytes()).map(|b| b - b'0').collect();
        let leading = digits.iter().take_while(|&&d| d == 0).count();
        digits.drain(..leading);
        let point = whole.len() as i64 - leading as i64 + exponent;
        Some(Self { digits, point })
    }

    fn is_zero(&self) -> bool {
        self.digits.iter().all(|&d| d == 0)
    }

    /// Amount in minor units, rounded half-up. `None` past `u64::MAX`.
    fn round_to_minor(&self) -> Option<u64> {
        let cut = self.point + MINOR_DIGITS;
        // The first digit is non-zero, so 21 integral digits exceed u64.
        if cut > 20 {
            return None;
        }

        let digit = |i: i64| -> u64 {
            usize::try_from(i)
                .ok()
                .and_then(|i| self.digits.get(i))
                .map_or(0, |&d| u64::from(d))
        };

        let mut minor: u64 = 0;
        for i in 0..cut.max(0) {
            minor = minor.checked_mul(10)?.checked_add(digit(i))?;
        }
        if digit(cut) >= 5 {
            minor = minor.checked_add(1)?;
        }
        Some(minor)
    }
}

fn parse_exponent(text: &str) -> Option<i64> {
    let (sign, digits) = match text.strip_prefix('-') {
        Some(digits) => (-1, digits),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = digits
        .bytes()
        .fold(0i64, |acc, b| (acc * 10 + i64::from(b - b'0')).min(EXPONENT_LIMIT));
    Some(sign * magnitude)
}
