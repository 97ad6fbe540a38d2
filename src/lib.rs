#![doc = include_str!(".crate-docs.md")]

use std::fmt::{self, Debug, Display, Write};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use thiserror::Error;

/// Result type for fallible number operations.
pub type NumberResult<T> = Result<T, NumberError>;

/// Errors produced when parsing or dividing values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NumberError {
    /// The input text was not an optionally signed decimal integer
    /// literal.
    #[error("not a signed decimal integer: {input:?}")]
    InvalidFormat {
        /// The rejected input text.
        input: String,
    },
    /// The divisor was zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// An exact arbitrary-precision signed integer.
///
/// Values are immutable: arithmetic produces new values rather than
/// mutating operands. The decimal text produced by [`Display`] parses
/// back to an equal value via [`FromStr`], for every value including zero
/// and negatives.
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Default)]
pub struct Exactint(BigInt);

impl Exactint {
    /// Returns `value` as an exact integer.
    #[must_use]
    #[inline]
    pub fn new(value: i64) -> Self {
        Self(BigInt::from(value))
    }

    /// Returns a value representing 10 raised to the power of `exponent`.
    #[must_use]
    pub fn one_e(exponent: u32) -> Self {
        Self(BigInt::from(10u32).pow(exponent))
    }

    /// Returns true if this value is 0.
    #[must_use]
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if this value is less than 0.
    #[must_use]
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Returns true if this value is greater than 0.
    #[must_use]
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    /// Returns the number of decimal digits in this value's absolute
    /// value.
    ///
    /// Zero has one digit. The sign is not counted.
    #[must_use]
    pub fn digit_count(&self) -> usize {
        self.0.magnitude().to_str_radix(10).len()
    }

    /// Returns the quotient of this value and `divisor`, truncated toward
    /// zero.
    ///
    /// Fails with [`NumberError::DivisionByZero`] when `divisor` is zero;
    /// no sentinel quotient is ever substituted.
    pub fn checked_div(&self, divisor: &Self) -> NumberResult<Self> {
        if divisor.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        Ok(Self(&self.0 / &divisor.0))
    }

    /// Checks that `text` would parse as a value.
    ///
    /// Presentation layers can reject an edit with this before it replaces
    /// a stored value.
    pub fn validate(text: &str) -> NumberResult<()> {
        text.parse::<Self>().map(|_| ())
    }

    /// Returns a [`Display`] implementor that formats this value scaled to
    /// its short-scale magnitude name.
    pub fn as_magnitude(&self) -> MagnitudeFormatter<'_> {
        MagnitudeFormatter::short_scale(self)
    }
}

impl Neg for Exactint {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Exactint {
    type Output = Exactint;

    #[inline]
    fn neg(self) -> Self::Output {
        Exactint(-&self.0)
    }
}

impl Add for Exactint {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add for &Exactint {
    type Output = Exactint;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Exactint(&self.0 + &rhs.0)
    }
}

impl AddAssign for Exactint {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Exactint {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub for &Exactint {
    type Output = Exactint;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Exactint(&self.0 - &rhs.0)
    }
}

impl SubAssign for Exactint {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Mul for Exactint {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul for &Exactint {
    type Output = Exactint;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Exactint(&self.0 * &rhs.0)
    }
}

impl MulAssign for Exactint {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        self.0 *= rhs.0;
    }
}

impl Zero for Exactint {
    #[inline]
    fn zero() -> Self {
        Self(BigInt::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Exactint {
    #[inline]
    fn one() -> Self {
        Self(BigInt::one())
    }
}

impl From<i32> for Exactint {
    #[inline]
    fn from(value: i32) -> Self {
        Self(BigInt::from(value))
    }
}

impl From<u32> for Exactint {
    #[inline]
    fn from(value: u32) -> Self {
        Self(BigInt::from(value))
    }
}

impl From<i64> for Exactint {
    #[inline]
    fn from(value: i64) -> Self {
        Self(BigInt::from(value))
    }
}

impl From<u64> for Exactint {
    #[inline]
    fn from(value: u64) -> Self {
        Self(BigInt::from(value))
    }
}

impl From<i128> for Exactint {
    #[inline]
    fn from(value: i128) -> Self {
        Self(BigInt::from(value))
    }
}

impl From<BigInt> for Exactint {
    #[inline]
    fn from(value: BigInt) -> Self {
        Self(value)
    }
}

impl FromStr for Exactint {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigInt::from_str(s)
            .map(Self)
            .map_err(|_| NumberError::InvalidFormat { input: s.to_owned() })
    }
}

impl Display for Exactint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Debug for Exactint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Exactint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Exactint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct TextVisitor;

        impl serde::de::Visitor<'_> for TextVisitor {
            type Value = Exactint;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a decimal integer string")
            }

            fn visit_str<E>(self, text: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                text.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(TextVisitor)
    }
}

/// A [`Display`] implementor that formats an [`Exactint`] scaled to a
/// named magnitude, e.g. `1.23 Million`.
#[derive(Clone, Debug)]
#[must_use]
pub struct MagnitudeFormatter<'a> {
    value: &'a Exactint,
    words: &'a [(u32, &'a str)],
}

static SHORT_SCALE: [(u32, &str); 34] = [
    (3, "Thousand"),
    (6, "Million"),
    (9, "Billion"),
    (12, "Trillion"),
    (15, "Quadrillion"),
    (18, "Quintillion"),
    (21, "Sextillion"),
    (24, "Septillion"),
    (27, "Octillion"),
    (30, "Nonillion"),
    (33, "Decillion"),
    (36, "Undecillion"),
    (39, "Duodecillion"),
    (42, "Tredecillion"),
    (45, "Quattuordecillion"),
    (48, "Quindecillion"),
    (51, "Sexdecillion"),
    (54, "Septendecillion"),
    (57, "Octodecillion"),
    (60, "Novemdecillion"),
    (63, "Vigintillion"),
    (66, "Unvigintillion"),
    (69, "Duovigintillion"),
    (72, "Trevigintillion"),
    (75, "Quattuorvigintillion"),
    (78, "Quinvigintillion"),
    (81, "Sexvigintillion"),
    (84, "Septenvigintillion"),
    (87, "Octovigintillion"),
    (90, "Novemvigintillion"),
    (93, "Trigintillion"),
    (96, "Untrigintillion"),
    (99, "Duotrigintillion"),
    (100, "Googol"),
];

impl<'a> MagnitudeFormatter<'a> {
    /// Returns a formatter for `value` using the English short-scale
    /// names, "Thousand" through "Googol".
    #[inline]
    pub fn short_scale(value: &'a Exactint) -> Self {
        Self::new(value, &SHORT_SCALE)
    }

    /// Returns a formatter for `value` using the given `words`.
    ///
    /// `words` maps powers of ten to magnitude names. The formatter scales
    /// the value by the power of 1,000 selected from its digit count and
    /// appends the name stored at that power; a power with no entry
    /// formats as the bare scaled numeral.
    #[inline]
    pub fn new(value: &'a Exactint, words: &'a [(u32, &'a str)]) -> Self {
        Self { value, words }
    }

    fn word(&self, power: u32) -> Option<&'a str> {
        self.words
            .iter()
            .find(|(entry, _)| *entry == power)
            .map(|(_, word)| *word)
    }
}

impl Display for MagnitudeFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_zero() {
            return f.write_str("0");
        }

        let digits = self.value.0.magnitude().to_str_radix(10);
        let digits = digits.as_bytes();
        let exponent = (digits.len() - 1) / 3;
        let mut integer_len = digits.len() - exponent * 3;

        // Scaling by 1000^exponent leaves the first 1-3 digits before the
        // decimal point and the next two after it. Rounding is half away
        // from zero, decided by the first dropped digit.
        let keep = digits.len().min(integer_len + 2);
        let mut scaled = digits[..keep].to_vec();
        if digits.len() > keep && digits[keep] >= b'5' {
            integer_len += round_up(&mut scaled);
        }

        let mut fraction = &scaled[integer_len..];
        while fraction.last() == Some(&b'0') {
            fraction = &fraction[..fraction.len() - 1];
        }

        if self.value.is_negative() {
            f.write_char('-')?;
        }
        for &digit in &scaled[..integer_len] {
            f.write_char(char::from(digit))?;
        }
        if !fraction.is_empty() {
            f.write_char('.')?;
            for &digit in fraction {
                f.write_char(char::from(digit))?;
            }
        }

        let word = u32::try_from(exponent * 3)
            .ok()
            .and_then(|power| self.word(power));
        if let Some(word) = word {
            f.write_char(' ')?;
            f.write_str(word)?;
        }
        Ok(())
    }
}

/// Increments a decimal digit buffer by one, propagating the carry.
/// Returns the number of digits the buffer grew by.
fn round_up(digits: &mut Vec<u8>) -> usize {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return 0;
        }
    }
    digits.insert(0, b'1');
    1
}
