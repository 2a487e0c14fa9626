use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{
    convert::Infallible,
    fmt,
    ops::{Add, Div, Mul, Neg, Sub},
    str::FromStr,
};

/// A finite real number with total arithmetic.
///
/// Construction maps NaN and infinities to zero, so every `Scalar` is finite.
/// No operation panics or reports an error: degenerate cases resolve to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Scalar(f64);

impl Scalar {
    /// Divisors with a magnitude below this value divide to zero.
    pub const DIVIDE_EPSILON: f64 = 1e-100;

    pub const ZERO: Scalar = Scalar(0.0);
    pub const ONE: Scalar = Scalar(1.0);

    /// Creates a scalar, replacing non-finite input with zero.
    #[inline]
    pub fn new(value: f64) -> Self {
        if value.is_finite() { Self(value) } else { Self::ZERO }
    }

    /// Parses the decimal or exponential literal at the start of `text`,
    /// ignoring anything after it (`"12abc"` is 12). No leading number gives zero.
    pub fn parse(text: &str) -> Self {
        let text = text.trim_start();
        let literal = &text[..numeric_prefix_len(text)];
        literal.parse::<f64>().map_or(Self::ZERO, Self::new)
    }

    #[inline]
    pub fn add(self, other: Scalar) -> Scalar {
        Self::new(self.0 + other.0)
    }

    #[inline]
    pub fn subtract(self, other: Scalar) -> Scalar {
        Self::new(self.0 - other.0)
    }

    #[inline]
    pub fn multiply(self, other: Scalar) -> Scalar {
        Self::new(self.0 * other.0)
    }

    /// Safe division: a divisor within `DIVIDE_EPSILON` of zero yields zero.
    #[inline]
    pub fn divide(self, divisor: Scalar) -> Scalar {
        if divisor.0.abs() < Self::DIVIDE_EPSILON {
            return Self::ZERO;
        }
        Self::new(self.0 / divisor.0)
    }

    #[inline]
    pub fn pow(self, exponent: f64) -> Scalar {
        Self::new(self.0.powf(exponent))
    }

    /// Square root of the absolute value. Negative input never fails, the sign is dropped.
    #[inline]
    pub fn sqrt(self) -> Scalar {
        Self::new(self.0.abs().sqrt())
    }

    #[inline]
    pub fn abs(self) -> Scalar {
        Self::new(self.0.abs())
    }

    #[inline]
    pub fn is_less_than(self, other: Scalar) -> bool {
        self.0 < other.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// The raw value, for rendering and display consumers.
    #[inline]
    pub fn to_number(self) -> f64 {
        self.0
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::new(value as f64)
    }
}

impl From<Scalar> for f64 {
    fn from(value: Scalar) -> Self {
        value.0
    }
}

impl FromStr for Scalar {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Add for Scalar {
    type Output = Scalar;
    fn add(self, rhs: Scalar) -> Scalar {
        Scalar::add(self, rhs)
    }
}

impl Sub for Scalar {
    type Output = Scalar;
    fn sub(self, rhs: Scalar) -> Scalar {
        self.subtract(rhs)
    }
}

impl Mul for Scalar {
    type Output = Scalar;
    fn mul(self, rhs: Scalar) -> Scalar {
        self.multiply(rhs)
    }
}

impl Div for Scalar {
    type Output = Scalar;
    fn div(self, rhs: Scalar) -> Scalar {
        self.divide(rhs)
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        Self::new(-self.0)
    }
}

/// Canonical form: exponential with six mantissa digits when `|x| >= 1e6` or
/// `0 < |x| < 1e-3`, otherwise fixed point with at most six fractional digits
/// and no trailing zeros.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        let magnitude = value.abs();
        if value == 0.0 {
            return f.write_str("0");
        }
        if magnitude >= 1e6 || magnitude < 1e-3 {
            return f.write_str(&to_exponential(value, 6));
        }
        let fixed = to_fixed(value, 6);
        f.write_str(fixed.trim_end_matches('0').trim_end_matches('.'))
    }
}

/// Enough digits to print any finite `f64` exactly, so no rounding happens
/// before ours.
const EXACT_DIGITS: usize = 1100;

/// Fixed point with `places` fractional digits, ties rounded away from zero.
pub(crate) fn to_fixed(value: f64, places: usize) -> String {
    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((&exact, ""));

    let mut digits: Vec<u8> = int_part.bytes().chain(frac_part.bytes().take(places)).collect();
    if frac_part.as_bytes().get(places).is_some_and(|&d| d >= b'5') {
        round_up(&mut digits);
    }

    let split = digits.len() - places;
    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|&d| d as char));
    if places > 0 {
        out.push('.');
        out.extend(digits[split..].iter().map(|&d| d as char));
    }
    out
}

/// Exponential with `places` mantissa digits and a signed exponent (`1.5e+6`),
/// ties rounded away from zero.
pub(crate) fn to_exponential(value: f64, places: usize) -> String {
    let exact = format!("{:.*e}", EXACT_DIGITS, value.abs());
    let (mantissa, exp) = exact.split_once('e').unwrap_or((&exact, "0"));
    let mut exp: i32 = exp.parse().unwrap_or(0);

    let all: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    let mut digits = all[..=places].to_vec();
    if all.get(places + 1).is_some_and(|&d| d >= b'5') && round_up(&mut digits) {
        // 9.99..9 carried into 10.00..0
        digits.truncate(places + 1);
        exp += 1;
    }

    let mut out = String::with_capacity(places + 8);
    if value < 0.0 {
        out.push('-');
    }
    out.push(digits[0] as char);
    if places > 0 {
        out.push('.');
        out.extend(digits[1..].iter().map(|&d| d as char));
    }
    let sign = if exp < 0 { '-' } else { '+' };
    out.push_str(&format!("e{sign}{}", exp.abs()));
    out
}

/// Adds one to the last digit. Returns true when a new leading digit was needed.
fn round_up(digits: &mut Vec<u8>) -> bool {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return false;
        }
    }
    digits.insert(0, b'1');
    true
}

/// Length of the longest prefix of `text` that reads as a decimal literal:
/// optional sign, digits with an optional fraction, optional exponent.
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut i = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(i);
    let mut seen_digit = int_end > i;
    i = int_end;
    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits_from(i + 1);
        seen_digit |= frac_end > i + 1;
        i = frac_end;
    }
    if !seen_digit {
        return 0;
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            i = exp_end;
        }
    }
    i
}

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScalarVisitor;

        impl de::Visitor<'_> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or a numeric string")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
                Ok(Scalar::new(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
                Ok(Scalar::new(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
                Ok(Scalar::new(v as f64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
                Ok(Scalar::parse(v))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}
