use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// A rupee amount carried at full decimal precision.
///
/// Arithmetic never rounds. Rounding to paise happens only when the value is
/// rendered, through [`Money::rounded`], [`Money::plain`] or `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Rounds to two decimal places, half away from zero.
    pub fn rounded(&self) -> Decimal {
        let mut value = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(2);
        value
    }

    /// Two-decimal rendering without currency symbol or grouping, e.g. `1180.00`.
    pub fn plain(&self) -> String {
        self.rounded().to_string()
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

/// Renders as `₹ 1,23,456.78` using Indian digit grouping.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded();
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let text = rounded.abs().to_string();
        let (whole, fraction) = text.split_once('.').unwrap_or((&text, "00"));
        write!(f, "{}₹ {}.{}", sign, group_indian(whole), fraction)
    }
}

/// Groups digits as lakh/crore: the last three together, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut pairs = Vec::new();
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        pairs.push(pair);
        head = rest;
    }
    pairs.push(head);
    pairs.reverse();
    format!("{},{}", pairs.join(","), tail)
}

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const SCALES: [(u128, &str); 4] = [
    (10_000_000, "Crore"),
    (100_000, "Lakh"),
    (1_000, "Thousand"),
    (100, "Hundred"),
];

fn spell(n: u128) -> String {
    if n < 20 {
        return ONES[n as usize].to_string();
    }
    if n < 100 {
        let unit = ONES[(n % 10) as usize];
        let tens = TENS[(n / 10) as usize];
        return if unit.is_empty() {
            tens.to_string()
        } else {
            format!("{} {}", tens, unit)
        };
    }
    for (scale, name) in SCALES {
        if n >= scale {
            let head = format!("{} {}", spell(n / scale), name);
            let rest = n % scale;
            return if rest == 0 {
                head
            } else {
                format!("{} {}", head, spell(rest))
            };
        }
    }
    unreachable!("every n >= 100 matches a scale")
}

/// Integer part of a non-negative decimal. Every `Decimal` fits in `u128`.
fn whole_units(value: Decimal) -> u128 {
    let value = value.trunc();
    value.mantissa().unsigned_abs() / 10u128.pow(value.scale())
}

/// Spells an amount the way it is printed on a tax invoice, e.g.
/// `One Thousand One Hundred Eighty Rupees Only`.
///
/// Uses the Indian scale (thousand, lakh, crore). Paise are appended when the
/// rounded amount has a fractional part.
pub fn amount_in_words(amount: Money) -> String {
    let rounded = amount.rounded().abs();
    let rupees = whole_units(rounded);
    let paise = whole_units(rounded.fract() * Decimal::ONE_HUNDRED);

    let rupee_words = if rupees == 0 {
        "Zero".to_string()
    } else {
        spell(rupees)
    };

    if paise == 0 {
        format!("{} Rupees Only", rupee_words)
    } else {
        format!("{} Rupees and {} Paise Only", rupee_words, spell(paise))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(10.005));
        let b = Money::new(dec!(5.0));
        assert_eq!(a + b, Money::new(dec!(15.005)));
        assert_eq!(a - b, Money::new(dec!(5.005)));

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total, Money::new(dec!(20.005)));
    }

    #[test]
    fn test_rounding_only_at_display() {
        let third = Money::new(dec!(10) / dec!(3));
        let sum = third + third + third;
        // 3.333.. x3 keeps full precision; rounding each line first would give 9.99
        assert_eq!(sum.plain(), "10.00");
        assert_eq!(Money::new(dec!(2.345)).plain(), "2.35");
        assert_eq!(Money::new(dec!(7)).plain(), "7.00");
    }

    #[test]
    fn test_display_indian_grouping() {
        assert_eq!(Money::new(dec!(0)).to_string(), "₹ 0.00");
        assert_eq!(Money::new(dec!(999)).to_string(), "₹ 999.00");
        assert_eq!(Money::new(dec!(1180)).to_string(), "₹ 1,180.00");
        assert_eq!(Money::new(dec!(22500)).to_string(), "₹ 22,500.00");
        assert_eq!(Money::new(dec!(123456.785)).to_string(), "₹ 1,23,456.79");
        assert_eq!(Money::new(dec!(12345678)).to_string(), "₹ 1,23,45,678.00");
        assert_eq!(Money::new(dec!(-550.5)).to_string(), "-₹ 550.50");
    }

    #[test]
    fn test_amount_in_words() {
        assert_eq!(amount_in_words(Money::ZERO), "Zero Rupees Only");
        assert_eq!(
            amount_in_words(Money::new(dec!(1180))),
            "One Thousand One Hundred Eighty Rupees Only"
        );
        assert_eq!(
            amount_in_words(Money::new(dec!(26550))),
            "Twenty Six Thousand Five Hundred Fifty Rupees Only"
        );
        assert_eq!(
            amount_in_words(Money::new(dec!(150000.5))),
            "One Lakh Fifty Thousand Rupees and Fifty Paise Only"
        );
        assert_eq!(
            amount_in_words(Money::new(dec!(20000017))),
            "Two Crore Seventeen Rupees Only"
        );
    }

    #[test]
    fn test_amount_in_words_beyond_u64() {
        // 2 x 10^19 rupees is past u64::MAX and is spelled in crores of crores
        let amount = Money::new(Decimal::from_i128_with_scale(20_000_000_000_000_000_000, 0));
        assert_eq!(
            amount_in_words(amount),
            "Two Lakh Crore Crore Rupees Only"
        );
        assert_eq!(
            amount_in_words(Money::new(dec!(18446744073709551616.25))),
            "One Lakh Eighty Four Thousand Four Hundred Sixty Seven Crore Forty Four Lakh Seven Thousand Three Hundred Seventy Crore Ninety Five Lakh Fifty One Thousand Six Hundred Sixteen Rupees and Twenty Five Paise Only"
        );
    }
}
