use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

//--------------------------------------        Money       ----------------------------------------------------------
/// An exact monetary amount, stored as an integer number of minor currency units.
///
/// Orders and payments never carry floating point amounts; every arithmetic operation stays in
/// integer space.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct Money(i64);

op!(binary Money, Add, add);
op!(binary Money, Sub, sub);
op!(inplace Money, AddAssign, add_assign);
op!(inplace Money, SubAssign, sub_assign);
op!(unary Money, Neg, neg);

impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented as a monetary amount: {0}")]
pub struct MoneyConversionError(String);

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Money {}

impl TryFrom<u64> for Money {
    type Error = MoneyConversionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > i64::MAX as u64 {
            Err(MoneyConversionError(format!("Value {} is too large to convert to Money", value)))
        } else {
            #[allow(clippy::cast_possible_wrap)]
            Ok(Self(value as i64))
        }
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "₩{}", self.0)
    }
}

impl Money {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn arithmetic_stays_exact() {
        let a = Money::from(50_000);
        let b = Money::from(12_500);
        assert_eq!(a + b, Money::from(62_500));
        assert_eq!(a - b, Money::from(37_500));
        assert_eq!(b * 4, a);
        assert_eq!(-b, Money::from(-12_500));
        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total, Money::from(75_000));
    }

    #[test]
    fn u64_conversion_guards_overflow() {
        assert!(Money::try_from(u64::MAX).is_err());
        assert_eq!(Money::try_from(50_000u64).unwrap(), Money::from(50_000));
    }

    #[test]
    fn negative_amounts_are_detectable() {
        assert!(Money::from(-1).is_negative());
        assert!(!Money::from(0).is_negative());
    }
}
