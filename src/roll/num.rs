use crate::common::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A resolved numeric value. Dice and integer arithmetic stay integral;
/// anything else (inexact division, fractional powers, overflow) falls back to
/// a float.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(Int),
    Float(Float),
}

impl Number {
    pub const ZERO: Self = Self::Int(0);

    pub fn as_int(self) -> Int {
        match self {
            Self::Int(x) => x,
            Self::Float(x) => x as Int,
        }
    }

    pub fn as_float(self) -> Float {
        match self {
            Self::Int(x) => x as Float,
            Self::Float(x) => x,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(x) => x == 0,
            Self::Float(x) => x == 0.0,
        }
    }

    /// Converts an integral float back to [Number::Int] when it fits.
    fn integral(x: Float) -> Self {
        if x.is_finite() && x.fract() == 0.0 && x.abs() < Int::MAX as Float {
            Self::Int(x as Int)
        } else {
            Self::Float(x)
        }
    }

    pub(crate) fn floor(self) -> Self {
        match self {
            Self::Int(_) => self,
            Self::Float(x) => Self::integral(x.floor()),
        }
    }

    pub(crate) fn ceil(self) -> Self {
        match self {
            Self::Int(_) => self,
            Self::Float(x) => Self::integral(x.ceil()),
        }
    }

    pub(crate) fn round(self) -> Self {
        match self {
            Self::Int(_) => self,
            Self::Float(x) => Self::integral(x.round()),
        }
    }

    pub(crate) fn abs(self) -> Self {
        match self {
            Self::Int(x) => x.checked_abs().map_or(Self::Float((x as Float).abs()), Self::Int),
            Self::Float(x) => Self::Float(x.abs()),
        }
    }

    pub(crate) fn pow(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(x), Self::Int(y)) if (0..=u32::MAX as Int).contains(&y) => x
                .checked_pow(y as u32)
                .map_or_else(|| Self::Float((x as Float).powf(y as Float)), Self::Int),
            (x, y) => Self::Float(x.as_float().powf(y.as_float())),
        }
    }
}

impl std::ops::Neg for Number {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Int(x) => x.checked_neg().map_or(Self::Float(-(x as Float)), Self::Int),
            Self::Float(x) => Self::Float(-x),
        }
    }
}

macro_rules! num_impl_checked_op {
    ($Name:ident, $fn_name:ident, $checked:ident) => {
        impl std::ops::$Name for Number {
            type Output = Self;

            fn $fn_name(self, rhs: Self) -> Self::Output {
                match (self, rhs) {
                    (Self::Int(x), Self::Int(y)) => x.$checked(y).map_or_else(
                        || Self::Float((x as Float).$fn_name(y as Float)),
                        Self::Int,
                    ),
                    (x, y) => Self::Float(x.as_float().$fn_name(y.as_float())),
                }
            }
        }
    };
}

num_impl_checked_op!(Add, add, checked_add);
num_impl_checked_op!(Sub, sub, checked_sub);
num_impl_checked_op!(Mul, mul, checked_mul);
num_impl_checked_op!(Rem, rem, checked_rem);

impl std::ops::Div for Number {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Int(x), Self::Int(y)) if y != 0 && x.checked_rem(y) == Some(0) => {
                x.checked_div(y).map_or(Self::Float(x as Float / y as Float), Self::Int)
            }
            (x, y) => Self::Float(x.as_float() / y.as_float()),
        }
    }
}

impl std::iter::Sum for Number {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |a, b| a + b)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(x), Self::Int(y)) => x == y,
            (x, y) => x.as_float().eq(&y.as_float()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(x), Self::Int(y)) => x.partial_cmp(y),
            (x, y) => x.as_float().partial_cmp(&y.as_float()),
        }
    }
}

impl From<Int> for Number {
    fn from(x: Int) -> Self {
        Self::Int(x)
    }
}

impl From<i32> for Number {
    fn from(x: i32) -> Self {
        Self::Int(x.into())
    }
}

impl From<Float> for Number {
    fn from(x: Float) -> Self {
        Self::Float(x)
    }
}

impl From<usize> for Number {
    fn from(x: usize) -> Self {
        Int::try_from(x).map_or(Self::Float(x as Float), Self::Int)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(x) => fmt::Display::fmt(x, f),
            Self::Float(x) => fmt::Debug::fmt(x, f),
        }
    }
}
