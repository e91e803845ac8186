use std::{
    cmp::Ordering,
    ops::{Add, Mul, Neg, Sub},
};

#[derive(derive_more::Debug, derive_more::Display, Clone, Copy)]
pub enum Number {
    #[display("{}", _0)]
    #[debug("Integer({})", _0)]
    Integer(i64),

    #[display("{}", format_floating(*_0))]
    #[debug("Floating({:?})", _0)]
    Floating(f64),
}

/// Integral floats keep their `.0` so `"A" + 2.0` reads `A2.0`. Very large or
/// very small magnitudes switch to exponent form, e.g. `1e+21`, `1.5e-07`.
fn format_floating(v: f64) -> String {
    let magnitude = v.abs();
    if v.is_finite() && v != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{:e}", v);
        return match formatted.split_once('e') {
            Some((mantissa, exp)) => match exp.strip_prefix('-') {
                Some(exp) => format!("{}e-{:0>2}", mantissa, exp),
                None => format!("{}e+{:0>2}", mantissa, exp),
            },
            None => formatted,
        };
    }
    if v.is_finite() && v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}

impl Number {
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Integer(v) => v as f64,
            Self::Floating(v) => v,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Integer(v) => v == 0,
            Number::Floating(v) => v == 0.0,
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Number::Integer(_))
    }
}

// Integer results that overflow i64 fall back to floating arithmetic.
macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl $trait for Number {
            type Output = Self;
            fn $method(self, rhs: Self) -> Self::Output {
                match (self, rhs) {
                    (Self::Integer(l), Self::Integer(r)) => match l.$checked(r) {
                        Some(v) => Self::Integer(v),
                        None => Self::Floating((l as f64).$method(r as f64)),
                    },
                    (l, r) => Self::Floating(l.to_f64().$method(r.to_f64())),
                }
            }
        }
    };
}

impl_binary_op!(Add, add, checked_add);
impl_binary_op!(Sub, sub, checked_sub);
impl_binary_op!(Mul, mul, checked_mul);

impl Number {
    /// True division, the result is always floating.
    pub fn true_div(self, rhs: Self) -> Self {
        Self::Floating(self.to_f64() / rhs.to_f64())
    }
}

impl Neg for Number {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Integer(v) => match v.checked_neg() {
                Some(v) => Self::Integer(v),
                None => Self::Floating(-(v as f64)),
            },
            Self::Floating(v) => Self::Floating(-v),
        }
    }
}

/// Exact comparison of an integer against a float, without rounding the
/// integer through `f64`.
fn cmp_integer_floating(l: i64, r: f64) -> Option<Ordering> {
    if r.is_nan() {
        return None;
    }
    // 2^63 is exactly representable, anything at or past it is out of i64 range
    if r >= 9_223_372_036_854_775_808.0 {
        return Some(Ordering::Less);
    }
    if r < -9_223_372_036_854_775_808.0 {
        return Some(Ordering::Greater);
    }
    let whole = r.trunc();
    match l.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0f64.partial_cmp(&(r - whole)),
        ordering => Some(ordering),
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        use Number::*;
        match (*self, *other) {
            (Integer(l), Integer(r)) => Some(l.cmp(&r)),
            (Integer(l), Floating(r)) => cmp_integer_floating(l, r),
            (Floating(l), Integer(r)) => cmp_integer_floating(r, l).map(Ordering::reverse),
            (Floating(l), Floating(r)) => l.partial_cmp(&r),
        }
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Number::Integer(v)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Floating(v)
    }
}
