//! Numeric values with int/float promotion.

use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// A plain numeric constant.
///
/// Integer arithmetic stays integral where the operation allows it;
/// mixed operands promote to floats. `/` always divides as floats,
/// `//` is integer division.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(x) => x,
        }
    }

    fn both_int(self, other: Number) -> Option<(i64, i64)> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some((a, b)),
            _ => None,
        }
    }

    pub fn add(self, other: Number) -> Number {
        match self.both_int(other) {
            Some((a, b)) => Number::Int(a.wrapping_add(b)),
            None => Number::Float(self.as_f64() + other.as_f64()),
        }
    }

    pub fn sub(self, other: Number) -> Number {
        match self.both_int(other) {
            Some((a, b)) => Number::Int(a.wrapping_sub(b)),
            None => Number::Float(self.as_f64() - other.as_f64()),
        }
    }

    pub fn mul(self, other: Number) -> Number {
        match self.both_int(other) {
            Some((a, b)) => Number::Int(a.wrapping_mul(b)),
            None => Number::Float(self.as_f64() * other.as_f64()),
        }
    }

    /// Float division, regardless of operand kinds.
    pub fn div(self, other: Number) -> Result<Number, EvalError> {
        if other.as_f64() == 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        Ok(Number::Float(self.as_f64() / other.as_f64()))
    }

    /// Integer (floor) division.
    pub fn idiv(self, other: Number) -> Result<Number, EvalError> {
        match self.both_int(other) {
            Some((_, 0)) => Err(EvalError::DivisionByZero),
            Some((a, b)) => Ok(Number::Int(a.div_euclid(b))),
            None => {
                if other.as_f64() == 0.0 {
                    Err(EvalError::DivisionByZero)
                } else {
                    Ok(Number::Float((self.as_f64() / other.as_f64()).floor()))
                }
            }
        }
    }

    pub fn rem(self, other: Number) -> Result<Number, EvalError> {
        match self.both_int(other) {
            Some((_, 0)) => Err(EvalError::DivisionByZero),
            Some((a, b)) => Ok(Number::Int(a.rem_euclid(b))),
            None => {
                if other.as_f64() == 0.0 {
                    Err(EvalError::DivisionByZero)
                } else {
                    Ok(Number::Float(self.as_f64().rem_euclid(other.as_f64())))
                }
            }
        }
    }

    pub fn pow(self, other: Number) -> Number {
        match self.both_int(other) {
            Some((a, b)) if b >= 0 && b <= u32::MAX as i64 => {
                Number::Int(a.wrapping_pow(b as u32))
            }
            _ => Number::Float(self.as_f64().powf(other.as_f64())),
        }
    }

    pub fn neg(self) -> Number {
        match self {
            Number::Int(i) => Number::Int(-i),
            Number::Float(x) => Number::Float(-x),
        }
    }

    pub fn abs(self) -> Number {
        match self {
            Number::Int(i) => Number::Int(i.abs()),
            Number::Float(x) => Number::Float(x.abs()),
        }
    }

    pub fn min(self, other: Number) -> Number {
        if self.as_f64() <= other.as_f64() {
            self
        } else {
            other
        }
    }

    pub fn max(self, other: Number) -> Number {
        if self.as_f64() >= other.as_f64() {
            self
        } else {
            other
        }
    }

    pub fn exp(self) -> Number {
        Number::Float(self.as_f64().exp())
    }

    pub fn log(self) -> Result<Number, EvalError> {
        let x = self.as_f64();
        if x <= 0.0 {
            return Err(EvalError::DomainError {
                functor: "log".to_string(),
                message: format!("undefined for non-positive argument {}", x),
            });
        }
        Ok(Number::Float(x.ln()))
    }

    pub fn sqrt(self) -> Result<Number, EvalError> {
        let x = self.as_f64();
        if x < 0.0 {
            return Err(EvalError::DomainError {
                functor: "sqrt".to_string(),
                message: format!("undefined for negative argument {}", x),
            });
        }
        Ok(Number::Float(x.sqrt()))
    }

    pub fn sin(self) -> Number {
        Number::Float(self.as_f64().sin())
    }

    pub fn cos(self) -> Number {
        Number::Float(self.as_f64().cos())
    }

    pub fn tan(self) -> Number {
        Number::Float(self.as_f64().tan())
    }

    pub fn floor(self) -> Number {
        match self {
            Number::Int(i) => Number::Int(i),
            Number::Float(x) => Number::Float(x.floor()),
        }
    }

    pub fn ceil(self) -> Number {
        match self {
            Number::Int(i) => Number::Int(i),
            Number::Float(x) => Number::Float(x.ceil()),
        }
    }

    pub fn round(self) -> Number {
        match self {
            Number::Int(i) => Number::Int(i),
            Number::Float(x) => Number::Float(x.round()),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}
