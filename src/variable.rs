//! Measured values with optional standard uncertainty.

use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::error::{Error, Result};

/// Quadrature sum of two optional absolute uncertainties; `None` is exact
/// and acts as the identity.
fn quadrature(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.hypot(b)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}

/// A value with an optional standard uncertainty.
///
/// Arithmetic propagates uncertainty under the usual independence
/// assumption: absolute uncertainties add in quadrature for `+`/`-`,
/// relative ones for `*`/`/`. An exact variable (`uncertainty == None`)
/// stays distinguishable from one measured with zero uncertainty.
///
/// Comparisons (`==`, `<`, ...) look at the value only; use
/// [`almost_equal`](Self::almost_equal) to compare within the combined
/// confidence intervals, or [`same_as`](Self::same_as) for structural
/// identity.
#[derive(Clone, Copy, Debug, Default)]
pub struct Variable {
    value: f64,
    uncertainty: Option<f64>,
}

impl Variable {
    /// An exact value.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            uncertainty: None,
        }
    }

    /// A measured value with a standard uncertainty.
    ///
    /// Fails with [`Error::InvalidUncertainty`] if `uncertainty` is
    /// negative.
    pub fn with_uncertainty(value: f64, uncertainty: f64) -> Result<Self> {
        Self::from_parts(value, Some(uncertainty))
    }

    /// Builds from a value and an optional uncertainty, validating the
    /// sign.
    pub fn from_parts(value: f64, uncertainty: Option<f64>) -> Result<Self> {
        if let Some(u) = uncertainty {
            if !(u >= 0.0) {
                return Err(Error::InvalidUncertainty(u));
            }
        }
        Ok(Self { value, uncertainty })
    }

    fn propagated(value: f64, uncertainty: Option<f64>) -> Self {
        Self {
            value,
            uncertainty: uncertainty.map(f64::abs),
        }
    }

    /// The central value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The absolute standard uncertainty, if any.
    pub fn uncertainty(&self) -> Option<f64> {
        self.uncertainty
    }

    /// The uncertainty relative to the value.
    pub fn relative_uncertainty(&self) -> Option<f64> {
        self.uncertainty.map(|u| u / self.value)
    }

    /// `true` when no uncertainty is attached.
    pub fn is_exact(&self) -> bool {
        self.uncertainty.is_none()
    }

    /// The same value with the uncertainty dropped.
    pub fn remove_uncertainty(&self) -> Self {
        Self::new(self.value)
    }

    /// `(value - u, value + u)`; a degenerate interval for exact values.
    pub fn confidence_interval(&self) -> (f64, f64) {
        let u = self.uncertainty.unwrap_or(0.0);
        (self.value - u, self.value + u)
    }

    /// `true` when the confidence intervals of the two variables overlap.
    pub fn almost_equal(&self, other: &Variable) -> bool {
        let (lo_a, hi_a) = self.confidence_interval();
        let (lo_b, hi_b) = other.confidence_interval();
        lo_a <= hi_b && lo_b <= hi_a
    }

    /// Structural identity: same value and same uncertainty.
    pub fn same_as(&self, other: &Variable) -> bool {
        self.value == other.value && self.uncertainty == other.uncertainty
    }

    /// Raises to a real power; the relative uncertainty scales by `|n|`.
    pub fn pow(self, n: f64) -> Self {
        let value = self.value.powf(n);
        let uncertainty = self
            .relative_uncertainty()
            .map(|r| value * r * n);
        Self::propagated(value, uncertainty)
    }

    /// Takes the `n`-th root; the relative uncertainty shrinks by `n`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn nthroot(self, n: i32) -> Self {
        assert!(n != 0, "zeroth root is undefined");
        let value = if n == 2 {
            self.value.sqrt()
        } else {
            self.value.powf(1.0 / f64::from(n))
        };
        let uncertainty = self
            .relative_uncertainty()
            .map(|r| value * r / f64::from(n));
        Self::propagated(value, uncertainty)
    }
}

// ───────────────────────── arithmetic ─────────────────────────

impl Add for Variable {
    type Output = Variable;

    fn add(self, rhs: Variable) -> Variable {
        Variable::propagated(
            self.value + rhs.value,
            quadrature(self.uncertainty, rhs.uncertainty),
        )
    }
}

impl Sub for Variable {
    type Output = Variable;

    fn sub(self, rhs: Variable) -> Variable {
        Variable::propagated(
            self.value - rhs.value,
            quadrature(self.uncertainty, rhs.uncertainty),
        )
    }
}

impl Mul for Variable {
    type Output = Variable;

    fn mul(self, rhs: Variable) -> Variable {
        let value = self.value * rhs.value;
        let rel = quadrature(self.relative_uncertainty(), rhs.relative_uncertainty());
        Variable::propagated(value, rel.map(|r| value * r))
    }
}

impl Div for Variable {
    type Output = Variable;

    fn div(self, rhs: Variable) -> Variable {
        let value = self.value / rhs.value;
        let rel = quadrature(self.relative_uncertainty(), rhs.relative_uncertainty());
        Variable::propagated(value, rel.map(|r| value * r))
    }
}

impl Add<f64> for Variable {
    type Output = Variable;

    fn add(self, rhs: f64) -> Variable {
        Variable::propagated(self.value + rhs, self.uncertainty)
    }
}

impl Sub<f64> for Variable {
    type Output = Variable;

    fn sub(self, rhs: f64) -> Variable {
        Variable::propagated(self.value - rhs, self.uncertainty)
    }
}

impl Mul<f64> for Variable {
    type Output = Variable;

    fn mul(self, rhs: f64) -> Variable {
        Variable::propagated(self.value * rhs, self.uncertainty.map(|u| u * rhs))
    }
}

impl Div<f64> for Variable {
    type Output = Variable;

    fn div(self, rhs: f64) -> Variable {
        Variable::propagated(self.value / rhs, self.uncertainty.map(|u| u / rhs))
    }
}

impl Mul<Variable> for f64 {
    type Output = Variable;

    fn mul(self, rhs: Variable) -> Variable {
        rhs * self
    }
}

impl Div<Variable> for f64 {
    type Output = Variable;

    fn div(self, rhs: Variable) -> Variable {
        let value = self / rhs.value;
        Variable::propagated(value, rhs.uncertainty.map(|u| value / rhs.value * u))
    }
}

impl Neg for Variable {
    type Output = Variable;

    fn neg(self) -> Variable {
        Variable {
            value: -self.value,
            uncertainty: self.uncertainty,
        }
    }
}

impl AddAssign for Variable {
    fn add_assign(&mut self, rhs: Variable) {
        *self = *self + rhs;
    }
}

impl SubAssign for Variable {
    fn sub_assign(&mut self, rhs: Variable) {
        *self = *self - rhs;
    }
}

impl MulAssign for Variable {
    fn mul_assign(&mut self, rhs: Variable) {
        *self = *self * rhs;
    }
}

impl DivAssign for Variable {
    fn div_assign(&mut self, rhs: Variable) {
        *self = *self / rhs;
    }
}

impl MulAssign<f64> for Variable {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl DivAssign<f64> for Variable {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

// ───────────────────────── comparisons ─────────────────────────

impl PartialEq for Variable {
    fn eq(&self, other: &Variable) -> bool {
        self.value == other.value
    }
}

impl PartialEq<f64> for Variable {
    fn eq(&self, other: &f64) -> bool {
        self.value == *other
    }
}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Variable) -> Option<core::cmp::Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl PartialOrd<f64> for Variable {
    fn partial_cmp(&self, other: &f64) -> Option<core::cmp::Ordering> {
        self.value.partial_cmp(other)
    }
}

impl From<f64> for Variable {
    fn from(value: f64) -> Variable {
        Variable::new(value)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.uncertainty {
            Some(u) => write!(f, "{} ± {}", self.value, u),
            None => write!(f, "{}", self.value),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Variable;

    #[derive(Serialize, Deserialize)]
    struct Repr {
        value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        uncertainty: Option<f64>,
    }

    impl Serialize for Variable {
        fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
            Repr {
                value: self.value(),
                uncertainty: self.uncertainty(),
            }
            .serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Variable {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> core::result::Result<Variable, D::Error> {
            let repr = Repr::deserialize(deserializer)?;
            Variable::from_parts(repr.value, repr.uncertainty).map_err(D::Error::custom)
        }
    }
}
