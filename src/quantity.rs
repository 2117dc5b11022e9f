//! Quantities: a [`Variable`] bound to a [`Unit`].

use core::fmt;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::dimension::Dimension;
use crate::error::{Error, Result};
use crate::unit::Unit;
use crate::variable::Variable;

/// A physical quantity: a (possibly uncertain) value expressed in a unit.
///
/// Addition and subtraction require operands of equal dimension; the result
/// stays in the left operand's unit. Multiplication and division are always
/// legal and canonicalize their result: a dimensionless product folds the
/// unit factor into the value, any other product is simplified against the
/// standard-unit table.
///
/// ```
/// use siunit::Quantity;
///
/// let d = Quantity::parse(3.0, "km")?;
/// let t = Quantity::parse(2.0, "h")?;
/// let v = d.clone() / t;
/// assert_eq!(v.unit().symbol(), "km/h");
///
/// let total = (d + Quantity::parse(500.0, "m")?).value();
/// assert_eq!(total, 3.5);
/// # Ok::<(), siunit::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Quantity {
    variable: Variable,
    unit: Unit,
}

impl Quantity {
    /// An exact value in `unit`.
    pub fn new(value: f64, unit: Unit) -> Quantity {
        Quantity {
            variable: Variable::new(value),
            unit,
        }
    }

    /// An exact value in a parsed unit.
    pub fn parse(value: f64, symbol: &str) -> Result<Quantity> {
        Ok(Quantity::new(value, Unit::parse(symbol)?))
    }

    /// A measured value with standard uncertainty in `unit`.
    pub fn with_uncertainty(value: f64, uncertainty: f64, unit: Unit) -> Result<Quantity> {
        Ok(Quantity {
            variable: Variable::with_uncertainty(value, uncertainty)?,
            unit,
        })
    }

    /// Binds an existing variable to a unit.
    pub fn from_variable(variable: Variable, unit: Unit) -> Quantity {
        Quantity { variable, unit }
    }

    /// A bare number.
    pub fn dimensionless(value: f64) -> Quantity {
        Quantity::new(value, Unit::DIMENSIONLESS)
    }

    /// The value in the quantity's own unit.
    pub fn value(&self) -> f64 {
        self.variable.value()
    }

    /// The absolute uncertainty in the quantity's own unit, if any.
    pub fn uncertainty(&self) -> Option<f64> {
        self.variable.uncertainty()
    }

    /// The value with its uncertainty.
    pub fn variable(&self) -> Variable {
        self.variable
    }

    /// The unit.
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// The unit's dimension.
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// `true` when no uncertainty is attached.
    pub fn is_exact(&self) -> bool {
        self.variable.is_exact()
    }

    /// `true` when the unit's dimension is all-zero.
    pub fn is_dimensionless(&self) -> bool {
        self.unit.is_dimensionless()
    }

    /// The same quantity with its uncertainty dropped.
    pub fn remove_uncertainty(&self) -> Quantity {
        Quantity {
            variable: self.variable.remove_uncertainty(),
            unit: self.unit.clone(),
        }
    }

    /// Re-expresses the quantity in `unit`, checking that the dimensions
    /// match.
    pub fn to(&self, unit: &Unit) -> Result<Quantity> {
        self.unit.check_same_dimension(unit)?;
        Ok(self.to_unchecked(unit))
    }

    /// Re-expresses the quantity in a parsed unit.
    pub fn to_symbol(&self, symbol: &str) -> Result<Quantity> {
        self.to(&Unit::parse(symbol)?)
    }

    /// Rescales to `unit` without a dimension check. The numeric rescale by
    /// the factor quotient is applied regardless, so a mismatched target
    /// silently changes the quantity's meaning.
    pub fn to_unchecked(&self, unit: &Unit) -> Quantity {
        let scale = self.unit.factor_over(unit);
        Quantity {
            variable: self.variable * scale,
            unit: unit.clone(),
        }
    }

    /// In-place [`to`](Self::to). The receiver is untouched on error.
    pub fn ito(&mut self, unit: &Unit) -> Result<()> {
        *self = self.to(unit)?;
        Ok(())
    }

    /// In-place [`to_unchecked`](Self::to_unchecked).
    pub fn ito_unchecked(&mut self, unit: &Unit) {
        *self = self.to_unchecked(unit);
    }

    /// Checked addition: requires equal dimensions, result in `self`'s
    /// unit.
    pub fn try_add(&self, other: &Quantity) -> Result<Quantity> {
        self.unit.check_same_dimension(&other.unit)?;
        let rebased = other.variable * other.unit.factor_over(&self.unit);
        Ok(Quantity {
            variable: self.variable + rebased,
            unit: self.unit.clone(),
        })
    }

    /// Checked subtraction: requires equal dimensions, result in `self`'s
    /// unit.
    pub fn try_sub(&self, other: &Quantity) -> Result<Quantity> {
        self.unit.check_same_dimension(&other.unit)?;
        let rebased = other.variable * other.unit.factor_over(&self.unit);
        Ok(Quantity {
            variable: self.variable - rebased,
            unit: self.unit.clone(),
        })
    }

    /// Raises the quantity to an integer power. The unit is powered
    /// verbatim, not simplified; the zeroth power is an exact
    /// dimensionless 1.
    pub fn powi(&self, n: i32) -> Quantity {
        let variable = if n == 0 {
            self.variable.remove_uncertainty().pow(0.0)
        } else {
            self.variable.pow(f64::from(n))
        };
        Quantity {
            variable,
            unit: self.unit.pow(n),
        }
    }

    /// Takes the `n`-th root.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn nthroot(&self, n: i32) -> Quantity {
        Quantity {
            variable: self.variable.nthroot(n),
            unit: self.unit.nthroot(n),
        }
    }

    /// Strips SI prefixes from the unit, rescaling the value to keep the
    /// quantity unchanged.
    pub fn deprefix_unit(&self) -> Quantity {
        let (unit, removed) = self.unit.deprefix_with_factor();
        Quantity {
            variable: self.variable * removed,
            unit,
        }
    }

    /// In-place [`deprefix_unit`](Self::deprefix_unit).
    pub fn deprefix_unit_mut(&mut self) {
        *self = self.deprefix_unit();
    }

    /// Re-expresses the quantity in SI base units.
    pub fn to_base_unit(&self) -> Quantity {
        let (unit, removed) = self.unit.to_base_units_with_factor();
        Quantity {
            variable: self.variable * removed,
            unit,
        }
    }

    /// In-place [`to_base_unit`](Self::to_base_unit).
    pub fn to_base_unit_mut(&mut self) {
        *self = self.to_base_unit();
    }

    /// Collapses the unit to a standard symbol where possible, rescaling
    /// the value to keep the quantity unchanged.
    pub fn simplify_unit(&self) -> Quantity {
        let (unit, removed) = self.unit.simplify_with_factor();
        Quantity {
            variable: self.variable * removed,
            unit,
        }
    }

    /// In-place [`simplify_unit`](Self::simplify_unit).
    pub fn simplify_unit_mut(&mut self) {
        *self = self.simplify_unit();
    }

    /// The value rescaled to SI base units, for unit-blind comparisons.
    fn si_value(&self) -> f64 {
        self.variable.value() * self.unit.factor()
    }

    /// Canonicalizes a product or quotient: dimensionless results fold the
    /// unit factor into the value, others are simplified.
    fn canonicalized(variable: Variable, unit: Unit) -> Quantity {
        if unit.is_dimensionless() {
            let factor = unit.factor();
            Quantity {
                variable: variable * factor,
                unit: Unit::DIMENSIONLESS,
            }
        } else {
            let (unit, removed) = unit.simplify_with_factor();
            Quantity {
                variable: variable * removed,
                unit,
            }
        }
    }
}

// ───────────────────────── operators ─────────────────────────

impl Add for Quantity {
    type Output = Quantity;

    /// # Panics
    ///
    /// Panics on dimension mismatch; use [`Quantity::try_add`] to handle
    /// the error.
    fn add(self, rhs: Quantity) -> Quantity {
        match self.try_add(&rhs) {
            Ok(q) => q,
            Err(e) => panic!("{e}"),
        }
    }
}

impl Sub for Quantity {
    type Output = Quantity;

    /// # Panics
    ///
    /// Panics on dimension mismatch; use [`Quantity::try_sub`] to handle
    /// the error.
    fn sub(self, rhs: Quantity) -> Quantity {
        match self.try_sub(&rhs) {
            Ok(q) => q,
            Err(e) => panic!("{e}"),
        }
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Quantity) {
        *self = self.clone() + rhs;
    }
}

impl SubAssign for Quantity {
    fn sub_assign(&mut self, rhs: Quantity) {
        *self = self.clone() - rhs;
    }
}

/// Scalar addition treats the scalar as a value in the quantity's own
/// (dimensionless) unit, so `5 % + 10` is `15 %`.
fn check_scalar_operand(q: &Quantity) {
    if !q.is_dimensionless() {
        panic!(
            "{}",
            Error::DimensionMismatch {
                left: q.dimension(),
                right: Dimension::DIMENSIONLESS,
            }
        );
    }
}

impl Add<f64> for Quantity {
    type Output = Quantity;

    /// # Panics
    ///
    /// Panics unless the quantity is dimensionless: a bare scalar only has
    /// a meaning as a quantity in a dimensionless unit.
    fn add(self, rhs: f64) -> Quantity {
        check_scalar_operand(&self);
        Quantity {
            variable: self.variable + rhs,
            unit: self.unit,
        }
    }
}

impl Sub<f64> for Quantity {
    type Output = Quantity;

    /// # Panics
    ///
    /// Panics unless the quantity is dimensionless.
    fn sub(self, rhs: f64) -> Quantity {
        check_scalar_operand(&self);
        Quantity {
            variable: self.variable - rhs,
            unit: self.unit,
        }
    }
}

impl Add<Quantity> for f64 {
    type Output = Quantity;

    /// # Panics
    ///
    /// Panics unless the quantity is dimensionless.
    fn add(self, rhs: Quantity) -> Quantity {
        rhs + self
    }
}

impl Sub<Quantity> for f64 {
    type Output = Quantity;

    /// # Panics
    ///
    /// Panics unless the quantity is dimensionless.
    fn sub(self, rhs: Quantity) -> Quantity {
        -rhs + self
    }
}

impl Mul for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: Quantity) -> Quantity {
        Quantity::canonicalized(self.variable * rhs.variable, &self.unit * &rhs.unit)
    }
}

impl Div for Quantity {
    type Output = Quantity;

    fn div(self, rhs: Quantity) -> Quantity {
        Quantity::canonicalized(self.variable / rhs.variable, &self.unit / &rhs.unit)
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        Quantity {
            variable: self.variable * rhs,
            unit: self.unit,
        }
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;

    fn div(self, rhs: f64) -> Quantity {
        Quantity {
            variable: self.variable / rhs,
            unit: self.unit,
        }
    }
}

impl Mul<Quantity> for f64 {
    type Output = Quantity;

    fn mul(self, rhs: Quantity) -> Quantity {
        rhs * self
    }
}

impl Div<Quantity> for f64 {
    type Output = Quantity;

    fn div(self, rhs: Quantity) -> Quantity {
        Quantity::canonicalized(self / rhs.variable, rhs.unit.inverse())
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        Quantity {
            variable: -self.variable,
            unit: self.unit,
        }
    }
}

// ───────────────────────── comparisons ─────────────────────────

/// Equality compares factor-scaled values; quantities of different
/// dimensions are simply unequal.
impl PartialEq for Quantity {
    fn eq(&self, other: &Quantity) -> bool {
        self.dimension() == other.dimension() && self.si_value() == other.si_value()
    }
}

/// Ordering compares factor-scaled values; quantities of different
/// dimensions are unordered (`partial_cmp` returns `None`).
impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Quantity) -> Option<core::cmp::Ordering> {
        if self.dimension() != other.dimension() {
            return None;
        }
        self.si_value().partial_cmp(&other.si_value())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.unit.symbol();
        if symbol.is_empty() {
            write!(f, "{}", self.variable)
        } else {
            write!(f, "{} {}", self.variable, symbol)
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{Quantity, Unit, Variable};

    #[derive(Serialize, Deserialize)]
    struct Repr {
        value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        uncertainty: Option<f64>,
        unit: Unit,
    }

    impl Serialize for Quantity {
        fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
            Repr {
                value: self.value(),
                uncertainty: self.uncertainty(),
                unit: self.unit().clone(),
            }
            .serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Quantity {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> core::result::Result<Quantity, D::Error> {
            let repr = Repr::deserialize(deserializer)?;
            let variable =
                Variable::from_parts(repr.value, repr.uncertainty).map_err(D::Error::custom)?;
            Ok(Quantity::from_variable(variable, repr.unit))
        }
    }
}
