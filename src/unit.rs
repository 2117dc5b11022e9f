//! The [`Unit`] value type and its algebra.

use core::fmt;
use core::ops::{Div, Mul};
use core::str::FromStr;

use num_rational::Rational32;

use crate::compound::Compound;
use crate::dimension::Dimension;
use crate::element::UnitElement;
use crate::error::{Error, Result};
use crate::parse;
use crate::registry::{Registry, BASE_SI_UNITS};

/// Raises a float to a rational power, staying exact for integer exponents.
fn pow_ratio(base: f64, e: Rational32) -> f64 {
    if *e.denom() == 1 {
        base.powi(*e.numer())
    } else {
        base.powf(*e.numer() as f64 / *e.denom() as f64)
    }
}

/// A unit of measurement: an element multiset, its aggregate physical
/// dimension, and the conversion factor to SI base units.
///
/// Units are immutable values. Equality is by *measurement meaning* —
/// dimension and factor — so `N == kg·m/s²`; use [`same_as`](Self::same_as)
/// for structural (spelling) identity. Because of that equality contract,
/// `Unit` does not implement `Hash`.
///
/// ```
/// use siunit::Unit;
///
/// let newton = Unit::parse("N")?;
/// let composed = Unit::parse("kg.m/s2")?;
/// assert_eq!(newton, composed);
/// assert!(!newton.same_as(&composed));
/// # Ok::<(), siunit::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Unit {
    elements: Compound,
    dimension: Dimension,
    factor: f64,
}

impl Unit {
    /// The empty, factor-1 unit of plain numbers.
    pub const DIMENSIONLESS: Unit = Unit {
        elements: Compound::new(),
        dimension: Dimension::DIMENSIONLESS,
        factor: 1.0,
    };

    /// Parses a unit expression (see the crate docs for the grammar).
    pub fn parse(symbol: &str) -> Result<Unit> {
        let (elements, dimension, factor) = parse::resolve(symbol)?;
        Ok(Unit {
            elements,
            dimension,
            factor,
        })
    }

    /// Constructor for derived units: collapses to the canonical empty
    /// element set when the aggregate dimension is zero.
    fn from_parts(mut elements: Compound, dimension: Dimension, factor: f64) -> Unit {
        if dimension.is_dimensionless() {
            elements.clear();
        }
        Unit {
            elements,
            dimension,
            factor,
        }
    }

    /// Constructor for unit transforms that must preserve atomic
    /// dimensionless spellings (`%`, `°`, ...).
    fn raw(elements: Compound, dimension: Dimension, factor: f64) -> Unit {
        Unit {
            elements,
            dimension,
            factor,
        }
    }

    /// The element multiset.
    pub fn elements(&self) -> &Compound {
        &self.elements
    }

    /// The aggregate physical dimension.
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Conversion factor to SI base units.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// `true` when the dimension is all-zero (the factor may still differ
    /// from 1, e.g. for `%`).
    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// Deterministic rendered symbol, e.g. `kg·m²/s²`.
    pub fn symbol(&self) -> String {
        parse::combine(&self.elements)
    }

    /// Spelled-out rendering, e.g. `kilogram·meter²/second²`.
    pub fn fullname(&self) -> String {
        parse::combine_fullname(&self.elements)
    }

    /// Structural identity: same elements, same exponents (and therefore
    /// the same rendering), not merely the same measurement meaning.
    pub fn same_as(&self, other: &Unit) -> bool {
        self.elements == other.elements
            && self.dimension == other.dimension
            && self.factor == other.factor
    }

    /// How many of `other` one of `self` is worth.
    pub fn factor_over(&self, other: &Unit) -> f64 {
        self.factor / other.factor
    }

    /// Errors with [`Error::DimensionMismatch`] unless both units share a
    /// dimension.
    pub fn check_same_dimension(&self, other: &Unit) -> Result<()> {
        if self.dimension == other.dimension {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                left: self.dimension,
                right: other.dimension,
            })
        }
    }

    /// The reciprocal unit.
    pub fn inverse(&self) -> Unit {
        Unit::from_parts(
            -&self.elements,
            self.dimension.inverse(),
            1.0 / self.factor,
        )
    }

    /// Raises the unit to an integer power. The zeroth power is the
    /// dimensionless unit.
    pub fn pow(&self, n: i32) -> Unit {
        Unit::from_parts(
            self.elements.scale(Rational32::from_integer(n)),
            self.dimension.powi(n),
            self.factor.powi(n),
        )
    }

    /// Takes the `n`-th root of the unit; exponents become rational.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn nthroot(&self, n: i32) -> Unit {
        let k = Rational32::new(1, n);
        Unit::from_parts(
            self.elements.scale(k),
            self.dimension.pow(k),
            pow_ratio(self.factor, k),
        )
    }

    /// Strips every SI prefix, returning the deprefixed unit and the factor
    /// taken out of it (`value_new = value_old * factor_removed` keeps a
    /// quantity unchanged). Bare-prefix elements (base is the empty
    /// pseudo-unit) vanish entirely.
    pub fn deprefix_with_factor(&self) -> (Unit, f64) {
        let mut elements = Compound::new();
        let mut removed = 1.0;
        for (element, exponent) in self.elements.iter() {
            if !element.is_prefixed() {
                elements.add_exponent(element.clone(), *exponent);
                continue;
            }
            removed *= pow_ratio(element.prefix_factor(), *exponent);
            if !element.base().is_empty() {
                elements.add_exponent(element.deprefix(), *exponent);
            }
        }
        let unit = Unit::raw(elements, self.dimension, self.factor / removed);
        (unit, removed)
    }

    /// Rewrites the unit as a product of the seven SI base units dictated
    /// by its dimension, returning the new unit (factor 1) and the factor
    /// taken out of it.
    pub fn to_base_units_with_factor(&self) -> (Unit, f64) {
        let reg = Registry::global();
        let mut elements = Compound::new();
        for (symbol, exponent) in BASE_SI_UNITS.iter().zip(self.dimension.exponents()) {
            if *exponent.numer() == 0 {
                continue;
            }
            if let Ok(element) = UnitElement::resolve_in(symbol, reg) {
                elements.insert(element, exponent);
            }
        }
        (Unit::raw(elements, self.dimension, 1.0), self.factor)
    }

    /// Tries to collapse a multi-element unit to a single standard symbol,
    /// returning the simplified unit and the factor taken out of it.
    ///
    /// Units with fewer than two elements are returned unchanged. The
    /// dimension is first matched exactly against the standard table, then
    /// as a standard dimension raised to `-1`, `2` or `-2`, in that order.
    /// No match returns the unit unchanged with factor 1.
    pub fn simplify_with_factor(&self) -> (Unit, f64) {
        if self.elements.len() < 2 {
            return (self.clone(), 1.0);
        }
        let reg = Registry::global();
        if let Some(symbol) = reg.standard_unit_for_dimension(&self.dimension) {
            return self.collapse_to(symbol, 1);
        }
        for e in [-1, 2, -2] {
            let candidate = self.dimension.pow(Rational32::new(1, e));
            if let Some(symbol) = reg.standard_unit_for_dimension(&candidate) {
                return self.collapse_to(symbol, e);
            }
        }
        (self.clone(), 1.0)
    }

    fn collapse_to(&self, symbol: &str, exponent: i32) -> (Unit, f64) {
        match Unit::parse(symbol) {
            Ok(base) => {
                let unit = base.pow(exponent);
                let removed = self.factor / unit.factor;
                (unit, removed)
            }
            // standard-table symbols always parse; keep the unit if not
            Err(_) => (self.clone(), 1.0),
        }
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit::DIMENSIONLESS
    }
}

/// Measurement-meaning equality: dimension and factor.
impl PartialEq for Unit {
    fn eq(&self, other: &Unit) -> bool {
        self.dimension == other.dimension && self.factor == other.factor
    }
}

impl Mul<&Unit> for &Unit {
    type Output = Unit;

    fn mul(self, rhs: &Unit) -> Unit {
        Unit::from_parts(
            &self.elements + &rhs.elements,
            self.dimension * rhs.dimension,
            self.factor * rhs.factor,
        )
    }
}

impl Mul for Unit {
    type Output = Unit;

    fn mul(self, rhs: Unit) -> Unit {
        &self * &rhs
    }
}

impl Div<&Unit> for &Unit {
    type Output = Unit;

    fn div(self, rhs: &Unit) -> Unit {
        Unit::from_parts(
            &self.elements - &rhs.elements,
            self.dimension / rhs.dimension,
            self.factor / rhs.factor,
        )
    }
}

impl Div for Unit {
    type Output = Unit;

    fn div(self, rhs: Unit) -> Unit {
        &self / &rhs
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Unit> {
        Unit::parse(s)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol())
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    //! A `Unit` serializes as its symbol string and is parsed back on
    //! deserialization.

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Unit;

    impl Serialize for Unit {
        fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.symbol())
        }
    }

    impl<'de> Deserialize<'de> for Unit {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> core::result::Result<Unit, D::Error> {
            let symbol = String::deserialize(deserializer)?;
            Unit::parse(&symbol).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit(s: &str) -> Unit {
        Unit::parse(s).unwrap()
    }

    // ───────────────────────── identity and equality ─────────────────────────

    #[test]
    fn equality_is_by_meaning() {
        assert_eq!(unit("N"), unit("kg.m/s2"));
        assert_eq!(unit("J"), unit("N·m"));
        assert_ne!(unit("J"), unit("cal"));
        assert_ne!(unit("m"), unit("s"));
    }

    #[test]
    fn same_as_is_structural() {
        assert!(unit("N").same_as(&unit("N")));
        assert!(!unit("N").same_as(&unit("kg.m/s2")));
        assert!(unit("kg·m/s·s").same_as(&unit("kg.m/s2")));
    }

    #[test]
    fn dimensionless_constant() {
        assert_eq!(unit(""), Unit::DIMENSIONLESS);
        assert!(Unit::DIMENSIONLESS.elements().is_empty());
        assert_relative_eq!(Unit::DIMENSIONLESS.factor(), 1.0);
    }

    #[test]
    fn percent_is_dimensionless_but_not_unity() {
        let pct = unit("%");
        assert!(pct.is_dimensionless());
        assert_ne!(pct, Unit::DIMENSIONLESS); // factor differs
        assert_eq!(pct.symbol(), "%");
    }

    // ───────────────────────── algebra ─────────────────────────

    #[test]
    fn mul_div_compose() {
        let v = &unit("m") / &unit("s");
        assert_eq!(v.dimension(), Dimension::VELOCITY);
        assert_eq!(v.symbol(), "m/s");

        let j = unit("N") * unit("m");
        assert_eq!(j, unit("J"));
        assert_eq!(j.symbol(), "N·m");
    }

    #[test]
    fn mul_collapses_dimensionless_results() {
        let product = unit("Hz") * unit("s");
        assert!(product.elements().is_empty());
        assert_relative_eq!(product.factor(), 1.0);

        let ratio = &unit("km") / &unit("m");
        assert!(ratio.elements().is_empty());
        assert_relative_eq!(ratio.factor(), 1e3);
    }

    #[test]
    fn inverse_and_pow() {
        let hz = unit("Hz");
        assert_eq!(hz.inverse().dimension(), Dimension::TIME);
        assert_relative_eq!(unit("km").inverse().factor(), 1e-3);

        let m3 = unit("m").pow(3);
        assert_eq!(m3.dimension(), Dimension::VOLUME);
        assert_eq!(m3.symbol(), "m³");
        assert_eq!(unit("m").pow(0), Unit::DIMENSIONLESS);
    }

    #[test]
    fn nthroot_inverts_pow() {
        let km = unit("km");
        let back = km.pow(3).nthroot(3);
        assert_eq!(back.elements(), km.elements());
        assert_eq!(back.dimension(), km.dimension());
        assert_relative_eq!(back.factor(), 1e3, max_relative = 1e-12);

        let half = unit("m2").nthroot(2);
        assert_eq!(half.dimension(), Dimension::LENGTH);
    }

    #[test]
    fn factor_over() {
        assert_relative_eq!(unit("km").factor_over(&unit("m")), 1e3);
        assert_relative_eq!(unit("min").factor_over(&unit("h")), 1.0 / 60.0);
    }

    #[test]
    fn dimension_check() {
        assert!(unit("m").check_same_dimension(&unit("km")).is_ok());
        let err = unit("m").check_same_dimension(&unit("s")).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                left: Dimension::LENGTH,
                right: Dimension::TIME,
            }
        );
    }

    // ───────────────────────── transforms ─────────────────────────

    #[test]
    fn deprefix_strips_prefixes() {
        let (stripped, removed) = unit("km/ms").deprefix_with_factor();
        assert!(stripped.same_as(&unit("m/s")));
        assert_relative_eq!(removed, 1e6);
        assert_relative_eq!(stripped.factor(), 1.0);
    }

    #[test]
    fn deprefix_drops_bare_prefixes() {
        // "k·m" carries a bare kilo element; deprefixing folds it out
        let (stripped, removed) = unit("k.m").deprefix_with_factor();
        assert!(stripped.same_as(&unit("m")));
        assert_relative_eq!(removed, 1e3);
    }

    #[test]
    fn deprefix_keeps_atomic_dimensionless() {
        let (stripped, removed) = unit("%").deprefix_with_factor();
        assert_eq!(stripped.symbol(), "%");
        assert_relative_eq!(removed, 1.0);
    }

    #[test]
    fn to_base_units() {
        let (base, old_factor) = unit("cal/h.m2").to_base_units_with_factor();
        assert!(base.same_as(&unit("kg/s3")));
        assert_relative_eq!(base.factor(), 1.0);
        assert_relative_eq!(old_factor, 4.1868 / 3600.0, max_relative = 1e-12);
    }

    #[test]
    fn simplify_exact_standard_match() {
        let (simplified, removed) = unit("kg.m/s2").simplify_with_factor();
        assert!(simplified.same_as(&unit("N")));
        assert_relative_eq!(removed, 1.0);

        let (gray, _) = unit("m2/s2").simplify_with_factor();
        assert!(gray.same_as(&unit("Gy")));
    }

    #[test]
    fn simplify_probes_powers() {
        // (force)² has no standard unit, but its square root does
        let (simplified, removed) = unit("kg2.m2/s4").simplify_with_factor();
        assert!(simplified.same_as(&unit("N").pow(2)));
        assert_relative_eq!(removed, 1.0);
    }

    #[test]
    fn simplify_leaves_small_units_alone() {
        let km = unit("km");
        let (simplified, removed) = km.simplify_with_factor();
        assert!(simplified.same_as(&km));
        assert_relative_eq!(removed, 1.0);

        // velocity is irregular: no standard unit, unchanged
        let v = unit("km/h");
        let (simplified, _) = v.simplify_with_factor();
        assert!(simplified.same_as(&v));
    }

    #[test]
    fn simplify_is_idempotent() {
        for s in ["kg.m/s2", "C/s.V", "km/h", "J/K"] {
            let (once, _) = unit(s).simplify_with_factor();
            let (twice, removed) = once.simplify_with_factor();
            assert!(twice.same_as(&once), "not idempotent for {s}");
            assert_relative_eq!(removed, 1.0);
        }
    }

    #[test]
    fn parse_and_display_round_trip() {
        for s in ["m/s", "kg·m²/s²", "cal/h·m²", "N·m", "%"] {
            let u = unit(s);
            let reparsed = unit(&u.symbol());
            assert!(reparsed.same_as(&u), "round trip failed for {s}");
        }
    }

    #[test]
    fn from_str_works() {
        let u: Unit = "km/h".parse().unwrap();
        assert_eq!(u.dimension(), Dimension::VELOCITY);
        assert!("m°C".parse::<Unit>().is_err());
    }
}
