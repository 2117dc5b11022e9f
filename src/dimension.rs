//! Physical dimensions as vectors of rational exponents.
//!
//! A [`Dimension`] records the exponent of each of the seven SI base
//! dimensions, in the fixed order time `T`, length `L`, mass `M`, electric
//! current `I`, thermodynamic temperature `H`, amount of substance `N`,
//! luminous intensity `J`. Exponents are exact rationals so that roots of
//! units (e.g. `Hz¹ᐟ²`) stay representable without drift.

use core::fmt;
use core::ops::{Div, Mul};

use num_rational::Rational32;

use crate::superscript::superscript;

/// Symbols used by the `Display` impl, in component order.
const SYMBOLS: [char; 7] = ['T', 'L', 'M', 'I', 'H', 'N', 'J'];

/// A physical dimension: seven rational exponents over the SI base
/// dimensions `(T, L, M, I, H, N, J)`.
///
/// `Dimension` forms a group under multiplication: `Mul`/`Div` add and
/// subtract exponents componentwise, [`inverse`](Self::inverse) negates
/// them, and [`pow`](Self::pow)/[`nthroot`](Self::nthroot) scale them.
///
/// ```
/// use siunit::Dimension;
///
/// assert_eq!(Dimension::FORCE * Dimension::LENGTH, Dimension::ENERGY);
/// assert_eq!(Dimension::ENERGY / Dimension::TIME, Dimension::POWER);
/// assert_eq!(Dimension::AREA.nthroot(2), Dimension::LENGTH);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimension([Rational32; 7]);

impl Dimension {
    /// Builds a dimension from seven integer exponents in
    /// `(T, L, M, I, H, N, J)` order.
    pub const fn new(t: i32, l: i32, m: i32, i: i32, h: i32, n: i32, j: i32) -> Self {
        Self([
            Rational32::new_raw(t, 1),
            Rational32::new_raw(l, 1),
            Rational32::new_raw(m, 1),
            Rational32::new_raw(i, 1),
            Rational32::new_raw(h, 1),
            Rational32::new_raw(n, 1),
            Rational32::new_raw(j, 1),
        ])
    }

    /// All exponents zero.
    pub const DIMENSIONLESS: Self = Self::new(0, 0, 0, 0, 0, 0, 0);
    /// `T`
    pub const TIME: Self = Self::new(1, 0, 0, 0, 0, 0, 0);
    /// `L`
    pub const LENGTH: Self = Self::new(0, 1, 0, 0, 0, 0, 0);
    /// `M`
    pub const MASS: Self = Self::new(0, 0, 1, 0, 0, 0, 0);
    /// `I`
    pub const ELECTRIC_CURRENT: Self = Self::new(0, 0, 0, 1, 0, 0, 0);
    /// `H`
    pub const TEMPERATURE: Self = Self::new(0, 0, 0, 0, 1, 0, 0);
    /// `N`
    pub const AMOUNT_OF_SUBSTANCE: Self = Self::new(0, 0, 0, 0, 0, 1, 0);
    /// `J`
    pub const LUMINOUS_INTENSITY: Self = Self::new(0, 0, 0, 0, 0, 0, 1);
    /// `L²`
    pub const AREA: Self = Self::new(0, 2, 0, 0, 0, 0, 0);
    /// `L³`
    pub const VOLUME: Self = Self::new(0, 3, 0, 0, 0, 0, 0);
    /// `T⁻¹`
    pub const FREQUENCY: Self = Self::new(-1, 0, 0, 0, 0, 0, 0);
    /// `LT⁻¹`
    pub const VELOCITY: Self = Self::new(-1, 1, 0, 0, 0, 0, 0);
    /// `LT⁻²`
    pub const ACCELERATION: Self = Self::new(-2, 1, 0, 0, 0, 0, 0);
    /// `LMT⁻¹`
    pub const MOMENTUM: Self = Self::new(-1, 1, 1, 0, 0, 0, 0);
    /// `LMT⁻²`
    pub const FORCE: Self = Self::new(-2, 1, 1, 0, 0, 0, 0);
    /// `L⁻¹MT⁻²`
    pub const PRESSURE: Self = Self::new(-2, -1, 1, 0, 0, 0, 0);
    /// `L²MT⁻²`
    pub const ENERGY: Self = Self::new(-2, 2, 1, 0, 0, 0, 0);
    /// `L²MT⁻³`
    pub const POWER: Self = Self::new(-3, 2, 1, 0, 0, 0, 0);
    /// `TI`
    pub const CHARGE: Self = Self::new(1, 0, 0, 1, 0, 0, 0);
    /// `L²MT⁻³I⁻¹`
    pub const VOLTAGE: Self = Self::new(-3, 2, 1, -1, 0, 0, 0);
    /// `T⁴I²L⁻²M⁻¹`
    pub const CAPACITANCE: Self = Self::new(4, -2, -1, 2, 0, 0, 0);
    /// `L²MT⁻³I⁻²`
    pub const RESISTANCE: Self = Self::new(-3, 2, 1, -2, 0, 0, 0);
    /// `T³I²L⁻²M⁻¹`
    pub const CONDUCTANCE: Self = Self::new(3, -2, -1, 2, 0, 0, 0);
    /// `L²MT⁻²I⁻¹`
    pub const MAGNETIC_FLUX: Self = Self::new(-2, 2, 1, -1, 0, 0, 0);
    /// `MT⁻²I⁻¹`
    pub const MAGNETIC_INDUCTION: Self = Self::new(-2, 0, 1, -1, 0, 0, 0);
    /// `L²MT⁻²I⁻²`
    pub const INDUCTANCE: Self = Self::new(-2, 2, 1, -2, 0, 0, 0);
    /// `JL⁻²`
    pub const ILLUMINANCE: Self = Self::new(0, -2, 0, 0, 0, 0, 1);
    /// `L²T⁻²` (absorbed dose)
    pub const KERMA: Self = Self::new(-2, 2, 0, 0, 0, 0, 0);
    /// `TIM⁻¹`
    pub const EXPOSURE: Self = Self::new(1, 0, -1, 1, 0, 0, 0);
    /// `NT⁻¹`
    pub const CATALYTIC_ACTIVITY: Self = Self::new(-1, 0, 0, 0, 0, 1, 0);

    /// The seven exponents in `(T, L, M, I, H, N, J)` order.
    pub fn exponents(&self) -> [Rational32; 7] {
        self.0
    }

    /// `true` when every exponent is zero.
    pub fn is_dimensionless(&self) -> bool {
        self.0.iter().all(|e| *e.numer() == 0)
    }

    /// Negates every exponent.
    pub fn inverse(self) -> Self {
        Self(self.0.map(|e| -e))
    }

    /// Multiplies every exponent by a rational.
    pub fn pow(self, e: Rational32) -> Self {
        Self(self.0.map(|c| c * e))
    }

    /// Multiplies every exponent by an integer.
    pub fn powi(self, n: i32) -> Self {
        self.pow(Rational32::from_integer(n))
    }

    /// Divides every exponent by `n`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn nthroot(self, n: i32) -> Self {
        self.pow(Rational32::new(1, n))
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}

impl Mul for Dimension {
    type Output = Dimension;

    fn mul(self, rhs: Dimension) -> Dimension {
        let mut out = self.0;
        for (a, b) in out.iter_mut().zip(rhs.0) {
            *a += b;
        }
        Dimension(out)
    }
}

impl Div for Dimension {
    type Output = Dimension;

    fn div(self, rhs: Dimension) -> Dimension {
        let mut out = self.0;
        for (a, b) in out.iter_mut().zip(rhs.0) {
            *a -= b;
        }
        Dimension(out)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return f.write_str("1");
        }
        for (symbol, e) in SYMBOLS.iter().zip(self.0) {
            if *e.numer() == 0 {
                continue;
            }
            write!(f, "{}{}", symbol, superscript(e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ───────────────────────── group structure ─────────────────────────

    #[test]
    fn mul_adds_exponents() {
        assert_eq!(Dimension::LENGTH * Dimension::LENGTH, Dimension::AREA);
        assert_eq!(Dimension::MASS * Dimension::ACCELERATION, Dimension::FORCE);
        assert_eq!(Dimension::PRESSURE * Dimension::VOLUME, Dimension::ENERGY);
    }

    #[test]
    fn div_subtracts_exponents() {
        assert_eq!(Dimension::ENERGY / Dimension::CHARGE, Dimension::VOLTAGE);
        assert_eq!(
            Dimension::VOLTAGE / Dimension::ELECTRIC_CURRENT,
            Dimension::RESISTANCE
        );
    }

    #[test]
    fn inverse_is_self_inverse() {
        let d = Dimension::POWER;
        assert_eq!(d.inverse().inverse(), d);
        assert_eq!(d * d.inverse(), Dimension::DIMENSIONLESS);
        assert_eq!(
            Dimension::RESISTANCE.inverse(),
            Dimension::CONDUCTANCE
        );
    }

    #[test]
    fn pow_and_root() {
        assert_eq!(Dimension::LENGTH.powi(3), Dimension::VOLUME);
        assert_eq!(Dimension::VOLUME.nthroot(3), Dimension::LENGTH);
        let half = Dimension::LENGTH.nthroot(2);
        assert_eq!(half * half, Dimension::LENGTH);
    }

    #[test]
    fn dimensionless_detection() {
        assert!(Dimension::DIMENSIONLESS.is_dimensionless());
        assert!(!Dimension::TIME.is_dimensionless());
        assert!((Dimension::FORCE / Dimension::FORCE).is_dimensionless());
    }

    // ───────────────────────── rendering ─────────────────────────

    #[test]
    fn display_uses_superscripts() {
        assert_eq!(Dimension::FORCE.to_string(), "T⁻²LM");
        assert_eq!(Dimension::AREA.to_string(), "L²");
        assert_eq!(Dimension::TIME.to_string(), "T");
        assert_eq!(Dimension::DIMENSIONLESS.to_string(), "1");
    }

    #[test]
    fn display_fractional_exponent() {
        assert_eq!(Dimension::LENGTH.nthroot(2).to_string(), "L¹ᐟ²");
    }
}
