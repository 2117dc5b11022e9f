//! The exponent multiset backing a [`Unit`](crate::Unit).

use core::ops::{Add, Neg, Sub};
use std::collections::BTreeMap;

use num_rational::Rational32;

use crate::element::UnitElement;

/// A multiset of unit elements with rational exponents.
///
/// Entries with a zero exponent are removed on write, so an empty compound
/// is the unique representation of "no elements". Iteration order is the
/// element order (base symbol, then prefix), which makes every derived
/// rendering deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compound {
    map: BTreeMap<UnitElement, Rational32>,
}

impl Compound {
    /// An empty multiset.
    pub const fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Number of distinct elements.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// `true` when no elements are present.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The exponent of `element`, zero if absent.
    pub fn get(&self, element: &UnitElement) -> Rational32 {
        self.map
            .get(element)
            .copied()
            .unwrap_or_else(|| Rational32::from_integer(0))
    }

    /// Sets the exponent of `element`, removing the entry when zero.
    pub(crate) fn insert(&mut self, element: UnitElement, exponent: Rational32) {
        if *exponent.numer() == 0 {
            self.map.remove(&element);
        } else {
            self.map.insert(element, exponent);
        }
    }

    /// Adds `delta` to the exponent of `element`, removing the entry when
    /// the sum is zero.
    pub(crate) fn add_exponent(&mut self, element: UnitElement, delta: Rational32) {
        let sum = self.get(&element) + delta;
        self.insert(element, sum);
    }

    /// Removes an element outright.
    pub(crate) fn remove(&mut self, element: &UnitElement) {
        self.map.remove(element);
    }

    /// Drops all elements.
    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterates `(element, exponent)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&UnitElement, &Rational32)> {
        self.map.iter()
    }

    /// Elements with a positive exponent, in canonical order.
    pub fn pos_items(&self) -> impl Iterator<Item = (&UnitElement, &Rational32)> {
        self.map.iter().filter(|(_, e)| **e > Rational32::from_integer(0))
    }

    /// Elements with a negative exponent, in canonical order.
    pub fn neg_items(&self) -> impl Iterator<Item = (&UnitElement, &Rational32)> {
        self.map.iter().filter(|(_, e)| **e < Rational32::from_integer(0))
    }

    /// Multiplies every exponent by `k`; scaling by zero empties the set.
    pub(crate) fn scale(&self, k: Rational32) -> Compound {
        if *k.numer() == 0 {
            return Compound::new();
        }
        Compound {
            map: self.map.iter().map(|(u, e)| (u.clone(), e * k)).collect(),
        }
    }
}

impl Add<&Compound> for &Compound {
    type Output = Compound;

    fn add(self, rhs: &Compound) -> Compound {
        let mut out = self.clone();
        for (element, exponent) in rhs.iter() {
            out.add_exponent(element.clone(), *exponent);
        }
        out
    }
}

impl Sub<&Compound> for &Compound {
    type Output = Compound;

    fn sub(self, rhs: &Compound) -> Compound {
        let mut out = self.clone();
        for (element, exponent) in rhs.iter() {
            out.add_exponent(element.clone(), -exponent);
        }
        out
    }
}

impl Neg for &Compound {
    type Output = Compound;

    fn neg(self) -> Compound {
        self.scale(Rational32::from_integer(-1))
    }
}
