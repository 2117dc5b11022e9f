//! A single prefixed unit symbol and its resolution rules.

use crate::dimension::Dimension;
use crate::error::{Error, Result};
use crate::registry::Registry;

/// One atom of a unit expression: a registered base symbol together with an
/// optional SI prefix, e.g. `km` is `(base: "m", prefix: "k")`.
///
/// Ordering (and therefore the canonical element order inside a
/// [`Unit`](crate::Unit)) compares the base symbol first, then the prefix.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitElement {
    base: String,
    prefix: String,
}

/// Single-letter spellings accepted for prefixes whose canonical symbol is
/// awkward to type.
fn prefix_alias(prefix: &str) -> &str {
    match prefix {
        "u" => "µ",
        "K" => "k",
        other => other,
    }
}

/// Splits `s` after its first `n` chars. `n` past the end yields `(s, "")`.
fn split_at_chars(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, ""),
    }
}

impl UnitElement {
    pub(crate) fn new(base: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            prefix: prefix.into(),
        }
    }

    /// Resolves a single token (no separators, no exponent) against the
    /// global registry.
    ///
    /// The probe order is: exact unit symbol, prefix + unit symbol (with the
    /// `u → µ` and `K → k` aliases), exact unit fullname, then prefix
    /// fullname + unit fullname. Units marked never-prefix are skipped in
    /// the prefixed probes rather than aborting resolution.
    ///
    /// ```
    /// use siunit::UnitElement;
    ///
    /// let km = UnitElement::resolve("km").unwrap();
    /// assert_eq!((km.base(), km.prefix()), ("m", "k"));
    ///
    /// let h = UnitElement::resolve("h").unwrap(); // hour, not hecto-…
    /// assert_eq!((h.base(), h.prefix()), ("h", ""));
    /// ```
    pub fn resolve(symbol: &str) -> Result<Self> {
        Self::resolve_in(symbol, Registry::global())
    }

    pub(crate) fn resolve_in(symbol: &str, reg: &Registry) -> Result<Self> {
        // 1. exact symbol
        if reg.lookup_unit(symbol).is_some() {
            return Ok(Self::new(symbol, ""));
        }

        // 2. prefix + symbol; the base may be the empty pseudo-unit, which
        // makes a bare prefix ("k") a valid dimensionless element
        let n_chars = symbol.chars().count();
        for plen in 1..=reg.prefix_max_chars().min(n_chars) {
            let (head, base) = split_at_chars(symbol, plen);
            let prefix = prefix_alias(head);
            if reg.lookup_prefix(prefix).is_none() {
                continue;
            }
            match reg.lookup_unit(base) {
                Some(entry) if !entry.never_prefix => {
                    return Ok(Self::new(base, prefix));
                }
                _ => {}
            }
        }

        // 3. exact fullname
        if let Some(sym) = reg.lookup_unit_by_fullname(symbol) {
            log::trace!("resolved '{symbol}' by fullname as '{sym}'");
            return Ok(Self::new(sym, ""));
        }

        // 4. prefix fullname + unit fullname
        let (min, max) = reg.prefix_fullname_char_bounds();
        for plen in min..=max.min(n_chars.saturating_sub(1)) {
            let (head, tail) = split_at_chars(symbol, plen);
            let (Some(prefix), Some(base)) = (
                reg.lookup_prefix_by_fullname(head),
                reg.lookup_unit_by_fullname(tail),
            ) else {
                continue;
            };
            if reg.lookup_unit(base).is_some_and(|e| e.never_prefix) {
                continue;
            }
            log::trace!("resolved '{symbol}' by fullname as '{prefix}{base}'");
            return Ok(Self::new(base, prefix));
        }

        Err(Error::UnknownSymbol(symbol.to_owned()))
    }

    /// The registered base symbol, without prefix.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The prefix symbol, possibly empty.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `true` if the element carries a non-empty prefix.
    pub fn is_prefixed(&self) -> bool {
        !self.prefix.is_empty()
    }

    /// The rendered symbol, prefix + base.
    pub fn symbol(&self) -> String {
        format!("{}{}", self.prefix, self.base)
    }

    /// Spelled-out name, prefix fullname + base fullname (`"kilometer"`).
    pub fn fullname(&self) -> String {
        let reg = Registry::global();
        let prefix = reg
            .lookup_prefix(&self.prefix)
            .map(|e| e.fullname)
            .unwrap_or_default();
        let base = reg
            .lookup_unit(&self.base)
            .map(|e| e.fullname)
            .or_else(|| reg.lookup_special(&self.base).map(|e| e.fullname))
            .unwrap_or_default();
        format!("{prefix}{base}")
    }

    /// The prefix multiplier (1 for the empty prefix).
    pub fn prefix_factor(&self) -> f64 {
        Registry::global()
            .lookup_prefix(&self.prefix)
            .map_or(1.0, |e| e.factor)
    }

    /// The base unit's conversion factor to SI, without the prefix.
    pub fn base_factor(&self) -> f64 {
        let reg = Registry::global();
        reg.lookup_unit(&self.base)
            .map(|e| e.factor)
            .or_else(|| reg.lookup_special(&self.base).map(|e| e.factor))
            .unwrap_or(1.0)
    }

    /// Full conversion factor to SI, prefix included.
    pub fn factor(&self) -> f64 {
        self.prefix_factor() * self.base_factor()
    }

    /// The base unit's dimension. Special dimensionless literals and the
    /// empty pseudo-unit are dimensionless.
    pub fn dimension(&self) -> Dimension {
        Registry::global()
            .lookup_unit(&self.base)
            .map_or(Dimension::DIMENSIONLESS, |e| e.dimension)
    }

    /// The same element with its prefix stripped.
    pub fn deprefix(&self) -> UnitElement {
        Self::new(self.base.clone(), "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn elem(symbol: &str) -> UnitElement {
        UnitElement::resolve(symbol).unwrap()
    }

    // ───────────────────────── resolution order ─────────────────────────

    #[test]
    fn exact_symbol_wins_over_prefix_split() {
        // "h" is both the hour symbol and the hecto prefix
        let h = elem("h");
        assert_eq!((h.base(), h.prefix()), ("h", ""));
        assert_relative_eq!(h.factor(), 3600.0);

        // "min" must not resolve as milli + "in"
        let min = elem("min");
        assert_eq!((min.base(), min.prefix()), ("min", ""));

        // "cd" is candela, not centi-day
        let cd = elem("cd");
        assert_eq!((cd.base(), cd.prefix()), ("cd", ""));
    }

    #[test]
    fn prefixed_symbols() {
        let km = elem("km");
        assert_eq!((km.base(), km.prefix()), ("m", "k"));
        assert_relative_eq!(km.factor(), 1e3);

        let dam = elem("dam");
        assert_eq!((dam.base(), dam.prefix()), ("m", "da"));
        assert_relative_eq!(dam.factor(), 10.0);

        let khz = elem("kHz");
        assert_eq!((khz.base(), khz.prefix()), ("Hz", "k"));
    }

    #[test]
    fn prefix_aliases() {
        let us = elem("us");
        assert_eq!((us.base(), us.prefix()), ("s", "µ"));
        assert_relative_eq!(us.factor(), 1e-6);

        let kk = elem("KK"); // K → k alias, kilokelvin
        assert_eq!((kk.base(), kk.prefix()), ("K", "k"));
    }

    #[test]
    fn bare_prefix_resolves_via_empty_unit() {
        let k = elem("k");
        assert_eq!((k.base(), k.prefix()), ("", "k"));
        assert_relative_eq!(k.factor(), 1e3);
        assert!(k.dimension().is_dimensionless());
    }

    #[test]
    fn never_prefix_rejects_prefixing() {
        assert!(matches!(
            UnitElement::resolve("m°C"),
            Err(Error::UnknownSymbol(s)) if s == "m°C"
        ));
        assert!(UnitElement::resolve("kha").is_err());
        // but the bare symbols resolve
        assert!(UnitElement::resolve("°C").is_ok());
        assert!(UnitElement::resolve("ha").is_ok());
    }

    #[test]
    fn fullname_resolution() {
        let j = elem("joule");
        assert_eq!((j.base(), j.prefix()), ("J", ""));

        let km = elem("kilometer");
        assert_eq!((km.base(), km.prefix()), ("m", "k"));

        let ug = elem("microgram");
        assert_eq!((ug.base(), ug.prefix()), ("g", "µ"));
    }

    #[test]
    fn unknown_symbols_fail() {
        assert!(UnitElement::resolve("xyz").is_err());
        assert!(UnitElement::resolve("meterk").is_err());
    }

    // ───────────────────────── derived getters ─────────────────────────

    #[test]
    fn getters() {
        let km = elem("km");
        assert_eq!(km.symbol(), "km");
        assert_eq!(km.fullname(), "kilometer");
        assert!(km.is_prefixed());
        assert_eq!(km.dimension(), Dimension::LENGTH);
        assert_relative_eq!(km.prefix_factor(), 1e3);
        assert_relative_eq!(km.base_factor(), 1.0);

        let stripped = km.deprefix();
        assert_eq!(stripped.symbol(), "m");
        assert!(!stripped.is_prefixed());
    }

    #[test]
    fn ordering_is_base_first() {
        let a = elem("km"); // (m, k)
        let b = elem("ms"); // (s, m)
        assert!(a < b);
    }
}
