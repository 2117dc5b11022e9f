//! The global symbol registry: SI prefixes, unit metadata, special
//! dimensionless literals and the standard-unit table.
//!
//! The registry is built once, on first use, behind a [`Lazy`] global and is
//! immutable afterwards. All resolver lookups are plain reads against that
//! shared instance.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::dimension::Dimension;

// ───────────────────────── physical constants ─────────────────────────
// Values backing the conversion factors below (all factors map one unit of
// the entry to SI base units).

const PI: f64 = core::f64::consts::PI;
const DEGREE: f64 = PI / 180.0;
const ARCMIN: f64 = DEGREE / 60.0;
const ARCSEC: f64 = ARCMIN / 60.0;

const SPEED_OF_LIGHT: f64 = 299_792_458.0;
const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;
const EV: f64 = ELEMENTARY_CHARGE;
const EV_PER_C: f64 = EV / SPEED_OF_LIGHT;
const EV_PER_C2: f64 = EV_PER_C / SPEED_OF_LIGHT;

const ASTRONOMICAL_UNIT: f64 = 149_597_870_700.0;
const PARSEC: f64 = ASTRONOMICAL_UNIT / ARCSEC;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const SIMPLE_YEAR: f64 = 365.0 * DAY;
const JULIAN_YEAR: f64 = 365.25 * DAY;
const LIGHT_YEAR: f64 = SPEED_OF_LIGHT * JULIAN_YEAR;

const DALTON: f64 = 1.660_539_068_92e-27;
const STANDARD_GRAVITY: f64 = 9.80665;

const STD_ATMOSPHERE: f64 = 101_325.0;
const STD_STATE_PRESSURE: f64 = 1e5;
const MM_HG: f64 = STD_ATMOSPHERE / 760.0;

// IT calorie. TNT equivalents below use the conventional 4184 J/g, which is
// a separate definition, not a multiple of this one.
const CALORIE: f64 = 4.1868;
const TNT_PER_GRAM: f64 = 4_184.0;

// ───────────────────────── static tables ─────────────────────────

/// `(symbol, fullname, factor)`. The empty prefix closes the table so a
/// prefixless element resolves through the same lookup path.
const PREFIXES: &[(&str, &str, f64)] = &[
    ("Q", "quetta", 1e30),
    ("R", "ronna", 1e27),
    ("Y", "yotta", 1e24),
    ("Z", "zetta", 1e21),
    ("E", "exa", 1e18),
    ("P", "peta", 1e15),
    ("T", "tera", 1e12),
    ("G", "giga", 1e9),
    ("M", "mega", 1e6),
    ("k", "kilo", 1e3),
    ("h", "hecto", 1e2),
    ("da", "deka", 1e1),
    ("d", "deci", 1e-1),
    ("c", "centi", 1e-2),
    ("m", "milli", 1e-3),
    ("µ", "micro", 1e-6),
    ("n", "nano", 1e-9),
    ("p", "pico", 1e-12),
    ("f", "femto", 1e-15),
    ("a", "atto", 1e-18),
    ("z", "zepto", 1e-21),
    ("y", "yocto", 1e-24),
    ("r", "ronto", 1e-27),
    ("q", "quecto", 1e-30),
    ("", "", 1.0),
];

/// `(symbol, fullname, factor, dimension, never_prefix)`.
const UNITS: &[(&str, &str, f64, Dimension, bool)] = &[
    // dimensionless
    ("", "", 1.0, Dimension::DIMENSIONLESS, false),
    ("rad", "radian", 1.0, Dimension::DIMENSIONLESS, false),
    ("sr", "steradian", 1.0, Dimension::DIMENSIONLESS, false),
    ("°", "degree", DEGREE, Dimension::DIMENSIONLESS, true),
    ("′", "arcminute", ARCMIN, Dimension::DIMENSIONLESS, true),
    ("″", "arcsecond", ARCSEC, Dimension::DIMENSIONLESS, true),
    // length
    ("m", "meter", 1.0, Dimension::LENGTH, false),
    ("Å", "angstrom", 1e-10, Dimension::LENGTH, false),
    ("au", "astronomical-unit", ASTRONOMICAL_UNIT, Dimension::LENGTH, false),
    ("pc", "parsec", PARSEC, Dimension::LENGTH, false),
    ("ly", "light-year", LIGHT_YEAR, Dimension::LENGTH, false),
    // mass
    ("g", "gram", 1e-3, Dimension::MASS, false),
    ("t", "ton", 1e3, Dimension::MASS, false),
    ("u", "atomic-mass-unit", DALTON, Dimension::MASS, false),
    ("Da", "dalton", DALTON, Dimension::MASS, false),
    ("eVpcc", "electronvolt/c²", EV_PER_C2, Dimension::MASS, false),
    // time
    ("s", "second", 1.0, Dimension::TIME, false),
    ("min", "minute", MINUTE, Dimension::TIME, false),
    ("h", "hour", HOUR, Dimension::TIME, false),
    ("d", "day", DAY, Dimension::TIME, false),
    ("yr", "year", SIMPLE_YEAR, Dimension::TIME, false),
    ("a", "Julian-year", JULIAN_YEAR, Dimension::TIME, false),
    // electric current
    ("A", "ampere", 1.0, Dimension::ELECTRIC_CURRENT, false),
    // temperature
    ("K", "kelvin", 1.0, Dimension::TEMPERATURE, false),
    ("°C", "degree-Celsius", 1.0, Dimension::TEMPERATURE, true),
    ("°F", "degree-Fahrenheit", 5.0 / 9.0, Dimension::TEMPERATURE, true),
    ("°R", "degree-Rankine", 5.0 / 9.0, Dimension::TEMPERATURE, true),
    // amount of substance
    ("mol", "mole", 1.0, Dimension::AMOUNT_OF_SUBSTANCE, false),
    // luminous intensity
    ("cd", "candela", 1.0, Dimension::LUMINOUS_INTENSITY, false),
    ("lm", "lumen", 1.0, Dimension::LUMINOUS_INTENSITY, false),
    // area
    ("b", "barn", 1e-28, Dimension::AREA, false),
    ("ha", "hectare", 1e4, Dimension::AREA, true),
    // volume
    ("L", "liter", 1e-3, Dimension::VOLUME, false),
    // frequency / activity
    ("Hz", "hertz", 1.0, Dimension::FREQUENCY, false),
    ("Bq", "becquerel", 1.0, Dimension::FREQUENCY, false),
    ("Ci", "curie", 3.7e10, Dimension::FREQUENCY, false),
    // velocity
    ("c", "speed-of-light", SPEED_OF_LIGHT, Dimension::VELOCITY, true),
    // acceleration
    ("gal", "Gal", 0.01, Dimension::ACCELERATION, false),
    // momentum
    ("eVpc", "electronvolt/c", EV_PER_C, Dimension::MOMENTUM, false),
    // force
    ("N", "newton", 1.0, Dimension::FORCE, false),
    ("gf", "gram-force", STANDARD_GRAVITY * 1e-3, Dimension::FORCE, false),
    // pressure
    ("Pa", "pascal", 1.0, Dimension::PRESSURE, false),
    ("bar", "bar", STD_STATE_PRESSURE, Dimension::PRESSURE, false),
    ("atm", "standard-atmosphere", STD_ATMOSPHERE, Dimension::PRESSURE, false),
    ("mHg", "meter-of-mercury", MM_HG * 1e3, Dimension::PRESSURE, false),
    ("Torr", "torr", MM_HG, Dimension::PRESSURE, false),
    // energy
    ("J", "joule", 1.0, Dimension::ENERGY, false),
    ("Wh", "watthour", HOUR, Dimension::ENERGY, false),
    ("eV", "electronvolt", EV, Dimension::ENERGY, false),
    ("cal", "calorie", CALORIE, Dimension::ENERGY, false),
    ("g-TNT", "gram-of-TNT", TNT_PER_GRAM, Dimension::ENERGY, false),
    ("t-TNT", "ton-of-TNT", TNT_PER_GRAM * 1e6, Dimension::ENERGY, false),
    // power
    ("W", "watt", 1.0, Dimension::POWER, false),
    // electromagnetism
    ("C", "coulomb", 1.0, Dimension::CHARGE, false),
    ("V", "volt", 1.0, Dimension::VOLTAGE, false),
    ("F", "farad", 1.0, Dimension::CAPACITANCE, false),
    ("Ω", "ohm", 1.0, Dimension::RESISTANCE, false),
    ("S", "siemens", 1.0, Dimension::CONDUCTANCE, false),
    ("Wb", "weber", 1.0, Dimension::MAGNETIC_FLUX, false),
    ("T", "tesla", 1.0, Dimension::MAGNETIC_INDUCTION, false),
    ("H", "henry", 1.0, Dimension::INDUCTANCE, false),
    // photometry
    ("lx", "lux", 1.0, Dimension::ILLUMINANCE, false),
    // radiation
    ("Gy", "gray", 1.0, Dimension::KERMA, false),
    ("Sv", "sievert", 1.0, Dimension::KERMA, false),
    ("R", "roentgen", 2.58e-4, Dimension::EXPOSURE, false),
    // catalytic activity
    ("kat", "katal", 1.0, Dimension::CATALYTIC_ACTIVITY, false),
];

/// Dimensionless literals resolvable only as a whole expression, never as a
/// token inside a compound one: `(symbol, fullname, factor)`.
const SPECIAL_DIMENSIONLESS: &[(&str, &str, f64)] = &[
    ("", "", 1.0),
    ("%", "percent", 1e-2),
    ("‰", "per-mille", 1e-3),
    ("‱", "per-myriad", 1e-4),
];

/// Preferred symbol per regular dimension, probed in this order by
/// `Unit::simplify_with_factor`. Dimensions with several everyday units
/// (area, velocity, ...) are deliberately absent.
const STANDARD_UNITS: &[(Dimension, &str)] = &[
    (Dimension::TIME, "s"),
    (Dimension::LENGTH, "m"),
    (Dimension::MASS, "kg"),
    (Dimension::ELECTRIC_CURRENT, "A"),
    (Dimension::TEMPERATURE, "K"),
    (Dimension::AMOUNT_OF_SUBSTANCE, "mol"),
    (Dimension::LUMINOUS_INTENSITY, "cd"),
    (Dimension::FREQUENCY, "Hz"),
    (Dimension::FORCE, "N"),
    (Dimension::PRESSURE, "Pa"),
    (Dimension::ENERGY, "J"),
    (Dimension::POWER, "W"),
    (Dimension::CHARGE, "C"),
    (Dimension::VOLTAGE, "V"),
    (Dimension::CAPACITANCE, "F"),
    (Dimension::RESISTANCE, "Ω"),
    (Dimension::CONDUCTANCE, "S"),
    (Dimension::MAGNETIC_FLUX, "Wb"),
    (Dimension::MAGNETIC_INDUCTION, "T"),
    (Dimension::INDUCTANCE, "H"),
    (Dimension::ILLUMINANCE, "lx"),
    (Dimension::KERMA, "Gy"),
    (Dimension::CATALYTIC_ACTIVITY, "kat"),
];

/// SI base unit symbols in `(T, L, M, I, H, N, J)` component order.
pub(crate) const BASE_SI_UNITS: [&str; 7] = ["s", "m", "kg", "A", "K", "mol", "cd"];

// ───────────────────────── registry ─────────────────────────

/// Metadata for one SI prefix.
#[derive(Debug, Clone, Copy)]
pub struct PrefixEntry {
    /// Spelled-out name (`"kilo"`).
    pub fullname: &'static str,
    /// Decimal multiplier (`1e3`).
    pub factor: f64,
}

/// Metadata for one registered unit symbol.
#[derive(Debug, Clone, Copy)]
pub struct UnitEntry {
    /// Spelled-out name (`"joule"`).
    pub fullname: &'static str,
    /// Conversion factor to SI base units.
    pub factor: f64,
    /// Physical dimension.
    pub dimension: Dimension,
    /// Entries that reject prefixing (`°C`, `ha`, `c`, ...).
    pub never_prefix: bool,
}

/// Metadata for a special dimensionless literal (`%`, `‰`, `‱`, `""`).
#[derive(Debug, Clone, Copy)]
pub struct SpecialEntry {
    /// Spelled-out name (`"percent"`).
    pub fullname: &'static str,
    /// Conversion factor to the plain number 1.
    pub factor: f64,
}

/// Immutable lookup tables for symbol resolution.
///
/// Obtain the shared instance with [`Registry::global`]; it is constructed
/// exactly once and never mutated, so lookups are safe from any thread.
#[derive(Debug)]
pub struct Registry {
    prefixes: HashMap<&'static str, PrefixEntry>,
    prefixes_by_fullname: HashMap<&'static str, &'static str>,
    units: HashMap<&'static str, UnitEntry>,
    units_by_fullname: HashMap<&'static str, &'static str>,
    specials: HashMap<&'static str, SpecialEntry>,
    prefix_max_chars: usize,
    prefix_fullname_min_chars: usize,
    prefix_fullname_max_chars: usize,
}

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::build);

impl Registry {
    fn build() -> Self {
        let mut prefixes = HashMap::new();
        let mut prefixes_by_fullname = HashMap::new();
        let mut prefix_max_chars = 0;
        let mut prefix_fullname_min_chars = usize::MAX;
        let mut prefix_fullname_max_chars = 0;
        for &(symbol, fullname, factor) in PREFIXES {
            prefixes.insert(symbol, PrefixEntry { fullname, factor });
            prefix_max_chars = prefix_max_chars.max(symbol.chars().count());
            if !fullname.is_empty() {
                prefixes_by_fullname.insert(fullname, symbol);
                let chars = fullname.chars().count();
                prefix_fullname_min_chars = prefix_fullname_min_chars.min(chars);
                prefix_fullname_max_chars = prefix_fullname_max_chars.max(chars);
            }
        }

        let mut units = HashMap::new();
        let mut units_by_fullname = HashMap::new();
        for &(symbol, fullname, factor, dimension, never_prefix) in UNITS {
            units.insert(
                symbol,
                UnitEntry {
                    fullname,
                    factor,
                    dimension,
                    never_prefix,
                },
            );
            if !fullname.is_empty() {
                units_by_fullname.insert(fullname, symbol);
            }
        }

        let mut specials = HashMap::new();
        for &(symbol, fullname, factor) in SPECIAL_DIMENSIONLESS {
            specials.insert(symbol, SpecialEntry { fullname, factor });
        }

        log::debug!(
            "unit registry initialized: {} units, {} prefixes, {} standard dimensions",
            units.len(),
            prefixes.len(),
            STANDARD_UNITS.len()
        );

        Self {
            prefixes,
            prefixes_by_fullname,
            units,
            units_by_fullname,
            specials,
            prefix_max_chars,
            prefix_fullname_min_chars,
            prefix_fullname_max_chars,
        }
    }

    /// The shared registry, built on first access.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Looks up a unit by its exact symbol.
    pub fn lookup_unit(&self, symbol: &str) -> Option<&UnitEntry> {
        self.units.get(symbol)
    }

    /// Looks up a prefix by its exact symbol.
    pub fn lookup_prefix(&self, symbol: &str) -> Option<&PrefixEntry> {
        self.prefixes.get(symbol)
    }

    /// Maps a unit fullname (`"joule"`) back to its symbol (`"J"`).
    pub fn lookup_unit_by_fullname(&self, fullname: &str) -> Option<&'static str> {
        self.units_by_fullname.get(fullname).copied()
    }

    /// Maps a prefix fullname (`"kilo"`) back to its symbol (`"k"`).
    pub fn lookup_prefix_by_fullname(&self, fullname: &str) -> Option<&'static str> {
        self.prefixes_by_fullname.get(fullname).copied()
    }

    /// Looks up a special dimensionless literal (`""`, `%`, `‰`, `‱`).
    pub fn lookup_special(&self, symbol: &str) -> Option<&SpecialEntry> {
        self.specials.get(symbol)
    }

    /// The preferred symbol for a dimension, if the dimension is regular.
    pub fn standard_unit_for_dimension(&self, dimension: &Dimension) -> Option<&'static str> {
        STANDARD_UNITS
            .iter()
            .find(|(d, _)| d == dimension)
            .map(|&(_, symbol)| symbol)
    }

    /// The standard-unit table in declaration order.
    pub fn standard_units(&self) -> &'static [(Dimension, &'static str)] {
        STANDARD_UNITS
    }

    /// Longest prefix symbol, in chars.
    pub(crate) fn prefix_max_chars(&self) -> usize {
        self.prefix_max_chars
    }

    /// Char-length bounds of non-empty prefix fullnames.
    pub(crate) fn prefix_fullname_char_bounds(&self) -> (usize, usize) {
        (
            self.prefix_fullname_min_chars,
            self.prefix_fullname_max_chars,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn global_is_shared() {
        let a = Registry::global() as *const Registry;
        let b = Registry::global() as *const Registry;
        assert_eq!(a, b);
    }

    #[test]
    fn prefix_lookups() {
        let reg = Registry::global();
        assert_relative_eq!(reg.lookup_prefix("k").unwrap().factor, 1e3);
        assert_relative_eq!(reg.lookup_prefix("da").unwrap().factor, 1e1);
        assert_relative_eq!(reg.lookup_prefix("µ").unwrap().factor, 1e-6);
        assert_relative_eq!(reg.lookup_prefix("").unwrap().factor, 1.0);
        assert!(reg.lookup_prefix("x").is_none());
        assert_eq!(reg.lookup_prefix_by_fullname("quetta"), Some("Q"));
    }

    #[test]
    fn unit_lookups() {
        let reg = Registry::global();
        let joule = reg.lookup_unit("J").unwrap();
        assert_eq!(joule.dimension, Dimension::ENERGY);
        assert_relative_eq!(joule.factor, 1.0);

        let hour = reg.lookup_unit("h").unwrap();
        assert_eq!(hour.dimension, Dimension::TIME);
        assert_relative_eq!(hour.factor, 3600.0);

        assert_eq!(reg.lookup_unit_by_fullname("calorie"), Some("cal"));
        assert!(reg.lookup_unit("X").is_none());
    }

    #[test]
    fn never_prefix_flags() {
        let reg = Registry::global();
        assert!(reg.lookup_unit("°C").unwrap().never_prefix);
        assert!(reg.lookup_unit("ha").unwrap().never_prefix);
        assert!(reg.lookup_unit("c").unwrap().never_prefix);
        assert!(!reg.lookup_unit("m").unwrap().never_prefix);
    }

    #[test]
    fn special_dimensionless_literals() {
        let reg = Registry::global();
        assert_relative_eq!(reg.lookup_special("%").unwrap().factor, 1e-2);
        assert_relative_eq!(reg.lookup_special("‰").unwrap().factor, 1e-3);
        assert_relative_eq!(reg.lookup_special("‱").unwrap().factor, 1e-4);
        assert_relative_eq!(reg.lookup_special("").unwrap().factor, 1.0);
        assert!(reg.lookup_special("percent").is_none());
    }

    #[test]
    fn standard_unit_table() {
        let reg = Registry::global();
        assert_eq!(
            reg.standard_unit_for_dimension(&Dimension::ENERGY),
            Some("J")
        );
        assert_eq!(reg.standard_unit_for_dimension(&Dimension::MASS), Some("kg"));
        // irregular dimensions have no standard unit
        assert_eq!(reg.standard_unit_for_dimension(&Dimension::AREA), None);
        assert_eq!(reg.standard_unit_for_dimension(&Dimension::VELOCITY), None);
    }

    #[test]
    fn char_bounds() {
        let reg = Registry::global();
        assert_eq!(reg.prefix_max_chars(), 2); // "da"
        assert_eq!(reg.prefix_fullname_char_bounds(), (3, 6)); // "exa" / "quetta"
    }

    #[test]
    fn derived_constants() {
        let reg = Registry::global();
        // 1 cal = 4.1868 J (IT calorie)
        assert_relative_eq!(reg.lookup_unit("cal").unwrap().factor, 4.1868);
        // 1 Torr = 101325/760 Pa
        assert_relative_eq!(
            reg.lookup_unit("Torr").unwrap().factor,
            101_325.0 / 760.0
        );
        // 1 pc = au / arcsecond
        assert_relative_eq!(
            reg.lookup_unit("pc").unwrap().factor,
            3.085_677_581_491e16,
            max_relative = 1e-12
        );
    }
}
