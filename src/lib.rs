//! Runtime dimensional analysis: parse unit expressions, convert and
//! simplify them, and propagate measurement uncertainty.
//!
//! # What this crate solves
//!
//! Scientific code receives units as *strings* — config files, CSV headers,
//! user input — and must convert between them without mixing up metres and
//! seconds. `siunit` resolves unit expressions like `"kg.m/s2"` or
//! `"cal/h·m²"` at runtime into a [`Unit`]: an element multiset, a
//! 7-component rational [`Dimension`], and a conversion factor to SI base
//! units. A [`Quantity`] binds a value (optionally with a standard
//! uncertainty) to a unit and offers dimension-checked arithmetic,
//! conversion, and simplification against the standard SI table.
//!
//! # What this crate does not solve
//!
//! - Affine temperature conversion: `°C` and `°F` convert by scale only
//!   (as interval sizes), offsets are out of scope.
//! - Locale-aware formatting or parsing of the numeric values themselves.
//! - Compile-time dimension checking; everything here is runtime by design.
//!
//! # Quick start
//!
//! ```
//! use siunit::{Quantity, Unit};
//!
//! // parse units, convert between them
//! let flux = Quantity::parse(1.0, "cal/h.m2")?;
//! let si = flux.to_symbol("W/m2")?;
//! assert!((si.value() - 4.1868 / 3600.0).abs() < 1e-12);
//!
//! // arithmetic is dimension-checked and self-simplifying
//! let work = Quantity::parse(2.0, "N")? * Quantity::parse(3.0, "m")?;
//! assert_eq!(work.unit().symbol(), "J");
//!
//! // uncertainty propagates in quadrature
//! let a = Quantity::with_uncertainty(10.0, 1.0, Unit::parse("m")?)?;
//! let b = Quantity::with_uncertainty(20.0, 2.0, Unit::parse("m")?)?;
//! let sum = a + b;
//! assert!((sum.uncertainty().unwrap() - 5.0_f64.sqrt()).abs() < 1e-12);
//! # Ok::<(), siunit::Error>(())
//! ```
//!
//! # Expression grammar
//!
//! Tokens are separated by runs of `/`, `.` or `·`; the first `/` flips the
//! sign of every exponent that follows it (`"kg.m/s2"` and `"kg·m/s·s"` are
//! the same unit). Each token is a symbol plus an optional trailing integer
//! exponent. Symbols resolve as an exact unit, a prefixed unit (`kHz`), a
//! fullname (`joule`), or a prefixed fullname (`kilometer`); `u` is accepted
//! for `µ` and `K` for `k`. Superscript exponents, `μ`/`℃`/`℉` and the
//! percent variants are normalized before parsing, and `%`, `‰`, `‱` are
//! valid (dimensionless) expressions on their own.
//!
//! # Feature flags
//!
//! - `serde` — `Serialize`/`Deserialize` for [`Unit`] (as its symbol
//!   string), [`Variable`] and [`Quantity`]. Off by default.
//!
//! # Panics and errors
//!
//! Fallible operations — parsing, checked conversion, `try_add`/`try_sub`,
//! uncertainty validation — return [`Result`]. The arithmetic operators
//! `+`/`-` are sugar over the checked methods and panic on dimension
//! mismatch, as documented on each impl; `*` and `/` never fail.
//! `nthroot(0)` panics.
//!
//! # SemVer policy
//!
//! The registry's unit tables may gain entries in minor releases; symbols
//! are never removed or redefined outside a major release.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compound;
mod dimension;
mod element;
mod error;
mod parse;
mod quantity;
mod registry;
mod superscript;
mod unit;
mod variable;

pub use compound::Compound;
pub use dimension::Dimension;
pub use element::UnitElement;
pub use error::{Error, Result};
pub use quantity::Quantity;
pub use registry::{PrefixEntry, Registry, SpecialEntry, UnitEntry};
pub use unit::Unit;
pub use variable::Variable;
