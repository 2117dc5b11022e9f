//! Unit-expression parsing: normalization, tokenization and rendering.
//!
//! Grammar: an expression is a sequence of tokens separated by runs of `/`,
//! `.` or `·`. The first `/` flips the sign of every exponent that follows
//! it, wherever later separators sit. A token is a symbol followed by an
//! optional exponent run (`[0-9+-]+`, default 1).

use num_rational::Rational32;

use crate::compound::Compound;
use crate::dimension::Dimension;
use crate::element::UnitElement;
use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::superscript::superscript;

fn is_separator(c: char) -> bool {
    matches!(c, '/' | '.' | '·')
}

/// Rewrites lexical variants to canonical form: Greek mu to micro sign,
/// single-char degree units to their two-char spellings, percent variants,
/// superscript exponents to ASCII, and the `eV/c`-family composites to
/// their internal one-token spellings.
pub(crate) fn normalize(symbol: &str) -> String {
    let rewritten;
    let symbol = if symbol.contains("eV/c") {
        rewritten = symbol
            .replace("eV/c²", "eVpcc")
            .replace("eV/c2", "eVpcc")
            .replace("eV/c", "eVpc");
        rewritten.as_str()
    } else {
        symbol
    };
    let mut out = String::with_capacity(symbol.len());
    for c in symbol.chars() {
        match c {
            'μ' => out.push('µ'),
            '℃' => out.push_str("°C"),
            '℉' => out.push_str("°F"),
            '٪' | '⁒' => out.push('%'),
            '⁻' => out.push('-'),
            '⁰' => out.push('0'),
            '¹' => out.push('1'),
            '²' => out.push('2'),
            '³' => out.push('3'),
            '⁴' => out.push('4'),
            '⁵' => out.push('5'),
            '⁶' => out.push('6'),
            '⁷' => out.push('7'),
            '⁸' => out.push('8'),
            '⁹' => out.push('9'),
            _ => out.push(c),
        }
    }
    out
}

/// Splits a token into its symbol part and optional trailing exponent run.
fn split_exponent(token: &str) -> (&str, Option<&str>) {
    let tail_start = token
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '+' || *c == '-')
        .last()
        .map(|(i, _)| i);
    match tail_start {
        Some(i) => (&token[..i], Some(&token[i..])),
        None => (token, None),
    }
}

/// Resolves a full unit expression to `(elements, dimension, factor)`.
///
/// Special dimensionless literals and exact unit-table symbols short-circuit
/// before tokenization; both keep their single element even though the
/// special literals (and e.g. `°`, `rad`) are dimensionless. In the general
/// path an all-zero aggregate dimension clears the element set.
pub(crate) fn resolve(symbol: &str) -> Result<(Compound, Dimension, f64)> {
    let reg = Registry::global();
    let symbol = normalize(symbol);

    if let Some(special) = reg.lookup_special(&symbol) {
        let mut elements = Compound::new();
        if !symbol.is_empty() {
            elements.insert(
                UnitElement::new(symbol.as_str(), ""),
                Rational32::from_integer(1),
            );
        }
        return Ok((elements, Dimension::DIMENSIONLESS, special.factor));
    }
    if let Some(entry) = reg.lookup_unit(&symbol) {
        let mut elements = Compound::new();
        elements.insert(
            UnitElement::new(symbol.as_str(), ""),
            Rational32::from_integer(1),
        );
        return Ok((elements, entry.dimension, entry.factor));
    }

    // tokenize, remembering which separator run carries the first '/'
    let mut tokens: Vec<&str> = Vec::new();
    let mut flip_after: Option<usize> = None;
    let mut token_start: Option<usize> = None;
    let mut run_count = 0usize;
    let mut in_run = false;
    let mut run_has_slash = false;
    for (i, c) in symbol.char_indices() {
        if is_separator(c) {
            if let Some(start) = token_start.take() {
                tokens.push(&symbol[start..i]);
            }
            if !in_run {
                in_run = true;
                run_has_slash = false;
            }
            run_has_slash |= c == '/';
        } else {
            if in_run {
                if run_has_slash && flip_after.is_none() {
                    flip_after = Some(run_count);
                }
                run_count += 1;
                in_run = false;
            }
            if token_start.is_none() {
                token_start = Some(i);
            }
        }
    }
    if let Some(start) = token_start {
        tokens.push(&symbol[start..]);
    }

    let mut elements = Compound::new();
    let mut dimension = Dimension::DIMENSIONLESS;
    let mut factor = 1.0_f64;

    for (index, token) in tokens.iter().enumerate() {
        let (sym, exponent) = split_exponent(token);
        let sym = sym.trim_matches(|c: char| c.is_ascii_digit() || c == ' ' || c == '+' || c == '-');
        if sym.is_empty() {
            return Err(Error::UnknownSymbol((*token).to_owned()));
        }
        let mut exponent: i32 = match exponent {
            Some(run) => run
                .parse()
                .map_err(|_| Error::UnknownSymbol((*token).to_owned()))?,
            None => 1,
        };
        if flip_after.is_some_and(|i| index > i) {
            exponent = -exponent;
        }
        let element = UnitElement::resolve_in(sym, reg)?;
        dimension = dimension * element.dimension().powi(exponent);
        factor *= element.factor().powi(exponent);
        elements.add_exponent(element, Rational32::from_integer(exponent));
    }

    if dimension.is_dimensionless() {
        elements.clear();
    }
    log::trace!(
        "resolved '{symbol}': {} elements, dimension {dimension}, factor {factor}",
        elements.len()
    );
    Ok((elements, dimension, factor))
}

/// Renders positives `·`-joined, then `/` and the negated negatives, and
/// restores the `eV/c` composite spellings.
pub(crate) fn combine(elements: &Compound) -> String {
    let pos: Vec<String> = elements
        .pos_items()
        .map(|(u, e)| format!("{}{}", u.symbol(), superscript(*e)))
        .collect();
    let neg: Vec<String> = elements
        .neg_items()
        .map(|(u, e)| format!("{}{}", u.symbol(), superscript(-e)))
        .collect();
    let mut out = pos.join("·");
    if !neg.is_empty() {
        out.push('/');
        out.push_str(&neg.join("·"));
    }
    out.replace("eVpcc", "eV/c²").replace("eVpc", "eV/c")
}

/// Like [`combine`] but over spelled-out element names.
pub(crate) fn combine_fullname(elements: &Compound) -> String {
    let pos: Vec<String> = elements
        .pos_items()
        .map(|(u, e)| format!("{}{}", u.fullname(), superscript(*e)))
        .collect();
    let neg: Vec<String> = elements
        .neg_items()
        .map(|(u, e)| format!("{}{}", u.fullname(), superscript(-e)))
        .collect();
    let mut out = pos.join("·");
    if !neg.is_empty() {
        out.push('/');
        out.push_str(&neg.join("·"));
    }
    out
}
