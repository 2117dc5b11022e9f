//! Unicode superscript rendering for rational exponents.

use num_rational::Rational32;

const DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

fn push_digits(out: &mut String, mut n: i32) {
    debug_assert!(n >= 0);
    if n == 0 {
        out.push(DIGITS[0]);
        return;
    }
    let mut buf = [0u8; 10];
    let mut len = 0;
    while n > 0 {
        buf[len] = (n % 10) as u8;
        n /= 10;
        len += 1;
    }
    for i in (0..len).rev() {
        out.push(DIGITS[buf[i] as usize]);
    }
}

/// Renders an exponent as a Unicode superscript suffix.
///
/// An exponent of 1 renders as the empty string, negative exponents get a
/// leading `⁻`, and non-integer exponents separate numerator and denominator
/// with `ᐟ` (e.g. `¹ᐟ²`).
pub(crate) fn superscript(e: Rational32) -> String {
    if e == Rational32::from_integer(1) {
        return String::new();
    }
    let mut out = String::new();
    if e < Rational32::from_integer(0) {
        out.push('⁻');
    }
    let numer = e.numer().abs();
    let denom = e.denom().abs();
    push_digits(&mut out, numer);
    if denom != 1 {
        out.push('ᐟ');
        push_digits(&mut out, denom);
    }
    out
}
