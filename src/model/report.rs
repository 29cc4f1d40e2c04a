use std::fmt;

use crate::astro::Body;

const NUMBER_WIDTH: usize = 11;
const NUMBER_DIGITS: usize = 4;
const LABEL_WIDTH: usize = 12;
const RADIUS_DIGITS: usize = 2;
const EXACT_DIGITS: usize = 800;

/// The final state of a run, printable as a table:
///
/// ```text
/// 2
/// 1.00e+11
///  0.0000e+00  0.0000e+00  0.0000e+00  0.0000e+00  5.9700e+24    earth.gif
///  1.5000e+11  0.0000e+00  0.0000e+00  2.9800e+04  1.9890e+30      sun.gif
/// ```
pub struct Report<'a> {
    pub radius: f64,
    pub bodies: &'a [Body],
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.bodies.len())?;
        writeln!(f, "{}", format_scientific(self.radius, RADIUS_DIGITS))?;
        for body in self.bodies {
            let position = body.position();
            let velocity = body.velocity();
            for value in &[position.x, position.y, velocity.x, velocity.y, body.mass()] {
                write!(
                    f,
                    "{:>width$} ",
                    format_scientific(*value, NUMBER_DIGITS),
                    width = NUMBER_WIDTH
                )?;
            }
            writeln!(f, "{:>width$}", body.name(), width = LABEL_WIDTH)?;
        }
        Ok(())
    }
}

/// Formats `value` in scientific notation with `digits` digits after the
/// decimal point and a signed, two-digit-minimum exponent, e.g. `1.4960e+11`.
/// Rust's own `{:e}` would print `1.496e11`.
///
/// Ties round away from zero, so `1.03125` becomes `1.0313e+00` rather than
/// the `1.0312e0` that `{:.4e}` gives.
pub fn format_scientific(value: f64, digits: usize) -> String {
    // NaN and the infinities have no exponent
    if !value.is_finite() {
        return value.to_string();
    }

    // Every finite f64 has an exact decimal expansion of at most 767
    // significant digits, so this never rounds.
    let exact = format!("{:.*e}", EXACT_DIGITS, value.abs());
    let (mantissa, exponent) = match exact.split_once('e') {
        Some(parts) => parts,
        None => return format!("{:.*e}", digits, value),
    };
    let mut exponent: i32 = match exponent.parse() {
        Ok(exponent) => exponent,
        Err(_) => return format!("{:.*e}", digits, value),
    };

    let mut kept: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    let round_up = kept.get(digits + 1).map_or(false, |&digit| digit >= b'5');
    kept.truncate(digits + 1);
    if round_up && !increment(&mut kept) {
        // 9.99..9 carried all the way over
        kept.insert(0, b'1');
        kept.pop();
        exponent += 1;
    }

    let mut out = String::with_capacity(digits + 8);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.push(char::from(kept[0]));
    if digits > 0 {
        out.push('.');
        out.extend(kept[1..].iter().copied().map(char::from));
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    out.push_str(&format!("e{}{:02}", sign, exponent.abs()));
    out
}

// Adds one in the last place of a string of ASCII digits. Returns false if
// the carry ran off the front.
fn increment(digits: &mut [u8]) -> bool {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return true;
        }
    }
    false
}
