use crate::{interpreter::value::Number, util::num::is_close};

/// Decimal places results are rounded to before display.
pub const DISPLAY_MAX_PRECISION: i32 = 16;
/// Decimal places a result is snapped to when it is that close already.
pub const DISPLAY_ROUND_PRECISION: i32 = 12;

/// Formats an evaluation result for a calculator display.
///
/// Integers print unchanged. Reals are rounded to `max_precision` decimals,
/// then replaced by their `round_precision` rounding when the two agree within
/// a relative `10^-round_precision`, which hides binary noise such as
/// `0.1 + 0.2`. Trailing fractional zeros and a dangling `.` are removed. A
/// non-positive precision skips that step.
///
/// Magnitudes of `1e16` and above, or below `1e-4`, print in exponent form
/// with a signed exponent of at least two digits (`3e+20`, `1.5e-07`).
///
/// # Example
/// ```
/// use calcore::{interpreter::value::Number, util::format::format_number};
///
/// assert_eq!(format_number(Number::Real(0.1 + 0.2), 16, 12), "0.3");
/// assert_eq!(format_number(Number::Real(2.0), 16, 12), "2");
/// assert_eq!(format_number(Number::Integer(-42), 16, 12), "-42");
/// ```
#[must_use]
pub fn format_number(value: Number, max_precision: i32, round_precision: i32) -> String {
    let mut r = match value {
        Number::Integer(n) => return n.to_string(),
        Number::Real(r) => r,
    };

    if max_precision > 0 {
        r = round_to(r, max_precision);
    }

    if round_precision > 0 {
        let rounded = round_to(r, round_precision);
        if is_close(rounded, r, 10f64.powi(-round_precision)) {
            r = rounded;
        }
    }

    signed_exponent(trim_fraction(format!("{r:?}")))
}

/// Formats with the calculator's default precisions.
#[must_use]
pub fn format_for_display(value: Number) -> String {
    format_number(value, DISPLAY_MAX_PRECISION, DISPLAY_ROUND_PRECISION)
}

/// Beyond 2^53 every `f64` is already an integer.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Rounds half-to-even at `digits` decimals; values too large to scale are
/// already coarser than that and are returned unchanged.
fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
        return value;
    }
    let rounded = scaled.round_ties_even() / factor;
    if rounded.is_finite() { rounded } else { value }
}

fn trim_fraction(mut text: String) -> String {
    if text.contains('.') && !text.contains('e') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    text
}

fn signed_exponent(text: String) -> String {
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let (sign, digits) = exponent.strip_prefix('-').map_or(('+', exponent), |d| ('-', d));
    format!("{mantissa}e{sign}{digits:0>2}")
}
