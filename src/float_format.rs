//! Format floats as JSON numbers (zmij may render `4e-6`, we always keep a fractional part).

use std::fmt::Write;
use zmij::Float;
use num_traits::float::FloatCore;
use crate::ser;

/// Format as float string, make changes to be sure the result is a valid JSON number.
/// NaN and infinities have no JSON spelling and are written as `null`.
pub(crate) fn write_float_string<F: Float + FloatCore, W: Write>(target: &mut W, f: F) -> ser::Result<()> {
    if !f.is_finite() {
        target.write_str("null")?;
        return Ok(());
    }
    let mut buf = zmij::Buffer::new();
    // Non-finite values returned above
    let s = buf.format_finite(f);
    if !s.as_bytes().contains(&b'.') {
        if let Some(exp_pos) = s.find('e').or_else(|| s.find('E')) {
            // Exponent without a fraction: put .0 in front of the e
            // "4e-6" -> "4.0e-6"
            target.write_str(&s[..exp_pos])?;
            target.write_str(".0")?;
            target.write_str(&s[exp_pos..])?;
        } else {
            // Plain integer digits: "3" -> "3.0"
            target.write_str(s)?;
            target.write_str(".0")?;
        }
    } else {
        // Already has a fraction
        target.write_str(s)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_float_string;

    fn render(f: f64) -> String {
        let mut s = String::new();
        write_float_string(&mut s, f).unwrap();
        s
    }

    #[test]
    fn whole_numbers_keep_fraction() {
        assert_eq!(render(3.0), "3.0");
        assert_eq!(render(-2.0), "-2.0");
    }

    #[test]
    fn fractions_round_trip() {
        assert_eq!(render(3.5), "3.5");
        assert_eq!(render(0.1).parse::<f64>().unwrap(), 0.1);
    }

    #[test]
    fn exponent_gains_fraction() {
        let s = render(4e-16);
        assert!(s.contains('.'), "{s}");
        assert_eq!(s.parse::<f64>().unwrap(), 4e-16);
    }

    #[test]
    fn non_finite_is_null() {
        assert_eq!(render(f64::NAN), "null");
        assert_eq!(render(f64::INFINITY), "null");
        assert_eq!(render(f64::NEG_INFINITY), "null");
    }
}
