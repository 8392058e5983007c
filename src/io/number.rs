//! Plain-notation decimal output for ordinates.

use crate::geom::PrecisionModel;

/// Fraction digits needed to print the smallest subnormal double exactly.
pub const MAX_FRACTION_DIGITS: usize = 325;

pub const NAN_TEXT: &str = "NaN";
pub const INFINITY_TEXT: &str = "Inf";
pub const NEG_INFINITY_TEXT: &str = "-Inf";

/// Formats doubles as decimal text that never uses an exponent.
///
/// With the default cap every finite value prints as the shortest string that
/// parses back to the identical double. A smaller cap rounds to that many
/// fraction digits and drops trailing zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdinateFormat {
    max_fraction_digits: usize,
    single_precision: bool,
}

impl Default for OrdinateFormat {
    fn default() -> Self {
        Self { max_fraction_digits: MAX_FRACTION_DIGITS, single_precision: false }
    }
}

impl OrdinateFormat {
    pub fn new(max_fraction_digits: usize) -> Self {
        Self { max_fraction_digits: max_fraction_digits.min(MAX_FRACTION_DIGITS), single_precision: false }
    }

    /// Uncapped formatter printing values that are exact `f32`s with the
    /// shortest text that parses back to the same `f32`.
    pub fn single_precision() -> Self {
        Self { single_precision: true, ..Self::default() }
    }

    /// Formatter matching the resolution of a precision model.
    pub fn for_precision_model(precision_model: &PrecisionModel) -> Self {
        match precision_model {
            PrecisionModel::FloatingSingle => Self::single_precision(),
            model => model.maximum_fraction_digits().map_or_else(Self::default, Self::new),
        }
    }

    #[inline] pub fn max_fraction_digits(&self) -> usize { self.max_fraction_digits }

    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return NAN_TEXT.to_string();
        }
        if value.is_infinite() {
            let text = if value > 0.0 { INFINITY_TEXT } else { NEG_INFINITY_TEXT };
            return text.to_string();
        }

        let single = value as f32;
        let shortest = if self.single_precision && single as f64 == value {
            expand_exponent(ryu::Buffer::new().format_finite(single))
        } else {
            shortest_plain(value)
        };
        if fraction_digits(&shortest) <= self.max_fraction_digits {
            return shortest;
        }
        trim_fraction(format!("{:.*}", self.max_fraction_digits, value))
    }
}

/// Shortest round-trip text for a finite value, exponent expanded.
fn shortest_plain(value: f64) -> String {
    let mut buffer = ryu::Buffer::new();
    let repr = buffer.format_finite(value);
    if repr.parse::<f64>() == Ok(value) {
        return expand_exponent(repr);
    }
    for precision in [15usize, 16, 17] {
        let repr = format!("{:.*e}", precision - 1, value);
        if repr.parse::<f64>() == Ok(value) {
            return expand_exponent(&repr);
        }
    }
    expand_exponent(&format!("{value:e}"))
}

/// Rewrite `[-]d.ddd[e±x]` as plain decimal by moving the point and padding with zeros.
fn expand_exponent(repr: &str) -> String {
    let (negative, unsigned) = match repr.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, repr),
    };
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(i) => (&unsigned[..i], unsigned[i + 1..].parse::<i64>().unwrap_or(0)),
        None => (unsigned, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let all_digits = format!("{int_part}{frac_part}");
    let trimmed_start = all_digits.trim_start_matches('0');
    let mut point = int_part.len() as i64 + exponent - (all_digits.len() - trimmed_start.len()) as i64;
    let digits = trimmed_start.trim_end_matches('0');

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }
    if digits.is_empty() {
        out.push('0');
        return out;
    }

    let len = digits.len() as i64;
    if point <= 0 {
        out.push_str("0.");
        while point < 0 {
            out.push('0');
            point += 1;
        }
        out.push_str(digits);
    } else if point >= len {
        out.push_str(digits);
        for _ in len..point {
            out.push('0');
        }
    } else {
        let split = point as usize;
        out.push_str(&digits[..split]);
        out.push('.');
        out.push_str(&digits[split..]);
    }
    out
}

#[inline]
fn fraction_digits(plain: &str) -> usize {
    plain.split_once('.').map_or(0, |(_, frac)| frac.len())
}

fn trim_fraction(mut text: String) -> String {
    if text.contains('.') {
        let keep = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(keep);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_roundtrips(value: f64) {
        let text = OrdinateFormat::default().format(value);
        assert!(!text.contains(['e', 'E']), "{value:e} formatted with exponent: {text}");
        let back: f64 = text.parse().unwrap();
        assert_eq!(back.to_bits(), value.to_bits(), "{value:e} -> {text}");
    }

    #[test]
    fn special_tokens() {
        let format = OrdinateFormat::default();
        assert_eq!(format.format(f64::NAN), "NaN");
        assert_eq!(format.format(f64::INFINITY), "Inf");
        assert_eq!(format.format(f64::NEG_INFINITY), "-Inf");
    }

    #[test]
    fn plain_values() {
        let format = OrdinateFormat::default();
        assert_eq!(format.format(1.0), "1");
        assert_eq!(format.format(-2.5), "-2.5");
        assert_eq!(format.format(100.0), "100");
        assert_eq!(format.format(0.3), "0.3");
        assert_eq!(format.format(123.456), "123.456");
        assert_eq!(format.format(0.0), "0");
        assert_eq!(format.format(-0.0), "-0");
    }

    #[test]
    fn keeps_all_significant_digits() {
        assert_eq!(OrdinateFormat::default().format(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn expands_exponents() {
        let format = OrdinateFormat::default();
        assert_eq!(format.format(1e21), "1000000000000000000000");
        assert_eq!(format.format(1.5e-7), "0.00000015");
        assert_eq!(format.format(-1.25e-10), "-0.000000000125");
    }

    #[test]
    fn extremes_roundtrip() {
        for value in [
            f64::MAX,
            f64::MIN,
            f64::MIN_POSITIVE,
            f64::EPSILON,
            5e-324,
            -5e-324,
            2.2250738585072009e-308,
            9007199254740993.0,
            1.7976931348623157e308,
        ] {
            assert_roundtrips(value);
        }
    }

    #[test]
    fn random_bit_patterns_roundtrip() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..20_000 {
            let value = f64::from_bits(rng.random::<u64>());
            if value.is_finite() {
                assert_roundtrips(value);
            }
        }
    }

    #[test]
    fn capped_fraction_digits() {
        let format = OrdinateFormat::new(2);
        assert_eq!(format.format(1.23456), "1.23");
        assert_eq!(format.format(1.5), "1.5");
        assert_eq!(format.format(2.0), "2");
        assert_eq!(format.format(1e21), "1000000000000000000000");
        assert_eq!(format.format(0.001), "0");
    }

    #[test]
    fn precision_model_caps() {
        let fixed = OrdinateFormat::for_precision_model(&PrecisionModel::Fixed { scale: 1000.0 });
        assert_eq!(fixed.max_fraction_digits(), 3);
        let floating = OrdinateFormat::for_precision_model(&PrecisionModel::Floating);
        assert_eq!(floating, OrdinateFormat::default());
    }

    #[test]
    fn single_precision_keeps_small_values() {
        let single = OrdinateFormat::for_precision_model(&PrecisionModel::FloatingSingle);
        let tiny = PrecisionModel::FloatingSingle.make_precise(1e-7);
        assert_eq!(single.format(tiny), "0.0000001");
        assert_eq!(single.format(PrecisionModel::FloatingSingle.make_precise(0.1)), "0.1");
        assert_eq!(single.format(1.5e30), "1500000000000000000000000000000");
        // values off the f32 grid print at full double precision
        assert_eq!(single.format(0.1 + 0.2), "0.30000000000000004");
    }
}
