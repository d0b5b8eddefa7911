//! Property-based tests for the float formatter and the table encoder.
//!
//! The formatter is checked against the standard library: parsing must give
//! back the same bits, and the significant digits must match the standard
//! library's shortest representation exactly.

use delimwrite::dtoa::Buffer;
use delimwrite::{table, to_string, to_string_with_options, DelimOptions};
use proptest::prelude::*;

/// Significant digits of a decimal text, without sign, point, exponent,
/// leading or trailing zeros.
fn significant_digits(text: &str) -> String {
    let mantissa = text.split(['e', 'E']).next().unwrap_or("");
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    digits.trim_matches('0').to_string()
}

fn check_float(v: f64) -> Result<(), TestCaseError> {
    let mut buffer = Buffer::new();
    let text = buffer.format(v).to_string();

    let parsed: f64 = text
        .parse()
        .map_err(|e| TestCaseError::fail(format!("{} did not parse: {}", text, e)))?;
    prop_assert_eq!(parsed.to_bits(), v.to_bits(), "{} -> {}", v, text);

    let shortest = format!("{:e}", v);
    prop_assert_eq!(
        significant_digits(&text),
        significant_digits(&shortest),
        "{} -> {} (std: {})",
        v,
        text,
        shortest
    );

    prop_assert!(!text.starts_with('+'));
    prop_assert!(!text.contains(','));
    Ok(())
}

proptest! {
    #[test]
    fn prop_any_finite_bits(bits in any::<u64>()) {
        let v = f64::from_bits(bits);
        prop_assume!(v.is_finite());
        check_float(v)?;
    }

    #[test]
    fn prop_normal_f64(v in prop::num::f64::NORMAL) {
        check_float(v)?;
    }

    #[test]
    fn prop_subnormal_f64(v in prop::num::f64::SUBNORMAL) {
        check_float(v)?;
    }

    #[test]
    fn prop_short_decimals(mantissa in -1_000_000i64..1_000_000, scale in 0u32..8) {
        let v = mantissa as f64 / 10f64.powi(scale as i32);
        check_float(v)?;
    }

    #[test]
    fn prop_f32_widened(v in prop::num::f32::NORMAL) {
        check_float(f64::from(v))?;
    }

    #[test]
    fn prop_text_field_round_trips(s in "[a-z,\"\n ]{0,12}") {
        let data = table! { "t" => vec![s.clone()] };
        let options = DelimOptions::new().with_header(false);
        let csv = to_string_with_options(&data, &options).unwrap();
        let body = csv.strip_suffix('\n').unwrap();

        let decoded = if body.starts_with('"') && body.len() >= 2 && body.ends_with('"') && s != body {
            body[1..body.len() - 1].replace("\"\"", "\"")
        } else {
            body.to_string()
        };
        prop_assert_eq!(decoded, s);
    }

    #[test]
    fn prop_encoding_is_deterministic(values in prop::collection::vec(proptest::option::of(any::<f64>()), 0..20)) {
        let data = table! { "x" => values };
        prop_assert_eq!(to_string(&data).unwrap(), to_string(&data).unwrap());
    }
}
