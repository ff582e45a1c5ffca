//! Lenient rendering rules for backend JSON fields.
//!
//! Missing or oddly-typed fields degrade to `N/A`/`unknown`/`0` instead of
//! failing the whole reply; only transport-level failures surface as errors.

use chrono::DateTime;
use serde_json::Value;

/// First maximal run of ASCII digits anywhere in the message, if any.
/// This is how order and cart ids are pulled out of free-form chat text.
pub fn first_digit_run(message: &str) -> Option<String> {
    let start = message.find(|ch: char| ch.is_ascii_digit())?;
    let digits: String =
        message[start..].chars().take_while(|ch| ch.is_ascii_digit()).collect();
    Some(digits)
}

/// Scalar rendering of a JSON value: strings verbatim, numbers and booleans
/// via their canonical text, everything else through the JSON printer.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        other => other.to_string(),
    }
}

/// [`display_value`] with a fallback for absent, null, or empty fields.
pub fn display_or(value: Option<&Value>, fallback: &str) -> String {
    value
        .filter(|v| !v.is_null())
        .map(display_value)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Numeric values render with fixed two-decimal precision; a present but
/// non-numeric value passes through raw; absent/null renders `N/A`.
pub fn fmt_fixed(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(number)) => match number.as_f64() {
            Some(amount) => format!("{amount:.2}"),
            None => number.to_string(),
        },
        Some(Value::Null) | None => "N/A".to_string(),
        Some(other) => display_value(other),
    }
}

/// en-US style currency: `$1,234.56`, same passthrough/absent rules as
/// [`fmt_fixed`].
pub fn fmt_currency(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(number)) => match number.as_f64() {
            Some(amount) => currency(amount),
            None => number.to_string(),
        },
        Some(Value::Null) | None => "N/A".to_string(),
        Some(other) => display_value(other),
    }
}

fn currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let rendered = format!("{:.2}", amount.abs());
    let (integer_part, fraction_part) = match rendered.split_once('.') {
        Some(parts) => parts,
        None => (rendered.as_str(), "00"),
    };

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (index, digit) in integer_part.chars().enumerate() {
        if index > 0 && (integer_part.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if negative {
        format!("-${grouped}.{fraction_part}")
    } else {
        format!("${grouped}.{fraction_part}")
    }
}

/// RFC 3339 timestamps render as `YYYY-MM-DD HH:MM:SS`; a string the parser
/// does not understand passes through raw; absent/null renders `N/A`.
pub fn fmt_timestamp(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(raw)) => match DateTime::parse_from_rfc3339(raw) {
            Ok(timestamp) => timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            Err(_) => raw.clone(),
        },
        Some(Value::Null) | None => "N/A".to_string(),
        Some(other) => display_value(other),
    }
}

/// Item counts are the sum of per-line `quantity` fields (missing or
/// non-numeric lines count as zero), never the array length. Fractional and
/// negative quantities sum as-is rather than being zeroed.
pub fn sum_quantities(items: &[Value]) -> f64 {
    items
        .iter()
        .map(|item| item.get("quantity").and_then(Value::as_f64).unwrap_or(0.0))
        .sum()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        display_or, first_digit_run, fmt_currency, fmt_fixed, fmt_timestamp, sum_quantities,
    };

    #[test]
    fn digit_run_takes_the_first_maximal_run() {
        assert_eq!(first_digit_run("where is order 1234 or 99?"), Some("1234".to_string()));
        assert_eq!(first_digit_run("cart #7"), Some("7".to_string()));
        assert_eq!(first_digit_run("no numbers here"), None);
        assert_eq!(first_digit_run(""), None);
    }

    #[test]
    fn fixed_formatting_degrades_instead_of_failing() {
        let order = json!({ "total": 12.5, "weird": "abc" });
        assert_eq!(fmt_fixed(order.get("total")), "12.50");
        assert_eq!(fmt_fixed(order.get("weird")), "abc");
        assert_eq!(fmt_fixed(order.get("missing")), "N/A");
        assert_eq!(fmt_fixed(Some(&json!(null))), "N/A");
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(fmt_currency(Some(&json!(20))), "$20.00");
        assert_eq!(fmt_currency(Some(&json!(1234567.891))), "$1,234,567.89");
        assert_eq!(fmt_currency(Some(&json!(-950.5))), "-$950.50");
        assert_eq!(fmt_currency(Some(&json!("free"))), "free");
        assert_eq!(fmt_currency(None), "N/A");
    }

    #[test]
    fn timestamps_render_or_pass_through() {
        assert_eq!(
            fmt_timestamp(Some(&json!("2024-03-01T10:30:00Z"))),
            "2024-03-01 10:30:00"
        );
        assert_eq!(fmt_timestamp(Some(&json!("yesterday"))), "yesterday");
        assert_eq!(fmt_timestamp(None), "N/A");
    }

    #[test]
    fn quantities_sum_with_missing_lines_as_zero() {
        let items = vec![
            json!({ "quantity": 2 }),
            json!({ "name": "no quantity" }),
            json!({ "quantity": 3 }),
        ];
        assert_eq!(sum_quantities(&items), 5.0);
        assert_eq!(format!("{}", sum_quantities(&items)), "5");
        assert_eq!(sum_quantities(&[]), 0.0);
    }

    #[test]
    fn fractional_and_negative_quantities_sum_instead_of_zeroing() {
        let items = vec![
            json!({ "quantity": 1.5 }),
            json!({ "quantity": 2 }),
            json!({ "quantity": -1 }),
            json!({ "quantity": "two" }),
        ];
        assert_eq!(sum_quantities(&items), 2.5);
        assert_eq!(format!("{}", sum_quantities(&items)), "2.5");
    }

    #[test]
    fn display_or_skips_null_and_empty() {
        let item = json!({ "name": "", "id": 4, "gone": null });
        assert_eq!(display_or(item.get("name"), "N/A"), "N/A");
        assert_eq!(display_or(item.get("id"), "N/A"), "4");
        assert_eq!(display_or(item.get("gone"), "N/A"), "N/A");
        assert_eq!(display_or(item.get("missing"), "N/A"), "N/A");
    }
}
