//! Amount parsing for expense input.

use serde_json::Value;

use expensehub_core::error::AppError;
use expensehub_core::result::AppResult;

const AMOUNT_REQUIRED: &str = "Description and amount are required";
const AMOUNT_INVALID: &str = "Amount must be a positive number";

/// Parse an amount given as a JSON number or a numeric string.
///
/// The result is always positive and finite.
pub fn parse_amount(value: Option<&Value>) -> AppResult<f64> {
    let amount = match value {
        None | Some(Value::Null) => return Err(AppError::validation(AMOUNT_REQUIRED)),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => {
            return Err(AppError::validation(AMOUNT_REQUIRED));
        }
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match amount {
        Some(a) if a.is_finite() && a > 0.0 => Ok(a),
        _ => Err(AppError::validation(AMOUNT_INVALID)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_amount(Some(&json!(42.5))).unwrap(), 42.5);
        assert_eq!(parse_amount(Some(&json!(3))).unwrap(), 3.0);
        assert_eq!(parse_amount(Some(&json!("42.50"))).unwrap(), 42.5);
        assert_eq!(parse_amount(Some(&json!(" 7 "))).unwrap(), 7.0);
    }

    #[test]
    fn test_rejects_non_positive() {
        for v in [json!(0), json!(-1.5), json!("0"), json!("-3")] {
            let err = parse_amount(Some(&v)).unwrap_err();
            assert_eq!(err.message, AMOUNT_INVALID);
        }
    }

    #[test]
    fn test_rejects_non_numeric() {
        for v in [json!("abc"), json!("NaN"), json!("inf"), json!(true), json!([1])] {
            assert!(parse_amount(Some(&v)).is_err(), "{v} should be rejected");
        }
    }

    #[test]
    fn test_missing_amount() {
        assert_eq!(parse_amount(None).unwrap_err().message, AMOUNT_REQUIRED);
        assert_eq!(parse_amount(Some(&Value::Null)).unwrap_err().message, AMOUNT_REQUIRED);
        assert_eq!(parse_amount(Some(&json!(""))).unwrap_err().message, AMOUNT_REQUIRED);
    }
}
