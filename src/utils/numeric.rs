use serde_json::Value;

/// Coerce a JSON value to f64. Numbers pass through, numeric strings are
/// parsed, booleans map to 0/1; anything else (including a missing value)
/// defaults to 0.0.
pub fn safe_f64(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Coerce a JSON value to a non-negative integer count. Fractional values
/// truncate, negatives clamp to 0, and anything unparseable defaults to 0.
pub fn safe_u64(value: Option<&Value>) -> u64 {
    let coerced = safe_f64(value);
    if coerced.is_finite() && coerced > 0.0 {
        coerced as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_safe_f64_variants() {
        assert_eq!(safe_f64(Some(&json!(1.5))), 1.5);
        assert_eq!(safe_f64(Some(&json!("2.25"))), 2.25);
        assert_eq!(safe_f64(Some(&json!(" 3 "))), 3.0);
        assert_eq!(safe_f64(Some(&json!(true))), 1.0);
        assert_eq!(safe_f64(Some(&json!("garbage"))), 0.0);
        assert_eq!(safe_f64(Some(&json!(null))), 0.0);
        assert_eq!(safe_f64(Some(&json!({"nested": 1}))), 0.0);
        assert_eq!(safe_f64(None), 0.0);
    }

    #[test]
    fn test_safe_u64_truncates_and_clamps() {
        assert_eq!(safe_u64(Some(&json!(42))), 42);
        assert_eq!(safe_u64(Some(&json!(42.9))), 42);
        assert_eq!(safe_u64(Some(&json!(-5))), 0);
        assert_eq!(safe_u64(Some(&json!("17"))), 17);
        assert_eq!(safe_u64(None), 0);
    }
}
