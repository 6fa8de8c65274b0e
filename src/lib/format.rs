//! Text rendering for upstream Garmin Connect JSON payloads.
//!
//! Tool results are human-readable text; the upstream JSON is otherwise
//! opaque to this crate.

use serde_json::Value;

/// Pretty-print a JSON value, falling back to compact form.
pub fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Render a labeled JSON payload, or a "no data" line for empty results.
pub fn render(label: &str, value: &Value) -> String {
    if is_empty(value) {
        return format!("No {} found.", label.to_lowercase());
    }
    format!("{label}:\n{}", pretty(value))
}

/// Read a string field off a JSON object, defaulting to "Unknown".
pub fn str_or_unknown<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("Unknown")
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn render_reports_missing_data_for_empty_payloads() {
        assert_eq!(render("Sleep data", &Value::Null), "No sleep data found.");
        assert_eq!(render("Devices", &json!([])), "No devices found.");
        assert_eq!(render("Gear", &json!({})), "No gear found.");
    }

    #[test]
    fn render_labels_populated_payloads() {
        let rendered = render("Workouts", &json!([{"workoutId": 1}]));
        assert!(rendered.starts_with("Workouts:\n"));
        assert!(rendered.contains("workoutId"));
    }

    #[test]
    fn str_or_unknown_defaults_missing_fields() {
        let value = json!({"activityName": "Morning Run"});
        assert_eq!(str_or_unknown(&value, "activityName"), "Morning Run");
        assert_eq!(str_or_unknown(&value, "missing"), "Unknown");
    }
}
