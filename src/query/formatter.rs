use serde_json::Value;

// Bare strings print without quotes; everything else as pretty JSON
pub fn format_query_result(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        _ => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
    }
}
