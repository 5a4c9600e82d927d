use serde_json::Value;

/// Render a JSON value as a metric-name fragment.
///
/// Numbers use their shortest decimal form, so `50`, `50.0` and `99.9` become
/// `50`, `50` and `99.9`. Strings are used as-is; control characters are dropped.
pub fn label_to_string(value: &Value) -> String {
    let raw = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    };
    sanitize_label(raw)
}

fn sanitize_label(s: String) -> String {
    s.chars().filter(|c| !c.is_control()).collect()
}
