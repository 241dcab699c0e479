use serde_json::Value;

/// Coerce a raw price value into a float.
///
/// The marketplace payload is inconsistent: prices arrive as numbers, as
/// strings ("12,50"), or not at all. Strings are cleaned of currency noise
/// before parsing. Anything unparsable becomes 0.0.
pub fn parse_amount(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .replace(',', ".")
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            cleaned.parse().unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

/// Detect a quantity in free text (e.g. "lot 100 cartes pokemon" -> 100).
///
/// Takes the first run of digits, capped at 5 digits, and only accepts
/// values in [1, 5000]. Returns None when no plausible quantity is found —
/// absence, not zero.
pub fn extract_quantity(text: &str) -> Option<u32> {
    let run: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .take(5)
        .collect();
    if run.is_empty() {
        return None;
    }
    let n: u32 = run.parse().ok()?;
    (1..=5000).contains(&n).then_some(n)
}
