use serde_json::{Map, Value};

/// A borrowed view over one result row, keyed by original (pre-stripped)
/// header names. Formatters only ever `lookup` — a missing key is not an
/// error, it just makes link modifiers pass their value through.
#[derive(Clone, Copy)]
pub struct Row<'a> {
    cells: &'a Map<String, Value>,
}

impl<'a> Row<'a> {
    pub fn new(cells: &'a Map<String, Value>) -> Self {
        Self { cells }
    }

    pub fn lookup(&self, key: &str) -> Option<&'a Value> {
        self.cells.get(key)
    }
}

/// Truthiness of a cell value: null, false, zero, NaN and the empty string
/// are falsy, everything else is truthy.
pub fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a cell value as plain text: strings as-is (unquoted), everything
/// else via its JSON representation.
pub fn display_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerce a cell value to a finite float, if it is one or parses as one.
pub fn as_float(v: &Value) -> Option<f64> {
    let f = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    f.is_finite().then_some(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_missing_key_is_none() {
        let cells = serde_json::from_value(json!({"a": 1})).unwrap();
        let row = Row::new(&cells);
        assert_eq!(row.lookup("a"), Some(&json!(1)));
        assert!(row.lookup("b").is_none());
    }

    #[test]
    fn truthiness_matches_loose_semantics() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&json!(false)));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!("x")));
        assert!(truthy(&json!([])));
    }

    #[test]
    fn float_coercion() {
        assert_eq!(as_float(&json!("42.5")), Some(42.5));
        assert_eq!(as_float(&json!(7)), Some(7.0));
        assert_eq!(as_float(&json!("abc")), None);
        assert_eq!(as_float(&json!(null)), None);
    }
}
