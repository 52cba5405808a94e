use serde_json::Value;

use crate::error::{Result, TrainingError};
use crate::parser::patterns;

/// Rewrite a chart array literal into strict JSON text.
///
/// Quotes bare keys, turns single quotes into double quotes and drops
/// trailing commas, in that order. Assumes keys are plain identifiers and
/// that string values hold no stray quotes.
pub fn normalize_literal(literal: &str) -> String {
    let quoted = patterns::UNQUOTED_KEY.replace_all(literal, r#"${1}"${2}":"#);
    let double_quoted = quoted.replace('\'', "\"");
    strip_trailing_commas(&double_quoted)
}

fn strip_trailing_commas(s: &str) -> String {
    patterns::TRAILING_COMMA.replace_all(s, "${1}").into_owned()
}

/// Normalize and parse a chart array literal.
///
/// A first parse failure is retried once after stripping trailing commas
/// again; a second failure is returned as `TrainingError::Parse`.
pub fn parse_literal(literal: &str) -> Result<Value> {
    let json = normalize_literal(literal);
    match serde_json::from_str(&json) {
        Ok(value) => Ok(value),
        Err(first) => {
            log::debug!("Literal parse failed ({}), retrying after comma cleanup", first);
            serde_json::from_str(&strip_trailing_commas(&json)).map_err(|e| {
                TrainingError::Parse(format!("chart literal is not valid after normalization: {}", e))
            })
        }
    }
}

/// Parse a literal that must be an array, returning its elements.
pub fn parse_array_literal(literal: &str) -> Result<Vec<Value>> {
    match parse_literal(literal)? {
        Value::Array(items) => Ok(items),
        other => Err(TrainingError::Parse(format!(
            "expected an array literal, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quotes_bare_keys() {
        assert_eq!(normalize_literal("[{data: [1], hidden: false}]"), r#"[{"data": [1], "hidden": false}]"#);
    }

    #[test]
    fn test_single_to_double_quotes() {
        assert_eq!(normalize_literal("['01.01', '02.01']"), r#"["01.01", "02.01"]"#);
    }

    #[test]
    fn test_drops_trailing_commas() {
        assert_eq!(normalize_literal("[1, 2, ]"), "[1, 2]");
        assert_eq!(normalize_literal("[{a: 1,\n}]"), r#"[{"a": 1}]"#);
    }

    #[test]
    fn test_parse_chart_dialect() {
        let literal = "[{label:'Hitrost', data:[10,12,], hidden: false, borderWidth: 2,},]";
        let value = parse_literal(literal).unwrap();
        assert_eq!(
            value,
            json!([{"label": "Hitrost", "data": [10, 12], "hidden": false, "borderWidth": 2}])
        );
    }

    #[test]
    fn test_already_valid_json_untouched() {
        let value = parse_literal(r#"[{"label": "Moč", "data": [1]}]"#).unwrap();
        assert_eq!(value, json!([{"label": "Moč", "data": [1]}]));
    }

    #[test]
    fn test_unparseable_literal_is_error() {
        match parse_literal("[{label: 'x' 'y'}]") {
            Err(TrainingError::Parse(_)) => {}
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_array_literal_rejects_non_array() {
        assert!(matches!(parse_array_literal("{a: 1}"), Err(TrainingError::Parse(_))));
        assert_eq!(parse_array_literal("[]").unwrap(), Vec::<Value>::new());
    }
}
