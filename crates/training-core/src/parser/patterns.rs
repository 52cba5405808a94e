use once_cell::sync::Lazy;
use regex::Regex;

// === Literal normalization ===
// Bare identifier key after `{`, whitespace or `,`: `{name: 1` -> `{"name": 1`
pub static UNQUOTED_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\{\s,])(\w+)\s*:").unwrap());
// Comma directly before a closing bracket or brace, whitespace allowed in between
pub static TRAILING_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*([\]\}])").unwrap());
