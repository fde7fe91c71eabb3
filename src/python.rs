//! Python source rendering helpers.
//!
//! Everything the generator writes into a program goes through these
//! functions, so two runs over the same tree render byte-identical literals.

use crate::node::Value;

/// Single-quoted Python string literal
pub fn string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Python float literal; always carries a decimal point or exponent
pub fn float(x: f64) -> String {
    if x.is_nan() {
        "float('nan')".to_string()
    } else if x.is_infinite() {
        if x > 0.0 {
            "float('inf')".to_string()
        } else {
            "float('-inf')".to_string()
        }
    } else {
        format!("{:?}", x)
    }
}

pub fn int(n: i64) -> String {
    n.to_string()
}

pub fn bool(b: bool) -> String {
    let literal = if b { "True" } else { "False" };
    literal.to_string()
}

/// Any attribute value
pub fn value(v: &Value) -> String {
    match v {
        Value::Bool(b) => bool(*b),
        Value::Int(n) => int(*n),
        Value::Float(x) => float(*x),
        Value::Str(s) => string(s),
        Value::List(items) => list(items.iter().map(value)),
    }
}

/// `[a, b, c]` from already rendered items
pub fn list(items: impl IntoIterator<Item = String>) -> String {
    format!("[{}]", items.into_iter().collect::<Vec<_>>().join(", "))
}

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Whether `s` can be used as a variable or keyword-argument name.
///
/// Restricted to ASCII identifiers.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let starts_well = match chars.next() {
        Some(c) => c == '_' || c.is_ascii_alphabetic(),
        None => false,
    };
    starts_well
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        && !KEYWORDS.contains(&s)
}

/// Constructor argument list, positional arguments first.
///
/// Optional variants skip absent values, which is how handlers leave out
/// parameters for attributes a node does not carry.
#[derive(Debug, Default, Clone)]
pub struct Args {
    positional: Vec<String>,
    keyword: Vec<(String, String)>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positional(mut self, rendered: String) -> Self {
        self.positional.push(rendered);
        self
    }

    pub fn positional_opt(self, rendered: Option<String>) -> Self {
        match rendered {
            Some(r) => self.positional(r),
            None => self,
        }
    }

    pub fn keyword(mut self, name: &str, rendered: String) -> Self {
        self.keyword.push((name.to_string(), rendered));
        self
    }

    pub fn keyword_opt(self, name: &str, rendered: Option<String>) -> Self {
        match rendered {
            Some(r) => self.keyword(name, r),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    pub fn render(&self) -> String {
        let mut parts: Vec<String> = self.positional.clone();
        parts.extend(
            self.keyword
                .iter()
                .map(|(name, value)| format!("{}={}", name, value)),
        );
        parts.join(", ")
    }
}
