//! Replays generated programs into an object graph.
//!
//! Understands exactly the statement shapes the generator writes:
//!
//! ```text
//! x = module.Class(args)
//! x.attribute = value
//! x.append(y)            x.append(module.Class(args))
//! x.insert(0, y)
//! table['key'] = x
//! table['key'].addSpannedElements([table['a'], table['b']])
//! ```
//!
//! Anything from the well-formedness trailer on is ignored. Unknown
//! statements and lookups of unregistered keys panic, the way the Python
//! interpreter would raise.

#![allow(dead_code)]

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attach {
    Append,
    Front,
}

#[derive(Debug, Clone, Default)]
pub struct Object {
    pub constructor: String,
    pub positional: Vec<String>,
    pub keywords: Vec<(String, String)>,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<(Attach, String)>,
    pub spanned: Vec<String>,
}

impl Object {
    pub fn keyword(&self, name: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Quarter length from `duration=duration.Duration(<ql>)`
    pub fn quarter_length(&self) -> Option<f64> {
        let raw = self.keyword("duration")?;
        let inner = raw.strip_prefix("duration.Duration(")?.strip_suffix(')')?;
        inner.parse().ok()
    }
}

#[derive(Debug, Default)]
pub struct Replay {
    pub objects: HashMap<String, Object>,
    pub tables: HashMap<String, HashMap<String, String>>,
    /// Names in the order they were bound
    pub bound: Vec<String>,
    anonymous: usize,
}

impl Replay {
    pub fn run(program: &str) -> Self {
        let mut replay = Replay::default();
        for line in program.lines() {
            if line.starts_with("if not ") {
                break;
            }
            if line.is_empty() || line.starts_with("from ") {
                continue;
            }
            replay.statement(line);
        }
        replay
    }

    pub fn get(&self, name: &str) -> &Object {
        self.objects
            .get(name)
            .unwrap_or_else(|| panic!("NameError: '{}' is not defined", name))
    }

    /// Children of `name` in attach order
    pub fn children(&self, name: &str) -> Vec<(Attach, &Object)> {
        self.get(name)
            .children
            .iter()
            .map(|(attach, child)| (*attach, self.get(child)))
            .collect()
    }

    /// Name registered under `key` in `table`
    pub fn lookup(&self, table: &str, key: &str) -> &str {
        self.tables
            .get(table)
            .and_then(|t| t.get(key))
            .map(String::as_str)
            .unwrap_or_else(|| panic!("KeyError: {}['{}']", table, key))
    }

    fn statement(&mut self, line: &str) {
        if let Some((lhs, rhs)) = split_assignment(line) {
            self.assign(lhs, rhs);
            return;
        }
        if let Some((target, arg)) = method_call(line, ".append(") {
            let target = self.resolve(target);
            let child = self.value(arg);
            self.object_mut(&target).children.push((Attach::Append, child));
        } else if let Some((target, arg)) = method_call(line, ".insert(0, ") {
            let target = self.resolve(target);
            let child = self.value(arg);
            self.object_mut(&target).children.push((Attach::Front, child));
        } else if let Some((target, arg)) = method_call(line, ".addSpannedElements(") {
            let target = self.resolve(target);
            let inner = arg
                .strip_prefix('[')
                .and_then(|a| a.strip_suffix(']'))
                .unwrap_or_else(|| panic!("expected a list in '{}'", line));
            let members: Vec<String> = split_top_level(inner)
                .into_iter()
                .map(|item| self.resolve(item))
                .collect();
            self.object_mut(&target).spanned.extend(members);
        } else {
            panic!("SyntaxError: unrecognised statement '{}'", line);
        }
    }

    fn assign(&mut self, lhs: &str, rhs: &str) {
        if let Some((table, key)) = subscript(lhs) {
            let value = self.resolve(rhs);
            self.tables
                .get_mut(table)
                .unwrap_or_else(|| panic!("NameError: table '{}' is not defined", table))
                .insert(key, value);
        } else if let Some((object, attribute)) = lhs.split_once('.') {
            let object = object.to_string();
            self.object_mut(&object)
                .attributes
                .push((attribute.to_string(), rhs.to_string()));
        } else if rhs == "{}" {
            self.tables.insert(lhs.to_string(), HashMap::new());
        } else {
            let object = construct(rhs);
            self.objects.insert(lhs.to_string(), object);
            self.bound.push(lhs.to_string());
        }
    }

    /// A bound name, a table lookup, or an inline constructor
    fn value(&mut self, expr: &str) -> String {
        if expr.contains('(') {
            self.anonymous += 1;
            let name = format!("#anon{}", self.anonymous);
            self.objects.insert(name.clone(), construct(expr));
            name
        } else {
            self.resolve(expr)
        }
    }

    fn resolve(&self, expr: &str) -> String {
        match subscript(expr) {
            Some((table, key)) => self.lookup(table, &key).to_string(),
            None => {
                self.get(expr);
                expr.to_string()
            }
        }
    }

    fn object_mut(&mut self, name: &str) -> &mut Object {
        self.objects
            .get_mut(name)
            .unwrap_or_else(|| panic!("NameError: '{}' is not defined", name))
    }
}

/// `lhs = rhs` where ` = ` is outside any string literal
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '\'' => in_string = false,
                _ => {}
            }
        } else if c == '\'' {
            in_string = true;
        } else if line[i..].starts_with(" = ") {
            return Some((&line[..i], &line[i + 3..]));
        } else if c == '(' {
            return None;
        }
    }
    None
}

fn method_call<'a>(line: &'a str, method: &str) -> Option<(&'a str, &'a str)> {
    let at = line.find(method)?;
    let arg = line[at + method.len()..].strip_suffix(')')?;
    Some((&line[..at], arg))
}

/// `table['key']`
fn subscript(expr: &str) -> Option<(&str, String)> {
    let (table, rest) = expr.split_once('[')?;
    let literal = rest.strip_suffix(']')?;
    Some((table, py_string(literal)))
}

fn construct(expr: &str) -> Object {
    let open = expr
        .find('(')
        .unwrap_or_else(|| panic!("expected a constructor call, got '{}'", expr));
    let args = expr[open + 1..]
        .strip_suffix(')')
        .unwrap_or_else(|| panic!("unbalanced call '{}'", expr));

    let mut object = Object {
        constructor: expr[..open].to_string(),
        ..Object::default()
    };
    for arg in split_top_level(args) {
        match keyword_name(arg) {
            Some(name) => object
                .keywords
                .push((name.to_string(), arg[name.len() + 1..].to_string())),
            None => object.positional.push(arg.to_string()),
        }
    }
    object
}

fn keyword_name(arg: &str) -> Option<&str> {
    let end = arg.find('=')?;
    let name = &arg[..end];
    let is_name = !name.is_empty() && name.chars().all(|c| c == '_' || c.is_ascii_alphanumeric());
    is_name.then_some(name)
}

/// Split on commas that are outside brackets and string literals.
pub fn split_top_level(s: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escaped = false;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '\'' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '\'' => in_string = true,
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                items.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = s[start..].trim();
    if !last.is_empty() {
        items.push(last);
    }
    items
}

/// Decode a single-quoted Python string literal.
pub fn py_string(literal: &str) -> String {
    let inner = literal
        .strip_prefix('\'')
        .and_then(|l| l.strip_suffix('\''))
        .unwrap_or_else(|| panic!("expected a string literal, got {}", literal));
    let mut out = String::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Decode a list of string literals: `['E4', 'G4']`
pub fn py_string_list(literal: &str) -> Vec<String> {
    let inner = literal
        .strip_prefix('[')
        .and_then(|l| l.strip_suffix(']'))
        .unwrap_or_else(|| panic!("expected a list literal, got {}", literal));
    split_top_level(inner).into_iter().map(py_string).collect()
}
