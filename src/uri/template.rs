//! URI templates as used in CSV-W `aboutUrl`/`propertyUrl`/`valueUrl`.
//!
//! Supports the two RFC 6570 forms CSV-W packages rely on: simple
//! expansion `{var}` (percent-encodes reserved characters) and reserved
//! expansion `{+var}` (keeps them).

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;

/// Characters encoded by `{var}`: everything but RFC 3986 unreserved.
const SIMPLE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Characters encoded by `{+var}`: reserved characters and `%` pass through.
const RESERVED: &AsciiSet = &SIMPLE
    .remove(b':')
    .remove(b'/')
    .remove(b'?')
    .remove(b'#')
    .remove(b'[')
    .remove(b']')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b'%');

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unclosed `{{` at byte {0}")]
    Unclosed(usize),
    #[error("unexpected `}}` at byte {0}")]
    UnexpectedClose(usize),
    #[error("invalid variable name `{0}`")]
    InvalidVariable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Variable { name: String, reserved: bool },
}

/// A parsed URI template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    parts: Vec<Part>,
}

impl UriTemplate {
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        let mut parts = Vec::new();
        let mut rest = raw;
        let mut offset = 0;

        while let Some(open) = rest.find(['{', '}']) {
            let (before, after) = rest.split_at(open);
            if after.starts_with('}') {
                return Err(TemplateError::UnexpectedClose(offset + open));
            }
            let Some(close) = after.find('}') else {
                return Err(TemplateError::Unclosed(offset + open));
            };
            let expression = &after[1..close];
            if expression.contains('{') {
                return Err(TemplateError::Unclosed(offset + open));
            }

            let (reserved, name) = match expression.strip_prefix('+') {
                Some(name) => (true, name),
                None => (false, expression),
            };
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(TemplateError::InvalidVariable(expression.to_string()));
            }

            if !before.is_empty() {
                parts.push(Part::Literal(before.to_string()));
            }
            parts.push(Part::Variable {
                name: name.to_string(),
                reserved,
            });

            offset += open + close + 1;
            rest = &after[close + 1..];
        }

        if !rest.is_empty() {
            parts.push(Part::Literal(rest.to_string()));
        }
        Ok(Self { parts })
    }

    /// Names of the variables referenced, in order of appearance.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|p| match p {
            Part::Variable { name, .. } => Some(name.as_str()),
            Part::Literal(_) => None,
        })
    }

    /// Expand with a lookup; unbound variables expand to nothing (RFC 6570).
    pub fn expand<'v>(&self, lookup: impl Fn(&str) -> Option<&'v str>) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Variable { name, reserved } => {
                    if let Some(value) = lookup(name) {
                        let set = if *reserved { RESERVED } else { SIMPLE };
                        out.extend(utf8_percent_encode(value, set));
                    }
                }
            }
        }
        out
    }

    /// Expand binding `name` to `value`.
    pub fn expand_one(&self, name: &str, value: &str) -> String {
        self.expand(|var| (var == name).then_some(value))
    }

    /// Rewrite every variable to `name`, keeping each expression's operator.
    pub fn rebind(&self, name: &str) -> String {
        self.parts
            .iter()
            .map(|p| match p {
                Part::Literal(text) => text.clone(),
                Part::Variable { reserved, .. } => variable(name, *reserved),
            })
            .collect()
    }
}

/// Template expression for a variable: `{name}` or `{+name}`.
#[inline]
pub fn variable(name: &str, reserved: bool) -> String {
    if reserved {
        format!("{{+{name}}}")
    } else {
        format!("{{{name}}}")
    }
}
