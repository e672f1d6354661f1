//! `:name` template compiler.
//!
//! Templates use a single driver-neutral placeholder syntax:
//!
//! - `:ident` is a parameter (`ident` is letters, digits, `_` and `.`)
//! - `::` emits one literal `:`
//! - `:=` is emitted unchanged
//!
//! [`compile`] rewrites the placeholders for a [`BindStyle`] and records the
//! parameter names in source order, repeats included.
//!
//! ```ignore
//! use namedq::{BindStyle, compile};
//!
//! let q = compile("SELECT * FROM records WHERE name = :qname AND type = :qtype", BindStyle::Dollar)?;
//! assert_eq!(q.sql(), "SELECT * FROM records WHERE name = $1 AND type = $2");
//! assert_eq!(q.names(), ["qname", "qtype"]);
//! ```

use crate::bind_style::BindStyle;
use crate::error::{DbError, DbResult};
use std::fmt::Write as _;

/// A template rewritten for one dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    sql: String,
    names: Vec<String>,
}

impl CompiledQuery {
    /// The SQL handed to the driver.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Parameter names, one per emitted placeholder.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn placeholder_count(&self) -> usize {
        self.names.len()
    }

    pub fn into_parts(self) -> (String, Vec<String>) {
        (self.sql, self.names)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    InName,
}

/// Letters, decimal digits, `_` and `.`.
///
/// Numeric symbols such as `²`, `½` or `Ⅻ` end a name even though
/// `char::is_alphanumeric` accepts them.
fn is_name_char(ch: char) -> bool {
    let letter = ch.is_alphabetic() && !ch.is_numeric();
    letter || ch.is_ascii_digit() || ch == '_' || ch == '.'
}

/// Writes placeholders for one compile call. The counter never outlives it.
struct PlaceholderWriter {
    style: BindStyle,
    next: usize,
}

impl PlaceholderWriter {
    fn new(style: BindStyle) -> Self {
        Self { style, next: 1 }
    }

    fn write(&mut self, out: &mut String, name: &str) {
        match self.style {
            BindStyle::Named => {
                out.push(':');
                out.push_str(name);
            }
            BindStyle::Question | BindStyle::Unknown => out.push('?'),
            BindStyle::Dollar => {
                let _ = write!(out, "${}", self.next);
                self.next += 1;
            }
            BindStyle::At => {
                let _ = write!(out, "@p{}", self.next);
                self.next += 1;
            }
        }
    }
}

/// Compile a `:name` template for `style`.
///
/// Fails only with [`DbError::MalformedTemplate`], when a `:` shows up while a
/// parameter name is being read (e.g. `:a:b`). The index is a char index.
pub fn compile(template: &str, style: BindStyle) -> DbResult<CompiledQuery> {
    let chars: Vec<char> = template.chars().collect();
    let last = chars.len().saturating_sub(1);

    let mut sql = String::with_capacity(template.len());
    let mut names = Vec::new();
    let mut name = String::new();
    let mut placeholders = PlaceholderWriter::new(style);
    let mut state = ScanState::Outside;

    for (idx, &ch) in chars.iter().enumerate() {
        match state {
            ScanState::Outside => {
                if ch == ':' {
                    name.clear();
                    state = ScanState::InName;
                } else {
                    sql.push(ch);
                }
            }
            ScanState::InName if ch == ':' => {
                if idx > 0 && chars[idx - 1] == ':' {
                    sql.push(':');
                    state = ScanState::Outside;
                } else {
                    return Err(DbError::malformed_template(idx));
                }
            }
            ScanState::InName if ch == '=' && name.is_empty() => {
                sql.push_str(":=");
                state = ScanState::Outside;
            }
            ScanState::InName if is_name_char(ch) && idx != last => {
                name.push(ch);
            }
            ScanState::InName => {
                let consumed = idx == last && is_name_char(ch);
                if consumed {
                    name.push(ch);
                }
                placeholders.write(&mut sql, &name);
                names.push(std::mem::take(&mut name));
                if !consumed {
                    sql.push(ch);
                }
                state = ScanState::Outside;
            }
        }
    }

    Ok(CompiledQuery { sql, names })
}

#[cfg(test)]
mod tests;
