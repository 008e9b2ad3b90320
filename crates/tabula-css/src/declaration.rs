//! [§ 3 Declarations](https://www.w3.org/TR/css-style-attr/#syntax)
//!
//! "The value of the style attribute must match the syntax of the contents
//! of a CSS declaration block."
//!
//! Only the flat `name: value` form is handled here. Values are kept as raw
//! strings; the mapper interprets the handful of properties it knows.

/// A single `name: value` pair from a declaration block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Property name, trimmed and ASCII-lowercased.
    pub name: String,
    /// Property value, trimmed, with any `!important` marker removed.
    pub value: String,
}

/// Split a declaration block on `;`, then each declaration on its first `:`.
///
/// Empty declarations and declarations without a colon or a name are
/// skipped. Order is preserved, so later duplicates follow earlier ones.
#[must_use]
pub fn parse_declarations(block: &str) -> Vec<Declaration> {
    block
        .split(';')
        .filter_map(|raw| {
            let (name, value) = raw.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            let value = value.trim();
            let value = strip_important(value);
            Some(Declaration {
                name,
                value: value.to_string(),
            })
        })
        .collect()
}

fn strip_important(value: &str) -> &str {
    let lower = value.to_ascii_lowercase();
    lower
        .rfind("!important")
        .map_or(value, |at| value[..at].trim_end())
}
