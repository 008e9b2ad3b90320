//! Pre-parse input checks.

use crate::error::ReaderError;

const ENTITY_DECLARATION: &[u8] = b"<!ENTITY";

/// How many leading bytes [`looks_like_html`] inspects.
pub const SNIFF_LEN: usize = 2048;

/// Reject input declaring an XML entity.
///
/// NUL bytes are ignored while matching, so `<\0!\0E\0N...` is caught too.
///
/// # Errors
///
/// Returns [`ReaderError::SecurityViolation`] if `<!ENTITY` occurs.
pub fn scan_for_entities(raw: &[u8]) -> Result<(), ReaderError> {
    let stripped: Vec<u8> = raw.iter().copied().filter(|&byte| byte != 0).collect();
    if stripped
        .windows(ENTITY_DECLARATION.len())
        .any(|window| window == ENTITY_DECLARATION)
    {
        Err(ReaderError::SecurityViolation)
    } else {
        Ok(())
    }
}

/// Whether the first [`SNIFF_LEN`] bytes contain something shaped like a
/// tag: `<` followed by a letter, `/`, `!` or `?`.
#[must_use]
pub fn looks_like_html(head: &[u8]) -> bool {
    let head = &head[..head.len().min(SNIFF_LEN)];
    head.windows(2).any(|pair| {
        pair[0] == b'<' && (pair[1].is_ascii_alphabetic() || matches!(pair[1], b'/' | b'!' | b'?'))
    })
}
