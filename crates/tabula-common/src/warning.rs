//! Converter warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the style mapper and the tree converter to report input they
//! recover from (malformed spans, unknown keywords, unsupported content).

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recoverable problem (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("reader", "malformed colspan attribute value 'x', using 1");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = {
        let mut guard = WARNED
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        guard.get_or_insert_with(HashSet::new).insert(key)
    };

    if should_print {
        eprintln!("{YELLOW}[Tabula {component}] ⚠ {message}{RESET}");
    }
}

/// Number of distinct warnings recorded since the last [`clear_warnings`].
#[must_use]
pub fn warning_count() -> usize {
    let guard = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    guard.as_ref().map_or(0, HashSet::len)
}

/// Clear all recorded warnings (call when loading a new document)
pub fn clear_warnings() {
    let mut guard = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
