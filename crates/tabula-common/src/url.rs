//! URL classification helpers for image sources.

/// Where an `<img src>` value points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `http://` or `https://` URL that must be fetched.
    Remote,
    /// Inline `data:` URL.
    Data,
    /// Anything else, treated as a local filesystem path.
    Local,
}

/// Classify an image source string.
#[must_use]
pub fn classify_source(src: &str) -> SourceKind {
    let lower = src.trim_start().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        SourceKind::Remote
    } else if lower.starts_with("data:") {
        SourceKind::Data
    } else {
        SourceKind::Local
    }
}

/// Last path segment of a URL with query and fragment removed.
///
/// Returns `None` when the URL ends in a slash or has no path.
#[must_use]
pub fn url_basename(url: &str) -> Option<&str> {
    let without_fragment = url.split_once('#').map_or(url, |(b, _)| b);
    let without_query = without_fragment
        .split_once('?')
        .map_or(without_fragment, |(b, _)| b);
    let path = without_query
        .split_once("://")
        .map_or(without_query, |(_, rest)| rest);
    let (_, name) = path.rsplit_once('/')?;
    if name.is_empty() { None } else { Some(name) }
}
