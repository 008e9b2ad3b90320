//! Error types for document loading and conversion.

use std::path::PathBuf;

use tabula_common::net::FetchError;
use thiserror::Error;

/// Fatal errors. Any of these aborts the whole conversion.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The input could not be turned into a DOM tree.
    #[error("failed to parse document: {0}")]
    DocumentParse(String),

    /// The raw input declares an XML entity.
    #[error("detected use of ENTITY in document; this is prohibited to prevent XXE attacks")]
    SecurityViolation,

    /// A remote image could not be fetched.
    #[error("failed to fetch remote image '{url}'")]
    RemoteResource {
        /// The image URL.
        url: String,
        /// What went wrong.
        #[source]
        source: FetchError,
    },

    /// The file does not look like HTML.
    #[error("'{}' is not a valid HTML file", path.display())]
    InvalidFormat {
        /// The rejected file.
        path: PathBuf,
    },

    /// A file could not be read or written.
    #[error("I/O error on '{}'", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// An inline image could not be decoded.
    #[error("invalid inline image: {0}")]
    Image(#[source] FetchError),
}

/// A `rowspan` or `colspan` value that is not a positive integer.
///
/// Recoverable: the converter warns and uses a span of 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed {name} attribute value '{value}'")]
pub struct MalformedAttributeError {
    /// Attribute name.
    pub name: String,
    /// The raw value.
    pub value: String,
}
