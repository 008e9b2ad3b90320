//! HTTP fetch utilities for the Tabula converter.
//!
//! Provides a blocking HTTP GET wrapper behind the [`Fetch`] trait so the
//! image loader can be pointed at a stub in tests, plus decoding for inline
//! `data:` URLs.

use base64::Engine;
use std::time::Duration;
use thiserror::Error;

/// User-Agent header sent with all requests.
const USER_AGENT: &str = concat!("tabula/", env!("CARGO_PKG_VERSION"));

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Errors produced while fetching or decoding a resource.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(String),
    /// The request could not be sent or the connection failed.
    #[error("request failed: {0}")]
    Request(String),
    /// The server answered with a non-success status.
    #[error("HTTP error: {status}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
    },
    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
    /// A `data:` URL was malformed or used an unsupported encoding.
    #[error("invalid data URL: {0}")]
    DataUrl(String),
}

/// A source of raw resource bytes keyed by absolute URL.
pub trait Fetch {
    /// Fetch `url` and return its body.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the resource cannot be retrieved or the
    /// server does not answer with a success status.
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Blocking HTTP fetcher backed by `reqwest`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpFetcher;

impl Fetch for HttpFetcher {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        let response = client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
            });
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| FetchError::Body(e.to_string()))
    }
}

/// A parsed `data:` URL that can be decoded into raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl<'a> {
    /// Media type portion, e.g. `image/png`. Empty when omitted.
    pub media_type: &'a str,
    /// Whether the payload is base64 encoded.
    pub base64: bool,
    /// Raw payload after the comma.
    pub payload: &'a str,
}

impl<'a> DataUrl<'a> {
    /// Split a raw `data:` URL into its metadata and payload.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::DataUrl`] if the scheme is missing or there is
    /// no comma separating metadata from payload.
    pub fn parse(raw: &'a str) -> Result<Self, FetchError> {
        let rest = raw
            .strip_prefix("data:")
            .ok_or_else(|| FetchError::DataUrl("missing data: scheme".to_string()))?;
        let (metadata, payload) = rest
            .split_once(',')
            .ok_or_else(|| FetchError::DataUrl("missing comma".to_string()))?;
        let (media_type, base64) = metadata
            .strip_suffix(";base64")
            .map_or((metadata, false), |media| (media, true));

        Ok(Self {
            media_type,
            base64,
            payload,
        })
    }

    /// File extension suggested by the media type (`png` for `image/png`).
    #[must_use]
    pub fn extension(&self) -> Option<&'a str> {
        let subtype = self.media_type.strip_prefix("image/")?;
        let subtype = subtype.split(';').next().unwrap_or(subtype);
        match subtype {
            "" => None,
            "svg+xml" => Some("svg"),
            "jpeg" => Some("jpg"),
            other => Some(other),
        }
    }

    /// Decode the data URL payload into raw bytes.
    ///
    /// Only base64-encoded payloads are supported.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::DataUrl`] for non-base64 payloads or invalid
    /// base64 data.
    pub fn decode(&self) -> Result<Vec<u8>, FetchError> {
        if !self.base64 {
            return Err(FetchError::DataUrl(format!(
                "unsupported encoding for media type '{}'",
                self.media_type
            )));
        }
        base64::engine::general_purpose::STANDARD
            .decode(self.payload.trim())
            .map_err(|e| FetchError::DataUrl(format!("base64 decode error: {e}")))
    }
}
