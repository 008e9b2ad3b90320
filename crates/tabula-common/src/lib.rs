//! Common utilities for the Tabula converter.
//!
//! This crate provides shared infrastructure used by all converter components:
//! - **Warning System** - colored terminal output for recoverable problems
//! - **Fetching** - blocking HTTP and `data:` URL loading for embedded images
//! - **URL Helpers** - classification of image sources

pub mod net;
pub mod url;
pub mod warning;
