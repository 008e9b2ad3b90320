//! Tests for resource fetching and `data:` URL decoding.

use tabula_common::net::{DataUrl, Fetch, FetchError, HttpFetcher};

#[test]
fn test_data_url_decodes_base64_payload() {
    let url = DataUrl::parse("data:image/png;base64,aGVsbG8=").unwrap();
    assert_eq!(url.media_type, "image/png");
    assert!(url.base64);
    assert_eq!(url.decode().unwrap(), b"hello");
    assert_eq!(url.extension(), Some("png"));
}

#[test]
fn test_data_url_extension_aliases() {
    let svg = DataUrl::parse("data:image/svg+xml;base64,PHN2Zy8+").unwrap();
    assert_eq!(svg.extension(), Some("svg"));
    let jpeg = DataUrl::parse("data:image/jpeg;base64,AAAA").unwrap();
    assert_eq!(jpeg.extension(), Some("jpg"));
    let bare = DataUrl::parse("data:;base64,AAAA").unwrap();
    assert_eq!(bare.extension(), None);
}

#[test]
fn test_data_url_rejects_missing_comma() {
    assert!(matches!(
        DataUrl::parse("data:image/png;base64"),
        Err(FetchError::DataUrl(_))
    ));
}

#[test]
fn test_data_url_rejects_percent_encoding() {
    let url = DataUrl::parse("data:text/plain,hello%20world").unwrap();
    assert!(!url.base64);
    assert!(matches!(url.decode(), Err(FetchError::DataUrl(_))));
}

#[test]
fn test_http_fetcher_returns_body() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/logo.png")
        .with_status(200)
        .with_body("PNGDATA")
        .create();

    let body = HttpFetcher
        .fetch_bytes(&format!("{}/logo.png", server.url()))
        .unwrap();
    assert_eq!(body, b"PNGDATA");
}

#[test]
fn test_http_fetcher_reports_error_status() {
    let mut server = mockito::Server::new();
    let _mock = server.mock("GET", "/missing.png").with_status(404).create();

    let err = HttpFetcher
        .fetch_bytes(&format!("{}/missing.png", server.url()))
        .unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404 }));
}
