//! Image source resolution.
//!
//! [§ 4.8.3 The img element](https://html.spec.whatwg.org/multipage/embedded-content.html#the-img-element)
//!
//! A placed image must point at a local file. Local `src` values are used
//! as they are (relative paths against the document directory); `data:`
//! URLs are decoded and remote URLs fetched into a [`ScratchSpace`] whose
//! files live exactly as long as the conversion result.

use std::fs;
use std::path::{Path, PathBuf};

use tabula_common::net::{DataUrl, Fetch};
use tabula_common::url::{SourceKind, classify_source, url_basename};
use tempfile::TempDir;

use crate::error::ReaderError;

/// File name prefix for images copied into the scratch space.
pub const SCRATCH_PREFIX: &str = "tabula_tmp_image_";

/// A lazily created temporary directory, removed on drop.
#[derive(Debug, Default)]
pub struct ScratchSpace {
    dir: Option<TempDir>,
    files: Vec<PathBuf>,
}

impl ScratchSpace {
    /// An empty scratch space; nothing is created on disk yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The directory, once the first file has been written.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.dir.as_ref().map(TempDir::path)
    }

    /// Files written so far.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Write `bytes` under `name` (prefixed with [`SCRATCH_PREFIX`]) and
    /// return the full path. A name already in use gets a numeric prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::Io`] if the directory or file cannot be
    /// created.
    pub fn write(&mut self, name: &str, bytes: &[u8]) -> Result<PathBuf, ReaderError> {
        let scratch_dir = match self.dir.take() {
            Some(dir) => dir,
            None => tempfile::Builder::new()
                .prefix("tabula")
                .tempdir()
                .map_err(|source| ReaderError::Io {
                    path: std::env::temp_dir(),
                    source,
                })?,
        };
        let dir = scratch_dir.path().to_path_buf();
        self.dir = Some(scratch_dir);

        let mut path = dir.join(format!("{SCRATCH_PREFIX}{name}"));
        let mut index = self.files.len();
        while self.files.contains(&path) {
            path = dir.join(format!("{SCRATCH_PREFIX}{index}_{name}"));
            index += 1;
        }
        fs::write(&path, bytes).map_err(|source| ReaderError::Io {
            path: path.clone(),
            source,
        })?;
        self.files.push(path.clone());
        Ok(path)
    }
}

/// Turns `<img src>` values into local file paths.
pub struct ImageResolver<'a> {
    fetcher: &'a dyn Fetch,
    scratch: &'a mut ScratchSpace,
    base_dir: Option<PathBuf>,
    inline_count: usize,
}

impl<'a> ImageResolver<'a> {
    /// A resolver fetching through `fetcher` into `scratch`.
    pub fn new(fetcher: &'a dyn Fetch, scratch: &'a mut ScratchSpace) -> Self {
        Self {
            fetcher,
            scratch,
            base_dir: None,
            inline_count: 0,
        }
    }

    /// Resolve relative local paths against `dir`.
    #[must_use]
    pub fn with_base_dir(mut self, dir: Option<&Path>) -> Self {
        self.base_dir = dir.map(Path::to_path_buf);
        self
    }

    /// Resolve `src` to a local path.
    ///
    /// # Errors
    ///
    /// - [`ReaderError::RemoteResource`] if a remote image cannot be fetched
    /// - [`ReaderError::Image`] if a `data:` URL cannot be decoded
    /// - [`ReaderError::Io`] if the scratch file cannot be written
    pub fn resolve(&mut self, src: &str) -> Result<PathBuf, ReaderError> {
        let src = src.trim();
        match classify_source(src) {
            SourceKind::Local => Ok(self.local_path(src)),
            SourceKind::Data => {
                let data = DataUrl::parse(src).map_err(ReaderError::Image)?;
                let bytes = data.decode().map_err(ReaderError::Image)?;
                self.inline_count += 1;
                let name = format!(
                    "inline_{}.{}",
                    self.inline_count,
                    data.extension().unwrap_or("bin")
                );
                self.scratch.write(&name, &bytes)
            }
            SourceKind::Remote => {
                let bytes =
                    self.fetcher
                        .fetch_bytes(src)
                        .map_err(|source| ReaderError::RemoteResource {
                            url: src.to_string(),
                            source,
                        })?;
                let name = url_basename(src).unwrap_or("image");
                self.scratch.write(name, &bytes)
            }
        }
    }

    fn local_path(&self, src: &str) -> PathBuf {
        let path = Path::new(src);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_common::net::FetchError;

    struct NoNetwork;

    impl Fetch for NoNetwork {
        fn fetch_bytes(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
            Err(FetchError::Request("offline".to_string()))
        }
    }

    #[test]
    fn scratch_is_created_lazily_and_removed_on_drop() {
        let mut scratch = ScratchSpace::new();
        assert!(scratch.path().is_none());

        let first = scratch.write("a.png", b"one").unwrap();
        let second = scratch.write("a.png", b"two").unwrap();
        assert_ne!(first, second);
        assert_eq!(fs::read(&first).unwrap(), b"one");
        assert!(
            first
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(SCRATCH_PREFIX)
        );

        let dir = scratch.path().unwrap().to_path_buf();
        drop(scratch);
        assert!(!dir.exists());
    }

    #[test]
    fn renamed_duplicates_never_overwrite_earlier_files() {
        let mut scratch = ScratchSpace::new();
        let original = scratch.write("a.png", b"one").unwrap();
        let numbered = scratch.write("2_a.png", b"two").unwrap();
        let duplicate = scratch.write("a.png", b"three").unwrap();

        assert_ne!(duplicate, original);
        assert_ne!(duplicate, numbered);
        assert_eq!(fs::read(&original).unwrap(), b"one");
        assert_eq!(fs::read(&numbered).unwrap(), b"two");
        assert_eq!(fs::read(&duplicate).unwrap(), b"three");
        assert_eq!(scratch.files().len(), 3);
    }

    #[test]
    fn local_paths_resolve_against_base() {
        let mut scratch = ScratchSpace::new();
        let mut resolver =
            ImageResolver::new(&NoNetwork, &mut scratch).with_base_dir(Some(Path::new("/docs")));
        assert_eq!(
            resolver.resolve("img/logo.png").unwrap(),
            PathBuf::from("/docs/img/logo.png")
        );
        assert_eq!(
            resolver.resolve("/abs/logo.png").unwrap(),
            PathBuf::from("/abs/logo.png")
        );
    }

    #[test]
    fn data_urls_are_decoded_into_scratch() {
        let mut scratch = ScratchSpace::new();
        let path = ImageResolver::new(&NoNetwork, &mut scratch)
            .resolve("data:image/png;base64,aGVsbG8=")
            .unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"hello");
        assert!(path.to_string_lossy().ends_with("inline_1.png"));
    }

    #[test]
    fn bad_data_url_is_an_image_error() {
        let mut scratch = ScratchSpace::new();
        let err = ImageResolver::new(&NoNetwork, &mut scratch)
            .resolve("data:image/png,rawbytes")
            .unwrap_err();
        assert!(matches!(err, ReaderError::Image(_)));
    }

    #[test]
    fn failed_fetch_is_remote_resource_error() {
        let mut scratch = ScratchSpace::new();
        let err = ImageResolver::new(&NoNetwork, &mut scratch)
            .resolve("https://example.com/a.png")
            .unwrap_err();
        assert!(matches!(err, ReaderError::RemoteResource { ref url, .. } if url == "https://example.com/a.png"));
        assert!(scratch.files().is_empty());
    }
}
