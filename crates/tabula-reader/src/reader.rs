//! File-level entry points: format sniffing, the entity guard, parsing,
//! optional style inlining and conversion into a workbook.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use tabula_common::net::{Fetch, HttpFetcher};
use tabula_common::warning::clear_warnings;
use tabula_dom::{DomTree, parse_html};
use tabula_grid::Workbook;

use crate::converter::convert_document;
use crate::error::ReaderError;
use crate::image::{ImageResolver, ScratchSpace};
use crate::security::{SNIFF_LEN, looks_like_html, scan_for_entities};

/// How `<hr>` is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RuleMode {
    /// A thin black bottom border on an empty row.
    #[default]
    Border,
    /// The text `----------` on its own row.
    Placeholder,
}

/// Reader configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Sheet receiving the content; missing sheets are created.
    pub sheet_index: usize,
    /// Rendering of horizontal rules.
    pub rule_mode: RuleMode,
}

/// A stylesheet found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StylesheetSource {
    /// Body of a `<style>` element.
    Embedded(String),
    /// `href` of a `<link rel="stylesheet">` element.
    Linked(String),
}

/// Folds stylesheet rules into `style` attributes.
///
/// The converter only reads inline styles; an inliner lets documents styled
/// through `<style>` or linked sheets keep their formatting.
pub trait StyleInliner {
    /// Return `html` with the rules of `stylesheets` moved into `style`
    /// attributes.
    fn inline_styles(&self, html: &str, stylesheets: &[StylesheetSource]) -> String;
}

/// The result of loading a document.
///
/// Images fetched or decoded during conversion live in `scratch`; keep this
/// value alive while the image paths are in use.
#[derive(Debug)]
pub struct LoadedWorkbook {
    /// The converted workbook.
    pub workbook: Workbook,
    /// Temporary image files.
    pub scratch: ScratchSpace,
    /// The file the document came from, if any.
    pub source_path: Option<PathBuf>,
}

/// Loads HTML documents into workbooks.
pub struct HtmlReader {
    options: ReaderOptions,
    fetcher: Box<dyn Fetch>,
    inliner: Option<Box<dyn StyleInliner>>,
}

impl Default for HtmlReader {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlReader {
    /// A reader with default options fetching remote images over HTTP.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: ReaderOptions::default(),
            fetcher: Box::new(HttpFetcher),
            inliner: None,
        }
    }

    /// Replace the options.
    #[must_use]
    pub const fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    /// Fetch remote images through `fetcher`.
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: impl Fetch + 'static) -> Self {
        self.fetcher = Box::new(fetcher);
        self
    }

    /// Run `inliner` over documents that carry stylesheets.
    #[must_use]
    pub fn with_style_inliner(mut self, inliner: impl StyleInliner + 'static) -> Self {
        self.inliner = Some(Box::new(inliner));
        self
    }

    /// The current options.
    #[must_use]
    pub const fn options(&self) -> ReaderOptions {
        self.options
    }

    /// Whether `path` can be opened and starts like an HTML document.
    #[must_use]
    pub fn can_read(&self, path: &Path) -> bool {
        let Ok(file) = File::open(path) else {
            return false;
        };
        let mut head = Vec::with_capacity(SNIFF_LEN);
        file.take(SNIFF_LEN as u64)
            .read_to_end(&mut head)
            .is_ok_and(|_| looks_like_html(&head))
    }

    /// Load the HTML file at `path` into a new workbook.
    ///
    /// Relative image paths resolve against the file's directory.
    ///
    /// # Errors
    ///
    /// - [`ReaderError::Io`] if the file cannot be read
    /// - [`ReaderError::InvalidFormat`] if it does not look like HTML
    /// - [`ReaderError::SecurityViolation`] if it declares an entity
    /// - [`ReaderError::DocumentParse`] if it is not UTF-8
    /// - any conversion error of [`HtmlReader::load_into`]
    pub fn load(&self, path: &Path) -> Result<LoadedWorkbook, ReaderError> {
        let bytes = fs::read(path).map_err(|source| ReaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if !looks_like_html(&bytes) {
            return Err(ReaderError::InvalidFormat {
                path: path.to_path_buf(),
            });
        }
        scan_for_entities(&bytes)?;
        let html = String::from_utf8(bytes)
            .map_err(|e| ReaderError::DocumentParse(format!("input is not valid UTF-8: {e}")))?;

        let mut workbook = Workbook::new();
        let mut scratch = ScratchSpace::new();
        self.convert_into(&html, &mut workbook, &mut scratch, path.parent())?;
        Ok(LoadedWorkbook {
            workbook,
            scratch,
            source_path: Some(path.to_path_buf()),
        })
    }

    /// Load an HTML string into a new workbook.
    ///
    /// # Errors
    ///
    /// See [`HtmlReader::load_into`].
    pub fn load_str(&self, html: &str) -> Result<LoadedWorkbook, ReaderError> {
        let mut workbook = Workbook::new();
        let mut scratch = ScratchSpace::new();
        self.load_into(html, &mut workbook, &mut scratch)?;
        Ok(LoadedWorkbook {
            workbook,
            scratch,
            source_path: None,
        })
    }

    /// Convert an HTML string into the configured sheet of an existing
    /// workbook. Image files go to `scratch`.
    ///
    /// # Errors
    ///
    /// - [`ReaderError::SecurityViolation`] if the input declares an entity
    /// - [`ReaderError::RemoteResource`] if a remote image cannot be fetched
    /// - [`ReaderError::Image`] or [`ReaderError::Io`] if an image cannot be
    ///   stored
    pub fn load_into(
        &self,
        html: &str,
        workbook: &mut Workbook,
        scratch: &mut ScratchSpace,
    ) -> Result<(), ReaderError> {
        scan_for_entities(html.as_bytes())?;
        self.convert_into(html, workbook, scratch, None)
    }

    fn convert_into(
        &self,
        html: &str,
        workbook: &mut Workbook,
        scratch: &mut ScratchSpace,
        base_dir: Option<&Path>,
    ) -> Result<(), ReaderError> {
        clear_warnings();

        let mut dom = parse_document(html)?;
        if let Some(inliner) = &self.inliner {
            let stylesheets = collect_stylesheets(&dom);
            if !stylesheets.is_empty() {
                let inlined = inliner.inline_styles(html, &stylesheets);
                scan_for_entities(inlined.as_bytes())?;
                dom = parse_document(&inlined)?;
            }
        }

        let sheet = workbook.ensure_sheet(self.options.sheet_index);
        let mut images = ImageResolver::new(self.fetcher.as_ref(), scratch).with_base_dir(base_dir);
        convert_document(&dom, sheet, &mut images, self.options)
    }
}

fn parse_document(html: &str) -> Result<DomTree, ReaderError> {
    let dom = parse_html(html);
    if dom.document_element().is_none() {
        return Err(ReaderError::DocumentParse(
            "document has no root element".to_string(),
        ));
    }
    Ok(dom)
}

/// `<style>` bodies and `<link rel="stylesheet">` targets in document
/// order.
fn collect_stylesheets(dom: &DomTree) -> Vec<StylesheetSource> {
    dom.descendants(dom.root())
        .filter_map(|id| {
            let element = dom.as_element(id)?;
            if element.is("style") {
                Some(StylesheetSource::Embedded(dom.text_content(id)))
            } else if element.is("link") && is_stylesheet_link(element.attr("rel")) {
                element
                    .non_empty_attr("href")
                    .map(|href| StylesheetSource::Linked(href.to_string()))
            } else {
                None
            }
        })
        .collect()
}

fn is_stylesheet_link(rel: Option<&str>) -> bool {
    rel.is_some_and(|rel| {
        rel.split_ascii_whitespace()
            .any(|token| token.eq_ignore_ascii_case("stylesheet"))
    })
}
