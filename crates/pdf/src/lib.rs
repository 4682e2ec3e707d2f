//! # askdocs-pdf: Document Loader
//!
//! Reads every PDF in the document directory once at startup and concatenates
//! their page text into the [`KnowledgeBase`] that backs every answer.

use askdocs::KnowledgeBase;
use pdf::content::{Op, TextDrawAdjusted};
use pdf::file::FileOptions;
use std::fs;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// File name suffix of loadable documents. Matched case-sensitively.
pub const PDF_SUFFIX: &str = ".pdf";

/// `TJ` adjustments at or below this value (thousandths of an em) are read as a
/// word gap.
const WORD_GAP_THRESHOLD: f32 = -200.0;

// --- Error Definitions ---

#[derive(Error, Debug)]
pub enum PdfLoadError {
    #[error("Failed to create document directory '{}': {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("Failed to list document directory '{}': {source}", path.display())]
    ReadDir { path: PathBuf, source: io::Error },
    #[error("Failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to parse PDF content: {0}")]
    PdfParse(String),
}

// --- Text Extraction ---

/// Accumulates the text of one page while walking its content operations.
#[derive(Default)]
struct PageText {
    text: String,
    pending_break: Option<char>,
}

impl PageText {
    fn push_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        if let Some(sep) = self.pending_break.take() {
            if !self.text.is_empty() && !self.text.ends_with(char::is_whitespace) {
                self.text.push(sep);
            }
        }
        self.text.push_str(s);
    }

    /// Requests a separator before the next run of text. A line break wins over a space.
    fn request_break(&mut self, sep: char) {
        if self.pending_break != Some('\n') {
            self.pending_break = Some(sep);
        }
    }
}

/// Extracts the text of every page of a PDF, in page order.
///
/// The returned vector has one entry per page; pages without text yield an
/// empty string. Any parse failure fails the whole document.
pub fn extract_text_from_pdf(pdf_data: &[u8]) -> Result<Vec<String>, PdfLoadError> {
    let file = FileOptions::cached()
        .load(pdf_data)
        .map_err(|e| PdfLoadError::PdfParse(e.to_string()))?;
    let resolver = file.resolver();
    let mut pages = Vec::with_capacity(file.num_pages() as usize);

    for page_num in 0..file.num_pages() {
        let page = file
            .get_page(page_num)
            .map_err(|e| PdfLoadError::PdfParse(e.to_string()))?;
        let mut page_text = PageText::default();
        if let Some(content) = &page.contents {
            let operations = content
                .operations(&resolver)
                .map_err(|e| PdfLoadError::PdfParse(e.to_string()))?;
            for op in operations.iter() {
                match op {
                    Op::TextDraw { text } => page_text.push_str(&text.to_string_lossy()),
                    Op::TextDrawAdjusted { array } => {
                        for item in array {
                            match item {
                                TextDrawAdjusted::Text(text) => {
                                    page_text.push_str(&text.to_string_lossy())
                                }
                                TextDrawAdjusted::Spacing(gap) if *gap <= WORD_GAP_THRESHOLD => {
                                    page_text.request_break(' ')
                                }
                                TextDrawAdjusted::Spacing(_) => {}
                            }
                        }
                    }
                    Op::TextNewline | Op::SetTextMatrix { .. } => page_text.request_break('\n'),
                    Op::MoveTextPosition { translation } => {
                        if translation.y != 0.0 {
                            page_text.request_break('\n');
                        } else {
                            page_text.request_break(' ');
                        }
                    }
                    Op::EndText => page_text.request_break('\n'),
                    _ => {}
                }
            }
        }
        pages.push(page_text.text);
    }
    Ok(pages)
}

/// Runs a parse step, turning a panic inside the parser into a parse error so
/// one malformed file cannot abort the whole load.
fn guard_parser_panic<T>(
    parse: impl FnOnce() -> Result<T, PdfLoadError> + panic::UnwindSafe,
) -> Result<T, PdfLoadError> {
    panic::catch_unwind(parse).unwrap_or_else(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(PdfLoadError::PdfParse(format!("parser panicked: {reason}")))
    })
}

/// Reads one PDF and returns its contribution to the knowledge base: each
/// non-empty page's text followed by a newline.
fn extract_document(path: &Path) -> Result<String, PdfLoadError> {
    let pdf_data = fs::read(path).map_err(|source| PdfLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let pages = guard_parser_panic(|| extract_text_from_pdf(&pdf_data))?;

    let mut text = String::new();
    for page in pages.iter().filter(|p| !p.is_empty()) {
        text.push_str(page);
        text.push('\n');
    }
    Ok(text)
}

// --- Loader ---

/// Lists the entries of `dir` whose file name ends with [`PDF_SUFFIX`], sorted by name.
fn list_pdf_files(dir: &Path) -> Result<Vec<PathBuf>, PdfLoadError> {
    let entries = fs::read_dir(dir).map_err(|source| PdfLoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) if entry.file_name().to_string_lossy().ends_with(PDF_SUFFIX) => {
                files.push(entry.path())
            }
            Ok(entry) => debug!("Ignoring non-PDF entry {:?}.", entry.file_name()),
            Err(e) => warn!("Failed to read an entry of '{}': {e}", dir.display()),
        }
    }
    files.sort();
    Ok(files)
}

/// Builds the knowledge base from every PDF in `dir`.
///
/// A missing directory is created and yields an empty knowledge base. A file
/// that fails to open or parse is logged and skipped, and contributes no text.
/// `file_count` counts the files processed without error, including those with
/// no extractable text.
///
/// This runs once per process; callers keep the result for the process lifetime.
#[instrument]
pub fn load_all_documents(dir: &Path) -> Result<KnowledgeBase, PdfLoadError> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| PdfLoadError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
        info!(
            "Created missing document directory '{}'; no documents loaded.",
            dir.display()
        );
        return Ok(KnowledgeBase::default());
    }

    let mut combined_text = String::new();
    let mut file_count = 0;

    for path in list_pdf_files(dir)? {
        match extract_document(&path) {
            Ok(text) => {
                if text.is_empty() {
                    warn!("'{}' contains no extractable text.", path.display());
                }
                combined_text.push_str(&text);
                file_count += 1;
                debug!(chars = text.len(), "Loaded '{}'.", path.display());
            }
            Err(e) => warn!("Failed to read '{}': {e}", path.display()),
        }
    }

    info!(
        file_count,
        chars = combined_text.len(),
        "Knowledge base loaded from '{}'.",
        dir.display()
    );
    Ok(KnowledgeBase::new(combined_text, file_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_panic_becomes_parse_error() {
        let result: Result<Vec<String>, _> = guard_parser_panic(|| panic!("bad xref"));

        match result {
            Err(PdfLoadError::PdfParse(msg)) => assert!(msg.contains("bad xref"), "{msg}"),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn parser_result_passes_through() {
        let result = guard_parser_panic(|| Ok(vec!["page".to_string()]));

        assert_eq!(result.unwrap(), vec!["page".to_string()]);
    }
}
