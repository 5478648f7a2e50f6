//! Contract loading
//!
//! Reads a contract from disk as text. PDF files go through text
//! extraction; everything else is read as UTF-8.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Contract file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to extract text from {path}: {message}")]
    PdfExtraction { path: String, message: String },

    #[error("Contract file {0} contains no text")]
    EmptyDocument(String),
}

/// Loads a contract and normalizes its text. `.pdf` files (any case) are
/// run through text extraction; all other files are read as UTF-8.
pub fn load_contract(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.display().to_string()));
    }

    let is_pdf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    let raw = if is_pdf {
        debug!("Extracting text from PDF {}", path.display());
        pdf_extract::extract_text(path).map_err(|e| LoadError::PdfExtraction {
            path: path.display().to_string(),
            message: e.to_string(),
        })?
    } else {
        fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            source: e,
        })?
    };

    let cleaned = normalize_text(&raw);
    if cleaned.is_empty() {
        return Err(LoadError::EmptyDocument(path.display().to_string()));
    }

    info!(
        "Loaded contract ({} chars) from {}",
        cleaned.chars().count(),
        path.display()
    );
    Ok(cleaned)
}

/// Collapses runs of spaces and drops blank lines while keeping line
/// breaks, so clause markers stay at the start of their lines.
fn normalize_text(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
