use std::path::{Path, PathBuf};
use thiserror::Error;

/// Rejected form input. Nothing in the list changes when one of these is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("product name is empty")]
    EmptyName,
    #[error("invalid quantity: {0:?}")]
    InvalidQuantity(String),
    #[error("invalid price: {0:?}")]
    InvalidPrice(String),
    #[error("quantity times price is too large")]
    AmountTooLarge,
    #[error("list total is too large")]
    TotalTooLarge,
}

/// Failure anywhere along the export path.
///
/// Each variant marks the step that stopped the sequence: building the workbook,
/// writing it to disk, or handing it to the platform.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("spreadsheet generation failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not share {}: {reason}", .path.display())]
    Share { path: PathBuf, reason: String },

    #[error("could not open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Path of the file that was written before the failure, if any.
    pub fn written_path(&self) -> Option<&Path> {
        match self {
            ExportError::Share { path, .. } | ExportError::Open { path, .. } => Some(path.as_path()),
            ExportError::Spreadsheet(_) | ExportError::Write { .. } => None,
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;
