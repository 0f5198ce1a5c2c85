//! Error types for prd-export library.

use std::io;
use thiserror::Error;

/// Result type alias for prd-export operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering or exporting a document.
///
/// Parsing and inline stripping have no error path; everything here
/// originates in a rendering backend or in the export dispatcher.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when writing output buffers.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The requested export format is not one of the known formats.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// The format is known but no renderer is registered for it.
    #[error("No renderer registered for format: {0}")]
    RendererMissing(String),

    /// A color value could not be parsed as `#RRGGBB` or `#RGB`.
    #[error("Invalid color value: {0:?}")]
    InvalidColor(String),

    /// Page geometry or layout computation failed.
    #[error("Layout error: {0}")]
    Layout(String),

    /// Error building or serializing the PDF object tree.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Error during rendering (PDF, DOCX, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Error writing the DOCX zip container.
    #[error("Zip error: {0}")]
    Zip(String),

    /// Error writing WordprocessingML.
    #[error("XML error: {0}")]
    Xml(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Zip(err.to_string()),
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::Pdf(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedFormat("rtf".to_string());
        assert_eq!(err.to_string(), "Unsupported export format: rtf");

        let err = Error::InvalidColor("#12".to_string());
        assert_eq!(err.to_string(), "Invalid color value: \"#12\"");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::WriteZero, "buffer full");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
