//! Export formats and the download filename contract.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::DEFAULT_APP_NAME;

/// Closed set of export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Fixed-layout paginated document
    Pdf,
    /// Flowed word-processor document
    Docx,
    /// Canonical structured-data snapshot
    Json,
    /// Raw report text
    Text,
}

impl ExportFormat {
    /// Every format, in export order.
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Pdf,
        ExportFormat::Docx,
        ExportFormat::Json,
        ExportFormat::Text,
    ];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Json => "json",
            ExportFormat::Text => "text",
        }
    }

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Json => "application/json",
            ExportFormat::Text => "text/plain",
        }
    }

    /// Middle filename segment: `PRD` for documents, `data` for the snapshot.
    pub fn artifact_kind(&self) -> &'static str {
        match self {
            ExportFormat::Json => "data",
            _ => "PRD",
        }
    }

    /// Detect a format from a file extension (case-insensitive, no dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.extension() == ext)
    }

    /// `{app}-{kind}-{timestamp}.{ext}` with the app name sanitized.
    pub fn build_filename(&self, app_name: &str, timestamp_millis: i64) -> String {
        format!(
            "{}-{}-{}.{}",
            sanitize_app_name(app_name),
            self.artifact_kind(),
            timestamp_millis,
            self.extension()
        )
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" | "paginated" => Ok(ExportFormat::Pdf),
            "docx" | "flowed" | "word" => Ok(ExportFormat::Docx),
            "json" | "snapshot" => Ok(ExportFormat::Json),
            "txt" | "text" | "raw" => Ok(ExportFormat::Text),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Make an app name safe for a filename.
///
/// Whitespace runs become `-`; anything other than alphanumerics, `-`, `_`
/// and `.` is dropped. An empty result falls back to `PRD`.
pub fn sanitize_app_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_space = false;

    for c in name.trim().chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
            out.push(c);
        }
    }

    if out.is_empty() {
        DEFAULT_APP_NAME.to_string()
    } else {
        out
    }
}
