//! Export orchestration with pluggable renderers.
//!
//! An [`Exporter`] resolves a format name, dispatches to the renderer
//! registered for it and wraps the outcome in an [`ExportResult`]. This is
//! the only place where errors and renderer panics become a value.
//!
//! # Example
//!
//! ```
//! use prd_export::export::{ExportRequest, Exporter};
//! use prd_export::Metadata;
//!
//! let exporter = Exporter::with_defaults();
//! let request = ExportRequest::new("# Overview\nA task tracker.", Metadata::new("TaskFlow", "1.0"));
//!
//! let result = exporter.export("docx", &request);
//! assert!(result.is_success());
//! ```

mod backends;
mod format;

pub use backends::{DocxBackend, PdfBackend, SnapshotBackend, TextBackend};
pub use format::{sanitize_app_name, ExportFormat};

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use chrono::Utc;
use rayon::prelude::*;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::model::{Metadata, ProjectRecord};
use crate::render::RenderOptions;

/// Everything a renderer needs for one export.
#[derive(Debug, Clone, Default)]
pub struct ExportRequest {
    /// Report text, one block per line
    pub text: String,

    /// Cover and footer metadata
    pub metadata: Metadata,

    /// Full form record, used by the snapshot
    pub record: ProjectRecord,
}

impl ExportRequest {
    /// Create a request with an empty project record.
    pub fn new(text: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            text: text.into(),
            metadata,
            record: ProjectRecord::default(),
        }
    }

    /// Attach the form record.
    pub fn with_record(mut self, record: ProjectRecord) -> Self {
        self.record = record;
        self
    }
}

/// A rendered file ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// `{app}-{kind}-{millis}.{ext}`
    pub filename: String,
    /// MIME type of `data`
    pub mime_type: &'static str,
    /// Rendered bytes
    pub data: Vec<u8>,
}

/// Outcome of one export call.
///
/// Failures carry the error message; nothing is raised past the exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportResult {
    /// Rendered file
    Success(ExportArtifact),
    /// Message of the error or panic that stopped the render
    Failure { error: String },
}

impl ExportResult {
    fn failure(error: impl ToString) -> Self {
        ExportResult::Failure {
            error: error.to_string(),
        }
    }

    /// Whether an artifact was produced.
    pub fn is_success(&self) -> bool {
        matches!(self, ExportResult::Success(_))
    }

    /// The artifact, if successful.
    pub fn artifact(&self) -> Option<&ExportArtifact> {
        match self {
            ExportResult::Success(artifact) => Some(artifact),
            ExportResult::Failure { .. } => None,
        }
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            ExportResult::Success(_) => None,
            ExportResult::Failure { error } => Some(error),
        }
    }

    /// Convert into a `Result`, with failures as [`Error::Other`].
    pub fn into_result(self) -> Result<ExportArtifact> {
        match self {
            ExportResult::Success(artifact) => Ok(artifact),
            ExportResult::Failure { error } => Err(Error::Other(error)),
        }
    }
}

impl Serialize for ExportResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ExportResult::Success(artifact) => {
                let mut state = serializer.serialize_struct("ExportResult", 3)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("filename", &artifact.filename)?;
                state.serialize_field("mimeType", artifact.mime_type)?;
                state.end()
            }
            ExportResult::Failure { error } => {
                let mut state = serializer.serialize_struct("ExportResult", 2)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
                state.end()
            }
        }
    }
}

/// A renderer for one export format.
///
/// Implement this trait to replace a built-in backend.
pub trait DocumentRenderer: Send + Sync {
    /// The format this renderer produces.
    fn format(&self) -> ExportFormat;

    /// Get the name of this renderer.
    fn name(&self) -> &str;

    /// Render the request to bytes.
    fn render(&self, request: &ExportRequest, options: &RenderOptions) -> Result<Vec<u8>>;
}

/// Registry mapping each format to its renderer.
pub struct RendererRegistry {
    renderers: HashMap<ExportFormat, Arc<dyn DocumentRenderer>>,
}

impl RendererRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Create a registry with the built-in renderers for every format.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfBackend::new()));
        registry.register(Arc::new(DocxBackend::new()));
        registry.register(Arc::new(SnapshotBackend::new()));
        registry.register(Arc::new(TextBackend::new()));
        registry
    }

    /// Register a renderer, replacing any previous one for its format.
    pub fn register(&mut self, renderer: Arc<dyn DocumentRenderer>) {
        self.renderers.insert(renderer.format(), renderer);
    }

    /// Renderer registered for a format.
    pub fn get(&self, format: ExportFormat) -> Option<Arc<dyn DocumentRenderer>> {
        self.renderers.get(&format).cloned()
    }

    /// Check if a renderer is registered for a format.
    pub fn supports(&self, format: ExportFormat) -> bool {
        self.renderers.contains_key(&format)
    }

    /// Registered formats in export order.
    pub fn formats(&self) -> Vec<ExportFormat> {
        ExportFormat::ALL
            .into_iter()
            .filter(|f| self.supports(*f))
            .collect()
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Dispatches export requests to registered renderers.
pub struct Exporter {
    registry: RendererRegistry,
    options: RenderOptions,
}

impl Exporter {
    /// Create an exporter over a registry and shared render options.
    pub fn new(registry: RendererRegistry, options: RenderOptions) -> Self {
        Self { registry, options }
    }

    /// Exporter with every built-in renderer and default options.
    pub fn with_defaults() -> Self {
        Self::new(RendererRegistry::with_defaults(), RenderOptions::default())
    }

    /// Replace the render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Renderer registry.
    pub fn registry(&self) -> &RendererRegistry {
        &self.registry
    }

    /// Mutable registry, for swapping renderers.
    pub fn registry_mut(&mut self) -> &mut RendererRegistry {
        &mut self.registry
    }

    /// Render options passed to every renderer.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Export by format name. Unknown names fail without invoking any
    /// renderer.
    pub fn export(&self, format_name: &str, request: &ExportRequest) -> ExportResult {
        match format_name.parse::<ExportFormat>() {
            Ok(format) => self.export_format(format, request),
            Err(e) => {
                log::warn!("Export rejected: {}", e);
                ExportResult::failure(e)
            }
        }
    }

    /// Export to a known format.
    pub fn export_format(&self, format: ExportFormat, request: &ExportRequest) -> ExportResult {
        let Some(renderer) = self.registry.get(format) else {
            let err = Error::RendererMissing(format.to_string());
            log::warn!("Export failed: {}", err);
            return ExportResult::failure(err);
        };

        log::debug!("Exporting {} with renderer '{}'", format, renderer.name());

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            renderer.render(request, &self.options)
        }));

        match outcome {
            Ok(Ok(data)) => {
                let filename =
                    format.build_filename(&request.metadata.app_name, Utc::now().timestamp_millis());
                log::debug!("Exported {} ({} bytes)", filename, data.len());
                ExportResult::Success(ExportArtifact {
                    filename,
                    mime_type: format.mime_type(),
                    data,
                })
            }
            Ok(Err(e)) => {
                log::warn!("Export to {} failed: {}", format, e);
                ExportResult::failure(e)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                log::warn!("Renderer '{}' panicked: {}", renderer.name(), message);
                ExportResult::failure(format!("Renderer '{}' panicked: {}", renderer.name(), message))
            }
        }
    }

    /// Export every registered format in parallel, results in format order.
    pub fn export_all(&self, request: &ExportRequest) -> Vec<(ExportFormat, ExportResult)> {
        self.registry
            .formats()
            .into_par_iter()
            .map(|format| (format, self.export_format(format, request)))
            .collect()
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Export report text with default options and an empty project record.
pub fn export_document(format_name: &str, text: &str, metadata: Metadata) -> ExportResult {
    Exporter::with_defaults().export(format_name, &ExportRequest::new(text, metadata))
}
