//! Document model types.
//!
//! This module defines the intermediate representation (IR) shared by the
//! paginated and flowed renderers, plus the caller-supplied records that
//! travel alongside it: export metadata and the upstream project form.

mod block;
mod metadata;
mod record;

pub use block::{Block, Document, DocumentStats};
pub use metadata::{Metadata, DEFAULT_APP_NAME};
pub use record::{FontSizes, ProjectRecord};
