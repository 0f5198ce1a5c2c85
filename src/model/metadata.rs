//! Export metadata supplied by the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// App name used when the caller leaves it blank.
pub const DEFAULT_APP_NAME: &str = "PRD";

/// Metadata used for cover, banner and footer text.
///
/// Never block-classified; it travels beside the parsed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    /// Application name
    pub app_name: String,

    /// Version string
    pub version: String,

    /// Generation timestamp
    pub generated_at: DateTime<Utc>,

    /// Overrides the palette's primary color (`#RRGGBB`)
    pub accent_color: Option<String>,

    /// Additional fields shown on the cover
    pub extra: BTreeMap<String, String>,
}

impl Metadata {
    /// Create metadata for an app, stamped with the current time.
    pub fn new(app_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    /// Set the generation timestamp.
    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self
    }

    /// Set the accent color.
    pub fn with_accent_color(mut self, color: impl Into<String>) -> Self {
        self.accent_color = Some(color.into());
        self
    }

    /// Add an extra cover field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// App name, or [`DEFAULT_APP_NAME`] when blank.
    pub fn display_name(&self) -> &str {
        let name = self.app_name.trim();
        if name.is_empty() {
            DEFAULT_APP_NAME
        } else {
            name
        }
    }

    /// Accent color, or `None` when unset or blank.
    pub fn accent(&self) -> Option<&str> {
        self.accent_color
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// `"{app} v{version}"`, or just the app name without a version.
    pub fn subtitle(&self) -> String {
        let version = self.version.trim();
        if version.is_empty() {
            self.display_name().to_string()
        } else {
            format!("{} v{}", self.display_name(), version.trim_start_matches('v'))
        }
    }

    /// Generation date formatted for display.
    pub fn generated_date(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M UTC").to_string()
    }

    /// Extra fields as `key: value` strings, in key order.
    pub fn extra_lines(&self) -> Vec<String> {
        self.extra
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| format!("{}: {}", k, v.trim()))
            .collect()
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            version: String::new(),
            generated_at: Utc::now(),
            accent_color: None,
            extra: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_default() {
        assert_eq!(Metadata::default().display_name(), "PRD");
        assert_eq!(Metadata::new("  ", "1").display_name(), "PRD");
        assert_eq!(Metadata::new("TaskFlow", "1").display_name(), "TaskFlow");
    }

    #[test]
    fn test_blank_accent_is_unset() {
        assert_eq!(Metadata::default().accent(), None);
        assert_eq!(Metadata::default().with_accent_color("").accent(), None);
        assert_eq!(Metadata::default().with_accent_color("   ").accent(), None);
        assert_eq!(
            Metadata::default().with_accent_color(" #F59E0B ").accent(),
            Some("#F59E0B")
        );
    }

    #[test]
    fn test_subtitle() {
        assert_eq!(Metadata::new("TaskFlow", "1.2.0").subtitle(), "TaskFlow v1.2.0");
        assert_eq!(Metadata::new("TaskFlow", "v2").subtitle(), "TaskFlow v2");
        assert_eq!(Metadata::new("TaskFlow", "").subtitle(), "TaskFlow");
    }

    #[test]
    fn test_extra_lines_skip_blank_values() {
        let meta = Metadata::new("A", "1")
            .with_field("Owner", "Dana")
            .with_field("Status", " ");
        assert_eq!(meta.extra_lines(), vec!["Owner: Dana".to_string()]);
    }

    #[test]
    fn test_deserialize_partial() {
        let meta: Metadata = serde_json::from_str(r#"{"appName":"Notes"}"#).unwrap();
        assert_eq!(meta.app_name, "Notes");
        assert!(meta.version.is_empty());
        assert!(meta.extra.is_empty());
    }
}
