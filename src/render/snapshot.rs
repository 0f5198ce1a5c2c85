//! Canonical structured-data snapshot of a project record.
//!
//! The snapshot works from the form record and the raw report text; it never
//! looks at the parsed blocks.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{FontSizes, ProjectRecord};

/// Snapshot schema version.
pub const SNAPSHOT_VERSION: &str = "1.0";

/// Generator name stamped into every snapshot.
pub const SNAPSHOT_GENERATOR: &str = "PRD Generator";

/// Number of entries in the chart palette.
pub const CHART_PALETTE_LEN: usize = 5;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a snapshot to JSON.
pub fn to_json(snapshot: &Snapshot, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(snapshot)?,
        JsonFormat::Compact => serde_json::to_string(snapshot)?,
    };
    Ok(json)
}

/// Build a snapshot stamped with the current time.
pub fn build_snapshot(record: &ProjectRecord, text: &str) -> Snapshot {
    SnapshotBuilder::new().build(record, text)
}

/// Canonical snapshot. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub metadata: SnapshotMetadata,
    pub project: ProjectSection,
    pub requirements: RequirementsSection,
    pub target_audience: AudienceSection,
    pub technical: TechnicalSection,
    pub design: DesignSection,
    pub timeline: TimelineSection,
    pub prd: PrdSection,
}

/// `metadata`: provenance of the snapshot itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    /// RFC 3339 UTC with milliseconds
    pub exported_at: String,
    /// Schema version, [`SNAPSHOT_VERSION`]
    pub version: String,
    /// Always [`SNAPSHOT_GENERATOR`]
    pub generator: String,
    /// Producing crate and version
    pub framework: String,
}

/// `project`: identity fields from the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSection {
    /// From `appName`
    pub name: String,
    /// From `appIdea`
    pub idea: String,
    pub platform: String,
    /// Serialized as `type`
    #[serde(rename = "type")]
    pub app_type: String,
    pub due_date: String,
}

/// `requirements`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementsSection {
    pub problem_statement: String,
    pub goal: String,
    pub out_of_scope: String,
}

/// `targetAudience`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceSection {
    pub demography: String,
    pub geography: String,
}

/// `technical`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSection {
    pub app_structure: String,
    pub tech_stack: String,
    pub competitors: String,
}

/// `design`: colors, type, images and charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSection {
    pub colors: ColorSection,
    pub typography: TypographySection,
    pub images: ImageSection,
    pub charts: ChartSection,
}

/// `design.colors`, copied verbatim from the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSection {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    /// Always exactly [`CHART_PALETTE_LEN`] entries
    pub chart: Vec<String>,
}

/// `design.typography`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographySection {
    pub primary_font: String,
    pub headings_font: String,
    /// Every key present, empty when unset
    pub sizes: FontSizes,
}

/// `design.images`; keys drop the record's `image` prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSection {
    pub border_radius: String,
    pub aspect_ratio: String,
    pub quality: String,
    pub guidelines: String,
}

/// `design.charts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSection {
    pub guidelines: String,
}

/// `timeline`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSection {
    pub milestones: String,
    pub team: String,
}

/// `prd`: the report text itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrdSection {
    /// Raw report text, unparsed
    pub content: String,
    /// When the report was generated; defaults to the export time
    pub generated_at: String,
}

/// Builds snapshots, optionally with fixed timestamps.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    exported_at: Option<DateTime<Utc>>,
    generated_at: Option<DateTime<Utc>>,
}

impl SnapshotBuilder {
    /// Builder that stamps the current time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the export timestamp.
    pub fn exported_at(mut self, at: DateTime<Utc>) -> Self {
        self.exported_at = Some(at);
        self
    }

    /// Fix the report generation timestamp.
    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Map a record and report text onto the snapshot schema.
    pub fn build(&self, record: &ProjectRecord, text: &str) -> Snapshot {
        let now = Utc::now();
        let exported_at = self.exported_at.unwrap_or(now);
        let generated_at = self.generated_at.unwrap_or(exported_at);

        Snapshot {
            metadata: SnapshotMetadata {
                exported_at: timestamp(&exported_at),
                version: SNAPSHOT_VERSION.to_string(),
                generator: SNAPSHOT_GENERATOR.to_string(),
                framework: concat!("prd-export ", env!("CARGO_PKG_VERSION")).to_string(),
            },
            project: ProjectSection {
                name: record.app_name.clone(),
                idea: record.app_idea.clone(),
                platform: record.platform.clone(),
                app_type: record.app_type.clone(),
                due_date: record.due_date.clone(),
            },
            requirements: RequirementsSection {
                problem_statement: record.problem_statement.clone(),
                goal: record.goal.clone(),
                out_of_scope: record.out_of_scope.clone(),
            },
            target_audience: AudienceSection {
                demography: record.demography.clone(),
                geography: record.geography.clone(),
            },
            technical: TechnicalSection {
                app_structure: record.app_structure.clone(),
                tech_stack: record.tech_stack.clone(),
                competitors: record.competitors.clone(),
            },
            design: DesignSection {
                colors: ColorSection {
                    primary: record.primary_color.clone(),
                    secondary: record.secondary_color.clone(),
                    accent: record.accent_color.clone(),
                    chart: chart_palette(&record.chart_colors),
                },
                typography: TypographySection {
                    primary_font: record.primary_font.clone(),
                    headings_font: record.headings_font.clone(),
                    sizes: record.font_sizes.clone(),
                },
                images: ImageSection {
                    border_radius: record.image_border_radius.clone(),
                    aspect_ratio: record.image_aspect_ratio.clone(),
                    quality: record.image_quality.clone(),
                    guidelines: record.image_guidelines.clone(),
                },
                charts: ChartSection {
                    guidelines: record.chart_guidelines.clone(),
                },
            },
            timeline: TimelineSection {
                milestones: record.milestones.clone(),
                team: record.team.clone(),
            },
            prd: PrdSection {
                content: text.to_string(),
                generated_at: timestamp(&generated_at),
            },
        }
    }
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Pad with empty strings or truncate to exactly five entries.
fn chart_palette(colors: &[String]) -> Vec<String> {
    let mut chart: Vec<String> = colors.iter().take(CHART_PALETTE_LEN).cloned().collect();
    chart.resize(CHART_PALETTE_LEN, String::new());
    chart
}
