//! Upstream project form record.

use serde::{Deserialize, Serialize};

/// The full form state collected before a report is generated.
///
/// Every field defaults, so partially filled forms deserialize cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Application name; also the default for file names and the cover
    pub app_name: String,
    /// One-paragraph pitch
    pub app_idea: String,
    /// Target platform (iOS, Web, ...)
    pub platform: String,
    /// Product category
    pub app_type: String,
    /// Free-form due date as typed
    pub due_date: String,

    pub problem_statement: String,
    pub goal: String,
    pub out_of_scope: String,

    /// Target users
    pub demography: String,
    /// Target regions
    pub geography: String,

    /// Navigation and screen outline
    pub app_structure: String,
    pub tech_stack: String,
    pub competitors: String,

    /// Brand colors as entered; not validated here
    pub primary_color: String,
    pub secondary_color: String,
    /// Empty when unset, like every other text field
    pub accent_color: String,
    /// Chart palette; any length is accepted
    pub chart_colors: Vec<String>,

    pub primary_font: String,
    pub headings_font: String,
    pub font_sizes: FontSizes,

    /// CSS length, e.g. `8px`
    pub image_border_radius: String,
    /// Ratio such as `16:9`
    pub image_aspect_ratio: String,
    pub image_quality: String,
    pub image_guidelines: String,

    pub chart_guidelines: String,

    pub milestones: String,
    /// Team composition
    pub team: String,
}

impl ProjectRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a record from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Type scale, as entered in the design step.
///
/// Values are CSS lengths kept verbatim (`"32px"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub h1: String,
    pub h2: String,
    pub h3: String,
    pub h4: String,
    pub h5: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_record() {
        let record = ProjectRecord::from_json(
            r##"{"appName":"TaskFlow","chartColors":["#111111"],"fontSizes":{"h1":"32px"}}"##,
        )
        .unwrap();

        assert_eq!(record.app_name, "TaskFlow");
        assert_eq!(record.chart_colors, vec!["#111111".to_string()]);
        assert_eq!(record.font_sizes.h1, "32px");
        assert!(record.font_sizes.body.is_empty());
        assert!(record.milestones.is_empty());
    }

    #[test]
    fn test_empty_object() {
        let record = ProjectRecord::from_json("{}").unwrap();
        assert_eq!(record, ProjectRecord::new());
    }
}
