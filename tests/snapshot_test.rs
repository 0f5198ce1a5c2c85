//! Integration tests for the canonical snapshot schema.

use chrono::{DateTime, Utc};
use serde_json::Value;

use prd_export::render::{to_json, JsonFormat, SnapshotBuilder, SNAPSHOT_GENERATOR};
use prd_export::ProjectRecord;

const FULL_RECORD: &str = r##"{
    "appName": "TaskFlow",
    "appIdea": "Shared task lists",
    "platform": "iOS",
    "appType": "Productivity",
    "dueDate": "2024-09-01",
    "problemStatement": "Teams lose track of chores",
    "goal": "One list everyone trusts",
    "outOfScope": "Billing",
    "demography": "Families",
    "geography": "EU",
    "appStructure": "Tabs",
    "techStack": "Swift",
    "competitors": "Todoist",
    "primaryColor": "#2563EB",
    "secondaryColor": "#1E40AF",
    "accentColor": "#F59E0B",
    "chartColors": ["#1", "#2", "#3", "#4", "#5", "#6", "#7"],
    "primaryFont": "Inter",
    "headingsFont": "Poppins",
    "fontSizes": {"h1": "32px", "h2": "24px", "h3": "20px", "h4": "18px", "h5": "16px", "body": "14px"},
    "imageBorderRadius": "8px",
    "imageAspectRatio": "16:9",
    "imageQuality": "high",
    "imageGuidelines": "No stock photos",
    "chartGuidelines": "Label every axis",
    "milestones": "Beta in June",
    "team": "Three engineers"
}"##;

fn fixed() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-06-01T08:30:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn snapshot_value(record: &ProjectRecord, text: &str) -> Value {
    let snapshot = SnapshotBuilder::new()
        .exported_at(fixed())
        .build(record, text);
    serde_json::from_str(&to_json(&snapshot, JsonFormat::Pretty).unwrap()).unwrap()
}

#[test]
fn test_full_record_mapping() {
    let record = ProjectRecord::from_json(FULL_RECORD).unwrap();
    let v = snapshot_value(&record, "# Report\nBody");

    assert_eq!(v["metadata"]["exportedAt"], "2024-06-01T08:30:00.000Z");
    assert_eq!(v["metadata"]["generator"], SNAPSHOT_GENERATOR);
    assert_eq!(v["project"]["name"], "TaskFlow");
    assert_eq!(v["project"]["type"], "Productivity");
    assert_eq!(v["project"]["dueDate"], "2024-09-01");
    assert_eq!(v["requirements"]["outOfScope"], "Billing");
    assert_eq!(v["targetAudience"]["geography"], "EU");
    assert_eq!(v["technical"]["techStack"], "Swift");
    assert_eq!(v["design"]["colors"]["accent"], "#F59E0B");
    assert_eq!(
        v["design"]["colors"]["chart"],
        serde_json::json!(["#1", "#2", "#3", "#4", "#5"])
    );
    assert_eq!(v["design"]["typography"]["headingsFont"], "Poppins");
    assert_eq!(v["design"]["typography"]["sizes"]["h5"], "16px");
    assert_eq!(v["design"]["images"]["aspectRatio"], "16:9");
    assert_eq!(v["design"]["charts"]["guidelines"], "Label every axis");
    assert_eq!(v["timeline"]["team"], "Three engineers");
    assert_eq!(v["prd"]["content"], "# Report\nBody");
    assert_eq!(v["prd"]["generatedAt"], "2024-06-01T08:30:00.000Z");
}

#[test]
fn test_empty_record_has_every_key() {
    let v = snapshot_value(&ProjectRecord::default(), "");

    for section in [
        "metadata",
        "project",
        "requirements",
        "targetAudience",
        "technical",
        "design",
        "timeline",
        "prd",
    ] {
        assert!(v[section].is_object(), "missing section {}", section);
    }

    for (section, key) in [
        ("project", "name"),
        ("project", "idea"),
        ("project", "platform"),
        ("requirements", "problemStatement"),
        ("targetAudience", "demography"),
        ("technical", "competitors"),
        ("timeline", "milestones"),
    ] {
        assert_eq!(v[section][key], "", "{}.{}", section, key);
    }

    assert_eq!(v["design"]["colors"]["chart"], serde_json::json!(["", "", "", "", ""]));
    assert_eq!(v["design"]["typography"]["sizes"]["body"], "");
}

#[test]
fn test_chart_padding_from_partial_record() {
    let record = ProjectRecord::from_json(r##"{"chartColors":["#AAA"]}"##).unwrap();
    let v = snapshot_value(&record, "");
    assert_eq!(
        v["design"]["colors"]["chart"],
        serde_json::json!(["#AAA", "", "", "", ""])
    );
}

#[test]
fn test_generated_at_can_differ() {
    let generated = DateTime::parse_from_rfc3339("2024-05-30T10:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    let snapshot = SnapshotBuilder::new()
        .exported_at(fixed())
        .generated_at(generated)
        .build(&ProjectRecord::default(), "");

    assert_eq!(snapshot.prd.generated_at, "2024-05-30T10:00:00.000Z");
    assert_eq!(snapshot.metadata.exported_at, "2024-06-01T08:30:00.000Z");
}

#[test]
fn test_snapshot_round_trips_through_json() {
    let record = ProjectRecord::from_json(FULL_RECORD).unwrap();
    let snapshot = SnapshotBuilder::new().exported_at(fixed()).build(&record, "x");
    let json = to_json(&snapshot, JsonFormat::Compact).unwrap();
    let back: prd_export::Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}
