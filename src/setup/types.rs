// Core data structures for suspension setups

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::SagbookError;

/// Quick-pick feedback tags offered next to the free-text notes
pub const PRESET_TAGS: [&str; 9] = [
    "Front deflects",
    "Rear kicks",
    "Too soft",
    "Too harsh",
    "Perfect",
    "Bottoms out",
    "Unpredictable",
    "Stable",
    "Balanced",
];

/// Ordered list of setups, newest first
pub type SetupCollection = Vec<SetupRecord>;

/// Ground condition of the track during the session
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TrackCondition {
    #[default]
    Loamy,
    #[serde(rename = "Hard-Pack")]
    HardPack,
    Sandy,
    Muddy,
    Mixed,
}

impl TrackCondition {
    pub const ALL: [TrackCondition; 5] = [
        TrackCondition::Loamy,
        TrackCondition::HardPack,
        TrackCondition::Sandy,
        TrackCondition::Muddy,
        TrackCondition::Mixed,
    ];

    /// Label used on disk and in the UI
    pub fn label(&self) -> &'static str {
        match self {
            TrackCondition::Loamy => "Loamy",
            TrackCondition::HardPack => "Hard-Pack",
            TrackCondition::Sandy => "Sandy",
            TrackCondition::Muddy => "Muddy",
            TrackCondition::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for TrackCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TrackCondition {
    type Err = SagbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|condition| condition.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SagbookError::UnknownCondition {
                value: s.to_string(),
            })
    }
}

/// Non-negative measurements shared by drafts and records, keyed by wire name
macro_rules! measurements {
    ($setup:expr) => {
        [
            ("frontSag", $setup.front_sag),
            ("frontTirePressure", $setup.front_tire_pressure),
            ("rearHighSpeedCompression", $setup.rear_high_speed_compression),
            ("rearSag", $setup.rear_sag),
            ("rearTirePressure", $setup.rear_tire_pressure),
        ]
    };
}

/// Form input for a new setup, before it gets an id and a timestamp
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetupDraft {
    pub track_name: String,
    pub conditions: TrackCondition,
    #[serde(default)]
    pub weather: Option<String>,
    /// Front compression damping, in clicks
    pub front_compression: u32,
    /// Front rebound damping, in clicks
    pub front_rebound: u32,
    /// Front sag, in mm
    pub front_sag: f64,
    /// Front tire pressure, in bar
    pub front_tire_pressure: f64,
    /// Rear high-speed compression, in turns
    pub rear_high_speed_compression: f64,
    /// Rear low-speed compression, in clicks
    pub rear_low_speed_compression: u32,
    /// Rear rebound damping, in clicks
    pub rear_rebound: u32,
    /// Rear sag, in mm
    pub rear_sag: f64,
    /// Rear tire pressure, in bar
    pub rear_tire_pressure: f64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Default for SetupDraft {
    fn default() -> Self {
        Self {
            track_name: String::new(),
            conditions: TrackCondition::Loamy,
            weather: None,
            front_compression: 10,
            front_rebound: 10,
            front_sag: 100.0,
            front_tire_pressure: 0.9,
            rear_high_speed_compression: 1.25,
            rear_low_speed_compression: 10,
            rear_rebound: 10,
            rear_sag: 105.0,
            rear_tire_pressure: 0.83,
            notes: String::new(),
            tags: Vec::new(),
        }
    }
}

impl SetupDraft {
    /// Create a draft with default suspension values for the given track
    pub fn new(track_name: impl Into<String>, conditions: TrackCondition) -> Self {
        Self {
            track_name: track_name.into(),
            conditions,
            ..Default::default()
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_weather(mut self, weather: impl Into<String>) -> Self {
        self.weather = Some(weather.into());
        self
    }

    /// Check the fields a setup must satisfy before it can be stored
    pub fn validate(&self) -> Result<(), SagbookError> {
        validate_fields(&self.track_name, measurements!(self))
    }
}

/// One stored snapshot of a suspension configuration.
///
/// `id` and `created_at` are fixed at creation. The store never changes a
/// stored record; the public fields are there for reading, and editing one
/// only changes that copy, never the stored history.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetupRecord {
    id: Uuid,
    #[serde(alias = "date")]
    created_at: DateTime<Utc>,
    pub track_name: String,
    pub conditions: TrackCondition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    pub front_compression: u32,
    pub front_rebound: u32,
    pub front_sag: f64,
    pub front_tire_pressure: f64,
    pub rear_high_speed_compression: f64,
    pub rear_low_speed_compression: u32,
    pub rear_rebound: u32,
    pub rear_sag: f64,
    pub rear_tire_pressure: f64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SetupRecord {
    /// Turn a submitted draft into a record with a fresh id and the current time
    pub fn create(draft: SetupDraft) -> Result<Self, SagbookError> {
        Self::with_identity(Uuid::new_v4(), Utc::now(), draft)
    }

    /// Build a record with a known id and creation time
    pub fn with_identity(
        id: Uuid,
        created_at: DateTime<Utc>,
        draft: SetupDraft,
    ) -> Result<Self, SagbookError> {
        draft.validate()?;

        let SetupDraft {
            track_name,
            conditions,
            weather,
            front_compression,
            front_rebound,
            front_sag,
            front_tire_pressure,
            rear_high_speed_compression,
            rear_low_speed_compression,
            rear_rebound,
            rear_sag,
            rear_tire_pressure,
            notes,
            tags,
        } = draft;

        Ok(Self {
            id,
            created_at,
            track_name: track_name.trim().to_string(),
            conditions,
            weather: weather
                .map(|w| w.trim().to_string())
                .filter(|w| !w.is_empty()),
            front_compression,
            front_rebound,
            front_sag,
            front_tire_pressure,
            rear_high_speed_compression,
            rear_low_speed_compression,
            rear_rebound,
            rear_sag,
            rear_tire_pressure,
            notes,
            tags: tags
                .into_iter()
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Re-check a record read back from storage
    pub fn validate(&self) -> Result<(), SagbookError> {
        validate_fields(&self.track_name, measurements!(self))
    }
}

fn validate_fields(track_name: &str, measurements: [(&str, f64); 5]) -> Result<(), SagbookError> {
    if track_name.trim().is_empty() {
        return Err(SagbookError::InvalidField {
            field: "trackName".to_string(),
            reason: "track name cannot be empty".to_string(),
        });
    }

    for (field, value) in measurements {
        if !value.is_finite() {
            return Err(SagbookError::InvalidField {
                field: field.to_string(),
                reason: format!("expected a finite number, got {}", value),
            });
        }
        if value < 0.0 {
            return Err(SagbookError::InvalidField {
                field: field.to_string(),
                reason: format!("must not be negative, got {}", value),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults_match_form() {
        let draft = SetupDraft::default();
        assert_eq!(draft.conditions, TrackCondition::Loamy);
        assert_eq!(draft.front_compression, 10);
        assert_eq!(draft.front_sag, 100.0);
        assert_eq!(draft.rear_high_speed_compression, 1.25);
        assert_eq!(draft.rear_sag, 105.0);
        assert_eq!(draft.rear_tire_pressure, 0.83);
        assert!(draft.tags.is_empty());
    }

    #[test]
    fn test_preset_tags_pass_through_create() {
        let mut draft = SetupDraft::new("Hangtown", TrackCondition::Loamy);
        draft.tags = PRESET_TAGS.iter().map(|t| t.to_string()).collect();
        let record = SetupRecord::create(draft).unwrap();

        assert_eq!(record.tags, PRESET_TAGS);
    }

    #[test]
    fn test_create_assigns_identity() {
        let before = Utc::now();
        let first = SetupRecord::create(SetupDraft::new("RedBud", TrackCondition::Muddy)).unwrap();
        let second =
            SetupRecord::create(SetupDraft::new("RedBud", TrackCondition::Muddy)).unwrap();

        assert_ne!(first.id(), second.id());
        assert!(first.created_at() >= before);
        assert!(first.created_at() <= Utc::now());
    }

    #[test]
    fn test_create_normalizes_text_fields() {
        let draft = SetupDraft::new("  Glen Helen ", TrackCondition::HardPack)
            .with_weather("   ")
            .with_tag("Stable")
            .with_tag(" ")
            .with_tag(" Stable ");
        let record = SetupRecord::create(draft).unwrap();

        assert_eq!(record.track_name, "Glen Helen");
        assert_eq!(record.weather, None);
        assert_eq!(record.tags, vec!["Stable", "Stable"]);
    }

    #[test]
    fn test_empty_track_name_rejected() {
        let err = SetupRecord::create(SetupDraft::new("   ", TrackCondition::Sandy)).unwrap_err();
        match err {
            SagbookError::InvalidField { field, .. } => assert_eq!(field, "trackName"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_measurement_names_field() {
        let mut draft = SetupDraft::new("Millville", TrackCondition::Mixed);
        draft.rear_sag = -3.0;
        let err = SetupRecord::create(draft).unwrap_err();
        match err {
            SagbookError::InvalidField { field, reason } => {
                assert_eq!(field, "rearSag");
                assert!(reason.contains("negative"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_measurement_rejected() {
        let mut draft = SetupDraft::new("Millville", TrackCondition::Mixed);
        draft.front_tire_pressure = f64::NAN;
        assert!(matches!(
            draft.validate(),
            Err(SagbookError::InvalidField { field, .. }) if field == "frontTirePressure"
        ));
    }

    #[test]
    fn test_draft_and_record_check_same_measurements() {
        let draft_json = serde_json::to_value(SetupDraft::new("Millville", TrackCondition::Mixed)).unwrap();
        let record_json = serde_json::to_value(
            SetupRecord::create(SetupDraft::new("Millville", TrackCondition::Mixed)).unwrap(),
        )
        .unwrap();

        for field in [
            "frontSag",
            "frontTirePressure",
            "rearHighSpeedCompression",
            "rearSag",
            "rearTirePressure",
        ] {
            let mut bad_draft = draft_json.clone();
            bad_draft[field] = serde_json::json!(-1.0);
            let mut bad_record = record_json.clone();
            bad_record[field] = serde_json::json!(-1.0);

            let draft: SetupDraft = serde_json::from_value(bad_draft).unwrap();
            let stored: SetupRecord = serde_json::from_value(bad_record).unwrap();
            for err in [draft.validate().unwrap_err(), stored.validate().unwrap_err()] {
                match err {
                    SagbookError::InvalidField { field: reported, .. } => assert_eq!(reported, field),
                    other => panic!("unexpected error: {other}"),
                }
            }
        }
    }

    #[test]
    fn test_condition_parsing() {
        assert_eq!("hard-pack".parse::<TrackCondition>().unwrap(), TrackCondition::HardPack);
        assert_eq!(" MUDDY ".parse::<TrackCondition>().unwrap(), TrackCondition::Muddy);
        assert!(matches!(
            "icy".parse::<TrackCondition>(),
            Err(SagbookError::UnknownCondition { .. })
        ));
        for condition in TrackCondition::ALL {
            assert_eq!(condition.label().parse::<TrackCondition>().unwrap(), condition);
        }
    }

    #[test]
    fn test_record_wire_format() {
        let record = SetupRecord::create(
            SetupDraft::new("Loretta Lynn's", TrackCondition::HardPack).with_notes("rutted"),
        )
        .unwrap();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["trackName"], "Loretta Lynn's");
        assert_eq!(value["conditions"], "Hard-Pack");
        assert_eq!(value["rearHighSpeedCompression"], 1.25);
        assert!(value["createdAt"].is_string());
        assert!(value.get("weather").is_none());
    }

    #[test]
    fn test_legacy_date_key_accepted() {
        let json = r#"{
            "id": "6f1c2a8e-3d4b-4c5a-9e7f-0a1b2c3d4e5f",
            "date": "2024-05-11T14:03:00.000Z",
            "trackName": "Budds Creek",
            "conditions": "Sandy",
            "weather": "",
            "frontCompression": 12,
            "frontRebound": 11,
            "frontSag": 100,
            "rearHighSpeedCompression": 1.5,
            "rearLowSpeedCompression": 9,
            "rearRebound": 10,
            "rearSag": 104,
            "frontTirePressure": 0.9,
            "rearTirePressure": 0.85,
            "notes": "",
            "tags": ["Stable"]
        }"#;
        let record: SetupRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.conditions, TrackCondition::Sandy);
        assert_eq!(record.created_at().to_rfc3339(), "2024-05-11T14:03:00+00:00");
        assert!(record.validate().is_ok());
    }
}
