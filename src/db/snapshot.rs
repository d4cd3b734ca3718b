// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Versioned encoding of the persisted workout list.
//!
//! Current layout: `{"version": 1, "workouts": [...]}`.
//!
//! A bare JSON array is the unversioned layout written by the browser build
//! (camelCase keys, `coords` pair, `type` discriminant, misspelled
//! `desciption`/`cadance`). It is read as version 0 and upgraded on the next
//! write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::StorageError;
use crate::models::{Coordinates, Workout, WorkoutDetails, WorkoutId};

/// Version tag written by `encode`.
pub const SNAPSHOT_VERSION: u64 = 1;

#[derive(Serialize)]
struct SnapshotOut<'a> {
    version: u64,
    workouts: &'a [Workout],
}

/// Serialize the full workout list.
///
/// Output is deterministic: encoding the same list twice yields identical text.
pub fn encode(workouts: &[Workout]) -> Result<String, StorageError> {
    serde_json::to_string(&SnapshotOut {
        version: SNAPSHOT_VERSION,
        workouts,
    })
    .map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Parse a persisted blob in either the current or the legacy layout.
pub fn decode(data: &str) -> Result<Vec<Workout>, StorageError> {
    let value: Value =
        serde_json::from_str(data).map_err(|e| StorageError::Corrupt(e.to_string()))?;

    match value {
        Value::Array(_) => {
            let legacy: Vec<LegacyWorkout> =
                serde_json::from_value(value).map_err(|e| StorageError::Corrupt(e.to_string()))?;
            tracing::info!(count = legacy.len(), "Upgrading unversioned workout list");
            Ok(legacy.into_iter().map(Workout::from).collect())
        }
        Value::Object(mut map) => {
            let version = map
                .get("version")
                .and_then(Value::as_u64)
                .ok_or_else(|| StorageError::Corrupt("missing version tag".to_string()))?;
            if version != SNAPSHOT_VERSION {
                return Err(StorageError::UnsupportedVersion(version));
            }
            let workouts = map.remove("workouts").unwrap_or(Value::Array(Vec::new()));
            serde_json::from_value(workouts).map_err(|e| StorageError::Corrupt(e.to_string()))
        }
        other => Err(StorageError::Corrupt(format!(
            "expected array or object, found {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Record as written by the unversioned browser build.
#[derive(Debug, Deserialize)]
struct LegacyWorkout {
    id: String,
    date: DateTime<Utc>,
    coords: (f64, f64),
    distance: f64,
    duration: f64,
    #[serde(rename = "desciption")]
    description: String,
    #[serde(default)]
    clicks: u32,
    #[serde(flatten)]
    details: LegacyDetails,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum LegacyDetails {
    Running {
        #[serde(rename = "cadance")]
        cadence: f64,
        pace: f64,
    },
    Cycling {
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        speed: f64,
    },
}

impl From<LegacyWorkout> for Workout {
    fn from(old: LegacyWorkout) -> Self {
        let details = match old.details {
            LegacyDetails::Running { cadence, pace } => WorkoutDetails::Running {
                cadence_spm: cadence,
                pace_min_per_km: pace,
            },
            LegacyDetails::Cycling {
                elevation_gain,
                speed,
            } => WorkoutDetails::Cycling {
                elevation_gain_m: elevation_gain,
                speed_km_per_h: speed,
            },
        };
        Workout::from_stored(
            WorkoutId::new(old.id),
            old.date,
            Coordinates::new(old.coords.0, old.coords.1),
            old.distance,
            old.duration,
            old.description,
            old.clicks,
            details,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkoutKind;
    use chrono::TimeZone;

    fn sample() -> Vec<Workout> {
        let at = Utc.with_ymd_and_hms(2026, 4, 7, 9, 0, 0).unwrap();
        vec![
            Workout::running(
                WorkoutId::new("0000000001"),
                at,
                Coordinates::new(51.5, -0.12),
                5.0,
                25.0,
                180.0,
            ),
            Workout::cycling(
                WorkoutId::new("0000000002"),
                at,
                Coordinates::new(48.85, 2.35),
                27.0,
                95.0,
                0.0,
            ),
        ]
    }

    #[test]
    fn test_encode_writes_version_tag() {
        let encoded = encode(&sample()).unwrap();
        let value: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["workouts"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_decode_current_layout() {
        let workouts = sample();
        let decoded = decode(&encode(&workouts).unwrap()).unwrap();
        assert_eq!(decoded, workouts);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let workouts = sample();
        assert_eq!(encode(&workouts).unwrap(), encode(&workouts).unwrap());
    }

    #[test]
    fn test_decode_unknown_version() {
        let err = decode(r#"{"version": 7, "workouts": []}"#).unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedVersion(7)));
    }

    #[test]
    fn test_decode_missing_version() {
        let err = decode(r#"{"workouts": []}"#).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[test]
    fn test_decode_rejects_scalars() {
        assert!(matches!(decode("null"), Err(StorageError::Corrupt(_))));
        assert!(matches!(decode("42"), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_decode_legacy_browser_layout() {
        let legacy = r#"[
            {"date":"2024-04-07T10:00:00.000Z","id":"2484000123","clicks":0,
             "coords":[51.5,-0.12],"distance":5,"duration":25,"type":"running",
             "cadance":180,"pace":5,"desciption":"Running on April 7"},
            {"date":"2024-04-08T10:00:00.000Z","id":"2484000456","clicks":2,
             "coords":[48.85,2.35],"distance":30,"duration":90,"type":"cycling",
             "elevationGain":-4,"speed":20,"desciption":"Cycling on April 8"}
        ]"#;
        let decoded = decode(legacy).unwrap();
        assert_eq!(decoded.len(), 2);

        assert_eq!(decoded[0].id().as_str(), "2484000123");
        assert_eq!(decoded[0].kind(), WorkoutKind::Running);
        assert_eq!(decoded[0].pace_min_per_km(), Some(5.0));
        assert_eq!(decoded[0].description(), "Running on April 7");
        assert_eq!(decoded[0].coordinates(), Coordinates::new(51.5, -0.12));

        assert_eq!(decoded[1].kind(), WorkoutKind::Cycling);
        assert_eq!(decoded[1].interaction_count(), 2);
        assert_eq!(
            decoded[1].details(),
            &WorkoutDetails::Cycling {
                elevation_gain_m: -4.0,
                speed_km_per_h: 20.0
            }
        );
    }
}
