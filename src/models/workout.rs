// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout model: the record shared by memory, storage and the rendered list.
//!
//! A workout is immutable once built except for its interaction counter.
//! Derived metrics (pace, speed) and the description are computed exactly once
//! at construction; records read back from storage carry the stored values
//! verbatim.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::view::{MarkerPopup, ViewDetail, WorkoutView};
use crate::time_utils::format_utc_rfc3339;

/// Month names indexed by zero-based month number.
const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Ids are the trailing digits of the creation time in epoch milliseconds.
const ID_DIGITS_MODULUS: u64 = 10_000_000_000;

/// A (latitude, longitude) pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for geo::Point<f64> {
    /// Geo points are (x = longitude, y = latitude).
    fn from(c: Coordinates) -> Self {
        geo::Point::new(c.lng, c.lat)
    }
}

/// Stable identifier linking an in-memory record, its persisted copy and its
/// rendered list entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an id from a creation timestamp (last ten digits of epoch millis).
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        let millis = at.timestamp_millis().unsigned_abs() % ID_DIGITS_MODULUS;
        Self(format!("{:010}", millis))
    }

    /// The next id to try when this one is already taken.
    pub fn successor(&self) -> Self {
        match self.0.parse::<u64>() {
            Ok(n) => Self(format!("{:010}", (n + 1) % ID_DIGITS_MODULUS)),
            Err(_) => Self(format!("{}-1", self.0)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Workout variant discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions.
    pub fn label(self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific input and derived metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkoutDetails {
    Running {
        cadence_spm: f64,
        pace_min_per_km: f64,
    },
    Cycling {
        /// Not required to be positive.
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

/// A logged run or ride.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    description: String,
    #[serde(default)]
    interaction_count: u32,
    #[serde(flatten)]
    details: WorkoutDetails,
}

impl Workout {
    /// Build a running workout, computing pace (min/km) and description.
    ///
    /// Inputs are not validated here; see `services::validation`.
    pub fn running(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    ) -> Self {
        let details = WorkoutDetails::Running {
            cadence_spm,
            pace_min_per_km: duration_min / distance_km,
        };
        Self::build(id, created_at, coordinates, distance_km, duration_min, details)
    }

    /// Build a cycling workout, computing speed (km/h) and description.
    pub fn cycling(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Self {
        let details = WorkoutDetails::Cycling {
            elevation_gain_m,
            speed_km_per_h: distance_km / (duration_min / 60.0),
        };
        Self::build(id, created_at, coordinates, distance_km, duration_min, details)
    }

    fn build(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        details: WorkoutDetails,
    ) -> Self {
        let kind = match details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        };
        Self {
            id,
            created_at,
            coordinates,
            distance_km,
            duration_min,
            description: describe(kind, created_at),
            interaction_count: 0,
            details,
        }
    }

    /// Reassemble a workout from stored fields. Nothing is recomputed.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_stored(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        description: String,
        interaction_count: u32,
        details: WorkoutDetails,
    ) -> Self {
        Self {
            id,
            created_at,
            coordinates,
            distance_km,
            duration_min,
            description,
            interaction_count,
            details,
        }
    }

    /// Only used to repair duplicate ids in restored data.
    pub(crate) fn set_id(&mut self, id: WorkoutId) {
        self.id = id;
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn interaction_count(&self) -> u32 {
        self.interaction_count
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// Pace in min/km, for running workouts.
    pub fn pace_min_per_km(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Running {
                pace_min_per_km, ..
            } => Some(pace_min_per_km),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    /// Speed in km/h, for cycling workouts.
    pub fn speed_km_per_h(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling { speed_km_per_h, .. } => Some(speed_km_per_h),
            WorkoutDetails::Running { .. } => None,
        }
    }

    /// Count one user interaction with this workout.
    pub fn acknowledge_interaction(&mut self) {
        self.interaction_count += 1;
    }

    /// Popup content for this workout's map marker.
    pub fn popup(&self) -> MarkerPopup {
        MarkerPopup {
            content: format!("{} {}", self.kind().emoji(), self.description),
            style_class: format!("{}-popup", self.kind()),
        }
    }

    /// View model for this workout's list entry.
    pub fn view(&self) -> WorkoutView {
        let kind = self.kind();
        let mut details = vec![
            ViewDetail::new(kind.emoji(), self.distance_km.to_string(), "km"),
            ViewDetail::new("⏱", self.duration_min.to_string(), "min"),
        ];
        match self.details {
            WorkoutDetails::Running {
                cadence_spm,
                pace_min_per_km,
            } => {
                details.push(ViewDetail::new(
                    "⚡️",
                    format!("{:.1}", pace_min_per_km),
                    "min/km",
                ));
                details.push(ViewDetail::new("🦶🏼", cadence_spm.to_string(), "spm"));
            }
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => {
                details.push(ViewDetail::new(
                    "⚡️",
                    format!("{:.1}", speed_km_per_h),
                    "km/h",
                ));
                details.push(ViewDetail::new("⛰", elevation_gain_m.to_string(), "m"));
            }
        }

        WorkoutView {
            id: self.id.to_string(),
            kind,
            title: self.description.clone(),
            created_at: format_utc_rfc3339(self.created_at),
            details,
        }
    }
}

/// Human-readable label such as "Running on April 7" (UTC calendar date).
pub fn describe(kind: WorkoutKind, created_at: DateTime<Utc>) -> String {
    format!(
        "{} on {} {}",
        kind.label(),
        MONTHS[created_at.month0() as usize],
        created_at.day()
    )
}
