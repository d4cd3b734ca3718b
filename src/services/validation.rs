// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Validation of submitted workout form values.
//!
//! Every value must be finite. Distance and duration must be positive for
//! both kinds and cadence must be positive for runs; elevation gain may be
//! zero or negative. The derived metric (pace or speed) must come out
//! finite too, since a non-finite value cannot be stored.

use crate::models::WorkoutKind;

/// Raw values from the workout form. Missing inputs are `NaN`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutInput {
    pub kind: WorkoutKind,
    pub distance_km: f64,
    pub duration_min: f64,
    /// Cadence (spm) for running, elevation gain (m) for cycling
    pub extra: f64,
}

/// Why a submission was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    #[error("{0} must be positive")]
    NotPositive(&'static str),

    #[error("{0} is out of range for these inputs")]
    MetricOutOfRange(&'static str),
}

/// Name of the kind-specific field.
pub fn extra_field_name(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "cadence_spm",
        WorkoutKind::Cycling => "elevation_gain_m",
    }
}

/// Check a submission, reporting the first offending field.
pub fn validate(input: &WorkoutInput) -> Result<(), ValidationError> {
    let extra = extra_field_name(input.kind);
    let fields = [
        ("distance_km", input.distance_km),
        ("duration_min", input.duration_min),
        (extra, input.extra),
    ];

    if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
        return Err(ValidationError::NotFinite(*name));
    }

    let must_be_positive = match input.kind {
        WorkoutKind::Running => &fields[..],
        WorkoutKind::Cycling => &fields[..2],
    };
    if let Some((name, _)) = must_be_positive.iter().find(|(_, v)| *v <= 0.0) {
        return Err(ValidationError::NotPositive(*name));
    }

    let (metric, value) = match input.kind {
        WorkoutKind::Running => ("pace_min_per_km", input.duration_min / input.distance_km),
        WorkoutKind::Cycling => (
            "speed_km_per_h",
            input.distance_km / (input.duration_min / 60.0),
        ),
    };
    if !value.is_finite() {
        return Err(ValidationError::MetricOutOfRange(metric));
    }

    Ok(())
}
