// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! View models handed to the presentation layer.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::WorkoutKind;

/// One rendered list entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutView {
    /// Workout id (the list entry's data-id)
    pub id: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub kind: WorkoutKind,
    /// Description, e.g. "Running on April 7"
    pub title: String,
    /// Creation time (RFC3339)
    pub created_at: String,
    /// Detail rows: distance, duration, derived metric, kind-specific input
    pub details: Vec<ViewDetail>,
}

/// A single icon/value/unit row of a list entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ViewDetail {
    pub icon: String,
    pub value: String,
    pub unit: String,
}

impl ViewDetail {
    pub fn new(icon: &str, value: String, unit: &str) -> Self {
        Self {
            icon: icon.to_string(),
            value,
            unit: unit.to_string(),
        }
    }
}

/// Content and styling of a map marker popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MarkerPopup {
    pub content: String,
    /// CSS class, "running-popup" or "cycling-popup"
    pub style_class: String,
}
