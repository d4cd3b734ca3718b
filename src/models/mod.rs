// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod view;
pub mod workout;

pub use view::{MarkerPopup, ViewDetail, WorkoutView};
pub use workout::{describe, Coordinates, Workout, WorkoutDetails, WorkoutId, WorkoutKind};
