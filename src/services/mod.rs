// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod export;
pub mod geolocation;
pub mod session;
pub mod validation;

pub use export::workouts_to_geojson;
pub use geolocation::{FixedLocation, GeolocationError, GeolocationSource};
pub use session::{Session, SessionError, SubmitOutcome, DEFAULT_ZOOM_LEVEL};
pub use validation::{ValidationError, WorkoutInput};
