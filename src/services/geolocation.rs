// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sources of the user's current position.

use crate::models::Coordinates;

/// Provides the position the map is first centered on.
pub trait GeolocationSource {
    fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// A position known up front (configured home location, or one reported by
/// the browser).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation {
    position: Option<Coordinates>,
}

impl FixedLocation {
    pub fn new(position: Coordinates) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// A source that always fails.
    pub fn unavailable() -> Self {
        Self { position: None }
    }
}

impl From<Option<Coordinates>> for FixedLocation {
    fn from(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

impl GeolocationSource for FixedLocation {
    fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        let position = self.position.ok_or(GeolocationError::Unavailable)?;
        if !is_on_globe(position) {
            return Err(GeolocationError::OutOfRange(position));
        }
        Ok(position)
    }
}

/// Whether the pair is a real latitude/longitude.
pub fn is_on_globe(c: Coordinates) -> bool {
    (-90.0..=90.0).contains(&c.lat) && (-180.0..=180.0).contains(&c.lng)
}

/// Errors from geolocation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeolocationError {
    #[error("Couldn't get your location")]
    Unavailable,

    #[error("Position out of range: {0:?}")]
    OutOfRange(Coordinates),
}
