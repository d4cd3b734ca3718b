// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session store: keeps the workout list, its persisted copy, the rendered
//! list and the map markers consistent.
//!
//! The in-memory list is the single source of truth. Every mutation updates
//! it first, then the presentation collaborators, then overwrites the stored
//! copy with the full list. Storage is only read by `restore_from_storage`.
//!
//! Failures come in two kinds:
//! - invalid form input is reported through the presenter's error panel and
//!   returned as [`SubmitOutcome::Rejected`]; nothing is mutated
//! - sequencing violations (no pending map click, no map) are
//!   [`SessionError`]s and also leave state untouched
//!
//! A storage failure while creating a workout undoes the creation. Other
//! mutations keep their in-memory effect and the next persist catches up.

use std::collections::HashMap;
use std::sync::Arc;

use crate::db::{keys, snapshot, KeyValueStore, StorageError};
use crate::models::{Coordinates, Workout, WorkoutId, WorkoutKind};
use crate::presentation::{MapWidget, MarkerId, Presenter};
use crate::services::geolocation::GeolocationSource;
use crate::services::validation::{self, ValidationError, WorkoutInput};
use crate::time_utils::{Clock, SystemClock};

/// Zoom level used when the caller doesn't configure one.
pub const DEFAULT_ZOOM_LEVEL: u8 = 13;

/// Result of a form submission that passed the sequencing checks.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Workout),
    Rejected(ValidationError),
}

/// Errors from session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("No pending location: click the map before submitting a workout")]
    NoPendingLocation,

    #[error("Map is not initialized")]
    MapNotReady,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// One user's tracking session.
pub struct Session<S, P, M> {
    store: S,
    presenter: P,
    map: Option<M>,
    clock: Arc<dyn Clock + Send + Sync>,
    zoom_level: u8,
    workouts: Vec<Workout>,
    markers: HashMap<WorkoutId, MarkerId>,
    pending_location: Option<Coordinates>,
    sorted: bool,
}

impl<S, P, M> Session<S, P, M>
where
    S: KeyValueStore,
    P: Presenter,
    M: MapWidget,
{
    pub fn new(store: S, presenter: P) -> Self {
        Self {
            store,
            presenter,
            map: None,
            clock: Arc::new(SystemClock),
            zoom_level: DEFAULT_ZOOM_LEVEL,
            workouts: Vec::new(),
            markers: HashMap::new(),
            pending_location: None,
            sorted: false,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_zoom_level(mut self, zoom_level: u8) -> Self {
        self.zoom_level = zoom_level;
        self
    }

    // ─── Accessors ───────────────────────────────────────────────

    /// Workouts in current order.
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn workout(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn pending_location(&self) -> Option<Coordinates> {
        self.pending_location
    }

    /// Toggled by every sort.
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    pub fn zoom_level(&self) -> u8 {
        self.zoom_level
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn map(&self) -> Option<&M> {
        self.map.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Marker currently showing `id` on the map.
    pub fn marker_for(&self, id: &WorkoutId) -> Option<MarkerId> {
        self.markers.get(id).copied()
    }

    // ─── Startup ─────────────────────────────────────────────────

    /// Load the persisted list, replacing the in-memory one.
    ///
    /// Renders a list entry per workout. Markers are placed only if the map
    /// is already up; otherwise `load_map` places them. Returns the number of
    /// workouts restored; an absent key restores nothing.
    pub fn restore_from_storage(&mut self) -> Result<usize, SessionError> {
        let Some(data) = self.store.get(keys::WORKOUTS)? else {
            tracing::debug!("No stored workouts");
            return Ok(0);
        };
        let mut restored = snapshot::decode(&data)?;
        dedupe_ids(&mut restored);

        self.clear_rendered();
        self.workouts = restored;
        for workout in &self.workouts {
            self.presenter.render_list_entry(&workout.view());
        }
        if let Some(map) = self.map.as_mut() {
            for workout in &self.workouts {
                place_marker(map, &mut self.markers, workout);
            }
        }

        tracing::info!(count = self.workouts.len(), "Restored workouts");
        Ok(self.workouts.len())
    }

    /// Ask `geolocation` where the user is and bring up `map` there.
    ///
    /// Returns `false` if the position is unavailable (the map stays down) or
    /// if a map is already loaded.
    pub fn locate_and_load_map<G: GeolocationSource>(&mut self, geolocation: &G, map: M) -> bool {
        if self.map.is_some() {
            tracing::debug!("Map already loaded");
            return false;
        }
        match geolocation.current_position() {
            Ok(position) => {
                self.load_map(map, position);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Geolocation failed; map not loaded");
                false
            }
        }
    }

    /// Initialize `map` at `center` and place markers for every workout
    /// already in memory.
    pub fn load_map(&mut self, mut map: M, center: Coordinates) {
        map.initialize(center, self.zoom_level);
        self.markers.clear();
        for workout in &self.workouts {
            place_marker(&mut map, &mut self.markers, workout);
        }
        tracing::info!(
            lat = center.lat,
            lng = center.lng,
            markers = self.markers.len(),
            "Map loaded"
        );
        self.map = Some(map);
    }

    // ─── Form Handling ───────────────────────────────────────────

    /// Remember where the map was clicked and reveal the form.
    pub fn record_pending_location(&mut self, at: Coordinates) -> Result<(), SessionError> {
        if self.map.is_none() {
            return Err(SessionError::MapNotReady);
        }
        self.pending_location = Some(at);
        self.presenter.show_form();
        tracing::debug!(lat = at.lat, lng = at.lng, "Pending location recorded");
        Ok(())
    }

    /// Validate the form and, if it passes, create and persist a workout at
    /// the pending location.
    ///
    /// If the write fails the new workout is taken back out of memory, the
    /// list and the map, and the pending location is kept.
    pub fn submit_new_workout(
        &mut self,
        input: &WorkoutInput,
    ) -> Result<SubmitOutcome, SessionError> {
        let at = self
            .pending_location
            .ok_or(SessionError::NoPendingLocation)?;
        let Some(map) = self.map.as_mut() else {
            return Err(SessionError::MapNotReady);
        };

        if let Err(e) = validation::validate(input) {
            tracing::warn!(kind = %input.kind, error = %e, "Rejected workout input");
            self.presenter.show_error_panel();
            return Ok(SubmitOutcome::Rejected(e));
        }

        let created_at = self.clock.now();
        let mut id = WorkoutId::from_timestamp(created_at);
        while self.workouts.iter().any(|w| w.id() == &id) {
            id = id.successor();
        }

        let workout = match input.kind {
            WorkoutKind::Running => Workout::running(
                id,
                created_at,
                at,
                input.distance_km,
                input.duration_min,
                input.extra,
            ),
            WorkoutKind::Cycling => Workout::cycling(
                id,
                created_at,
                at,
                input.distance_km,
                input.duration_min,
                input.extra,
            ),
        };

        self.workouts.push(workout.clone());
        place_marker(map, &mut self.markers, &workout);
        self.presenter.render_list_entry(&workout.view());
        self.pending_location = None;
        self.presenter.hide_form();

        // Undo the creation if it didn't reach storage, so a retry of the
        // same form can't produce a duplicate.
        if let Err(e) = self.persist() {
            tracing::error!(id = %workout.id(), error = %e, "Workout not stored, rolling back");
            self.workouts.pop();
            self.presenter.remove_list_entry(workout.id());
            if let Some(marker) = self.markers.remove(workout.id()) {
                if let Some(map) = self.map.as_mut() {
                    map.remove_marker(marker);
                }
            }
            self.pending_location = Some(at);
            self.presenter.show_form();
            return Err(e);
        }

        tracing::info!(
            id = %workout.id(),
            kind = %workout.kind(),
            distance_km = workout.distance_km(),
            "Workout created"
        );
        Ok(SubmitOutcome::Created(workout))
    }

    /// Show the input row for `kind`.
    pub fn toggle_extra_field(&mut self, kind: WorkoutKind) {
        self.presenter.toggle_extra_field_for(kind);
    }

    pub fn dismiss_error(&mut self) {
        self.presenter.hide_error_panel();
    }

    // ─── List Operations ─────────────────────────────────────────

    /// Reorder by ascending distance (stable), re-render and persist.
    pub fn sort_by_distance(&mut self) -> Result<(), SessionError> {
        self.workouts
            .sort_by(|a, b| a.distance_km().total_cmp(&b.distance_km()));
        self.sorted = !self.sorted;

        for workout in &self.workouts {
            self.presenter.remove_list_entry(workout.id());
        }
        for workout in &self.workouts {
            self.presenter.render_list_entry(&workout.view());
        }

        self.persist()?;
        tracing::info!(count = self.workouts.len(), "Workouts sorted by distance");
        Ok(())
    }

    /// Remove a workout from memory, the list, the map and storage.
    ///
    /// Returns `false` (and changes nothing) for an unknown id.
    pub fn delete_workout(&mut self, id: &WorkoutId) -> Result<bool, SessionError> {
        let Some(index) = self.workouts.iter().position(|w| w.id() == id) else {
            tracing::debug!(id = %id, "Delete of unknown workout ignored");
            return Ok(false);
        };

        self.workouts.remove(index);
        self.presenter.remove_list_entry(id);
        if let Some(marker) = self.markers.remove(id) {
            if let Some(map) = self.map.as_mut() {
                map.remove_marker(marker);
            }
        }
        self.persist()?;

        tracing::info!(id = %id, remaining = self.workouts.len(), "Workout deleted");
        Ok(true)
    }

    /// Center the map on a workout. Returns `false` for an unknown id.
    pub fn focus_workout(&mut self, id: &WorkoutId) -> Result<bool, SessionError> {
        let map = self.map.as_mut().ok_or(SessionError::MapNotReady)?;
        let Some(workout) = self.workouts.iter().find(|w| w.id() == id) else {
            tracing::debug!(id = %id, "Focus on unknown workout ignored");
            return Ok(false);
        };
        map.center_on(workout.coordinates(), self.zoom_level);
        Ok(true)
    }

    // ─── Persistence ─────────────────────────────────────────────

    /// Overwrite the stored list with the in-memory one.
    pub fn persist(&mut self) -> Result<(), SessionError> {
        let data = snapshot::encode(&self.workouts)?;
        self.store.set(keys::WORKOUTS, &data)?;
        tracing::debug!(count = self.workouts.len(), "Workouts persisted");
        Ok(())
    }

    /// Drop all stored workouts and start the session over.
    ///
    /// Irreversible. The map stays loaded; everything else returns to its
    /// startup state.
    pub fn reset_all(&mut self) -> Result<(), SessionError> {
        self.store.remove(keys::WORKOUTS)?;
        self.clear_rendered();
        self.workouts.clear();
        self.pending_location = None;
        self.sorted = false;
        self.presenter.hide_form();
        self.presenter.hide_error_panel();
        self.restore_from_storage()?;
        tracing::info!("Session reset");
        Ok(())
    }

    /// Take every current workout off the list and the map.
    fn clear_rendered(&mut self) {
        for workout in &self.workouts {
            self.presenter.remove_list_entry(workout.id());
        }
        if let Some(map) = self.map.as_mut() {
            for (_, marker) in self.markers.drain() {
                map.remove_marker(marker);
            }
        } else {
            self.markers.clear();
        }
    }
}

fn place_marker<M: MapWidget>(
    map: &mut M,
    markers: &mut HashMap<WorkoutId, MarkerId>,
    workout: &Workout,
) {
    let marker = map.place_marker(workout.coordinates(), &workout.popup());
    markers.insert(workout.id().clone(), marker);
}

/// Keep ids unique in a restored list by bumping later duplicates.
fn dedupe_ids(workouts: &mut [Workout]) {
    let mut seen = std::collections::HashSet::new();
    for workout in workouts.iter_mut() {
        if seen.insert(workout.id().clone()) {
            continue;
        }
        let mut id = workout.id().successor();
        while seen.contains(&id) {
            id = id.successor();
        }
        tracing::warn!(old = %workout.id(), new = %id, "Duplicate stored workout id reassigned");
        workout.set_id(id.clone());
        seen.insert(id);
    }
}
