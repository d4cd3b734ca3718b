// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes: one endpoint per session operation.
//!
//! Handlers only translate HTTP to session calls. Each takes the session lock
//! for the whole operation, so requests are applied one at a time.

use crate::error::{AppError, Result};
use crate::models::{Coordinates, Workout, WorkoutId, WorkoutKind};
use crate::presentation::{HeadlessMap, HeadlessView};
use crate::services::geolocation::is_on_globe;
use crate::services::{workouts_to_geojson, FixedLocation, SubmitOutcome, WorkoutInput};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use geojson::GeoJson;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/location", post(set_location))
        .route("/api/map/click", post(map_click))
        .route("/api/workouts", get(list_workouts).post(submit_workout))
        .route("/api/workouts.geojson", get(workouts_geojson))
        .route("/api/workouts/sort", post(sort_workouts))
        .route("/api/workouts/{id}", delete(delete_workout))
        .route("/api/workouts/{id}/focus", post(focus_workout))
        .route("/api/form/kind", post(select_kind))
        .route("/api/error/dismiss", post(dismiss_error))
        .route("/api/reset", post(reset_all))
        .route("/api/view", get(get_view))
}

// ─── Map ─────────────────────────────────────────────────────

/// A latitude/longitude pair from the client.
#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub lat: f64,
    pub lng: f64,
}

impl LocationRequest {
    fn coordinates(&self) -> Result<Coordinates> {
        let c = Coordinates::new(self.lat, self.lng);
        if !is_on_globe(c) {
            return Err(AppError::BadRequest(format!(
                "coordinates out of range: {}, {}",
                self.lat, self.lng
            )));
        }
        Ok(c)
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapStatusResponse {
    /// Whether this request brought the map up
    pub loaded: bool,
    pub map_ready: bool,
}

/// Geolocation result reported by the browser; loads the map once.
async fn set_location(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LocationRequest>,
) -> Result<Json<MapStatusResponse>> {
    let position = req.coordinates()?;
    let mut session = state.session.lock().await;
    let loaded = session.locate_and_load_map(&FixedLocation::new(position), HeadlessMap::new());
    Ok(Json(MapStatusResponse {
        loaded,
        map_ready: session.map().is_some(),
    }))
}

/// Map click: remember the location for the next submission.
async fn map_click(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LocationRequest>,
) -> Result<StatusCode> {
    let at = req.coordinates()?;
    state.session.lock().await.record_pending_location(at)?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Workouts ────────────────────────────────────────────────

/// Workout form values. Missing numbers count as invalid input.
#[derive(Debug, Deserialize)]
pub struct SubmitWorkoutRequest {
    pub kind: WorkoutKind,
    pub distance_km: Option<f64>,
    pub duration_min: Option<f64>,
    pub cadence_spm: Option<f64>,
    pub elevation_gain_m: Option<f64>,
}

impl SubmitWorkoutRequest {
    fn into_input(self) -> WorkoutInput {
        let extra = match self.kind {
            WorkoutKind::Running => self.cadence_spm,
            WorkoutKind::Cycling => self.elevation_gain_m,
        };
        WorkoutInput {
            kind: self.kind,
            distance_km: self.distance_km.unwrap_or(f64::NAN),
            duration_min: self.duration_min.unwrap_or(f64::NAN),
            extra: extra.unwrap_or(f64::NAN),
        }
    }
}

async fn submit_workout(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitWorkoutRequest>,
) -> Result<(StatusCode, Json<Workout>)> {
    let input = req.into_input();
    match state.session.lock().await.submit_new_workout(&input)? {
        SubmitOutcome::Created(workout) => Ok((StatusCode::CREATED, Json(workout))),
        SubmitOutcome::Rejected(e) => Err(AppError::Validation(e.to_string())),
    }
}

async fn list_workouts(State(state): State<Arc<AppState>>) -> Json<Vec<Workout>> {
    Json(state.session.lock().await.workouts().to_vec())
}

/// Workout locations as a GeoJSON FeatureCollection.
async fn workouts_geojson(State(state): State<Arc<AppState>>) -> Json<GeoJson> {
    let session = state.session.lock().await;
    Json(GeoJson::from(workouts_to_geojson(session.workouts())))
}

async fn sort_workouts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Workout>>> {
    let mut session = state.session.lock().await;
    session.sort_by_distance()?;
    Ok(Json(session.workouts().to_vec()))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteResponse {
    /// False when no workout had this id
    pub deleted: bool,
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let deleted = state
        .session
        .lock()
        .await
        .delete_workout(&WorkoutId::new(id))?;
    Ok(Json(DeleteResponse { deleted }))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FocusResponse {
    pub focused: bool,
}

async fn focus_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FocusResponse>> {
    let focused = state
        .session
        .lock()
        .await
        .focus_workout(&WorkoutId::new(id))?;
    Ok(Json(FocusResponse { focused }))
}

// ─── Form and Session ────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SelectKindRequest {
    pub kind: WorkoutKind,
}

/// Workout type changed in the form.
async fn select_kind(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectKindRequest>,
) -> StatusCode {
    state.session.lock().await.toggle_extra_field(req.kind);
    StatusCode::NO_CONTENT
}

async fn dismiss_error(State(state): State<Arc<AppState>>) -> StatusCode {
    state.session.lock().await.dismiss_error();
    StatusCode::NO_CONTENT
}

/// Delete every stored workout. No confirmation.
async fn reset_all(State(state): State<Arc<AppState>>) -> Result<StatusCode> {
    state.session.lock().await.reset_all()?;
    Ok(StatusCode::NO_CONTENT)
}

/// Everything the front end should currently display.
#[derive(Serialize)]
pub struct ViewResponse {
    pub view: HeadlessView,
    pub map: Option<HeadlessMap>,
    pub pending_location: Option<Coordinates>,
    pub sorted: bool,
}

async fn get_view(State(state): State<Arc<AppState>>) -> Json<ViewResponse> {
    let session = state.session.lock().await;
    Json(ViewResponse {
        view: session.presenter().clone(),
        map: session.map().cloned(),
        pending_location: session.pending_location(),
        sorted: session.is_sorted(),
    })
}
