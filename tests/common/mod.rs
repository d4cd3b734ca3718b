// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, TimeZone, Utc};
use mapty_tracker::config::Config;
use mapty_tracker::db::{KeyValueStore, MemoryStore};
use mapty_tracker::models::{Coordinates, Workout, WorkoutKind};
use mapty_tracker::presentation::{HeadlessMap, HeadlessView};
use mapty_tracker::routes::create_router;
use mapty_tracker::services::{Session, SubmitOutcome, WorkoutInput};
use mapty_tracker::time_utils::FixedClock;
use mapty_tracker::{AppSession, AppState};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Session with an in-memory store and headless collaborators.
#[allow(dead_code)]
pub type TestSession = Session<MemoryStore, HeadlessView, HeadlessMap>;

/// Where the map starts in tests.
#[allow(dead_code)]
pub const LONDON: Coordinates = Coordinates {
    lat: 51.5,
    lng: -0.12,
};

/// Frozen creation time used by test sessions.
#[allow(dead_code)]
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 7, 12, 0, 0).unwrap()
}

/// Session over `store` with the map loaded at [`LONDON`].
#[allow(dead_code)]
pub fn test_session_with(store: MemoryStore) -> TestSession {
    let mut session: TestSession = Session::new(store, HeadlessView::new())
        .with_clock(Arc::new(FixedClock(test_now())));
    session.load_map(HeadlessMap::new(), LONDON);
    session
}

#[allow(dead_code)]
pub fn test_session() -> TestSession {
    test_session_with(MemoryStore::new())
}

#[allow(dead_code)]
pub fn running(distance_km: f64, duration_min: f64, cadence_spm: f64) -> WorkoutInput {
    WorkoutInput {
        kind: WorkoutKind::Running,
        distance_km,
        duration_min,
        extra: cadence_spm,
    }
}

#[allow(dead_code)]
pub fn cycling(distance_km: f64, duration_min: f64, elevation_gain_m: f64) -> WorkoutInput {
    WorkoutInput {
        kind: WorkoutKind::Cycling,
        distance_km,
        duration_min,
        extra: elevation_gain_m,
    }
}

/// Click the map at `at` and submit `input`, expecting success.
#[allow(dead_code)]
pub fn add_workout(session: &mut TestSession, at: Coordinates, input: WorkoutInput) -> Workout {
    session
        .record_pending_location(at)
        .expect("map should be loaded");
    match session
        .submit_new_workout(&input)
        .expect("submission should pass sequencing checks")
    {
        SubmitOutcome::Created(workout) => workout,
        SubmitOutcome::Rejected(e) => panic!("workout rejected: {}", e),
    }
}

/// Current persisted blob of a test session.
#[allow(dead_code)]
pub fn stored_blob(session: &TestSession) -> Option<String> {
    session
        .store()
        .get(mapty_tracker::db::keys::WORKOUTS)
        .unwrap()
}

/// Create a test app over an in-memory store. The map is not loaded.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let store: Box<dyn KeyValueStore + Send> = Box::new(MemoryStore::new());
    let session: AppSession = Session::new(store, HeadlessView::new())
        .with_clock(Arc::new(FixedClock(test_now())))
        .with_zoom_level(config.map_zoom_level);

    let state = Arc::new(AppState {
        config,
        session: Mutex::new(session),
    });

    (create_router(state.clone()), state)
}
