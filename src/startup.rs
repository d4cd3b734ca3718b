// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server startup: open the workout store and bring the session up.

use anyhow::Context;

use crate::config::Config;
use crate::db::{FileStore, KeyValueStore};
use crate::presentation::{HeadlessMap, HeadlessView};
use crate::services::{FixedLocation, Session};
use crate::AppSession;

/// Open the store at `config.data_path`, restore saved workouts and load
/// the map if a home location is configured.
pub fn open_session(config: &Config) -> anyhow::Result<AppSession> {
    let store = FileStore::open(&config.data_path)
        .with_context(|| format!("opening workout store at {}", config.data_path))?;
    tracing::info!(path = %store.path().display(), "Workout store opened");

    let store: Box<dyn KeyValueStore + Send> = Box::new(store);
    let mut session: AppSession =
        Session::new(store, HeadlessView::new()).with_zoom_level(config.map_zoom_level);

    // Restore first; markers for restored workouts go up once the map loads
    let restored = session
        .restore_from_storage()
        .context("restoring stored workouts")?;
    tracing::info!(count = restored, "Workouts restored");

    let geolocation = FixedLocation::from(config.home_location);
    if !session.locate_and_load_map(&geolocation, HeadlessMap::new()) {
        tracing::info!("Map will load when the client reports its location");
    }

    Ok(session)
}
