// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Mapty-Tracker: log runs and rides by clicking a map
//!
//! This crate keeps a list of workouts, its persisted copy, the rendered
//! workout list and the map markers in step, and serves that state to a
//! browser front end.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod presentation;
pub mod routes;
pub mod services;
pub mod startup;
pub mod time_utils;

use config::Config;
use db::KeyValueStore;
use presentation::{HeadlessMap, HeadlessView};
use services::Session;
use tokio::sync::Mutex;

/// Session type served over HTTP.
pub type AppSession = Session<Box<dyn KeyValueStore + Send>, HeadlessView, HeadlessMap>;

/// Shared application state.
///
/// The mutex serializes UI events so each session operation runs to
/// completion before the next starts.
pub struct AppState {
    pub config: Config,
    pub session: Mutex<AppSession>,
}
