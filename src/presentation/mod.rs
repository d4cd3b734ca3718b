// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Presentation collaborators driven by the session.
//!
//! The session never renders anything itself; it tells a [`Presenter`] which
//! list entries and form panels to show and a [`MapWidget`] where markers go.
//! Map clicks flow the other way, into `Session::record_pending_location`.

pub mod headless;

pub use headless::{HeadlessMap, HeadlessView};

use crate::models::{Coordinates, MarkerPopup, WorkoutId, WorkoutKind, WorkoutView};

/// Handle for a marker placed on a [`MapWidget`].
pub type MarkerId = u64;

/// Map widget contract.
pub trait MapWidget {
    /// Set up the map centered on `center`.
    fn initialize(&mut self, center: Coordinates, zoom: u8);

    fn place_marker(&mut self, at: Coordinates, popup: &MarkerPopup) -> MarkerId;

    fn remove_marker(&mut self, marker: MarkerId);

    fn center_on(&mut self, at: Coordinates, zoom: u8);
}

/// List and form presentation contract.
pub trait Presenter {
    fn render_list_entry(&mut self, view: &WorkoutView);

    fn remove_list_entry(&mut self, id: &WorkoutId);

    fn show_form(&mut self);

    fn hide_form(&mut self);

    /// Show the input row specific to `kind` (cadence or elevation).
    fn toggle_extra_field_for(&mut self, kind: WorkoutKind);

    fn show_error_panel(&mut self);

    fn hide_error_panel(&mut self);
}
