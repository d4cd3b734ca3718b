// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Headless presenter and map that record what would be on screen.
//!
//! The HTTP layer serves this state to the browser front end, and tests
//! assert against it.

use serde::Serialize;
use std::collections::BTreeMap;

use super::{MapWidget, MarkerId, Presenter};
use crate::models::{Coordinates, MarkerPopup, WorkoutId, WorkoutKind, WorkoutView};

/// Recorded list and form state.
#[derive(Debug, Clone, Serialize)]
pub struct HeadlessView {
    /// Rendered list entries in render order. New entries go at the end,
    /// so this always reads in the session's list order.
    pub entries: Vec<WorkoutView>,
    pub form_visible: bool,
    pub error_visible: bool,
    /// Kind whose extra input row is showing
    pub extra_field: WorkoutKind,
    /// Times the error panel was shown
    pub errors_shown: u32,
}

impl Default for HeadlessView {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            form_visible: false,
            error_visible: false,
            extra_field: WorkoutKind::Running,
            errors_shown: 0,
        }
    }
}

impl HeadlessView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of rendered entries, in render order.
    pub fn entry_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }
}

impl Presenter for HeadlessView {
    fn render_list_entry(&mut self, view: &WorkoutView) {
        self.entries.push(view.clone());
    }

    fn remove_list_entry(&mut self, id: &WorkoutId) {
        self.entries.retain(|e| e.id != id.as_str());
    }

    fn show_form(&mut self) {
        self.form_visible = true;
    }

    fn hide_form(&mut self) {
        self.form_visible = false;
    }

    fn toggle_extra_field_for(&mut self, kind: WorkoutKind) {
        self.extra_field = kind;
    }

    fn show_error_panel(&mut self) {
        self.error_visible = true;
        self.errors_shown += 1;
    }

    fn hide_error_panel(&mut self) {
        self.error_visible = false;
    }
}

/// A marker currently on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedMarker {
    pub at: Coordinates,
    pub popup: MarkerPopup,
}

/// Recorded map state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HeadlessMap {
    pub center: Option<Coordinates>,
    pub zoom: Option<u8>,
    pub markers: BTreeMap<MarkerId, PlacedMarker>,
    #[serde(skip)]
    next_marker: MarkerId,
}

impl HeadlessMap {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapWidget for HeadlessMap {
    fn initialize(&mut self, center: Coordinates, zoom: u8) {
        self.center = Some(center);
        self.zoom = Some(zoom);
    }

    fn place_marker(&mut self, at: Coordinates, popup: &MarkerPopup) -> MarkerId {
        let id = self.next_marker;
        self.next_marker += 1;
        self.markers.insert(
            id,
            PlacedMarker {
                at,
                popup: popup.clone(),
            },
        );
        id
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.markers.remove(&marker);
    }

    fn center_on(&mut self, at: Coordinates, zoom: u8) {
        self.center = Some(at);
        self.zoom = Some(zoom);
    }
}
