// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GeoJSON export of workout locations for map front ends.

use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject};
use serde_json::json;

use crate::models::Workout;

/// One point feature per workout, in list order.
pub fn workouts_to_geojson(workouts: &[Workout]) -> FeatureCollection {
    let features = workouts
        .iter()
        .map(|w| {
            let point: geo::Point<f64> = w.coordinates().into();
            let popup = w.popup();

            let mut properties = JsonObject::new();
            properties.insert("kind".to_string(), json!(w.kind().as_str()));
            properties.insert("description".to_string(), json!(w.description()));
            properties.insert("popup".to_string(), json!(popup.content));
            properties.insert("style_class".to_string(), json!(popup.style_class));
            properties.insert("distance_km".to_string(), json!(w.distance_km()));
            properties.insert("duration_min".to_string(), json!(w.duration_min()));

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(&point))),
                id: Some(Id::String(w.id().to_string())),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, WorkoutId};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_points_are_lng_lat() {
        let at = Utc.with_ymd_and_hms(2026, 4, 7, 12, 0, 0).unwrap();
        let w = Workout::running(
            WorkoutId::new("0000000001"),
            at,
            Coordinates::new(51.5, -0.12),
            5.0,
            25.0,
            180.0,
        );

        let collection = workouts_to_geojson(&[w]);
        assert_eq!(collection.features.len(), 1);

        let feature = &collection.features[0];
        assert_eq!(feature.id, Some(Id::String("0000000001".to_string())));
        assert_eq!(
            feature.geometry.as_ref().map(|g| g.value.clone()),
            Some(geojson::Value::Point(vec![-0.12, 51.5]))
        );
        assert_eq!(
            feature.property("style_class").and_then(|v| v.as_str()),
            Some("running-popup")
        );
    }

    #[test]
    fn test_empty_list() {
        assert!(workouts_to_geojson(&[]).features.is_empty());
    }
}
