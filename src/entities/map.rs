use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, Place};

const FALLBACK_CENTER: Coordinates = Coordinates {
    lat: 62.242561,
    lon: 25.747499,
};
const DEFAULT_DELTA: f64 = 2.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    pub fn around(center: Coordinates) -> Self {
        Self {
            latitude: center.lat,
            longitude: center.lon,
            latitude_delta: DEFAULT_DELTA,
            longitude_delta: DEFAULT_DELTA,
        }
    }

    pub fn fallback() -> Self {
        Self::around(FALLBACK_CENTER)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub key: usize,
    pub coordinate: Coordinates,
    pub title: String,
    pub description: String,
}

/// Everything the map surface needs to draw the current list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub region: Region,
    pub markers: Vec<Marker>,
}

impl MapView {
    pub fn new(places: &[Place]) -> Self {
        let region = places
            .last()
            .map(|place| Region::around(place.coordinates()))
            .unwrap_or_else(Region::fallback);

        let markers = places
            .iter()
            .enumerate()
            .map(|(key, place)| Marker {
                key,
                coordinate: place.coordinates(),
                title: place.title.clone(),
                description: place.description.clone(),
            })
            .collect();

        Self { region, markers }
    }
}

#[test]
fn empty_list_uses_fallback_region() {
    let view = MapView::new(&[]);

    assert_eq!(view.region, Region::fallback());
    assert!(view.markers.is_empty());
}

#[test]
fn markers_are_keyed_by_position() {
    use crate::entities::PlaceCandidate;

    let places = vec![
        Place::new(
            1,
            Coordinates { lat: 60.1, lon: 24.9 },
            PlaceCandidate::new("Helsinki", ""),
        ),
        Place::new(
            1,
            Coordinates { lat: 61.5, lon: 23.8 },
            PlaceCandidate::new("Tampere", "lakes"),
        ),
    ];

    let view = MapView::new(&places);

    assert_eq!(view.markers.len(), 2);
    assert_eq!(view.markers[1].key, 1);
    assert_eq!(view.markers[1].title, "Tampere");
    assert_eq!(view.markers[1].description, "lakes");
    assert_eq!(view.region, Region::around(places[1].coordinates()));
}
