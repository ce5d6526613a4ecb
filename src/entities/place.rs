use serde::{Deserialize, Serialize};

/// A named pin on the map. Never mutated once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: u64,
    pub lat: f64,
    pub lon: f64,
    pub title: String,
    pub description: String,
}

/// What the user typed into the creation form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl PlaceCandidate {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

impl Place {
    pub fn new(id: u64, coordinates: Coordinates, candidate: PlaceCandidate) -> Self {
        Self {
            id,
            lat: coordinates.lat,
            lon: coordinates.lon,
            title: candidate.title,
            description: candidate.description,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

#[test]
fn place_serializes_with_flat_field_names() {
    let place = Place::new(
        42,
        Coordinates {
            lat: 60.1699,
            lon: 24.9384,
        },
        PlaceCandidate::new("Helsinki", "capital"),
    );

    let value = serde_json::to_value(&place).unwrap();

    assert_eq!(
        value,
        serde_json::json!({
            "id": 42,
            "lat": 60.1699,
            "lon": 24.9384,
            "title": "Helsinki",
            "description": "capital",
        })
    );
}

#[test]
fn candidate_description_defaults_to_empty() {
    let candidate: PlaceCandidate = serde_json::from_str(r#"{"title":"Oulu"}"#).unwrap();

    assert_eq!(candidate, PlaceCandidate::new("Oulu", ""));
}
