mod dialog;
mod map;
mod place;

pub use dialog::Dialog;
pub use map::{MapView, Marker, Region};
pub use place::{Coordinates, Place, PlaceCandidate};
