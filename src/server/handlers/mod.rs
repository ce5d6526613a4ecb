pub mod dialog;
pub mod places;
