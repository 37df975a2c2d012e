//! Domain models for the tour catalog.

pub mod tour;

pub use tour::{Difficulty, Tour, TourDraft, TourPatch, ValidationErrors};
