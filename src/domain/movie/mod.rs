pub mod entity;
pub mod invariants;

pub use entity::{image_url, Movie, MovieId, IMAGE_BASE_URL};
pub use invariants::validate_movie;
