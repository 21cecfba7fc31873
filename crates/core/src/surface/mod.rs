//! Everything that happens on the surface of the sphere itself: coordinates,
//! the maps they're projected onto, and indexing entities by location.

pub mod coordinate;
pub mod direction;
pub mod index;
pub mod projection;
pub mod text;
