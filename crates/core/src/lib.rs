//! Areo is the geodesy kernel behind a planetary colony simulation. The planet
//! is modeled as a perfect sphere, and this crate provides everything needed
//! to reason about locations on its surface:
//!
//! - [SphericalCoordinate]: an immutable point on the sphere, with distance,
//!   bearing and dead-reckoning movement
//! - [CoordinateCodec]: locale-aware text parsing and formatting of
//!   coordinates
//! - [LocalPosition] and [FrameTransform]: 2D positions inside a settlement,
//!   and conversion between a building's own frame and the settlement frame
//! - [RectProjector]: orthographic projection between the sphere and a flat
//!   map, for rendering
//! - [SurfaceIndex]: a latitude-banded index that answers "what is near X"
//!
//! ```
//! use areo::{Direction, Kilometer, Planet};
//!
//! let planet = Planet::mars();
//! let codec = planet.codec();
//! let base = codec.parse_str("4.5000 S 137.4000 E").unwrap();
//! let heading = Direction::from_degrees(45.0);
//! let site = planet.destination(base, heading, Kilometer(120.0));
//! println!("{} is {} away", codec.format(site), planet.distance(base, site));
//! ```
//!
//! See [GeodesyConfig] for the knobs that can be tuned per planet.

mod config;
mod local;
mod planet;
mod surface;
mod util;

pub use crate::{
    config::{CardinalGlyphs, GeodesyConfig},
    local::{
        bounds::LocalBounds, position::LocalPosition,
        transform::FrameTransform,
    },
    planet::Planet,
    surface::{
        coordinate::{ArcFormula, SphericalCoordinate},
        direction::Direction,
        index::{Located, SurfaceIndex},
        projection::{
            rect_to_spherical, spherical_to_rect, MapViewport, PixelPoint,
            RectProjector,
        },
        text::{Axis, CoordinateCodec, FormatError},
    },
    util::{range::NumRange, unit::Kilometer},
};
