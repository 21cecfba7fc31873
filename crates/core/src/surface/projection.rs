//! Conversion between spherical coordinates and a flat map.
//!
//! The projection is orthographic, centered on an arbitrary coordinate: picture
//! the planet as seen from far away, directly above the center point. Planar
//! offsets are measured in the same unit as `rho` (kilometers when `rho` is
//! the planet radius, pixels when it's the radius of the rendered globe).
//!
//! ```text
//!            -y (north)
//!                ^
//!                |
//!  -x (west) <---c---> +x (east)
//!                |
//!                v
//!            +y (south)
//! ```
//!
//! Only the hemisphere facing the viewer can be represented. Points on the far
//! side project onto the same pixels as points on the near side, see
//! [RectProjector::is_visible].

use crate::{
    surface::coordinate::SphericalCoordinate,
    util::HALF_PI,
};
use derive_more::Display;
use log::trace;
use nalgebra::{Point3, Rotation3};
use serde::{Deserialize, Serialize};

/// An integer point on a rendered map. Only ever used transiently while
/// drawing.
#[derive(
    Copy, Clone, Debug, Default, Display, PartialEq, Eq, Serialize, Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The rotation that takes a point expressed in the frame centered on
/// `center` (z out of the surface, y towards the south) to the planet's frame
fn center_rotation(center: SphericalCoordinate) -> Rotation3<f64> {
    // Tilt around x by the colatitude, then spin around z by the longitude
    Rotation3::from_euler_angles(-center.phi(), 0.0, -center.theta())
}

/// Convert a planar offset around `center` back to a coordinate on a sphere
/// of radius `rho`. This is the inverse of [spherical_to_rect].
///
/// Offsets that land outside the projected disc (further than `rho` from the
/// center) are pulled onto the limb, i.e. a quarter turn away from `center`.
pub fn rect_to_spherical(
    center: SphericalCoordinate,
    dx: f64,
    dy: f64,
    rho: f64,
) -> SphericalCoordinate {
    let planar_sq = dx * dx + dy * dy;
    let z = if planar_sq > rho * rho {
        trace!("offset ({dx}, {dy}) is outside radius {rho}, using the limb");
        0.0
    } else {
        (rho * rho - planar_sq).sqrt()
    };

    let point = center_rotation(center) * Point3::new(dx, dy, z);

    // The radius can differ from rho slightly after the limb clamp
    let radius = point.coords.norm();
    let phi = (point.z / radius).clamp(-1.0, 1.0).acos();
    let theta = point.x.atan2(point.y);
    SphericalCoordinate::new(phi, theta)
}

/// Project `coord` onto the plane centered on `center`, on a sphere of radius
/// `rho`. Returns the `(x, y)` offset from the center, with +x east and +y
/// south.
pub fn spherical_to_rect(
    center: SphericalCoordinate,
    coord: SphericalCoordinate,
    rho: f64,
) -> (f64, f64) {
    let column = coord.theta() - HALF_PI - center.theta();
    let horizontal = rho * coord.phi().sin();
    let x = horizontal * column.cos();
    let y = -horizontal * center.phi().cos() * column.sin()
        - rho * coord.phi().cos() * center.phi().sin();
    (x, y)
}

/// The pixel window a map is drawn into. The projection center lands on
/// `(half_width - low_edge_x, half_height - low_edge_y)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapViewport {
    pub half_width: i32,
    pub half_height: i32,
    pub low_edge_x: i32,
    pub low_edge_y: i32,
}

impl MapViewport {
    /// A square viewport with no edge offset
    pub fn square(half_size: i32) -> Self {
        Self {
            half_width: half_size,
            half_height: half_size,
            low_edge_x: 0,
            low_edge_y: 0,
        }
    }

    fn origin(&self) -> (f64, f64) {
        (
            (self.half_width - self.low_edge_x) as f64,
            (self.half_height - self.low_edge_y) as f64,
        )
    }
}

/// Projects between the sphere and a rendered map centered on one coordinate.
/// A projector is cheap to build, so make a new one whenever the map is
/// re-centered or zoomed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RectProjector {
    center: SphericalCoordinate,
    rho: f64,
    viewport: MapViewport,
}

impl RectProjector {
    /// `rho` is the radius of the rendered globe, in pixels
    pub fn new(
        center: SphericalCoordinate,
        rho: f64,
        viewport: MapViewport,
    ) -> Self {
        Self {
            center,
            rho,
            viewport,
        }
    }

    pub fn center(&self) -> SphericalCoordinate {
        self.center
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    pub fn viewport(&self) -> MapViewport {
        self.viewport
    }

    /// Unrounded planar offset of a coordinate from the map center
    pub fn to_offset(&self, coord: SphericalCoordinate) -> (f64, f64) {
        spherical_to_rect(self.center, coord, self.rho)
    }

    /// Pixel that a coordinate is drawn at
    pub fn to_pixel(&self, coord: SphericalCoordinate) -> PixelPoint {
        let (x, y) = self.to_offset(coord);
        let (origin_x, origin_y) = self.viewport.origin();
        PixelPoint::new(
            (x.round() + origin_x) as i32,
            (y.round() + origin_y) as i32,
        )
    }

    /// Coordinate at a planar offset from the map center
    pub fn to_spherical(&self, dx: f64, dy: f64) -> SphericalCoordinate {
        rect_to_spherical(self.center, dx, dy, self.rho)
    }

    /// Coordinate under a pixel of the map, e.g. where the user clicked
    pub fn pixel_to_spherical(&self, pixel: PixelPoint) -> SphericalCoordinate {
        let (origin_x, origin_y) = self.viewport.origin();
        self.to_spherical(pixel.x as f64 - origin_x, pixel.y as f64 - origin_y)
    }

    /// Is the coordinate on the hemisphere facing the viewer? Points on the
    /// far side still project somewhere on the map, so renderers should skip
    /// anything that isn't visible.
    pub fn is_visible(&self, coord: SphericalCoordinate) -> bool {
        self.center.angle_to(&coord) <= HALF_PI
    }
}
