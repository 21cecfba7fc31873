use crate::surface::direction::Direction;
use derive_more::{Add, Display, Neg, Sub};
use serde::{Deserialize, Serialize};

/// A point in some local frame, in meters. Equality is tolerant: two positions
/// are equal if they're [close](Self::is_close), so `==` is not transitive and
/// positions can't be hashed.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    Neg,
    Add,
    Sub,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({:.2}, {:.2})", x, y)]
pub struct LocalPosition {
    pub x: f64,
    pub y: f64,
}

impl LocalPosition {
    /// Max per-axis difference for two positions to be considered the same
    pub const CLOSE: f64 = 0.01;
    /// Max per-axis difference for two positions to be considered neighbors
    pub const NEAR: f64 = 2.0;

    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(&self, other: &Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Compass direction from this position to another, with north along +y
    /// and west along +x
    pub fn direction_to(&self, other: &Self) -> Direction {
        Direction::new((self.x - other.x).atan2(other.y - self.y))
    }

    /// The position `distance` meters away in `direction`. This is the
    /// inverse of [Self::direction_to] + [Self::distance_to].
    pub fn offset_by(&self, distance: f64, direction: Direction) -> Self {
        Self::new(
            self.x - distance * direction.sin(),
            self.y + distance * direction.cos(),
        )
    }

    pub fn is_close(&self, other: &Self) -> bool {
        self.within_per_axis(other, Self::CLOSE)
    }

    pub fn is_near(&self, other: &Self) -> bool {
        self.within_per_axis(other, Self::NEAR)
    }

    /// Is this position inside the axis-aligned box `[-max_x, max_x]` by
    /// `[-max_y, max_y]`?
    pub fn is_within(&self, max_x: f64, max_y: f64) -> bool {
        self.x.abs() <= max_x && self.y.abs() <= max_y
    }

    fn within_per_axis(&self, other: &Self, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance
            && (self.y - other.y).abs() < tolerance
    }
}

impl PartialEq for LocalPosition {
    fn eq(&self, other: &Self) -> bool {
        self.is_close(other)
    }
}

impl From<nalgebra::Point2<f64>> for LocalPosition {
    fn from(other: nalgebra::Point2<f64>) -> Self {
        Self::new(other.x, other.y)
    }
}

impl From<LocalPosition> for nalgebra::Point2<f64> {
    fn from(position: LocalPosition) -> Self {
        Self::new(position.x, position.y)
    }
}
