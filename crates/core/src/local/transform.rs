use crate::local::position::LocalPosition;
use nalgebra::{Isometry2, Point2, Vector2};

/// A rigid transform between an object's own frame and the frame of whatever
/// it's placed in (e.g. a building within a settlement). In the object's
/// frame, the origin is the object's center, +x runs along its length and +y
/// along its width. Converting to the parent frame rotates by the object's
/// facing, then translates by its position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameTransform {
    /// Facing in degrees, as given
    facing: f64,
    isometry: Isometry2<f64>,
}

impl FrameTransform {
    pub fn new(facing_degrees: f64, origin: LocalPosition) -> Self {
        Self {
            facing: facing_degrees,
            isometry: Isometry2::new(
                Vector2::new(origin.x, origin.y),
                facing_degrees.to_radians(),
            ),
        }
    }

    /// Facing of the object within its parent frame, in degrees
    pub fn facing(&self) -> f64 {
        self.facing
    }

    /// Position of the object's center within its parent frame
    pub fn origin(&self) -> LocalPosition {
        let translation = self.isometry.translation.vector;
        LocalPosition::new(translation.x, translation.y)
    }

    pub fn cos(&self) -> f64 {
        self.isometry.rotation.cos_angle()
    }

    pub fn sin(&self) -> f64 {
        self.isometry.rotation.sin_angle()
    }

    /// Convert a point in the object's frame to the parent frame
    pub fn to_parent(&self, local: LocalPosition) -> LocalPosition {
        self.isometry
            .transform_point(&Point2::from(local))
            .into()
    }

    /// Convert a point in the parent frame to the object's frame
    pub fn to_local(&self, parent: LocalPosition) -> LocalPosition {
        self.isometry
            .inverse_transform_point(&Point2::from(parent))
            .into()
    }

    /// Does the rectangle of the given half-dimensions, centered on this
    /// frame's origin, contain a point from the parent frame?
    pub fn contains(
        &self,
        half_length: f64,
        half_width: f64,
        parent: LocalPosition,
    ) -> bool {
        self.to_local(parent).is_within(half_length, half_width)
    }
}
