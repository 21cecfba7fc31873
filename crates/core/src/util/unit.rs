use derive_more::{
    Add, AddAssign, Display, Div, DivAssign, From, Into, Mul, MulAssign, Neg,
    Sub, SubAssign, Sum,
};
use serde::{Deserialize, Serialize};

/// Unit used for distances across the planet's surface.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    From,
    Into,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    Sum,
    Serialize,
    Deserialize,
)]
#[display(fmt = "{:.3} km", "self.0")]
pub struct Kilometer(pub f64);

impl Kilometer {
    pub const ZERO: Self = Self(0.0);

    /// The arc angle (radians) that this distance subtends on a sphere of the
    /// given radius
    pub fn to_arc(self, radius: Kilometer) -> f64 {
        self.0 / radius.0
    }

    /// The surface distance covered by an arc angle (radians) on a sphere of
    /// the given radius
    pub fn from_arc(angle: f64, radius: Kilometer) -> Self {
        Self(angle * radius.0)
    }
}
