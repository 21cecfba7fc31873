use crate::util::{range::NumRange, TWO_PI};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A compass direction across the surface, in radians. 0 is north, and angles
/// increase clockwise (so east is π/2). The angle is always normalized into
/// `[0, 2π)`. Sine and cosine are precomputed because every consumer of a
/// direction ends up needing both.
#[derive(Copy, Clone, Debug, Display, Serialize, Deserialize)]
#[display(fmt = "{:.1}°", "self.degrees()")]
#[serde(from = "f64", into = "f64")]
pub struct Direction {
    radians: f64,
    sin: f64,
    cos: f64,
}

impl Direction {
    const RANGE: NumRange = NumRange::new(0.0, TWO_PI);

    pub const NORTH: Self = Self {
        radians: 0.0,
        sin: 0.0,
        cos: 1.0,
    };

    pub fn new(radians: f64) -> Self {
        let radians = Self::RANGE.wrap(radians);
        Self {
            radians,
            sin: radians.sin(),
            cos: radians.cos(),
        }
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Self::new(degrees.to_radians())
    }

    pub fn radians(&self) -> f64 {
        self.radians
    }

    pub fn degrees(&self) -> f64 {
        self.radians.to_degrees()
    }

    pub fn sin(&self) -> f64 {
        self.sin
    }

    pub fn cos(&self) -> f64 {
        self.cos
    }

    /// The direction pointing the opposite way
    pub fn reverse(&self) -> Self {
        Self::new(self.radians + std::f64::consts::PI)
    }
}

// Sin/cos are derived, so only the angle matters
impl PartialEq for Direction {
    fn eq(&self, other: &Self) -> bool {
        self.radians == other.radians
    }
}

impl From<f64> for Direction {
    fn from(radians: f64) -> Self {
        Self::new(radians)
    }
}

impl From<Direction> for f64 {
    fn from(direction: Direction) -> Self {
        direction.radians
    }
}
