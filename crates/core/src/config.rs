use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration that defines the planet that all geodesy is done on, plus the
/// knobs of the approximations used along the way. Two [Planet](crate::Planet)s
/// built from the same config will always produce identical results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "bevy", derive(bevy_ecs::system::Resource))]
#[serde(default)]
pub struct GeodesyConfig {
    /// Radius of the planet, in kilometers. The planet is treated as a perfect
    /// sphere. The default is the radius the simulation has always used for
    /// Mars.
    #[validate(range(min = 0.001))]
    pub planet_radius_km: f64,

    /// Length of each straight "plumb line" step used to approximate a great
    /// circle path when moving a coordinate. Smaller steps track the true
    /// path more closely but cost one projection per step. See
    /// [Planet::destination](crate::Planet::destination).
    #[validate(range(min = 0.001))]
    pub plumb_step_km: f64,

    /// Number of latitude bands in a [SurfaceIndex](crate::SurfaceIndex). Each
    /// band covers `π / index_bands` of colatitude. More bands means smaller
    /// scans for narrow queries, but every band is a flat list so there is no
    /// benefit past the point where bands hold a handful of entities.
    #[validate(range(min = 1, max = 180))]
    pub index_bands: usize,

    /// Number of fractional digits used when formatting coordinates as text
    #[validate(range(min = 0, max = 12))]
    pub precision: usize,

    /// Locale-specific glyphs used when parsing and formatting coordinate text
    #[validate]
    pub glyphs: CardinalGlyphs,
}

/// The glyphs that a locale uses to mark cardinal directions and degrees.
/// English uses N/E/S/W, German uses N/O/S/W, French uses N/E/S/O, etc. These
/// are always passed explicitly to the codec, there is no global locale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CardinalGlyphs {
    #[validate(length(min = 1))]
    pub north: String,
    #[validate(length(min = 1))]
    pub south: String,
    #[validate(length(min = 1))]
    pub east: String,
    #[validate(length(min = 1))]
    pub west: String,
    /// Optional marker between the number and the direction, e.g. the `°` in
    /// `25.3° N`
    #[validate(length(min = 1))]
    pub degree: String,
}

impl CardinalGlyphs {
    /// Glyphs for a German locale (Ost instead of East)
    pub fn german() -> Self {
        Self {
            east: "O".into(),
            ..Self::default()
        }
    }

    /// Glyphs for a French locale (Ouest instead of West)
    pub fn french() -> Self {
        Self {
            west: "O".into(),
            ..Self::default()
        }
    }
}

impl Default for GeodesyConfig {
    fn default() -> Self {
        Self {
            planet_radius_km: 3393.0,
            plumb_step_km: 10.0,
            index_bands: 6,
            precision: 4,
            glyphs: CardinalGlyphs::default(),
        }
    }
}

impl Default for CardinalGlyphs {
    fn default() -> Self {
        Self {
            north: "N".into(),
            south: "S".into(),
            east: "E".into(),
            west: "W".into(),
            degree: "°".into(),
        }
    }
}
