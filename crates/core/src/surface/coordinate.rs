use crate::{
    surface::{
        direction::Direction,
        projection::rect_to_spherical,
        text::{parse_signed_decimal, FormatError},
    },
    util::{range::NumRange, unit::Kilometer, HALF_PI, TWO_PI},
};
use log::trace;
use rand::Rng;
use serde::{de::Visitor, Deserialize, Deserializer, Serialize, Serializer};
use std::{
    f64::consts::PI,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};
use strum::{Display, EnumIter, EnumString};

/// A location on the surface of the planet, in spherical coordinates.
///
/// - `phi` is the colatitude: the angle down from the north pole, in
///   `[0, π]`. The equator is at π/2.
/// - `theta` is the longitude, east-positive, in `[0, 2π)`.
///
/// Both angles are normalized on construction by wrapping them into their
/// canonical ranges (never by clamping). Coordinates are immutable; every
/// operation that "moves" a coordinate returns a new one.
///
/// ## Equality
///
/// Equality and hashing are **exact** on the normalized angles. There is no
/// tolerance, so a coordinate that has been projected to a map and back, or
/// formatted to text and re-parsed, will generally *not* be equal to the
/// original. Use [Self::angle_to] if you need "close enough".
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SphericalCoordinate {
    phi: f64,
    theta: f64,
}

/// The different formulas available for calculating the arc angle between two
/// coordinates. They all agree for well-behaved input, but have different
/// numerical properties at the extremes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "kebab_case")]
pub enum ArcFormula {
    /// https://en.wikipedia.org/wiki/Haversine_formula
    ///
    /// Stable for both tiny and near-antipodal separations. This is the
    /// default.
    Haversine,
    /// https://en.wikipedia.org/wiki/Spherical_law_of_cosines
    ///
    /// Cheap, but loses precision for small separations and needs its cosine
    /// clamped to survive rounding near ±1.
    LawOfCosines,
    /// https://en.wikipedia.org/wiki/Vincenty%27s_formulae (special case for
    /// a sphere)
    Vincenty,
}

impl SphericalCoordinate {
    /// Radius of the planet the simulation runs on, used by the convenience
    /// methods that don't take a [Planet](crate::Planet)
    pub const MARS_RADIUS: Kilometer = Kilometer(3393.0);
    /// Length of each straight step used by [Self::destination]
    pub const PLUMB_STEP: Kilometer = Kilometer(10.0);

    const PHI_RANGE: NumRange = NumRange::new(0.0, PI);
    const THETA_RANGE: NumRange = NumRange::new(0.0, TWO_PI);

    /// Create a new coordinate. `phi` is wrapped into `[0, π]` and `theta`
    /// into `[0, 2π)`. Panics if either angle isn't finite, since that can
    /// only come from a bug upstream.
    pub fn new(phi: f64, theta: f64) -> Self {
        assert!(
            phi.is_finite() && theta.is_finite(),
            "coordinate angles must be finite, got phi={phi}, theta={theta}"
        );
        // Adding zero turns -0.0 into 0.0, so that equal values hash equally
        Self {
            phi: Self::PHI_RANGE.wrap_inclusive(phi) + 0.0,
            theta: Self::THETA_RANGE.wrap(theta) + 0.0,
        }
    }

    /// Create a coordinate from a latitude (degrees, north-positive) and a
    /// longitude (degrees, east-positive)
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self::new((90.0 - latitude).to_radians(), longitude.to_radians())
    }

    /// Pick a random location. Longitude is uniform, but colatitude is kept
    /// within the middle 70% of its range so random sites stay away from the
    /// poles.
    pub fn random(rng: &mut impl Rng) -> Self {
        let phi = rng.gen_range(0.15 * PI..=0.85 * PI);
        let theta = rng.gen_range(0.0..TWO_PI);
        Self::new(phi, theta)
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Latitude in degrees, north-positive, in `[-90, 90]`
    pub fn latitude(&self) -> f64 {
        90.0 - self.phi.to_degrees()
    }

    /// Longitude in degrees, east-positive, in `(-180, 180]`
    pub fn longitude(&self) -> f64 {
        if self.theta <= PI {
            self.theta.to_degrees()
        } else {
            -(TWO_PI - self.theta).to_degrees()
        }
    }

    /// Latitude as an angle in radians, north-positive. This is what most
    /// spherical trig formulas call "declination".
    fn declination(&self) -> f64 {
        HALF_PI - self.phi
    }

    /// Arc angle (radians) between this coordinate and another, calculated
    /// with the haversine formula
    pub fn angle_to(&self, other: &Self) -> f64 {
        self.angle_with(other, ArcFormula::Haversine)
    }

    /// Arc angle (radians) between this coordinate and another, using a
    /// specific formula
    pub fn angle_with(&self, other: &Self, formula: ArcFormula) -> f64 {
        let dec1 = self.declination();
        let dec2 = other.declination();
        let diff_theta = (self.theta - other.theta).abs();

        match formula {
            ArcFormula::Haversine => {
                let diff_dec = (dec1 - dec2).abs();
                let a = (diff_dec / 2.0).sin().powi(2)
                    + dec1.cos()
                        * dec2.cos()
                        * (diff_theta / 2.0).sin().powi(2);
                // Rounding can push this a hair over 1 for antipodes
                2.0 * a.sqrt().min(1.0).asin()
            }
            ArcFormula::LawOfCosines => {
                let cos_angle = dec1.sin() * dec2.sin()
                    + dec1.cos() * dec2.cos() * diff_theta.cos();
                // Floating error overshoots ±1 near coincident and antipodal
                // points, and acos is NaN outside that
                cos_angle.clamp(-1.0, 1.0).acos()
            }
            ArcFormula::Vincenty => {
                let y = ((dec2.cos() * diff_theta.sin()).powi(2)
                    + (dec1.cos() * dec2.sin()
                        - dec1.sin() * dec2.cos() * diff_theta.cos())
                    .powi(2))
                .sqrt();
                let x = dec1.sin() * dec2.sin()
                    + dec1.cos() * dec2.cos() * diff_theta.cos();
                y.atan2(x)
            }
        }
    }

    /// Surface distance to another coordinate on the reference planet. See
    /// [Self::distance_on] to use a different radius.
    pub fn distance_to(&self, other: &Self) -> Kilometer {
        self.distance_on(other, Self::MARS_RADIUS)
    }

    /// Surface distance to another coordinate on a sphere of the given
    /// radius. Identical coordinates are exactly zero apart.
    pub fn distance_on(&self, other: &Self, radius: Kilometer) -> Kilometer {
        if self == other {
            return Kilometer::ZERO;
        }
        Kilometer::from_arc(self.angle_to(other), radius)
    }

    /// Initial bearing from this coordinate towards another along the great
    /// circle between them. 0 is north, increasing clockwise. Works across the
    /// antimeridian because only the sine and cosine of the longitude
    /// difference are used. The bearing between identical points is north.
    pub fn bearing_to(&self, other: &Self) -> Direction {
        let dec1 = self.declination();
        let dec2 = other.declination();
        let diff_theta = other.theta - self.theta;
        let y = diff_theta.sin() * dec2.cos();
        let x = dec1.cos() * dec2.sin()
            - dec1.sin() * dec2.cos() * diff_theta.cos();
        Direction::new(y.atan2(x))
    }

    /// Find the location reached by travelling `distance` from here in the
    /// given direction, on the reference planet. See [Self::destination_on].
    pub fn destination(
        &self,
        direction: Direction,
        distance: Kilometer,
    ) -> Self {
        self.destination_on(
            direction,
            distance,
            Self::MARS_RADIUS,
            Self::PLUMB_STEP,
        )
    }

    /// Find the location reached by travelling `distance` from here in the
    /// given direction.
    ///
    /// This does **not** follow the great circle exactly. The path is broken
    /// into straight "plumb line" steps of length `step`, each laid out in a
    /// flat projection centered on the current location and then projected
    /// back onto the sphere, followed by one final step covering whatever
    /// distance remains. The heading is held constant in each local frame, so
    /// error grows with the number of steps and with how sharply the
    /// surface curves under the path (it's worst near the poles). This
    /// mirrors how vehicles are steered in the simulation, so the drift is
    /// expected.
    ///
    /// A negative distance travels the other way, as if `direction` had been
    /// reversed.
    ///
    /// ## Panics
    /// Panics if `step` isn't positive, or if `distance` isn't finite.
    pub fn destination_on(
        &self,
        direction: Direction,
        distance: Kilometer,
        radius: Kilometer,
        step: Kilometer,
    ) -> Self {
        assert!(step.0 > 0.0, "plumb step must be positive, got {step}");
        assert!(
            distance.0.is_finite(),
            "travel distance must be finite, got {distance}"
        );
        let (direction, distance) = if distance.0 < 0.0 {
            (direction.reverse(), -distance)
        } else {
            (direction, distance)
        };
        let steps = (distance.0 / step.0).floor() as usize;
        let remainder = distance.0 - (steps as f64 * step.0);

        // Screen space has +y pointing south, so north is negative y
        let offset = |length: f64| {
            (direction.sin() * length, -direction.cos() * length)
        };

        let (dx, dy) = offset(step.0);
        let mut location = *self;
        for i in 0..steps {
            location = rect_to_spherical(location, dx, dy, radius.0);
            trace!("plumb line step {} reached {}", i + 1, location);
        }

        let (dx, dy) = offset(remainder);
        rect_to_spherical(location, dx, dy, radius.0)
    }

    /// Format as the locale-independent signed decimal form
    /// `"<latitude> <longitude>"`, at full precision. This is the form used
    /// for persistence. [FromStr] parses it back.
    pub fn to_signed_decimal(&self) -> String {
        format!("{} {}", self.latitude(), self.longitude())
    }
}

impl Eq for SphericalCoordinate {}

impl Hash for SphericalCoordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Construction guarantees finite values with no negative zero, so the
        // bit patterns agree with ==
        self.phi.to_bits().hash(state);
        self.theta.to_bits().hash(state);
    }
}

/// Signed decimal degrees, rounded to 4 places. Use
/// [CoordinateCodec](crate::CoordinateCodec) for the human-readable form.
impl fmt::Display for SphericalCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} {:.4}", self.latitude(), self.longitude())
    }
}

/// Parse the signed decimal form: `"<latitude> <longitude>"`, both in
/// degrees, north- and east-positive. No cardinal letters, no locale.
impl FromStr for SphericalCoordinate {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_signed_decimal(s)
    }
}

impl Serialize for SphericalCoordinate {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_signed_decimal())
    }
}

impl<'de> Deserialize<'de> for SphericalCoordinate {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        struct CoordinateVisitor;

        impl<'de> Visitor<'de> for CoordinateVisitor {
            type Value = SphericalCoordinate;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string of signed decimal degrees")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(CoordinateVisitor)
    }
}
