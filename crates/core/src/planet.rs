use crate::{
    config::GeodesyConfig,
    surface::{
        coordinate::SphericalCoordinate,
        direction::Direction,
        index::{Located, SurfaceIndex},
        projection::{MapViewport, RectProjector},
        text::CoordinateCodec,
    },
    util::unit::Kilometer,
};
use anyhow::Context;
use log::debug;
use validator::Validate;

/// A planet that geodesy is done on. This bundles a validated
/// [GeodesyConfig] with the operations that depend on it, so callers don't
/// have to thread the radius and step size through every call.
#[derive(Clone, Debug, PartialEq)]
pub struct Planet {
    config: GeodesyConfig,
}

impl Planet {
    /// Build a planet from a config. The config is validated first, and
    /// will be rejected if invalid.
    pub fn new(config: GeodesyConfig) -> anyhow::Result<Self> {
        debug!("Building planet with config {:#?}", config);
        config.validate().context("invalid config")?;
        Ok(Self { config })
    }

    /// Mars, with the default config
    pub fn mars() -> Self {
        Self {
            config: GeodesyConfig::default(),
        }
    }

    pub fn config(&self) -> &GeodesyConfig {
        &self.config
    }

    pub fn radius(&self) -> Kilometer {
        Kilometer(self.config.planet_radius_km)
    }

    /// Great circle distance between two coordinates on the surface
    pub fn distance(
        &self,
        from: SphericalCoordinate,
        to: SphericalCoordinate,
    ) -> Kilometer {
        from.distance_on(&to, self.radius())
    }

    /// Compass direction to travel from one coordinate towards another
    pub fn bearing(
        &self,
        from: SphericalCoordinate,
        to: SphericalCoordinate,
    ) -> Direction {
        from.bearing_to(&to)
    }

    /// Move from a coordinate in a direction, using this planet's radius and
    /// plumb line step size
    pub fn destination(
        &self,
        from: SphericalCoordinate,
        direction: Direction,
        distance: Kilometer,
    ) -> SphericalCoordinate {
        from.destination_on(
            direction,
            distance,
            self.radius(),
            Kilometer(self.config.plumb_step_km),
        )
    }

    /// A text codec with this planet's glyphs and precision
    pub fn codec(&self) -> CoordinateCodec {
        CoordinateCodec::new(self.config.glyphs.clone())
            .with_precision(self.config.precision)
    }

    /// An empty index with this planet's band count
    pub fn surface_index<T: Located>(&self) -> SurfaceIndex<T> {
        SurfaceIndex::new(self.config.index_bands)
    }

    /// A projector for a map centered on `center`, with the whole planet
    /// scaled to a globe `globe_radius` pixels across
    pub fn projector(
        &self,
        center: SphericalCoordinate,
        globe_radius: f64,
        viewport: MapViewport,
    ) -> RectProjector {
        RectProjector::new(center, globe_radius, viewport)
    }
}

impl Default for Planet {
    fn default() -> Self {
        Self::mars()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_invalid_config() {
        let config = GeodesyConfig {
            plumb_step_km: 0.0,
            ..Default::default()
        };
        let error = Planet::new(config).unwrap_err();
        assert_eq!(error.to_string(), "invalid config");
    }

    #[test]
    fn test_custom_radius() {
        let earth = Planet::new(GeodesyConfig {
            planet_radius_km: 6371.0,
            ..Default::default()
        })
        .unwrap();
        let equator = SphericalCoordinate::from_degrees(0.0, 0.0);
        let pole = SphericalCoordinate::from_degrees(90.0, 0.0);
        assert_approx_eq!(
            earth.distance(equator, pole).0,
            6371.0 * std::f64::consts::FRAC_PI_2,
            1e-6
        );

        let moved = earth.destination(
            equator,
            Direction::from_degrees(90.0),
            Kilometer(100.0),
        );
        assert_approx_eq!(earth.distance(equator, moved).0, 100.0, 0.01);
        assert_approx_eq!(earth.bearing(equator, moved).degrees(), 90.0, 1e-6);
    }

    #[test]
    fn test_codec_follows_config() {
        let planet = Planet::new(GeodesyConfig {
            precision: 2,
            glyphs: crate::CardinalGlyphs::german(),
            ..Default::default()
        })
        .unwrap();
        let coord = SphericalCoordinate::from_degrees(-1.0, 2.0);
        assert_eq!(planet.codec().format(coord), "1.00 S 2.00 O");
    }
}
