use crate::{config::GeodesyConfig, surface::coordinate::SphericalCoordinate};
use log::debug;
use std::f64::consts::PI;
use validator::Validate;

/// Anything that sits at a single point on the surface
pub trait Located {
    fn location(&self) -> SphericalCoordinate;
}

impl Located for SphericalCoordinate {
    fn location(&self) -> SphericalCoordinate {
        *self
    }
}

/// A spatial index of entities on the surface, bucketed into bands of equal
/// colatitude. A proximity query only has to scan the bands that overlap the
/// query's colatitude window, then checks the true arc angle to every entity
/// in those bands.
///
/// The partitioning is flat: within a band, every query is a
/// linear scan, and there is no special treatment of the poles or of the
/// antimeridian. Near the poles a band covers the whole planet at that
/// latitude, so a small query there scans a lot of candidates. That's fine for
/// the few hundred to few thousand points of interest this is meant for. More
/// bands helps narrow queries, but doesn't change the worst case.
///
/// Entities are placed once and expected to stay put. If an entity's location
/// changes after it's been added (e.g. through interior mutability), the index
/// is stale until it's told: either [Self::remove_at] + [Self::add] the entity,
/// or call [Self::rebalance] after a batch of moves. Nothing is relocated
/// automatically.
///
/// There is no internal locking. Share the index behind whatever lock the
/// owner already uses, or hand readers a [Clone] as a snapshot.
#[derive(Clone, Debug)]
pub struct SurfaceIndex<T> {
    bands: Vec<Vec<T>>,
}

impl<T: Located> SurfaceIndex<T> {
    pub const DEFAULT_BANDS: usize = 6;

    /// Slack added to each side of the band window, so rounding at a band
    /// boundary can't exclude a true match
    const BAND_PADDING: f64 = 1e-9;

    /// Create an empty index with the given number of bands.
    ///
    /// ## Panics
    /// Panics if `band_count` is zero.
    pub fn new(band_count: usize) -> Self {
        assert!(band_count > 0, "surface index needs at least one band");
        Self {
            bands: (0..band_count).map(|_| Vec::new()).collect(),
        }
    }

    /// Create an empty index with the number of bands from a config. The
    /// config is validated first.
    pub fn from_config(config: &GeodesyConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self::new(config.index_bands))
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// Get the index of the band that a coordinate belongs in
    pub fn band_of(&self, coord: SphericalCoordinate) -> usize {
        self.band_for_phi(coord.phi())
    }

    fn band_for_phi(&self, phi: f64) -> usize {
        band_index(phi, self.bands.len())
    }

    /// Add an entity to the band for its current location
    pub fn add(&mut self, entity: T) {
        let band = self.band_of(entity.location());
        self.bands[band].push(entity);
    }

    /// Find an entity at exactly the given coordinate. If there are multiple,
    /// the first one added is returned.
    pub fn find_at(&self, coord: SphericalCoordinate) -> Option<&T> {
        self.bands[self.band_of(coord)]
            .iter()
            .find(|entity| entity.location() == coord)
    }

    /// Find all entities whose great circle angle from `center` is no more
    /// than `arc` radians. Results are grouped by band, in insertion order
    /// within each band.
    pub fn find_within(
        &self,
        center: SphericalCoordinate,
        arc: f64,
    ) -> Vec<&T> {
        let arc = arc.max(0.0);
        let first = self.band_for_phi(center.phi() - arc - Self::BAND_PADDING);
        let last = self.band_for_phi(center.phi() + arc + Self::BAND_PADDING);
        self.bands[first..=last]
            .iter()
            .flatten()
            .filter(|entity| center.angle_to(&entity.location()) <= arc)
            .collect()
    }

    /// Find the entity closest to `center`, by great circle angle. Every band
    /// is scanned, so this is linear in the size of the index.
    pub fn find_nearest(&self, center: SphericalCoordinate) -> Option<&T> {
        self.iter()
            .map(|entity| (center.angle_to(&entity.location()), entity))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, entity)| entity)
    }

    /// Remove and return the first entity at exactly the given coordinate
    pub fn remove_at(&mut self, coord: SphericalCoordinate) -> Option<T> {
        let band = self.band_of(coord);
        let position = self.bands[band]
            .iter()
            .position(|entity| entity.location() == coord)?;
        Some(self.bands[band].remove(position))
    }

    /// Keep only the entities that match the predicate
    pub fn retain(&mut self, mut predicate: impl FnMut(&T) -> bool) {
        for band in &mut self.bands {
            band.retain(&mut predicate);
        }
    }

    /// Move every entity whose location has changed since it was added into
    /// the band that it now belongs in. Returns the number of entities moved.
    pub fn rebalance(&mut self) -> usize {
        let band_count = self.bands.len();
        let mut strays = Vec::new();
        for (i, band) in self.bands.iter_mut().enumerate() {
            let (home, away): (Vec<T>, Vec<T>) =
                band.drain(..).partition(|entity| {
                    band_index(entity.location().phi(), band_count) == i
                });
            *band = home;
            strays.extend(away);
        }

        let moved = strays.len();
        for entity in strays {
            self.add(entity);
        }
        debug!("Rebalanced surface index, moved {} entities", moved);
        moved
    }

    /// Number of entities in each band, from the north pole southward
    pub fn band_counts(&self) -> Vec<usize> {
        self.bands.iter().map(Vec::len).collect()
    }

    pub fn len(&self) -> usize {
        self.bands.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.iter().all(Vec::is_empty)
    }

    /// Iterate over every entity, band by band
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.bands.iter().flatten()
    }
}

impl<T: Located> Default for SurfaceIndex<T> {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BANDS)
    }
}

/// Band that a colatitude falls into, when the colatitude range is split into
/// `band_count` equal bands. Values outside `[0, π]` are clamped into the end
/// bands.
fn band_index(phi: f64, band_count: usize) -> usize {
    let band = (phi / (PI / band_count as f64)).floor();
    // phi=π lands exactly one past the end, so it goes in the last band
    (band.max(0.0) as usize).min(band_count - 1)
}
