use areo::{Located, Planet, SphericalCoordinate, SurfaceIndex};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::f64::consts::PI;

#[derive(Clone, Debug, PartialEq)]
struct Landmark {
    name: String,
    location: SphericalCoordinate,
}

impl Located for Landmark {
    fn location(&self) -> SphericalCoordinate {
        self.location
    }
}

/// Random points anywhere on the sphere, including right on the poles and
/// the antimeridian
fn landmarks(rng: &mut impl Rng, count: usize) -> Vec<Landmark> {
    let mut landmarks: Vec<Landmark> = (0..count)
        .map(|i| Landmark {
            name: format!("landmark-{i}"),
            location: SphericalCoordinate::new(
                rng.gen_range(0.0..=PI),
                rng.gen_range(0.0..2.0 * PI),
            ),
        })
        .collect();
    for (i, (phi, theta)) in
        [(0.0, 0.0), (PI, 0.0), (PI / 2.0, PI), (PI / 3.0, PI)]
            .into_iter()
            .enumerate()
    {
        landmarks.push(Landmark {
            name: format!("fixed-{i}"),
            location: SphericalCoordinate::new(phi, theta),
        });
    }
    landmarks
}

#[test]
fn test_find_within_matches_brute_force() {
    let mut rng = Pcg64::seed_from_u64(3393);
    let landmarks = landmarks(&mut rng, 400);

    for band_count in [1, 2, 6, 17, 180] {
        let mut index = SurfaceIndex::new(band_count);
        for landmark in &landmarks {
            index.add(landmark.clone());
        }
        assert_eq!(index.len(), landmarks.len());
        assert_eq!(index.band_counts().iter().sum::<usize>(), landmarks.len());

        for _ in 0..100 {
            let center = SphericalCoordinate::new(
                rng.gen_range(0.0..=PI),
                rng.gen_range(0.0..2.0 * PI),
            );
            let arc = rng.gen_range(0.0..PI);
            let mut found: Vec<&str> = index
                .find_within(center, arc)
                .into_iter()
                .map(|landmark| landmark.name.as_str())
                .collect();
            let mut expected: Vec<&str> = landmarks
                .iter()
                .filter(|landmark| center.angle_to(&landmark.location) <= arc)
                .map(|landmark| landmark.name.as_str())
                .collect();
            found.sort_unstable();
            expected.sort_unstable();
            assert_eq!(
                found, expected,
                "{band_count} bands, {center} ± {arc}"
            );
        }
    }
}

#[test]
fn test_query_on_exact_entity() {
    let mut rng = Pcg64::seed_from_u64(5);
    let landmarks = landmarks(&mut rng, 100);
    let mut index: SurfaceIndex<Landmark> = Planet::mars().surface_index();
    for landmark in &landmarks {
        index.add(landmark.clone());
    }

    for landmark in &landmarks {
        assert_eq!(index.find_at(landmark.location), Some(landmark));
        let found = index.find_within(landmark.location, 0.0);
        assert!(found.contains(&landmark), "{} not found", landmark.name);
        assert_eq!(
            index.find_nearest(landmark.location).map(|l| &l.name),
            Some(&landmark.name)
        );
    }
}

#[test]
fn test_remove_and_reinsert() {
    let mut index = SurfaceIndex::default();
    let origin = SphericalCoordinate::from_degrees(0.0, 0.0);
    let moved = SphericalCoordinate::from_degrees(70.0, 10.0);
    index.add(Landmark {
        name: "rover".into(),
        location: origin,
    });

    let mut rover = index.remove_at(origin).unwrap();
    assert!(index.is_empty());
    rover.location = moved;
    index.add(rover);

    assert!(index.find_at(origin).is_none());
    assert_eq!(index.find_at(moved).unwrap().name, "rover");
    assert_eq!(index.band_counts(), vec![1, 0, 0, 0, 0, 0]);
}
