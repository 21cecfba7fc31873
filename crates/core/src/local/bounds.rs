use crate::local::{position::LocalPosition, transform::FrameTransform};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A rectangular footprint placed within a parent frame, e.g. a building or a
/// parked vehicle in a settlement
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalBounds {
    /// Center of the rectangle, in the parent frame
    pub position: LocalPosition,
    /// Extent along the object's own x axis, in meters
    pub length: f64,
    /// Extent along the object's own y axis, in meters
    pub width: f64,
    /// Rotation within the parent frame, in degrees
    pub facing: f64,
}

impl LocalBounds {
    /// Space kept between generated interior positions and the walls
    pub const INNER_MARGIN: f64 = 1.5;

    pub fn new(
        position: LocalPosition,
        length: f64,
        width: f64,
        facing: f64,
    ) -> Self {
        Self {
            position,
            length,
            width,
            facing,
        }
    }

    pub fn transform(&self) -> FrameTransform {
        FrameTransform::new(self.facing, self.position)
    }

    /// The four corners, in the parent frame, going around the rectangle
    pub fn corners(&self) -> [LocalPosition; 4] {
        let transform = self.transform();
        let half_length = self.length / 2.0;
        let half_width = self.width / 2.0;
        [
            (half_length, half_width),
            (-half_length, half_width),
            (-half_length, -half_width),
            (half_length, -half_width),
        ]
        .map(|(x, y)| transform.to_parent(LocalPosition::new(x, y)))
    }

    /// The four walls, each as a pair of corners, in the order given by
    /// [Self::corners]
    pub fn walls(&self) -> [(LocalPosition, LocalPosition); 4] {
        let corners = self.corners();
        [0, 1, 2, 3].map(|i| (corners[i], corners[(i + 1) % 4]))
    }

    /// Does this footprint contain a point from the parent frame? Points on
    /// the edge count as inside.
    pub fn contains(&self, point: LocalPosition) -> bool {
        self.transform()
            .contains(self.length / 2.0, self.width / 2.0, point)
    }

    /// Do two footprints in the same parent frame overlap? Touching edges
    /// count as overlapping.
    pub fn intersects(&self, other: &Self) -> bool {
        let ours = self.corners();
        let theirs = other.corners();
        // Separating axis test. For rectangles, the only candidate axes are
        // the edge normals of each one.
        [self.transform(), other.transform()]
            .iter()
            .flat_map(|transform| {
                let (cos, sin) = (transform.cos(), transform.sin());
                [(cos, sin), (-sin, cos)]
            })
            .all(|axis| {
                let (our_min, our_max) = project(&ours, axis);
                let (their_min, their_max) = project(&theirs, axis);
                our_min <= their_max && their_min <= our_max
            })
    }

    /// Does a straight path from `start` to `end` touch this footprint? A
    /// path that only grazes a wall or a corner counts, as does one that lies
    /// entirely inside.
    pub fn intersects_segment(
        &self,
        start: LocalPosition,
        end: LocalPosition,
    ) -> bool {
        let corners = self.corners();
        let path = [start, end];
        let transform = self.transform();
        let (cos, sin) = (transform.cos(), transform.sin());
        // The path's own normal is the third candidate axis. A zero-length
        // path gives a zero axis, which never separates anything.
        let normal = (start.y - end.y, end.x - start.x);
        [(cos, sin), (-sin, cos), normal].into_iter().all(|axis| {
            let (our_min, our_max) = project(&corners, axis);
            let (path_min, path_max) = project(&path, axis);
            our_min <= path_max && path_min <= our_max
        })
    }

    /// Points where a straight path from `start` to `end` crosses the walls.
    /// A path through a corner reports that corner once. A wall that the path
    /// runs along doesn't cross it at a single point, so it's skipped.
    pub fn collision_points(
        &self,
        start: LocalPosition,
        end: LocalPosition,
    ) -> Vec<LocalPosition> {
        let mut points: Vec<LocalPosition> = Vec::new();
        for (a, b) in self.walls() {
            if let Some(point) = crossing(start, end, a, b) {
                if !points.contains(&point) {
                    points.push(point);
                }
            }
        }
        points
    }

    /// A random point inside the footprint, in the parent frame. If
    /// `keep_clear_of_walls` is set, the point is kept [Self::INNER_MARGIN]
    /// away from every wall, unless the footprint is too small for that, in
    /// which case that axis collapses onto the center line.
    pub fn random_interior_position(
        &self,
        rng: &mut impl Rng,
        keep_clear_of_walls: bool,
    ) -> LocalPosition {
        let margin = if keep_clear_of_walls {
            Self::INNER_MARGIN * 2.0
        } else {
            0.0
        };
        let local = LocalPosition::new(
            random_centered(rng, self.length - margin),
            random_centered(rng, self.width - margin),
        );
        self.transform().to_parent(local)
    }

    /// A random point `distance` meters outside one of the four walls, in the
    /// parent frame
    pub fn random_exterior_position(
        &self,
        rng: &mut impl Rng,
        distance: f64,
    ) -> LocalPosition {
        let half_length = self.length / 2.0 + distance;
        let half_width = self.width / 2.0 + distance;
        let local = match rng.gen_range(0..4) {
            // Front
            0 => LocalPosition::new(
                half_length,
                random_centered(rng, half_width * 2.0),
            ),
            // Back
            1 => LocalPosition::new(
                -half_length,
                random_centered(rng, half_width * 2.0),
            ),
            // Left
            2 => LocalPosition::new(
                random_centered(rng, half_length * 2.0),
                half_width,
            ),
            // Right
            _ => LocalPosition::new(
                random_centered(rng, half_length * 2.0),
                -half_width,
            ),
        };
        self.transform().to_parent(local)
    }
}

/// Random value in `[-range/2, range/2)`, or 0 if the range is empty
fn random_centered(rng: &mut impl Rng, range: f64) -> f64 {
    if range > 0.0 {
        rng.gen::<f64>() * range - range / 2.0
    } else {
        0.0
    }
}

/// Where segment `p1`-`p2` crosses segment `q1`-`q2`, if anywhere. Parallel
/// segments have no single crossing.
fn crossing(
    p1: LocalPosition,
    p2: LocalPosition,
    q1: LocalPosition,
    q2: LocalPosition,
) -> Option<LocalPosition> {
    let (rx, ry) = (p2.x - p1.x, p2.y - p1.y);
    let (sx, sy) = (q2.x - q1.x, q2.y - q1.y);
    let denominator = rx * sy - ry * sx;
    if denominator.abs() < f64::EPSILON {
        return None;
    }
    let (qx, qy) = (q1.x - p1.x, q1.y - p1.y);
    let t = (qx * sy - qy * sx) / denominator;
    let u = (qx * ry - qy * rx) / denominator;
    let unit = 0.0..=1.0;
    (unit.contains(&t) && unit.contains(&u))
        .then(|| LocalPosition::new(p1.x + t * rx, p1.y + t * ry))
}

/// Min and max of some points projected onto an axis
fn project(points: &[LocalPosition], (ax, ay): (f64, f64)) -> (f64, f64) {
    points.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), corner| {
            let dot = corner.x * ax + corner.y * ay;
            (min.min(dot), max.max(dot))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn building() -> LocalBounds {
        LocalBounds::new(LocalPosition::new(10.0, 0.0), 9.0, 9.0, 0.0)
    }

    #[test]
    fn test_corners() {
        let bounds =
            LocalBounds::new(LocalPosition::new(0.0, 0.0), 4.0, 2.0, 90.0);
        let corners = bounds.corners();
        // Length runs along the parent's y axis after a quarter turn
        assert_approx_eq!(corners[0].x, -1.0);
        assert_approx_eq!(corners[0].y, 2.0);
        assert_approx_eq!(corners[2].x, 1.0);
        assert_approx_eq!(corners[2].y, -2.0);
    }

    #[test]
    fn test_contains() {
        let bounds = building();
        assert!(bounds.contains(LocalPosition::new(11.0, -1.0)));
        assert!(bounds.contains(LocalPosition::new(14.5, 4.5)));
        assert!(!bounds.contains(LocalPosition::new(14.6, 0.0)));
    }

    #[test]
    fn test_intersects() {
        let a = building();
        let touching =
            LocalBounds::new(LocalPosition::new(19.0, 0.0), 9.0, 9.0, 0.0);
        let apart =
            LocalBounds::new(LocalPosition::new(20.0, 0.0), 9.0, 9.0, 0.0);
        assert!(a.intersects(&touching));
        assert!(!a.intersects(&apart));

        // A diamond off the corner. Its bounding box overlaps the square, but
        // the diamond itself doesn't reach it.
        let diamond =
            LocalBounds::new(LocalPosition::new(17.5, 7.5), 6.0, 6.0, 45.0);
        assert!(!a.intersects(&diamond));
        assert!(!diamond.intersects(&a));

        let rotated =
            LocalBounds::new(LocalPosition::new(16.0, 0.0), 4.0, 1.0, 30.0);
        assert!(a.intersects(&rotated));
        assert!(rotated.intersects(&a));
    }

    #[test]
    fn test_intersects_segment() {
        let bounds = building();
        let p = LocalPosition::new;
        // Straight through
        assert!(bounds.intersects_segment(p(0.0, 0.0), p(20.0, 0.0)));
        // Ending right on the east wall
        assert!(bounds.intersects_segment(p(20.0, 0.0), p(14.5, 0.0)));
        // Running along the north wall
        assert!(bounds.intersects_segment(p(0.0, 4.5), p(20.0, 4.5)));
        // Entirely inside
        assert!(bounds.intersects_segment(p(8.0, 0.0), p(12.0, 0.0)));
        // Clear to the north
        assert!(!bounds.intersects_segment(p(0.0, 10.0), p(20.0, 10.0)));
        // Cutting past the corner, inside its bounding box but missing it
        assert!(!bounds.intersects_segment(p(14.0, 6.0), p(16.0, 4.0)));
        assert!(!bounds.intersects_segment(p(16.0, 4.0), p(14.0, 6.0)));
    }

    #[test]
    fn test_collision_points() {
        let bounds = building();
        let p = LocalPosition::new;

        let points = bounds.collision_points(p(0.0, 0.0), p(20.0, 0.0));
        assert_eq!(points, vec![p(5.5, 0.0), p(14.5, 0.0)]);

        let points = bounds.collision_points(p(20.0, 0.0), p(14.5, 0.0));
        assert_eq!(points, vec![p(14.5, 0.0)]);

        // Diagonal through two opposite corners, each reported once
        let points = bounds.collision_points(p(0.0, -10.0), p(20.0, 10.0));
        assert_eq!(points.len(), 2);
        assert!(points.contains(&p(14.5, 4.5)));
        assert!(points.contains(&p(5.5, -4.5)));

        assert!(bounds
            .collision_points(p(8.0, 0.0), p(12.0, 0.0))
            .is_empty());
        assert!(bounds
            .collision_points(p(0.0, 10.0), p(20.0, 10.0))
            .is_empty());

        // Rotated a quarter turn, so the long sides face east and west
        let rotated =
            LocalBounds::new(LocalPosition::new(0.0, 0.0), 4.0, 2.0, 90.0);
        let points = rotated.collision_points(p(-5.0, 0.0), p(5.0, 0.0));
        assert_eq!(points.len(), 2);
        assert!(points.contains(&p(-1.0, 0.0)));
        assert!(points.contains(&p(1.0, 0.0)));
        assert!(rotated.intersects_segment(p(-5.0, 0.0), p(5.0, 0.0)));
        assert!(!rotated.intersects_segment(p(-5.0, 3.0), p(5.0, 3.0)));
    }

    #[test]
    fn test_random_interior() {
        let mut rng = Pcg64::seed_from_u64(1);
        let bounds =
            LocalBounds::new(LocalPosition::new(-4.0, 7.0), 12.0, 5.0, 135.0);
        let transform = bounds.transform();
        for _ in 0..100 {
            let point = bounds.random_interior_position(&mut rng, true);
            assert!(bounds.contains(point));
            assert!(transform.to_local(point).is_within(4.5, 1.0));
        }

        let tiny =
            LocalBounds::new(LocalPosition::new(3.0, 3.0), 2.0, 2.0, 0.0);
        let point = tiny.random_interior_position(&mut rng, true);
        assert_eq!(point, LocalPosition::new(3.0, 3.0));
    }

    #[test]
    fn test_random_exterior() {
        let mut rng = Pcg64::seed_from_u64(2);
        let bounds =
            LocalBounds::new(LocalPosition::new(2.0, -3.0), 10.0, 6.0, 60.0);
        let transform = bounds.transform();
        for _ in 0..100 {
            let point = bounds.random_exterior_position(&mut rng, 1.0);
            assert!(!bounds.contains(point));
            let local = transform.to_local(point);
            assert!(local.is_within(6.0 + 1e-9, 4.0 + 1e-9));
            let on_end = (local.x.abs() - 6.0).abs() < 1e-9;
            let on_side = (local.y.abs() - 4.0).abs() < 1e-9;
            assert!(on_end || on_side, "{local} is not on the outer ring");
        }
    }
}
