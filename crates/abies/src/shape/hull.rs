use super::{aabb::AABB, MAX_POLYGON_VERTICES};
use crate::math::{vector::Vector, FloatNum};
use crate::tolerance::Tolerance;
use log::warn;

/// A convex hull, the intermediate result used to build polygons.
///
/// `create` welds near-coincident input points and drops near-collinear
/// ones; on any degenerate input (fewer than 3 points, more than
/// [`MAX_POLYGON_VERTICES`], everything welded together, everything on
/// one line) it reports an empty hull with `count() == 0` instead of
/// failing.
#[derive(Clone, Copy, Debug)]
pub struct Hull {
    points: [Vector; MAX_POLYGON_VERTICES],
    count: usize,
}

impl Hull {
    const EMPTY: Hull = Hull {
        points: [Vector::new(0., 0.); MAX_POLYGON_VERTICES],
        count: 0,
    };

    #[inline]
    pub fn points(&self) -> &[Vector] {
        &self.points[..self.count]
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Quickhull over the points strictly to the right of the directed
    /// line p1-p2.
    fn recurse_create(p1: Vector, p2: Vector, points: &[Vector], tolerance: &Tolerance) -> Hull {
        let mut result = Self::EMPTY;

        if points.is_empty() {
            return result;
        }

        let e = (p2 - p1).normalize();

        // keep points right of e, track the furthest one
        let mut right_points = [Vector::new(0., 0.); MAX_POLYGON_VERTICES];
        let mut right_count = 0;
        let mut best_index = 0;
        let mut best_distance = (points[0] - p1) ^ e;

        if best_distance > 0. {
            right_points[right_count] = points[0];
            right_count += 1;
        }

        for (index, point) in points.iter().enumerate().skip(1) {
            let distance = (*point - p1) ^ e;

            if distance > best_distance {
                best_index = index;
                best_distance = distance;
            }

            if distance > 0. {
                right_points[right_count] = *point;
                right_count += 1;
            }
        }

        if best_distance < tolerance.collinearity_slop() {
            return result;
        }

        let best_point = points[best_index];
        let h1 = Self::recurse_create(p1, best_point, &right_points[..right_count], tolerance);
        let h2 = Self::recurse_create(best_point, p2, &right_points[..right_count], tolerance);

        // stitch sub-hulls together around the furthest point
        for point in h1.points() {
            result.points[result.count] = *point;
            result.count += 1;
        }

        result.points[result.count] = best_point;
        result.count += 1;

        for point in h2.points() {
            result.points[result.count] = *point;
            result.count += 1;
        }

        debug_assert!(result.count < MAX_POLYGON_VERTICES);

        result
    }

    pub fn create(points: &[Vector], tolerance: &Tolerance) -> Hull {
        let result = Self::EMPTY;

        if points.len() < 3 || points.len() > MAX_POLYGON_VERTICES {
            warn!(
                "too few or too many points to create a hull: {}",
                points.len()
            );
            return result;
        }

        let weld_tolerance_squared = tolerance.weld_tolerance_squared();
        let collinearity_slop = tolerance.collinearity_slop();

        let mut aabb = AABB::new(
            Vector::new(FloatNum::MAX, FloatNum::MAX),
            Vector::new(FloatNum::MIN, FloatNum::MIN),
        );

        // aggressive point welding; the first point always survives
        let mut computed_points = [Vector::new(0., 0.); MAX_POLYGON_VERTICES];
        let mut computed_count = 0;
        for (index, point) in points.iter().enumerate() {
            aabb = aabb.combine_point(*point);

            let unique = points[..index]
                .iter()
                .all(|prev| point.distance_squared(prev) >= weld_tolerance_squared);

            if unique {
                computed_points[computed_count] = *point;
                computed_count += 1;
            }
        }

        if computed_count < 3 {
            warn!("all points very close together, check your data and check your scale");
            return result;
        }

        let find_furthest = |points: &[Vector], base: Vector| -> usize {
            let mut furthest = 0;
            let mut furthest_distance = base.distance_squared(&points[0]);
            for (index, point) in points.iter().enumerate().skip(1) {
                let distance = base.distance_squared(point);
                if distance > furthest_distance {
                    furthest = index;
                    furthest_distance = distance;
                }
            }
            furthest
        };

        // extreme point relative to the bounding-box center seeds the hull
        let center = aabb.center();
        let index_p1 = find_furthest(&computed_points[..computed_count], center);
        let p1 = computed_points[index_p1];

        computed_points[index_p1] = computed_points[computed_count - 1];
        computed_count -= 1;

        let index_p2 = find_furthest(&computed_points[..computed_count], p1);
        let p2 = computed_points[index_p2];

        computed_points[index_p2] = computed_points[computed_count - 1];
        computed_count -= 1;

        let e = (p2 - p1).normalize();

        // partition the rest left/right of the line p1-p2, with a slop
        // deadband dropping points too close to the line
        let mut right_points = [Vector::new(0., 0.); MAX_POLYGON_VERTICES - 2];
        let mut left_points = [Vector::new(0., 0.); MAX_POLYGON_VERTICES - 2];
        let mut right_count = 0;
        let mut left_count = 0;

        for point in &computed_points[..computed_count] {
            let d = (*point - p1) ^ e;
            if d >= collinearity_slop {
                right_points[right_count] = *point;
                right_count += 1;
            } else if d <= -collinearity_slop {
                left_points[left_count] = *point;
                left_count += 1;
            }
        }

        let h1 = Self::recurse_create(p1, p2, &right_points[..right_count], tolerance);
        let h2 = Self::recurse_create(p2, p1, &left_points[..left_count], tolerance);

        if h1.count == 0 && h2.count == 0 {
            warn!("all points collinear");
            return result;
        }

        // stitch hulls together, preserving CCW winding order
        let mut result = Self::EMPTY;

        result.points[result.count] = p1;
        result.count += 1;

        for point in h1.points() {
            result.points[result.count] = *point;
            result.count += 1;
        }

        result.points[result.count] = p2;
        result.count += 1;

        for point in h2.points() {
            result.points[result.count] = *point;
            result.count += 1;
        }

        debug_assert!(result.count <= MAX_POLYGON_VERTICES);

        // merge collinear triples until none remain
        let mut searching = true;
        while searching && result.count > 2 {
            searching = false;

            for i1 in 0..result.count {
                let i2 = (i1 + 1) % result.count;
                let i3 = (i1 + 2) % result.count;

                let s1 = result.points[i1];
                let s2 = result.points[i2];
                let s3 = result.points[i3];

                let r = (s3 - s1).normalize();
                let distance = (s2 - s1) ^ r;
                if distance <= collinearity_slop {
                    // drop the midpoint
                    for j in i2..result.count - 1 {
                        result.points[j] = result.points[j + 1];
                    }
                    result.count -= 1;

                    searching = true;
                    break;
                }
            }
        }

        if result.count < 3 {
            warn!("hull collapsed to a line while merging collinear points");
            result.count = 0;
        }

        result
    }

    /// Re-verifies convexity (every point strictly behind every edge)
    /// and non-collinearity of every vertex triple. O(n²), intended for
    /// debug and test use, not the hot path.
    pub fn is_valid(&self, tolerance: &Tolerance) -> bool {
        if self.count < 3 || self.count > MAX_POLYGON_VERTICES {
            return false;
        }

        for index_p1 in 0..self.count {
            let index_p2 = if index_p1 < self.count - 1 {
                index_p1 + 1
            } else {
                0
            };

            let p1 = self.points[index_p1];
            let p2 = self.points[index_p2];

            let e = (p2 - p1).normalize();

            for (index, point) in self.points[..self.count].iter().enumerate() {
                if index == index_p1 || index == index_p2 {
                    continue;
                }

                let distance = (*point - p1) ^ e;
                if distance >= 0. {
                    return false;
                }
            }
        }

        for index_p1 in 0..self.count {
            let index_p2 = (index_p1 + 1) % self.count;
            let index_p3 = (index_p1 + 2) % self.count;

            let p1 = self.points[index_p1];
            let p2 = self.points[index_p2];
            let p3 = self.points[index_p3];

            let e = (p3 - p1).normalize();

            let distance = (p2 - p1) ^ e;
            if distance <= tolerance.linear_slop() {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tolerance() -> Tolerance {
        Tolerance::default()
    }

    #[test]
    fn test_square_hull() {
        let points: [Vector; 4] = [
            (-1., -1.).into(),
            (1., -1.).into(),
            (1., 1.).into(),
            (-1., 1.).into(),
        ];
        let hull = Hull::create(&points, &tolerance());
        assert_eq!(hull.count(), 4);
        assert!(hull.is_valid(&tolerance()));
    }

    #[test]
    fn test_interior_points_dropped() {
        let points: [Vector; 5] = [
            (-1., -1.).into(),
            (1., -1.).into(),
            (1., 1.).into(),
            (-1., 1.).into(),
            (0., 0.).into(),
        ];
        let hull = Hull::create(&points, &tolerance());
        assert_eq!(hull.count(), 4);
        assert!(hull.is_valid(&tolerance()));
        assert!(hull.points().iter().all(|p| *p != (0., 0.).into()));
    }

    #[test]
    fn test_too_few_points() {
        let points: [Vector; 2] = [(0., 0.).into(), (1., 0.).into()];
        let hull = Hull::create(&points, &tolerance());
        assert!(hull.is_empty());
    }

    #[test]
    fn test_all_collinear() {
        let points: [Vector; 4] = [
            (0., 0.).into(),
            (1., 0.).into(),
            (2., 0.).into(),
            (3., 0.).into(),
        ];
        let hull = Hull::create(&points, &tolerance());
        assert!(hull.is_empty());
    }

    #[test]
    fn test_all_points_welded() {
        let points: [Vector; 4] = [
            (0., 0.).into(),
            (0.001, 0.).into(),
            (0., 0.001).into(),
            (0.001, 0.001).into(),
        ];
        let hull = Hull::create(&points, &tolerance());
        assert!(hull.is_empty());
    }

    #[test]
    fn test_near_collinear_midpoint_merged() {
        let points: [Vector; 4] = [
            (0., 0.).into(),
            (1., 0.001).into(),
            (2., 0.).into(),
            (1., 1.).into(),
        ];
        let hull = Hull::create(&points, &tolerance());
        assert_eq!(hull.count(), 3);
        assert!(hull.is_valid(&tolerance()));
    }

    #[test]
    fn test_winding_is_counter_clockwise() {
        let points: [Vector; 3] = [(0., 0.).into(), (2., 0.).into(), (1., 1.).into()];
        let hull = Hull::create(&points, &tolerance());
        assert_eq!(hull.count(), 3);

        let mut signed_area = 0.;
        for i in 0..hull.count() {
            let p1 = hull.points()[i];
            let p2 = hull.points()[(i + 1) % hull.count()];
            signed_area += p1 ^ p2;
        }
        assert!(signed_area > 0.);
    }
}
