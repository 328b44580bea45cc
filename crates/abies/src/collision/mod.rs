pub mod distance;
pub mod ray_cast;
pub mod shape_cast;
pub mod simplex;
pub mod time_of_impact;

use crate::math::{transform::Transform, vector::Vector, FloatNum};
use crate::shape::MAX_POLYGON_VERTICES;
use abies_macro_tools::Fields;

pub use distance::{compute_distance, Distance, DistanceInput};
pub use ray_cast::{
    ray_cast_capsule, ray_cast_circle, ray_cast_polygon, ray_cast_segment, RayCastInput,
};
pub use shape_cast::{shape_cast, ShapeCastInput};
pub use simplex::{Simplex, SimplexCache, SimplexKind};
pub use time_of_impact::{compute_time_of_impact, Sweep, Toi, ToiInput, ToiState};

/// Iteration cap shared by the distance query, the shape cast
/// advancement loop and the time of impact outer loop.
pub const DISTANCE_MAX_ITERATIONS: usize = 20;

/// A convex point cloud with a rounding radius, the common currency of
/// every narrow phase query. Circles are a single point, capsules and
/// segments two points, polygons up to [`MAX_POLYGON_VERTICES`].
#[derive(Clone, Copy, Debug)]
pub struct ShapeProxy {
    points: [Vector; MAX_POLYGON_VERTICES],
    count: usize,
    radius: FloatNum,
}

impl Default for ShapeProxy {
    fn default() -> Self {
        Self {
            points: [Vector::default(); MAX_POLYGON_VERTICES],
            count: 0,
            radius: 0.,
        }
    }
}

impl ShapeProxy {
    /// Copies at most [`MAX_POLYGON_VERTICES`] points.
    pub fn new(points: &[Vector], radius: FloatNum) -> Self {
        debug_assert!(!points.is_empty());
        debug_assert!(points.len() <= MAX_POLYGON_VERTICES);

        let count = points.len().min(MAX_POLYGON_VERTICES);
        let mut result = Self {
            points: [Vector::default(); MAX_POLYGON_VERTICES],
            count,
            radius,
        };
        result.points[..count].copy_from_slice(&points[..count]);

        result
    }

    /// Same as [`new`](Self::new) but maps every point through the
    /// given transform first.
    pub fn new_transformed(points: &[Vector], radius: FloatNum, transform: &Transform) -> Self {
        let mut result = Self::new(points, radius);
        for point in &mut result.points[..result.count] {
            *point = transform.transform_point(*point);
        }

        result
    }

    #[inline]
    pub fn points(&self) -> &[Vector] {
        &self.points[..self.count]
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn radius(&self) -> FloatNum {
        self.radius
    }

    #[inline]
    pub fn vertex(&self, index: usize) -> Vector {
        self.points[index]
    }

    pub fn is_valid(&self) -> bool {
        if self.count == 0 || self.count > MAX_POLYGON_VERTICES {
            return false;
        }

        if self.radius < 0. || !crate::math::num::is_valid(self.radius) {
            return false;
        }

        self.points[..self.count].iter().all(Vector::is_valid)
    }

    /// Index of the point furthest along `direction`. Ties keep the
    /// first hit; a near zero direction falls back to point 0.
    pub fn find_support(&self, direction: Vector) -> usize {
        debug_assert!(self.count != 0);

        if direction.length_squared() < FloatNum::EPSILON * FloatNum::EPSILON {
            return 0;
        }

        let mut best_index = 0;
        let mut best_value = self.points[0] * direction;
        for (index, point) in self.points[..self.count].iter().enumerate().skip(1) {
            let value = *point * direction;
            if value > best_value {
                best_index = index;
                best_value = value;
            }
        }

        best_index
    }
}

/// A cast result: the surface point hit, the surface normal there and
/// the fraction of the translation consumed. A zero normal with a zero
/// fraction reports an initial overlap.
#[derive(Clone, Copy, Debug, Default, Fields)]
#[r]
pub struct CastHit {
    point: Vector,
    normal: Vector,
    fraction: FloatNum,
}

impl CastHit {
    pub const fn new(point: Vector, normal: Vector, fraction: FloatNum) -> Self {
        Self {
            point,
            normal,
            fraction,
        }
    }

    pub(crate) fn initial_overlap(point: Vector) -> Self {
        Self {
            point,
            normal: Vector::new(0., 0.),
            fraction: 0.,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_support() {
        let proxy = ShapeProxy::new(
            &[
                (-1., -1.).into(),
                (1., -1.).into(),
                (1., 1.).into(),
                (-1., 1.).into(),
            ],
            0.,
        );

        assert_eq!(proxy.find_support((1., 0.1).into()), 2);
        assert_eq!(proxy.find_support((-1., -0.1).into()), 0);
        assert_eq!(proxy.find_support((0., -1.).into()), 0);
    }

    #[test]
    fn test_proxy_single_point() {
        let proxy = ShapeProxy::new(&[(3., 4.).into()], 1.);
        assert_eq!(proxy.count(), 1);
        assert_eq!(proxy.find_support((-1., 2.).into()), 0);
        assert!(proxy.is_valid());
    }

    #[test]
    fn test_proxy_zero_direction() {
        let proxy = ShapeProxy::new(&[(0., 0.).into(), (1., 0.).into()], 0.);
        assert_eq!(proxy.find_support((0., 0.).into()), 0);

        // A tiny but nonzero direction still gets a real support search.
        assert_eq!(proxy.find_support((1e-4, 0.).into()), 1);
    }

    #[test]
    fn test_proxy_transformed() {
        let transform = Transform::new((10., 0.).into(), Default::default());
        let proxy = ShapeProxy::new_transformed(&[(1., 2.).into()], 0.5, &transform);
        assert_eq!(proxy.vertex(0), (11., 2.).into());
        assert_eq!(proxy.radius(), 0.5);
    }

    #[test]
    fn test_proxy_validity() {
        assert!(!ShapeProxy::default().is_valid());

        let proxy = ShapeProxy::new(&[(FloatNum::NAN, 0.).into()], 0.);
        assert!(!proxy.is_valid());

        let proxy = ShapeProxy::new(&[(0., 0.).into()], -1.);
        assert!(!proxy.is_valid());
    }
}
