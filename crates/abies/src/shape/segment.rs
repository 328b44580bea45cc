use super::aabb::AABB;
use crate::collision::ShapeProxy;
use crate::math::{num, transform::Transform, vector::Vector, FloatNum};
use abies_macro_tools::Fields;

/// A line segment. Zero-length segments are representable but
/// degenerate for most queries.
#[derive(Clone, Copy, Debug, Default, Fields)]
#[r]
pub struct Segment {
    point1: Vector,
    point2: Vector,
}

impl From<(Vector, Vector)> for Segment {
    fn from((point1, point2): (Vector, Vector)) -> Self {
        Self { point1, point2 }
    }
}

impl Segment {
    #[inline]
    pub const fn new(point1: Vector, point2: Vector) -> Self {
        Self { point1, point2 }
    }

    pub fn is_valid(&self) -> bool {
        self.point1.is_valid() && self.point2.is_valid()
    }

    #[inline]
    pub fn length(&self) -> FloatNum {
        self.point1.distance(&self.point2)
    }

    #[inline]
    pub fn length_squared(&self) -> FloatNum {
        self.point1.distance_squared(&self.point2)
    }

    /// Unit vector from `point1` to `point2`, zero when degenerate.
    pub fn direction(&self) -> Vector {
        if self.point1 == self.point2 {
            return Default::default();
        }
        (self.point2 - self.point1).normalize()
    }

    #[inline]
    pub fn midpoint(&self) -> Vector {
        (self.point1 + self.point2) * 0.5
    }

    /// Point at fraction `t` along the segment, clamped to `[0, 1]`.
    pub fn point_at(&self, t: FloatNum) -> Vector {
        let t = num::clamp(t, 0., 1.);
        self.point1 + (self.point2 - self.point1) * t
    }

    /// Clamped barycentric coordinate of the closest point to `point`.
    pub fn project(&self, point: Vector) -> FloatNum {
        let diff = self.point2 - self.point1;
        let diff_length_squared = diff.length_squared();

        if diff_length_squared < FloatNum::EPSILON {
            return 0.;
        }

        num::clamp(((point - self.point1) * diff) / diff_length_squared, 0., 1.)
    }

    pub fn closest_point(&self, point: Vector) -> Vector {
        self.point_at(self.project(point))
    }

    pub fn distance_squared_to(&self, point: Vector) -> FloatNum {
        point.distance_squared(&self.closest_point(point))
    }

    pub fn aabb(&self, transform: &Transform) -> AABB {
        let p1 = transform.transform_point(self.point1);
        let p2 = transform.transform_point(self.point2);
        AABB::new(p1.min(&p2), p1.max(&p2))
    }

    pub fn proxy(&self) -> ShapeProxy {
        ShapeProxy::new(&[self.point1, self.point2], 0.)
    }
}

/// Closest points between two segments, with the clamped fractions
/// that realize them.
#[derive(Clone, Copy, Debug, Fields)]
#[r]
pub struct SegmentDistance {
    closest1: Vector,
    closest2: Vector,
    fraction1: FloatNum,
    fraction2: FloatNum,
    distance_squared: FloatNum,
}

impl SegmentDistance {
    pub fn between(segment1: &Segment, segment2: &Segment) -> Self {
        Self::compute(
            segment1.point1,
            segment1.point2,
            segment2.point1,
            segment2.point2,
        )
    }

    pub fn compute(p1: Vector, q1: Vector, p2: Vector, q2: Vector) -> Self {
        let d1 = q1 - p1;
        let d2 = q2 - p2;
        let r = p1 - p2;

        let dd1 = d1 * d1;
        let dd2 = d2 * d2;
        let rd1 = r * d1;
        let rd2 = r * d2;

        const EPSILON_SQUARED: FloatNum = FloatNum::EPSILON * FloatNum::EPSILON;

        let fraction1;
        let fraction2;

        if dd1 < EPSILON_SQUARED || dd2 < EPSILON_SQUARED {
            if dd1 >= EPSILON_SQUARED {
                // segment 2 degenerates to a point: project p2 onto 1
                fraction1 = num::clamp(-rd1 / dd1, 0., 1.);
                fraction2 = 0.;
            } else if dd2 >= EPSILON_SQUARED {
                // segment 1 degenerates to a point: project p1 onto 2
                fraction1 = 0.;
                fraction2 = num::clamp(rd2 / dd2, 0., 1.);
            } else {
                fraction1 = 0.;
                fraction2 = 0.;
            }
        } else {
            // closest points between two lines, clamped back to the
            // segments
            let d12 = d1 * d2;
            let denominator = dd1 * dd2 - d12 * d12;

            let mut f1 = 0.;
            if denominator != 0. {
                f1 = num::clamp((d12 * rd2 - dd2 * rd1) / denominator, 0., 1.);
            }

            let mut f2 = (d12 * f1 + rd2) / dd2;

            if f2 < 0. {
                f1 = num::clamp(-rd1 / dd1, 0., 1.);
                f2 = 0.;
            } else if f2 > 1. {
                f1 = num::clamp((d12 - rd1) / dd1, 0., 1.);
                f2 = 1.;
            }

            fraction1 = f1;
            fraction2 = f2;
        }

        let closest1 = p1 + d1 * fraction1;
        let closest2 = p2 + d2 * fraction2;
        let distance_squared = closest1.distance_squared(&closest2);

        Self {
            closest1,
            closest2,
            fraction1,
            fraction2,
            distance_squared,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.distance_squared >= 0.
            && num::is_valid(self.distance_squared)
            && self.closest1.is_valid()
            && self.closest2.is_valid()
            && num::is_valid(self.fraction1)
            && num::is_valid(self.fraction2)
    }

    #[inline]
    pub fn distance(&self) -> FloatNum {
        self.distance_squared.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_queries() {
        let segment = Segment::new((0., 0.).into(), (2., 0.).into());
        assert_relative_eq!(segment.length(), 2.);
        assert_eq!(segment.direction(), (1., 0.).into());
        assert_eq!(segment.midpoint(), (1., 0.).into());
        assert_eq!(segment.closest_point((1., 1.).into()), (1., 0.).into());
        assert_eq!(segment.closest_point((3., 1.).into()), (2., 0.).into());
        assert_relative_eq!(segment.distance_squared_to((1., 2.).into()), 4.);
    }

    #[test]
    fn test_degenerate_segment() {
        let segment = Segment::new((1., 1.).into(), (1., 1.).into());
        assert!(segment.direction().is_zero());
        assert_eq!(segment.project((5., 5.).into()), 0.);
        assert_eq!(segment.closest_point((5., 5.).into()), (1., 1.).into());
    }

    #[test]
    fn test_segment_distance_endpoints() {
        let result = SegmentDistance::compute(
            (-1., -1.).into(),
            (-1., 1.).into(),
            (2., 0.).into(),
            (1., 0.).into(),
        );
        assert!(result.is_valid());
        assert_eq!(*result.closest1(), (-1., 0.).into());
        assert_eq!(*result.closest2(), (1., 0.).into());
        assert_relative_eq!(result.fraction1(), 0.5);
        assert_relative_eq!(result.fraction2(), 1.);
        assert_relative_eq!(result.distance_squared(), 4.);
        assert_relative_eq!(result.distance(), 2.);
    }

    #[test]
    fn test_segment_distance_crossing_is_zero() {
        let result = SegmentDistance::compute(
            (-1., 0.).into(),
            (1., 0.).into(),
            (0., -1.).into(),
            (0., 1.).into(),
        );
        assert_relative_eq!(result.distance_squared(), 0., epsilon = 1e-6);
    }

    #[test]
    fn test_segment_distance_degenerate_pair() {
        let result = SegmentDistance::compute(
            (0., 0.).into(),
            (0., 0.).into(),
            (3., 4.).into(),
            (3., 4.).into(),
        );
        assert_relative_eq!(result.distance(), 5.);
        assert_eq!(result.fraction1(), 0.);
        assert_eq!(result.fraction2(), 0.);
    }
}
