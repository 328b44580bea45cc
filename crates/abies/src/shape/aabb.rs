use crate::math::{vector::Vector, FloatNum};
use abies_macro_tools::Fields;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Fields)]
#[r]
pub struct AABB {
    lower: Vector,
    upper: Vector,
}

impl From<(Vector, Vector)> for AABB {
    fn from((lower, upper): (Vector, Vector)) -> Self {
        Self { lower, upper }
    }
}

impl AABB {
    #[inline]
    pub const fn new(lower: Vector, upper: Vector) -> Self {
        Self { lower, upper }
    }

    /// Bounding box of a point cloud inflated by `radius` on all
    /// sides. An empty slice yields an inverted, invalid box.
    pub fn compute(points: &[Vector], radius: FloatNum) -> Self {
        let mut lower = Vector::new(FloatNum::MAX, FloatNum::MAX);
        let mut upper = Vector::new(FloatNum::MIN, FloatNum::MIN);

        for point in points {
            lower = lower.min(point);
            upper = upper.max(point);
        }

        let expand = Vector::new(radius, radius);
        Self {
            lower: lower - expand,
            upper: upper + expand,
        }
    }

    pub fn is_valid(&self) -> bool {
        let diagonal = self.upper - self.lower;
        diagonal.x() >= 0.
            && diagonal.y() >= 0.
            && self.lower.is_valid()
            && self.upper.is_valid()
    }

    pub fn contains(&self, other: &AABB) -> bool {
        self.lower.x() <= other.lower.x()
            && self.lower.y() <= other.lower.y()
            && self.upper.x() >= other.upper.x()
            && self.upper.y() >= other.upper.y()
    }

    pub fn contains_point(&self, point: Vector) -> bool {
        self.lower.x() <= point.x()
            && self.lower.y() <= point.y()
            && self.upper.x() >= point.x()
            && self.upper.y() >= point.y()
    }

    pub fn overlaps(&self, other: &AABB) -> bool {
        if other.lower.x() > self.upper.x() || other.upper.x() < self.lower.x() {
            return false;
        }
        if other.lower.y() > self.upper.y() || other.upper.y() < self.lower.y() {
            return false;
        }
        true
    }

    #[inline]
    pub fn center(&self) -> Vector {
        (self.lower + self.upper) * 0.5
    }

    #[inline]
    pub fn extents(&self) -> Vector {
        (self.upper - self.lower) * 0.5
    }

    #[inline]
    pub fn width(&self) -> FloatNum {
        self.upper.x() - self.lower.x()
    }

    #[inline]
    pub fn height(&self) -> FloatNum {
        self.upper.y() - self.lower.y()
    }

    #[inline]
    pub fn perimeter(&self) -> FloatNum {
        2. * (self.width() + self.height())
    }

    #[inline]
    pub fn area(&self) -> FloatNum {
        self.width() * self.height()
    }

    /// Union of the two boxes.
    pub fn combine(&self, other: &AABB) -> AABB {
        AABB {
            lower: self.lower.min(&other.lower),
            upper: self.upper.max(&other.upper),
        }
    }

    pub fn combine_point(&self, point: Vector) -> AABB {
        AABB {
            lower: self.lower.min(&point),
            upper: self.upper.max(&point),
        }
    }

    /// Grow to enclose `other`; reports whether the box changed.
    pub fn enlarge(&mut self, other: &AABB) -> bool {
        let combined = self.combine(other);
        if self.lower == combined.lower && self.upper == combined.upper {
            return false;
        }
        *self = combined;
        true
    }

    pub fn enlarge_point(&mut self, point: Vector) -> bool {
        self.enlarge(&AABB {
            lower: point,
            upper: point,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compute_point_cloud() {
        let points: [Vector; 3] = [(-1., 2.).into(), (3., -4.).into(), (0., 0.).into()];
        let aabb = AABB::compute(&points, 0.5);
        assert!(aabb.is_valid());
        assert_eq!(*aabb.lower(), (-1.5, -4.5).into());
        assert_eq!(*aabb.upper(), (3.5, 2.5).into());
    }

    #[test]
    fn test_compute_empty_is_invalid() {
        let aabb = AABB::compute(&[], 0.);
        assert!(!aabb.is_valid());
    }

    #[test]
    fn test_contains_and_overlaps() {
        let outer = AABB::new((-2., -2.).into(), (2., 2.).into());
        let inner = AABB::new((-1., -1.).into(), (1., 1.).into());
        let apart = AABB::new((3., 3.).into(), (4., 4.).into());

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.overlaps(&inner));
        assert!(!outer.overlaps(&apart));
        assert!(outer.contains_point((0., 2.).into()));
        assert!(!outer.contains_point((0., 2.1).into()));
    }

    #[test]
    fn test_measures() {
        let aabb = AABB::new((0., 0.).into(), (4., 2.).into());
        assert_eq!(aabb.center(), (2., 1.).into());
        assert_eq!(aabb.extents(), (2., 1.).into());
        assert_relative_eq!(aabb.perimeter(), 12.);
        assert_relative_eq!(aabb.area(), 8.);
    }

    #[test]
    fn test_enlarge_reports_growth() {
        let mut aabb = AABB::new((0., 0.).into(), (1., 1.).into());
        assert!(!aabb.enlarge(&AABB::new((0.25, 0.25).into(), (0.75, 0.75).into())));
        assert!(aabb.enlarge_point((2., 0.5).into()));
        assert_eq!(*aabb.upper(), (2., 1.).into());
    }
}
