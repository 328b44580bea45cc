use super::{aabb::AABB, MassData};
use crate::collision::ShapeProxy;
use crate::math::{num, transform::Transform, vector::Vector, FloatNum};
use abies_macro_tools::Fields;
use std::f32::consts::PI;

/// A capsule: the set of points within `radius` of the segment
/// `center1`-`center2`. Degenerates to a circle when the centers
/// coincide.
#[derive(Clone, Copy, Debug, Default, Fields)]
#[r]
pub struct Capsule {
    center1: Vector,
    center2: Vector,
    radius: FloatNum,
}

impl Capsule {
    #[inline]
    pub const fn new(center1: Vector, center2: Vector, radius: FloatNum) -> Self {
        Self {
            center1,
            center2,
            radius,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.radius > 0.
            && num::is_valid(self.radius)
            && self.center1.is_valid()
            && self.center2.is_valid()
    }

    #[inline]
    pub fn length(&self) -> FloatNum {
        self.center1.distance(&self.center2)
    }

    /// Unit vector from `center1` to `center2`, zero when degenerate.
    #[inline]
    pub fn direction(&self) -> Vector {
        (self.center2 - self.center1).normalize()
    }

    pub fn contains_point(&self, point: Vector) -> bool {
        let r2 = self.radius * self.radius;

        if self.center2 == self.center1 {
            return self.center1.distance_squared(&point) <= r2;
        }

        // closest point on the spine: c = center1 + t * d with
        // t = dot(point - center1, d) / dot(d, d), clamped to [0, 1]
        let diff = self.center2 - self.center1;
        let t = num::clamp(((point - self.center1) * diff) / diff.length_squared(), 0., 1.);
        let c = self.center1 + diff * t;

        point.distance_squared(&c) <= r2
    }

    /// Rectangular mid-section plus two half-circle caps; the cap
    /// inertia applies the parallel-axis theorem twice, moving the
    /// semicircle centroid (offset `4r/3π`) out to the capsule end and
    /// then to the capsule center.
    pub fn mass_data(&self, density: FloatNum) -> MassData {
        let r = self.radius;
        let r2 = r * r;
        let length = self.length();
        let length_squared = length * length;

        let circle_mass = PI * r2 * density;
        let box_mass = 2. * r * length * density;

        let mass = circle_mass + box_mass;
        let center = (self.center1 + self.center2) * 0.5;

        let lc = 4. * r / (3. * PI);
        let h = 0.5 * length;
        let h2 = h * h;

        let circle_inertia = circle_mass * (0.5 * r2 + h2 + 2. * h * lc);
        let box_inertia = box_mass * (4. * r2 + length_squared) / 12.;
        let inertia = circle_inertia + box_inertia;

        MassData::new(mass, center, inertia)
    }

    pub fn aabb(&self, transform: &Transform) -> AABB {
        let p1 = transform.transform_point(self.center1);
        let p2 = transform.transform_point(self.center2);

        let expand = Vector::new(self.radius, self.radius);
        AABB::new(p1.min(&p2) - expand, p1.max(&p2) + expand)
    }

    pub fn proxy(&self) -> ShapeProxy {
        ShapeProxy::new(&[self.center1, self.center2], self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::polygon::Polygon;
    use approx::assert_relative_eq;

    #[test]
    fn test_degenerate_capsule_is_circle() {
        let capsule = Capsule::new((1., 1.).into(), (1., 1.).into(), 0.5);
        assert!(capsule.contains_point((1.4, 1.).into()));
        assert!(!capsule.contains_point((1.6, 1.).into()));
        assert!(capsule.direction().is_zero());

        let mass_data = capsule.mass_data(1.);
        assert_relative_eq!(mass_data.mass(), PI * 0.25, epsilon = 1e-5);
    }

    #[test]
    fn test_containment_along_spine() {
        let capsule = Capsule::new((-1., 0.).into(), (1., 0.).into(), 0.5);
        assert!(capsule.contains_point((0., 0.4).into()));
        assert!(capsule.contains_point((1.4, 0.).into()));
        assert!(!capsule.contains_point((0., 0.6).into()));
        assert!(!capsule.contains_point((1.6, 0.).into()));
    }

    #[test]
    fn test_mass_bounded_by_hull_and_box() {
        // capsule mass lies strictly between its inscribed convex hull
        // and its bounding box
        let radius = 1.;
        let capsule = Capsule::new((-1., 0.).into(), (1., 0.).into(), radius);
        let mass_data = capsule.mass_data(1.);

        let apothem = radius / 2f32.sqrt();
        let points: [Vector; 8] = [
            (-1. - apothem, -apothem).into(),
            (-1., -radius).into(),
            (1., -radius).into(),
            (1. + apothem, -apothem).into(),
            (1. + apothem, apothem).into(),
            (1., radius).into(),
            (-1., radius).into(),
            (-1. - apothem, apothem).into(),
        ];
        let hull = crate::shape::hull::Hull::create(&points, &Default::default());
        let inner = Polygon::from_hull(&hull, 0.).unwrap();
        let inner_mass = inner.mass_data(1.);

        let outer = Polygon::make_box(2., 1.);
        let outer_mass = outer.mass_data(1.);

        assert!(inner_mass.mass() < mass_data.mass() && mass_data.mass() < outer_mass.mass());
        assert!(
            inner_mass.rotational_inertia() < mass_data.rotational_inertia()
                && mass_data.rotational_inertia() < outer_mass.rotational_inertia()
        );
    }
}
