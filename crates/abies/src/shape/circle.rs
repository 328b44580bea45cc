use super::{aabb::AABB, MassData};
use crate::collision::ShapeProxy;
use crate::math::{num, transform::Transform, vector::Vector, FloatNum};
use abies_macro_tools::Fields;
use std::f32::consts::PI;

/// A solid circle in local space.
#[derive(Clone, Copy, Debug, Default, Fields)]
#[r]
pub struct Circle {
    center: Vector,
    radius: FloatNum,
}

impl From<(Vector, FloatNum)> for Circle {
    fn from((center, radius): (Vector, FloatNum)) -> Self {
        Self { center, radius }
    }
}

impl Circle {
    #[inline]
    pub const fn new(center: Vector, radius: FloatNum) -> Self {
        Self { center, radius }
    }

    pub fn is_valid(&self) -> bool {
        self.radius > 0. && num::is_valid(self.radius) && self.center.is_valid()
    }

    #[inline]
    pub fn diameter(&self) -> FloatNum {
        2. * self.radius
    }

    #[inline]
    pub fn circumference(&self) -> FloatNum {
        2. * PI * self.radius
    }

    #[inline]
    pub fn area(&self) -> FloatNum {
        PI * self.radius * self.radius
    }

    pub fn contains_point(&self, point: Vector) -> bool {
        self.center.distance_squared(&point) <= self.radius * self.radius
    }

    /// `mass = π r² ρ`, inertia `½ m r²` about the center.
    pub fn mass_data(&self, density: FloatNum) -> MassData {
        let r2 = self.radius * self.radius;
        let mass = PI * r2 * density;
        let inertia = mass * 0.5 * r2;

        MassData::new(mass, self.center, inertia)
    }

    pub fn aabb(&self, transform: &Transform) -> AABB {
        let p = transform.transform_point(self.center);
        let expand = Vector::new(self.radius, self.radius);
        AABB::new(p - expand, p + expand)
    }

    pub fn proxy(&self) -> ShapeProxy {
        ShapeProxy::new(&[self.center], self.radius)
    }
}
