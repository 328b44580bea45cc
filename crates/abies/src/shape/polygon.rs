use super::aabb::AABB;
use super::capsule::Capsule;
use super::circle::Circle;
use super::hull::Hull;
use super::{MassData, MAX_POLYGON_VERTICES};
use crate::collision::distance::{compute_distance, DistanceInput};
use crate::collision::simplex::SimplexCache;
use crate::collision::ShapeProxy;
use crate::math::{num, rotation::Rotation, transform::Transform, vector::Vector, FloatNum};
use std::f32::consts::SQRT_2;

/// A solid convex polygon with counter clockwise winding, at most
/// [`MAX_POLYGON_VERTICES`] vertices and an optional rounding radius.
#[derive(Clone, Copy, Debug)]
pub struct Polygon {
    vertices: [Vector; MAX_POLYGON_VERTICES],
    normals: [Vector; MAX_POLYGON_VERTICES],
    centroid: Vector,
    radius: FloatNum,
    count: usize,
}

/// Area weighted centroid of a convex fan rooted at the first vertex.
fn compute_centroid(vertices: &[Vector]) -> Vector {
    const INV_3: FloatNum = 1. / 3.;

    let mut center = Vector::new(0., 0.);
    let mut area: FloatNum = 0.;

    // Form triangles against the first vertex to reduce round-off.
    let origin = vertices[0];
    for window in vertices[1..].windows(2) {
        let edge1 = window[0] - origin;
        let edge2 = window[1] - origin;
        let a = 0.5 * (edge1 ^ edge2);

        center += (edge1 + edge2) * (a * INV_3);
        area += a;
    }

    debug_assert!(area > FloatNum::EPSILON);
    center /= area;

    center + origin
}

impl Polygon {
    /// Builds a polygon from a convex hull. `None` when the hull is
    /// degenerate (fewer than three points).
    pub fn from_hull(hull: &Hull, radius: FloatNum) -> Option<Polygon> {
        Self::build(hull, radius, None)
    }

    /// Same as [`from_hull`](Self::from_hull) with every vertex mapped
    /// through the given transform first.
    pub fn from_hull_transformed(
        hull: &Hull,
        radius: FloatNum,
        transform: &Transform,
    ) -> Option<Polygon> {
        Self::build(hull, radius, Some(transform))
    }

    fn build(hull: &Hull, radius: FloatNum, transform: Option<&Transform>) -> Option<Polygon> {
        if hull.count() < 3 {
            return None;
        }

        let mut result = Polygon {
            vertices: [Vector::default(); MAX_POLYGON_VERTICES],
            normals: [Vector::default(); MAX_POLYGON_VERTICES],
            centroid: Vector::new(0., 0.),
            radius,
            count: hull.count(),
        };

        for (vertex, point) in result.vertices.iter_mut().zip(hull.points()) {
            *vertex = match transform {
                Some(transform) => transform.transform_point(*point),
                None => *point,
            };
        }

        // Edges are guaranteed non-zero by the hull construction.
        for index in 0..result.count {
            let next = (index + 1) % result.count;
            let edge = result.vertices[next] - result.vertices[index];
            debug_assert!(edge.length_squared() > FloatNum::EPSILON * FloatNum::EPSILON);

            result.normals[index] = (!edge).normalize();
        }

        result.centroid = compute_centroid(&result.vertices[..result.count]);

        Some(result)
    }

    pub fn make_square(half_width: FloatNum) -> Polygon {
        Self::make_box(half_width, half_width)
    }

    pub fn make_box(half_width: FloatNum, half_height: FloatNum) -> Polygon {
        Self::make_rounded_box(half_width, half_height, 0.)
    }

    pub fn make_rounded_box(half_width: FloatNum, half_height: FloatNum, radius: FloatNum) -> Polygon {
        debug_assert!(num::is_valid(half_width) && half_width > 0.);
        debug_assert!(num::is_valid(half_height) && half_height > 0.);
        debug_assert!(num::is_valid(radius) && radius >= 0.);

        let mut polygon = Polygon {
            vertices: [Vector::default(); MAX_POLYGON_VERTICES],
            normals: [Vector::default(); MAX_POLYGON_VERTICES],
            centroid: Vector::new(0., 0.),
            radius,
            count: 4,
        };
        polygon.vertices[..4].copy_from_slice(&[
            Vector::new(-half_width, -half_height),
            Vector::new(half_width, -half_height),
            Vector::new(half_width, half_height),
            Vector::new(-half_width, half_height),
        ]);
        polygon.normals[..4].copy_from_slice(&[
            Vector::new(0., -1.),
            Vector::new(1., 0.),
            Vector::new(0., 1.),
            Vector::new(-1., 0.),
        ]);

        polygon
    }

    pub fn make_offset_box(
        half_width: FloatNum,
        half_height: FloatNum,
        center: Vector,
        rotation: Rotation,
    ) -> Polygon {
        Self::make_offset_rounded_box(half_width, half_height, center, rotation, 0.)
    }

    pub fn make_offset_rounded_box(
        half_width: FloatNum,
        half_height: FloatNum,
        center: Vector,
        rotation: Rotation,
        radius: FloatNum,
    ) -> Polygon {
        debug_assert!(num::is_valid(radius) && radius >= 0.);

        let transform = Transform::new(center, rotation);
        let mut polygon = Self::make_rounded_box(half_width, half_height, radius);

        for vertex in &mut polygon.vertices[..4] {
            *vertex = transform.transform_point(*vertex);
        }
        for normal in &mut polygon.normals[..4] {
            *normal = transform.rotation().rotate(*normal);
        }
        polygon.centroid = center;

        polygon
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector] {
        &self.vertices[..self.count]
    }

    #[inline]
    pub fn normals(&self) -> &[Vector] {
        &self.normals[..self.count]
    }

    #[inline]
    pub fn centroid(&self) -> Vector {
        self.centroid
    }

    #[inline]
    pub fn radius(&self) -> FloatNum {
        self.radius
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_valid(&self) -> bool {
        (3..=MAX_POLYGON_VERTICES).contains(&self.count)
            && self.radius >= 0.
            && num::is_valid(self.radius)
            && self.vertices[..self.count].iter().all(Vector::is_valid)
            && self.centroid.is_valid()
    }

    /// A copy with vertices, normals and centroid mapped into the
    /// frame described by `transform`.
    pub fn transform(&self, transform: &Transform) -> Polygon {
        let mut result = *self;

        for vertex in &mut result.vertices[..result.count] {
            *vertex = transform.transform_point(*vertex);
        }
        for normal in &mut result.normals[..result.count] {
            *normal = transform.rotation().rotate(*normal);
        }
        result.centroid = transform.transform_point(result.centroid);

        result
    }

    /// Local space containment, including the rounding radius.
    pub fn contains_point(&self, point: Vector) -> bool {
        let input = DistanceInput::new(
            ShapeProxy::new(self.vertices(), 0.),
            ShapeProxy::new(&[point], 0.),
            Transform::IDENTITY,
            Transform::IDENTITY,
            false,
        );
        let mut cache = SimplexCache::EMPTY;

        compute_distance(&input, &mut cache).distance() <= self.radius
    }

    /// Exact triangulated mass properties; rounded polygons are
    /// approximated by pushing the vertices outward before
    /// triangulating. One and two vertex polygons degenerate to a
    /// circle and a capsule.
    pub fn mass_data(&self, density: FloatNum) -> MassData {
        debug_assert!(self.count > 0);

        if self.count == 1 {
            return Circle::new(self.vertices[0], self.radius).mass_data(density);
        }

        if self.count == 2 {
            return Capsule::new(self.vertices[0], self.vertices[1], self.radius)
                .mass_data(density);
        }

        let mut vertices = [Vector::default(); MAX_POLYGON_VERTICES];
        if self.radius > 0. {
            // Push the vertices out along the corner bisectors.
            for index in 0..self.count {
                let prev = if index == 0 { self.count - 1 } else { index - 1 };

                let mid = (self.normals[prev] + self.normals[index]).normalize();
                vertices[index] = self.vertices[index] + mid * (SQRT_2 * self.radius);
            }
        } else {
            vertices[..self.count].copy_from_slice(self.vertices());
        }

        const INV_3: FloatNum = 1. / 3.;

        let mut center = Vector::new(0., 0.);
        let mut area: FloatNum = 0.;
        let mut inertia: FloatNum = 0.;

        // Triangulate against the first vertex to reduce round-off.
        let r = vertices[0];

        for window in vertices[1..self.count].windows(2) {
            let e1 = window[0] - r;
            let e2 = window[1] - r;

            let d = e1 ^ e2;
            let triangle_area = d * 0.5;

            // Area weighted centroid, relative to r
            center += (e1 + e2) * (triangle_area * INV_3);
            area += triangle_area;

            let x = e1.x() * e1.x() + e1.x() * e2.x() + e2.x() * e2.x();
            let y = e1.y() * e1.y() + e1.y() * e2.y() + e2.y() * e2.y();
            inertia += (0.25 * INV_3 * d) * (x + y);
        }

        let mass = area * density;

        debug_assert!(area > FloatNum::EPSILON);
        center /= area;

        // Shift inertia from r to the center of mass.
        inertia *= density;
        inertia -= mass * (center * center);
        debug_assert!(inertia >= 0.);

        MassData::new(mass, center + r, inertia)
    }

    pub fn aabb(&self, transform: &Transform) -> AABB {
        let mut points = [Vector::default(); MAX_POLYGON_VERTICES];
        for (point, vertex) in points.iter_mut().zip(self.vertices()) {
            *point = transform.transform_point(*vertex);
        }

        AABB::compute(&points[..self.count], self.radius)
    }

    pub fn proxy(&self) -> ShapeProxy {
        ShapeProxy::new(self.vertices(), self.radius)
    }
}
