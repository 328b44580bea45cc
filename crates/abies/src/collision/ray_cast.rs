use super::shape_cast::{shape_cast, ShapeCastInput};
use super::{CastHit, ShapeProxy};
use crate::math::{num, transform::Transform, vector::Vector, FloatNum};
use crate::shape::capsule::Capsule;
use crate::shape::circle::Circle;
use crate::shape::polygon::Polygon;
use crate::shape::segment::Segment;
use crate::tolerance::Tolerance;
use abies_macro_tools::{Builder, Fields};

/// A ray: origin, translation to the end point and an early out
/// fraction in `[0, 1]`.
#[derive(Clone, Copy, Debug, Fields, Builder)]
#[r]
pub struct RayCastInput {
    origin: Vector,
    translation: Vector,
    #[default = 1.]
    max_fraction: FloatNum,
}

impl RayCastInput {
    pub const fn new(origin: Vector, translation: Vector, max_fraction: FloatNum) -> Self {
        Self {
            origin,
            translation,
            max_fraction,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.origin.is_valid()
            && self.translation.is_valid()
            && num::is_valid(self.max_fraction)
            && (0. ..=1.).contains(&self.max_fraction)
    }
}

/// Closed-form ray versus circle. `None` on a miss.
pub fn ray_cast_circle(input: &RayCastInput, circle: &Circle) -> Option<CastHit> {
    debug_assert!(input.is_valid());
    debug_assert!(circle.is_valid());

    // Shift the ray so the circle center is the origin.
    let s = input.origin - *circle.center();

    let r = circle.radius();
    let r2 = r * r;

    let length = input.translation.abs();
    if length < FloatNum::EPSILON {
        // Zero length ray, only an initial overlap can hit.
        if s.length_squared() < r2 {
            return Some(CastHit::initial_overlap(input.origin));
        }

        return None;
    }
    let d = input.translation / length;

    // Closest point on the infinite ray to the circle center.
    let t = -(s * d);
    let c = s + d * t;
    let c2 = c * c;

    if c2 > r2 {
        return None;
    }

    // Entry point along the ray.
    let h = (r2 - c2).sqrt();
    let distance = t - h;
    let fraction = distance / length;

    if fraction < 0. || fraction > input.max_fraction {
        if s.length_squared() < r2 {
            return Some(CastHit::initial_overlap(input.origin));
        }

        return None;
    }

    let hit_point = s + d * distance;
    let normal = hit_point.normalize();
    let point = *circle.center() + normal * circle.radius();

    Some(CastHit::new(point, normal, fraction))
}

/// Closed-form ray versus capsule. Degenerate capsules and rays that
/// pass the spine ends defer to the circle path.
pub fn ray_cast_capsule(input: &RayCastInput, capsule: &Capsule) -> Option<CastHit> {
    debug_assert!(input.is_valid());
    debug_assert!(capsule.is_valid());

    let v1 = *capsule.center1();
    let v2 = *capsule.center2();
    let e = v2 - v1;

    let capsule_length = e.abs();
    if capsule_length < FloatNum::EPSILON {
        // Capsule is really a circle
        return ray_cast_circle(input, &Circle::new(v1, capsule.radius()));
    }
    let a = e / capsule_length;

    let p1 = input.origin;
    let d = input.translation;

    let r = capsule.radius();
    let r2 = r * r;

    // Ray start relative to the capsule spine.
    let q = p1 - v1;
    let qa = q * a;

    // Component of q perpendicular to the spine.
    let qp = q - a * qa;

    // Does the ray start within the infinite length capsule?
    if qp * qp < r2 {
        if qa < 0. {
            // start point behind the spine
            return ray_cast_circle(input, &Circle::new(v1, r));
        }

        if qa > capsule_length {
            // start point ahead of the spine
            return ray_cast_circle(input, &Circle::new(v2, r));
        }

        return Some(CastHit::initial_overlap(input.origin));
    }

    // Perpendicular to the spine, pointing right.
    let mut n = !a;

    let ray_length = d.abs();
    if ray_length < FloatNum::EPSILON {
        return None;
    }
    let u = d / ray_length;

    // Intersect with both sides of the infinite capsule:
    //   v1 ± radius * n + s1 * a = p1 + s2 * u
    // solved with Cramer's rule on [a -u].
    let den = a ^ -u;
    if den.abs() < FloatNum::EPSILON {
        // Ray is parallel to the capsule and outside it
        return None;
    }

    let b1 = q - n * r;
    let b2 = q + n * r;

    let inv_den = 1. / den;

    let s21 = (a ^ b1) * inv_den;
    let s22 = (a ^ b2) * inv_den;

    let (s2, b) = if s21 < s22 {
        (s21, b1)
    } else {
        n = -n;
        (s22, b2)
    };

    if s2 < 0. || s2 > input.max_fraction * ray_length {
        return None;
    }

    let s1 = (b ^ -u) * inv_den;
    if s1 < 0. {
        // ray passes behind the spine
        return ray_cast_circle(input, &Circle::new(v1, r));
    }
    if s1 > capsule_length {
        // ray passes ahead of the spine
        return ray_cast_circle(input, &Circle::new(v2, r));
    }

    // Side hit
    let point = v1.lerp(&v2, s1 / capsule_length) + n * r;
    let fraction = s2 / ray_length;

    Some(CastHit::new(point, n, fraction))
}

/// Closed-form ray versus segment. One sided segments only collide
/// with rays arriving from their right side.
pub fn ray_cast_segment(input: &RayCastInput, segment: &Segment, one_sided: bool) -> Option<CastHit> {
    debug_assert!(input.is_valid());
    debug_assert!(segment.is_valid());

    if one_sided {
        // Skip left side collision
        let offset = (input.origin - *segment.point1()) ^ (*segment.point2() - *segment.point1());
        if offset < 0. {
            return None;
        }
    }

    let p1 = input.origin;
    let d = input.translation;

    let v1 = *segment.point1();
    let v2 = *segment.point2();
    let e = v2 - v1;

    let length = e.abs();
    if length < FloatNum::EPSILON {
        return None;
    }
    let e_normalized = e / length;

    // Normal points right, looking from v1 towards v2.
    let mut normal = !e_normalized;

    // Intersect with the infinite line through the segment:
    //   dot(normal, p1 - v1) + t * dot(normal, d) = 0
    let numerator = normal * (v1 - p1);
    let denominator = normal * d;

    if denominator.abs() < FloatNum::EPSILON {
        // parallel
        return None;
    }

    let t = numerator / denominator;
    if t < 0. || t > input.max_fraction {
        return None;
    }

    let p = p1 + d * t;

    // Position of the intersection along the segment.
    let s = (p - v1) * e_normalized;
    if s < 0. || s > length {
        return None;
    }

    if numerator > 0. {
        normal = -normal;
    }

    Some(CastHit::new(p, normal, t))
}

/// Ray versus convex polygon: slab clipping against every edge for
/// sharp polygons, generic shape cast for rounded ones.
pub fn ray_cast_polygon(
    input: &RayCastInput,
    polygon: &Polygon,
    tolerance: &Tolerance,
) -> Option<CastHit> {
    debug_assert!(input.is_valid());
    debug_assert!(polygon.count() >= 3);

    if polygon.radius() == 0. {
        // Shift all math to the first vertex since the polygon may be
        // far from the origin.
        let base = polygon.vertices()[0];

        let p1 = input.origin - base;
        let d = input.translation;

        let mut lower = 0.;
        let mut upper = input.max_fraction;
        let mut entry_edge = None;

        for (edge_vertex, edge_normal) in polygon.vertices().iter().zip(polygon.normals()) {
            // p = p1 + a * d
            // dot(normal, p1 - v) + a * dot(normal, d) = 0
            let vertex = *edge_vertex - base;
            let numerator = *edge_normal * (vertex - p1);
            let denominator = *edge_normal * d;

            if denominator.abs() < FloatNum::EPSILON {
                // Parallel and running outside this edge
                if numerator < 0. {
                    return None;
                }
            } else if denominator < 0. && numerator < lower * denominator {
                // The ray enters this half space.
                lower = numerator / denominator;
                entry_edge = Some(*edge_normal);
            } else if denominator > 0. && numerator < upper * denominator {
                // The ray exits this half space.
                upper = numerator / denominator;
            }

            if upper < lower {
                return None;
            }
        }

        debug_assert!(0. <= lower && lower <= input.max_fraction);

        let Some(normal) = entry_edge else {
            return Some(CastHit::initial_overlap(input.origin));
        };

        return Some(CastHit::new(input.origin + d * lower, normal, lower));
    }

    // Rounded polygon: cast the ray origin as a zero radius point
    // proxy against the polygon.
    let pair_input = ShapeCastInput::new(
        polygon.proxy(),
        ShapeProxy::new(&[input.origin], 0.),
        Transform::IDENTITY,
        Transform::IDENTITY,
        input.translation,
        input.max_fraction,
        false,
    );

    shape_cast(&pair_input, tolerance)
}
