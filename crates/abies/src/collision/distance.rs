use super::simplex::{Simplex, SimplexCache};
use super::{ShapeProxy, DISTANCE_MAX_ITERATIONS};
use crate::math::{transform::Transform, vector::Vector, FloatNum};
use abies_macro_tools::{Builder, Fields};

/// Input for the closest point query between two convex proxies.
#[derive(Clone, Copy, Debug, Fields, Builder)]
#[r]
pub struct DistanceInput {
    proxy_a: ShapeProxy,
    proxy_b: ShapeProxy,
    transform_a: Transform,
    transform_b: Transform,
    /// When set, the proxy radii are subtracted from the distance and
    /// the witness points are moved onto the rounded surfaces.
    use_radii: bool,
}

impl DistanceInput {
    pub fn new(
        proxy_a: ShapeProxy,
        proxy_b: ShapeProxy,
        transform_a: Transform,
        transform_b: Transform,
        use_radii: bool,
    ) -> Self {
        Self {
            proxy_a,
            proxy_b,
            transform_a,
            transform_b,
            use_radii,
        }
    }
}

/// Closest point query result. When the shapes overlap the distance is
/// zero and the normal is the zero vector.
#[derive(Clone, Copy, Debug, Default, Fields)]
#[r]
pub struct Distance {
    /// Closest point on shape A in world coordinates
    point_a: Vector,
    /// Closest point on shape B in world coordinates
    point_b: Vector,
    /// Unit normal pointing from A to B, valid only when separated
    normal: Vector,
    distance: FloatNum,
}

/// GJK distance between two convex proxies. The cache warm starts the
/// simplex and is refreshed from the final simplex state on every
/// call; pass [`SimplexCache::EMPTY`] on the first query of a pair.
pub fn compute_distance(input: &DistanceInput, cache: &mut SimplexCache) -> Distance {
    debug_assert!(input.proxy_a.count() > 0 && input.proxy_b.count() > 0);
    debug_assert!(input.proxy_a.radius() >= 0. && input.proxy_b.radius() >= 0.);

    // Bring proxy B into frame A once up front so the support loop
    // runs without per-point transforms.
    let local_proxy_b = {
        let to_frame_a = input.transform_a.multiply_by_inv(&input.transform_b);
        ShapeProxy::new_transformed(input.proxy_b.points(), input.proxy_b.radius(), &to_frame_a)
    };

    let mut simplex = Simplex::create(cache, &input.proxy_a, &local_proxy_b);
    debug_assert!(simplex.count <= 3);

    let overlap_result = |simplex: &Simplex| -> Distance {
        let (local_point_a, local_point_b) = simplex.witness_points();

        Distance {
            point_a: input.transform_a.transform_point(local_point_a),
            point_b: input.transform_a.transform_point(local_point_b),
            normal: Vector::new(0., 0.),
            distance: 0.,
        }
    };

    let mut non_unit_normal = Vector::new(0., 0.);

    // All computations run in frame A. The iteration count equals the
    // number of support point calls.
    let mut iteration = 0;
    let mut save_a = [0usize; 3];
    let mut save_b = [0usize; 3];

    while iteration < DISTANCE_MAX_ITERATIONS {
        // Remember the current simplex so duplicates can be detected.
        let save_count = simplex.count;
        for slot in 0..save_count {
            save_a[slot] = simplex.vertices[slot].index_a;
            save_b[slot] = simplex.vertices[slot].index_b;
        }

        let direction = match simplex.count {
            1 => -simplex.vertices[0].w,
            2 => simplex.solve2(),
            _ => simplex.solve3(),
        };

        // Three points means the origin is inside the triangle.
        if simplex.count == 3 {
            *cache = simplex.cache();
            return overlap_result(&simplex);
        }

        // A vanishing search direction means the origin sits on a
        // simplex feature; report overlap rather than risk cycling.
        if direction.length_squared() < FloatNum::EPSILON * FloatNum::EPSILON {
            *cache = simplex.cache();
            return overlap_result(&simplex);
        }

        non_unit_normal = direction;

        // Tentative new vertex: support(a, d) - support(b, -d)
        let vertex = &mut simplex.vertices[simplex.count];
        vertex.index_a = input.proxy_a.find_support(direction);
        vertex.w_a = input.proxy_a.vertex(vertex.index_a);
        vertex.index_b = local_proxy_b.find_support(-direction);
        vertex.w_b = local_proxy_b.vertex(vertex.index_b);
        vertex.w = vertex.w_a - vertex.w_b;

        iteration += 1;

        // Duplicate support pair is the primary termination criterion.
        let index_a = vertex.index_a;
        let index_b = vertex.index_b;
        let duplicate = (0..save_count).any(|slot| save_a[slot] == index_a && save_b[slot] == index_b);
        if duplicate {
            break;
        }

        simplex.count += 1;
    }

    let normal = input
        .transform_a
        .rotation()
        .rotate(non_unit_normal.normalize());

    let (local_point_a, local_point_b) = simplex.witness_points();

    let mut result = Distance {
        point_a: input.transform_a.transform_point(local_point_a),
        point_b: input.transform_a.transform_point(local_point_b),
        normal,
        distance: local_point_a.distance(&local_point_b),
    };

    *cache = simplex.cache();

    if input.use_radii {
        let radius_a = input.proxy_a.radius();
        let radius_b = input.proxy_b.radius();
        result.distance = (result.distance - radius_a - radius_b).max(0.);

        // Keep the witness points on the rounded perimeters even when
        // overlapped, so they move smoothly.
        result.point_a += normal * radius_a;
        result.point_b -= normal * radius_b;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::rotation::Rotation;
    use crate::shape::circle::Circle;
    use crate::shape::polygon::Polygon;
    use crate::shape::segment::Segment;
    use approx::assert_relative_eq;

    fn circle_pair_input(center_a: Vector, center_b: Vector, radius: FloatNum) -> DistanceInput {
        DistanceInput::new(
            Circle::new(center_a, radius).proxy(),
            Circle::new(center_b, radius).proxy(),
            Transform::IDENTITY,
            Transform::IDENTITY,
            true,
        )
    }

    #[test]
    fn test_input_default_disables_radii() {
        assert!(!DistanceInput::default().use_radii());
    }

    #[test]
    fn test_separated_circles() {
        let input = circle_pair_input((0., 0.).into(), (4., 0.).into(), 1.);
        let mut cache = SimplexCache::EMPTY;

        let output = compute_distance(&input, &mut cache);
        assert_relative_eq!(output.distance(), 2., epsilon = 1e-6);
        assert_eq!(*output.normal(), (1., 0.).into());
        assert_eq!(*output.point_a(), (1., 0.).into());
        assert_eq!(*output.point_b(), (3., 0.).into());
    }

    #[test]
    fn test_overlapping_circles() {
        let input = circle_pair_input((0., 0.).into(), (1., 0.).into(), 2.);
        let mut cache = SimplexCache::EMPTY;

        let output = compute_distance(&input, &mut cache);
        assert_eq!(output.distance(), 0.);
    }

    #[test]
    fn test_box_against_segment() {
        let polygon = Polygon::make_box(1., 1.);
        let segment = Segment::new((2., -1.).into(), (2., 1.).into());

        let input = DistanceInput::new(
            polygon.proxy(),
            segment.proxy(),
            Transform::IDENTITY,
            Transform::IDENTITY,
            true,
        );
        let mut cache = SimplexCache::EMPTY;

        let output = compute_distance(&input, &mut cache);
        assert_relative_eq!(output.distance(), 1., epsilon = 1e-5);
        assert_relative_eq!(output.normal().x(), 1., epsilon = 1e-5);
    }

    #[test]
    fn test_transforms_applied() {
        // Two unit circles at the origin of their local frames, moved
        // apart by the body transforms.
        let input = DistanceInput::new(
            Circle::new((0., 0.).into(), 1.).proxy(),
            Circle::new((0., 0.).into(), 1.).proxy(),
            Transform::new((0., 0.).into(), Rotation::IDENTITY),
            Transform::new((0., 5.).into(), Rotation::from_angle(1.)),
            true,
        );
        let mut cache = SimplexCache::EMPTY;

        let output = compute_distance(&input, &mut cache);
        assert_relative_eq!(output.distance(), 3., epsilon = 1e-5);
        assert_relative_eq!(output.normal().y(), 1., epsilon = 1e-5);
    }

    #[test]
    fn test_warm_start_idempotence() {
        let polygon = Polygon::make_box(0.5, 0.5);
        let input = DistanceInput::new(
            polygon.proxy(),
            Circle::new((3., 2.).into(), 0.25).proxy(),
            Transform::IDENTITY,
            Transform::IDENTITY,
            true,
        );

        let mut cache = SimplexCache::EMPTY;
        let first = compute_distance(&input, &mut cache);

        let warm = cache;
        let second = compute_distance(&input, &mut cache);

        assert_eq!(first.distance(), second.distance());
        assert_eq!(*first.point_a(), *second.point_a());
        assert_eq!(*first.point_b(), *second.point_b());
        assert_eq!(cache, warm);
    }
}
