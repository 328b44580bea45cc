use super::distance::{compute_distance, DistanceInput};
use super::simplex::SimplexCache;
use super::{CastHit, ShapeProxy, DISTANCE_MAX_ITERATIONS};
use crate::math::{num, transform::Transform, vector::Vector, FloatNum};
use crate::tolerance::Tolerance;
use abies_macro_tools::{Builder, Fields};

/// Input for casting proxy B along a linear translation against the
/// fixed proxy A.
#[derive(Clone, Copy, Debug, Fields, Builder)]
#[r]
pub struct ShapeCastInput {
    proxy_a: ShapeProxy,
    proxy_b: ShapeProxy,
    transform_a: Transform,
    transform_b: Transform,
    translation_b: Vector,
    #[default = 1.]
    max_fraction: FloatNum,
    /// Allow a slight approach when the shapes start out touching.
    /// Only meaningful for proxies with a positive radius.
    can_encroach: bool,
}

impl ShapeCastInput {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        proxy_a: ShapeProxy,
        proxy_b: ShapeProxy,
        transform_a: Transform,
        transform_b: Transform,
        translation_b: Vector,
        max_fraction: FloatNum,
        can_encroach: bool,
    ) -> Self {
        Self {
            proxy_a,
            proxy_b,
            transform_a,
            transform_b,
            translation_b,
            max_fraction,
            can_encroach,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.proxy_a.is_valid()
            && self.proxy_b.is_valid()
            && self.transform_a.is_valid()
            && self.transform_b.is_valid()
            && self.translation_b.is_valid()
            && num::is_valid(self.max_fraction)
            && (0. ..=1.).contains(&self.max_fraction)
    }
}

/// Conservative advancement sweep of proxy B against the fixed proxy
/// A. `None` on a miss, including failure to converge within the
/// iteration budget.
pub fn shape_cast(input: &ShapeCastInput, tolerance: &Tolerance) -> Option<CastHit> {
    debug_assert!(input.is_valid());

    if input.translation_b.length_squared() < FloatNum::EPSILON {
        // Zero translation, perform a static overlap test.
        let distance_input = DistanceInput::new(
            input.proxy_a,
            input.proxy_b,
            input.transform_a,
            input.transform_b,
            true,
        );
        let mut cache = SimplexCache::EMPTY;
        let distance = compute_distance(&distance_input, &mut cache);
        if distance.distance() <= 0. {
            let point = (*distance.point_a() + *distance.point_b()) * 0.5;
            return Some(CastHit::initial_overlap(point));
        }
        return None;
    }

    let linear_slop = tolerance.linear_slop();
    let total_radius = input.proxy_a.radius() + input.proxy_b.radius();
    let cast_tolerance = tolerance.cast_tolerance();

    let delta = input.translation_b;

    // Target separation accounts for the shape radii.
    let mut target = linear_slop.max(total_radius - linear_slop);
    debug_assert!(target > cast_tolerance);

    let mut cache = SimplexCache::EMPTY;
    let mut fraction: FloatNum = 0.;

    for iteration in 0..DISTANCE_MAX_ITERATIONS {
        let transform_b = Transform::new(
            *input.transform_b.position() + delta * fraction,
            *input.transform_b.rotation(),
        );
        let distance_input = DistanceInput::new(
            input.proxy_a,
            input.proxy_b,
            input.transform_a,
            transform_b,
            false,
        );
        let distance = compute_distance(&distance_input, &mut cache);

        if distance.distance() < target + cast_tolerance {
            if iteration == 0 {
                if input.can_encroach && distance.distance() > linear_slop * 2. {
                    // Let the shapes get slightly closer before
                    // declaring a hit.
                    target = distance.distance() - linear_slop;
                } else {
                    // Initial overlap or immediate proximity.
                    let point_a = *distance.point_a() + *distance.normal() * input.proxy_a.radius();
                    let point_b = *distance.point_b() - *distance.normal() * input.proxy_b.radius();

                    return Some(CastHit::initial_overlap((point_a + point_b) * 0.5));
                }
            } else {
                debug_assert!(distance.distance() > 0. && distance.normal().is_normalized());

                // Contact point on the surface of shape A.
                let contact = *distance.point_a() + *distance.normal() * input.proxy_a.radius();

                return Some(CastHit::new(contact, *distance.normal(), fraction));
            }
        }

        debug_assert!(distance.distance() > 0.);
        debug_assert!(distance.normal().is_normalized());

        // Non-negative closing speed means the shapes drift apart or
        // move in parallel.
        let approach_speed = delta * *distance.normal();
        if approach_speed >= 0. {
            return None;
        }

        fraction += (target - distance.distance()) / approach_speed;
        if fraction >= input.max_fraction {
            return None;
        }
    }

    // Failed to converge.
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::circle::Circle;
    use crate::shape::polygon::Polygon;
    use approx::assert_relative_eq;

    #[test]
    fn test_input_defaults_via_builder() {
        let input = ShapeCastInput::default();
        assert_eq!(input.max_fraction(), 1.);
        assert!(!input.can_encroach());
    }

    #[test]
    fn test_circle_sweeping_into_circle() {
        let input = ShapeCastInput::new(
            Circle::new((0., 0.).into(), 0.5).proxy(),
            Circle::new((0., 0.).into(), 0.5).proxy(),
            Transform::IDENTITY,
            Transform::new((2., 0.).into(), Default::default()),
            (-2., 0.).into(),
            1.,
            false,
        );

        let hit = shape_cast(&input, &Tolerance::default()).unwrap();
        assert_relative_eq!(hit.fraction(), 0.5, epsilon = 1e-2);
        assert_relative_eq!(hit.normal().x(), 1., epsilon = 1e-5);
        assert_relative_eq!(hit.point().x(), 0.5, epsilon = 1e-2);
    }

    #[test]
    fn test_cast_moving_away_misses() {
        let input = ShapeCastInput::new(
            Circle::new((0., 0.).into(), 0.5).proxy(),
            Circle::new((0., 0.).into(), 0.5).proxy(),
            Transform::IDENTITY,
            Transform::new((2., 0.).into(), Default::default()),
            (2., 0.).into(),
            1.,
            false,
        );

        assert!(shape_cast(&input, &Tolerance::default()).is_none());
    }

    #[test]
    fn test_cast_stops_at_max_fraction() {
        let input = ShapeCastInput::new(
            Circle::new((0., 0.).into(), 0.5).proxy(),
            Circle::new((0., 0.).into(), 0.5).proxy(),
            Transform::IDENTITY,
            Transform::new((4., 0.).into(), Default::default()),
            (-4., 0.).into(),
            0.5,
            false,
        );

        // Contact would happen around fraction 0.75.
        assert!(shape_cast(&input, &Tolerance::default()).is_none());
    }

    #[test]
    fn test_zero_translation_overlap() {
        let input = ShapeCastInput::new(
            Polygon::make_box(1., 1.).proxy(),
            Circle::new((0., 0.).into(), 0.5).proxy(),
            Transform::IDENTITY,
            Transform::IDENTITY,
            (0., 0.).into(),
            1.,
            false,
        );

        let hit = shape_cast(&input, &Tolerance::default()).unwrap();
        assert_eq!(hit.fraction(), 0.);
        assert!(hit.normal().is_zero());
    }

    #[test]
    fn test_box_sweeping_into_box() {
        let input = ShapeCastInput::new(
            Polygon::make_box(1., 1.).proxy(),
            Polygon::make_box(1., 1.).proxy(),
            Transform::IDENTITY,
            Transform::new((6., 0.).into(), Default::default()),
            (-8., 0.).into(),
            1.,
            false,
        );

        let hit = shape_cast(&input, &Tolerance::default()).unwrap();

        // Boxes touch after B moves 4 units of its 8 unit sweep.
        assert_relative_eq!(hit.fraction(), 0.5, epsilon = 1e-2);
        assert_relative_eq!(hit.normal().x(), 1., epsilon = 1e-5);
    }
}
