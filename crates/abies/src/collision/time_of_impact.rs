use super::distance::{compute_distance, DistanceInput};
use super::simplex::{SimplexCache, SimplexKind};
use super::{ShapeProxy, DISTANCE_MAX_ITERATIONS};
use crate::math::rotation::{unwind_angle, Rotation};
use crate::math::{num, transform::Transform, vector::Vector, FloatNum};
use crate::shape::MAX_POLYGON_VERTICES;
use crate::tolerance::Tolerance;
use abies_macro_tools::{Builder, Fields};

/// Motion of a body over one step: linear interpolation of the center
/// of mass between `c1` and `c2` and normalized interpolation of the
/// rotation between `q1` and `q2`. `local_center` is the center of
/// mass in the body frame.
#[derive(Clone, Copy, Debug, Fields, Builder)]
#[r]
pub struct Sweep {
    local_center: Vector,
    c1: Vector,
    c2: Vector,
    q1: Rotation,
    q2: Rotation,
}

impl Sweep {
    pub const fn new(local_center: Vector, c1: Vector, c2: Vector, q1: Rotation, q2: Rotation) -> Self {
        Self {
            local_center,
            c1,
            c2,
            q1,
            q2,
        }
    }

    /// A sweep that keeps the body fixed at the given transform.
    pub fn stationary(transform: &Transform) -> Self {
        let center = *transform.position();
        Self {
            local_center: Vector::new(0., 0.),
            c1: center,
            c2: center,
            q1: *transform.rotation(),
            q2: *transform.rotation(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.local_center.is_valid()
            && self.c1.is_valid()
            && self.c2.is_valid()
            && self.q1.is_valid()
            && self.q2.is_valid()
    }

    /// Body transform at the interpolation fraction `t` in `[0, 1]`.
    pub fn transform_of(&self, t: FloatNum) -> Transform {
        let rotation = self.q1.nlerp(&self.q2, t);
        let position = self.c1 * (1. - t) + self.c2 * t - rotation.rotate(self.local_center);

        Transform::new(position, rotation)
    }

    #[inline]
    pub fn linear_velocity(&self) -> Vector {
        self.c2 - self.c1
    }

    pub fn angular_displacement(&self) -> FloatNum {
        unwind_angle(self.q2.angle() - self.q1.angle())
    }

    /// Rebases the sweep so that it starts at `fraction` and covers
    /// the remaining motion.
    pub fn advance(&self, fraction: FloatNum) -> Sweep {
        let advanced = self.transform_of(fraction);
        let remaining = 1. - fraction;

        let c1 = *advanced.position() + advanced.rotation().rotate(self.local_center);
        let q2 = Rotation::from_angle(
            advanced.rotation().angle() + self.angular_displacement() * remaining,
        );

        Sweep {
            local_center: self.local_center,
            c1,
            c2: self.c2,
            q1: *advanced.rotation(),
            q2,
        }
    }
}

/// Input for the time of impact query between two swept proxies.
#[derive(Clone, Copy, Debug, Fields, Builder)]
#[r]
pub struct ToiInput {
    proxy_a: ShapeProxy,
    proxy_b: ShapeProxy,
    sweep_a: Sweep,
    sweep_b: Sweep,
    #[default = 1.]
    max_fraction: FloatNum,
}

impl ToiInput {
    pub fn new(
        proxy_a: ShapeProxy,
        proxy_b: ShapeProxy,
        sweep_a: Sweep,
        sweep_b: Sweep,
        max_fraction: FloatNum,
    ) -> Self {
        Self {
            proxy_a,
            proxy_b,
            sweep_a,
            sweep_b,
            max_fraction,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.proxy_a.is_valid()
            && self.proxy_b.is_valid()
            && self.sweep_a.is_valid()
            && self.sweep_b.is_valid()
            && num::is_valid(self.max_fraction)
            && (0. ..=1.).contains(&self.max_fraction)
    }
}

/// Outcome classification of a time of impact query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToiState {
    /// The iteration budget ran out before the query resolved. Retry
    /// with a smaller step or fall back to the reported fraction.
    Failed,
    /// The shapes already overlap at the start of the sweep.
    Overlapped,
    /// The shapes reach the target separation at the reported
    /// fraction.
    Hit,
    /// The shapes stay separated over the whole sweep.
    Separated,
}

/// Time of impact query result.
#[derive(Clone, Copy, Debug, Fields)]
#[r]
pub struct Toi {
    state: ToiState,
    point: Vector,
    normal: Vector,
    fraction: FloatNum,
    separation: FloatNum,
}

/// Which feature pair defines the frozen separation axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SeparationAxis {
    /// Point versus point
    Points,
    /// Face of shape A versus point of shape B
    FaceA,
    /// Face of shape B versus point of shape A
    FaceB,
}

/// Separation along one frozen axis as a function of sweep time. The
/// axis is chosen from the distance query's final simplex and stays
/// fixed for one inner root search.
struct SeparationSolver<'a> {
    proxy_a: &'a ShapeProxy,
    proxy_b: &'a ShapeProxy,
    sweep_a: &'a Sweep,
    sweep_b: &'a Sweep,
    local_witness: Vector,
    local_axis: Vector,
    axis: SeparationAxis,
    cached_index_a: usize,
    cached_index_b: usize,
    flip_axis: bool,
}

impl<'a> SeparationSolver<'a> {
    fn new(
        cache: &SimplexCache,
        proxy_a: &'a ShapeProxy,
        proxy_b: &'a ShapeProxy,
        sweep_a: &'a Sweep,
        sweep_b: &'a Sweep,
        t: FloatNum,
    ) -> Self {
        debug_assert!(matches!(
            cache.kind(),
            SimplexKind::Point | SimplexKind::LineSegment
        ));

        let transform_a = sweep_a.transform_of(t);
        let transform_b = sweep_b.transform_of(t);

        let mut solver = SeparationSolver {
            proxy_a,
            proxy_b,
            sweep_a,
            sweep_b,
            local_witness: Vector::new(0., 0.),
            local_axis: Vector::new(0., 0.),
            axis: SeparationAxis::Points,
            cached_index_a: 0,
            cached_index_b: 0,
            flip_axis: false,
        };

        if cache.kind() == SimplexKind::Point {
            // Point simplex: the vector between the witness points is
            // the separation axis.
            let index_a = cache.index_a(0);
            let index_b = cache.index_b(0);

            let point_a = transform_a.transform_point(proxy_a.vertex(index_a));
            let point_b = transform_b.transform_point(proxy_b.vertex(index_b));

            solver.local_axis = (point_b - point_a).normalize();
            solver.axis = SeparationAxis::Points;
            solver.cached_index_a = index_a;
            solver.cached_index_b = index_b;
        } else if cache.index_a(0) == cache.index_a(1) {
            // Two points on B, one on A: the axis is a face of B.
            let index_a = cache.index_a(0);
            let point_b1 = proxy_b.vertex(cache.index_b(0));
            let point_b2 = proxy_b.vertex(cache.index_b(1));

            solver.local_axis = (!(point_b2 - point_b1)).normalize();
            solver.local_witness = (point_b1 + point_b2) * 0.5;

            let point_a = transform_a.transform_point(proxy_a.vertex(index_a));
            let point_b = transform_b.transform_point(solver.local_witness);
            let normal_world = transform_b.rotation().rotate(solver.local_axis);

            solver.flip_axis = (point_a - point_b) * normal_world < 0.;
            solver.axis = SeparationAxis::FaceB;
            solver.cached_index_a = index_a;
        } else {
            // Two points on A: the axis is a face of A.
            let index_b = cache.index_b(0);
            let point_a1 = proxy_a.vertex(cache.index_a(0));
            let point_a2 = proxy_a.vertex(cache.index_a(1));

            solver.local_axis = (!(point_a2 - point_a1)).normalize();
            solver.local_witness = (point_a1 + point_a2) * 0.5;

            let point_a = transform_a.transform_point(solver.local_witness);
            let point_b = transform_b.transform_point(proxy_b.vertex(index_b));
            let normal_world = transform_a.rotation().rotate(solver.local_axis);

            solver.flip_axis = (point_b - point_a) * normal_world < 0.;
            solver.axis = SeparationAxis::FaceA;
            solver.cached_index_b = index_b;
        }

        solver
    }

    fn signed_axis(&self) -> Vector {
        if self.flip_axis {
            -self.local_axis
        } else {
            self.local_axis
        }
    }

    fn separation_at(
        &self,
        transform_a: &Transform,
        transform_b: &Transform,
        normal: Vector,
        index_a: usize,
        index_b: usize,
    ) -> FloatNum {
        match self.axis {
            SeparationAxis::Points => {
                let point_a = transform_a.transform_point(self.proxy_a.vertex(index_a));
                let point_b = transform_b.transform_point(self.proxy_b.vertex(index_b));

                (point_b - point_a) * normal
            }
            SeparationAxis::FaceA => {
                let point_a = transform_a.transform_point(self.local_witness);
                let point_b = transform_b.transform_point(self.proxy_b.vertex(index_b));

                (point_b - point_a) * normal
            }
            SeparationAxis::FaceB => {
                let point_a = transform_a.transform_point(self.proxy_a.vertex(index_a));
                let point_b = transform_b.transform_point(self.local_witness);

                (point_a - point_b) * normal
            }
        }
    }

    /// Separation at time `t` using the cached witness indices.
    fn evaluate(&self, t: FloatNum) -> FloatNum {
        let transform_a = self.sweep_a.transform_of(t);
        let transform_b = self.sweep_b.transform_of(t);

        let normal = match self.axis {
            SeparationAxis::Points => transform_a.rotation().rotate(self.local_axis),
            SeparationAxis::FaceA => transform_a.rotation().rotate(self.signed_axis()),
            SeparationAxis::FaceB => transform_b.rotation().rotate(self.signed_axis()),
        };

        self.separation_at(
            &transform_a,
            &transform_b,
            normal,
            self.cached_index_a,
            self.cached_index_b,
        )
    }

    /// Minimum separation at time `t`, refreshing the witness indices
    /// by support search along the frozen axis.
    fn find_min_separation(&mut self, t: FloatNum) -> FloatNum {
        let transform_a = self.sweep_a.transform_of(t);
        let transform_b = self.sweep_b.transform_of(t);

        match self.axis {
            SeparationAxis::Points => {
                let axis_world = transform_a.rotation().rotate(self.local_axis);
                let axis_a = transform_a.rotation().inv_rotate(axis_world);
                let axis_b = transform_b.rotation().inv_rotate(-axis_world);

                self.cached_index_a = self.proxy_a.find_support(axis_a);
                self.cached_index_b = self.proxy_b.find_support(axis_b);

                self.separation_at(
                    &transform_a,
                    &transform_b,
                    axis_world,
                    self.cached_index_a,
                    self.cached_index_b,
                )
            }
            SeparationAxis::FaceA => {
                let normal_world = transform_a.rotation().rotate(self.signed_axis());
                let search = transform_b.rotation().inv_rotate(-normal_world);

                self.cached_index_b = self.proxy_b.find_support(search);

                self.separation_at(
                    &transform_a,
                    &transform_b,
                    normal_world,
                    self.cached_index_a,
                    self.cached_index_b,
                )
            }
            SeparationAxis::FaceB => {
                let normal_world = transform_b.rotation().rotate(self.signed_axis());
                let search = transform_a.rotation().inv_rotate(-normal_world);

                self.cached_index_a = self.proxy_a.find_support(search);

                self.separation_at(
                    &transform_a,
                    &transform_b,
                    normal_world,
                    self.cached_index_a,
                    self.cached_index_b,
                )
            }
        }
    }

    fn world_normal(&self, t: FloatNum) -> Vector {
        match self.axis {
            SeparationAxis::Points => self
                .sweep_a
                .transform_of(t)
                .rotation()
                .rotate(self.local_axis),
            SeparationAxis::FaceA => self
                .sweep_a
                .transform_of(t)
                .rotation()
                .rotate(self.signed_axis()),
            SeparationAxis::FaceB => self
                .sweep_b
                .transform_of(t)
                .rotation()
                .rotate(self.signed_axis()),
        }
    }

    fn witness_points(&self, t: FloatNum) -> (Vector, Vector) {
        let (local_point_a, local_point_b) = match self.axis {
            SeparationAxis::Points => (
                self.proxy_a.vertex(self.cached_index_a),
                self.proxy_b.vertex(self.cached_index_b),
            ),
            SeparationAxis::FaceA => (
                self.local_witness,
                self.proxy_b.vertex(self.cached_index_b),
            ),
            SeparationAxis::FaceB => (
                self.proxy_a.vertex(self.cached_index_a),
                self.local_witness,
            ),
        };

        let point_a = self.sweep_a.transform_of(t).transform_point(local_point_a);
        let point_b = self.sweep_b.transform_of(t).transform_point(local_point_b);

        (point_a, point_b)
    }
}

const ROOT_FINDER_MAX_ITERATIONS: usize = 50;

/// Alternating bisection/secant search for `separation(t) == target`
/// on the bracket `[a, b]` with `fa > 0 > fb` relative to the target.
fn find_root_bracketed(
    solver: &SeparationSolver,
    target: FloatNum,
    tolerance: FloatNum,
    mut a: FloatNum,
    mut fa: FloatNum,
    mut b: FloatNum,
    mut fb: FloatNum,
) -> FloatNum {
    for root_iteration in 0..ROOT_FINDER_MAX_ITERATIONS {
        let t = if root_iteration & 1 == 1 {
            // Secant rule to improve convergence.
            a + (target - fa) * (b - a) / (fb - fa)
        } else {
            // Bisection to guarantee progress.
            (a + b) * 0.5
        };

        let s = solver.evaluate(t);

        if (s - target).abs() < tolerance {
            return t;
        }

        // Keep the bracket in raw separations so the secant step stays
        // consistent with the seeds.
        if s > target {
            a = t;
            fa = s;
        } else {
            b = t;
            fb = s;
        }

        if (b - a).abs() < tolerance {
            break;
        }
    }

    (a + b) * 0.5
}

/// Conservative advancement time of impact between two swept convex
/// proxies. A [`ToiState::Failed`] result means the iteration budget
/// ran out; callers should retry with a smaller step.
pub fn compute_time_of_impact(input: &ToiInput, tolerance: &Tolerance) -> Toi {
    debug_assert!(input.is_valid());

    let stationary = |sweep: &Sweep| sweep.c1 == sweep.c2 && sweep.q1 == sweep.q2;

    if stationary(&input.sweep_a) && stationary(&input.sweep_b) {
        // Static case, a plain distance query settles it.
        let distance_input = DistanceInput::new(
            input.proxy_a,
            input.proxy_b,
            input.sweep_a.transform_of(0.),
            input.sweep_b.transform_of(0.),
            true,
        );
        let mut cache = SimplexCache::EMPTY;
        let distance = compute_distance(&distance_input, &mut cache);

        if distance.distance() <= 0. {
            return Toi {
                state: ToiState::Overlapped,
                point: (*distance.point_a() + *distance.point_b()) * 0.5,
                normal: Vector::new(0., 0.),
                fraction: 0.,
                separation: distance.distance(),
            };
        }

        return Toi {
            state: ToiState::Separated,
            point: Vector::new(0., 0.),
            normal: Vector::new(0., 0.),
            fraction: input.max_fraction,
            separation: distance.distance(),
        };
    }

    let linear_slop = tolerance.linear_slop();
    let total_radius = input.proxy_a.radius() + input.proxy_b.radius();
    let toi_tolerance = tolerance.cast_tolerance();
    let target = linear_slop.max(total_radius - linear_slop);

    let mut t1: FloatNum = 0.;
    let mut cache = SimplexCache::EMPTY;

    for _ in 0..DISTANCE_MAX_ITERATIONS {
        let transform_a = input.sweep_a.transform_of(t1);
        let transform_b = input.sweep_b.transform_of(t1);

        let distance_input = DistanceInput::new(
            input.proxy_a,
            input.proxy_b,
            transform_a,
            transform_b,
            false,
        );
        let distance = compute_distance(&distance_input, &mut cache);

        if distance.distance() <= 0. {
            // Overlap at the start, or a deep hit mid sweep.
            let point_a = *distance.point_a() + *distance.normal() * input.proxy_a.radius();
            let point_b = *distance.point_b() - *distance.normal() * input.proxy_b.radius();
            let start = t1 == 0.;

            return Toi {
                state: if start {
                    ToiState::Overlapped
                } else {
                    ToiState::Hit
                },
                point: (point_a + point_b) * 0.5,
                normal: if start {
                    Vector::new(0., 0.)
                } else {
                    *distance.normal()
                },
                fraction: t1,
                separation: distance.distance(),
            };
        }

        if distance.distance() <= target + toi_tolerance {
            let point_a = *distance.point_a() + *distance.normal() * input.proxy_a.radius();
            let point_b = *distance.point_b() - *distance.normal() * input.proxy_b.radius();

            return Toi {
                state: ToiState::Hit,
                point: (point_a + point_b) * 0.5,
                normal: *distance.normal(),
                fraction: t1,
                separation: distance.distance(),
            };
        }

        // Freeze a separating axis from the current simplex and push
        // t2 back toward the first time the separation hits target.
        let mut solver = SeparationSolver::new(
            &cache,
            &input.proxy_a,
            &input.proxy_b,
            &input.sweep_a,
            &input.sweep_b,
            t1,
        );

        let mut t2 = input.max_fraction;
        let mut found_hit = false;

        for _ in 0..MAX_POLYGON_VERTICES {
            let s2 = solver.find_min_separation(t2);

            if s2 > target + toi_tolerance {
                // Separated over the whole remaining interval along
                // this axis.
                t1 = t2;
                break;
            }

            if s2 > target - toi_tolerance {
                // t2 is on the surface, restart with a fresh axis.
                t1 = t2;
                found_hit = true;
                break;
            }

            let s1 = solver.evaluate(t1);

            if s1 < target - toi_tolerance {
                // The bracket is broken; report the best estimate
                // rather than let the root finder diverge.
                let normal = solver.world_normal(t1);
                let (point_a, point_b) = solver.witness_points(t1);

                return Toi {
                    state: ToiState::Hit,
                    point: (point_a + point_b) * 0.5,
                    normal,
                    fraction: t1,
                    separation: s1,
                };
            }

            if s1 <= target + toi_tolerance {
                // Already touching at t1.
                let normal = solver.world_normal(t1);
                let (point_a, point_b) = solver.witness_points(t1);

                return Toi {
                    state: ToiState::Hit,
                    point: (point_a + point_b) * 0.5,
                    normal,
                    fraction: t1,
                    separation: s1,
                };
            }

            let mut root =
                find_root_bracketed(&solver, target, toi_tolerance, t1, s1, t2, s2);
            if root < t1 || root > t2 {
                // Root finder failed, fall back to bisection.
                root = (t1 + t2) * 0.5;
            }

            t2 = root;
        }

        if !found_hit && t2 >= input.max_fraction {
            // Separated over the entire interval.
            return Toi {
                state: ToiState::Separated,
                point: Vector::new(0., 0.),
                normal: Vector::new(0., 0.),
                fraction: input.max_fraction,
                separation: solver.evaluate(input.max_fraction),
            };
        }

        if t1 >= input.max_fraction {
            return Toi {
                state: ToiState::Separated,
                point: Vector::new(0., 0.),
                normal: Vector::new(0., 0.),
                fraction: input.max_fraction,
                separation: solver.evaluate(input.max_fraction),
            };
        }
    }

    log::warn!("time of impact failed to converge, last safe fraction {t1}");

    Toi {
        state: ToiState::Failed,
        point: Vector::new(0., 0.),
        normal: Vector::new(0., 0.),
        fraction: t1,
        separation: 0.,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::circle::Circle;
    use crate::shape::polygon::Polygon;
    use approx::assert_relative_eq;

    fn linear_sweep(from: Vector, to: Vector) -> Sweep {
        Sweep::new(
            Vector::new(0., 0.),
            from,
            to,
            Rotation::IDENTITY,
            Rotation::IDENTITY,
        )
    }

    #[test]
    fn test_approaching_circles_hit() {
        let input = ToiInput::new(
            Circle::new((0., 0.).into(), 1.).proxy(),
            Circle::new((0., 0.).into(), 1.).proxy(),
            linear_sweep((0., 0.).into(), (5., 0.).into()),
            linear_sweep((10., 0.).into(), (5., 0.).into()),
            1.,
        );

        let result = compute_time_of_impact(&input, &Tolerance::default());
        assert_eq!(*result.state(), ToiState::Hit);

        // Centers close at 10 units per step; surfaces meet at t = 0.8.
        assert_relative_eq!(result.fraction(), 0.8, epsilon = 1e-2);
        assert_relative_eq!(result.normal().x(), 1., epsilon = 1e-3);
    }

    #[test]
    fn test_initially_touching_circles() {
        // Overlapping circles sweeping apart still report the contact
        // at the start of the step.
        let input = ToiInput::new(
            Circle::new((0., 0.).into(), 1.).proxy(),
            Circle::new((0., 0.).into(), 1.).proxy(),
            linear_sweep((0., 0.).into(), (0., 0.).into()),
            linear_sweep((1., 0.).into(), (5., 0.).into()),
            1.,
        );

        let result = compute_time_of_impact(&input, &Tolerance::default());
        assert_eq!(*result.state(), ToiState::Hit);
        assert_eq!(result.fraction(), 0.);
    }

    #[test]
    fn test_static_overlap() {
        let transform = Transform::IDENTITY;
        let input = ToiInput::new(
            Circle::new((0., 0.).into(), 1.).proxy(),
            Circle::new((1., 0.).into(), 1.).proxy(),
            Sweep::stationary(&transform),
            Sweep::stationary(&transform),
            1.,
        );

        let result = compute_time_of_impact(&input, &Tolerance::default());
        assert_eq!(*result.state(), ToiState::Overlapped);
        assert_eq!(result.fraction(), 0.);
    }

    #[test]
    fn test_static_separated() {
        let transform = Transform::IDENTITY;
        let input = ToiInput::new(
            Circle::new((0., 0.).into(), 1.).proxy(),
            Circle::new((10., 0.).into(), 1.).proxy(),
            Sweep::stationary(&transform),
            Sweep::stationary(&transform),
            1.,
        );

        let result = compute_time_of_impact(&input, &Tolerance::default());
        assert_eq!(*result.state(), ToiState::Separated);
        assert_eq!(result.fraction(), 1.);
        assert_relative_eq!(result.separation(), 8., epsilon = 1e-4);
    }

    #[test]
    fn test_passing_by_stays_separated() {
        let input = ToiInput::new(
            Circle::new((0., 0.).into(), 1.).proxy(),
            Circle::new((0., 0.).into(), 1.).proxy(),
            linear_sweep((0., 0.).into(), (0., 0.).into()),
            linear_sweep((-10., 5.).into(), (10., 5.).into()),
            1.,
        );

        let result = compute_time_of_impact(&input, &Tolerance::default());
        assert_eq!(*result.state(), ToiState::Separated);
    }

    #[test]
    fn test_box_falling_onto_box() {
        let input = ToiInput::new(
            Polygon::make_box(2., 0.5).proxy(),
            Polygon::make_box(0.5, 0.5).proxy(),
            Sweep::stationary(&Transform::IDENTITY),
            linear_sweep((0., 5.).into(), (0., 0.).into()),
            1.,
        );

        let result = compute_time_of_impact(&input, &Tolerance::default());
        assert_eq!(*result.state(), ToiState::Hit);

        // Surfaces meet after B falls 4 of its 5 units.
        assert_relative_eq!(result.fraction(), 0.8, epsilon = 1e-2);
    }

    #[test]
    fn test_input_defaults_via_builder() {
        assert_eq!(ToiInput::default().max_fraction(), 1.);

        let input: ToiInput = ToiInputBuilder::new().max_fraction(0.25f32).into();
        assert_eq!(input.max_fraction(), 0.25);
    }

    #[test]
    fn test_sweep_transform_endpoints() {
        let sweep = Sweep::new(
            Vector::new(0., 0.),
            (1., 2.).into(),
            (3., 4.).into(),
            Rotation::IDENTITY,
            Rotation::from_angle(1.),
        );

        assert_eq!(*sweep.transform_of(0.).position(), (1., 2.).into());
        assert_eq!(*sweep.transform_of(1.).position(), (3., 4.).into());
        assert_relative_eq!(sweep.transform_of(1.).rotation().angle(), 1., epsilon = 1e-2);
    }

    #[test]
    fn test_sweep_advance_continues_motion() {
        let sweep = Sweep::new(
            Vector::new(0., 0.),
            (0., 0.).into(),
            (10., 0.).into(),
            Rotation::IDENTITY,
            Rotation::from_angle(1.),
        );

        let advanced = sweep.advance(0.5);

        // The rebased sweep starts at the half-way pose and ends at the
        // same final pose.
        assert_eq!(*advanced.c1(), (5., 0.).into());
        assert_eq!(*advanced.c2(), (10., 0.).into());
        assert_relative_eq!(advanced.q2().angle(), 1., epsilon = 1e-2);
    }
}
