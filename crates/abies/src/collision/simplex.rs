use super::ShapeProxy;
use crate::math::{vector::Vector, FloatNum};

/// Simplex population, doubling as the GJK state machine tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SimplexKind {
    #[default]
    Uninitialized,
    Point,
    LineSegment,
    Triangle,
}

impl SimplexKind {
    fn from_count(count: usize) -> Self {
        match count {
            1 => SimplexKind::Point,
            2 => SimplexKind::LineSegment,
            3 => SimplexKind::Triangle,
            _ => SimplexKind::Uninitialized,
        }
    }

    pub fn count(&self) -> usize {
        match self {
            SimplexKind::Uninitialized => 0,
            SimplexKind::Point => 1,
            SimplexKind::LineSegment => 2,
            SimplexKind::Triangle => 3,
        }
    }
}

/// Warm start record for the distance query: which support indices
/// made up the final simplex of the previous call. A default cache
/// starts the query from scratch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimplexCache {
    kind: SimplexKind,
    index_a: [u8; 3],
    index_b: [u8; 3],
}

impl SimplexCache {
    pub const EMPTY: SimplexCache = SimplexCache {
        kind: SimplexKind::Uninitialized,
        index_a: [0; 3],
        index_b: [0; 3],
    };

    #[inline]
    pub fn kind(&self) -> SimplexKind {
        self.kind
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.kind.count()
    }

    #[inline]
    pub(crate) fn index_a(&self, slot: usize) -> usize {
        self.index_a[slot] as usize
    }

    #[inline]
    pub(crate) fn index_b(&self, slot: usize) -> usize {
        self.index_b[slot] as usize
    }
}

/// One Minkowski difference support point plus its barycentric weight.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct SimplexVertex {
    /// Support point on proxy A
    pub(crate) w_a: Vector,
    /// Support point on proxy B
    pub(crate) w_b: Vector,
    /// `w_a - w_b`
    pub(crate) w: Vector,
    /// Barycentric weight, negative while unresolved
    pub(crate) a: FloatNum,
    pub(crate) index_a: usize,
    pub(crate) index_b: usize,
}

/// GJK working set: up to three Minkowski difference points.
#[derive(Clone, Copy, Debug, Default)]
pub struct Simplex {
    pub(crate) vertices: [SimplexVertex; 3],
    pub(crate) count: usize,
}

/// `cross(s, e)`, the scalar-vector 2D cross product.
#[inline]
fn cross_scalar(s: FloatNum, e: Vector) -> Vector {
    Vector::new(-s * e.y(), s * e.x())
}

/// Direction from segment `w1-w2` toward the origin; the edge normal
/// component of `-(w1 + w2)`.
#[inline]
fn edge_direction(w_sum: Vector, e: Vector) -> Vector {
    cross_scalar(w_sum ^ e, e)
}

impl Simplex {
    /// Restores the simplex from a warm start cache, or seeds it with
    /// support pair (0, 0) when the cache is empty.
    pub fn create(cache: &SimplexCache, proxy_a: &ShapeProxy, proxy_b: &ShapeProxy) -> Self {
        let count = cache.count();
        debug_assert!(count <= 3);

        let mut result = Simplex {
            vertices: [SimplexVertex::default(); 3],
            count,
        };

        if count == 0 {
            let w_a = proxy_a.vertex(0);
            let w_b = proxy_b.vertex(0);
            result.count = 1;
            result.vertices[0] = SimplexVertex {
                w_a,
                w_b,
                w: w_a - w_b,
                a: 1.,
                index_a: 0,
                index_b: 0,
            };
        } else {
            for (slot, vertex) in result.vertices[..count].iter_mut().enumerate() {
                vertex.index_a = cache.index_a(slot);
                vertex.index_b = cache.index_b(slot);
                vertex.w_a = proxy_a.vertex(vertex.index_a);
                vertex.w_b = proxy_b.vertex(vertex.index_b);
                vertex.w = vertex.w_a - vertex.w_b;

                // invalid until the next solve
                vertex.a = -1.;
            }
        }

        result
    }

    pub fn cache(&self) -> SimplexCache {
        let mut result = SimplexCache {
            kind: SimplexKind::from_count(self.count),
            index_a: [0; 3],
            index_b: [0; 3],
        };
        for (slot, vertex) in self.vertices[..self.count].iter().enumerate() {
            result.index_a[slot] = vertex.index_a as u8;
            result.index_b[slot] = vertex.index_b as u8;
        }

        result
    }

    /// Voronoi region classification for a 1-simplex. Collapses to the
    /// closest feature and returns the next search direction.
    pub(crate) fn solve2(&mut self) -> Vector {
        let w1 = self.vertices[0].w;
        let w2 = self.vertices[1].w;
        let e12 = w2 - w1;

        // w1 region
        let d12_2 = -(w1 * e12);
        if d12_2 <= 0. {
            // a2 <= 0, clamp it to 0
            self.vertices[0].a = 1.;
            self.count = 1;

            return -w1;
        }

        // w2 region
        let d12_1 = w2 * e12;
        if d12_1 <= 0. {
            // a1 <= 0, clamp it to 0
            self.vertices[1].a = 1.;
            self.vertices[0] = self.vertices[1];
            self.count = 1;

            return -w2;
        }

        // Must be in e12 region.
        let inv_d12 = 1. / (d12_1 + d12_2);
        self.vertices[0].a = d12_1 * inv_d12;
        self.vertices[1].a = d12_2 * inv_d12;
        self.count = 2;

        edge_direction(w1 + w2, e12)
    }

    /// Voronoi region classification for a 2-simplex. A zero return
    /// means the origin is inside the triangle: the shapes overlap.
    pub(crate) fn solve3(&mut self) -> Vector {
        let w1 = self.vertices[0].w;
        let w2 = self.vertices[1].w;
        let w3 = self.vertices[2].w;

        // Edge12
        // [1      1     ][a1] = [1]
        // [w1.e12 w2.e12][a2] = [0]
        // a3 = 0
        let e12 = w2 - w1;
        let d12_1 = w2 * e12;
        let d12_2 = -(w1 * e12);

        // Edge13
        // [1      1     ][a1] = [1]
        // [w1.e13 w3.e13][a3] = [0]
        // a2 = 0
        let e13 = w3 - w1;
        let d13_1 = w3 * e13;
        let d13_2 = -(w1 * e13);

        // Edge23
        // [1      1     ][a2] = [1]
        // [w2.e23 w3.e23][a3] = [0]
        // a1 = 0
        let e23 = w3 - w2;
        let d23_1 = w3 * e23;
        let d23_2 = -(w2 * e23);

        // Triangle123
        let n123 = e12 ^ e13;

        let d123_1 = n123 * (w2 ^ w3);
        let d123_2 = n123 * (w3 ^ w1);
        let d123_3 = n123 * (w1 ^ w2);

        // w1 region
        if d12_2 <= 0. && d13_2 <= 0. {
            self.vertices[0].a = 1.;
            self.count = 1;

            return -w1;
        }

        // e12
        if d12_1 > 0. && d12_2 > 0. && d123_3 <= 0. {
            let inv_d12 = 1. / (d12_1 + d12_2);

            self.vertices[0].a = d12_1 * inv_d12;
            self.vertices[1].a = d12_2 * inv_d12;
            self.count = 2;

            return edge_direction(w1 + w2, e12);
        }

        // e13
        if d13_1 > 0. && d13_2 > 0. && d123_2 <= 0. {
            let inv_d13 = 1. / (d13_1 + d13_2);

            self.vertices[0].a = d13_1 * inv_d13;
            self.vertices[2].a = d13_2 * inv_d13;
            self.vertices[1] = self.vertices[2];
            self.count = 2;

            return edge_direction(w1 + w3, e13);
        }

        // w2 region
        if d12_1 <= 0. && d23_2 <= 0. {
            self.vertices[1].a = 1.;
            self.vertices[0] = self.vertices[1];
            self.count = 1;

            return -w2;
        }

        // w3 region
        if d13_1 <= 0. && d23_1 <= 0. {
            self.vertices[2].a = 1.;
            self.vertices[0] = self.vertices[2];
            self.count = 1;

            return -w3;
        }

        // e23
        if d23_1 > 0. && d23_2 > 0. && d123_1 <= 0. {
            let inv_d23 = 1. / (d23_1 + d23_2);

            self.vertices[1].a = d23_1 * inv_d23;
            self.vertices[2].a = d23_2 * inv_d23;
            self.vertices[0] = self.vertices[2];
            self.count = 2;

            return edge_direction(w2 + w3, e23);
        }

        // Must be in triangle123, no search direction.
        let inv_d123 = 1. / (d123_1 + d123_2 + d123_3);
        self.vertices[0].a = d123_1 * inv_d123;
        self.vertices[1].a = d123_2 * inv_d123;
        self.vertices[2].a = d123_3 * inv_d123;
        self.count = 3;

        Vector::new(0., 0.)
    }

    /// Closest points on each proxy, recovered from the barycentric
    /// weights. Both points are combined independently.
    pub fn witness_points(&self) -> (Vector, Vector) {
        match self.count {
            1 => {
                let v1 = &self.vertices[0];
                (v1.w_a, v1.w_b)
            }
            2 => {
                let v1 = &self.vertices[0];
                let v2 = &self.vertices[1];
                (
                    v1.w_a * v1.a + v2.w_a * v2.a,
                    v1.w_b * v1.a + v2.w_b * v2.a,
                )
            }
            _ => {
                let v1 = &self.vertices[0];
                let v2 = &self.vertices[1];
                let v3 = &self.vertices[2];
                (
                    v1.w_a * v1.a + v2.w_a * v2.a + v3.w_a * v3.a,
                    v1.w_b * v1.a + v2.w_b * v2.a + v3.w_b * v3.a,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_point_simplex(w1: (FloatNum, FloatNum), w2: (FloatNum, FloatNum)) -> Simplex {
        let mut simplex = Simplex::default();
        simplex.count = 2;
        simplex.vertices[0].w = w1.into();
        simplex.vertices[0].w_a = w1.into();
        simplex.vertices[1].w = w2.into();
        simplex.vertices[1].w_a = w2.into();
        simplex
    }

    #[test]
    fn test_solve2_vertex_regions() {
        // Origin is beyond w1
        let mut simplex = two_point_simplex((1., 0.), (2., 0.));
        let direction = simplex.solve2();
        assert_eq!(simplex.count, 1);
        assert_eq!(direction, (-1., 0.).into());

        // Origin is beyond w2
        let mut simplex = two_point_simplex((-2., 0.), (-1., 0.));
        let direction = simplex.solve2();
        assert_eq!(simplex.count, 1);
        assert_eq!(simplex.vertices[0].w, (-1., 0.).into());
        assert_eq!(direction, (1., 0.).into());
    }

    #[test]
    fn test_solve2_edge_region() {
        // Origin projects onto the middle of the segment
        let mut simplex = two_point_simplex((-1., 1.), (1., 1.));
        let direction = simplex.solve2();
        assert_eq!(simplex.count, 2);

        // Direction points from the segment to the origin
        assert!(direction.y() < 0.);
        assert!(direction.x().abs() < 1e-6);

        // Barycentric weights sum to one
        let sum = simplex.vertices[0].a + simplex.vertices[1].a;
        assert!((sum - 1.).abs() < 1e-6);
    }

    #[test]
    fn test_solve3_containment() {
        let mut simplex = Simplex::default();
        simplex.count = 3;
        simplex.vertices[0].w = (-1., -1.).into();
        simplex.vertices[1].w = (1., -1.).into();
        simplex.vertices[2].w = (0., 2.).into();

        let direction = simplex.solve3();
        assert_eq!(simplex.count, 3);
        assert!(direction.is_zero());

        let sum = simplex.vertices[0].a + simplex.vertices[1].a + simplex.vertices[2].a;
        assert!((sum - 1.).abs() < 1e-5);
    }

    #[test]
    fn test_solve3_vertex_region() {
        let mut simplex = Simplex::default();
        simplex.count = 3;
        simplex.vertices[0].w = (1., 1.).into();
        simplex.vertices[1].w = (2., 1.).into();
        simplex.vertices[2].w = (1., 2.).into();

        let direction = simplex.solve3();
        assert_eq!(simplex.count, 1);
        assert_eq!(simplex.vertices[0].w, (1., 1.).into());
        assert_eq!(direction, (-1., -1.).into());
    }

    #[test]
    fn test_warm_start_round_trip() {
        let proxy_a = ShapeProxy::new(&[(0., 0.).into(), (1., 0.).into()], 0.);
        let proxy_b = ShapeProxy::new(&[(3., 0.).into(), (3., 1.).into()], 0.);

        let mut simplex = Simplex::create(&SimplexCache::EMPTY, &proxy_a, &proxy_b);
        assert_eq!(simplex.count, 1);
        assert_eq!(simplex.vertices[0].a, 1.);

        simplex.vertices[1] = SimplexVertex {
            w_a: proxy_a.vertex(1),
            w_b: proxy_b.vertex(1),
            w: proxy_a.vertex(1) - proxy_b.vertex(1),
            a: -1.,
            index_a: 1,
            index_b: 1,
        };
        simplex.count = 2;

        let cache = simplex.cache();
        assert_eq!(cache.kind(), SimplexKind::LineSegment);

        let restored = Simplex::create(&cache, &proxy_a, &proxy_b);
        assert_eq!(restored.count, 2);
        assert_eq!(restored.vertices[1].index_a, 1);
        assert_eq!(restored.vertices[1].w, simplex.vertices[1].w);
        assert_eq!(restored.vertices[1].a, -1.);
    }
}
