pub mod collision;
pub mod math;
pub mod shape;
pub mod tolerance;

pub mod prelude {
    pub use super::collision::{
        compute_distance, compute_time_of_impact, ray_cast_capsule, ray_cast_circle,
        ray_cast_polygon, ray_cast_segment, shape_cast, CastHit, Distance, DistanceInput,
        RayCastInput, ShapeCastInput, ShapeProxy, Simplex, SimplexCache, Sweep, Toi, ToiInput,
        ToiState,
    };
    pub use super::math::{
        rotation::Rotation, transform::Transform, vector::Vector, FloatNum,
    };
    pub use super::shape::{
        aabb::AABB, capsule::Capsule, circle::Circle, hull::Hull, polygon::Polygon,
        segment::{Segment, SegmentDistance},
        MassData, MAX_POLYGON_VERTICES,
    };
    pub use super::tolerance::{Tolerance, ToleranceBuilder};
}
