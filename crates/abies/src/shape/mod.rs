pub mod aabb;
pub mod capsule;
pub mod circle;
pub mod hull;
pub mod polygon;
pub mod segment;

use crate::math::{vector::Vector, FloatNum};
use abies_macro_tools::Fields;

/// Hard cap on polygon and hull vertex counts; everything downstream
/// (proxies, simplex bookkeeping) sizes its arrays off this.
pub const MAX_POLYGON_VERTICES: usize = 8;

/// Mass, center of mass and rotational inertia of a shape at a given
/// density.
#[derive(Clone, Copy, Debug, Default, Fields)]
#[r]
pub struct MassData {
    mass: FloatNum,
    center: Vector,
    rotational_inertia: FloatNum,
}

impl MassData {
    pub const fn new(mass: FloatNum, center: Vector, rotational_inertia: FloatNum) -> Self {
        Self {
            mass,
            center,
            rotational_inertia,
        }
    }
}
