use super::{rotation::Rotation, vector::Vector};
use abies_macro_tools::Fields;

/// A 2D rigid transform: rotate, then translate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Fields)]
#[r]
pub struct Transform {
    position: Vector,
    rotation: Rotation,
}

impl From<(Vector, Rotation)> for Transform {
    fn from((position, rotation): (Vector, Rotation)) -> Self {
        Self { position, rotation }
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vector::new(0., 0.),
        rotation: Rotation::IDENTITY,
    };

    #[inline]
    pub const fn new(position: Vector, rotation: Rotation) -> Self {
        Self { position, rotation }
    }

    pub fn is_valid(&self) -> bool {
        self.position.is_valid() && self.rotation.is_valid()
    }

    /// local space to world space, `p' = R p + t`
    #[inline]
    pub fn transform_point(&self, point: Vector) -> Vector {
        self.rotation.rotate(point) + self.position
    }

    /// world space to local space, `p' = R⁻¹ (p - t)`
    #[inline]
    pub fn inv_transform_point(&self, point: Vector) -> Vector {
        self.rotation.inv_rotate(point - self.position)
    }

    /// Compose transforms, applying `other` first then `self`.
    pub fn multiply(&self, other: &Transform) -> Transform {
        Transform {
            position: self.transform_point(other.position),
            rotation: self.rotation.multiply(&other.rotation),
        }
    }

    /// `this⁻¹ × other`: converts a point local to `other`'s frame into
    /// a point local to this frame.
    pub fn multiply_by_inv(&self, other: &Transform) -> Transform {
        Transform {
            position: self.inv_transform_point(other.position),
            rotation: self.rotation.multiply_by_inv(&other.rotation),
        }
    }
}
