pub mod num;
pub mod rotation;
pub mod transform;
pub mod vector;

pub type FloatNum = f32;
