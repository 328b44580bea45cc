use crate::math::FloatNum;
use abies_macro_tools::{Builder, Fields};

/// Geometric tolerances threaded through the kernel.
///
/// Every query that needs a slop value takes a `&Tolerance` instead of
/// reading a process-wide constant, so tests and callers with unusual
/// length scales can tighten or loosen it per call site.
///
/// `linear_slop` is a small length; the default assumes 1 unit = 1
/// meter scaling.
#[derive(Clone, Copy, Debug, Fields, Builder)]
#[r]
pub struct Tolerance {
    #[default = 0.005]
    linear_slop: FloatNum,
}

impl Tolerance {
    /// Hull points closer together than this are welded into one.
    #[inline]
    pub fn weld_tolerance_squared(&self) -> FloatNum {
        16. * self.linear_slop * self.linear_slop
    }

    /// Deadband for treating hull point triples as collinear.
    #[inline]
    pub fn collinearity_slop(&self) -> FloatNum {
        2. * self.linear_slop
    }

    /// Convergence band for conservative-advancement casts.
    #[inline]
    pub fn cast_tolerance(&self) -> FloatNum {
        0.25 * self.linear_slop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let tolerance = Tolerance::default();
        assert_eq!(tolerance.linear_slop(), 0.005);
        assert_eq!(tolerance.collinearity_slop(), 0.01);
    }

    #[test]
    fn test_builder_override() {
        let tolerance: Tolerance = ToleranceBuilder::new().linear_slop(0.05f32).into();
        assert_eq!(tolerance.linear_slop(), 0.05);
        assert_eq!(tolerance.cast_tolerance(), 0.0125);
    }
}
