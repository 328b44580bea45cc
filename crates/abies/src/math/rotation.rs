use super::{num, vector::Vector, FloatNum};
use abies_macro_tools::Fields;
use std::f32::consts::PI;

/// Convert any angle into the range `[-pi, pi]` using a symmetric
/// remainder, not fmod.
#[inline]
pub fn unwind_angle(radians: FloatNum) -> FloatNum {
    const TWO_PI: FloatNum = PI * 2.;
    radians - TWO_PI * (radians / TWO_PI).round()
}

/// 2D rotation as a unit complex number.
///
/// Construction from an angle and angle extraction use bounded-error
/// rational approximations, not real trig: `from_angle` is accurate to
/// about 0.1 degrees, `angle` to about 0.0023 degrees. Tests must
/// compare with explicit tolerances.
#[derive(Clone, Copy, Debug, PartialEq, Fields)]
#[r]
pub struct Rotation {
    cos: FloatNum,
    sin: FloatNum,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Rotation {
    pub const IDENTITY: Rotation = Rotation { cos: 1., sin: 0. };

    pub fn from_angle(radians: FloatNum) -> Self {
        const PI2: FloatNum = PI * PI;
        const HALF_PI: FloatNum = PI * 0.5;

        let x = unwind_angle(radians);

        // Padé approximant for cosine, shifted so the quadratic fit
        // always runs on [-pi/2, pi/2]
        let cos = if x < -HALF_PI {
            let y = x + PI;
            let y2 = y * y;
            -(PI2 - 4. * y2) / (PI2 + y2)
        } else if x > HALF_PI {
            let y = x - PI;
            let y2 = y * y;
            -(PI2 - 4. * y2) / (PI2 + y2)
        } else {
            let y2 = x * x;
            (PI2 - 4. * y2) / (PI2 + y2)
        };

        // Bhaskara-style rational sine on [0, pi]
        let sin = if x < 0. {
            let y = x + PI;
            -16. * y * (PI - y) / (5. * PI2 - 4. * y * (PI - y))
        } else {
            16. * x * (PI - x) / (5. * PI2 - 4. * x * (PI - x))
        };

        // the approximations drift slightly off unit length
        Rotation { cos, sin }.normalize()
    }

    /// Rotation whose x-axis is the given unit vector.
    pub fn from_unit_vector(unit_vector: Vector) -> Self {
        debug_assert!(unit_vector.is_normalized());
        Self {
            cos: unit_vector.x(),
            sin: unit_vector.y(),
        }
    }

    /// Rotation carrying the first unit vector onto the second.
    pub fn from_unit_vectors(from: Vector, to: Vector) -> Self {
        debug_assert!(from.is_normalized());
        debug_assert!(to.is_normalized());
        Self {
            cos: from * to,
            sin: from ^ to,
        }
        .normalize()
    }

    #[inline]
    fn valid_components(&self) -> bool {
        num::is_valid(self.cos) && num::is_valid(self.sin)
    }

    pub fn is_valid(&self) -> bool {
        self.valid_components() && self.is_normalized()
    }

    /// `cos² + sin² ≈ 1` within a 6e-4 tolerance.
    pub fn is_normalized(&self) -> bool {
        let value = self.cos * self.cos + self.sin * self.sin;
        (1. - 0.0006..1. + 0.0006).contains(&value)
    }

    pub fn normalize(&self) -> Self {
        debug_assert!(self.valid_components());

        let length = self.cos.hypot(self.sin);
        if length <= 0. {
            return Self::IDENTITY;
        }
        let inv_length = length.recip();
        Self {
            cos: self.cos * inv_length,
            sin: self.sin * inv_length,
        }
    }

    /// Integrate by an angular displacement in radians, first order:
    /// `R(θ+Δθ) ≈ R(θ) + Δθ·R'(θ)` followed by renormalization.
    pub fn integrate(&self, delta: FloatNum) -> Self {
        debug_assert!(self.valid_components());
        Self {
            cos: self.cos - self.sin * delta,
            sin: self.sin + self.cos * delta,
        }
        .normalize()
    }

    /// Angle in radians in `[-pi, pi]`, via a minimax atan
    /// approximation mapped per quadrant.
    pub fn angle(&self) -> FloatNum {
        debug_assert!(self.valid_components());

        if self.cos == 0. && self.sin == 0. {
            return 0.;
        }

        let y = self.sin.abs();
        let x = self.cos.abs();
        let mx = y.max(x);
        let mn = y.min(x);
        let a = mn / mx;

        let s = a * a;
        let c = s * a;
        let q = s * s;
        let t = -0.094097948 * q - 0.33213072;

        let mut r = 0.024840285 * q + 0.18681418;
        r = r * s + t;
        r = r * c + a;

        if y > x {
            r = (PI / 2.) - r;
        }
        if self.cos < 0. {
            r = PI - r;
        }
        if self.sin < 0. {
            r = -r;
        }

        r
    }

    /// Relative angle from this rotation to the other.
    pub fn relative_angle(&self, other: &Rotation) -> FloatNum {
        // angle(this⁻¹ × other)
        let cos = self.cos * other.cos + self.sin * other.sin;
        let sin = self.cos * other.sin - self.sin * other.cos;
        Rotation { cos, sin }.angle()
    }

    #[inline]
    pub fn x_axis(&self) -> Vector {
        (self.cos, self.sin).into()
    }

    #[inline]
    pub fn y_axis(&self) -> Vector {
        (-self.sin, self.cos).into()
    }

    /// Normalized linear interpolation of unit complex numbers.
    pub fn nlerp(&self, other: &Rotation, t: FloatNum) -> Self {
        let omt = 1. - t;
        let cos = self.cos * omt + other.cos * t;
        let sin = self.sin * omt + other.sin * t;

        let mag = cos.hypot(sin);
        if mag < FloatNum::EPSILON {
            // opposite rotations cancel; pick the quarter turn
            return Self {
                cos: -self.sin,
                sin: self.cos,
            };
        }

        let inv_mag = mag.recip();
        Self {
            cos: cos * inv_mag,
            sin: sin * inv_mag,
        }
    }

    /// Conjugate.
    #[inline]
    pub fn inv(&self) -> Self {
        Self {
            cos: self.cos,
            sin: -self.sin,
        }
    }

    pub fn rotate(&self, vector: Vector) -> Vector {
        let x = self.cos * vector.x() - self.sin * vector.y();
        let y = self.cos * vector.y() + self.sin * vector.x();
        (x, y).into()
    }

    #[inline]
    pub fn inv_rotate(&self, vector: Vector) -> Vector {
        self.inv().rotate(vector)
    }

    /// Complex multiplication, composing the rotations.
    pub fn multiply(&self, other: &Rotation) -> Self {
        Self {
            cos: self.cos * other.cos - self.sin * other.sin,
            sin: self.sin * other.cos + self.cos * other.sin,
        }
    }

    /// `this⁻¹ × other`
    pub fn multiply_by_inv(&self, other: &Rotation) -> Self {
        Self {
            cos: self.cos * other.cos + self.sin * other.sin,
            sin: self.cos * other.sin - self.sin * other.cos,
        }
    }
}
