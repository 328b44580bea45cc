use super::{num, FloatNum};
use std::{
    fmt::Display,
    ops::{Add, AddAssign, BitXor, Div, DivAssign, Mul, MulAssign, Neg, Not, Sub, SubAssign},
};

#[derive(Clone, Debug, Copy, Default)]
pub struct Vector {
    pub(crate) x: FloatNum,
    pub(crate) y: FloatNum,
}

impl Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format!("{{ x: {}, y: {} }}", self.x, self.y))
    }
}

impl Vector {
    #[inline]
    pub const fn new(x: FloatNum, y: FloatNum) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> FloatNum {
        self.x
    }

    #[inline]
    pub fn y(&self) -> FloatNum {
        self.y
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        num::is_valid(self.x) && num::is_valid(self.y)
    }

    #[inline]
    pub fn abs(&self) -> FloatNum {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn length_squared(&self) -> FloatNum {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn distance(&self, other: &Vector) -> FloatNum {
        (*other - *self).abs()
    }

    #[inline]
    pub fn distance_squared(&self, other: &Vector) -> FloatNum {
        (*other - *self).length_squared()
    }

    #[inline]
    pub fn is_normalized(&self) -> bool {
        (self.length_squared() - 1.).abs() < 100. * FloatNum::EPSILON
    }

    /// Unit vector in the same direction, or the zero vector when the
    /// length is negligible; callers treat zero as "no well-defined
    /// direction", never as an error.
    pub fn normalize(&self) -> Vector {
        let length = self.abs();
        if length < FloatNum::EPSILON {
            return Default::default();
        }
        let shrink = length.recip();
        (self.x * shrink, self.y * shrink).into()
    }

    #[inline]
    pub fn lerp(&self, other: &Vector, t: FloatNum) -> Vector {
        *self * (1. - t) + *other * t
    }

    /// Reflection across a unit normal.
    #[inline]
    pub fn reflect(&self, normal: &Vector) -> Vector {
        *self - *normal * (2. * (*self * *normal))
    }

    #[inline]
    pub fn project(&self, onto: &Vector) -> Vector {
        *onto * ((*self * *onto) / (*onto * *onto))
    }

    #[inline]
    pub fn reject(&self, from: &Vector) -> Vector {
        *self - self.project(from)
    }

    #[inline]
    pub fn min(&self, other: &Vector) -> Vector {
        (self.x.min(other.x), self.y.min(other.y)).into()
    }

    #[inline]
    pub fn max(&self, other: &Vector) -> Vector {
        (self.x.max(other.x), self.y.max(other.y)).into()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0. && self.y == 0.
    }

    #[inline]
    pub fn set_zero(&mut self) {
        self.x = 0.;
        self.y = 0.;
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < FloatNum::EPSILON && (self.y - other.y).abs() < FloatNum::EPSILON
    }
}

impl From<(FloatNum, FloatNum)> for Vector {
    fn from((x, y): (FloatNum, FloatNum)) -> Self {
        Self { x, y }
    }
}

impl From<[FloatNum; 2]> for Vector {
    fn from([x, y]: [FloatNum; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Vector> for (FloatNum, FloatNum) {
    fn from(value: Vector) -> Self {
        (value.x, value.y)
    }
}

impl Add for Vector {
    type Output = Self;
    fn add(self, rhs: Vector) -> Self::Output {
        (self.x + rhs.x, self.y + rhs.y).into()
    }
}

impl Add<&Vector> for Vector {
    type Output = Self;
    fn add(self, rhs: &Vector) -> Self::Output {
        (self.x + rhs.x, self.y + rhs.y).into()
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector {
    type Output = Self;
    fn sub(self, rhs: Vector) -> Self::Output {
        (self.x - rhs.x, self.y - rhs.y).into()
    }
}

impl Sub<&Vector> for Vector {
    type Output = Self;
    fn sub(self, rhs: &Vector) -> Self::Output {
        (self.x - rhs.x, self.y - rhs.y).into()
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Vector) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Vector {
    type Output = Self;
    fn neg(self) -> Self::Output {
        (-self.x, -self.y).into()
    }
}

/// dot product
impl Mul for Vector {
    type Output = FloatNum;
    fn mul(self, rhs: Vector) -> Self::Output {
        (self.x * rhs.x) + (self.y * rhs.y)
    }
}

impl Mul<FloatNum> for Vector {
    type Output = Vector;
    fn mul(self, rhs: FloatNum) -> Self::Output {
        (self.x * rhs, self.y * rhs).into()
    }
}

impl MulAssign<FloatNum> for Vector {
    fn mul_assign(&mut self, rhs: FloatNum) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<FloatNum> for Vector {
    type Output = Vector;
    fn div(self, rhs: FloatNum) -> Self::Output {
        (self.x / rhs, self.y / rhs).into()
    }
}

impl DivAssign<FloatNum> for Vector {
    fn div_assign(&mut self, rhs: FloatNum) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

/// cross product, the z component only; positive when the turn from
/// self to rhs is counter-clockwise
impl BitXor for Vector {
    type Output = FloatNum;
    fn bitxor(self, rhs: Self) -> Self::Output {
        self.x * rhs.y - self.y * rhs.x
    }
}

/// right perpendicular `(y, -x)`; `v ^ !v` is negative, `!v` points to
/// the right of `v`
impl Not for Vector {
    type Output = Self;
    fn not(self) -> Self::Output {
        Self {
            x: self.y,
            y: -self.x,
        }
    }
}
