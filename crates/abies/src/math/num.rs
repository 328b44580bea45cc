use super::FloatNum;

/// finite and not NaN
#[inline]
pub fn is_valid(value: FloatNum) -> bool {
    value.is_finite()
}

#[inline]
pub(crate) fn clamp(value: FloatNum, min: FloatNum, max: FloatNum) -> FloatNum {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
