//! Scalar helpers with shader-language semantics.

use glam::{Vec2, Vec4};

/// `0.0` if `x < edge`, else `1.0`.
#[inline]
pub fn step(edge: f32, x: f32) -> f32 {
    if x < edge { 0.0 } else { 1.0 }
}

/// Fractional part relative to `floor` (always non-negative).
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
pub fn fract2(v: Vec2) -> Vec2 {
    Vec2::new(fract(v.x), fract(v.y))
}

#[inline]
pub fn saturate4(v: Vec4) -> Vec4 {
    v.clamp(Vec4::ZERO, Vec4::ONE)
}
