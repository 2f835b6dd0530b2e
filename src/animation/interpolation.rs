//! Centralized interpolation utilities for camera motion.

use glam::{Quat, Vec3};

/// Per-tick playback progress, computed once and shared by every
/// interpolated channel so position, orientation and fov never desync.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationContext {
    /// Raw progress (0.0 to 1.0), elapsed over duration.
    pub raw_t: f32,
    /// Eased progress. This is the value keyframe lookup uses.
    pub eased_t: f32,
}

impl InterpolationContext {
    /// Context with explicit raw and eased values.
    #[must_use]
    pub fn simple(raw_t: f32, eased_t: f32) -> Self {
        Self { raw_t, eased_t }
    }

    /// Playback complete (t=1.0).
    #[must_use]
    pub fn identity() -> Self {
        Self::simple(1.0, 1.0)
    }

    /// Linear context (no easing).
    #[must_use]
    pub fn linear(raw_t: f32) -> Self {
        Self::simple(raw_t, raw_t)
    }

    /// Unified progress value for interpolation.
    #[inline]
    #[must_use]
    pub fn unified_t(&self) -> f32 {
        self.eased_t
    }
}

impl Default for InterpolationContext {
    fn default() -> Self {
        Self::identity()
    }
}

/// Lerp two positions.
#[inline]
#[must_use]
pub fn lerp_position(start: Vec3, end: Vec3, t: f32) -> Vec3 {
    start + (end - start) * t
}

/// Lerp two f32 values.
#[inline]
#[must_use]
pub fn lerp_f32(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// Spherical interpolation along the shortest arc.
///
/// `q` and `-q` encode the same rotation; the end rotation is flipped into
/// the start's hemisphere so the camera never swings the long way round.
#[inline]
#[must_use]
pub fn slerp_shortest(start: Quat, end: Quat, t: f32) -> Quat {
    let end = if start.dot(end) < 0.0 { -end } else { end };
    start.slerp(end, t).normalize()
}

/// Blend weight toward a target for exponential smoothing.
///
/// `smoothing` is the fraction of the remaining distance still left after
/// one second. Returns `1 - smoothing^dt`, which composes across ticks:
/// two ticks of `dt/2` land where one tick of `dt` does.
#[inline]
#[must_use]
pub fn smoothing_blend(smoothing: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return 0.0;
    }
    if smoothing <= 0.0 {
        return 1.0;
    }
    1.0 - smoothing.clamp(0.0, 1.0).powf(dt)
}
