//! Easing curves and interpolation helpers shared by follow smoothing and
//! fly-by playback.

pub mod easing;
pub mod interpolation;

pub use easing::EasingFunction;
pub use interpolation::InterpolationContext;
