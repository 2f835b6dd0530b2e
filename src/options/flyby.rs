use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::EasingFunction;

/// What the camera does once a fly-by reaches its last keyframe.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FlybyCompletion {
    /// Always hold the final pose in Idle mode.
    Idle,
    /// Resume following the entity that was tracked before (or requested
    /// during) the fly-by; Idle when there is none.
    #[default]
    ResumePrevious,
}

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Fly-by", inline)]
#[serde(default)]
/// Fly-by playback parameters.
pub struct FlybyOptions {
    /// Curve applied to overall playback progress.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
    /// Mode to return to when playback finishes.
    #[schemars(title = "On Finish")]
    pub on_finish: FlybyCompletion,
}
