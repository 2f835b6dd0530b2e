use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CameraError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Follow", inline)]
#[serde(default)]
/// Entity-follow camera parameters.
pub struct FollowOptions {
    /// Camera offset in the entity's local frame, added to the per-call
    /// lateral/forward offsets.
    #[schemars(skip)]
    pub offset: [f32; 3],
    /// Maximum distance from the look pivot to the camera (0 disables).
    #[schemars(title = "Follow Distance", range(min = 0.0, max = 50.0), extend("step" = 0.5))]
    pub follow_distance: f32,
    /// Fraction of the remaining distance still left after one second.
    /// 0 snaps instantly; values near 1 trail heavily.
    #[schemars(title = "Smoothing", range(min = 0.0, max = 0.99), extend("step" = 0.01))]
    pub smoothing_factor: f32,
    /// Camera height above the entity origin, in the entity's frame.
    #[schemars(title = "Height", range(min = -5.0, max = 20.0), extend("step" = 0.1))]
    pub vertical_offset: f32,
    /// Height of the look pivot above the entity origin.
    #[schemars(title = "Look Height", range(min = 0.0, max = 5.0), extend("step" = 0.1))]
    pub look_height: f32,
    /// Lowest allowed camera pitch in degrees.
    #[schemars(skip)]
    pub min_pitch_deg: f32,
    /// Highest allowed camera pitch in degrees.
    #[schemars(skip)]
    pub max_pitch_deg: f32,
    /// Pull the camera in front of geometry between it and the entity.
    #[schemars(title = "Collision")]
    pub collision_enabled: bool,
    /// Gap kept between the camera and a blocking surface.
    #[schemars(skip)]
    pub collision_margin: f32,
}

impl Default for FollowOptions {
    fn default() -> Self {
        Self {
            offset: [0.0, 0.0, 0.0],
            follow_distance: 12.0,
            smoothing_factor: 0.01,
            vertical_offset: 2.0,
            look_height: 0.5,
            min_pitch_deg: -89.0,
            max_pitch_deg: 89.0,
            collision_enabled: true,
            collision_margin: 0.2,
        }
    }
}

impl FollowOptions {
    /// Pitch limits in radians, ordered (min, max).
    #[must_use]
    pub fn pitch_limits(&self) -> (f32, f32) {
        let a = self.min_pitch_deg.to_radians();
        let b = self.max_pitch_deg.to_radians();
        (a.min(b), a.max(b))
    }

    /// Check every field is usable by the follow controller.
    ///
    /// # Errors
    ///
    /// [`CameraError::InvalidArgument`] naming the first bad field:
    /// anything non-finite, a smoothing factor outside `[0, 1)`, or a
    /// negative follow distance or collision margin.
    pub fn validate(&self) -> Result<(), CameraError> {
        let finite = [
            ("offset", self.offset.iter().all(|v| v.is_finite())),
            ("follow_distance", self.follow_distance.is_finite()),
            ("smoothing_factor", self.smoothing_factor.is_finite()),
            ("vertical_offset", self.vertical_offset.is_finite()),
            ("look_height", self.look_height.is_finite()),
            ("min_pitch_deg", self.min_pitch_deg.is_finite()),
            ("max_pitch_deg", self.max_pitch_deg.is_finite()),
            ("collision_margin", self.collision_margin.is_finite()),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, ok)| !ok) {
            return Err(invalid(format!("follow.{name} must be finite")));
        }
        if !(0.0..1.0).contains(&self.smoothing_factor) {
            return Err(invalid(format!(
                "follow.smoothing_factor must be in [0, 1), got {}",
                self.smoothing_factor
            )));
        }
        if self.follow_distance < 0.0 {
            return Err(invalid(format!(
                "follow.follow_distance must be non-negative, got {}",
                self.follow_distance
            )));
        }
        if self.collision_margin < 0.0 {
            return Err(invalid(format!(
                "follow.collision_margin must be non-negative, got {}",
                self.collision_margin
            )));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> CameraError {
    CameraError::InvalidArgument(msg)
}
