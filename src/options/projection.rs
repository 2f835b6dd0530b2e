use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::core::{Projection, DEFAULT_FOV};
use crate::error::CameraError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Projection", inline)]
#[serde(default)]
/// Camera projection parameters.
pub struct ProjectionOptions {
    /// Vertical field of view in degrees, used until a pose overrides it.
    #[schemars(title = "Field of View", range(min = 20.0, max = 120.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            fovy: DEFAULT_FOV,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl ProjectionOptions {
    /// Projection for a viewport with the given aspect ratio.
    #[must_use]
    pub fn projection(&self, aspect: f32) -> Projection {
        Projection {
            aspect,
            znear: self.znear,
            zfar: self.zfar,
        }
    }

    /// Check the frustum is well formed.
    ///
    /// # Errors
    ///
    /// [`CameraError::InvalidArgument`] unless `0 < fovy < 180` and
    /// `0 < znear < zfar`, all finite.
    pub fn validate(&self) -> Result<(), CameraError> {
        let fov_ok = self.fovy > 0.0 && self.fovy < 180.0;
        let planes_ok = self.znear > 0.0
            && self.zfar.is_finite()
            && self.znear < self.zfar;
        if fov_ok && planes_ok {
            Ok(())
        } else {
            Err(CameraError::InvalidArgument(format!(
                "projection needs 0 < fovy < 180 and 0 < znear < zfar, got \
                 fovy={} znear={} zfar={}",
                self.fovy, self.znear, self.zfar
            )))
        }
    }
}
