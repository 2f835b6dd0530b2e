//! Recorded fly-by paths.
//!
//! A [`PathData`] is validated once at construction and is immutable
//! afterwards; playback shares it through an `Arc`.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::core::Pose;
use crate::error::CameraError;

/// One timed camera pose on a recorded path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Seconds from path start.
    pub timestamp: f32,
    /// Eye position in world space.
    pub position: Vec3,
    /// Camera orientation.
    pub orientation: Quat,
    /// Vertical field of view in degrees. `None` keeps the camera's fov
    /// from when playback started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fov: Option<f32>,
}

impl Keyframe {
    /// Keyframe carrying a full pose.
    #[must_use]
    pub fn new(timestamp: f32, pose: Pose) -> Self {
        Self {
            timestamp,
            position: pose.position,
            orientation: pose.orientation,
            fov: Some(pose.fov),
        }
    }

    /// Keyframe without a field of view.
    #[must_use]
    pub fn without_fov(timestamp: f32, position: Vec3, orientation: Quat) -> Self {
        Self {
            timestamp,
            position,
            orientation,
            fov: None,
        }
    }

    /// Pose of this keyframe, substituting `base_fov` when none is recorded.
    #[inline]
    #[must_use]
    pub fn pose(&self, base_fov: f32) -> Pose {
        Pose::new(self.position, self.orientation, self.fov.unwrap_or(base_fov))
    }
}

/// Keyframe pair enclosing a path time, with the fraction between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Index of the keyframe at or before the sample time.
    pub from: usize,
    /// Index of the keyframe after the sample time (equals `from` at the
    /// path ends).
    pub to: usize,
    /// Normalized position between the two, in [0, 1].
    pub fraction: f32,
}

/// Ordered, non-empty keyframe sequence starting at t=0 with strictly
/// increasing timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct PathData {
    keyframes: Vec<Keyframe>,
}

impl PathData {
    /// Validate and wrap a keyframe list.
    ///
    /// # Errors
    ///
    /// [`CameraError::InvalidPath`] when the list is empty, does not start
    /// at 0, is not strictly increasing, or holds non-finite values.
    pub fn new(keyframes: Vec<Keyframe>) -> Result<Self, CameraError> {
        let Some(first) = keyframes.first() else {
            return Err(CameraError::InvalidPath("path has no keyframes".into()));
        };
        if first.timestamp != 0.0 {
            return Err(CameraError::InvalidPath(format!(
                "first keyframe at {}s, expected 0s",
                first.timestamp
            )));
        }
        for (i, kf) in keyframes.iter().enumerate() {
            let finite = kf.timestamp.is_finite()
                && kf.position.is_finite()
                && kf.orientation.is_finite()
                && kf.fov.is_none_or(f32::is_finite);
            if !finite {
                return Err(CameraError::InvalidPath(format!(
                    "keyframe {i} has non-finite values"
                )));
            }
            if kf.orientation.length_squared() < f32::EPSILON {
                return Err(CameraError::InvalidPath(format!(
                    "keyframe {i} has a degenerate orientation"
                )));
            }
        }
        if let Some(i) = keyframes
            .windows(2)
            .position(|w| w[1].timestamp <= w[0].timestamp)
        {
            return Err(CameraError::InvalidPath(format!(
                "keyframe {} timestamp does not increase",
                i + 1
            )));
        }

        let keyframes = keyframes
            .into_iter()
            .map(|kf| Keyframe {
                orientation: kf.orientation.normalize(),
                ..kf
            })
            .collect();
        Ok(Self { keyframes })
    }

    /// Path built from `(timestamp, pose)` pairs.
    ///
    /// # Errors
    ///
    /// Same as [`PathData::new`].
    pub fn from_poses(
        poses: impl IntoIterator<Item = (f32, Pose)>,
    ) -> Result<Self, CameraError> {
        Self::new(
            poses
                .into_iter()
                .map(|(t, pose)| Keyframe::new(t, pose))
                .collect(),
        )
    }

    /// All keyframes in time order.
    #[must_use]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Number of keyframes (at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Natural duration: timestamp of the last keyframe.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.keyframes.last().map_or(0.0, |kf| kf.timestamp)
    }

    /// First keyframe.
    #[must_use]
    pub fn first(&self) -> &Keyframe {
        &self.keyframes[0]
    }

    /// Last keyframe.
    #[must_use]
    pub fn last(&self) -> &Keyframe {
        &self.keyframes[self.keyframes.len() - 1]
    }

    /// Locate the keyframes enclosing path time `t` (seconds, natural
    /// timeline) by binary search. `t` is clamped to the path.
    #[must_use]
    pub fn bracket(&self, t: f32) -> Bracket {
        let last = self.keyframes.len() - 1;
        let t = t.clamp(0.0, self.duration());
        // First keyframe strictly after t; at least 1 since keyframe 0 is
        // at t=0.
        let next = self.keyframes.partition_point(|kf| kf.timestamp <= t);
        if next > last {
            return Bracket {
                from: last,
                to: last,
                fraction: 0.0,
            };
        }
        let from = next.saturating_sub(1);
        let a = self.keyframes[from].timestamp;
        let b = self.keyframes[next].timestamp;
        Bracket {
            from,
            to: next,
            fraction: ((t - a) / (b - a)).clamp(0.0, 1.0),
        }
    }

    /// Interpolated pose at path time `t`.
    #[must_use]
    pub fn sample(&self, t: f32, base_fov: f32) -> Pose {
        let bracket = self.bracket(t);
        let from = self.keyframes[bracket.from].pose(base_fov);
        if bracket.from == bracket.to {
            return from;
        }
        let to = self.keyframes[bracket.to].pose(base_fov);
        from.interpolate(&to, bracket.fraction)
    }
}

impl TryFrom<Vec<Keyframe>> for PathData {
    type Error = CameraError;

    fn try_from(keyframes: Vec<Keyframe>) -> Result<Self, Self::Error> {
        Self::new(keyframes)
    }
}

impl From<PathData> for Vec<Keyframe> {
    fn from(path: PathData) -> Self {
        path.keyframes
    }
}
