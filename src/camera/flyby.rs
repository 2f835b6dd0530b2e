//! Fly-by playback: a time-driven traversal of a recorded [`PathData`].
//!
//! Playback may be stretched or compressed to any positive duration; a
//! keyframe recorded at `t` is reached at `t * duration / natural`.

use std::sync::Arc;

use super::core::Pose;
use super::path::PathData;
use crate::animation::{EasingFunction, InterpolationContext};
use crate::error::CameraError;

/// Playback state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// Advancing each tick.
    Playing,
    /// Reached the last keyframe.
    Finished,
}

/// Result of advancing the player by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlybyStep {
    /// Still playing; commit this pose.
    Playing(Pose),
    /// Reached the end this tick; commit the final keyframe pose. Reported
    /// exactly once per playback.
    Finished(Pose),
    /// Already finished; nothing to commit.
    Inactive,
}

/// Sequencer advancing through a shared path by elapsed time.
///
/// A player is built per playback; restarting means starting a new one.
#[derive(Debug, Clone)]
pub struct FlybyPlayer {
    path: Arc<PathData>,
    easing: EasingFunction,
    base_fov: f32,
    elapsed: f32,
    duration: f32,
    status: PlaybackStatus,
}

impl FlybyPlayer {
    /// Begin playing `path` over `duration` seconds and return the player
    /// with the first keyframe pose. Keyframes without a fov use
    /// `base_fov`.
    ///
    /// # Errors
    ///
    /// [`CameraError::InvalidArgument`] for a non-positive or non-finite
    /// duration.
    pub fn start(
        path: Arc<PathData>,
        easing: EasingFunction,
        base_fov: f32,
        duration: f32,
    ) -> Result<(Self, Pose), CameraError> {
        validate_duration(duration)?;
        let first = path.first().pose(base_fov);
        let player = Self {
            path,
            easing,
            base_fov,
            elapsed: 0.0,
            duration,
            status: PlaybackStatus::Playing,
        };
        Ok((player, first))
    }

    /// Advance by `dt` seconds. Negative steps are treated as zero.
    pub fn advance(&mut self, dt: f32) -> FlybyStep {
        if self.status != PlaybackStatus::Playing {
            return FlybyStep::Inactive;
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.status = PlaybackStatus::Finished;
            return FlybyStep::Finished(self.path.last().pose(self.base_fov));
        }
        FlybyStep::Playing(self.path.sample(self.path_time(), self.base_fov))
    }

    /// Position on the path's own timeline for the current elapsed time.
    #[must_use]
    pub fn path_time(&self) -> f32 {
        match self.easing {
            // Direct scaling keeps keyframe hits exact when the playback
            // duration equals the natural duration.
            EasingFunction::Linear => self.elapsed * self.time_scale(),
            _ => self.progress().unified_t() * self.path.duration(),
        }
    }

    /// Natural duration divided by playback duration.
    #[must_use]
    pub fn time_scale(&self) -> f32 {
        if self.duration > 0.0 {
            self.path.duration() / self.duration
        } else {
            0.0
        }
    }

    /// Raw and eased progress through the playback.
    #[must_use]
    pub fn progress(&self) -> InterpolationContext {
        if self.duration <= 0.0 {
            return InterpolationContext::linear(0.0);
        }
        let raw = (self.elapsed / self.duration).clamp(0.0, 1.0);
        InterpolationContext::simple(raw, self.easing.evaluate(raw))
    }

    /// Seconds since playback started.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Effective playback duration in seconds.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Current state.
    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Path being played.
    #[must_use]
    pub fn path(&self) -> &Arc<PathData> {
        &self.path
    }
}

/// Reject durations that cannot drive playback.
pub(crate) fn validate_duration(duration: f32) -> Result<(), CameraError> {
    if duration.is_finite() && duration > 0.0 {
        Ok(())
    } else {
        Err(CameraError::InvalidArgument(format!(
            "fly-by duration must be positive, got {duration}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec3};

    use super::*;
    use crate::camera::path::Keyframe;

    fn pose_at(x: f32) -> Pose {
        Pose::new(Vec3::new(x, 0.0, 0.0), Quat::IDENTITY, 60.0)
    }

    fn abc_path() -> Arc<PathData> {
        Arc::new(
            PathData::from_poses([
                (0.0, pose_at(0.0)),
                (2.0, pose_at(10.0)),
                (5.0, pose_at(40.0)),
            ])
            .unwrap(),
        )
    }

    fn start(
        path: Arc<PathData>,
        easing: EasingFunction,
        duration: f32,
    ) -> FlybyPlayer {
        FlybyPlayer::start(path, easing, 60.0, duration).unwrap().0
    }

    fn playing_pose(step: FlybyStep) -> Pose {
        match step {
            FlybyStep::Playing(pose) => pose,
            other => panic!("expected Playing, got {other:?}"),
        }
    }

    #[test]
    fn scripted_ticks_hit_expected_poses() {
        let (mut player, first) =
            FlybyPlayer::start(abc_path(), EasingFunction::Linear, 60.0, 5.0)
                .unwrap();
        assert_eq!(first, pose_at(0.0));
        assert_eq!(player.status(), PlaybackStatus::Playing);

        let p1 = playing_pose(player.advance(1.0));
        assert!((p1.position.x - 5.0).abs() < 1e-5);

        assert_eq!(playing_pose(player.advance(1.0)), pose_at(10.0));

        assert_eq!(player.advance(3.0), FlybyStep::Finished(pose_at(40.0)));
        assert_eq!(player.status(), PlaybackStatus::Finished);

        // Final pose is reported once only
        assert_eq!(player.advance(1.0), FlybyStep::Inactive);
    }

    #[test]
    fn time_scaling_preserves_path_fraction() {
        let base = 5.0;
        for k in [0.5_f32, 2.0, 3.0] {
            let reference = start(abc_path(), EasingFunction::Linear, base);
            let scaled = start(abc_path(), EasingFunction::Linear, base * k);

            for elapsed in [0.5_f32, 1.0, 3.0, 4.5] {
                let mut r = reference.clone();
                let mut s = scaled.clone();
                let a = playing_pose(r.advance(elapsed));
                let b = playing_pose(s.advance(elapsed * k));
                assert!(
                    (a.position - b.position).length() < 1e-3,
                    "k={k} elapsed={elapsed}: {a:?} vs {b:?}"
                );
                assert!((r.progress().raw_t - s.progress().raw_t).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn invalid_duration_rejected() {
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                FlybyPlayer::start(abc_path(), EasingFunction::Linear, 60.0, bad),
                Err(CameraError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn eased_playback_keeps_endpoints() {
        let mut player = start(abc_path(), EasingFunction::SmoothStep, 5.0);
        let early = playing_pose(player.advance(0.5));
        // Smoothstep starts slower than linear (linear would be x=2.5)
        assert!(early.position.x < 2.5);
        assert_eq!(player.advance(10.0), FlybyStep::Finished(pose_at(40.0)));
    }

    #[test]
    fn single_keyframe_path_holds_for_duration() {
        let path = Arc::new(PathData::from_poses([(0.0, pose_at(7.0))]).unwrap());
        let mut player = start(path, EasingFunction::Linear, 2.0);
        assert_eq!(playing_pose(player.advance(1.0)), pose_at(7.0));
        assert_eq!(player.advance(1.0), FlybyStep::Finished(pose_at(7.0)));
    }

    #[test]
    fn keyframes_without_fov_use_base() {
        let path = Arc::new(
            PathData::new(vec![
                Keyframe::without_fov(0.0, Vec3::ZERO, Quat::IDENTITY),
                Keyframe::without_fov(1.0, Vec3::X, Quat::IDENTITY),
            ])
            .unwrap(),
        );
        let (mut player, first) =
            FlybyPlayer::start(path, EasingFunction::Linear, 45.0, 1.0).unwrap();
        assert_eq!(first.fov, 45.0);
        assert_eq!(playing_pose(player.advance(0.5)).fov, 45.0);
    }
}
