use std::sync::Arc;

use super::core::{CameraMode, CameraState, CameraUniform, Pose};
use super::flyby::{validate_duration, FlybyPlayer, FlybyStep};
use super::follow::{FollowController, FollowTarget, TickContext};
use super::path::PathData;
use crate::animation::InterpolationContext;
use crate::error::CameraError;
use crate::options::{FlybyCompletion, Options};
use crate::world::EntityHandle;

/// Controller-private state for the active mode.
#[derive(Debug, Clone, Default)]
enum ActiveMode {
    #[default]
    Idle,
    Following(FollowController),
    FlyingBy {
        player: FlybyPlayer,
        /// Follow target to return to when playback ends.
        resume: Option<FollowTarget>,
    },
}

impl ActiveMode {
    fn mode(&self) -> CameraMode {
        match self {
            Self::Idle => CameraMode::Idle,
            Self::Following(_) => CameraMode::Following,
            Self::FlyingBy { .. } => CameraMode::FlyingBy,
        }
    }
}

/// Owns a camera's [`CameraState`] and decides, tick by tick, whether the
/// follow controller or the fly-by player drives it.
///
/// Switching into a fly-by is immediate: the camera jumps to the path's
/// first keyframe. Switching back to following restarts smoothing from the
/// camera's current pose, so the return is seamless.
#[derive(Debug, Clone)]
pub struct CameraController {
    state: CameraState,
    active: ActiveMode,
    path: Option<Arc<PathData>>,
    options: Options,
}

impl CameraController {
    /// Idle camera at the origin using the configured field of view.
    ///
    /// # Errors
    ///
    /// [`CameraError::InvalidArgument`] if `options` fail
    /// [`Options::validate`].
    pub fn new(options: Options) -> Result<Self, CameraError> {
        let pose = Pose {
            fov: options.projection.fovy,
            ..Pose::default()
        };
        Self::with_pose(options, pose)
    }

    /// Idle camera starting at `pose`.
    ///
    /// # Errors
    ///
    /// [`CameraError::InvalidArgument`] if `options` fail
    /// [`Options::validate`] or `pose` is not finite.
    pub fn with_pose(options: Options, pose: Pose) -> Result<Self, CameraError> {
        options.validate()?;
        if !pose.is_finite() {
            return Err(CameraError::InvalidArgument(format!(
                "initial pose must be finite, got {pose:?}"
            )));
        }
        Ok(Self {
            state: CameraState {
                pose,
                mode: CameraMode::Idle,
            },
            active: ActiveMode::Idle,
            path: None,
            options,
        })
    }

    /// Committed state for the current frame.
    #[must_use]
    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Committed pose.
    #[must_use]
    pub fn pose(&self) -> Pose {
        self.state.pose
    }

    /// Active mode.
    #[must_use]
    pub fn mode(&self) -> CameraMode {
        self.state.mode
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace options. Takes effect on the next tick; a fly-by already
    /// playing keeps the easing it started with.
    ///
    /// # Errors
    ///
    /// [`CameraError::InvalidArgument`] if `options` fail
    /// [`Options::validate`]; the current options are kept.
    pub fn set_options(&mut self, options: Options) -> Result<(), CameraError> {
        options.validate()?;
        self.options = options;
        Ok(())
    }

    /// Bind the path subsequent [`play_flyby`](Self::play_flyby) calls use.
    pub fn load_path(&mut self, path: Arc<PathData>) {
        log::debug!(
            "fly-by path loaded: {} keyframes, {:.2}s",
            path.len(),
            path.duration()
        );
        self.path = Some(path);
    }

    /// Unbind the path. A fly-by in progress keeps its own reference and
    /// plays to the end.
    pub fn unload_path(&mut self) -> Option<Arc<PathData>> {
        self.path.take()
    }

    /// Currently bound path.
    #[must_use]
    pub fn path(&self) -> Option<&Arc<PathData>> {
        self.path.as_ref()
    }

    /// Target being followed, or remembered for after the fly-by.
    #[must_use]
    pub fn follow_target(&self) -> Option<FollowTarget> {
        match &self.active {
            ActiveMode::Idle => None,
            ActiveMode::Following(follow) => Some(follow.target()),
            ActiveMode::FlyingBy { resume, .. } => *resume,
        }
    }

    /// Fly-by progress, if one is playing.
    #[must_use]
    pub fn flyby_progress(&self) -> Option<InterpolationContext> {
        match &self.active {
            ActiveMode::FlyingBy { player, .. } => Some(player.progress()),
            _ => None,
        }
    }

    /// Seconds into the current fly-by, if one is playing.
    #[must_use]
    pub fn flyby_elapsed(&self) -> Option<f32> {
        match &self.active {
            ActiveMode::FlyingBy { player, .. } => Some(player.elapsed()),
            _ => None,
        }
    }

    /// Track `entity` this tick with lateral offset `dx` and forward/back
    /// offset `dz` in the entity's local frame.
    ///
    /// During a fly-by the pose is left to the player; the target is only
    /// remembered so following can resume afterwards.
    ///
    /// # Errors
    ///
    /// [`CameraError::InvalidArgument`] for a negative or non-finite delta
    /// time or offsets (no state change). [`CameraError::InvalidReference`]
    /// when the entity no longer exists: the last pose is held and the
    /// camera goes Idle.
    pub fn follow_entity(
        &mut self,
        ctx: &TickContext<'_>,
        entity: EntityHandle,
        dx: f32,
        dz: f32,
    ) -> Result<(), CameraError> {
        validate_delta(ctx.delta_time)?;
        let target = FollowTarget::new(entity, dx, dz)?;

        match &mut self.active {
            ActiveMode::FlyingBy { resume, .. } => {
                if ctx.entities.entity_pose(entity).is_none() {
                    log::warn!("ignoring follow request for stale {entity}");
                    if resume.is_some_and(|t| t.entity == entity) {
                        *resume = None;
                    }
                    return Err(CameraError::InvalidReference(entity));
                }
                *resume = Some(target);
                return Ok(());
            }
            ActiveMode::Following(follow) => follow.retarget(target),
            ActiveMode::Idle => {
                log::debug!("camera following {entity}");
                self.active = ActiveMode::Following(FollowController::new(
                    target,
                    self.state.pose,
                ));
            }
        }

        let ActiveMode::Following(follow) = &mut self.active else {
            return Ok(());
        };
        match follow.update(&self.options.follow, ctx) {
            Ok(pose) => {
                self.commit(pose);
                Ok(())
            }
            Err(e) => {
                log::warn!("follow stopped, holding last pose: {e}");
                self.active = ActiveMode::Idle;
                self.state.mode = CameraMode::Idle;
                Err(e)
            }
        }
    }

    /// Start (or restart) the bound fly-by path over `time` seconds.
    ///
    /// The camera jumps to the first keyframe immediately. A fly-by already
    /// playing is replaced, not queued.
    ///
    /// # Errors
    ///
    /// [`CameraError::InvalidArgument`] for a non-positive duration,
    /// [`CameraError::PathNotLoaded`] with no bound path. Neither changes
    /// any state.
    pub fn play_flyby(&mut self, time: f32) -> Result<(), CameraError> {
        validate_duration(time)?;
        let path = self.path.clone().ok_or(CameraError::PathNotLoaded)?;

        let (player, first) = FlybyPlayer::start(
            path,
            self.options.flyby.easing,
            self.state.pose.fov,
            time,
        )?;

        let resume = match std::mem::take(&mut self.active) {
            ActiveMode::Idle => None,
            ActiveMode::Following(follow) => Some(follow.target()),
            ActiveMode::FlyingBy { resume, .. } => resume,
        };
        log::info!(
            "fly-by started: {:.2}s over {} keyframes",
            time,
            player.path().len()
        );
        self.active = ActiveMode::FlyingBy { player, resume };
        self.commit(first);
        Ok(())
    }

    /// Advance time-driven playback by one tick.
    ///
    /// Only a fly-by progresses here; following is driven by
    /// [`follow_entity`](Self::follow_entity).
    ///
    /// # Errors
    ///
    /// [`CameraError::InvalidArgument`] for a negative or non-finite delta.
    pub fn advance(&mut self, delta_time: f32) -> Result<(), CameraError> {
        validate_delta(delta_time)?;
        let ActiveMode::FlyingBy { player, .. } = &mut self.active else {
            return Ok(());
        };
        match player.advance(delta_time) {
            FlybyStep::Playing(pose) => self.commit(pose),
            FlybyStep::Finished(pose) => {
                self.commit(pose);
                log::info!("fly-by finished");
                self.leave_flyby(self.options.flyby.on_finish);
            }
            FlybyStep::Inactive => {}
        }
        Ok(())
    }

    /// Abort a fly-by in progress, holding the current pose and resuming
    /// the remembered follow target if there is one.
    ///
    /// Returns `false` if no fly-by was playing.
    pub fn cancel_flyby(&mut self) -> bool {
        if !matches!(self.active, ActiveMode::FlyingBy { .. }) {
            return false;
        }
        log::debug!("fly-by cancelled");
        self.leave_flyby(FlybyCompletion::ResumePrevious);
        true
    }

    /// Drop whatever drives the camera and hold the current pose.
    pub fn stop(&mut self) {
        self.active = ActiveMode::Idle;
        self.state.mode = CameraMode::Idle;
    }

    /// GPU uniform for the committed pose.
    #[must_use]
    pub fn uniform(&self, aspect: f32) -> CameraUniform {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(
            &self.state.pose,
            &self.options.projection.projection(aspect),
        );
        uniform
    }

    fn leave_flyby(&mut self, policy: FlybyCompletion) {
        let resume = match std::mem::take(&mut self.active) {
            ActiveMode::FlyingBy { resume, .. } => resume,
            other => {
                self.active = other;
                return;
            }
        };
        self.active = match (policy, resume) {
            (FlybyCompletion::ResumePrevious, Some(target)) => {
                log::debug!("resuming follow of {}", target.entity);
                ActiveMode::Following(FollowController::new(
                    target,
                    self.state.pose,
                ))
            }
            _ => ActiveMode::Idle,
        };
        self.state.mode = self.active.mode();
    }

    fn commit(&mut self, pose: Pose) {
        self.state.pose = pose;
        self.state.mode = self.active.mode();
    }
}

fn validate_delta(delta_time: f32) -> Result<(), CameraError> {
    if delta_time.is_finite() && delta_time >= 0.0 {
        Ok(())
    } else {
        Err(CameraError::InvalidArgument(format!(
            "delta time must be finite and non-negative, got {delta_time}"
        )))
    }
}
