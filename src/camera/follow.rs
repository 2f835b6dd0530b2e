//! Entity-follow camera.
//!
//! Each tick the controller resolves the target entity, places the camera
//! at the entity-local offset, aims it back at a pivot on the entity, pulls
//! it in front of any geometry in between, and eases the committed pose
//! toward that result with frame-rate independent exponential smoothing.

use glam::{Quat, Vec3};

use super::core::{look_rotation, Pose};
use crate::animation::interpolation::{
    lerp_position, slerp_shortest, smoothing_blend,
};
use crate::error::CameraError;
use crate::options::FollowOptions;
use crate::world::{CollisionQuery, EntityHandle, EntityPose, EntitySource};

/// Collaborators and timing for one simulation tick.
#[derive(Clone, Copy)]
pub struct TickContext<'a> {
    /// Seconds since the previous tick.
    pub delta_time: f32,
    /// Entity pose lookup.
    pub entities: &'a dyn EntitySource,
    /// World collision queries.
    pub collision: &'a dyn CollisionQuery,
}

impl<'a> TickContext<'a> {
    /// Bundle a tick's delta time with its collaborators.
    #[must_use]
    pub fn new(
        delta_time: f32,
        entities: &'a dyn EntitySource,
        collision: &'a dyn CollisionQuery,
    ) -> Self {
        Self {
            delta_time,
            entities,
            collision,
        }
    }
}

impl std::fmt::Debug for TickContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickContext")
            .field("delta_time", &self.delta_time)
            .finish_non_exhaustive()
    }
}

/// Entity being tracked plus the per-call lateral (`dx`) and forward/back
/// (`dz`) offsets in its local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowTarget {
    /// Followed entity.
    pub entity: EntityHandle,
    /// Lateral offset.
    pub dx: f32,
    /// Forward/back offset.
    pub dz: f32,
}

impl FollowTarget {
    /// Validate offsets and build a target.
    ///
    /// # Errors
    ///
    /// [`CameraError::InvalidArgument`] for a non-finite offset.
    pub fn new(
        entity: EntityHandle,
        dx: f32,
        dz: f32,
    ) -> Result<Self, CameraError> {
        if !dx.is_finite() || !dz.is_finite() {
            return Err(CameraError::InvalidArgument(format!(
                "follow offsets must be finite, got dx={dx} dz={dz}"
            )));
        }
        Ok(Self { entity, dx, dz })
    }
}

/// Unsmoothed camera placement for the current entity pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesiredPose {
    /// Point on the entity the camera aims at.
    pub pivot: Vec3,
    /// Camera position after distance limiting and collision correction.
    pub position: Vec3,
    /// Look-at orientation, `None` when position and pivot coincide.
    pub orientation: Option<Quat>,
    /// Safe pivot-to-camera distance when the segment was obstructed.
    pub blocked_at: Option<f32>,
}

/// Follow controller state: the tracked target and the pose smoothing
/// continues from.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowController {
    target: FollowTarget,
    anchor: Pose,
}

impl FollowController {
    /// Start following `target`, smoothing from `anchor` (normally the
    /// camera's current committed pose).
    #[must_use]
    pub fn new(target: FollowTarget, anchor: Pose) -> Self {
        Self { target, anchor }
    }

    /// Currently tracked target.
    #[must_use]
    pub fn target(&self) -> FollowTarget {
        self.target
    }

    /// Replace the target (per-call offsets may change every tick).
    pub fn retarget(&mut self, target: FollowTarget) {
        self.target = target;
    }

    /// Pose smoothing continues from.
    #[must_use]
    pub fn anchor(&self) -> Pose {
        self.anchor
    }

    /// Advance one tick and return the pose to commit.
    ///
    /// A zero delta time returns the anchor unchanged. On error the anchor
    /// is left untouched.
    ///
    /// # Errors
    ///
    /// [`CameraError::InvalidReference`] when the entity no longer exists,
    /// [`CameraError::InvalidArgument`] when `options` would produce a
    /// non-finite pose.
    pub fn update(
        &mut self,
        options: &FollowOptions,
        ctx: &TickContext<'_>,
    ) -> Result<Pose, CameraError> {
        let entity = ctx
            .entities
            .entity_pose(self.target.entity)
            .ok_or(CameraError::InvalidReference(self.target.entity))?;

        if ctx.delta_time == 0.0 {
            return Ok(self.anchor);
        }

        let desired =
            desired_pose(options, &entity, self.target, ctx.collision);
        let next = smooth_toward(
            &self.anchor,
            &desired,
            options.smoothing_factor,
            ctx.delta_time,
        );
        if !next.is_finite() {
            return Err(CameraError::InvalidArgument(format!(
                "follow produced a non-finite pose for {}",
                self.target.entity
            )));
        }
        self.anchor = next;
        Ok(next)
    }
}

/// Compute where the camera wants to be for this entity pose.
///
/// Collision failures fail open: the camera is left uncorrected and a
/// warning is logged.
#[must_use]
pub fn desired_pose(
    options: &FollowOptions,
    entity: &EntityPose,
    target: FollowTarget,
    collision: &dyn CollisionQuery,
) -> DesiredPose {
    let pivot = entity.position + entity.up() * options.look_height;

    let local = Vec3::from(options.offset)
        + Vec3::new(target.dx, options.vertical_offset, target.dz);
    let mut position = entity.position + entity.orientation * local;

    let mut boom = position - pivot;
    if options.follow_distance > 0.0
        && boom.length() > options.follow_distance
    {
        boom = boom.normalize() * options.follow_distance;
        position = pivot + boom;
    }

    let (min_pitch, max_pitch) = options.pitch_limits();
    let orientation = look_rotation(-boom, min_pitch, max_pitch);

    let mut blocked_at = None;
    if options.collision_enabled && orientation.is_some() {
        // The cast starts at the edge of the entity's own bounds so its
        // collider never blocks the camera.
        let length = boom.length();
        let skip = entity.extent.max_element().clamp(0.0, length);
        let start = pivot + boom * (skip / length);
        match collision.cast_segment(start, position) {
            Ok(Some(hit)) => {
                let margin = options.collision_margin.max(0.0);
                let safe = (skip + hit - margin).clamp(0.0, length);
                position = pivot + boom * (safe / length);
                blocked_at = Some(safe);
            }
            Ok(None) => {}
            Err(e) => {
                log::warn!(
                    "camera collision query failed, following without \
                     correction: {e}"
                );
            }
        }
    }

    DesiredPose {
        pivot,
        position,
        orientation,
        blocked_at,
    }
}

/// Exponentially ease `from` toward `desired`.
///
/// An obstructed segment is never smoothed through: if the eased position
/// would sit farther from the pivot than the safe distance, the safe point
/// is used instead.
fn smooth_toward(
    from: &Pose,
    desired: &DesiredPose,
    smoothing: f32,
    dt: f32,
) -> Pose {
    let w = smoothing_blend(smoothing, dt);

    let mut position = lerp_position(from.position, desired.position, w);
    if let Some(safe) = desired.blocked_at {
        if position.distance(desired.pivot) > safe {
            position = desired.position;
        }
    }

    let orientation = desired.orientation.map_or(from.orientation, |q| {
        slerp_shortest(from.orientation, q, w)
    });

    Pose::new(position, orientation, from.fov)
}
