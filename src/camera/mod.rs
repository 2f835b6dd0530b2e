//! Camera control: entity following, fly-by playback and the controller
//! that arbitrates between them.
//!
//! A camera is always in exactly one [`CameraMode`]. The
//! [`CameraController`] owns the committed [`CameraState`] and delegates
//! each tick to the active mode.

/// Mode arbitration and the per-camera entry points.
pub mod controller;
/// Pose, mode and GPU uniform types.
pub mod core;
/// Time-driven playback of a recorded path.
pub mod flyby;
/// Smoothed entity tracking with collision pull-in.
pub mod follow;
/// Validated, time-ordered keyframe sequences.
pub mod path;
/// Multi-camera ownership keyed by id.
pub mod registry;

pub use controller::CameraController;
pub use self::core::{CameraMode, CameraState, CameraUniform, Pose, Projection};
pub use flyby::{FlybyPlayer, PlaybackStatus};
pub use follow::{FollowController, FollowTarget, TickContext};
pub use path::{Keyframe, PathData};
pub use registry::{CameraId, CameraRegistry};
