//! Crate-level error types.

use std::fmt;

use crate::camera::registry::CameraId;
use crate::world::EntityHandle;

/// Errors produced by the cinecam crate.
#[derive(Debug)]
pub enum CameraError {
    /// The followed entity handle is stale or was never issued.
    InvalidReference(EntityHandle),
    /// A call argument was out of range (non-positive duration, negative
    /// delta time, non-finite offset).
    InvalidArgument(String),
    /// Fly-by playback was requested with no path bound to the camera.
    PathNotLoaded,
    /// The world collision service failed to answer a segment query.
    CollisionServiceUnavailable(String),
    /// Keyframes violate the path invariants.
    InvalidPath(String),
    /// No camera is registered under the given id.
    UnknownCamera(CameraId),
    /// Every camera id has been handed out.
    CameraIdsExhausted,
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidReference(handle) => {
                write!(f, "invalid entity reference: {handle}")
            }
            Self::InvalidArgument(msg) => {
                write!(f, "invalid argument: {msg}")
            }
            Self::PathNotLoaded => write!(f, "no fly-by path loaded"),
            Self::CollisionServiceUnavailable(msg) => {
                write!(f, "collision service unavailable: {msg}")
            }
            Self::InvalidPath(msg) => write!(f, "invalid fly-by path: {msg}"),
            Self::UnknownCamera(id) => write!(f, "unknown camera: {id}"),
            Self::CameraIdsExhausted => write!(f, "no camera ids left"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for CameraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CameraError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
