//! Interfaces to the engine-side collaborators the camera consumes.
//!
//! The camera never owns entities or geometry. It reads entity poses
//! through [`EntitySource`] and asks [`CollisionQuery`] whether the line
//! from the followed entity to the camera is blocked. Small in-memory
//! implementations are provided for tools and tests.

/// World collision segment queries.
pub mod collision;
/// Entity handles and pose lookup.
pub mod entity;

pub use collision::{Collider, ColliderSet, CollisionQuery, NoCollision};
pub use entity::{EntityArena, EntityHandle, EntityPose, EntitySource};
