//! Non-owning entity references and the pose source the follow camera reads.

use std::fmt;

use glam::{Quat, Vec3};

/// Generation-counted handle to an entity owned by the host engine.
///
/// A handle stays valid until the slot it names is despawned; reusing the
/// slot bumps the generation so old handles are rejected instead of
/// silently resolving to a different entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle {
    /// Slot index in the owning store.
    pub index: u32,
    /// Generation of the slot at the time the handle was issued.
    pub generation: u32,
}

impl EntityHandle {
    /// Build a handle from raw parts.
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity {}v{}", self.index, self.generation)
    }
}

/// World-space pose and bounds of an entity, as reported by its owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityPose {
    /// Entity origin in world space.
    pub position: Vec3,
    /// Entity orientation (local -Z is forward, +Y is up).
    pub orientation: Quat,
    /// Half-extents of the entity's bounding box.
    pub extent: Vec3,
}

impl EntityPose {
    /// Pose at `position` with identity orientation and zero extent.
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            extent: Vec3::ZERO,
        }
    }

    /// Unit up vector of the entity's local frame.
    #[inline]
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }
}

/// Read-only lookup of entity poses.
///
/// Implemented by the host's entity/transform system. Returning `None`
/// means the handle no longer names a live entity.
pub trait EntitySource {
    /// Current pose of `handle`, or `None` if it is stale.
    fn entity_pose(&self, handle: EntityHandle) -> Option<EntityPose>;
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    pose: Option<EntityPose>,
}

/// Minimal generation-counted entity store.
///
/// Useful for tools and tests that have no engine-side entity system;
/// freed slots are recycled with a bumped generation.
#[derive(Debug, Clone, Default)]
pub struct EntityArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl EntityArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity and return its handle.
    pub fn spawn(&mut self, pose: EntityPose) -> EntityHandle {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.pose = Some(pose);
            return EntityHandle::new(index, slot.generation);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            pose: Some(pose),
        });
        EntityHandle::new(index, 0)
    }

    /// Remove an entity. Returns `false` if the handle was already stale.
    pub fn despawn(&mut self, handle: EntityHandle) -> bool {
        match self.slot_mut(handle) {
            Some(slot) => {
                slot.pose = None;
                self.free.push(handle.index);
                true
            }
            None => false,
        }
    }

    /// Overwrite the pose of a live entity. Returns `false` if stale.
    pub fn set_pose(&mut self, handle: EntityHandle, pose: EntityPose) -> bool {
        self.slot_mut(handle).is_some_and(|slot| {
            slot.pose = Some(pose);
            true
        })
    }

    /// Move a live entity, keeping its orientation and extent.
    pub fn set_position(&mut self, handle: EntityHandle, position: Vec3) -> bool {
        self.slot_mut(handle)
            .and_then(|slot| slot.pose.as_mut())
            .is_some_and(|pose| {
                pose.position = position;
                true
            })
    }

    /// Whether `handle` names a live entity.
    #[must_use]
    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.entity_pose(handle).is_some()
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.pose.is_some()).count()
    }

    /// Whether the arena has no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot_mut(&mut self, handle: EntityHandle) -> Option<&mut Slot> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|s| s.generation == handle.generation && s.pose.is_some())
    }
}

impl EntitySource for EntityArena {
    fn entity_pose(&self, handle: EntityHandle) -> Option<EntityPose> {
        self.slots
            .get(handle.index as usize)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.pose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_entity_resolves() {
        let mut arena = EntityArena::new();
        let handle = arena.spawn(EntityPose::at(Vec3::new(1.0, 2.0, 3.0)));
        let pose = arena.entity_pose(handle).unwrap();
        assert_eq!(pose.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn stale_handle_rejected_after_slot_reuse() {
        let mut arena = EntityArena::new();
        let old = arena.spawn(EntityPose::at(Vec3::ZERO));
        assert!(arena.despawn(old));
        assert!(!arena.contains(old));

        // Same slot, new generation
        let new = arena.spawn(EntityPose::at(Vec3::X));
        assert_eq!(new.index, old.index);
        assert_ne!(new.generation, old.generation);
        assert!(arena.entity_pose(old).is_none());
        assert!(arena.entity_pose(new).is_some());
    }

    #[test]
    fn double_despawn_is_rejected() {
        let mut arena = EntityArena::new();
        let handle = arena.spawn(EntityPose::at(Vec3::ZERO));
        assert!(arena.despawn(handle));
        assert!(!arena.despawn(handle));
        assert!(arena.is_empty());
    }

    #[test]
    fn set_position_keeps_orientation() {
        let mut arena = EntityArena::new();
        let rot = Quat::from_rotation_y(1.0);
        let handle = arena.spawn(EntityPose {
            position: Vec3::ZERO,
            orientation: rot,
            extent: Vec3::ONE,
        });
        assert!(arena.set_position(handle, Vec3::new(5.0, 0.0, 0.0)));
        let pose = arena.entity_pose(handle).unwrap();
        assert_eq!(pose.position, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(pose.orientation, rot);
        assert_eq!(pose.extent, Vec3::ONE);
    }
}
