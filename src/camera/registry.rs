use std::fmt;

use rustc_hash::FxHashMap;

use super::controller::CameraController;
use crate::error::CameraError;
use crate::options::Options;

/// Opaque identifier for a registered camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CameraId(pub u32);

impl fmt::Display for CameraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "camera #{}", self.0)
    }
}

/// Owns every camera in the engine, keyed by [`CameraId`].
///
/// Ids are never reused, so a removed id stays unknown.
#[derive(Debug, Default)]
pub struct CameraRegistry {
    cameras: FxHashMap<CameraId, CameraController>,
    next_id: u32,
}

impl CameraRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new idle camera and return its id.
    ///
    /// # Errors
    ///
    /// As [`CameraController::new`] and [`CameraRegistry::insert`].
    pub fn create(&mut self, options: Options) -> Result<CameraId, CameraError> {
        self.insert(CameraController::new(options)?)
    }

    /// Register an existing controller and return its id.
    ///
    /// # Errors
    ///
    /// [`CameraError::CameraIdsExhausted`] once every `u32` id has been
    /// issued.
    pub fn insert(
        &mut self,
        camera: CameraController,
    ) -> Result<CameraId, CameraError> {
        let id = CameraId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(CameraError::CameraIdsExhausted)?;
        let _ = self.cameras.insert(id, camera);
        log::debug!("registered {id}");
        Ok(id)
    }

    /// Look up a camera.
    ///
    /// # Errors
    ///
    /// [`CameraError::UnknownCamera`] for an unregistered id.
    pub fn get(&self, id: CameraId) -> Result<&CameraController, CameraError> {
        self.cameras.get(&id).ok_or(CameraError::UnknownCamera(id))
    }

    /// Look up a camera mutably.
    ///
    /// # Errors
    ///
    /// [`CameraError::UnknownCamera`] for an unregistered id.
    pub fn get_mut(
        &mut self,
        id: CameraId,
    ) -> Result<&mut CameraController, CameraError> {
        self.cameras
            .get_mut(&id)
            .ok_or(CameraError::UnknownCamera(id))
    }

    /// Unregister a camera, returning it.
    pub fn remove(&mut self, id: CameraId) -> Option<CameraController> {
        self.cameras.remove(&id)
    }

    /// Advance fly-by playback on every camera.
    ///
    /// # Errors
    ///
    /// The first error from [`CameraController::advance`].
    pub fn advance_all(&mut self, delta_time: f32) -> Result<(), CameraError> {
        for camera in self.cameras.values_mut() {
            camera.advance(delta_time)?;
        }
        Ok(())
    }

    /// Number of registered cameras.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    /// Whether no cameras are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    /// Registered ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<CameraId> {
        let mut ids: Vec<_> = self.cameras.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::{Quat, Vec3};

    use super::*;
    use crate::camera::core::{CameraMode, Pose};
    use crate::camera::path::PathData;

    #[test]
    fn create_get_remove() {
        let mut registry = CameraRegistry::new();
        assert!(registry.is_empty());
        let a = registry.create(Options::default()).unwrap();
        let b = registry.create(Options::default()).unwrap();
        assert_ne!(a, b);
        assert_eq!(registry.ids(), vec![a, b]);

        assert!(registry.get(a).is_ok());
        assert!(registry.remove(a).is_some());
        assert!(matches!(
            registry.get(a),
            Err(CameraError::UnknownCamera(id)) if id == a
        ));
        assert_eq!(registry.len(), 1);

        // Removed ids are not handed out again
        let c = registry.create(Options::default()).unwrap();
        assert_ne!(c, a);
    }

    #[test]
    fn cameras_play_independently() {
        let path = Arc::new(
            PathData::from_poses([
                (0.0, Pose::new(Vec3::ZERO, Quat::IDENTITY, 60.0)),
                (1.0, Pose::new(Vec3::X, Quat::IDENTITY, 60.0)),
            ])
            .unwrap(),
        );
        let mut registry = CameraRegistry::new();
        let playing = registry.create(Options::default()).unwrap();
        let idle = registry.create(Options::default()).unwrap();

        let camera = registry.get_mut(playing).unwrap();
        camera.load_path(path);
        camera.play_flyby(2.0).unwrap();

        registry.advance_all(1.0).unwrap();
        assert_eq!(registry.get(playing).unwrap().mode(), CameraMode::FlyingBy);
        assert_eq!(registry.get(idle).unwrap().mode(), CameraMode::Idle);
        assert!(registry.advance_all(-1.0).is_err());
    }

    #[test]
    fn ids_never_wrap() {
        let mut registry = CameraRegistry::new();
        registry.next_id = u32::MAX - 1;
        let last = registry.create(Options::default()).unwrap();
        assert_eq!(last, CameraId(u32::MAX - 1));

        assert!(matches!(
            registry.create(Options::default()),
            Err(CameraError::CameraIdsExhausted)
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn invalid_options_are_not_registered() {
        let mut registry = CameraRegistry::new();
        let mut options = Options::default();
        options.follow.smoothing_factor = 2.0;
        assert!(registry.create(options).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn id_display() {
        assert_eq!(CameraId(7).to_string(), "camera #7");
    }
}
