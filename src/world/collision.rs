//! World collision queries used to keep the follow camera out of geometry.

use glam::Vec3;

use crate::error::CameraError;

/// Synchronous segment query against world geometry.
///
/// Runs inline on the simulation thread, so implementations must bound
/// their cost (fixed collider budget, fixed-step raycast) and never block.
pub trait CollisionQuery {
    /// Distance from `from` along the segment to the nearest blocking hit,
    /// `Ok(None)` if the segment is clear.
    ///
    /// # Errors
    ///
    /// [`CameraError::CollisionServiceUnavailable`] when the query cannot be
    /// answered.
    fn cast_segment(
        &self,
        from: Vec3,
        to: Vec3,
    ) -> Result<Option<f32>, CameraError>;
}

/// Collision service for worlds with no geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCollision;

impl CollisionQuery for NoCollision {
    fn cast_segment(
        &self,
        _from: Vec3,
        _to: Vec3,
    ) -> Result<Option<f32>, CameraError> {
        Ok(None)
    }
}

/// Primitive blocking shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    /// Solid sphere.
    Sphere {
        /// Sphere center.
        center: Vec3,
        /// Sphere radius.
        radius: f32,
    },
    /// Half-space `normal · p + distance < 0` is solid.
    Plane {
        /// Unit normal pointing out of the solid side.
        normal: Vec3,
        /// Signed distance from origin (`n · p + d = 0`).
        distance: f32,
    },
    /// Axis-aligned box.
    Aabb {
        /// Minimum corner.
        min: Vec3,
        /// Maximum corner.
        max: Vec3,
    },
}

impl Collider {
    /// Horizontal ground plane at height `y`.
    #[must_use]
    pub fn ground(y: f32) -> Self {
        Self::Plane {
            normal: Vec3::Y,
            distance: -y,
        }
    }

    /// Ray parameter of the first entry into the shape, limited to
    /// `[0, max_t]`. `dir` must be normalized.
    fn ray_hit(&self, origin: Vec3, dir: Vec3, max_t: f32) -> Option<f32> {
        let t = match *self {
            Self::Sphere { center, radius } => {
                ray_sphere(origin, dir, center, radius)
            }
            Self::Plane { normal, distance } => {
                ray_plane(origin, dir, normal, distance)
            }
            Self::Aabb { min, max } => ray_aabb(origin, dir, min, max),
        }?;
        (t <= max_t).then_some(t)
    }
}

fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let c = oc.length_squared() - radius * radius;
    if c < 0.0 {
        // Starts inside
        return Some(0.0);
    }
    let b = oc.dot(dir);
    if b > 0.0 {
        return None;
    }
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    Some(-b - disc.sqrt())
}

fn ray_plane(origin: Vec3, dir: Vec3, normal: Vec3, distance: f32) -> Option<f32> {
    let side = normal.dot(origin) + distance;
    if side < 0.0 {
        return Some(0.0);
    }
    let denom = normal.dot(dir);
    if denom >= -1e-6 {
        // Parallel or moving away from the solid side
        return None;
    }
    Some(-side / denom)
}

fn ray_aabb(origin: Vec3, dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = dir.recip();
    let t0 = (min - origin) * inv;
    let t1 = (max - origin) * inv;
    let t_near = t0.min(t1).max_element();
    let t_far = t0.max(t1).min_element();
    if t_near.is_nan() || t_far.is_nan() || t_far < t_near.max(0.0) {
        return None;
    }
    Some(t_near.max(0.0))
}

/// Fixed-budget collection of colliders answering segment queries by a
/// linear scan.
#[derive(Debug, Clone)]
pub struct ColliderSet {
    colliders: Vec<Collider>,
    budget: usize,
}

impl ColliderSet {
    /// Default maximum number of colliders.
    pub const DEFAULT_BUDGET: usize = 256;

    /// Empty set with the default budget.
    #[must_use]
    pub fn new() -> Self {
        Self::with_budget(Self::DEFAULT_BUDGET)
    }

    /// Empty set holding at most `budget` colliders.
    #[must_use]
    pub fn with_budget(budget: usize) -> Self {
        Self {
            colliders: Vec::with_capacity(budget.min(Self::DEFAULT_BUDGET)),
            budget,
        }
    }

    /// Add a collider. Returns `false` once the budget is exhausted.
    pub fn push(&mut self, collider: Collider) -> bool {
        if self.colliders.len() >= self.budget {
            log::warn!(
                "collider budget of {} reached, dropping {collider:?}",
                self.budget
            );
            return false;
        }
        self.colliders.push(collider);
        true
    }

    /// Number of colliders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Remove all colliders.
    pub fn clear(&mut self) {
        self.colliders.clear();
    }
}

impl Default for ColliderSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionQuery for ColliderSet {
    fn cast_segment(
        &self,
        from: Vec3,
        to: Vec3,
    ) -> Result<Option<f32>, CameraError> {
        let delta = to - from;
        let length = delta.length();
        if !length.is_finite() {
            return Err(CameraError::CollisionServiceUnavailable(format!(
                "non-finite segment {from} -> {to}"
            )));
        }
        if length < f32::EPSILON {
            return Ok(None);
        }
        let dir = delta / length;

        Ok(self
            .colliders
            .iter()
            .filter_map(|c| c.ray_hit(from, dir, length))
            .reduce(f32::min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_world_is_clear() {
        let hit = NoCollision
            .cast_segment(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0))
            .unwrap();
        assert_eq!(hit, None);
    }

    #[test]
    fn sphere_blocks_segment() {
        let mut set = ColliderSet::new();
        assert!(set.push(Collider::Sphere {
            center: Vec3::new(0.0, 0.0, 5.0),
            radius: 1.0,
        }));
        let hit = set
            .cast_segment(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0))
            .unwrap()
            .unwrap();
        assert!((hit - 4.0).abs() < 1e-4);
    }

    #[test]
    fn hit_beyond_segment_end_ignored() {
        let mut set = ColliderSet::new();
        assert!(set.push(Collider::Sphere {
            center: Vec3::new(0.0, 0.0, 20.0),
            radius: 1.0,
        }));
        let hit = set
            .cast_segment(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0))
            .unwrap();
        assert_eq!(hit, None);
    }

    #[test]
    fn nearest_of_several_hits() {
        let mut set = ColliderSet::new();
        assert!(set.push(Collider::Aabb {
            min: Vec3::new(-1.0, -1.0, 6.0),
            max: Vec3::new(1.0, 1.0, 7.0),
        }));
        assert!(set.push(Collider::Aabb {
            min: Vec3::new(-1.0, -1.0, 3.0),
            max: Vec3::new(1.0, 1.0, 4.0),
        }));
        let hit = set
            .cast_segment(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0))
            .unwrap()
            .unwrap();
        assert!((hit - 3.0).abs() < 1e-4);
    }

    #[test]
    fn ground_plane_blocks_descending_segment() {
        let mut set = ColliderSet::new();
        assert!(set.push(Collider::ground(0.0)));
        let hit = set
            .cast_segment(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -2.0, 0.0))
            .unwrap()
            .unwrap();
        assert!((hit - 2.0).abs() < 1e-4);

        // Parallel to the ground: clear
        let clear = set
            .cast_segment(Vec3::new(0.0, 2.0, 0.0), Vec3::new(5.0, 2.0, 0.0))
            .unwrap();
        assert_eq!(clear, None);
    }

    #[test]
    fn budget_is_enforced() {
        let mut set = ColliderSet::with_budget(1);
        assert!(set.push(Collider::ground(0.0)));
        assert!(!set.push(Collider::ground(1.0)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn non_finite_segment_reports_unavailable() {
        let set = ColliderSet::new();
        let err = set
            .cast_segment(Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, CameraError::CollisionServiceUnavailable(_)));
    }

    #[test]
    fn segment_leaving_a_surface_is_clear() {
        let mut set = ColliderSet::new();
        assert!(set.push(Collider::ground(0.0)));
        assert!(set.push(Collider::Sphere {
            center: Vec3::new(0.0, -1.0, 0.0),
            radius: 1.0,
        }));
        // Starts exactly on both surfaces and rises away from them
        let hit = set
            .cast_segment(Vec3::ZERO, Vec3::new(0.0, 2.0, 6.0))
            .unwrap();
        assert_eq!(hit, None);

        // Starting beneath the ground is still inside
        let hit = set
            .cast_segment(Vec3::new(0.0, -0.1, 0.0), Vec3::new(0.0, 2.0, 6.0))
            .unwrap();
        assert_eq!(hit, Some(0.0));
    }
}
