use glam::Vec3;
use rayon::prelude::*;

use crate::{
    collider::Collider,
    oracle::{CollisionOracle, SweepHit},
};

/// Scenes with at least this many colliders are searched in parallel.
pub const PARALLEL_THRESHOLD: usize = 64;

/// Set of static colliders answering sweep queries with the nearest hit.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub colliders: Vec<Collider>,
}

impl Scene {
    pub fn new() -> Self {
        Scene {
            colliders: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Scene {
            colliders: Vec::with_capacity(capacity),
        }
    }

    /// Removes every collider but keeps the allocation, so the scene can be rebuilt each frame.
    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    pub fn push(&mut self, collider: Collider) {
        self.colliders.push(collider);
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    fn nearest_sequential(
        &self,
        origin: Vec3,
        direction: Vec3,
        length: f32,
        radius: f32,
    ) -> Option<SweepHit> {
        self.colliders
            .iter()
            .filter_map(|collider| collider.sweep_sphere(origin, direction, length, radius))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn nearest_parallel(
        &self,
        origin: Vec3,
        direction: Vec3,
        length: f32,
        radius: f32,
    ) -> Option<SweepHit> {
        self.colliders
            .par_iter()
            .filter_map(|collider| collider.sweep_sphere(origin, direction, length, radius))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

impl FromIterator<Collider> for Scene {
    fn from_iter<I: IntoIterator<Item = Collider>>(iter: I) -> Self {
        Scene {
            colliders: iter.into_iter().collect(),
        }
    }
}

impl CollisionOracle for Scene {
    fn sweep_sphere(
        &self,
        origin: Vec3,
        direction: Vec3,
        length: f32,
        radius: f32,
    ) -> Option<SweepHit> {
        if self.colliders.len() >= PARALLEL_THRESHOLD {
            self.nearest_parallel(origin, direction, length, radius)
        } else {
            self.nearest_sequential(origin, direction, length, radius)
        }
    }
}
