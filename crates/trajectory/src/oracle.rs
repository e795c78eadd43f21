use glam::Vec3;

/// First contact of a swept sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepHit {
    /// Contact point on the surface that was hit
    pub point: Vec3,
    /// Unit surface normal at the contact point
    pub normal: Vec3,
    /// Distance travelled along the cast direction before contact
    pub distance: f32,
}

/// Answers swept-sphere queries against scene geometry.
pub trait CollisionOracle {
    /// Sweeps a sphere of `radius` from `origin` along unit `direction` for `length`.
    /// Returns the first contact, if any.
    fn sweep_sphere(
        &self,
        origin: Vec3,
        direction: Vec3,
        length: f32,
        radius: f32,
    ) -> Option<SweepHit>;
}

impl<F> CollisionOracle for F
where
    F: Fn(Vec3, Vec3, f32, f32) -> Option<SweepHit>,
{
    #[inline]
    fn sweep_sphere(
        &self,
        origin: Vec3,
        direction: Vec3,
        length: f32,
        radius: f32,
    ) -> Option<SweepHit> {
        self(origin, direction, length, radius)
    }
}

/// Oracle for empty space, nothing is ever hit.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCollision;

impl CollisionOracle for NoCollision {
    #[inline]
    fn sweep_sphere(&self, _: Vec3, _: Vec3, _: f32, _: f32) -> Option<SweepHit> {
        None
    }
}
