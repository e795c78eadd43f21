use glam::Vec3;

use crate::oracle::SweepHit;

/// Directions with a component smaller than this are treated as parallel to a cuboid slab.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Static scene geometry the built-in oracle can sweep against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Collider {
    /// Points `x` with `normal.dot(x) == offset`, solid on the side opposite the normal.
    Plane { normal: Vec3, offset: f32 },
    Sphere { center: Vec3, radius: f32 },
    /// Axis aligned box
    Cuboid { min: Vec3, max: Vec3 },
}

impl Collider {
    /// Plane through `point` facing `normal`. `normal` does not need to be unit length.
    pub fn plane(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize();
        Collider::Plane {
            normal,
            offset: normal.dot(point),
        }
    }

    pub fn cuboid(center: Vec3, half_extents: Vec3) -> Self {
        let half_extents = half_extents.abs();
        Collider::Cuboid {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Moves a collider given in local space into world space, with a uniform `scale` applied
    /// before `translation`.
    pub fn transformed(&self, translation: Vec3, scale: f32) -> Self {
        match *self {
            Collider::Plane { normal, offset } => Collider::Plane {
                normal,
                offset: offset * scale + normal.dot(translation),
            },
            Collider::Sphere { center, radius } => Collider::Sphere {
                center: center * scale + translation,
                radius: radius * scale.abs(),
            },
            Collider::Cuboid { min, max } => {
                let a = min * scale + translation;
                let b = max * scale + translation;
                Collider::Cuboid {
                    min: a.min(b),
                    max: a.max(b),
                }
            }
        }
    }

    /// Sweeps a sphere of `radius` from `origin` along unit `direction` for at most `length`.
    /// A sphere that already overlaps the collider at `origin` does not hit it.
    pub fn sweep_sphere(
        &self,
        origin: Vec3,
        direction: Vec3,
        length: f32,
        radius: f32,
    ) -> Option<SweepHit> {
        let hit = match *self {
            Collider::Plane { normal, offset } => {
                sweep_against_plane(normal, offset, origin, direction, radius)
            }
            Collider::Sphere {
                center,
                radius: sphere_radius,
            } => sweep_against_sphere(center, sphere_radius, origin, direction, radius),
            Collider::Cuboid { min, max } => {
                sweep_against_cuboid(min, max, origin, direction, radius)
            }
        }?;
        (hit.distance <= length).then_some(hit)
    }
}

fn sweep_against_plane(
    normal: Vec3,
    offset: f32,
    origin: Vec3,
    direction: Vec3,
    radius: f32,
) -> Option<SweepHit> {
    let start_distance = normal.dot(origin) - offset;
    if start_distance < radius {
        return None;
    }
    let approach = normal.dot(direction);
    if approach >= 0.0 {
        return None;
    }
    let distance = (start_distance - radius) / -approach;
    let center = origin + direction * distance;
    Some(SweepHit {
        point: center - normal * radius,
        normal,
        distance,
    })
}

fn sweep_against_sphere(
    center: Vec3,
    sphere_radius: f32,
    origin: Vec3,
    direction: Vec3,
    radius: f32,
) -> Option<SweepHit> {
    // Ray against the sphere grown by the cast radius
    let combined = sphere_radius + radius;
    let offset = origin - center;
    let c = offset.length_squared() - combined * combined;
    if c < 0.0 {
        return None;
    }
    let b = offset.dot(direction);
    if b >= 0.0 {
        return None;
    }
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let distance = -b - discriminant.sqrt();
    let cast_center = origin + direction * distance;
    let normal = (cast_center - center).normalize_or_zero();
    Some(SweepHit {
        point: center + normal * sphere_radius,
        normal,
        distance: distance.max(0.0),
    })
}

fn sweep_against_cuboid(
    min: Vec3,
    max: Vec3,
    origin: Vec3,
    direction: Vec3,
    radius: f32,
) -> Option<SweepHit> {
    let closest = origin.clamp(min, max);
    if closest == origin || origin.distance_squared(closest) < radius * radius {
        return None;
    }

    // Slab test against the box grown by the cast radius
    let grown_min = min - Vec3::splat(radius);
    let grown_max = max + Vec3::splat(radius);
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut face_normal = Vec3::ZERO;
    for axis in 0..3 {
        let d = direction[axis];
        let o = origin[axis];
        if d.abs() < PARALLEL_EPSILON {
            if o < grown_min[axis] || o > grown_max[axis] {
                return None;
            }
            continue;
        }
        let mut t0 = (grown_min[axis] - o) / d;
        let mut t1 = (grown_max[axis] - o) / d;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > t_enter {
            t_enter = t0;
            face_normal = Vec3::ZERO;
            face_normal[axis] = -d.signum();
        }
        t_exit = t_exit.min(t1);
    }
    if t_exit < t_enter || t_exit < 0.0 {
        return None;
    }

    // A start inside the grown box but outside the cast radius lies in an edge or corner
    // region. It only counts as touching when the sphere moves toward the box.
    if t_enter < 0.0 && direction.dot(origin - closest) >= 0.0 {
        return None;
    }
    let distance = t_enter.max(0.0);
    let cast_center = origin + direction * distance;
    let point = cast_center.clamp(min, max);
    let normal = (cast_center - point).normalize_or_zero();
    Some(SweepHit {
        point,
        normal: if normal == Vec3::ZERO { face_normal } else { normal },
        distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn plane_contact_keeps_cast_radius_clearance() {
        let ground = Collider::plane(Vec3::Y, Vec3::ZERO);
        let hit = ground
            .sweep_sphere(Vec3::new(0., 5., 0.), Vec3::NEG_Y, 10., 0.5)
            .unwrap();
        assert!((hit.distance - 4.5).abs() < EPS);
        assert!(hit.point.abs_diff_eq(Vec3::ZERO, EPS));
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn plane_is_missed_when_moving_away_or_too_short() {
        let ground = Collider::plane(Vec3::Y, Vec3::ZERO);
        let origin = Vec3::new(0., 5., 0.);
        assert!(ground.sweep_sphere(origin, Vec3::Y, 10., 0.).is_none());
        assert!(ground.sweep_sphere(origin, Vec3::X, 10., 0.).is_none());
        assert!(ground.sweep_sphere(origin, Vec3::NEG_Y, 4., 0.).is_none());
    }

    #[test]
    fn plane_overlapping_at_start_is_ignored() {
        let ground = Collider::plane(Vec3::Y, Vec3::ZERO);
        assert!(
            ground
                .sweep_sphere(Vec3::new(0., 0.2, 0.), Vec3::NEG_Y, 10., 0.5)
                .is_none()
        );
        assert!(
            ground
                .sweep_sphere(Vec3::new(0., -1., 0.), Vec3::NEG_Y, 10., 0.)
                .is_none()
        );
    }

    #[test]
    fn oblique_plane_contact() {
        let ground = Collider::plane(Vec3::Y, Vec3::ZERO);
        let direction = Vec3::new(1., -1., 0.).normalize();
        let hit = ground
            .sweep_sphere(Vec3::new(0., 2., 0.), direction, 10., 0.)
            .unwrap();
        assert!((hit.distance - 2. * std::f32::consts::SQRT_2).abs() < EPS);
        assert!(hit.point.abs_diff_eq(Vec3::new(2., 0., 0.), EPS));
    }

    #[test]
    fn sphere_head_on_contact() {
        let ball = Collider::Sphere {
            center: Vec3::new(10., 0., 0.),
            radius: 2.,
        };
        let hit = ball.sweep_sphere(Vec3::ZERO, Vec3::X, 20., 1.).unwrap();
        assert!((hit.distance - 7.).abs() < EPS);
        assert!(hit.normal.abs_diff_eq(Vec3::NEG_X, EPS));
        assert!(hit.point.abs_diff_eq(Vec3::new(8., 0., 0.), EPS));
    }

    #[test]
    fn sphere_miss_cases() {
        let ball = Collider::Sphere {
            center: Vec3::new(10., 0., 0.),
            radius: 2.,
        };
        // Passes beside
        assert!(
            ball.sweep_sphere(Vec3::new(0., 5., 0.), Vec3::X, 20., 1.)
                .is_none()
        );
        // Moving away
        assert!(ball.sweep_sphere(Vec3::ZERO, Vec3::NEG_X, 20., 1.).is_none());
        // Too short
        assert!(ball.sweep_sphere(Vec3::ZERO, Vec3::X, 6., 1.).is_none());
        // Starts overlapping
        assert!(
            ball.sweep_sphere(Vec3::new(8.5, 0., 0.), Vec3::X, 20., 1.)
                .is_none()
        );
    }

    #[test]
    fn cuboid_face_contact() {
        let wall = Collider::cuboid(Vec3::new(5., 0., 0.), Vec3::new(1., 3., 3.));
        let hit = wall.sweep_sphere(Vec3::ZERO, Vec3::X, 10., 0.5).unwrap();
        assert!((hit.distance - 3.5).abs() < EPS);
        assert!(hit.point.abs_diff_eq(Vec3::new(4., 0., 0.), EPS));
        assert!(hit.normal.abs_diff_eq(Vec3::NEG_X, EPS));
    }

    #[test]
    fn cuboid_zero_radius_uses_face_normal() {
        let wall = Collider::cuboid(Vec3::new(5., 0., 0.), Vec3::ONE);
        let hit = wall.sweep_sphere(Vec3::ZERO, Vec3::X, 10., 0.).unwrap();
        assert!((hit.distance - 4.).abs() < EPS);
        assert_eq!(hit.normal, Vec3::NEG_X);
    }

    #[test]
    fn cuboid_miss_cases() {
        let wall = Collider::cuboid(Vec3::new(5., 0., 0.), Vec3::ONE);
        assert!(
            wall.sweep_sphere(Vec3::new(0., 3., 0.), Vec3::X, 10., 0.5)
                .is_none()
        );
        assert!(wall.sweep_sphere(Vec3::ZERO, Vec3::NEG_X, 10., 0.5).is_none());
        assert!(wall.sweep_sphere(Vec3::ZERO, Vec3::X, 3., 0.5).is_none());
        // Starts inside
        assert!(
            wall.sweep_sphere(Vec3::new(5., 0., 0.), Vec3::X, 10., 0.)
                .is_none()
        );
    }

    #[test]
    fn cuboid_corner_region_only_hits_when_approaching() {
        let cube = Collider::cuboid(Vec3::ZERO, Vec3::ONE);
        // Within the grown box but farther than the radius from the corner
        let origin = Vec3::splat(1.4);
        assert!(cube.sweep_sphere(origin, Vec3::X, 1., 0.5).is_none());
        assert!(
            cube.sweep_sphere(origin, Vec3::ONE.normalize(), 1., 0.5)
                .is_none()
        );

        let hit = cube
            .sweep_sphere(origin, Vec3::NEG_ONE.normalize(), 1., 0.5)
            .unwrap();
        assert_eq!(hit.distance, 0.);
        assert!(hit.point.abs_diff_eq(Vec3::ONE, 1e-6));
        assert!(hit.normal.dot(Vec3::ONE) > 0.);
    }

    #[test]
    fn transformed_moves_into_world_space() {
        let local = Collider::Sphere {
            center: Vec3::ZERO,
            radius: 1.,
        };
        assert_eq!(
            local.transformed(Vec3::new(1., 2., 3.), 2.),
            Collider::Sphere {
                center: Vec3::new(1., 2., 3.),
                radius: 2.,
            }
        );
        let ground = Collider::plane(Vec3::Y, Vec3::ZERO).transformed(Vec3::new(4., 1., 0.), 1.);
        assert_eq!(
            ground,
            Collider::Plane {
                normal: Vec3::Y,
                offset: 1.,
            }
        );
        let cube = Collider::cuboid(Vec3::ZERO, Vec3::ONE).transformed(Vec3::X, 2.);
        assert_eq!(
            cube,
            Collider::Cuboid {
                min: Vec3::new(-1., -2., -2.),
                max: Vec3::new(3., 2., 2.),
            }
        );
    }
}
