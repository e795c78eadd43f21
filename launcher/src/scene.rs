use std::f32::consts::{FRAC_PI_4, TAU};

use bevy::{color::palettes, prelude::*};
use rand::Rng;
use trajectory::{Collider, Scene};

use crate::{GlobalRng, prediction::Launcher};

/// Collider shape in the entity's local space.
#[derive(Component, Clone, Copy, Debug)]
pub struct SceneCollider(pub Collider);

/// World space colliders, rebuilt every frame from [SceneCollider] entities.
#[derive(Resource, Default)]
pub struct SceneColliders(pub Scene);

/// Slowly turns a launcher around the vertical axis so the preview keeps changing.
#[derive(Component, Clone, Copy)]
pub struct AimSweep {
    pub speed: f32,
    /// Launch angle above the horizon in radians
    pub pitch: f32,
    /// Radians per second
    pub turn_rate: f32,
}

#[derive(Clone, Copy)]
pub struct DemoSceneConfig {
    pub ground_size: f32,
    pub obstacles: usize,
    pub min_obstacle_radius: f32,
    pub max_obstacle_radius: f32,
    /// Obstacles are placed in a ring between these distances from the launcher
    pub obstacle_ring: (f32, f32),
    pub launch_height: f32,
    pub aim: AimSweep,
}

impl Default for DemoSceneConfig {
    fn default() -> Self {
        DemoSceneConfig {
            ground_size: 60.,
            obstacles: 12,
            min_obstacle_radius: 0.5,
            max_obstacle_radius: 1.5,
            obstacle_ring: (5., 14.),
            launch_height: 1.5,
            aim: AimSweep {
                speed: 10.,
                pitch: FRAC_PI_4,
                turn_rate: 0.3,
            },
        }
    }
}

#[derive(Resource, Clone, Copy)]
struct DemoScene(DemoSceneConfig);

pub struct DemoScenePlugin {
    pub config: DemoSceneConfig,
}
impl Plugin for DemoScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(DemoScene(self.config))
            .add_systems(Startup, setup)
            .add_systems(Update, sweep_aim);
    }
}

fn setup(
    config: Res<DemoScene>,
    mut commands: Commands,
    mut rng: ResMut<GlobalRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let config = config.0;

    let ground = Plane3d::default()
        .mesh()
        .size(config.ground_size, config.ground_size);
    commands.spawn((
        Mesh3d(meshes.add(ground)),
        MeshMaterial3d(materials.add(Color::from(palettes::css::DARK_OLIVEGREEN))),
        Transform::IDENTITY,
        SceneCollider(Collider::plane(Vec3::Y, Vec3::ZERO)),
    ));

    let wall_half_extents = Vec3::new(0.5, 2.5, 6.);
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_size(wall_half_extents * 2.))),
        MeshMaterial3d(materials.add(Color::from(palettes::css::SLATE_GRAY))),
        Transform::from_xyz(-config.obstacle_ring.1, wall_half_extents.y, 0.),
        SceneCollider(Collider::cuboid(Vec3::ZERO, wall_half_extents)),
    ));

    let obstacle_material = materials.add(Color::from(palettes::css::STEEL_BLUE));
    let (inner, outer) = config.obstacle_ring;
    for _ in 0..config.obstacles {
        let radius = rng
            .0
            .random_range(config.min_obstacle_radius..=config.max_obstacle_radius);
        let angle = rng.0.random_range(0.0..TAU);
        let distance = rng.0.random_range(inner..outer);
        commands.spawn((
            Mesh3d(meshes.add(Sphere::new(radius))),
            MeshMaterial3d(obstacle_material.clone()),
            Transform::from_xyz(angle.cos() * distance, radius, angle.sin() * distance),
            SceneCollider(Collider::Sphere {
                center: Vec3::ZERO,
                radius,
            }),
        ));
    }

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(0.2))),
        MeshMaterial3d(materials.add(Color::from(palettes::css::ORANGE_RED))),
        Transform::from_xyz(0., config.launch_height, 0.),
        Launcher {
            velocity: launch_velocity(&config.aim, 0.),
        },
        config.aim,
    ));

    info!(
        "Spawned demo scene with {} obstacles around launcher at height {}",
        config.obstacles, config.launch_height
    );
}

fn launch_velocity(aim: &AimSweep, elapsed: f32) -> Vec3 {
    let heading = elapsed * aim.turn_rate;
    let horizontal = aim.speed * aim.pitch.cos();
    Vec3::new(
        heading.cos() * horizontal,
        aim.speed * aim.pitch.sin(),
        heading.sin() * horizontal,
    )
}

fn sweep_aim(time: Res<Time>, mut launchers: Query<(&AimSweep, &mut Launcher)>) {
    for (aim, mut launcher) in &mut launchers {
        launcher.velocity = launch_velocity(aim, time.elapsed_secs());
    }
}

pub fn sync_colliders(
    mut scene: ResMut<SceneColliders>,
    colliders: Query<(&GlobalTransform, &SceneCollider)>,
) {
    scene.0.clear();
    for (transform, collider) in &colliders {
        let (scale, _, translation) = transform.to_scale_rotation_translation();
        scene.0.push(collider.0.transformed(translation, scale.max_element()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn launch_velocity_keeps_speed_and_pitch() {
        let aim = AimSweep {
            speed: 10.,
            pitch: FRAC_PI_4,
            turn_rate: 0.5,
        };
        for elapsed in [0., 1., 2.5, 7.] {
            let velocity = launch_velocity(&aim, elapsed);
            assert!((velocity.length() - 10.).abs() < 1e-4);
            assert!((velocity.y - 10. * FRAC_PI_4.sin()).abs() < 1e-4);
        }
        let start = launch_velocity(&aim, 0.);
        assert!(start.z.abs() < 1e-6);
        assert!(start.x > 0.);
    }

    #[test]
    fn sync_colliders_moves_shapes_into_world_space() {
        let mut world = World::new();
        world.init_resource::<SceneColliders>();
        world.spawn((
            GlobalTransform::from(Transform::from_xyz(3., 1., 0.).with_scale(Vec3::splat(2.))),
            SceneCollider(Collider::Sphere {
                center: Vec3::ZERO,
                radius: 1.,
            }),
        ));
        world.run_system_once(sync_colliders).unwrap();
        world.run_system_once(sync_colliders).unwrap();

        let scene = &world.resource::<SceneColliders>().0;
        assert_eq!(scene.len(), 1);
        assert_eq!(
            scene.colliders[0],
            Collider::Sphere {
                center: Vec3::new(3., 1., 0.),
                radius: 2.,
            }
        );
    }
}
