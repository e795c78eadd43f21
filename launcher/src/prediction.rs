use bevy::{color::palettes, prelude::*};
use trajectory::{TrajectoryConfig, TrajectorySampler};

use crate::scene::{SceneColliders, sync_colliders};

/// Fallback step used to validate the plugin config before the fixed timestep is known.
const DEFAULT_STEP_DURATION: f32 = 1. / 64.;

/// Constant acceleration applied to every predicted projectile.
#[derive(Resource, Clone, Copy, Debug)]
pub struct Gravity(pub Vec3);

impl Default for Gravity {
    fn default() -> Self {
        Gravity(Vec3::new(0., -9.81, 0.))
    }
}

#[derive(Resource, Clone, Copy)]
pub struct TrajectoryPluginConfig {
    /// Radius of the projectile, used for the sphere cast and the impact marker
    pub sphere_radius: f32,
    /// Prediction horizon in seconds
    pub max_duration: f32,
    /// Time between samples, uses the fixed timestep when None
    pub step_duration: Option<f32>,
    /// Gizmo line width in pixels
    pub line_width: f32,
    pub miss_color: Color,
    pub hit_color: Color,
}

impl Default for TrajectoryPluginConfig {
    fn default() -> Self {
        TrajectoryPluginConfig {
            sphere_radius: 0.1,
            max_duration: 3.,
            step_duration: None,
            line_width: 4.,
            miss_color: palettes::css::LIGHT_GRAY.into(),
            hit_color: palettes::css::ORANGE.into(),
        }
    }
}

impl TrajectoryPluginConfig {
    pub fn trajectory_config(&self, acceleration: Vec3, fixed_step: f32) -> TrajectoryConfig {
        TrajectoryConfig {
            acceleration,
            sphere_radius: self.sphere_radius,
            step_duration: self.step_duration.unwrap_or(fixed_step),
            max_duration: self.max_duration,
        }
    }
}

/// Launch point and world space launch velocity. The launch point is the entity's translation.
#[derive(Component, Clone, Copy, Debug)]
pub struct Launcher {
    pub velocity: Vec3,
}

#[derive(Resource)]
pub struct PreviewSampler(pub TrajectorySampler);

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct TrajectoryGizmos;

pub struct TrajectoryPlugin {
    pub config: TrajectoryPluginConfig,
}
impl Plugin for TrajectoryPlugin {
    fn build(&self, app: &mut App) {
        let initial = self
            .config
            .trajectory_config(Gravity::default().0, DEFAULT_STEP_DURATION);
        let sampler = match TrajectorySampler::new(initial) {
            Ok(sampler) => sampler,
            Err(err) => {
                error!("Trajectory preview disabled, invalid configuration: {err}");
                return;
            }
        };
        app.insert_resource(self.config)
            .init_resource::<Gravity>()
            .init_resource::<SceneColliders>()
            .insert_resource(PreviewSampler(sampler))
            .init_gizmo_group::<TrajectoryGizmos>()
            .add_systems(Startup, configure_gizmos)
            .add_systems(
                Update,
                (sync_colliders, tick_preview, draw_preview).chain(),
            );
    }
}

fn configure_gizmos(
    config: Res<TrajectoryPluginConfig>,
    mut config_store: ResMut<GizmoConfigStore>,
) {
    let (gizmo_config, _) = config_store.config_mut::<TrajectoryGizmos>();
    gizmo_config.line.width = config.line_width;
}

fn tick_preview(
    config: Res<TrajectoryPluginConfig>,
    gravity: Res<Gravity>,
    fixed_time: Res<Time<Fixed>>,
    scene: Res<SceneColliders>,
    launchers: Query<(&GlobalTransform, &Launcher)>,
    mut sampler: ResMut<PreviewSampler>,
    mut was_hit: Local<Option<bool>>,
) {
    let Ok((transform, launcher)) = launchers.single() else {
        sampler.0.clear();
        *was_hit = None;
        return;
    };
    let trajectory_config =
        config.trajectory_config(gravity.0, fixed_time.timestep().as_secs_f32());
    if let Err(err) = sampler.0.set_config(trajectory_config) {
        warn_once!("Skipping trajectory preview: {err}");
        sampler.0.clear();
        *was_hit = None;
        return;
    }

    let prediction = sampler
        .0
        .tick(transform.translation(), launcher.velocity, &scene.0);
    if *was_hit == Some(prediction.hit) {
        return;
    }
    *was_hit = Some(prediction.hit);
    match prediction.impact() {
        Some(impact) => debug!(
            "Predicted impact at {impact} after {} samples",
            prediction.points.len()
        ),
        None => debug!(
            "No impact within {}s horizon",
            trajectory_config.max_duration
        ),
    }
}

fn draw_preview(
    mut gizmos: Gizmos<TrajectoryGizmos>,
    config: Res<TrajectoryPluginConfig>,
    sampler: Res<PreviewSampler>,
) {
    let prediction = sampler.0.prediction();
    let color = if prediction.hit {
        config.hit_color
    } else {
        config.miss_color
    };
    gizmos.linestrip(prediction.points.iter().copied(), color);
    if let Some(impact) = prediction.impact() {
        gizmos.sphere(
            Isometry3d::from_translation(impact),
            config.sphere_radius,
            color,
        );
    }
}
