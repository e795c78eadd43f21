use crate::{
    debug_ui::{DebugDiagnostics, DebugUIPlugin},
    prediction::{TrajectoryPlugin, TrajectoryPluginConfig},
    scene::{DemoSceneConfig, DemoScenePlugin},
};
use bevy::{diagnostic::FrameTimeDiagnosticsPlugin, prelude::*};
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};
use rand::SeedableRng;

mod debug_ui;
mod prediction;
mod scene;

fn main() {
    let seed = rand::random::<u64>();
    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Trajectory preview".to_string(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            PanOrbitCameraPlugin,
            FrameTimeDiagnosticsPlugin {
                max_history_length: 60,
                smoothing_factor: 0.1,
            },
            DebugUIPlugin {
                diagnostics: DebugDiagnostics::seed(seed),
            },
            DemoScenePlugin {
                config: DemoSceneConfig::default(),
            },
            TrajectoryPlugin {
                config: TrajectoryPluginConfig {
                    sphere_radius: 0.15,
                    max_duration: 4.,
                    step_duration: None,
                    line_width: 3.,
                    ..Default::default()
                },
            },
        ))
        .add_systems(Startup, setup)
        .insert_resource(ClearColor(LinearRgba::new(0.05, 0.05, 0.08, 1.).into()))
        .insert_resource(GlobalRng(rand::rngs::StdRng::seed_from_u64(seed)))
        .run();
}

#[derive(Resource)]
pub struct GlobalRng(pub rand::rngs::StdRng);

fn setup(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 12.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    // camera
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(-12.0, 14.0, 18.0).looking_at(Vec3::ZERO, Vec3::Y),
        PanOrbitCamera {
            focus: Vec3::new(0., 1., 0.),
            radius: Some(28.),
            zoom_lower_limit: 2.,
            zoom_upper_limit: Some(60.),
            allow_upside_down: false,
            ..Default::default()
        },
    ));
}
