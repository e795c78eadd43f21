use bevy::color::palettes;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::prediction::PreviewSampler;

#[derive(Copy, Clone)]
pub struct DebugUIPlugin {
    pub diagnostics: DebugDiagnostics,
}
impl Plugin for DebugUIPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.diagnostics);
        app.add_systems(PreStartup, setup)
            .add_systems(Update, update_fps)
            .add_systems(
                Update,
                update_prediction.run_if(resource_exists::<PreviewSampler>),
            );
    }
}

#[derive(Resource, Copy, Clone)]
pub struct DebugDiagnostics {
    pub seed: u64,
}

impl DebugDiagnostics {
    pub fn seed(seed: u64) -> Self {
        DebugDiagnostics { seed }
    }
}

#[derive(Component)]
struct FpsText;

#[derive(Component)]
struct SeedText;

#[derive(Component)]
struct SampleCountText;

#[derive(Component)]
struct ImpactText;

fn update_fps(
    bevy_diagnostics: Res<DiagnosticsStore>,
    mut fps_text_query: Query<&mut Text, With<FpsText>>,
) {
    if let Some(fps) = bevy_diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
        if let Some(value) = fps.smoothed() {
            if let Ok(mut text) = fps_text_query.single_mut() {
                **text = format!("{value:.0}");
            }
        }
    }
}

fn update_prediction(
    sampler: Res<PreviewSampler>,
    mut texts: ParamSet<(
        Query<&mut Text, With<SampleCountText>>,
        Query<&mut Text, With<ImpactText>>,
    )>,
) {
    let prediction = sampler.0.prediction();
    if let Ok(mut text) = texts.p0().single_mut() {
        **text = prediction.points.len().to_string();
    }
    if let Ok(mut text) = texts.p1().single_mut() {
        **text = match prediction.impact() {
            Some(impact) => format!("{:.1}, {:.1}, {:.1}", impact.x, impact.y, impact.z),
            None => "none".to_string(),
        };
    }
}

/// Label on the left, value on the right. The value text carries `marker`.
fn stat_row(label: &'static str, value: String, marker: impl Component) -> impl Bundle {
    (
        Node {
            width: Val::Percent(100.),
            ..Default::default()
        },
        children![
            (
                Text::new(label),
                TextFont {
                    font_size: 12.0,
                    ..default()
                }
            ),
            (
                Node {
                    margin: UiRect::left(Val::Auto),
                    ..Default::default()
                },
                Text::new(value),
                TextFont {
                    font_size: 12.0,
                    ..Default::default()
                },
                TextColor(palettes::css::GOLD.into()),
                marker
            )
        ],
    )
}

fn setup(mut commands: Commands, diagnostics: Res<DebugDiagnostics>) {
    info!("Scene seed {}", diagnostics.seed);
    commands.spawn((
        Node {
            width: Val::Px(200.),
            height: Val::Auto,
            margin: UiRect::with_left(UiRect::all(Val::Px(10.)), Val::Auto),
            padding: UiRect::all(Val::Px(10.)),
            flex_direction: FlexDirection::Column,
            ..Default::default()
        },
        BackgroundColor(LinearRgba::new(0.01, 0.01, 0.01, 0.8).into()),
        children![
            (
                Node {
                    padding: UiRect::new(Val::Px(0.), Val::Px(0.), Val::Px(5.), Val::Px(5.)),
                    border: UiRect::bottom(Val::Px(1.)),
                    flex_direction: FlexDirection::Column,
                    ..Default::default()
                },
                BorderColor(LinearRgba::new(0.2, 0.2, 0.2, 0.8).into()),
                children![
                    stat_row("FPS: ", String::new(), FpsText),
                    stat_row("Seed: ", diagnostics.seed.to_string(), SeedText),
                ]
            ),
            (
                Node {
                    padding: UiRect::new(Val::Px(0.), Val::Px(0.), Val::Px(5.), Val::Px(5.)),
                    flex_direction: FlexDirection::Column,
                    ..Default::default()
                },
                children![
                    (
                        Node {
                            width: Val::Percent(100.),
                            display: Display::Flex,
                            align_items: AlignItems::Center,
                            justify_content: JustifyContent::Center,
                            ..Default::default()
                        },
                        children![(
                            Text::new("Trajectory"),
                            TextFont {
                                font_size: 14.0,
                                ..default()
                            }
                        ),]
                    ),
                    stat_row("Samples: ", String::new(), SampleCountText),
                    stat_row("Impact: ", String::new(), ImpactText),
                ]
            ),
        ],
    ));
}
