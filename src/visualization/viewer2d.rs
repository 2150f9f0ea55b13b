use std::collections::VecDeque;

use bevy::prelude::*;
use bevy::app::AppExit;
use bevy::log::LogPlugin;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;

use crate::configuration::config::ScenarioConfig;
use crate::simulation::scenario::Scenario;
use super::style::{mass_color, trail_alpha, visual_radius};

#[derive(Component)]
struct BodyIndex(pub usize);

/// Recent screen positions of one body, oldest first
#[derive(Component)]
struct Trail {
    points: VecDeque<Vec2>,
    color: [f32; 3],
}

/// Per-run viewer settings
#[derive(Resource, Debug, Clone)]
pub struct ViewSettings {
    pub scale: f32,
    pub trail_length: usize,
    pub colors: Vec<Option<[f32; 3]>>, // explicit colors, by body index
}

impl ViewSettings {
    pub fn from_config(cfg: &ScenarioConfig) -> Self {
        Self {
            scale: cfg.view.scale,
            trail_length: cfg.view.trail_length,
            colors: cfg.bodies.iter().map(|b| b.color).collect(),
        }
    }

    /// Configured color of body `i`, falling back to the mass palette
    pub fn color_of(&self, i: usize, m: f64) -> [f32; 3] {
        self.colors.get(i).copied().flatten().unwrap_or_else(|| mass_color(m))
    }
}

/// Set once stepping failed; the app is on its way out
#[derive(Resource, Default)]
struct Halted(bool);

pub fn run_2d(scenario: Scenario, view: ViewSettings) {
    log::info!("run_2d: starting Bevy 2D viewer with {} bodies", scenario.system.len());

    App::new()
        .insert_resource(scenario)
        .insert_resource(view)
        .insert_resource(ClearColor(Color::BLACK))
        .init_resource::<Halted>()
        // env_logger is installed by main
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_systems(Startup, setup_bodies_system)
        .add_systems(Update, (physics_step_system, sync_transforms_system, draw_trails_system).chain())
        .run();
}

fn setup_bodies_system(mut commands: Commands, scenario: Res<Scenario>, view: Res<ViewSettings>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    for (i, body) in scenario.system.bodies.iter().enumerate() {
        let [r, g, b] = view.color_of(i, body.m);
        let x = body.x.x as f32 * view.scale;
        let y = body.x.y as f32 * view.scale;

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(visual_radius(body.m)))),
                material: materials.add(ColorMaterial::from(Color::srgb(r, g, b))),
                // larger bodies drawn on top
                transform: Transform::from_xyz(x, y, (body.m as f32).log10().max(0.0)),
                ..Default::default()
            },
            BodyIndex(i),
            Trail {
                points: VecDeque::with_capacity(view.trail_length),
                color: [r, g, b],
            },
        ));
    }
}

fn physics_step_system(mut scenario: ResMut<Scenario>, mut halted: ResMut<Halted>, mut exit: EventWriter<AppExit>) {
    if halted.0 {
        return;
    }
    if let Err(err) = scenario.step_frame() {
        log::error!("stopping simulation: {err}");
        halted.0 = true;
        exit.send(AppExit::error());
    }
}

fn sync_transforms_system(scenario: Res<Scenario>, view: Res<ViewSettings>, mut query: Query<(&BodyIndex, &mut Transform, &mut Trail)>) {
    for (BodyIndex(i), mut transform, mut trail) in &mut query {
        if let Some(b) = scenario.system.bodies.get(*i) {
            let p = Vec2::new(b.x.x as f32, b.x.y as f32) * view.scale;
            transform.translation.x = p.x;
            transform.translation.y = p.y;

            if view.trail_length == 0 {
                continue;
            }
            trail.points.push_back(p);
            while trail.points.len() > view.trail_length {
                trail.points.pop_front();
            }
        }
    }
}

fn draw_trails_system(mut gizmos: Gizmos, query: Query<&Trail>) {
    for trail in &query {
        let len = trail.points.len();
        if len < 2 {
            continue;
        }
        let [r, g, b] = trail.color;
        gizmos.linestrip_gradient_2d(
            trail.points.iter().enumerate().map(|(i, p)| (*p, Color::srgba(r, g, b, trail_alpha(i, len)))),
        );
    }
}
