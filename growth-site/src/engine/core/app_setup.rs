use bevy::asset::AssetMetaCheck;
use bevy::log::LogPlugin;
use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy::render::view::RenderLayers;

use constants::palette::BACKGROUND;
use constants::render_settings::{HERO_CAMERA_DISTANCE, HERO_CAMERA_FOV_DEGREES};

use crate::config::SiteConfig;
use crate::engine::core::window_config::create_window_config;
use crate::engine::frame_clock::{FrameSample, sample_frame};
use crate::engine::grid::CubeGridPlugin;
use crate::engine::orbital::OrbitalScenePlugin;
use crate::engine::render::instanced_render_plugin::{CubeGridRenderPlugin, HeroCamera};
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::shell::ShellPlugin;
use crate::strategy::StrategyPlugin;

const LOG_FILTER: &str = "wgpu=error,naga=warn,growth_site=info";

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(MeshPickingPlugin);

    // Read before any plugin that depends on it
    app.insert_resource(SiteConfig::from_env());

    app.add_plugins(CubeGridRenderPlugin)
        .add_plugins(CubeGridPlugin)
        .add_plugins(OrbitalScenePlugin)
        .add_plugins(StrategyPlugin)
        .add_plugins(WebRpcPlugin)
        .add_plugins(ShellPlugin);

    app.init_resource::<FrameSample>()
        .add_systems(PreUpdate, sample_frame)
        .add_systems(Startup, spawn_hero_camera);

    app
}

// Full-window camera for the grid. Also hosts the shell UI.
fn spawn_hero_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("HeroCamera"),
        Camera3d::default(),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(BACKGROUND),
            ..default()
        },
        Projection::from(PerspectiveProjection {
            fov: HERO_CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, HERO_CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
        RenderLayers::layer(0),
        HeroCamera,
        IsDefaultUiCamera,
    ));
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.into(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
