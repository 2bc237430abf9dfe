use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use rand::SeedableRng;
use rand::rngs::StdRng;

use constants::grid::{CUBE_SIZE, GRID_COUNT_X, GRID_COUNT_Y};
use constants::palette::{ACCENT, BACKGROUND, CUBE_BASE, DIRECTIONAL_TINT};
use constants::render_settings::{
    FOG_FAR, FOG_NEAR, HERO_AMBIENT_INTENSITY, HERO_CAMERA_DISTANCE, HERO_DIRECTIONAL_DIRECTION,
    HERO_DIRECTIONAL_INTENSITY, POINTER_LIGHT_DECAY, POINTER_LIGHT_DEPTH, POINTER_LIGHT_INTENSITY,
    POINTER_LIGHT_RANGE,
};

use super::layout::CubeGridLayout;
use crate::config::SiteConfig;
use crate::engine::frame_clock::FrameSample;
use crate::engine::render::instanced_render_plugin::{
    CubeGridInstances, CubeGridLighting, CubeInstance,
};

const CUBE_METALNESS: f32 = 0.8;

/// Rest layout of the hero grid, owned by the main world.
#[derive(Resource, Debug, Clone)]
pub struct CubeGrid {
    pub layout: CubeGridLayout,
}

pub fn spawn_cube_grid(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    config: Res<SiteConfig>,
    sample: Res<FrameSample>,
) {
    let seed = config.jitter_seed();
    let mut rng = StdRng::seed_from_u64(seed);
    let layout = CubeGridLayout::new(GRID_COUNT_X, GRID_COUNT_Y, sample.extent, &mut rng);

    info!(
        "Spawning cube grid: {} cells, spacing {:.3}x{:.3}, seed {}",
        layout.len(),
        layout.spacing().x,
        layout.spacing().y,
        seed
    );

    commands.spawn((
        Name::new("HeroCubeGrid"),
        Mesh3d(meshes.add(Cuboid::new(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE))),
        Transform::IDENTITY,
        Visibility::Visible,
        // Instances extend far beyond the single cube's bounds.
        NoFrustumCulling,
        Pickable::IGNORE,
        CubeGridInstances {
            instances: vec![CubeInstance::default(); layout.len()],
            generation: 0,
        },
    ));

    commands.insert_resource(CubeGrid { layout });
}

/// Re-space the grid when the sampled viewport extent changes.
pub fn resize_grid_layout(sample: Res<FrameSample>, grid: Option<ResMut<CubeGrid>>) {
    let Some(mut grid) = grid else {
        return;
    };
    if grid.layout.extent() == sample.extent {
        return;
    }

    grid.layout.resize(sample.extent);
    info!(
        "Cube grid resized to {:.2}x{:.2} world units",
        sample.extent.x, sample.extent.y
    );
}

/// Write all N transforms for this frame, then flag the batch once.
pub fn animate_cube_grid(
    sample: Res<FrameSample>,
    grid: Option<Res<CubeGrid>>,
    mut query: Query<&mut CubeGridInstances>,
) {
    let Some(grid) = grid else {
        return;
    };
    let pointer = sample.pointer_world();

    for mut batch in &mut query {
        let batch_ref = batch.bypass_change_detection();
        if batch_ref.instances.len() != grid.layout.len() {
            batch_ref
                .instances
                .resize(grid.layout.len(), CubeInstance::default());
        }
        grid.layout
            .write_instances(&mut batch_ref.instances, sample.elapsed, pointer);
        batch_ref.generation = batch_ref.generation.wrapping_add(1);
        batch.set_changed();
    }
}

/// Keep the grid shader's lighting uniform in step with the pointer.
pub fn follow_pointer_light(sample: Res<FrameSample>, mut lighting: ResMut<CubeGridLighting>) {
    *lighting = hero_lighting(sample.pointer_world());
}

pub fn hero_lighting(pointer_world: Vec2) -> CubeGridLighting {
    let accent = ACCENT.to_linear().to_f32_array_no_alpha();
    let base = CUBE_BASE.to_linear().to_f32_array_no_alpha();
    let tint = DIRECTIONAL_TINT.to_linear().to_f32_array_no_alpha();
    let fog = BACKGROUND.to_linear().to_f32_array_no_alpha();
    let [dx, dy, dz] = HERO_DIRECTIONAL_DIRECTION;
    let ambient = HERO_AMBIENT_INTENSITY;

    CubeGridLighting {
        pointer_light: [
            pointer_world.x,
            pointer_world.y,
            POINTER_LIGHT_DEPTH,
            POINTER_LIGHT_INTENSITY,
        ],
        pointer_colour: [accent[0], accent[1], accent[2], POINTER_LIGHT_RANGE],
        base_colour: [base[0], base[1], base[2], CUBE_METALNESS],
        directional: [dx, dy, dz, HERO_DIRECTIONAL_INTENSITY],
        directional_colour: [tint[0], tint[1], tint[2], POINTER_LIGHT_DECAY],
        ambient: [ambient, ambient, ambient, 1.0],
        fog: [fog[0], fog[1], fog[2], FOG_NEAR],
        camera: [0.0, 0.0, HERO_CAMERA_DISTANCE, FOG_FAR],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid_app(seed: u64) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<FrameSample>()
            .init_resource::<CubeGridLighting>()
            .insert_resource(SiteConfig {
                jitter_seed: Some(seed),
                ..default()
            })
            .add_systems(Startup, spawn_cube_grid)
            .add_systems(
                Update,
                (resize_grid_layout, animate_cube_grid, follow_pointer_light).chain(),
            );
        app
    }

    fn batch(app: &mut App) -> CubeGridInstances {
        let mut query = app.world_mut().query::<&CubeGridInstances>();
        query
            .single(app.world())
            .expect("one grid entity")
            .clone()
    }

    #[test]
    fn one_generation_per_frame_with_every_slot_written() {
        let mut app = grid_app(11);
        app.update();
        let first = batch(&mut app);
        assert_eq!(first.generation, 1);
        assert_eq!(first.instances.len(), GRID_COUNT_X * GRID_COUNT_Y);
        assert!(first.instances.iter().all(|i| i.translation_scale[3] >= 1.0));

        app.update();
        assert_eq!(batch(&mut app).generation, 2);
    }

    #[test]
    fn same_seed_gives_same_frame() {
        let mut a = grid_app(3);
        let mut b = grid_app(3);
        a.world_mut().resource_mut::<FrameSample>().elapsed = 1.5;
        b.world_mut().resource_mut::<FrameSample>().elapsed = 1.5;
        a.update();
        b.update();
        a.world_mut().resource_mut::<FrameSample>().elapsed = 1.5;
        b.world_mut().resource_mut::<FrameSample>().elapsed = 1.5;
        a.update();
        b.update();
        assert_eq!(batch(&mut a).instances, batch(&mut b).instances);
    }

    #[test]
    fn extent_change_respaces_grid() {
        let mut app = grid_app(5);
        app.update();
        app.world_mut().resource_mut::<FrameSample>().extent = Vec2::new(30.0, 10.0);
        app.update();

        let grid = app.world().resource::<CubeGrid>();
        assert_eq!(grid.layout.extent(), Vec2::new(30.0, 10.0));
        assert_relative_eq!(grid.layout.cells()[0].rest.x, -15.0, epsilon = 1e-4);
    }

    #[test]
    fn pointer_light_tracks_pointer_world() {
        let lighting = hero_lighting(Vec2::new(3.0, -1.0));
        assert_eq!(lighting.pointer_light, [3.0, -1.0, 2.0, 40.0]);
        assert_eq!(lighting.pointer_colour[3], 12.0);
        assert_eq!(lighting.directional_colour[3], 2.0);
        assert_eq!(lighting.fog[3], 8.0);
        assert_eq!(lighting.camera[3], 25.0);
    }
}
