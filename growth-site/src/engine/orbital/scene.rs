use bevy::prelude::*;
use bevy::render::camera::{ClearColorConfig, Viewport};
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::view::RenderLayers;
use bevy::window::PrimaryWindow;

use constants::orbital::{
    ACTIVE_EMISSIVE_INTENSITY, ACTIVE_HALO_OPACITY, BENEFITS, Benefit, CONNECTION_LINE_OPACITY,
    CORE_RADIUS, ECOSYSTEM_AMBIENT_BRIGHTNESS, FILL_LIGHT_INTENSITY, FILL_LIGHT_POSITION,
    HALO_INNER_RADIUS, HALO_OUTER_RADIUS, IDLE_EMISSIVE_INTENSITY, IDLE_HALO_OPACITY,
    KEY_LIGHT_INTENSITY, KEY_LIGHT_OUTER_ANGLE, KEY_LIGHT_POSITION, RIM_LIGHT_INTENSITY,
    RIM_LIGHT_OUTER_ANGLE, RIM_LIGHT_POSITION, RIM_LIGHT_RANGE, SUN_RADIUS,
};
use constants::palette::{ACCENT, ECOSYSTEM_BACKGROUND};
use constants::render_settings::{
    ECOSYSTEM_CAMERA_DISTANCE, ECOSYSTEM_CAMERA_FOV_DEGREES, ECOSYSTEM_RENDER_LAYER,
    ECOSYSTEM_VIEWPORT_WIDTH_FRACTION,
};

use super::labels::spawn_node_labels;
use super::selection::NodeHoverEvent;

/// Group entity of one benefit node. Bobbing moves this transform.
#[derive(Component, Debug, Clone, Copy)]
pub struct BenefitNode {
    pub id: u32,
    pub rest: Vec3,
}

/// The hoverable dot of a node.
#[derive(Component, Debug, Clone, Copy)]
pub struct NodeCore(pub u32);

#[derive(Component, Debug, Clone, Copy)]
pub struct NodeHalo(pub u32);

/// Line from the node back through the scene centre, shown only while active.
#[derive(Component, Debug, Clone, Copy)]
pub struct ConnectionLine(pub u32);

#[derive(Component)]
pub struct FerrofluidSun;

#[derive(Component)]
pub struct EcosystemCamera;

/// Shared idle/active materials. Highlighting swaps handles instead of mutating assets.
#[derive(Resource, Clone)]
pub struct NodeMaterials {
    pub core_idle: Handle<StandardMaterial>,
    pub core_active: Handle<StandardMaterial>,
    pub halo_idle: Handle<StandardMaterial>,
    pub halo_active: Handle<StandardMaterial>,
}

impl NodeMaterials {
    fn create(materials: &mut Assets<StandardMaterial>) -> Self {
        let core = |color: Color, intensity: f32| StandardMaterial {
            base_color: color,
            emissive: color.to_linear() * intensity,
            unlit: false,
            ..default()
        };
        let halo = |color: Color, opacity: f32| StandardMaterial {
            base_color: color.with_alpha(opacity),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            double_sided: true,
            cull_mode: None,
            ..default()
        };

        Self {
            core_idle: materials.add(core(Color::WHITE, IDLE_EMISSIVE_INTENSITY)),
            core_active: materials.add(core(ACCENT, ACTIVE_EMISSIVE_INTENSITY)),
            halo_idle: materials.add(halo(Color::WHITE, IDLE_HALO_OPACITY)),
            halo_active: materials.add(halo(ACCENT, ACTIVE_HALO_OPACITY)),
        }
    }
}

pub fn spawn_orbital_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let layer = RenderLayers::layer(ECOSYSTEM_RENDER_LAYER);
    let node_materials = NodeMaterials::create(&mut materials);

    let camera = commands
        .spawn((
            Name::new("EcosystemCamera"),
            EcosystemCamera,
            Camera3d::default(),
            Camera {
                order: 1,
                clear_color: ClearColorConfig::Custom(ECOSYSTEM_BACKGROUND),
                ..default()
            },
            Projection::Perspective(PerspectiveProjection {
                fov: ECOSYSTEM_CAMERA_FOV_DEGREES.to_radians(),
                ..default()
            }),
            Transform::from_xyz(0.0, 0.0, ECOSYSTEM_CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
            layer.clone(),
        ))
        .id();

    // Only the orbital scene uses PBR materials; the hero grid shades itself.
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: ECOSYSTEM_AMBIENT_BRIGHTNESS,
        ..default()
    });

    spawn_lights(&mut commands, &layer);

    commands.spawn((
        Name::new("FerrofluidSun"),
        FerrofluidSun,
        Mesh3d(meshes.add(Sphere::new(SUN_RADIUS).mesh().uv(128, 64))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::BLACK,
            metallic: 0.9,
            perceptual_roughness: 0.2,
            clearcoat: 1.0,
            clearcoat_perceptual_roughness: 0.1,
            ..default()
        })),
        Transform::IDENTITY,
        Pickable::IGNORE,
        layer.clone(),
    ));

    let core_mesh = meshes.add(Sphere::new(CORE_RADIUS).mesh().uv(32, 16));
    let halo_mesh = meshes.add(Annulus::new(HALO_INNER_RADIUS, HALO_OUTER_RADIUS).mesh().resolution(32));
    let line_material = materials.add(StandardMaterial {
        base_color: ACCENT.with_alpha(CONNECTION_LINE_OPACITY),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    for benefit in BENEFITS {
        spawn_benefit_node(
            &mut commands,
            benefit,
            &node_materials,
            core_mesh.clone(),
            halo_mesh.clone(),
            meshes.add(connection_line_mesh(Vec3::from_array(benefit.rest_position))),
            line_material.clone(),
            &layer,
        );
    }

    spawn_node_labels(&mut commands, camera);
    commands.insert_resource(node_materials);

    info!("Orbital scene spawned with {} benefit nodes", BENEFITS.len());
}

#[allow(clippy::too_many_arguments)]
fn spawn_benefit_node(
    commands: &mut Commands,
    benefit: &Benefit,
    materials: &NodeMaterials,
    core_mesh: Handle<Mesh>,
    halo_mesh: Handle<Mesh>,
    line_mesh: Handle<Mesh>,
    line_material: Handle<StandardMaterial>,
    layer: &RenderLayers,
) {
    let id = benefit.id;
    let rest = Vec3::from_array(benefit.rest_position);

    commands
        .spawn((
            Name::new(format!("BenefitNode{id}")),
            BenefitNode { id, rest },
            Transform::from_translation(rest),
            Visibility::Visible,
        ))
        .with_children(|node| {
            node.spawn((
                NodeCore(id),
                Mesh3d(core_mesh),
                MeshMaterial3d(materials.core_idle.clone()),
                Transform::IDENTITY,
                layer.clone(),
            ))
            .observe(
                move |_: Trigger<Pointer<Over>>, mut hover: EventWriter<NodeHoverEvent>| {
                    hover.write(NodeHoverEvent::enter(id));
                },
            )
            .observe(
                move |_: Trigger<Pointer<Out>>, mut hover: EventWriter<NodeHoverEvent>| {
                    hover.write(NodeHoverEvent::leave(id));
                },
            );

            node.spawn((
                NodeHalo(id),
                Mesh3d(halo_mesh),
                MeshMaterial3d(materials.halo_idle.clone()),
                Transform::IDENTITY,
                Pickable::IGNORE,
                layer.clone(),
            ));

            node.spawn((
                ConnectionLine(id),
                Mesh3d(line_mesh),
                MeshMaterial3d(line_material),
                Transform::IDENTITY,
                Visibility::Hidden,
                Pickable::IGNORE,
                layer.clone(),
            ));
        });
}

/// Two-point line list from the node origin to the mirrored rest position, in node space.
pub fn connection_line_mesh(rest: Vec3) -> Mesh {
    let end = -rest;
    Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, vec![[0.0, 0.0, 0.0], end.to_array()])
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, vec![[0.0, 0.0, 1.0]; 2])
        .with_inserted_indices(Indices::U32(vec![0, 1]))
}

fn spawn_lights(commands: &mut Commands, layer: &RenderLayers) {
    commands.spawn((
        Name::new("EcosystemKeyLight"),
        SpotLight {
            color: Color::WHITE,
            intensity: KEY_LIGHT_INTENSITY,
            outer_angle: KEY_LIGHT_OUTER_ANGLE,
            inner_angle: 0.0,
            range: 40.0,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(KEY_LIGHT_POSITION))
            .looking_at(Vec3::ZERO, Vec3::Y),
        layer.clone(),
    ));

    commands.spawn((
        Name::new("EcosystemRimLight"),
        SpotLight {
            color: ACCENT,
            intensity: RIM_LIGHT_INTENSITY,
            outer_angle: RIM_LIGHT_OUTER_ANGLE,
            inner_angle: 0.0,
            range: RIM_LIGHT_RANGE,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(RIM_LIGHT_POSITION))
            .looking_at(Vec3::ZERO, Vec3::Y),
        layer.clone(),
    ));

    commands.spawn((
        Name::new("EcosystemFillLight"),
        PointLight {
            color: ACCENT,
            intensity: FILL_LIGHT_INTENSITY,
            range: 30.0,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(FILL_LIGHT_POSITION)),
        layer.clone(),
    ));
}

/// Pixel rectangle of the ecosystem panel: the right-hand fraction of the window.
pub fn ecosystem_viewport(window_size: UVec2) -> Option<(UVec2, UVec2)> {
    let width = (window_size.x as f32 * ECOSYSTEM_VIEWPORT_WIDTH_FRACTION).round() as u32;
    if width == 0 || window_size.y == 0 {
        return None;
    }
    Some((
        UVec2::new(window_size.x - width, 0),
        UVec2::new(width, window_size.y),
    ))
}

pub fn fit_ecosystem_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<&mut Camera, With<EcosystemCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some((position, size)) = ecosystem_viewport(window.physical_size()) else {
        return;
    };

    for mut camera in &mut cameras {
        let unchanged = camera
            .viewport
            .as_ref()
            .is_some_and(|v| v.physical_position == position && v.physical_size == size);
        if unchanged {
            continue;
        }
        camera.viewport = Some(Viewport {
            physical_position: position,
            physical_size: size,
            ..default()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_takes_right_side_of_window() {
        let (position, size) = ecosystem_viewport(UVec2::new(1000, 600)).expect("viewport");
        assert_eq!(size, UVec2::new(420, 600));
        assert_eq!(position, UVec2::new(580, 0));
        assert_eq!(position.x + size.x, 1000);
    }

    #[test]
    fn zero_sized_window_has_no_viewport() {
        assert!(ecosystem_viewport(UVec2::new(0, 600)).is_none());
        assert!(ecosystem_viewport(UVec2::new(800, 0)).is_none());
    }

    #[test]
    fn connection_line_ends_at_mirrored_rest_position() {
        let mesh = connection_line_mesh(Vec3::new(2.8, 1.2, 0.0));
        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|values| values.as_float3())
            .expect("positions");
        assert_eq!(positions, &[[0.0, 0.0, 0.0], [-2.8, -1.2, -0.0]]);
        assert_eq!(mesh.primitive_topology(), PrimitiveTopology::LineList);
    }
}
