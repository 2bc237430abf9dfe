use bevy::{
    core_pipeline::core_3d::Transparent3d,
    ecs::system::{SystemParamItem, lifetimeless::*},
    pbr::{
        MeshPipeline, MeshPipelineKey, RenderMeshInstances, SetMeshBindGroup, SetMeshViewBindGroup,
    },
    prelude::*,
    render::{
        Render, RenderApp, RenderSet,
        extract_component::{ExtractComponent, ExtractComponentPlugin},
        extract_resource::{ExtractResource, ExtractResourcePlugin},
        mesh::{
            MeshVertexBufferLayoutRef, RenderMesh, RenderMeshBufferInfo, allocator::MeshAllocator,
        },
        render_asset::RenderAssets,
        render_phase::{
            AddRenderCommand, DrawFunctions, PhaseItem, PhaseItemExtraIndex, RenderCommand,
            RenderCommandResult, SetItemPipeline, TrackedRenderPass, ViewSortedRenderPhases,
        },
        render_resource::*,
        renderer::{RenderDevice, RenderQueue},
        sync_world::MainEntity,
        view::ExtractedView,
    },
};
use bytemuck::{Pod, Zeroable};

const CUBE_GRID_SHADER_PATH: &str = "shaders/cube_grid.wgsl";

/// Draws every `CubeGridInstances` entity as one instanced draw call, hero camera only.
pub struct CubeGridRenderPlugin;

impl Plugin for CubeGridRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CubeGridLighting>()
            .add_plugins(ExtractComponentPlugin::<CubeGridInstances>::default())
            .add_plugins(ExtractComponentPlugin::<HeroCamera>::default())
            .add_plugins(ExtractResourcePlugin::<CubeGridLighting>::default());

        let Some(render_app) = app.get_sub_app_mut(RenderApp) else {
            return;
        };

        render_app
            .add_render_command::<Transparent3d, DrawCubeGrid>()
            .init_resource::<SpecializedMeshPipelines<CubeGridPipeline>>()
            .init_resource::<PreparedCubeGridBindGroup>()
            .add_systems(
                Render,
                (
                    prepare_cube_grid_bind_group.in_set(RenderSet::PrepareBindGroups),
                    queue_cube_grid.in_set(RenderSet::QueueMeshes),
                    prepare_instance_buffers.in_set(RenderSet::PrepareResources),
                ),
            );
    }

    fn finish(&self, app: &mut App) {
        let Some(render_app) = app.get_sub_app_mut(RenderApp) else {
            return;
        };
        render_app.init_resource::<CubeGridPipeline>();
    }
}

/// One cube's per-instance vertex data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct CubeInstance {
    pub translation_scale: [f32; 4], // xyz translation, w uniform scale
    pub rotation: [f32; 4],          // Quaternion rotation
}

/// Batched instance buffer for the hero grid.
/// `generation` advances once per frame after all slots are written; the render
/// world uploads only when it differs from the last uploaded generation.
#[derive(Component, Clone, Default, ExtractComponent)]
pub struct CubeGridInstances {
    pub instances: Vec<CubeInstance>,
    pub generation: u64,
}

/// Marks the camera that renders the cube grid.
#[derive(Component, Clone, Copy, Default, ExtractComponent)]
pub struct HeroCamera;

/// Lighting and fog parameters consumed by the grid shader.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, ExtractResource, Pod, Zeroable)]
#[repr(C)]
pub struct CubeGridLighting {
    pub pointer_light: [f32; 4],      // xyz position, w intensity
    pub pointer_colour: [f32; 4],     // rgb, w range
    pub base_colour: [f32; 4],        // rgb, w metalness
    pub directional: [f32; 4],        // xyz direction towards light, w intensity
    pub directional_colour: [f32; 4], // rgb, w pointer light decay exponent
    pub ambient: [f32; 4],            // rgb premultiplied by intensity
    pub fog: [f32; 4],                // rgb, w fog near
    pub camera: [f32; 4],             // xyz position, w fog far
}

#[derive(Component)]
pub struct InstanceBuffer {
    pub buffer: Buffer,
    pub length: usize,
    pub generation: u64,
}

#[derive(Resource)]
struct CubeGridPipeline {
    shader: Handle<Shader>,
    mesh_pipeline: MeshPipeline,
    material_bind_group_layout: BindGroupLayout,
}

impl FromWorld for CubeGridPipeline {
    fn from_world(world: &mut World) -> Self {
        let mesh_pipeline = world.resource::<MeshPipeline>();
        let render_device = world.resource::<RenderDevice>();

        Self {
            shader: world.load_asset(CUBE_GRID_SHADER_PATH),
            mesh_pipeline: mesh_pipeline.clone(),
            material_bind_group_layout: create_cube_grid_bind_group_layout(render_device),
        }
    }
}

impl SpecializedMeshPipeline for CubeGridPipeline {
    type Key = MeshPipelineKey;

    fn specialize(
        &self,
        key: Self::Key,
        layout: &MeshVertexBufferLayoutRef,
    ) -> Result<RenderPipelineDescriptor, SpecializedMeshPipelineError> {
        let mut descriptor = self.mesh_pipeline.specialize(key, layout)?;
        descriptor.label = Some("cube_grid_pipeline".into());
        descriptor.vertex.shader = self.shader.clone();
        descriptor.vertex.buffers.push(VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeInstance>() as u64,
            step_mode: VertexStepMode::Instance,
            attributes: vec![
                // Translation + scale
                VertexAttribute {
                    format: VertexFormat::Float32x4,
                    offset: 0,
                    shader_location: 3,
                },
                // Rotation quaternion
                VertexAttribute {
                    format: VertexFormat::Float32x4,
                    offset: 16,
                    shader_location: 4,
                },
            ],
        });

        if let Some(fragment) = descriptor.fragment.as_mut() {
            fragment.shader = self.shader.clone();
        }

        descriptor
            .layout
            .push(self.material_bind_group_layout.clone());

        Ok(descriptor)
    }
}

/// Lighting uniform and its bind group, created once and reused.
#[derive(Resource, Default)]
struct PreparedCubeGridBindGroup {
    lighting_buffer: Option<Buffer>,
    uploaded: Option<CubeGridLighting>,
    material_bind_group: Option<BindGroup>,
}

impl PreparedCubeGridBindGroup {
    fn is_stale(&self, lighting: &CubeGridLighting) -> bool {
        self.uploaded.as_ref() != Some(lighting)
    }
}

fn prepare_instance_buffers(
    mut commands: Commands,
    mut query: Query<(Entity, &CubeGridInstances, Option<&mut InstanceBuffer>)>,
    render_device: Res<RenderDevice>,
    render_queue: Res<RenderQueue>,
) {
    for (entity, grid, existing) in &mut query {
        match existing {
            Some(buffer) if buffer.generation == grid.generation => {}
            Some(mut buffer) if buffer.length == grid.instances.len() => {
                render_queue.write_buffer(
                    &buffer.buffer,
                    0,
                    bytemuck::cast_slice(grid.instances.as_slice()),
                );
                buffer.generation = grid.generation;
            }
            _ => {
                let buffer = render_device.create_buffer_with_data(&BufferInitDescriptor {
                    label: Some("cube_grid_instance_buffer"),
                    contents: bytemuck::cast_slice(grid.instances.as_slice()),
                    usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
                });
                commands.entity(entity).insert(InstanceBuffer {
                    buffer,
                    length: grid.instances.len(),
                    generation: grid.generation,
                });
            }
        }
    }
}

fn prepare_cube_grid_bind_group(
    mut prepared: ResMut<PreparedCubeGridBindGroup>,
    render_device: Res<RenderDevice>,
    render_queue: Res<RenderQueue>,
    pipeline: Res<CubeGridPipeline>,
    lighting: Res<CubeGridLighting>,
) {
    let prepared = &mut *prepared;
    if !prepared.is_stale(&lighting) {
        return;
    }

    match &prepared.lighting_buffer {
        Some(buffer) => render_queue.write_buffer(buffer, 0, bytemuck::bytes_of(&*lighting)),
        None => {
            let buffer = render_device.create_buffer_with_data(&BufferInitDescriptor {
                label: Some("cube_grid_lighting_uniform"),
                contents: bytemuck::bytes_of(&*lighting),
                usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            });
            prepared.material_bind_group = Some(render_device.create_bind_group(
                "cube_grid_material_bind_group",
                &pipeline.material_bind_group_layout,
                &[BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            ));
            prepared.lighting_buffer = Some(buffer);
        }
    }
    prepared.uploaded = Some(*lighting);
}

fn queue_cube_grid(
    transparent_3d_draw_functions: Res<DrawFunctions<Transparent3d>>,
    cube_grid_pipeline: Res<CubeGridPipeline>,
    mut pipelines: ResMut<SpecializedMeshPipelines<CubeGridPipeline>>,
    pipeline_cache: Res<PipelineCache>,
    meshes: Res<RenderAssets<RenderMesh>>,
    render_mesh_instances: Res<RenderMeshInstances>,
    grid_meshes: Query<(Entity, &MainEntity), With<CubeGridInstances>>,
    mut transparent_render_phases: ResMut<ViewSortedRenderPhases<Transparent3d>>,
    views: Query<(&ExtractedView, &Msaa), With<HeroCamera>>,
) {
    let draw_cube_grid = transparent_3d_draw_functions.read().id::<DrawCubeGrid>();

    for (view, msaa) in &views {
        let Some(transparent_phase) = transparent_render_phases.get_mut(&view.retained_view_entity)
        else {
            continue;
        };

        let msaa_key = MeshPipelineKey::from_msaa_samples(msaa.samples());
        let view_key = msaa_key | MeshPipelineKey::from_hdr(view.hdr);
        let rangefinder = view.rangefinder3d();

        for (entity, main_entity) in &grid_meshes {
            let Some(mesh_instance) = render_mesh_instances.render_mesh_queue_data(*main_entity)
            else {
                continue;
            };
            let Some(mesh) = meshes.get(mesh_instance.mesh_asset_id) else {
                continue;
            };

            let key =
                view_key | MeshPipelineKey::from_primitive_topology(mesh.primitive_topology());
            let pipeline = match pipelines.specialize(
                &pipeline_cache,
                &cube_grid_pipeline,
                key,
                &mesh.layout,
            ) {
                Ok(pipeline) => pipeline,
                Err(err) => {
                    error!("Failed to specialise cube grid pipeline: {err}");
                    continue;
                }
            };

            transparent_phase.add(Transparent3d {
                entity: (entity, *main_entity),
                pipeline,
                draw_function: draw_cube_grid,
                distance: rangefinder.distance_translation(&mesh_instance.translation),
                batch_range: 0..1,
                extra_index: PhaseItemExtraIndex::None,
                indexed: true,
            });
        }
    }
}

type DrawCubeGrid = (
    SetItemPipeline,
    SetMeshViewBindGroup<0>,
    SetMeshBindGroup<1>,
    SetCubeGridMaterialGroup<2>,
    DrawMeshInstancedCubes,
);

struct SetCubeGridMaterialGroup<const I: usize>;

impl<P: PhaseItem, const I: usize> RenderCommand<P> for SetCubeGridMaterialGroup<I> {
    type Param = SRes<PreparedCubeGridBindGroup>;
    type ViewQuery = ();
    type ItemQuery = ();

    #[inline]
    fn render<'w>(
        _item: &P,
        _view: (),
        _entity: Option<()>,
        bind_group: SystemParamItem<'w, '_, Self::Param>,
        pass: &mut TrackedRenderPass<'w>,
    ) -> RenderCommandResult {
        let bind_group = bind_group.into_inner();
        if let Some(material_bind_group) = &bind_group.material_bind_group {
            pass.set_bind_group(I, material_bind_group, &[]);
            RenderCommandResult::Success
        } else {
            RenderCommandResult::Failure("missing cube grid bind group")
        }
    }
}

struct DrawMeshInstancedCubes;

impl<P: PhaseItem> RenderCommand<P> for DrawMeshInstancedCubes {
    type Param = (
        SRes<RenderAssets<RenderMesh>>,
        SRes<RenderMeshInstances>,
        SRes<MeshAllocator>,
    );
    type ViewQuery = ();
    type ItemQuery = Read<InstanceBuffer>;

    #[inline]
    fn render<'w>(
        item: &P,
        _view: (),
        instance_buffer: Option<&'w InstanceBuffer>,
        (meshes, render_mesh_instances, mesh_allocator): SystemParamItem<'w, '_, Self::Param>,
        pass: &mut TrackedRenderPass<'w>,
    ) -> RenderCommandResult {
        let mesh_allocator = mesh_allocator.into_inner();

        let Some(mesh_instance) = render_mesh_instances.render_mesh_queue_data(item.main_entity())
        else {
            return RenderCommandResult::Skip;
        };
        let Some(gpu_mesh) = meshes.into_inner().get(mesh_instance.mesh_asset_id) else {
            return RenderCommandResult::Skip;
        };
        let Some(instance_buffer) = instance_buffer else {
            return RenderCommandResult::Skip;
        };
        let Some(vertex_buffer_slice) =
            mesh_allocator.mesh_vertex_slice(&mesh_instance.mesh_asset_id)
        else {
            return RenderCommandResult::Skip;
        };

        pass.set_vertex_buffer(0, vertex_buffer_slice.buffer.slice(..));
        pass.set_vertex_buffer(1, instance_buffer.buffer.slice(..));

        match &gpu_mesh.buffer_info {
            RenderMeshBufferInfo::Indexed {
                index_format,
                count,
            } => {
                let Some(index_buffer_slice) =
                    mesh_allocator.mesh_index_slice(&mesh_instance.mesh_asset_id)
                else {
                    return RenderCommandResult::Skip;
                };

                pass.set_index_buffer(index_buffer_slice.buffer.slice(..), 0, *index_format);
                pass.draw_indexed(
                    index_buffer_slice.range.start..(index_buffer_slice.range.start + count),
                    vertex_buffer_slice.range.start as i32,
                    0..instance_buffer.length as u32,
                );
            }
            RenderMeshBufferInfo::NonIndexed => {
                pass.draw(vertex_buffer_slice.range, 0..instance_buffer.length as u32);
            }
        }
        RenderCommandResult::Success
    }
}

fn create_cube_grid_bind_group_layout(render_device: &RenderDevice) -> BindGroupLayout {
    render_device.create_bind_group_layout(
        "cube_grid_material_layout",
        &[BindGroupLayoutEntry {
            binding: 0,
            visibility: ShaderStages::VERTEX_FRAGMENT,
            ty: BindingType::Buffer {
                ty: BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_layout_matches_vertex_attributes() {
        assert_eq!(std::mem::size_of::<CubeInstance>(), 32);
        assert_eq!(std::mem::size_of::<CubeGridLighting>(), 8 * 16);
    }

    #[test]
    fn lighting_uploads_only_when_it_changes() {
        let mut prepared = PreparedCubeGridBindGroup::default();
        let lighting = CubeGridLighting {
            pointer_light: [1.0, 2.0, 3.0, 4.0],
            ..default()
        };
        assert!(prepared.is_stale(&CubeGridLighting::default()));

        prepared.uploaded = Some(lighting);
        assert!(!prepared.is_stale(&lighting));

        let moved = CubeGridLighting {
            pointer_light: [1.5, 2.0, 3.0, 4.0],
            ..lighting
        };
        assert!(prepared.is_stale(&moved));
    }
}
