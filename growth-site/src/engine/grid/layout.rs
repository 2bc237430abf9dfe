//! Rest-grid construction and the per-cell animation function.

use bevy::prelude::*;
use rand::Rng;

use constants::grid::{
    FORCE_DEPTH_GAIN, FORCE_SCALE_GAIN, FORCE_SPIN_GAIN, INTERACTION_RADIUS, REST_JITTER_SCALE,
    SPIN_RATE_X, SPIN_RATE_Y, WAVE_AMPLITUDE, WAVE_SPATIAL_FREQUENCY, WAVE_SPEED_X, WAVE_SPEED_Y,
};

use crate::engine::render::instanced_render_plugin::CubeInstance;

/// Rest position of one cube. `rest.z` is the session-fixed depth jitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub rest: Vec3,
}

/// Transform of one cube for a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPose {
    pub translation: Vec3,
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub scale: f32,
}

impl CellPose {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation_x, self.rotation_y, 0.0)
    }

    pub fn to_instance(&self) -> CubeInstance {
        CubeInstance {
            translation_scale: self.translation.extend(self.scale).to_array(),
            rotation: self.rotation().to_array(),
        }
    }
}

/// Rectangular grid of `count_x * count_y` cells spanning the hero viewport.
#[derive(Debug, Clone)]
pub struct CubeGridLayout {
    count_x: usize,
    count_y: usize,
    extent: Vec2,
    cells: Vec<GridCell>,
}

impl CubeGridLayout {
    /// Build the rest grid. Counts below 2 are raised to 2 so spacing stays finite.
    pub fn new(count_x: usize, count_y: usize, extent: Vec2, rng: &mut impl Rng) -> Self {
        let count_x = count_x.max(2);
        let count_y = count_y.max(2);

        let cells = (0..count_x * count_y)
            .map(|_| GridCell {
                rest: Vec3::new(
                    0.0,
                    0.0,
                    rng.random_range(-1.0f32..=1.0) * REST_JITTER_SCALE,
                ),
            })
            .collect();

        let mut layout = Self {
            count_x,
            count_y,
            extent,
            cells,
        };
        layout.place_cells();
        layout
    }

    /// Recompute lateral spacing for a new viewport extent. Depth jitter is kept.
    pub fn resize(&mut self, extent: Vec2) {
        if extent == self.extent {
            return;
        }
        self.extent = extent;
        self.place_cells();
    }

    fn place_cells(&mut self) {
        let spacing = self.spacing();
        let half = self.extent * 0.5;
        let count_x = self.count_x;

        for (i, cell) in self.cells.iter_mut().enumerate() {
            let column = (i % count_x) as f32;
            let row = (i / count_x) as f32;
            cell.rest.x = column * spacing.x - half.x;
            cell.rest.y = row * spacing.y - half.y;
        }
    }

    pub fn spacing(&self) -> Vec2 {
        Vec2::new(
            self.extent.x / (self.count_x - 1) as f32,
            self.extent.y / (self.count_y - 1) as f32,
        )
    }

    pub fn extent(&self) -> Vec2 {
        self.extent
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Write every cell's pose for time `t` into `instances`.
    /// `instances` must already hold one slot per cell; nothing is allocated.
    pub fn write_instances(&self, instances: &mut [CubeInstance], t: f32, pointer_world: Vec2) {
        for (slot, cell) in instances.iter_mut().zip(&self.cells) {
            *slot = animate_cell(cell, t, pointer_world).to_instance();
        }
    }
}

/// Proximity intensity in [0, 1]: 1 at the pointer, 0 at or beyond the radius.
pub fn pointer_force(distance: f32) -> f32 {
    if distance < INTERACTION_RADIUS {
        (INTERACTION_RADIUS - distance) / INTERACTION_RADIUS
    } else {
        0.0
    }
}

/// Position-dependent rolling wave on the depth axis.
pub fn float_offset(t: f32, x: f32, y: f32) -> f32 {
    (t * WAVE_SPEED_X + x * WAVE_SPATIAL_FREQUENCY).sin() * WAVE_AMPLITUDE
        + (t * WAVE_SPEED_Y + y * WAVE_SPATIAL_FREQUENCY).cos() * WAVE_AMPLITUDE
}

pub fn animate_cell(cell: &GridCell, t: f32, pointer_world: Vec2) -> CellPose {
    let GridCell { rest } = *cell;
    let force = pointer_force(pointer_world.distance(rest.truncate()));

    CellPose {
        translation: Vec3::new(
            rest.x,
            rest.y,
            rest.z + float_offset(t, rest.x, rest.y) + force * FORCE_DEPTH_GAIN,
        ),
        rotation_x: t * SPIN_RATE_X + force * FORCE_SPIN_GAIN,
        rotation_y: t * SPIN_RATE_Y + force * FORCE_SPIN_GAIN,
        scale: 1.0 + force * FORCE_SCALE_GAIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use constants::grid::{GRID_COUNT_X, GRID_COUNT_Y};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn layout(count_x: usize, count_y: usize, extent: Vec2) -> CubeGridLayout {
        CubeGridLayout::new(count_x, count_y, extent, &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn first_and_last_cells_sit_on_opposite_extents() {
        for (count_x, count_y, extent) in [
            (2, 2, Vec2::new(4.0, 2.0)),
            (GRID_COUNT_X, GRID_COUNT_Y, Vec2::new(24.0, 11.2)),
            (7, 3, Vec2::new(9.5, 30.0)),
        ] {
            let grid = layout(count_x, count_y, extent);
            let first = grid.cells()[0].rest;
            let last_in_row = grid.cells()[count_x - 1].rest;
            let last = grid.cells()[grid.len() - 1].rest;

            assert_relative_eq!(first.x, -extent.x / 2.0, epsilon = 1e-4);
            assert_relative_eq!(first.y, -extent.y / 2.0, epsilon = 1e-4);
            assert_relative_eq!(last_in_row.x, extent.x / 2.0, epsilon = 1e-4);
            assert_relative_eq!(last.x, extent.x / 2.0, epsilon = 1e-4);
            assert_relative_eq!(last.y, extent.y / 2.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn resize_respaces_but_keeps_depth_jitter() {
        let mut grid = layout(GRID_COUNT_X, GRID_COUNT_Y, Vec2::new(20.0, 10.0));
        let depths: Vec<f32> = grid.cells().iter().map(|c| c.rest.z).collect();

        grid.resize(Vec2::new(30.0, 12.0));

        assert_relative_eq!(grid.spacing().x, 30.0 / 19.0);
        assert_relative_eq!(grid.spacing().y, 12.0 / 14.0);
        assert_relative_eq!(grid.cells()[0].rest.x, -15.0, epsilon = 1e-4);
        assert_relative_eq!(grid.cells()[grid.len() - 1].rest.y, 6.0, epsilon = 1e-4);
        let resized: Vec<f32> = grid.cells().iter().map(|c| c.rest.z).collect();
        assert_eq!(depths, resized);
    }

    #[test]
    fn depth_jitter_stays_within_half_unit() {
        let grid = layout(GRID_COUNT_X, GRID_COUNT_Y, Vec2::new(20.0, 10.0));
        assert_eq!(grid.len(), 300);
        assert!(grid.cells().iter().all(|c| c.rest.z.abs() <= 0.5));
    }

    #[test]
    fn pointer_outside_radius_has_no_influence() {
        let grid = layout(GRID_COUNT_X, GRID_COUNT_Y, Vec2::new(20.0, 10.0));
        // Far enough from every cell.
        let pointer = Vec2::new(100.0, 100.0);
        let t = 3.7;

        for cell in grid.cells() {
            let pose = animate_cell(cell, t, pointer);
            assert_eq!(pose.scale, 1.0);
            assert_eq!(
                pose.translation.z,
                cell.rest.z + float_offset(t, cell.rest.x, cell.rest.y)
            );
            assert_eq!(pose.rotation_x, t * 0.2);
            assert_eq!(pose.rotation_y, t * 0.3);
        }
    }

    #[test]
    fn force_is_zero_exactly_at_radius() {
        assert_eq!(pointer_force(6.0), 0.0);
        assert_eq!(pointer_force(6.5), 0.0);
        assert_relative_eq!(pointer_force(3.0), 0.5);
    }

    #[test]
    fn pointer_on_cell_gives_full_force() {
        let cell = GridCell {
            rest: Vec3::new(1.5, -2.0, 0.25),
        };
        let t = 1.25;
        let pose = animate_cell(&cell, t, cell.rest.truncate());

        assert_eq!(pointer_force(0.0), 1.0);
        assert_relative_eq!(pose.scale, 2.5);
        assert_relative_eq!(
            pose.translation.z,
            0.25 + float_offset(t, 1.5, -2.0) + 3.0,
            epsilon = 1e-6
        );
        assert_relative_eq!(pose.rotation_x, 0.2 * t + 5.0, epsilon = 1e-6);
        assert_relative_eq!(pose.rotation_y, 0.3 * t + 5.0, epsilon = 1e-6);
        // No lateral displacement.
        assert_eq!(pose.translation.truncate(), cell.rest.truncate());
    }

    #[test]
    fn write_instances_uses_one_sample_for_all_cells() {
        let grid = layout(4, 3, Vec2::new(6.0, 4.0));
        let mut instances = vec![CubeInstance::default(); grid.len()];
        let pointer = Vec2::new(0.5, 0.5);

        grid.write_instances(&mut instances, 2.0, pointer);

        for (instance, cell) in instances.iter().zip(grid.cells()) {
            let expected = animate_cell(cell, 2.0, pointer).to_instance();
            assert_eq!(*instance, expected);
        }
    }

    #[test]
    fn float_offset_is_deterministic() {
        assert_eq!(float_offset(0.0, 0.0, 0.0), 0.5);
        assert_eq!(float_offset(4.2, -1.0, 3.0), float_offset(4.2, -1.0, 3.0));
    }
}
