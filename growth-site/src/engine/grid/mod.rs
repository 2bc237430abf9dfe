//! Pointer-reactive hero background: a fixed grid of cubes drawn in one instanced call.
//!
//! ## Frame flow
//!
//! ```text
//! FrameSample (PreUpdate)
//!   └─> resize_grid_layout      spacing follows the viewport extent
//!   └─> animate_cube_grid       writes all N transforms, bumps generation once
//!   └─> follow_pointer_light    pointer light + fog uniform for the grid shader
//! ```

/// Rest-grid construction and the pure per-cell animation function.
pub mod layout;

/// Bevy systems spawning and animating the grid entity.
pub mod systems;

use bevy::prelude::*;

use systems::{animate_cube_grid, follow_pointer_light, resize_grid_layout, spawn_cube_grid};

pub struct CubeGridPlugin;

impl Plugin for CubeGridPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_cube_grid).add_systems(
            Update,
            (resize_grid_layout, animate_cube_grid, follow_pointer_light).chain(),
        );
    }
}
