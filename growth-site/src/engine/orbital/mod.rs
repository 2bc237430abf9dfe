//! Orbital "ecosystem" scene: a rotating central sphere ringed by hoverable benefit nodes.
//!
//! Rendered by its own camera on a dedicated render layer, drawn into the right-hand
//! viewport of the window. Mesh picking feeds `NodeHoverEvent`s to a single selection
//! system; every visual (scale, material, connection line, label) reads `ActiveNode`.

/// Node bobbing, pulse scales, highlight swaps and sun rotation.
pub mod animation;

/// Projected info panels that ease in next to the active node.
pub mod labels;

/// Scene construction, materials, lights and the ecosystem camera.
pub mod scene;

/// The at-most-one active node register and its hover events.
pub mod selection;

use bevy::prelude::*;

use animation::{apply_node_highlight, bob_nodes, pulse_nodes, spin_sun};
use labels::{ease_node_labels, fade_label_contents, position_node_labels};
use scene::{fit_ecosystem_viewport, spawn_orbital_scene};
use selection::{ActiveNode, NodeHoverEvent, apply_node_hover_events};

pub struct OrbitalScenePlugin;

impl Plugin for OrbitalScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveNode>()
            .add_event::<NodeHoverEvent>()
            .add_systems(Startup, spawn_orbital_scene)
            .add_systems(
                Update,
                (
                    apply_node_hover_events,
                    apply_node_highlight,
                    (bob_nodes, pulse_nodes, spin_sun),
                )
                    .chain(),
            )
            .add_systems(Update, fit_ecosystem_viewport)
            .add_systems(
                PostUpdate,
                (ease_node_labels, fade_label_contents, position_node_labels)
                    .chain()
                    .before(bevy::ui::UiSystem::Layout),
            );
    }
}
