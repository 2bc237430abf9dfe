use bevy::prelude::*;

use constants::orbital::{
    ACTIVE_CORE_SCALE, ACTIVE_HALO_SCALE, BOB_AMPLITUDE, HALO_PULSE_RATIO, PULSE_AMPLITUDE,
    PULSE_SPEED, SUN_SPIN_RATE_X, SUN_SPIN_RATE_Y,
};

use super::scene::{BenefitNode, ConnectionLine, FerrofluidSun, NodeCore, NodeHalo, NodeMaterials};
use super::selection::ActiveNode;
use crate::engine::frame_clock::FrameSample;

/// Vertical float of a node around its rest height. The id offsets the phase.
pub fn node_bob_y(rest_y: f32, id: u32, t: f32) -> f32 {
    rest_y + (t + id as f32).sin() * BOB_AMPLITUDE
}

/// (core scale, halo scale). Idle nodes breathe; the active node snaps to a fixed size.
pub fn node_scales(active: bool, t: f32) -> (f32, f32) {
    if active {
        (ACTIVE_CORE_SCALE, ACTIVE_HALO_SCALE)
    } else {
        let pulse = 1.0 + (t * PULSE_SPEED).sin() * PULSE_AMPLITUDE;
        (pulse, pulse * HALO_PULSE_RATIO)
    }
}

pub fn bob_nodes(sample: Res<FrameSample>, mut nodes: Query<(&BenefitNode, &mut Transform)>) {
    for (node, mut transform) in &mut nodes {
        transform.translation.y = node_bob_y(node.rest.y, node.id, sample.elapsed);
    }
}

pub fn pulse_nodes(
    sample: Res<FrameSample>,
    active: Res<ActiveNode>,
    mut cores: Query<(&NodeCore, &mut Transform), Without<NodeHalo>>,
    mut halos: Query<(&NodeHalo, &mut Transform), Without<NodeCore>>,
) {
    let t = sample.elapsed;
    for (core, mut transform) in &mut cores {
        let (scale, _) = node_scales(active.is_active(core.0), t);
        transform.scale = Vec3::splat(scale);
    }
    for (halo, mut transform) in &mut halos {
        let (_, scale) = node_scales(active.is_active(halo.0), t);
        transform.scale = Vec3::splat(scale);
    }
}

/// Swap shared material handles and toggle connection lines when the selection changes.
pub fn apply_node_highlight(
    active: Res<ActiveNode>,
    materials: Res<NodeMaterials>,
    mut cores: Query<(&NodeCore, &mut MeshMaterial3d<StandardMaterial>), Without<NodeHalo>>,
    mut halos: Query<(&NodeHalo, &mut MeshMaterial3d<StandardMaterial>), Without<NodeCore>>,
    mut lines: Query<(&ConnectionLine, &mut Visibility)>,
) {
    if !active.is_changed() {
        return;
    }

    for (core, mut material) in &mut cores {
        material.0 = if active.is_active(core.0) {
            materials.core_active.clone()
        } else {
            materials.core_idle.clone()
        };
    }
    for (halo, mut material) in &mut halos {
        material.0 = if active.is_active(halo.0) {
            materials.halo_active.clone()
        } else {
            materials.halo_idle.clone()
        };
    }
    for (line, mut visibility) in &mut lines {
        *visibility = if active.is_active(line.0) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

pub fn spin_sun(sample: Res<FrameSample>, mut suns: Query<&mut Transform, With<FerrofluidSun>>) {
    let t = sample.elapsed;
    for mut transform in &mut suns {
        transform.rotation =
            Quat::from_euler(EulerRot::XYZ, t * SUN_SPIN_RATE_X, t * SUN_SPIN_RATE_Y, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bob_is_phase_shifted_by_id() {
        assert_relative_eq!(node_bob_y(1.2, 1, 0.0), 1.2 + 1.0f32.sin() * 0.15);
        assert_relative_eq!(node_bob_y(-1.2, 3, 2.0), -1.2 + 5.0f32.sin() * 0.15);
        assert!((node_bob_y(0.0, 2, 7.3)).abs() <= 0.15 + f32::EPSILON);
    }

    #[test]
    fn active_node_snaps_to_fixed_scales() {
        for t in [0.0, 0.4, 1.7, 100.0] {
            assert_eq!(node_scales(true, t), (1.3, 1.8));
        }
    }

    #[test]
    fn idle_node_pulses_with_halo_ratio() {
        let t = 0.5;
        let (core, halo) = node_scales(false, t);
        assert_relative_eq!(core, 1.0 + (1.5f32).sin() * 0.15);
        assert_relative_eq!(halo, core * 1.2);
        assert_eq!(node_scales(false, 0.0), (1.0, 1.2));
    }
}
