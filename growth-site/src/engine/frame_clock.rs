use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use constants::render_settings::{HERO_CAMERA_DISTANCE, HERO_CAMERA_FOV_DEGREES};

/// Per-frame snapshot of time, pointer and hero viewport extent.
/// Written once in `PreUpdate`; every animator in `Update` reads the same sample.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    /// Seconds since the scene started.
    pub elapsed: f32,
    /// Pointer in normalised device coordinates, [-1, 1] on both axes, y up.
    pub pointer_ndc: Vec2,
    /// Width and height of the hero view at the z = 0 plane, in world units.
    pub extent: Vec2,
}

impl Default for FrameSample {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            pointer_ndc: Vec2::ZERO,
            extent: viewport_extent(16.0 / 9.0),
        }
    }
}

impl FrameSample {
    /// Pointer mapped into world units on the z = 0 plane.
    pub fn pointer_world(&self) -> Vec2 {
        pointer_to_world(self.pointer_ndc, self.extent)
    }
}

pub fn pointer_to_world(pointer_ndc: Vec2, extent: Vec2) -> Vec2 {
    pointer_ndc * extent * 0.5
}

/// Visible world extent at the z = 0 plane for the hero camera at the given aspect ratio.
pub fn viewport_extent(aspect: f32) -> Vec2 {
    let height = 2.0 * HERO_CAMERA_DISTANCE * (HERO_CAMERA_FOV_DEGREES.to_radians() * 0.5).tan();
    Vec2::new(height * aspect, height)
}

/// Convert a window cursor position (pixels, y down) into NDC (y up).
pub fn cursor_to_ndc(cursor: Vec2, window_size: Vec2) -> Vec2 {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (cursor.x / window_size.x) * 2.0 - 1.0,
        -((cursor.y / window_size.y) * 2.0 - 1.0),
    )
    .clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
}

/// Sample elapsed time, pointer and viewport extent for this frame.
/// The pointer keeps its last position while the cursor is outside the window.
pub fn sample_frame(
    time: Res<Time>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut sample: ResMut<FrameSample>,
) {
    sample.elapsed = time.elapsed_secs();

    let Ok(window) = windows.single() else {
        return;
    };

    let size = window.size();
    if size.y > 0.0 {
        let extent = viewport_extent(size.x / size.y);
        if extent != sample.extent {
            sample.extent = extent;
        }
    }

    if let Some(cursor) = window.cursor_position() {
        sample.pointer_ndc = cursor_to_ndc(cursor, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pointer_defaults_to_centre() {
        let sample = FrameSample::default();
        assert_eq!(sample.pointer_ndc, Vec2::ZERO);
        assert_eq!(sample.pointer_world(), Vec2::ZERO);
    }

    #[test]
    fn ndc_corners_map_to_half_extent() {
        let extent = Vec2::new(20.0, 10.0);
        assert_eq!(pointer_to_world(Vec2::new(1.0, 1.0), extent), Vec2::new(10.0, 5.0));
        assert_eq!(
            pointer_to_world(Vec2::new(-1.0, -1.0), extent),
            Vec2::new(-10.0, -5.0)
        );
    }

    #[test]
    fn cursor_top_left_is_upper_left_ndc() {
        let ndc = cursor_to_ndc(Vec2::ZERO, Vec2::new(800.0, 600.0));
        assert_eq!(ndc, Vec2::new(-1.0, 1.0));

        let centre = cursor_to_ndc(Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0));
        assert_eq!(centre, Vec2::ZERO);
    }

    #[test]
    fn extent_scales_with_aspect() {
        let square = viewport_extent(1.0);
        let wide = viewport_extent(2.0);
        assert_relative_eq!(square.x, square.y);
        assert_relative_eq!(wide.x, 2.0 * wide.y);
        // 2 * 12 * tan(25 deg)
        assert_relative_eq!(square.y, 11.191_5, epsilon = 1e-3);
    }
}
