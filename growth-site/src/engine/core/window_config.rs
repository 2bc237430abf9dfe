use bevy::prelude::*;
use bevy::window::PresentMode;

const WINDOW_TITLE: &str = "KN Growth | Portfolio 4.0";

/// Primary window. Web builds render into the `#bevy` canvas and leave browser
/// shortcuts alone so the page keeps scrolling and text selection.
pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            title: WINDOW_TITLE.into(),
            canvas: Some("#bevy".into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: WINDOW_TITLE.into(),
            resolution: (1440.0, 900.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
