//! Application assembly and window setup for native and WASM targets.

/// Builds the app: default plugins, scene plugins, the hero camera and the frame sample.
pub mod app_setup;

/// Platform-specific window configuration.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
