//! Custom rendering for the hero background.
//!
//! The orbital scene uses stock PBR materials; only the cube grid needs its own pipeline.

/// Instanced cube pipeline: per-instance vertex buffer, one draw call, pointer-lit shader.
///
/// Renders only for the hero camera and reads a lighting uniform extracted each frame.
pub mod instanced_render_plugin;
