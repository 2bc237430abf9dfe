use bevy::color::Color;

/// Page background (#050505)
pub const BACKGROUND: Color = Color::srgb(0.0196, 0.0196, 0.0196);

/// Ecosystem section background (#020202)
pub const ECOSYSTEM_BACKGROUND: Color = Color::srgb(0.0078, 0.0078, 0.0078);

/// Electric blue accent (#3B82F6)
pub const ACCENT: Color = Color::srgb(0.231, 0.510, 0.965);

/// Metallic black used by the hero cubes (#111111)
pub const CUBE_BASE: Color = Color::srgb(0.0667, 0.0667, 0.0667);

/// Fixed directional light tint (#444444)
pub const DIRECTIONAL_TINT: Color = Color::srgb(0.2667, 0.2667, 0.2667);

pub const TEXT: Color = Color::srgb(0.93, 0.93, 0.93);
pub const MUTED: Color = Color::srgb(0.53, 0.53, 0.53);
pub const SURFACE: Color = Color::srgb(0.067, 0.067, 0.067);
pub const BORDER: Color = Color::srgb(0.15, 0.15, 0.15);
pub const ERROR: Color = Color::srgb(0.94, 0.27, 0.27);
