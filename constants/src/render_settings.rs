/// Hero camera: position on +Z looking at the origin
pub const HERO_CAMERA_DISTANCE: f32 = 12.0;
pub const HERO_CAMERA_FOV_DEGREES: f32 = 50.0;

/// Ecosystem camera
pub const ECOSYSTEM_CAMERA_DISTANCE: f32 = 8.5;
pub const ECOSYSTEM_CAMERA_FOV_DEGREES: f32 = 45.0;

/// Fraction of the window width given to the ecosystem viewport (right side)
pub const ECOSYSTEM_VIEWPORT_WIDTH_FRACTION: f32 = 0.42;

/// Render layer used by the orbital scene
pub const ECOSYSTEM_RENDER_LAYER: usize = 1;

/// Linear fog over the hero grid
pub const FOG_NEAR: f32 = 8.0;
pub const FOG_FAR: f32 = 25.0;

/// Hero lighting
pub const HERO_AMBIENT_INTENSITY: f32 = 0.5;
pub const HERO_DIRECTIONAL_DIRECTION: [f32; 3] = [10.0, 10.0, 5.0];
pub const HERO_DIRECTIONAL_INTENSITY: f32 = 1.0;

/// Pointer-following light
pub const POINTER_LIGHT_DEPTH: f32 = 2.0;
pub const POINTER_LIGHT_RANGE: f32 = 12.0;
pub const POINTER_LIGHT_DECAY: f32 = 2.0;
pub const POINTER_LIGHT_INTENSITY: f32 = 40.0;
