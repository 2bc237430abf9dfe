/// Number of cubes along the horizontal axis of the hero grid
pub const GRID_COUNT_X: usize = 20;

/// Number of cubes along the vertical axis of the hero grid
pub const GRID_COUNT_Y: usize = 15;

/// Edge length of a single cube in world units
pub const CUBE_SIZE: f32 = 0.6;

/// Rest depth jitter: uniform(-1, 1) scaled by this factor
pub const REST_JITTER_SCALE: f32 = 0.5;

/// World-unit radius around the pointer inside which cubes react
pub const INTERACTION_RADIUS: f32 = 6.0;

/// Extra uniform scale at full force (scale = 1 + force * gain)
pub const FORCE_SCALE_GAIN: f32 = 1.5;

/// Depth pop towards the camera at full force
pub const FORCE_DEPTH_GAIN: f32 = 3.0;

/// Extra rotation (radians) on both axes at full force
pub const FORCE_SPIN_GAIN: f32 = 5.0;

/// Ambient spin rates (radians per second) around X and Y
pub const SPIN_RATE_X: f32 = 0.2;
pub const SPIN_RATE_Y: f32 = 0.3;

/// Rolling wave: amplitude * sin(t * speed_x + x * freq) + amplitude * cos(t * speed_y + y * freq)
pub const WAVE_AMPLITUDE: f32 = 0.5;
pub const WAVE_SPEED_X: f32 = 0.5;
pub const WAVE_SPEED_Y: f32 = 0.3;
pub const WAVE_SPATIAL_FREQUENCY: f32 = 0.5;
