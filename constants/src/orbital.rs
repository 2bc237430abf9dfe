/// Static description of one hoverable benefit node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Benefit {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub rest_position: [f32; 3],
}

pub const BENEFITS: &[Benefit] = &[
    Benefit {
        id: 1,
        title: "GROWTH ENGINE",
        description: "Arquitectura diseñada para maximizar la conversión y captura de leads cualificados.",
        rest_position: [2.8, 1.2, 0.0],
    },
    Benefit {
        id: 2,
        title: "AI INTEGRATION",
        description: "Automatización inteligente y personalización dinámica en tiempo real.",
        rest_position: [-2.8, 1.2, 0.5],
    },
    Benefit {
        id: 3,
        title: "DARK AESTHETIC",
        description: "Diseño visual de alto impacto que diferencia tu marca de la competencia convencional.",
        rest_position: [-2.8, -1.2, -0.5],
    },
    Benefit {
        id: 4,
        title: "PERFORMANCE",
        description: "Optimización de código extrema para cargas instantáneas y fluidez absoluta.",
        rest_position: [2.8, -1.2, 0.0],
    },
];

/// Vertical bob amplitude in world units
pub const BOB_AMPLITUDE: f32 = 0.15;

/// Idle pulse: 1 + amplitude * sin(t * speed)
pub const PULSE_AMPLITUDE: f32 = 0.15;
pub const PULSE_SPEED: f32 = 3.0;

/// Halo ring scale relative to the idle pulse
pub const HALO_PULSE_RATIO: f32 = 1.2;

/// Fixed scales while a node is active
pub const ACTIVE_CORE_SCALE: f32 = 1.3;
pub const ACTIVE_HALO_SCALE: f32 = 1.8;

/// Core dot sphere radius
pub const CORE_RADIUS: f32 = 0.12;

/// Halo ring inner/outer radius
pub const HALO_INNER_RADIUS: f32 = 0.18;
pub const HALO_OUTER_RADIUS: f32 = 0.2;

/// Emissive intensity of the core dot
pub const IDLE_EMISSIVE_INTENSITY: f32 = 0.8;
pub const ACTIVE_EMISSIVE_INTENSITY: f32 = 2.0;

/// Halo opacity
pub const IDLE_HALO_OPACITY: f32 = 0.3;
pub const ACTIVE_HALO_OPACITY: f32 = 0.8;

/// Connection line opacity
pub const CONNECTION_LINE_OPACITY: f32 = 0.6;

/// Central sphere radius and spin rates
pub const SUN_RADIUS: f32 = 1.5;
pub const SUN_SPIN_RATE_X: f32 = 0.2;
pub const SUN_SPIN_RATE_Y: f32 = 0.3;

/// Label panel offset along X (world units) while active
pub const LABEL_ACTIVE_OFFSET: f32 = 0.5;

/// Label panel transition duration in seconds
pub const LABEL_TRANSITION_SECS: f32 = 0.5;

/// Label panel scale while hidden
pub const LABEL_HIDDEN_SCALE: f32 = 0.9;

/// Ecosystem lighting: ambient, white key spot, accent rim spot behind the sun, accent fill below
pub const ECOSYSTEM_AMBIENT_BRIGHTNESS: f32 = 80.0;
pub const KEY_LIGHT_POSITION: [f32; 3] = [10.0, 10.0, 10.0];
pub const KEY_LIGHT_INTENSITY: f32 = 2_000_000.0;
pub const KEY_LIGHT_OUTER_ANGLE: f32 = 0.5;
pub const RIM_LIGHT_POSITION: [f32; 3] = [0.0, 0.0, -5.0];
pub const RIM_LIGHT_INTENSITY: f32 = 5_000_000.0;
pub const RIM_LIGHT_OUTER_ANGLE: f32 = 1.0;
pub const RIM_LIGHT_RANGE: f32 = 15.0;
pub const FILL_LIGHT_POSITION: [f32; 3] = [-5.0, -5.0, -5.0];
pub const FILL_LIGHT_INTENSITY: f32 = 1_000_000.0;
