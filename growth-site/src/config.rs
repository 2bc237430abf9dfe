//! Runtime configuration resolved once at startup.
//!
//! Native builds read the process environment; web builds bake the values in at
//! compile time, the same way the hosting page injects its API key at build time.

use bevy::prelude::*;

use constants::strategy::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

/// Which completion may update the strategy panel when requests overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SupersedePolicy {
    /// Only the most recently issued request may update the panel.
    #[default]
    LatestIssued,
    /// Every completion is applied in the order it settles.
    LatestSettled,
}

impl SupersedePolicy {
    pub fn from_string(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "latest_issued" | "issued" => Some(Self::LatestIssued),
            "latest_settled" | "settled" => Some(Self::LatestSettled),
            _ => None,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct SiteConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub supersede_policy: SupersedePolicy,
    /// Fixed seed for the grid depth jitter; a per-session seed is used when unset.
    pub jitter_seed: Option<u64>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            supersede_policy: SupersedePolicy::default(),
            jitter_seed: None,
        }
    }
}

impl SiteConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(read_variable)
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        let supersede_policy = match get("KN_SUPERSEDE_POLICY") {
            Some(value) => SupersedePolicy::from_string(&value).unwrap_or_else(|| {
                warn!("Unknown supersede policy '{value}', using latest_issued");
                SupersedePolicy::default()
            }),
            None => defaults.supersede_policy,
        };

        Self {
            api_key: get("GEMINI_API_KEY").or_else(|| get("API_KEY")),
            model: get("GEMINI_MODEL").unwrap_or(defaults.model),
            endpoint: get("GEMINI_ENDPOINT")
                .map(|endpoint| endpoint.trim_end_matches('/').to_string())
                .unwrap_or(defaults.endpoint),
            supersede_policy,
            jitter_seed: get("KN_GRID_SEED").and_then(|seed| seed.parse().ok()),
        }
    }

    /// Seed for this session's grid jitter.
    pub fn jitter_seed(&self) -> u64 {
        self.jitter_seed.unwrap_or_else(session_seed)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn read_variable(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[cfg(target_arch = "wasm32")]
fn read_variable(name: &str) -> Option<String> {
    let value = match name {
        "GEMINI_API_KEY" => option_env!("GEMINI_API_KEY"),
        "API_KEY" => option_env!("API_KEY"),
        "GEMINI_MODEL" => option_env!("GEMINI_MODEL"),
        "GEMINI_ENDPOINT" => option_env!("GEMINI_ENDPOINT"),
        "KN_SUPERSEDE_POLICY" => option_env!("KN_SUPERSEDE_POLICY"),
        "KN_GRID_SEED" => option_env!("KN_GRID_SEED"),
        _ => None,
    };
    value.map(str::to_string)
}

#[cfg(not(target_arch = "wasm32"))]
fn session_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0x4b4e_4752_4f57_5448)
}

#[cfg(target_arch = "wasm32")]
fn session_seed() -> u64 {
    (js_sys::Date::now() * 1000.0) as u64 ^ (js_sys::Math::random() * u32::MAX as f64) as u64
}
