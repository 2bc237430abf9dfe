//! AI strategy request glue.
//!
//! ```text
//! StrategyRequestEvent ──> dispatch_strategy_requests ──> StrategyBackend::generate (async)
//!                              │ begin(): Loading                      │
//!                              ▼                                       ▼
//!                         StrategyPanel <── settle_strategy_requests <── StrategyInbox
//! ```
//!
//! The panel is only mutated on the main schedule. Async tasks never touch it; they
//! push a `StrategyCompletion` into the inbox, which is drained once per frame.

/// Endpoint boundary and the Generative Language API client.
pub mod backend;

/// Request events, the completion inbox and the dispatch/settle systems.
pub mod dispatch;

/// Idle/Loading/Success/Error state machine and supersede handling.
pub mod lifecycle;

/// Result payload, lifecycle enum and error taxonomy.
pub mod model;

use std::sync::Arc;

use bevy::prelude::*;

use crate::config::SiteConfig;
use backend::GeminiBackend;
use dispatch::{
    StrategyClient, StrategyInbox, StrategyRequestEvent, dispatch_strategy_requests,
    settle_strategy_requests,
};
use lifecycle::StrategyPanel;

pub struct StrategyPlugin;

impl Plugin for StrategyPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<SiteConfig>()
            .cloned()
            .unwrap_or_default();

        if config.api_key.is_none() {
            warn!("GEMINI_API_KEY is not set; strategy requests will fail");
        }
        info!(
            "Strategy backend: {} ({:?})",
            config.model, config.supersede_policy
        );

        app.insert_resource(StrategyPanel::new(config.supersede_policy))
            .init_resource::<StrategyInbox>()
            .insert_resource(StrategyClient(Arc::new(GeminiBackend::from_config(
                &config,
            ))))
            .add_event::<StrategyRequestEvent>()
            .add_systems(
                Update,
                (dispatch_strategy_requests, settle_strategy_requests).chain(),
            );

        #[cfg(not(target_arch = "wasm32"))]
        match dispatch::StrategyRuntime::new() {
            Ok(runtime) => {
                app.insert_resource(runtime);
            }
            Err(e) => error!("Failed to start strategy runtime: {}", e),
        }
    }
}
