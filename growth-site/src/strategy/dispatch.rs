use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use super::backend::{BackendFuture, StrategyBackend};
use super::lifecycle::{RequestTicket, Settlement, StrategyPanel};
use super::model::{StrategyError, StrategyResult};

/// Ask for a strategy for `niche`. Sent by the panel's input and by the web RPC bridge.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct StrategyRequestEvent {
    pub niche: String,
}

/// Outcome of one request, handed back to the main schedule.
#[derive(Debug)]
pub struct StrategyCompletion {
    pub ticket: RequestTicket,
    pub outcome: Result<StrategyResult, StrategyError>,
}

/// Completed requests waiting to be applied. Written from async tasks, drained each frame.
#[derive(Resource, Clone, Default)]
pub struct StrategyInbox(pub Arc<Mutex<Vec<StrategyCompletion>>>);

impl StrategyInbox {
    pub fn push(&self, completion: StrategyCompletion) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(completion);
        }
    }

    pub fn drain(&self) -> Vec<StrategyCompletion> {
        if let Ok(mut queue) = self.0.lock() {
            std::mem::take(&mut *queue)
        } else {
            Vec::new()
        }
    }
}

/// The backend requests are sent to.
#[derive(Resource, Clone)]
pub struct StrategyClient(pub Arc<dyn StrategyBackend>);

/// Runtime driving backend futures off the main schedule.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Resource)]
pub struct StrategyRuntime(pub tokio::runtime::Runtime);

#[cfg(not(target_arch = "wasm32"))]
impl StrategyRuntime {
    pub fn new() -> std::io::Result<Self> {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("strategy-requests")
            .enable_all()
            .build()
            .map(Self)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_request(
    runtime: Option<&StrategyRuntime>,
    future: BackendFuture,
    ticket: RequestTicket,
    inbox: StrategyInbox,
) {
    let Some(runtime) = runtime else {
        inbox.push(StrategyCompletion {
            ticket,
            outcome: Err(StrategyError::Transport("no async runtime".to_string())),
        });
        return;
    };
    runtime.0.spawn(async move {
        let outcome = future.await;
        inbox.push(StrategyCompletion { ticket, outcome });
    });
}

#[cfg(target_arch = "wasm32")]
fn spawn_request(future: BackendFuture, ticket: RequestTicket, inbox: StrategyInbox) {
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = future.await;
        inbox.push(StrategyCompletion { ticket, outcome });
    });
}

/// Start every requested generation. Each accepted request puts the panel into `Loading`.
pub fn dispatch_strategy_requests(
    mut requests: EventReader<StrategyRequestEvent>,
    mut panel: ResMut<StrategyPanel>,
    client: Res<StrategyClient>,
    inbox: Res<StrategyInbox>,
    #[cfg(not(target_arch = "wasm32"))] runtime: Option<Res<StrategyRuntime>>,
) {
    for request in requests.read() {
        let Some(ticket) = panel.bypass_change_detection().begin(&request.niche) else {
            continue;
        };
        panel.set_changed();
        info!(
            "Strategy request #{} for niche '{}'",
            ticket.sequence, ticket.niche
        );

        let future = client.0.generate(ticket.niche.clone());

        #[cfg(not(target_arch = "wasm32"))]
        spawn_request(runtime.as_deref(), future, ticket, inbox.clone());

        #[cfg(target_arch = "wasm32")]
        spawn_request(future, ticket, inbox.clone());
    }
}

/// Apply completions in arrival order. Superseded completions leave the panel untouched.
pub fn settle_strategy_requests(inbox: Res<StrategyInbox>, mut panel: ResMut<StrategyPanel>) {
    for StrategyCompletion { ticket, outcome } in inbox.drain() {
        if let Err(error) = &outcome {
            warn!("Strategy request #{} failed: {}", ticket.sequence, error);
        }

        match panel.bypass_change_detection().settle(&ticket, outcome) {
            Settlement::Applied => {
                info!(
                    "Strategy request #{} settled: {}",
                    ticket.sequence,
                    panel.state().name()
                );
                panel.set_changed();
            }
            Settlement::Superseded => {
                debug!(
                    "Strategy request #{} superseded by #{}",
                    ticket.sequence,
                    panel.latest_sequence()
                );
            }
        }
    }
}
