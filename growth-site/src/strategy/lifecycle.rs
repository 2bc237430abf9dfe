use bevy::prelude::*;

use super::model::{RequestLifecycle, StrategyError, StrategyResult};
use crate::config::SupersedePolicy;

/// Handle for one issued request. The sequence number orders requests by issue time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub sequence: u64,
    pub niche: String,
}

/// Whether a completed request changed what the panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    /// A newer request was issued after this one; its outcome was dropped.
    Superseded,
}

/// State machine behind the AI strategy panel. One writer: the strategy systems.
#[derive(Resource, Debug, Default)]
pub struct StrategyPanel {
    state: RequestLifecycle,
    policy: SupersedePolicy,
    issued: u64,
}

impl StrategyPanel {
    pub fn new(policy: SupersedePolicy) -> Self {
        Self {
            policy,
            ..default()
        }
    }

    pub fn state(&self) -> &RequestLifecycle {
        &self.state
    }

    pub fn latest_sequence(&self) -> u64 {
        self.issued
    }

    /// Start a request for `niche`. Blank input is ignored and leaves the state untouched.
    /// Otherwise the panel enters `Loading` immediately, dropping any shown result.
    pub fn begin(&mut self, niche: &str) -> Option<RequestTicket> {
        let niche = niche.trim();
        if niche.is_empty() {
            return None;
        }

        self.issued += 1;
        self.state = RequestLifecycle::Loading;
        Some(RequestTicket {
            sequence: self.issued,
            niche: niche.to_string(),
        })
    }

    /// Apply a completed request. Any error collapses to `Error` without detail.
    pub fn settle(
        &mut self,
        ticket: &RequestTicket,
        outcome: Result<StrategyResult, StrategyError>,
    ) -> Settlement {
        if self.policy == SupersedePolicy::LatestIssued && ticket.sequence != self.issued {
            return Settlement::Superseded;
        }

        self.state = match outcome {
            Ok(result) => RequestLifecycle::Success(result),
            Err(_) => RequestLifecycle::Error,
        };
        Settlement::Applied
    }
}
