//! KN Growth marketing site: pointer-reactive cube grid hero, an orbital benefits
//! scene and an AI-assisted landing page strategy form.

pub mod config;
pub mod engine;
pub mod rpc;
pub mod shell;
pub mod strategy;
