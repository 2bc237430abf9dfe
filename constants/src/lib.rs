//! Shared configuration constants for the KN Growth site engine.

pub mod grid;
pub mod orbital;
pub mod palette;
pub mod projects;
pub mod render_settings;
pub mod strategy;
