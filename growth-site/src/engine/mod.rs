pub mod core;
pub mod frame_clock;
pub mod grid;
pub mod orbital;
pub mod render;
