//! flashgrid engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the application: the winit
//! loop and window, the wgpu device and swap chain, keyboard state, frame
//! timing, logging and the GL-style mesh/program wrappers.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;
