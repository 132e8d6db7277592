//! flashgrid: a grid of flashing, color-cycling squares.
//!
//! Up grows the grid, Down shrinks it (both on key release), Escape quits.

pub mod app;
pub mod config;
pub mod controls;
pub mod grid;
pub mod quad;

use anyhow::Result;
use flashgrid_engine::window::Runtime;

pub use app::FlashGridApp;
pub use config::FlashGridConfig;

/// Opens the window and runs until it closes.
pub fn run(config: FlashGridConfig) -> Result<()> {
    let runtime = config.runtime_config();
    let gpu_init = config.gpu_init();
    Runtime::run(runtime, gpu_init, FlashGridApp::new(config))
}
