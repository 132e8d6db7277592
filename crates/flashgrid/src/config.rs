//! Application configuration.
//!
//! Everything here is fixed at startup; `Default` carries the shipped values.

use winit::dpi::LogicalSize;

use flashgrid_engine::device::GpuInit;
use flashgrid_engine::window::RuntimeConfig;

use crate::controls::KeyBindings;
use crate::grid::{DrawOrder, GridSize};

#[derive(Debug, Clone)]
pub struct FlashGridConfig {
    pub title: String,
    /// Initial window size in logical pixels.
    pub window_size: (f64, f64),

    pub initial_grid: GridSize,
    /// Largest size that may still grow; the grid tops out one above it.
    pub grow_limit: u32,

    /// Phase added once per frame.
    pub phase_step: f32,
    pub draw_order: DrawOrder,

    pub clear_color: wgpu::Color,
    pub keys: KeyBindings,
}

impl FlashGridConfig {
    pub fn runtime_config(&self) -> RuntimeConfig {
        let (w, h) = self.window_size;
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(w, h),
        }
    }

    pub fn gpu_init(&self) -> GpuInit {
        GpuInit::default()
    }
}

impl Default for FlashGridConfig {
    fn default() -> Self {
        Self {
            title: "Flashing Colors".to_string(),
            window_size: (600.0, 600.0),
            initial_grid: GridSize::square(1),
            grow_limit: 20,
            phase_step: 0.001,
            draw_order: DrawOrder::Faithful,
            clear_color: wgpu::Color::BLACK,
            keys: KeyBindings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = FlashGridConfig::default();
        assert_eq!(cfg.initial_grid, GridSize::square(1));
        assert_eq!(cfg.grow_limit, 20);
        assert_eq!(cfg.draw_order, DrawOrder::Faithful);
        assert_eq!(cfg.clear_color, wgpu::Color::BLACK);
    }

    #[test]
    fn runtime_config_carries_title_and_size() {
        let rc = FlashGridConfig::default().runtime_config();
        assert_eq!(rc.title, "Flashing Colors");
        assert_eq!(rc.initial_size, LogicalSize::new(600.0, 600.0));
    }
}
