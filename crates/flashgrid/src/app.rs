//! The engine-facing application: input -> grid size -> layout -> present.

use anyhow::Result;

use flashgrid_engine::core::{App, AppControl, FrameCtx};
use flashgrid_engine::device::Gpu;
use flashgrid_engine::render::DrawRecorder;

use crate::config::FlashGridConfig;
use crate::controls::{ControlSnapshot, InputOutcome, InputState};
use crate::grid::{GridRenderer, GridSize};
use crate::quad::QuadScene;

/// State that only exists once the GPU context is up.
struct Started {
    scene: QuadScene,
    renderer: GridRenderer,
}

pub struct FlashGridApp {
    config: FlashGridConfig,
    input: InputState,
    size: GridSize,
    recorder: DrawRecorder,
    rate: FrameRateLog,
    started: Option<Started>,
}

impl FlashGridApp {
    pub fn new(config: FlashGridConfig) -> Self {
        Self {
            input: InputState::new(config.grow_limit),
            size: config.initial_grid,
            recorder: DrawRecorder::new(),
            rate: FrameRateLog::default(),
            started: None,
            config,
        }
    }

    pub fn grid_size(&self) -> GridSize {
        self.size
    }

    /// Samples controls and applies them to the grid size.
    fn update(&mut self, snapshot: &ControlSnapshot) -> InputOutcome {
        let before = self.size;
        let outcome = self.input.process(snapshot, &mut self.size);
        if self.size != before {
            log::info!("grid {before} -> {}", self.size);
        }
        outcome
    }
}

impl App for FlashGridApp {
    fn on_start(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let scene = QuadScene::new(gpu.device(), gpu.surface_format())?;
        let renderer = GridRenderer::new(scene.uniforms(), self.config.draw_order, self.config.phase_step);

        log::info!(
            "grid {} ({:?} draw order); Up/Down resize, Escape quits",
            self.size,
            renderer.order()
        );

        self.started = Some(Started { scene, renderer });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let snapshot = ControlSnapshot::sample(ctx.keyboard, &self.config.keys);
        if self.update(&snapshot) == InputOutcome::Quit {
            log::info!("quit requested");
            return AppControl::Exit;
        }

        if let Some(fps) = self.rate.tick(ctx.time.dt) {
            log::debug!("{fps:.1} fps, frame {}", ctx.time.frame_index);
        }

        let Some(started) = self.started.as_mut() else {
            return AppControl::Continue;
        };

        // Uniform state starts from zero every frame.
        self.recorder.reset();
        started.renderer.render_frame(self.size, &mut self.recorder);

        let recorder = &self.recorder;
        let scene = &mut started.scene;
        ctx.render(self.config.clear_color, |rctx, target| {
            scene.draw(rctx, target, recorder);
        })
    }
}

/// Averages frame rate over roughly one-second windows.
#[derive(Debug, Default)]
struct FrameRateLog {
    elapsed: f32,
    frames: u32,
}

impl FrameRateLog {
    const WINDOW: f32 = 1.0;

    /// Returns the average rate when a window completes.
    fn tick(&mut self, dt: f32) -> Option<f32> {
        self.elapsed += dt;
        self.frames += 1;
        if self.elapsed < Self::WINDOW {
            return None;
        }

        let fps = self.frames as f32 / self.elapsed;
        *self = Self::default();
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::Control;

    #[test]
    fn starts_at_configured_size() {
        let cfg = FlashGridConfig {
            initial_grid: GridSize::square(3),
            ..FlashGridConfig::default()
        };
        assert_eq!(FlashGridApp::new(cfg).grid_size(), GridSize::square(3));
    }

    #[test]
    fn update_applies_release_edges() {
        let mut app = FlashGridApp::new(FlashGridConfig::default());
        let up = ControlSnapshot::default().with(Control::Increase, true);

        assert_eq!(app.update(&up), InputOutcome::Continue);
        assert_eq!(app.grid_size(), GridSize::square(1));

        assert_eq!(app.update(&ControlSnapshot::default()), InputOutcome::Continue);
        assert_eq!(app.grid_size(), GridSize::square(2));
    }

    #[test]
    fn update_reports_quit() {
        let mut app = FlashGridApp::new(FlashGridConfig::default());
        let quit = ControlSnapshot::default().with_quit(true);
        assert_eq!(app.update(&quit), InputOutcome::Quit);
    }

    #[test]
    fn frame_rate_reported_once_per_window() {
        let mut rate = FrameRateLog::default();
        for _ in 0..59 {
            assert_eq!(rate.tick(1.0 / 60.0), None);
        }
        let fps = rate.tick(1.0 / 60.0 + 0.001).unwrap();
        assert!((fps - 60.0).abs() < 1.0, "fps = {fps}");
        assert_eq!(rate.frames, 0);
    }
}
