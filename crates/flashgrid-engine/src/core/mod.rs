//! Core engine-facing contracts.
//!
//! The stable interface between the platform loop and the application: the
//! [`App`] trait and the per-frame [`FrameCtx`].

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
