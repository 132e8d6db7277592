//! GPU rendering subsystem.
//!
//! Thin wrappers over wgpu objects with GL-like semantics:
//! - [`GeometryBuffer`]: immutable interleaved vertex + index data
//! - [`ShaderProgram`]: vertex/fragment pair with named per-draw uniforms
//! - [`DrawRecorder`]: uniform state machine capturing one record per draw
//!
//! Positions are in NDC; no viewport-space conversion happens here.

mod ctx;
mod geometry;
mod shader;
mod uniforms;

pub use ctx::{RenderCtx, RenderTarget};
pub use geometry::{GeometryBuffer, Vertex};
pub use shader::{ShaderProgram, ShaderSources};
pub use uniforms::{
    DrawRecorder, DrawSink, UniformBlock, UniformHandle, UniformSlots, MAX_UNIFORM_SLOTS,
};
