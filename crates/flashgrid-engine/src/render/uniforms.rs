use anyhow::Result;
use bytemuck::{Pod, Zeroable};

/// Number of scalar per-draw uniform slots a program can declare.
pub const MAX_UNIFORM_SLOTS: usize = 4;

/// Opaque reference to a named per-draw uniform, resolved once from a
/// [`ShaderProgram`](super::ShaderProgram).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UniformHandle {
    pub(crate) slot: usize,
}

impl UniformHandle {
    pub(crate) fn new(slot: usize) -> Self {
        debug_assert!(slot < MAX_UNIFORM_SLOTS);
        Self { slot }
    }
}

/// Table of the per-draw uniform names a program declares, in slot order.
///
/// Slot `n` is component `n` of the instance record, so the order here must
/// match the order in which the vertex stage reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformSlots {
    names: Vec<&'static str>,
}

impl UniformSlots {
    pub fn new(names: &[&'static str]) -> Result<Self> {
        anyhow::ensure!(
            names.len() <= MAX_UNIFORM_SLOTS,
            "{} uniforms declared, at most {MAX_UNIFORM_SLOTS} supported",
            names.len()
        );
        for (i, name) in names.iter().enumerate() {
            anyhow::ensure!(!names[..i].contains(name), "uniform '{name}' declared twice");
        }
        Ok(Self { names: names.to_vec() })
    }

    /// Looks up a uniform by name.
    pub fn resolve(&self, name: &str) -> Result<UniformHandle> {
        self.names
            .iter()
            .position(|n| *n == name)
            .map(UniformHandle::new)
            .ok_or_else(|| anyhow::anyhow!("shader program has no uniform named '{name}'"))
    }

    pub fn names(&self) -> &[&'static str] {
        &self.names
    }
}

/// Values of every per-draw uniform as seen by one draw call.
///
/// Uploaded verbatim as one instance record (`vec4<f32>` at location 2).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct UniformBlock {
    pub values: [f32; MAX_UNIFORM_SLOTS],
}

impl UniformBlock {
    pub fn get(&self, handle: UniformHandle) -> f32 {
        self.values[handle.slot]
    }

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x4];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<UniformBlock>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRS,
        }
    }
}

/// Receiver of uniform updates and draw submissions.
///
/// Semantics follow a GL program object: a uniform keeps its value until it
/// is set again, and each `draw` uses the values current at the call.
pub trait DrawSink {
    /// Sets the extent of one cell of the unit mesh, shared by every draw in
    /// the frame.
    fn set_cell_extent(&mut self, width: f32, height: f32);

    fn set_uniform(&mut self, handle: UniformHandle, value: f32);

    /// Submits one draw of the bound mesh.
    fn draw(&mut self);
}

/// CPU-side [`DrawSink`] that snapshots the uniform state at every draw.
///
/// The recorded blocks become the per-draw instance stream consumed by
/// [`ShaderProgram::draw`](super::ShaderProgram::draw).
#[derive(Debug, Default, Clone)]
pub struct DrawRecorder {
    current: UniformBlock,
    cell_extent: [f32; 2],
    draws: Vec<UniformBlock>,
}

impl DrawRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded draws and zeroes every uniform.
    pub fn reset(&mut self) {
        self.current = UniformBlock::default();
        self.cell_extent = [0.0; 2];
        self.draws.clear();
    }

    /// Uniform values in effect for the next draw.
    pub fn current(&self) -> &UniformBlock {
        &self.current
    }

    pub fn cell_extent(&self) -> [f32; 2] {
        self.cell_extent
    }

    /// One entry per `draw()` since the last reset, in submission order.
    pub fn draws(&self) -> &[UniformBlock] {
        &self.draws
    }

    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }
}

impl DrawSink for DrawRecorder {
    fn set_cell_extent(&mut self, width: f32, height: f32) {
        self.cell_extent = [width, height];
    }

    fn set_uniform(&mut self, handle: UniformHandle, value: f32) {
        self.current.values[handle.slot] = value;
    }

    fn draw(&mut self) {
        self.draws.push(self.current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(slot: usize) -> UniformHandle {
        UniformHandle::new(slot)
    }

    // ── slots ─────────────────────────────────────────────────────────────

    #[test]
    fn resolve_by_declared_order() {
        let slots = UniformSlots::new(&["a", "b", "c"]).unwrap();
        assert_eq!(slots.resolve("a").unwrap(), h(0));
        assert_eq!(slots.resolve("c").unwrap(), h(2));
    }

    #[test]
    fn resolve_unknown_name_fails() {
        let slots = UniformSlots::new(&["a"]).unwrap();
        let err = slots.resolve("missing").unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn too_many_or_duplicate_slots_rejected() {
        assert!(UniformSlots::new(&["a", "b", "c", "d", "e"]).is_err());
        assert!(UniformSlots::new(&["a", "a"]).is_err());
    }

    // ── recorder ──────────────────────────────────────────────────────────

    #[test]
    fn draw_captures_current_values() {
        let mut rec = DrawRecorder::new();
        rec.set_uniform(h(0), 1.5);
        rec.draw();
        rec.set_uniform(h(0), 2.5);
        rec.draw();

        assert_eq!(rec.draw_count(), 2);
        assert_eq!(rec.draws()[0].get(h(0)), 1.5);
        assert_eq!(rec.draws()[1].get(h(0)), 2.5);
    }

    #[test]
    fn values_persist_across_draws() {
        let mut rec = DrawRecorder::new();
        rec.set_uniform(h(1), -3.0);
        rec.draw();
        rec.set_uniform(h(2), 7.0);
        rec.draw();

        assert_eq!(rec.draws()[1].values, [0.0, -3.0, 7.0, 0.0]);
    }

    #[test]
    fn update_after_draw_only_affects_later_draws() {
        let mut rec = DrawRecorder::new();
        rec.draw();
        rec.set_uniform(h(0), 9.0);

        assert_eq!(rec.draws()[0].get(h(0)), 0.0);
        assert_eq!(rec.current().get(h(0)), 9.0);
    }

    #[test]
    fn reset_zeroes_state() {
        let mut rec = DrawRecorder::new();
        rec.set_cell_extent(0.5, 0.25);
        rec.set_uniform(h(3), 4.0);
        rec.draw();

        rec.reset();
        assert_eq!(rec.draw_count(), 0);
        assert_eq!(rec.current(), &UniformBlock::default());
        assert_eq!(rec.cell_extent(), [0.0, 0.0]);
    }

    #[test]
    fn block_is_one_vec4() {
        assert_eq!(std::mem::size_of::<UniformBlock>(), 16);
        assert_eq!(UniformBlock::layout().step_mode, wgpu::VertexStepMode::Instance);
    }
}
