//! The shared quad mesh and the program that draws it.

use anyhow::Result;

use flashgrid_engine::render::{
    DrawRecorder, GeometryBuffer, RenderCtx, RenderTarget, ShaderProgram, ShaderSources, Vertex,
};

use crate::grid::GridUniforms;

/// Unit quad over [-1, 1] x [-1, 1]. Positions, then colors.
pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex::new([-1.0, 1.0, 0.0], [0.3, 0.0, 1.0]),
    Vertex::new([1.0, 1.0, 0.0], [0.9, 0.1, 0.9]),
    Vertex::new([-1.0, -1.0, 0.0], [0.9, 0.1, 0.9]),
    Vertex::new([1.0, -1.0, 0.0], [0.9, 0.1, 0.9]),
];

/// Two triangles over the four corners.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 1, 3];

pub const UNIFORM_MOVE_X: &str = "moveX";
pub const UNIFORM_MOVE_Y: &str = "moveY";
pub const UNIFORM_COLOR: &str = "myColor";

/// Slot order read by `default.vert.wgsl` from its per-draw record.
const UNIFORMS: [&str; 3] = [UNIFORM_MOVE_X, UNIFORM_MOVE_Y, UNIFORM_COLOR];

const SOURCES: ShaderSources<'static> = ShaderSources {
    vertex: include_str!("../shaders/default.vert.wgsl"),
    fragment: include_str!("../shaders/default.frag.wgsl"),
};

/// GPU resources created once at startup and released on drop.
pub struct QuadScene {
    geometry: GeometryBuffer,
    program: ShaderProgram,
    uniforms: GridUniforms,
}

impl QuadScene {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Result<Self> {
        let program = ShaderProgram::new(device, format, "flashgrid default", SOURCES, &UNIFORMS)?;

        let uniforms = GridUniforms {
            move_x: program.uniform_location(UNIFORM_MOVE_X)?,
            move_y: program.uniform_location(UNIFORM_MOVE_Y)?,
            color: program.uniform_location(UNIFORM_COLOR)?,
        };

        let geometry = GeometryBuffer::new(device, "flashgrid quad", &QUAD_VERTICES, &QUAD_INDICES);

        Ok(Self {
            geometry,
            program,
            uniforms,
        })
    }

    pub fn uniforms(&self) -> GridUniforms {
        self.uniforms
    }

    pub fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, recorder: &DrawRecorder) {
        self.program.draw(ctx, target, &self.geometry, recorder);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashgrid_engine::render::UniformSlots;

    #[test]
    fn quad_spans_unit_square() {
        for v in QUAD_VERTICES {
            assert_eq!(v.position[0].abs(), 1.0);
            assert_eq!(v.position[1].abs(), 1.0);
            assert_eq!(v.position[2], 0.0);
        }
    }

    #[test]
    fn indices_cover_both_triangles() {
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD_VERTICES.len()));
        let mut used = QUAD_INDICES.to_vec();
        used.sort_unstable();
        used.dedup();
        assert_eq!(used, vec![0, 1, 2, 3]);
    }

    #[test]
    fn uniform_names_resolve() {
        let slots = UniformSlots::new(&UNIFORMS).unwrap();
        assert!(slots.resolve(UNIFORM_MOVE_X).is_ok());
        assert!(slots.resolve(UNIFORM_MOVE_Y).is_ok());
        assert!(slots.resolve(UNIFORM_COLOR).is_ok());
        assert!(slots.resolve("model").is_err());
    }

    #[test]
    fn shaders_read_declared_uniforms() {
        assert!(SOURCES.vertex.contains("fn vs_main"));
        assert!(SOURCES.fragment.contains("fn fs_main"));
        for name in UNIFORMS {
            assert!(SOURCES.vertex.contains(name), "vertex stage does not mention {name}");
        }
    }
}
