use anyhow::Result;
use bytemuck::{Pod, Zeroable};

use super::geometry::{GeometryBuffer, Vertex};
use super::uniforms::{DrawRecorder, UniformBlock, UniformHandle, UniformSlots};
use super::{RenderCtx, RenderTarget};

/// WGSL sources for the two stages of a program.
///
/// The vertex source must define `vs_main`, the fragment source `fs_main`;
/// inter-stage locations must agree between the two.
#[derive(Debug, Copy, Clone)]
pub struct ShaderSources<'a> {
    pub vertex: &'a str,
    pub fragment: &'a str,
}

/// Frame-level uniform block (group 0, binding 0).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CellExtentUniform {
    extent: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

/// A linked vertex + fragment program with named per-draw scalar uniforms.
///
/// Pipeline layout:
/// - vertex buffer 0: [`Vertex`] (per-vertex)
/// - vertex buffer 1: [`UniformBlock`] (per-instance, one record per draw)
/// - group 0 binding 0: cell extent, written once per frame
///
/// Built once for a fixed surface format; resources are released on drop.
pub struct ShaderProgram {
    label: String,
    slots: UniformSlots,

    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    extent_ubo: wgpu::Buffer,

    draw_vbo: Option<wgpu::Buffer>,
    draw_capacity: usize,
}

impl ShaderProgram {
    /// Compiles both stages and links them into a pipeline for `format`.
    ///
    /// `uniforms` names the per-draw scalar uniforms in the order the vertex
    /// stage reads them from its instance record.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        label: &str,
        sources: ShaderSources<'_>,
        uniforms: &[&'static str],
    ) -> Result<Self> {
        let slots = UniformSlots::new(uniforms)?;

        let vs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{label} vertex")),
            source: wgpu::ShaderSource::Wgsl(sources.vertex.into()),
        });
        let fs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{label} fragment")),
            source: wgpu::ShaderSource::Wgsl(sources.fragment.into()),
        });

        let min_binding_size =
            std::num::NonZeroU64::new(std::mem::size_of::<CellExtentUniform>() as u64);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{label} bgl")),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{label} pipeline layout")),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{label} pipeline")),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout(), UniformBlock::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let extent_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} cell extent ubo")),
            size: std::mem::size_of::<CellExtentUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} bind group")),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: extent_ubo.as_entire_binding(),
            }],
        });

        log::debug!("program '{label}' linked with uniforms {:?}", slots.names());

        Ok(Self {
            label: label.to_string(),
            slots,
            pipeline,
            bind_group,
            extent_ubo,
            draw_vbo: None,
            draw_capacity: 0,
        })
    }

    /// Resolves a per-draw uniform by name.
    pub fn uniform_location(&self, name: &str) -> Result<UniformHandle> {
        self.slots.resolve(name)
    }

    /// Encodes one render pass issuing one indexed draw of `geometry` per
    /// recorded draw, each fed its own uniform snapshot.
    pub fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        geometry: &GeometryBuffer,
        recorder: &DrawRecorder,
    ) {
        let draws = recorder.draws();
        if draws.is_empty() {
            return;
        }

        let [w, h] = recorder.cell_extent();
        let extent = CellExtentUniform {
            extent: [w, h],
            _pad: [0.0; 2],
        };
        ctx.queue.write_buffer(&self.extent_ubo, 0, bytemuck::bytes_of(&extent));

        self.ensure_draw_capacity(ctx.device, draws.len());
        let Some(draw_vbo) = self.draw_vbo.as_ref() else { return };
        ctx.queue.write_buffer(draw_vbo, 0, bytemuck::cast_slice(draws));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(&self.label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let [vw, vh] = ctx.full_viewport();
        rpass.set_viewport(0.0, 0.0, vw, vh, 0.0, 1.0);

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        geometry.bind(&mut rpass);
        rpass.set_vertex_buffer(1, draw_vbo.slice(..));

        let indices = 0..geometry.index_count();
        for i in 0..draws.len() as u32 {
            rpass.draw_indexed(indices.clone(), 0, i..i + 1);
        }
    }

    fn ensure_draw_capacity(&mut self, device: &wgpu::Device, required: usize) {
        if required <= self.draw_capacity && self.draw_vbo.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(64);
        self.draw_vbo = Some(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} per-draw uniforms", self.label)),
            size: (new_cap * std::mem::size_of::<UniformBlock>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.draw_capacity = new_cap;
        log::debug!("program '{}' per-draw capacity -> {new_cap}", self.label);
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        log::debug!("program '{}' released", self.label);
    }
}
