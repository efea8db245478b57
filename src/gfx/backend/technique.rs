//! GPU shading techniques
//!
//! A [`GpuTechnique`] is one render pipeline plus a pool of per-draw uniform
//! slots. Uniform uploads go through the queue, and every upload enqueued
//! during pass recording lands before the pass executes — a single buffer
//! shared across draws would hold only the last upload by the time any draw
//! runs. Each draw therefore gets its own slot (buffer + bind group), picked
//! by the frame encoder's draw counter; the pool grows to the deepest draw
//! count ever seen and is rewritten every frame.

use super::{FrameEncoder, Vertex3D};
use crate::gfx::frame::DrawUniforms;
use crate::gfx::traits::Technique;

pub const DEFAULT_SHADER: &str = include_str!("shader.wgsl");

/// Pipeline parameters, builder style.
#[derive(Debug, Clone)]
pub struct TechniqueConfig<'a> {
    pub label: &'a str,
    pub shader: &'a str,
    pub color_format: wgpu::TextureFormat,
    pub depth_format: Option<wgpu::TextureFormat>,
    pub cull_mode: Option<wgpu::Face>,
}

impl Default for TechniqueConfig<'_> {
    fn default() -> Self {
        Self {
            label: "technique",
            shader: DEFAULT_SHADER,
            color_format: wgpu::TextureFormat::Bgra8UnormSrgb,
            depth_format: Some(wgpu::TextureFormat::Depth32Float),
            cull_mode: Some(wgpu::Face::Back),
        }
    }
}

impl<'a> TechniqueConfig<'a> {
    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }

    pub fn with_shader(mut self, shader: &'a str) -> Self {
        self.shader = shader;
        self
    }

    pub fn with_color_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.color_format = format;
        self
    }

    pub fn with_depth_format(mut self, format: Option<wgpu::TextureFormat>) -> Self {
        self.depth_format = format;
        self
    }

    pub fn with_cull_mode(mut self, cull_mode: Option<wgpu::Face>) -> Self {
        self.cull_mode = cull_mode;
        self
    }
}

/// Uniform block layout shared with `shader.wgsl`. The vec3 camera position
/// and the f32 elapsed pack into one 16-byte slot.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct TechniqueUniforms {
    world: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    camera_position: [f32; 3],
    elapsed: f32,
}

impl From<&DrawUniforms> for TechniqueUniforms {
    fn from(uniforms: &DrawUniforms) -> Self {
        Self {
            world: uniforms.world.into(),
            view: uniforms.view.into(),
            projection: uniforms.projection.into(),
            camera_position: uniforms.camera_position.into(),
            elapsed: uniforms.elapsed,
        }
    }
}

/// One draw's worth of uniform storage.
struct UniformSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuTechnique {
    device: wgpu::Device,
    label: String,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    slots: Vec<UniformSlot>,
}

impl GpuTechnique {
    pub fn new(device: &wgpu::Device, config: &TechniqueConfig) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(config.label),
            source: wgpu::ShaderSource::Wgsl(config.shader.into()),
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{} bind group layout", config.label)),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} pipeline layout", config.label)),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(config.label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex3D::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: config.cull_mode,
                front_face: wgpu::FrontFace::Ccw,
                ..Default::default()
            },
            depth_stencil: config.depth_format.map(|format| wgpu::DepthStencilState {
                format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            device: device.clone(),
            label: config.label.to_owned(),
            pipeline,
            bind_group_layout,
            slots: Vec::new(),
        }
    }

    /// Number of per-draw uniform slots allocated so far.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn ensure_slot(&mut self, index: usize) -> &UniformSlot {
        while self.slots.len() <= index {
            let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&format!("{} uniforms [{}]", self.label, self.slots.len())),
                size: std::mem::size_of::<TechniqueUniforms>() as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("{} bind group [{}]", self.label, self.slots.len())),
                layout: &self.bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });
            self.slots.push(UniformSlot { buffer, bind_group });
        }
        &self.slots[index]
    }
}

impl Technique<FrameEncoder> for GpuTechnique {
    fn activate(&mut self, sink: &mut FrameEncoder) {
        sink.pass.set_pipeline(&self.pipeline);
    }

    fn set_uniforms(&mut self, sink: &mut FrameEncoder, uniforms: &DrawUniforms) {
        let slot = self.ensure_slot(sink.next_draw_slot() as usize);
        let packed = TechniqueUniforms::from(uniforms);
        sink.queue
            .write_buffer(&slot.buffer, 0, bytemuck::bytes_of(&packed));
        sink.pass.set_bind_group(0, &slot.bind_group, &[]);
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Matrix4, Point3, SquareMatrix};

    use super::*;

    #[test]
    fn uniform_block_has_std140_friendly_size() {
        // Three mat4x4 plus one vec3+f32 slot.
        assert_eq!(std::mem::size_of::<TechniqueUniforms>(), 3 * 64 + 16);
    }

    #[test]
    fn packing_preserves_elapsed_and_camera() {
        let uniforms = DrawUniforms {
            world: Matrix4::identity(),
            view: Matrix4::identity(),
            projection: Matrix4::identity(),
            camera_position: Point3::new(1.0, 2.0, 3.0),
            elapsed: 4.5,
        };
        let packed = TechniqueUniforms::from(&uniforms);
        assert_eq!(packed.camera_position, [1.0, 2.0, 3.0]);
        assert_eq!(packed.elapsed, 4.5);
        assert_eq!(packed.world[3], [0.0, 0.0, 0.0, 1.0]);
    }
}
