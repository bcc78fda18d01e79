//! Fixed pass-through program bound on every frame
//!
//! The vertex stage offsets incoming positions by a 2-D uniform and the
//! fragment stage writes a uniform color. Neither transforms anything else.

use wgpu::{BindGroup, Buffer, Device, RenderPass, RenderPipeline, TextureFormat, util::DeviceExt};

/// WGSL source for both stages
pub const PASS_THROUGH_SHADER: &str = r#"
struct Uniforms {
    offset: vec2<f32>,
    color: vec4<f32>,
}

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@vertex
fn vs_main(@location(0) position: vec4<f32>) -> @builtin(position) vec4<f32> {
    // offset arrives in [0, 1] with y down; clip space spans [-1, 1] with y up
    let offset = vec4<f32>(2.0 * uniforms.offset.x - 1.0, 1.0 - 2.0 * uniforms.offset.y, 0.0, 0.0);
    return position + offset;
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return uniforms.color;
}
"#;

/// Vertices the buffer has room for
const VERTEX_CAPACITY: usize = 3;

/// Uniform block matching `Uniforms` in the shader (vec4 aligns to 16 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    pub offset: [f32; 2],
    _padding: [f32; 2],
    pub color: [f32; 4],
}

impl Uniforms {
    pub fn new(offset: [f32; 2], color: [f32; 4]) -> Self {
        Self {
            offset,
            _padding: [0.0; 2],
            color,
        }
    }
}

impl Default for Uniforms {
    fn default() -> Self {
        Self::new([0.0, 0.0], [1.0, 1.0, 1.0, 1.0])
    }
}

/// Per-vertex layout: one `vec4<f32>` position
fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x4];

    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBS,
    }
}

/// GPU objects of the pass-through program
pub struct PassThroughProgram {
    pipeline: RenderPipeline,
    bind_group: BindGroup,
    uniform_buffer: Buffer,
    vertex_buffer: Buffer,
}

impl PassThroughProgram {
    /// Builds the pipeline and allocates its buffers
    ///
    /// Validation errors surface through the device's error scopes, so callers
    /// wrap this in a validation scope to find out whether it worked.
    pub fn new(device: &Device, format: TextureFormat) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Pass-through Uniform Buffer"),
            contents: bytemuck::cast_slice(&[Uniforms::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Pass-through Vertex Buffer"),
            size: (VERTEX_CAPACITY * std::mem::size_of::<[f32; 4]>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Pass-through Bind Group Layout"),
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

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Pass-through Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Pass-through Shader"),
            source: wgpu::ShaderSource::Wgsl(PASS_THROUGH_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Pass-through Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Pass-through Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group,
            uniform_buffer,
            vertex_buffer,
        }
    }

    /// Uploads new uniform values
    pub fn set_uniforms(&self, queue: &wgpu::Queue, uniforms: Uniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
    }

    /// Makes the program current for the pass
    pub fn bind(&self, rpass: &mut RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
    }

    /// Frees the buffers immediately instead of waiting for the last reference
    pub fn destroy(self) {
        self.uniform_buffer.destroy();
        self.vertex_buffer.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout_matches_wgsl() {
        // offset (8) + padding (8) + color (16)
        assert_eq!(std::mem::size_of::<Uniforms>(), 32);
        assert_eq!(std::mem::offset_of!(Uniforms, color), 16);
    }

    #[test]
    fn test_shader_declares_both_entry_points() {
        assert!(PASS_THROUGH_SHADER.contains("fn vs_main"));
        assert!(PASS_THROUGH_SHADER.contains("fn fs_main"));
        assert!(PASS_THROUGH_SHADER.contains("var<uniform> uniforms"));
    }
}
