//! Planet render pipelines, one per primitive topology.
//!
//! All three share a shader module, vertex layout, bind group layout and a
//! single uniform buffer, so switching draw modes is just picking another
//! pipeline. Points and lines are drawn flat in the vertex color; triangles
//! get Lambert shading from the rotated vertex normal.

use bytemuck::{Pod, Zeroable};
use std::num::NonZeroU64;

use planetgen_mesh::PLANET_VERTEX_LAYOUT;

use crate::buffer::PlanetBuffers;

/// Per-frame uniforms.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PlanetUniform {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// Direction towards the light in `xyz`, ambient term in `w`.
    pub light_dir: [f32; 4],
}

static_assertions::const_assert_eq!(std::mem::size_of::<PlanetUniform>(), 144);

impl PlanetUniform {
    pub const DEFAULT_LIGHT_DIR: [f32; 3] = [0.4, 0.6, 0.7];
    pub const DEFAULT_AMBIENT: f32 = 0.25;

    pub fn new(view_proj: glam::Mat4, model: glam::Mat4) -> Self {
        let dir = glam::Vec3::from(Self::DEFAULT_LIGHT_DIR).normalize();
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            light_dir: [dir.x, dir.y, dir.z, Self::DEFAULT_AMBIENT],
        }
    }
}

impl Default for PlanetUniform {
    fn default() -> Self {
        Self::new(glam::Mat4::IDENTITY, glam::Mat4::IDENTITY)
    }
}

pub struct PlanetPipelines {
    pub points: wgpu::RenderPipeline,
    pub lines: wgpu::RenderPipeline,
    pub triangles: wgpu::RenderPipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    /// Depth state shared by all three pipelines, `None` when drawing without depth.
    pub depth_stencil: Option<wgpu::DepthStencilState>,
}

impl PlanetPipelines {
    /// Build the three pipelines. Pass [`DepthBuffer::stencil_state`](crate::DepthBuffer::stencil_state)
    /// when rendering into a [`DepthBuffer`](crate::DepthBuffer).
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        depth_stencil: Option<wgpu::DepthStencilState>,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("planet-shader"),
            source: wgpu::ShaderSource::Wgsl(PLANET_SHADER_SOURCE.into()),
        });

        let uniform_size = std::mem::size_of::<PlanetUniform>() as u64;
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("planet-bind-group-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(uniform_size),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("planet-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("planet-uniforms"),
            size: uniform_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("planet-bind-group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let build = |label, topology, fs_entry| {
            create_pipeline(
                device,
                &pipeline_layout,
                &shader,
                PipelineTarget {
                    label,
                    topology,
                    fs_entry,
                    surface_format,
                    depth_stencil: depth_stencil.clone(),
                },
            )
        };

        Self {
            points: build(
                "planet-points-pipeline",
                wgpu::PrimitiveTopology::PointList,
                "fs_flat",
            ),
            lines: build(
                "planet-lines-pipeline",
                wgpu::PrimitiveTopology::LineList,
                "fs_flat",
            ),
            triangles: build(
                "planet-triangles-pipeline",
                wgpu::PrimitiveTopology::TriangleList,
                "fs_lit",
            ),
            bind_group_layout,
            uniform_buffer,
            bind_group,
            depth_stencil,
        }
    }

    /// Pipeline for `topology`. Strip topologies fall back to their list counterparts.
    pub fn get(&self, topology: wgpu::PrimitiveTopology) -> &wgpu::RenderPipeline {
        match topology {
            wgpu::PrimitiveTopology::PointList => &self.points,
            wgpu::PrimitiveTopology::LineList | wgpu::PrimitiveTopology::LineStrip => &self.lines,
            wgpu::PrimitiveTopology::TriangleList | wgpu::PrimitiveTopology::TriangleStrip => {
                &self.triangles
            }
        }
    }

    pub fn write_uniform(&self, queue: &wgpu::Queue, uniform: &PlanetUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniform));
    }

    /// Draw `buffers` with the pipeline matching `topology`.
    pub fn draw<'a>(
        &'a self,
        pass: &mut wgpu::RenderPass<'a>,
        buffers: &'a PlanetBuffers,
        topology: wgpu::PrimitiveTopology,
    ) {
        pass.set_pipeline(self.get(topology));
        pass.set_bind_group(0, &self.bind_group, &[]);
        buffers.draw(pass, topology);
    }
}

struct PipelineTarget {
    label: &'static str,
    topology: wgpu::PrimitiveTopology,
    fs_entry: &'static str,
    surface_format: wgpu::TextureFormat,
    depth_stencil: Option<wgpu::DepthStencilState>,
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    target: PipelineTarget,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(target.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[PLANET_VERTEX_LAYOUT],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: target.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // No culling; the depth test resolves visibility.
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: target.depth_stencil,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(target.fs_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: target.surface_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        multiview_mask: None,
        cache: None,
    })
}

/// WGSL source shared by all planet pipelines.
pub const PLANET_SHADER_SOURCE: &str = r#"
struct PlanetUniform {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    light_dir: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: PlanetUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) color: vec3<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world = uniforms.model * vec4<f32>(in.position, 1.0);
    out.clip_position = uniforms.view_proj * world;
    // Rotation only, so the upper 3x3 of the model matrix is fine for normals.
    out.normal = (uniforms.model * vec4<f32>(in.normal, 0.0)).xyz;
    out.color = in.color;
    return out;
}

@fragment
fn fs_flat(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}

@fragment
fn fs_lit(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let l = normalize(uniforms.light_dir.xyz);
    let ambient = uniforms.light_dir.w;
    let diffuse = max(dot(n, l), 0.0);
    return vec4<f32>(in.color * (ambient + (1.0 - ambient) * diffuse), 1.0);
}
"#;
