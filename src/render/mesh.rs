use folio_core::{Camera, MeshVertex};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use super::helpers::{make_pipeline, uniform_layout, DepthMode, PipelineDesc, UniformBinding};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MeshUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    light_pos: [f32; 4],
    light_color: [f32; 4],
}

/// Point light plus ambient term fed to the mesh shader.
#[derive(Clone, Copy, Debug)]
pub struct Lighting {
    pub position: Vec3,
    pub intensity: f32,
    pub color: [f32; 3],
    pub ambient: f32,
}

const MESH_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x4];

/// Indexed geometry uploaded once.
pub struct MeshBuffers {
    vb: wgpu::Buffer,
    ib: wgpu::Buffer,
    index_count: u32,
}

impl MeshBuffers {
    pub fn upload(
        device: &wgpu::Device,
        label: &str,
        vertices: &[MeshVertex],
        indices: &[u32],
    ) -> Self {
        let vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vb,
            ib,
            index_count: indices.len() as u32,
        }
    }
}

/// Lit vertex-colored meshes. Opaque geometry writes depth; translucent
/// geometry (water) blends over it without writing depth.
pub struct MeshPass {
    opaque: wgpu::RenderPipeline,
    translucent: wgpu::RenderPipeline,
    uniforms: UniformBinding,
}

impl MeshPass {
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(folio_core::MESH_WGSL)),
        });
        let layout = uniform_layout(device, "mesh_bgl");
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pipeline_layout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });
        let buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &MESH_ATTRS,
        }];
        let opaque = make_pipeline(
            device,
            PipelineDesc {
                label: "mesh_opaque_pipeline",
                layout: &pipeline_layout,
                shader: &shader,
                buffers: &buffers,
                color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                depth: DepthMode::TestWrite,
                cull_mode: Some(wgpu::Face::Back),
            },
        );
        let translucent = make_pipeline(
            device,
            PipelineDesc {
                label: "mesh_translucent_pipeline",
                layout: &pipeline_layout,
                shader: &shader,
                buffers: &buffers,
                color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                depth: DepthMode::TestOnly,
                cull_mode: None,
            },
        );
        let uniforms = UniformBinding::new(
            device,
            &layout,
            "mesh_uniforms",
            std::mem::size_of::<MeshUniforms>() as u64,
        );
        Self {
            opaque,
            translucent,
            uniforms,
        }
    }

    pub fn write_uniforms(
        &self,
        queue: &wgpu::Queue,
        camera: &Camera,
        model: Mat4,
        light: Lighting,
    ) {
        let u = MeshUniforms {
            view_proj: camera.view_proj().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            light_pos: light.position.extend(light.intensity).to_array(),
            light_color: [light.color[0], light.color[1], light.color[2], light.ambient],
        };
        queue.write_buffer(&self.uniforms.buffer, 0, bytemuck::bytes_of(&u));
    }

    pub fn draw_opaque(&self, rpass: &mut wgpu::RenderPass<'_>, mesh: &MeshBuffers) {
        self.draw_with(rpass, &self.opaque, mesh);
    }

    pub fn draw_translucent(&self, rpass: &mut wgpu::RenderPass<'_>, mesh: &MeshBuffers) {
        self.draw_with(rpass, &self.translucent, mesh);
    }

    fn draw_with(
        &self,
        rpass: &mut wgpu::RenderPass<'_>,
        pipeline: &wgpu::RenderPipeline,
        mesh: &MeshBuffers,
    ) {
        if mesh.index_count == 0 {
            return;
        }
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &self.uniforms.bind_group, &[]);
        rpass.set_vertex_buffer(0, mesh.vb.slice(..));
        rpass.set_index_buffer(mesh.ib.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}
