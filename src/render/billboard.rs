use folio_core::Camera;
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use super::helpers::{make_pipeline, uniform_layout, DepthMode, PipelineDesc, UniformBinding};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BillboardInstance {
    pub center: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

impl BillboardInstance {
    pub fn new(center: Vec3, size: f32, color: [f32; 4]) -> Self {
        Self {
            center: center.to_array(),
            size,
            color,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct BillboardUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
}

const QUAD_CORNERS: [[f32; 2]; 6] = [
    [-0.5, -0.5],
    [0.5, -0.5],
    [0.5, 0.5],
    [-0.5, -0.5],
    [0.5, 0.5],
    [-0.5, 0.5],
];

const CORNER_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const INSTANCE_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![1 => Float32x3, 2 => Float32, 3 => Float32x4];

/// Alpha-blended camera-facing quads drawn with instancing.
pub struct BillboardPass {
    pipeline: wgpu::RenderPipeline,
    layout: wgpu::BindGroupLayout,
    quad_vb: wgpu::Buffer,
}

impl BillboardPass {
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat, depth: DepthMode) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("billboard_shader"),
            source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(
                folio_core::BILLBOARD_WGSL,
            )),
        });
        let layout = uniform_layout(device, "billboard_bgl");
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("billboard_pipeline_layout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });
        let buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &CORNER_ATTRS,
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<BillboardInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &INSTANCE_ATTRS,
            },
        ];
        let pipeline = make_pipeline(
            device,
            PipelineDesc {
                label: "billboard_pipeline",
                layout: &pipeline_layout,
                shader: &shader,
                buffers: &buffers,
                color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                depth,
                cull_mode: None,
            },
        );
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("billboard_quad_vb"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            pipeline,
            layout,
            quad_vb,
        }
    }

    pub fn batch(&self, device: &wgpu::Device, label: &str, capacity: usize) -> BillboardBatch {
        let uniforms = UniformBinding::new(
            device,
            &self.layout,
            label,
            std::mem::size_of::<BillboardUniforms>() as u64,
        );
        let instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity.max(1) * std::mem::size_of::<BillboardInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        BillboardBatch {
            uniforms,
            instance_vb,
            capacity,
            count: 0,
        }
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, batch: &BillboardBatch) {
        if batch.count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &batch.uniforms.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        rpass.set_vertex_buffer(1, batch.instance_vb.slice(..));
        rpass.draw(0..QUAD_CORNERS.len() as u32, 0..batch.count);
    }
}

/// One instanced draw: its own transform and instance data.
pub struct BillboardBatch {
    uniforms: UniformBinding,
    instance_vb: wgpu::Buffer,
    capacity: usize,
    count: u32,
}

impl BillboardBatch {
    pub fn write_instances(&mut self, queue: &wgpu::Queue, instances: &[BillboardInstance]) {
        let n = instances.len().min(self.capacity);
        if n < instances.len() {
            log::warn!(
                "[gpu] billboard batch holds {} instances, dropping {}",
                self.capacity,
                instances.len() - n
            );
        }
        if n > 0 {
            queue.write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(&instances[..n]));
        }
        self.count = n as u32;
    }

    pub fn write_transform(&self, queue: &wgpu::Queue, camera: &Camera, model: Mat4) {
        let (right, up) = camera.billboard_axes();
        let u = BillboardUniforms {
            view_proj: camera.view_proj().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            cam_right: right.extend(0.0).to_array(),
            cam_up: up.extend(0.0).to_array(),
        };
        queue.write_buffer(&self.uniforms.buffer, 0, bytemuck::bytes_of(&u));
    }
}
