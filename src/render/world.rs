use folio_core::{
    WorldFrame, WorldGeometry, AMBIENT_LIGHT, HOVER_BRIGHTEN, LIGHT_INTENSITY, MARKER_COLOR,
    MARKER_SIZE, SUN_COLOR, SUN_SIZE,
};
use glam::Mat4;

use super::billboard::{BillboardBatch, BillboardInstance, BillboardPass};
use super::helpers::{create_depth_texture, DepthMode};
use super::mesh::{Lighting, MeshBuffers, MeshPass};
use super::GpuContext;
use crate::constants::{SUN_LIGHT_COLOR, WORLD_CLEAR};

/// Terrain, water, beacons and the sun, depth tested against each other.
pub struct WorldRenderer {
    gpu: GpuContext,
    _depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,
    mesh_pass: MeshPass,
    terrain: MeshBuffers,
    water: MeshBuffers,
    billboards: BillboardPass,
    markers: BillboardBatch,
    sun: BillboardBatch,
    marker_instances: Vec<BillboardInstance>,
}

fn brighten(color: [f32; 4], k: f32) -> [f32; 4] {
    [
        (color[0] * k).min(1.0),
        (color[1] * k).min(1.0),
        (color[2] * k).min(1.0),
        color[3],
    ]
}

impl WorldRenderer {
    pub fn new(gpu: GpuContext, geometry: &WorldGeometry) -> Self {
        let (width, height) = gpu.size();
        let (depth_tex, depth_view) = create_depth_texture(&gpu.device, width, height);
        let mesh_pass = MeshPass::new(&gpu.device, gpu.format());
        let terrain = MeshBuffers::upload(
            &gpu.device,
            "terrain_mesh",
            &geometry.terrain.mesh,
            &geometry.terrain.indices,
        );
        let water = MeshBuffers::upload(
            &gpu.device,
            "water_mesh",
            &geometry.water_vertices,
            &geometry.water_indices,
        );
        let billboards = BillboardPass::new(&gpu.device, gpu.format(), DepthMode::TestOnly);
        let markers = billboards.batch(&gpu.device, "marker_batch", geometry.markers.len());
        let sun = billboards.batch(&gpu.device, "sun_batch", 1);
        let marker_instances = geometry
            .markers
            .iter()
            .map(|m| BillboardInstance::new(m.world_position, MARKER_SIZE, MARKER_COLOR))
            .collect();
        log::info!(
            "[gpu] world buffers: {} terrain indices, {} markers",
            geometry.terrain.indices.len(),
            geometry.markers.len()
        );
        Self {
            gpu,
            _depth_tex: depth_tex,
            depth_view,
            mesh_pass,
            terrain,
            water,
            billboards,
            markers,
            sun,
            marker_instances,
        }
    }

    pub fn render(&mut self, frame: &WorldFrame) {
        let Some((surface_tex, view)) = self.gpu.acquire() else {
            return;
        };
        let queue = &self.gpu.queue;

        self.mesh_pass.write_uniforms(
            queue,
            &frame.camera,
            frame.group,
            Lighting {
                position: frame.sun_position,
                intensity: LIGHT_INTENSITY,
                color: SUN_LIGHT_COLOR,
                ambient: AMBIENT_LIGHT,
            },
        );

        let mut instances = self.marker_instances.clone();
        if let Some(inst) = frame.hovered.and_then(|i| instances.get_mut(i)) {
            inst.color = brighten(inst.color, HOVER_BRIGHTEN);
            inst.size *= HOVER_BRIGHTEN;
        }
        self.markers.write_instances(queue, &instances);
        self.markers.write_transform(queue, &frame.camera, frame.group);

        self.sun.write_instances(
            queue,
            &[BillboardInstance::new(frame.sun_position, SUN_SIZE, SUN_COLOR)],
        );
        self.sun.write_transform(queue, &frame.camera, Mat4::IDENTITY);

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("world_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("world_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(WORLD_CLEAR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            // opaque first, then blended geometry back to front
            self.mesh_pass.draw_opaque(&mut rpass, &self.terrain);
            self.billboards.draw(&mut rpass, &self.sun);
            self.mesh_pass.draw_translucent(&mut rpass, &self.water);
            self.billboards.draw(&mut rpass, &self.markers);
        }
        self.gpu.queue.submit(Some(encoder.finish()));
        surface_tex.present();
    }
}
