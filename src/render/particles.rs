use folio_core::{ParticleCloud, ParticleFrame, PARTICLE_COLOR, PARTICLE_SIZE};

use super::billboard::{BillboardBatch, BillboardInstance, BillboardPass};
use super::helpers::DepthMode;
use super::GpuContext;
use crate::constants::PARTICLE_CLEAR;

/// Draws the point cloud as soft additive-looking dots over a dark clear.
pub struct ParticleRenderer {
    gpu: GpuContext,
    pass: BillboardPass,
    cloud: BillboardBatch,
}

impl ParticleRenderer {
    pub fn new(gpu: GpuContext, cloud: &ParticleCloud) -> Self {
        let pass = BillboardPass::new(&gpu.device, gpu.format(), DepthMode::None);
        let mut batch = pass.batch(&gpu.device, "particle_batch", cloud.len());
        let instances: Vec<BillboardInstance> = cloud
            .positions()
            .iter()
            .map(|p| BillboardInstance::new(*p, PARTICLE_SIZE, PARTICLE_COLOR))
            .collect();
        batch.write_instances(&gpu.queue, &instances);
        Self {
            gpu,
            pass,
            cloud: batch,
        }
    }

    pub fn render(&mut self, frame: &ParticleFrame) {
        let Some((surface_tex, view)) = self.gpu.acquire() else {
            return;
        };
        self.cloud
            .write_transform(&self.gpu.queue, &frame.camera, frame.model);
        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("particle_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("particle_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(PARTICLE_CLEAR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.pass.draw(&mut rpass, &self.cloud);
        }
        self.gpu.queue.submit(Some(encoder.finish()));
        surface_tex.present();
    }
}
