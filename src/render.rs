use web_sys as web;

pub mod billboard;
pub mod helpers;
pub mod mesh;
pub mod particles;
pub mod world;

pub use particles::ParticleRenderer;
pub use world::WorldRenderer;

/// Surface, device and queue for one canvas.
pub struct GpuContext {
    surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

/// Adapter and device for a canvas whose surface is not configured yet.
///
/// Every surface made from one canvas shares its WebGPU context, so
/// configuring binds that context to this device. Only configure once the
/// activation that asked for the device is known to be live.
pub struct PendingGpu {
    surface: wgpu::Surface<'static>,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    width: u32,
    height: u32,
    started: instant::Instant,
}

impl GpuContext {
    pub async fn request(canvas: &web::HtmlCanvasElement) -> anyhow::Result<PendingGpu> {
        let started = instant::Instant::now();
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface: wgpu::Surface<'static> =
            instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;
        Ok(PendingGpu {
            surface,
            adapter,
            device,
            queue,
            width,
            height,
            started,
        })
    }
}

impl PendingGpu {
    pub fn configure(self) -> anyhow::Result<GpuContext> {
        let caps = self.surface.get_capabilities(&self.adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: self.width,
            height: self.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        self.surface.configure(&self.device, &config);
        log::info!(
            "[gpu] {}x{} {:?} ready in {:?}",
            self.width,
            self.height,
            format,
            self.started.elapsed()
        );
        Ok(GpuContext {
            surface: self.surface,
            device: self.device,
            queue: self.queue,
            config,
        })
    }
}

impl GpuContext {
    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Next swapchain image. Lost or outdated surfaces are reconfigured and
    /// the frame skipped.
    pub fn acquire(&self) -> Option<(wgpu::SurfaceTexture, wgpu::TextureView)> {
        match self.surface.get_current_texture() {
            Ok(frame) => {
                let view = frame
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                Some((frame, view))
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                None
            }
            Err(e) => {
                log::error!("[gpu] surface error: {:?}", e);
                None
            }
        }
    }
}
