use fnv::FnvHashMap;
use std::cell::RefCell;
use std::rc::Rc;

mod pipeline;
mod surface;
mod texture;

pub use surface::GpuEffectSurface;

// ===================== Shared WebGPU device =====================

/// One adapter/device pair shared by every tile surface, plus the resources
/// that do not depend on a particular canvas.
pub struct GpuContext {
    instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    shader: wgpu::ShaderModule,
    sampler: wgpu::Sampler,
    // Surfaces may report different preferred formats
    pipelines: RefCell<FnvHashMap<wgpu::TextureFormat, Rc<wgpu::RenderPipeline>>>,
}

impl GpuContext {
    pub async fn new() -> anyhow::Result<Self> {
        let instance = wgpu::Instance::default();
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("fisheye_device"),
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        device.on_uncaptured_error(Box::new(|e| {
            log::error!("[gpu] {e}");
        }));

        let bind_group_layout = pipeline::create_bind_group_layout(&device);
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("fisheye_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("fisheye_shader"),
            source: wgpu::ShaderSource::Wgsl(fisheye_core::FISHEYE_WGSL.into()),
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("image_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        log::info!("[gpu] device ready: {:?}", adapter.get_info().backend);

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
            bind_group_layout,
            pipeline_layout,
            shader,
            sampler,
            pipelines: RefCell::new(FnvHashMap::default()),
        })
    }

    /// Render pipeline targeting `format`, built on first use.
    pub(crate) fn pipeline_for(&self, format: wgpu::TextureFormat) -> Rc<wgpu::RenderPipeline> {
        self.pipelines
            .borrow_mut()
            .entry(format)
            .or_insert_with(|| {
                Rc::new(pipeline::create_fisheye_pipeline(
                    &self.device,
                    &self.pipeline_layout,
                    &self.shader,
                    format,
                ))
            })
            .clone()
    }
}
