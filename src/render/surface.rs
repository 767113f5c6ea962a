use super::texture::{self, ImageTexture};
use super::GpuContext;
use crate::constants::CANVAS_BASE_STYLE;
use crate::dom;
use fisheye_core::effect::pointer_ndc;
use fisheye_core::{EffectError, EffectSurface, EffectUniforms, LayoutBox, SurfaceInput, SurfaceSize};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// DOM listeners owned by one surface; detached when dropped.
struct SurfaceListeners {
    canvas: web::HtmlCanvasElement,
    mousemove: Closure<dyn FnMut(web::MouseEvent)>,
    observer: web::ResizeObserver,
    _on_resize: Closure<dyn FnMut(js_sys::Array)>,
}

impl SurfaceListeners {
    fn attach(
        canvas: &web::HtmlCanvasElement,
        container: &web::Element,
        input: Rc<RefCell<SurfaceInput>>,
    ) -> Result<Self, EffectError> {
        let canvas_move = canvas.clone();
        let input_move = input.clone();
        let mousemove = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let rect = canvas_move.get_bounding_client_rect();
            let ndc = pointer_ndc(
                Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
                rect.left() as f32,
                rect.top() as f32,
                rect.width() as f32,
                rect.height() as f32,
            );
            input_move.borrow_mut().pointer = Some(ndc);
        }) as Box<dyn FnMut(_)>);
        _ = canvas
            .add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref());

        let on_resize = Closure::wrap(Box::new(move |entries: js_sys::Array| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::ResizeObserverEntry>() else {
                    continue;
                };
                let rect = entry.content_rect();
                if rect.width() > 0.0 && rect.height() > 0.0 {
                    input.borrow_mut().container_resized = true;
                }
            }
        }) as Box<dyn FnMut(_)>);
        let observer = web::ResizeObserver::new(on_resize.as_ref().unchecked_ref())
            .map_err(|e| EffectError::SurfaceUnavailable(format!("ResizeObserver: {:?}", e)))?;
        observer.observe(container);

        Ok(Self {
            canvas: canvas.clone(),
            mousemove,
            observer,
            _on_resize: on_resize,
        })
    }
}

impl Drop for SurfaceListeners {
    fn drop(&mut self) {
        _ = self.canvas.remove_event_listener_with_callback(
            "mousemove",
            self.mousemove.as_ref().unchecked_ref(),
        );
        self.observer.disconnect();
    }
}

/// A tile canvas configured as a WebGPU surface, with its image texture,
/// uniform buffer and listeners.
pub struct GpuEffectSurface {
    gpu: Rc<GpuContext>,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    pipeline: Rc<wgpu::RenderPipeline>,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    image: ImageTexture,
    canvas: web::HtmlCanvasElement,
    container: web::Element,
    input: Rc<RefCell<SurfaceInput>>,
    listeners: Option<SurfaceListeners>,
}

impl GpuEffectSurface {
    /// Load `image_url` and bind it to `canvas`.
    ///
    /// Fails with `AssetLoad` when the image cannot be decoded and with
    /// `SurfaceUnavailable` when the canvas cannot host a WebGPU surface.
    pub async fn create(
        gpu: Rc<GpuContext>,
        canvas: web::HtmlCanvasElement,
        image_url: &str,
    ) -> Result<Self, EffectError> {
        let container = canvas
            .parent_element()
            .ok_or_else(|| EffectError::SurfaceUnavailable("canvas has no container".into()))?;
        let image = texture::load_image(image_url).await?;

        dom::apply_styles(&canvas, CANVAS_BASE_STYLE);
        let size = SurfaceSize::from_layout(dom::layout_box(&container));
        let (width, height) = size.physical();
        canvas.set_width(width);
        canvas.set_height(height);

        let surface = gpu
            .instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| EffectError::SurfaceUnavailable(e.to_string()))?;
        let caps = surface.get_capabilities(&gpu.adapter);
        let format = caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| EffectError::SurfaceUnavailable("no surface formats".into()))?;
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu.device, &config);

        let image = texture::upload_image(&gpu, &image);
        let uniform_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("effect_uniforms"),
            size: std::mem::size_of::<EffectUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("effect_bg"),
            layout: &gpu.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&image.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&gpu.sampler),
                },
            ],
        });
        let pipeline = gpu.pipeline_for(format);

        let input = Rc::new(RefCell::new(SurfaceInput::default()));
        let listeners = SurfaceListeners::attach(&canvas, &container, input.clone())?;

        Ok(Self {
            gpu,
            surface,
            config,
            pipeline,
            uniform_buffer,
            bind_group,
            image,
            canvas,
            container,
            input,
            listeners: Some(listeners),
        })
    }
}

impl EffectSurface for GpuEffectSurface {
    fn write_uniforms(&mut self, uniforms: &EffectUniforms) {
        self.gpu
            .queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    fn render(&mut self) -> Result<(), EffectError> {
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.gpu.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(EffectError::Render(e.to_string())),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("effect_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("effect_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.draw(0..6, 0..1);
        }
        self.gpu.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn layout(&self) -> Option<LayoutBox> {
        self.container
            .is_connected()
            .then(|| dom::layout_box(&self.container))
    }

    fn resize(&mut self, size: SurfaceSize) {
        let (width, height) = size.physical();
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.gpu.device, &self.config);
    }

    fn poll_input(&mut self) -> SurfaceInput {
        std::mem::take(&mut *self.input.borrow_mut())
    }

    fn release(&mut self) {
        if self.listeners.take().is_none() {
            return;
        }
        self.image.texture.destroy();
        self.uniform_buffer.destroy();
        log::debug!("[gpu] released surface resources");
    }
}
