use super::GpuContext;
use fisheye_core::EffectError;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub(crate) struct ImageTexture {
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
}

fn asset_error(url: &str, reason: impl Into<String>) -> EffectError {
    EffectError::AssetLoad {
        url: url.to_string(),
        reason: reason.into(),
    }
}

fn js_reason(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// Fetch and decode `url` into a CORS-clean image element.
pub(crate) async fn load_image(url: &str) -> Result<web::HtmlImageElement, EffectError> {
    let img = web::HtmlImageElement::new().map_err(|e| asset_error(url, js_reason(e)))?;
    img.set_cross_origin(Some("anonymous"));
    img.set_src(url);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| asset_error(url, js_reason(e)))?;
    if img.natural_width() == 0 || img.natural_height() == 0 {
        return Err(asset_error(url, "decoded image is empty"));
    }
    Ok(img)
}

/// Copy a decoded image into a new sampled texture.
pub(crate) fn upload_image(gpu: &GpuContext, img: &web::HtmlImageElement) -> ImageTexture {
    let size = wgpu::Extent3d {
        width: img.natural_width(),
        height: img.natural_height(),
        depth_or_array_layers: 1,
    };
    let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("tile_image"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        // external image copies require RENDER_ATTACHMENT on the destination
        usage: wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_DST
            | wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    gpu.queue.copy_external_image_to_texture(
        &wgpu::CopyExternalImageSourceInfo {
            source: wgpu::ExternalImageSource::HTMLImageElement(img.clone()),
            origin: wgpu::Origin2d::ZERO,
            flip_y: false,
        },
        wgpu::CopyExternalImageDestInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
            color_space: wgpu::PredefinedColorSpace::Srgb,
            premultiplied_alpha: false,
        },
        size,
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    ImageTexture { texture, view }
}
