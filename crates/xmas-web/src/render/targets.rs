use super::helpers;

pub(crate) const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Offscreen color targets for the bloom chain.
///
/// - `scene_*` holds the full-resolution frame before post-processing.
/// - `bloom_*` are the reduced-size ping-pong buffers for bright pass and blur.
pub(crate) struct RenderTargets {
    _scene_tex: wgpu::Texture,
    pub(crate) scene_view: wgpu::TextureView,
    _bloom_a: wgpu::Texture,
    pub(crate) bloom_a_view: wgpu::TextureView,
    _bloom_b: wgpu::Texture,
    pub(crate) bloom_b_view: wgpu::TextureView,
    pub(crate) bloom_size: (u32, u32),
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        bloom_size: (u32, u32),
    ) -> Self {
        let usage = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        let (scene_tex, scene_view) =
            helpers::create_color_texture(device, "scene_tex", width, height, HDR_FORMAT, usage);
        let (bw, bh) = bloom_size;
        let (bloom_a, bloom_a_view) =
            helpers::create_color_texture(device, "bloom_a", bw, bh, HDR_FORMAT, usage);
        let (bloom_b, bloom_b_view) =
            helpers::create_color_texture(device, "bloom_b", bw, bh, HDR_FORMAT, usage);
        Self {
            _scene_tex: scene_tex,
            scene_view,
            _bloom_a: bloom_a,
            bloom_a_view,
            _bloom_b: bloom_b,
            bloom_b_view,
            bloom_size,
        }
    }
}
