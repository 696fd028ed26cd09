mod helpers;
mod post;
mod targets;

use crate::constants::CLEAR_COLOR;
use glam::Vec3;
use helpers::InstanceBuffer;
use post::{PostBindGroups, PostResources};
use targets::{RenderTargets, HDR_FORMAT};
use web_sys as web;
use xmas_core::{
    BloomConfig, Camera, InstanceRaw, PhotoAsset, PhotoError, PhotoQuad, TextureHandle, POST_WGSL,
    SCENE_WGSL,
};

const PHOTO_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
const MIN_PHOTO_OPACITY: f32 = 0.005;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
    time: f32,
    _pad: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PhotoInstance {
    position: [f32; 3],
    size: [f32; 2],
    opacity: f32,
    _pad: [f32; 2],
}

impl From<&PhotoQuad> for PhotoInstance {
    fn from(q: &PhotoQuad) -> Self {
        Self {
            position: q.position.to_array(),
            size: [q.width, q.height],
            opacity: q.opacity,
            _pad: [0.0; 2],
        }
    }
}

const SPRITE_ATTRIBUTES: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
    0 => Float32x3, // position
    1 => Float32,   // scale
    2 => Float32x3, // color
    3 => Float32,   // opacity
    4 => Float32,   // spin
    5 => Float32,   // glow
    6 => Uint32     // shape
];

const PHOTO_ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x3, // position
    1 => Float32x2, // size
    2 => Float32    // opacity
];

struct PhotoTexture {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,

    sprite_pipeline: wgpu::RenderPipeline,
    sprites: InstanceBuffer,

    photo_pipeline: wgpu::RenderPipeline,
    photo_bgl: wgpu::BindGroupLayout,
    photo_sampler: wgpu::Sampler,
    photo_instances: InstanceBuffer,
    photo_staging: Vec<PhotoInstance>,
    photos: Vec<PhotoTexture>,

    // Bloom over the finished frame
    bloom: BloomConfig,
    targets: RenderTargets,
    post: PostResources,
    post_groups: PostBindGroups,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
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
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
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
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let sprite_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sprite_pl"),
            bind_group_layouts: &[&globals_bgl],
            push_constant_ranges: &[],
        });
        let sprite_pipeline = helpers::make_instanced_pipeline(
            &device,
            "sprite_pipeline",
            &sprite_pl,
            &shader,
            "vs_sprite",
            "fs_sprite",
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<InstanceRaw>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &SPRITE_ATTRIBUTES,
            },
            HDR_FORMAT,
        );

        let photo_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("photo_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    // tex
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    // sampler
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let photo_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("photo_pl"),
            bind_group_layouts: &[&globals_bgl, &photo_bgl],
            push_constant_ranges: &[],
        });
        let photo_pipeline = helpers::make_instanced_pipeline(
            &device,
            "photo_pipeline",
            &photo_pl,
            &shader,
            "vs_photo",
            "fs_photo",
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PhotoInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &PHOTO_ATTRIBUTES,
            },
            HDR_FORMAT,
        );
        let photo_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("photo_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let sprites = InstanceBuffer::new(
            &device,
            "sprite_instances",
            (std::mem::size_of::<InstanceRaw>() * 16_384) as u64,
        );
        let photo_instances = InstanceBuffer::new(
            &device,
            "photo_instances",
            (std::mem::size_of::<PhotoInstance>() * 64) as u64,
        );

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });
        let post = PostResources::new(&device, &post_shader, format);
        let bloom = BloomConfig::default();
        let targets = RenderTargets::new(&device, width, height, bloom.extent(width, height));
        let post_groups = post.bind(&device, &targets);

        log::info!("[gpu] surface {}x{} format {:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
            globals_buffer,
            globals_bind_group,
            sprite_pipeline,
            sprites,
            photo_pipeline,
            photo_bgl,
            photo_sampler,
            photo_instances,
            photo_staging: Vec::new(),
            photos: Vec::new(),
            bloom,
            targets,
            post,
            post_groups,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets = RenderTargets::new(
                &self.device,
                width,
                height,
                self.bloom.extent(width, height),
            );
            self.post_groups = self.post.bind(&self.device, &self.targets);
        }
    }

    /// Reapply the surface configuration after the surface was lost.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Copy a decoded image into a new texture and hand back its handle.
    pub fn upload_photo(&mut self, img: &web::HtmlImageElement) -> Result<PhotoAsset, PhotoError> {
        let width = img.natural_width();
        let height = img.natural_height();
        if width == 0 || height == 0 {
            return Err(PhotoError::Decode(format!("{} has no pixels", img.src())));
        }
        let limit = self.device.limits().max_texture_dimension_2d;
        if width > limit || height > limit {
            return Err(PhotoError::Decode(format!(
                "{}x{} exceeds the {} texture limit",
                width, height, limit
            )));
        }
        let (texture, view) = helpers::create_color_texture(
            &self.device,
            "photo",
            width,
            height,
            PHOTO_FORMAT,
            wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        self.queue.copy_external_image_to_texture(
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
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("photo_bg"),
            layout: &self.photo_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.photo_sampler),
                },
            ],
        });
        let handle = self.photos.len() as TextureHandle;
        self.photos.push(PhotoTexture {
            _texture: texture,
            bind_group,
        });
        Ok(PhotoAsset {
            width,
            height,
            texture: handle,
        })
    }

    /// Draw order: photo panels, sprites, then overlay quads on top, all into
    /// the offscreen scene target; the bloom chain then writes the swapchain.
    pub fn render(
        &mut self,
        camera: &Camera,
        time: f32,
        sprites: &[InstanceRaw],
        quads: &[PhotoQuad],
    ) -> Result<(), wgpu::SurfaceError> {
        let forward = camera.forward();
        let right = forward.cross(camera.up).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);
        let globals = Globals {
            view_proj: camera.view_proj().to_cols_array_2d(),
            cam_right: right.extend(0.0).to_array(),
            cam_up: up.extend(0.0).to_array(),
            time,
            _pad: [0.0; 3],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        self.sprites
            .write(&self.device, &self.queue, bytemuck::cast_slice(sprites));
        self.photo_staging.clear();
        self.photo_staging.extend(quads.iter().map(PhotoInstance::from));
        self.photo_instances.write(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(&self.photo_staging),
        );
        self.post
            .write_uniforms(&self.queue, &self.bloom, self.targets.bloom_size);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.scene_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.draw_photos(&mut rpass, quads, false);
            if !sprites.is_empty() {
                rpass.set_pipeline(&self.sprite_pipeline);
                rpass.set_bind_group(0, &self.globals_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.sprites.buffer.slice(..));
                rpass.draw(0..6, 0..sprites.len() as u32);
            }
            self.draw_photos(&mut rpass, quads, true);
        }
        self.post
            .run(&mut encoder, &self.post_groups, &self.targets, &view);
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn draw_photos(&self, rpass: &mut wgpu::RenderPass<'_>, quads: &[PhotoQuad], overlay: bool) {
        rpass.set_pipeline(&self.photo_pipeline);
        rpass.set_bind_group(0, &self.globals_bind_group, &[]);
        rpass.set_vertex_buffer(0, self.photo_instances.buffer.slice(..));
        for (i, q) in quads.iter().enumerate() {
            if q.overlay != overlay || q.opacity <= MIN_PHOTO_OPACITY {
                continue;
            }
            let Some(photo) = self.photos.get(q.texture as usize) else {
                continue;
            };
            rpass.set_bind_group(1, &photo.bind_group, &[]);
            let i = i as u32;
            rpass.draw(0..6, i..i + 1);
        }
    }
}
