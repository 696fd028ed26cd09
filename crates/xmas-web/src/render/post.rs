use super::targets::{RenderTargets, HDR_FORMAT};
use xmas_core::BloomConfig;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    blur_dir: [f32; 2],
    intensity: f32,
    threshold: f32,
    smoothing: f32,
    _pad: f32,
}

impl PostUniforms {
    fn new(bloom: &BloomConfig, size: (u32, u32), blur_dir: [f32; 2]) -> Self {
        Self {
            resolution: [size.0 as f32, size.1 as f32],
            blur_dir,
            intensity: bloom.intensity,
            threshold: bloom.threshold,
            smoothing: bloom.smoothing,
            _pad: 0.0,
        }
    }
}

/// Bind groups tied to one set of render targets; rebuilt on resize.
pub(crate) struct PostBindGroups {
    from_scene: wgpu::BindGroup,
    from_bloom_a: wgpu::BindGroup,
    from_bloom_b: wgpu::BindGroup,
    bloom_a_only: wgpu::BindGroup,
}

pub(crate) struct PostResources {
    bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    bgl1: wgpu::BindGroupLayout, // tex+sampler
    sampler: wgpu::Sampler,
    // Passes in one encoder see only the last buffer write, so each blur
    // direction gets its own buffer.
    uniforms_h: wgpu::Buffer,
    uniforms_v: wgpu::Buffer,
    bright_pipeline: wgpu::RenderPipeline,
    blur_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,
}

fn texture_entries(with_uniform: bool) -> Vec<wgpu::BindGroupLayoutEntry> {
    let mut entries = vec![
        wgpu::BindGroupLayoutEntry {
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
            binding: 1,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        },
    ];
    if with_uniform {
        entries.push(wgpu::BindGroupLayoutEntry {
            binding: 2,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        });
    }
    entries
}

impl PostResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        post_shader: &wgpu::ShaderModule,
        swap_format: wgpu::TextureFormat,
    ) -> Self {
        let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl0"),
            entries: &texture_entries(true),
        });
        let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl1"),
            entries: &texture_entries(false),
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let make_uniforms = |label| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<PostUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let uniforms_h = make_uniforms("post_uniforms_h");
        let uniforms_v = make_uniforms("post_uniforms_v");

        let pl_bright_blur = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_0"),
            bind_group_layouts: &[&bgl0],
            push_constant_ranges: &[],
        });
        let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_comp"),
            bind_group_layouts: &[&bgl0, &bgl1],
            push_constant_ranges: &[],
        });
        let bright_pipeline = super::helpers::make_post_pipeline(
            device,
            "bright_pipeline",
            &pl_bright_blur,
            post_shader,
            "fs_bright",
            HDR_FORMAT,
            None,
        );
        let blur_pipeline = super::helpers::make_post_pipeline(
            device,
            "blur_pipeline",
            &pl_bright_blur,
            post_shader,
            "fs_blur",
            HDR_FORMAT,
            None,
        );
        let composite_pipeline = super::helpers::make_post_pipeline(
            device,
            "composite_pipeline",
            &pl_composite,
            post_shader,
            "fs_composite",
            swap_format,
            Some(wgpu::BlendState::REPLACE),
        );

        Self {
            bgl0,
            bgl1,
            sampler,
            uniforms_h,
            uniforms_v,
            bright_pipeline,
            blur_pipeline,
            composite_pipeline,
        }
    }

    pub(crate) fn write_uniforms(
        &self,
        queue: &wgpu::Queue,
        bloom: &BloomConfig,
        bloom_size: (u32, u32),
    ) {
        let h = PostUniforms::new(bloom, bloom_size, [1.0, 0.0]);
        let v = PostUniforms::new(bloom, bloom_size, [0.0, 1.0]);
        queue.write_buffer(&self.uniforms_h, 0, bytemuck::bytes_of(&h));
        queue.write_buffer(&self.uniforms_v, 0, bytemuck::bytes_of(&v));
    }

    pub(crate) fn bind(&self, device: &wgpu::Device, targets: &RenderTargets) -> PostBindGroups {
        let with_uniform = |label, view: &wgpu::TextureView, uniforms: &wgpu::Buffer| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &self.bgl0,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&self.sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: uniforms.as_entire_binding(),
                    },
                ],
            })
        };
        let bloom_a_only = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg_bloom_a_only"),
            layout: &self.bgl1,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        PostBindGroups {
            from_scene: with_uniform("bg_scene", &targets.scene_view, &self.uniforms_h),
            from_bloom_a: with_uniform("bg_from_bloom_a", &targets.bloom_a_view, &self.uniforms_h),
            from_bloom_b: with_uniform("bg_from_bloom_b", &targets.bloom_b_view, &self.uniforms_v),
            bloom_a_only,
        }
    }

    /// Bright pass, horizontal and vertical blur, then composite to `output`.
    pub(crate) fn run(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        groups: &PostBindGroups,
        targets: &RenderTargets,
        output: &wgpu::TextureView,
    ) {
        let black = wgpu::Color::BLACK;
        blit(
            encoder,
            "bright_pass",
            &targets.bloom_a_view,
            black,
            &self.bright_pipeline,
            &groups.from_scene,
            None,
        );
        blit(
            encoder,
            "blur_h",
            &targets.bloom_b_view,
            black,
            &self.blur_pipeline,
            &groups.from_bloom_a,
            None,
        );
        blit(
            encoder,
            "blur_v",
            &targets.bloom_a_view,
            black,
            &self.blur_pipeline,
            &groups.from_bloom_b,
            None,
        );
        blit(
            encoder,
            "composite",
            output,
            black,
            &self.composite_pipeline,
            &groups.from_scene,
            Some(&groups.bloom_a_only),
        );
    }
}

fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
