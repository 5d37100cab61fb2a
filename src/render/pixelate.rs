use super::helpers;
use crate::constants::DEPTH_EDGE_STRENGTH;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PixelateUniforms {
    pub(crate) source_size: [f32; 2],
    pub(crate) target_size: [f32; 2],
    pub(crate) znear: f32,
    pub(crate) zfar: f32,
    pub(crate) depth_edge_strength: f32,
    pub(crate) _pad: f32,
}

pub(crate) struct PixelateResources {
    pub(crate) bgl: wgpu::BindGroupLayout, // tex+sampler+uniform+depth
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) sampler: wgpu::Sampler,
    pub(crate) pipeline: wgpu::RenderPipeline,
}

pub(crate) fn create_pixelate_resources(
    device: &wgpu::Device,
    swap_format: wgpu::TextureFormat,
) -> PixelateResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("pixelate_shader"),
        source: wgpu::ShaderSource::Wgsl(card_core::PIXELATE_WGSL.into()),
    });
    let [tex_entry, sampler_entry] = helpers::texture_sampler_entries(0);
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("pixelate_bgl"),
        entries: &[
            tex_entry,
            sampler_entry,
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 3,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Depth,
                },
                count: None,
            },
        ],
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("pixelate_uniforms"),
        size: std::mem::size_of::<PixelateUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let sampler = helpers::create_sampler(device, "pixelate_sampler", wgpu::FilterMode::Nearest);
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pixelate_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("pixelate_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_fullscreen"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_pixelate"),
            targets: &[Some(wgpu::ColorTargetState {
                format: swap_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    PixelateResources {
        bgl,
        uniform_buffer,
        sampler,
        pipeline,
    }
}

pub(crate) fn create_bind_group(
    device: &wgpu::Device,
    res: &PixelateResources,
    source: &wgpu::TextureView,
    depth: &wgpu::TextureView,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("pixelate_bg"),
        layout: &res.bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(source),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&res.sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: res.uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::TextureView(depth),
            },
        ],
    })
}

pub(crate) fn write_uniforms(
    queue: &wgpu::Queue,
    buffer: &wgpu::Buffer,
    source_size: [f32; 2],
    target_size: [f32; 2],
    depth_range: (f32, f32),
) {
    let u = PixelateUniforms {
        source_size,
        target_size,
        znear: depth_range.0,
        zfar: depth_range.1,
        depth_edge_strength: DEPTH_EDGE_STRENGTH,
        _pad: 0.0,
    };
    queue.write_buffer(buffer, 0, bytemuck::bytes_of(&u));
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bind_group: &wgpu::BindGroup,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("pixelate_pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bind_group, &[]);
    r.draw(0..3, 0..1);
}
