use card_core::{DecodedImage, TextureSlot};
use fnv::FnvHashMap;

struct GpuTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// Card textures resident on the GPU, plus a white stand-in used while a
/// slot is loading, failed or released.
pub(crate) struct TextureStore {
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    fallback: GpuTexture,
    slots: FnvHashMap<TextureSlot, GpuTexture>,
}

impl TextureStore {
    pub(crate) fn new(device: &wgpu::Device, queue: &wgpu::Queue, layout: wgpu::BindGroupLayout) -> Self {
        let sampler = super::helpers::create_sampler(device, "material_sampler", wgpu::FilterMode::Linear);
        let white = DecodedImage {
            width: 1,
            height: 1,
            pixels: vec![255; 4],
        };
        let fallback = create(device, queue, &layout, &sampler, "fallback_white", &white);
        Self {
            layout,
            sampler,
            fallback,
            slots: FnvHashMap::default(),
        }
    }

    pub(crate) fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        slot: TextureSlot,
        image: &DecodedImage,
    ) {
        let label = format!("{}_texture", slot);
        let tex = create(device, queue, &self.layout, &self.sampler, &label, image);
        if let Some(old) = self.slots.insert(slot, tex) {
            old.texture.destroy();
        }
    }

    /// Free the GPU memory behind `slot`. Returns whether anything was held.
    pub(crate) fn release(&mut self, slot: TextureSlot) -> bool {
        match self.slots.remove(&slot) {
            Some(tex) => {
                tex.texture.destroy();
                true
            }
            None => false,
        }
    }

    pub(crate) fn bind_group(&self, slot: TextureSlot) -> &wgpu::BindGroup {
        self.slots
            .get(&slot)
            .map(|t| &t.bind_group)
            .unwrap_or(&self.fallback.bind_group)
    }
}

fn create(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    label: &str,
    image: &DecodedImage,
) -> GpuTexture {
    let size = wgpu::Extent3d {
        width: image.width,
        height: image.height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &image.pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(image.width * 4),
            rows_per_image: Some(image.height),
        },
        size,
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    GpuTexture {
        texture,
        bind_group,
    }
}
