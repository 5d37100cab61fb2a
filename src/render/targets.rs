use super::helpers;
use crate::constants::{DEPTH_FORMAT, SCENE_COLOR_FORMAT};

/// Offscreen targets the scene is drawn into before pixelation.
///
/// Both textures live at the reduced resolution given by the pixel size;
/// the pixelate pass stretches `color_view` over the whole swap chain.
pub(crate) struct RenderTargets {
    pub(crate) color_tex: wgpu::Texture,
    pub(crate) color_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (color_tex, color_view) = helpers::create_color_texture(
            device,
            "scene_color",
            width,
            height,
            SCENE_COLOR_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let (depth_tex, depth_view) = helpers::create_color_texture(
            device,
            "scene_depth",
            width,
            height,
            DEPTH_FORMAT,
            // read back by the pixelate pass for outlines
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        Self {
            color_tex,
            color_view,
            depth_tex,
            depth_view,
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.color_tex.destroy();
        self.depth_tex.destroy();
        *self = Self::new(device, width, height);
    }
}
