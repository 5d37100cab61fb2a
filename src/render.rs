use crate::constants::{CLEAR_COLOR, OBJECT_SLOTS};
use card_core::{DecodedImage, Face, Scene, TextureSlot};
use glam::{Mat4, Vec4};
use web_sys as web;

mod helpers;
mod mesh;
mod pixelate;
mod scene;
mod targets;
mod textures;

use mesh::Mesh;
use scene::{CameraUniforms, ObjectUniforms, SceneResources};
use targets::RenderTargets;
use textures::TextureStore;

pub use helpers::{pixelated_size, surface_needs_reconfigure};

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    scene: SceneResources,
    letter_mesh: Mesh,
    heart_mesh: Mesh,
    textures: TextureStore,

    // Low-resolution scene target and the pass that blows it up
    targets: RenderTargets,
    pixelate: pixelate::PixelateResources,
    pixelate_bg: wgpu::BindGroup,

    width: u32,
    height: u32,
    pixel_size: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, pixel_size: f32) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
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
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
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

        let material_layout = scene::create_material_layout(&device);
        let scene = scene::create_scene_resources(&device, &material_layout);
        let textures = TextureStore::new(&device, &queue, material_layout);
        let letter_mesh = Mesh::upload(
            &device,
            "letter_mesh",
            mesh::box_geometry(card_core::LETTER_SIZE),
        );
        let heart_mesh = Mesh::upload(&device, "heart_mesh", mesh::quad_geometry());

        let (tw, th) = pixelated_size(width, height, pixel_size);
        let targets = RenderTargets::new(&device, tw, th);
        let pixelate = pixelate::create_pixelate_resources(&device, format);
        let pixelate_bg =
            pixelate::create_bind_group(&device, &pixelate, &targets.color_view, &targets.depth_view);
        log::info!(
            "[gpu] ready {}x{} (scene {}x{}, format {:?})",
            width,
            height,
            tw,
            th,
            format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene,
            letter_mesh,
            heart_mesh,
            textures,
            targets,
            pixelate,
            pixelate_bg,
            width,
            height,
            pixel_size,
        })
    }

    pub fn max_texture_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    pub fn upload_texture(&mut self, slot: TextureSlot, image: &DecodedImage) {
        self.textures.upload(&self.device, &self.queue, slot, image);
    }

    pub fn release_texture(&mut self, slot: TextureSlot) {
        if self.textures.release(slot) {
            log::info!("[gpu] released {} texture", slot);
        }
    }

    pub fn reconfigure_surface(&mut self) {
        self.surface.configure(&self.device, &self.config);
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

            let (tw, th) = pixelated_size(width, height, self.pixel_size);
            self.targets.recreate(&self.device, tw, th);
            self.pixelate_bg =
                pixelate::create_bind_group(
                    &self.device,
                    &self.pixelate,
                    &self.targets.color_view,
                    &self.targets.depth_view,
                );
        }
    }

    pub fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let cam = CameraUniforms {
            view_proj: scene.camera.view_proj().to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.scene.camera_buffer, 0, bytemuck::bytes_of(&cam));

        // Slot 0 is the letter; hearts follow, farthest first for blending.
        self.write_object(0, scene.letter.transform.matrix(), Vec4::ONE);
        let hearts = heart_draw_order(scene);
        if let Some(burst) = &scene.burst {
            for (slot, &i) in hearts.iter().enumerate() {
                if let Some(model) = burst.particle_matrix(i) {
                    let opacity = burst.particles[i].opacity.clamp(0.0, 1.0);
                    self.write_object(slot + 1, model, Vec4::new(1.0, 1.0, 1.0, opacity));
                }
            }
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene.camera_bind_group, &[]);

            let letter_slot = match scene.letter.face {
                Face::Envelope => TextureSlot::Envelope,
                Face::Letter => TextureSlot::Letter,
            };
            rpass.set_pipeline(&self.scene.letter_pipeline);
            rpass.set_bind_group(1, &self.scene.object_bind_group, &[scene::slot_offset(0)]);
            rpass.set_bind_group(2, self.textures.bind_group(letter_slot), &[]);
            self.letter_mesh.draw(&mut rpass);

            if !hearts.is_empty() {
                rpass.set_pipeline(&self.scene.heart_pipeline);
                rpass.set_bind_group(2, self.textures.bind_group(TextureSlot::Heart), &[]);
                for slot in 0..hearts.len() {
                    rpass.set_bind_group(
                        1,
                        &self.scene.object_bind_group,
                        &[scene::slot_offset(slot + 1)],
                    );
                    self.heart_mesh.draw(&mut rpass);
                }
            }
        }

        pixelate::write_uniforms(
            &self.queue,
            &self.pixelate.uniform_buffer,
            [self.targets.width as f32, self.targets.height as f32],
            [self.width as f32, self.height as f32],
            (scene.camera.znear, scene.camera.zfar),
        );
        pixelate::blit(
            &mut encoder,
            &view,
            &self.pixelate.pipeline,
            &self.pixelate_bg,
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn write_object(&self, slot: usize, model: Mat4, tint: Vec4) {
        let u = ObjectUniforms {
            model: model.to_cols_array_2d(),
            tint: tint.to_array(),
        };
        self.queue.write_buffer(
            &self.scene.object_buffer,
            scene::slot_offset(slot) as u64,
            bytemuck::bytes_of(&u),
        );
    }
}

/// Indices of visible hearts sorted back to front as seen by the camera.
fn heart_draw_order(scene: &Scene) -> Vec<usize> {
    let Some(burst) = &scene.burst else {
        return Vec::new();
    };
    let view = scene.camera.view_matrix();
    let mut order: Vec<(usize, f32)> = burst
        .particles
        .iter()
        .enumerate()
        .filter(|(_, p)| p.visible && p.opacity > 0.0)
        .filter_map(|(i, _)| {
            let centre = burst.particle_matrix(i)?.w_axis;
            Some((i, (view * centre).z))
        })
        .take(OBJECT_SLOTS - 1)
        .collect();
    // View space looks down -Z: most negative z is farthest.
    order.sort_by(|a, b| a.1.total_cmp(&b.1));
    order.into_iter().map(|(i, _)| i).collect()
}
