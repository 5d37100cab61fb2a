// Rendering and input constants used by the web frontend.

// Background behind the card (linear RGB)
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.01,
    b: 0.04,
    a: 1.0,
};

pub const SCENE_COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

// Per-draw uniform slots (letter + every heart), one dynamic-offset slot each
pub const OBJECT_SLOTS: usize = 1 + card_core::BURST_PARTICLES;
// Dynamic uniform offsets must honour the device's 256-byte minimum alignment
pub const OBJECT_SLOT_STRIDE: u64 = 256;

// Frame steps longer than this (tab in background) are clamped
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

pub const HINT_OVERLAY_ID: &str = "hint-overlay";

// Darkening applied on the near side of depth outlines in the pixelate pass
pub const DEPTH_EDGE_STRENGTH: f32 = 0.4;
