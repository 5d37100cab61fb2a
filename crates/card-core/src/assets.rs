//! Texture bookkeeping and decoding.
//!
//! The web frontend fetches bytes asynchronously; by the time a texture
//! arrives the card may already have released its slot (e.g. the envelope
//! was opened before its image finished loading). [`TextureLedger`] decides
//! whether a result still needs uploading and whether GPU memory must be
//! freed.

use image::imageops::FilterType;
use std::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Envelope,
    Letter,
    Heart,
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 3] = [TextureSlot::Envelope, TextureSlot::Letter, TextureSlot::Heart];

    fn index(self) -> usize {
        match self {
            TextureSlot::Envelope => 0,
            TextureSlot::Letter => 1,
            TextureSlot::Heart => 2,
        }
    }
}

impl fmt::Display for TextureSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextureSlot::Envelope => "envelope",
            TextureSlot::Letter => "letter",
            TextureSlot::Heart => "heart",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlotStatus {
    #[default]
    Idle,
    Loading,
    Resident,
    Released,
}

#[derive(Clone, Debug, Default)]
pub struct TextureLedger {
    slots: [SlotStatus; 3],
}

impl TextureLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, slot: TextureSlot) -> SlotStatus {
        self.slots[slot.index()]
    }

    /// Mark a slot as loading. Returns `false` if a load is already running
    /// or the texture is resident.
    pub fn request(&mut self, slot: TextureSlot) -> bool {
        let s = &mut self.slots[slot.index()];
        match s {
            SlotStatus::Idle | SlotStatus::Released => {
                *s = SlotStatus::Loading;
                true
            }
            SlotStatus::Loading | SlotStatus::Resident => false,
        }
    }

    /// A load finished. Returns whether the texture should be uploaded.
    pub fn fulfil(&mut self, slot: TextureSlot) -> bool {
        let s = &mut self.slots[slot.index()];
        if *s == SlotStatus::Loading {
            *s = SlotStatus::Resident;
            true
        } else {
            false
        }
    }

    /// A load failed; the slot may be requested again.
    pub fn fail(&mut self, slot: TextureSlot) {
        let s = &mut self.slots[slot.index()];
        if *s == SlotStatus::Loading {
            *s = SlotStatus::Idle;
        }
    }

    /// Release a slot. Returns whether GPU memory is held and must be freed.
    pub fn release(&mut self, slot: TextureSlot) -> bool {
        let s = &mut self.slots[slot.index()];
        let was_resident = *s == SlotStatus::Resident;
        *s = SlotStatus::Released;
        was_resident
    }

    pub fn is_resident(&self, slot: TextureSlot) -> bool {
        self.status(slot) == SlotStatus::Resident
    }
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image is empty ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

/// Tightly packed RGBA8 pixels ready for GPU upload.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decode `bytes` to RGBA8, shrinking images whose longer side exceeds
/// `max_dim` (the GPU's `max_texture_dimension_2d`) while keeping the aspect.
pub fn decode_rgba(bytes: &[u8], max_dim: u32) -> Result<DecodedImage, AssetError> {
    let mut rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(AssetError::Empty { width, height });
    }
    let (fit_w, fit_h) = fit_within(width, height, max_dim);
    if (fit_w, fit_h) != (width, height) {
        log::warn!(
            "[assets] image {}x{} exceeds max texture size {}; resized to {}x{}",
            width,
            height,
            max_dim,
            fit_w,
            fit_h
        );
        rgba = image::imageops::resize(&rgba, fit_w, fit_h, FilterType::Triangle);
    }
    let (width, height) = rgba.dimensions();
    Ok(DecodedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Largest size with the same aspect as `width` x `height` whose sides are
/// both at most `max_dim`. Sides never drop below one pixel.
pub fn fit_within(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    let max_dim = max_dim.max(1);
    let longest = width.max(height);
    if longest <= max_dim {
        return (width, height);
    }
    let scale = max_dim as f64 / longest as f64;
    let shrink = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, max_dim);
    (shrink(width), shrink(height))
}

/// File name offered for a download of `url`.
pub fn download_file_name(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "download".to_string(),
    }
}
