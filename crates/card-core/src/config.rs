use crate::assets::TextureSlot;

pub const CANVAS_ID: &str = "app-canvas";
pub const DEFAULT_ENVELOPE_TEXTURE: &str = "textures/envelope_texture.png";
pub const DEFAULT_LETTER_TEXTURE: &str = "textures/letter_inside.jpg";
pub const DEFAULT_HEART_TEXTURE: &str = "textures/heart.png";
pub const DEFAULT_DOCUMENT: &str = "pdf/letter.pdf";
// Screen pixels per rendered pixel
pub const DEFAULT_PIXEL_SIZE: f32 = 4.5;

/// Asset locations and look of one card.
///
/// Built from defaults, then overridden by `data-*` attributes found on the
/// canvas element (see [`CardConfig::from_lookup`]).
#[derive(Clone, Debug, PartialEq)]
pub struct CardConfig {
    pub envelope_texture: String,
    pub letter_texture: String,
    pub heart_texture: String,
    pub document: String,
    pub pixel_size: f32,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            envelope_texture: DEFAULT_ENVELOPE_TEXTURE.to_string(),
            letter_texture: DEFAULT_LETTER_TEXTURE.to_string(),
            heart_texture: DEFAULT_HEART_TEXTURE.to_string(),
            document: DEFAULT_DOCUMENT.to_string(),
            pixel_size: DEFAULT_PIXEL_SIZE,
        }
    }
}

impl CardConfig {
    /// Apply overrides from a key lookup. Keys are attribute names such as
    /// `data-letter-texture`; blank values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        if let Some(v) = get("data-envelope-texture") {
            cfg.envelope_texture = v;
        }
        if let Some(v) = get("data-letter-texture") {
            cfg.letter_texture = v;
        }
        if let Some(v) = get("data-heart-texture") {
            cfg.heart_texture = v;
        }
        if let Some(v) = get("data-document") {
            cfg.document = v;
        }
        if let Some(v) = get("data-pixel-size") {
            match v.parse::<f32>() {
                Ok(px) if px.is_finite() && px >= 1.0 => cfg.pixel_size = px,
                _ => log::warn!(
                    "[config] ignoring data-pixel-size={:?}; using {}",
                    v,
                    cfg.pixel_size
                ),
            }
        }
        cfg
    }

    pub fn texture_url(&self, slot: TextureSlot) -> &str {
        match slot {
            TextureSlot::Envelope => &self.envelope_texture,
            TextureSlot::Letter => &self.letter_texture,
            TextureSlot::Heart => &self.heart_texture,
        }
    }
}
