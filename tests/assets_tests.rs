use card_core::{
    decode_rgba, download_file_name, fit_within, AssetError, CardConfig, SlotStatus, TextureLedger,
    TextureSlot, DEFAULT_PIXEL_SIZE,
};
use std::collections::HashMap;
use std::io::Cursor;

// wgpu's default max_texture_dimension_2d
const MAX_DIM: u32 = 8192;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 128, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn ledger_load_cycle() {
    let mut ledger = TextureLedger::new();
    let slot = TextureSlot::Letter;
    assert_eq!(ledger.status(slot), SlotStatus::Idle);
    assert!(ledger.request(slot));
    assert!(!ledger.request(slot), "no second fetch while loading");
    assert!(ledger.fulfil(slot));
    assert!(ledger.is_resident(slot));
    assert!(!ledger.request(slot));
    assert!(ledger.release(slot));
    assert_eq!(ledger.status(slot), SlotStatus::Released);
    assert!(!ledger.release(slot), "nothing left to free");
}

#[test]
fn ledger_drops_late_results() {
    let mut ledger = TextureLedger::new();
    let slot = TextureSlot::Envelope;
    ledger.request(slot);
    // opened before the envelope image arrived
    assert!(!ledger.release(slot));
    assert!(!ledger.fulfil(slot));
    assert!(!ledger.is_resident(slot));
}

#[test]
fn ledger_failure_allows_retry() {
    let mut ledger = TextureLedger::new();
    let slot = TextureSlot::Heart;
    ledger.request(slot);
    ledger.fail(slot);
    assert_eq!(ledger.status(slot), SlotStatus::Idle);
    assert!(ledger.request(slot));

    // a released slot can be loaded again too
    ledger.fulfil(slot);
    ledger.release(slot);
    assert!(ledger.request(slot));
}

#[test]
fn ledger_slots_are_independent() {
    let mut ledger = TextureLedger::new();
    ledger.request(TextureSlot::Envelope);
    for slot in TextureSlot::ALL {
        if slot != TextureSlot::Envelope {
            assert_eq!(ledger.status(slot), SlotStatus::Idle);
        }
    }
}

#[test]
fn decode_png_to_rgba() {
    let img = decode_rgba(&png_bytes(2, 3), MAX_DIM).unwrap();
    assert_eq!((img.width, img.height), (2, 3));
    assert_eq!(img.pixels.len(), 2 * 3 * 4);
    assert_eq!(&img.pixels[..4], &[255, 0, 128, 255]);
}

#[test]
fn decode_shrinks_images_beyond_texture_limit() {
    let img = decode_rgba(&png_bytes(9000, 1), MAX_DIM).unwrap();
    assert!(img.width <= MAX_DIM && img.height <= MAX_DIM);
    assert_eq!((img.width, img.height), (MAX_DIM, 1));
    assert_eq!(img.pixels.len(), (img.width * img.height * 4) as usize);
}

#[test]
fn decode_keeps_aspect_when_shrinking() {
    let img = decode_rgba(&png_bytes(40, 20), 10).unwrap();
    assert_eq!((img.width, img.height), (10, 5));
    assert_eq!(&img.pixels[..4], &[255, 0, 128, 255]);
}

#[test]
fn fit_within_limits() {
    assert_eq!(fit_within(640, 480, MAX_DIM), (640, 480));
    assert_eq!(fit_within(MAX_DIM, MAX_DIM, MAX_DIM), (MAX_DIM, MAX_DIM));
    assert_eq!(fit_within(16384, 8192, MAX_DIM), (8192, 4096));
    assert_eq!(fit_within(3000, 12000, MAX_DIM), (2048, 8192));
    assert_eq!(fit_within(100_000, 1, MAX_DIM), (MAX_DIM, 1));
}

#[test]
fn decode_rejects_garbage() {
    let err = decode_rgba(b"definitely not an image", MAX_DIM).unwrap_err();
    assert!(matches!(err, AssetError::Decode(_)));
    assert!(err.to_string().starts_with("failed to decode image"));
}

#[test]
fn download_names() {
    assert_eq!(download_file_name("pdf/letter.pdf"), "letter.pdf");
    assert_eq!(download_file_name("letter.pdf"), "letter.pdf");
    assert_eq!(
        download_file_name("https://example.org/cards/card.pdf?v=2#page=1"),
        "card.pdf"
    );
    assert_eq!(download_file_name("files/"), "download");
    assert_eq!(download_file_name(""), "download");
}

#[test]
fn slot_names() {
    let names: Vec<String> = TextureSlot::ALL.iter().map(|s| s.to_string()).collect();
    assert_eq!(names, ["envelope", "letter", "heart"]);
}

#[test]
fn config_defaults() {
    let cfg = CardConfig::from_lookup(|_| None);
    assert_eq!(cfg, CardConfig::default());
    assert_eq!(cfg.texture_url(TextureSlot::Envelope), "textures/envelope_texture.png");
    assert_eq!(cfg.texture_url(TextureSlot::Letter), "textures/letter_inside.jpg");
    assert_eq!(cfg.texture_url(TextureSlot::Heart), "textures/heart.png");
    assert_eq!(cfg.document, "pdf/letter.pdf");
    assert_eq!(cfg.pixel_size, DEFAULT_PIXEL_SIZE);
}

#[test]
fn config_overrides_from_attributes() {
    let cfg = CardConfig::from_lookup(lookup(&[
        ("data-letter-texture", " img/inside.png "),
        ("data-document", "docs/invite.pdf"),
        ("data-pixel-size", "8"),
        ("data-heart-texture", "   "),
    ]));
    assert_eq!(cfg.letter_texture, "img/inside.png");
    assert_eq!(cfg.document, "docs/invite.pdf");
    assert_eq!(cfg.pixel_size, 8.0);
    // blank attributes keep the default
    assert_eq!(cfg.heart_texture, "textures/heart.png");
    assert_eq!(cfg.envelope_texture, "textures/envelope_texture.png");
}

#[test]
fn config_rejects_bad_pixel_sizes() {
    for bad in ["0.5", "-2", "abc", "NaN", "inf"] {
        let cfg = CardConfig::from_lookup(lookup(&[("data-pixel-size", bad)]));
        assert_eq!(cfg.pixel_size, DEFAULT_PIXEL_SIZE, "accepted {:?}", bad);
    }
    let cfg = CardConfig::from_lookup(lookup(&[("data-pixel-size", "1")]));
    assert_eq!(cfg.pixel_size, 1.0);
}
