use card_core::{download_file_name, CardConfig};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

#[inline]
pub fn canvas_aspect(canvas: &web::HtmlCanvasElement) -> f32 {
    canvas.width().max(1) as f32 / canvas.height().max(1) as f32
}

/// Card configuration with overrides taken from the canvas' `data-*` attributes.
pub fn read_card_config(canvas: &web::HtmlCanvasElement) -> CardConfig {
    CardConfig::from_lookup(|key| canvas.get_attribute(key))
}

/// Hand `url` to the browser as a file download via a temporary anchor.
pub fn trigger_download(url: &str) -> anyhow::Result<()> {
    let document = window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("document has no body"))?;
    let anchor: web::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    anchor.set_href(url);
    anchor.set_download(&download_file_name(url));
    body.append_child(&anchor)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    anchor.click();
    _ = body.remove_child(&anchor);
    Ok(())
}
