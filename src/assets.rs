//! Asynchronous texture fetching.
//!
//! Loads run on the browser's event loop via `spawn_local`; finished images
//! are queued and picked up by the frame loop, which owns the GPU.

use card_core::{decode_rgba, DecodedImage, TextureSlot};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub enum LoadOutcome {
    Loaded(TextureSlot, DecodedImage),
    Failed(TextureSlot),
}

pub type LoadQueue = Rc<RefCell<Vec<LoadOutcome>>>;

pub fn spawn_texture_load(slot: TextureSlot, url: String, max_dim: u32, queue: LoadQueue) {
    spawn_local(async move {
        let outcome = match load_texture(&url, max_dim).await {
            Ok(img) => {
                log::info!(
                    "[assets] loaded {} texture {}x{} from {}",
                    slot,
                    img.width,
                    img.height,
                    url
                );
                LoadOutcome::Loaded(slot, img)
            }
            Err(e) => {
                log::error!("[assets] failed to load {} texture from {}: {:?}", slot, url, e);
                LoadOutcome::Failed(slot)
            }
        };
        queue.borrow_mut().push(outcome);
    });
}

async fn load_texture(url: &str, max_dim: u32) -> anyhow::Result<DecodedImage> {
    let bytes = fetch_bytes(url).await?;
    Ok(decode_rgba(&bytes, max_dim)?)
}

fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let win = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_val = JsFuture::from(win.fetch_with_str(url))
        .await
        .map_err(js_err)?;
    let resp: web::Response = resp_val.dyn_into().map_err(js_err)?;

    if !resp.ok() {
        anyhow::bail!("HTTP {} {}", resp.status(), resp.status_text());
    }

    let buf_promise = resp.array_buffer().map_err(js_err)?;
    let buf_val = JsFuture::from(buf_promise).await.map_err(js_err)?;
    Ok(js_sys::Uint8Array::new(&buf_val).to_vec())
}
