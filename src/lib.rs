#![cfg(target_arch = "wasm32")]
use card_core::{Card, CardState, Effect, TextureLedger};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn random_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(e) => {
            log::warn!("getrandom failed ({}); using a clock seed", e);
            js_sys::Date::now() as u64
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("envelope-card starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        log::warn!("init already ran; ignoring");
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(card_core::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", card_core::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let config = dom::read_card_config(&canvas);
    log::info!("[config] {:?}", config);

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let card = Rc::new(RefCell::new(Card::new(
        dom::canvas_aspect(&canvas),
        random_seed(),
    )));
    let pending: Rc<RefCell<Vec<Effect>>> = Rc::new(RefCell::new(Vec::new()));
    pending.borrow_mut().extend(card.borrow().boot());
    overlay::update_hint(&document, CardState::Closed);

    let gpu = frame::init_gpu(&canvas, config.pixel_size).await;

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        card: card.clone(),
        pending: pending.clone(),
    });
    events::wire_activation_keys(card.clone(), pending.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        card,
        pending,
        loads: Rc::new(RefCell::new(Vec::new())),
        ledger: TextureLedger::new(),
        config,
        last_size: (canvas.width(), canvas.height()),
        canvas,
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
