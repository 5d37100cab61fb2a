use crate::assets::{self, LoadOutcome, LoadQueue};
use crate::constants::MAX_FRAME_DT_SEC;
use crate::dom;
use crate::overlay;
use crate::render;
use card_core::{Card, CardConfig, Effect, TextureLedger};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub card: Rc<RefCell<Card>>,
    pub pending: Rc<RefCell<Vec<Effect>>>,
    pub loads: LoadQueue,
    pub ledger: TextureLedger,
    pub config: CardConfig,

    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,

    pub last_instant: Instant,
    pub last_size: (u32, u32),
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        self.track_canvas_size();

        let ticked = self.card.borrow_mut().tick(dt_sec);
        self.pending.borrow_mut().extend(ticked);
        let effects: Vec<Effect> = self.pending.borrow_mut().drain(..).collect();
        for effect in effects {
            self.apply(effect);
        }
        self.drain_loads();

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            let card = self.card.borrow();
            match g.render(card.scene()) {
                Ok(()) => {}
                Err(e) if render::surface_needs_reconfigure(&e) => {
                    log::warn!("[gpu] surface {:?}; reconfiguring", e);
                    g.reconfigure_surface();
                }
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::LoadTexture(slot) => {
                if self.ledger.request(slot) {
                    let url = self.config.texture_url(slot).to_string();
                    let max_dim = self
                        .gpu
                        .as_ref()
                        .map(|g| g.max_texture_dimension())
                        .unwrap_or_else(|| wgpu::Limits::default().max_texture_dimension_2d);
                    assets::spawn_texture_load(slot, url, max_dim, self.loads.clone());
                }
            }
            Effect::ReleaseTexture(slot) => {
                if self.ledger.release(slot) {
                    if let Some(g) = &mut self.gpu {
                        g.release_texture(slot);
                    }
                }
            }
            Effect::RetireParticle(i) => {
                log::debug!("[card] heart {} retired", i);
            }
            Effect::Download => {
                if let Err(e) = dom::trigger_download(&self.config.document) {
                    log::error!("[card] download of {} failed: {:?}", self.config.document, e);
                }
            }
            Effect::StateChanged(state) => {
                log::info!("[card] state -> {:?}", state);
                if let Some(doc) = dom::window_document() {
                    overlay::update_hint(&doc, state);
                }
            }
        }
    }

    fn drain_loads(&mut self) {
        let outcomes: Vec<LoadOutcome> = self.loads.borrow_mut().drain(..).collect();
        for outcome in outcomes {
            match outcome {
                LoadOutcome::Loaded(slot, image) => {
                    if !self.ledger.fulfil(slot) {
                        log::info!("[assets] {} texture no longer needed; dropping", slot);
                        continue;
                    }
                    if let Some(g) = &mut self.gpu {
                        g.upload_texture(slot, &image);
                    }
                }
                LoadOutcome::Failed(slot) => self.ledger.fail(slot),
            }
        }
    }

    fn track_canvas_size(&mut self) {
        let size = (self.canvas.width(), self.canvas.height());
        if size != self.last_size {
            self.last_size = size;
            self.card.borrow_mut().resize(dom::canvas_aspect(&self.canvas));
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    pixel_size: f32,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, pixel_size).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
