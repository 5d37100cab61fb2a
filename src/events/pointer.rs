use crate::input;
use card_core::{picking::ndc_from_canvas, Card, Effect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub card: Rc<RefCell<Card>>,
    pub pending: Rc<RefCell<Vec<Effect>>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_click(&w);
}

fn ndc_for_event(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> glam::Vec2 {
    let pos = input::pointer_canvas_px(ev, canvas);
    ndc_from_canvas(pos.x, pos.y, canvas.width() as f32, canvas.height() as f32)
}

// Show a hand cursor while the pointer is over the letter.
fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let hovering = Rc::new(RefCell::new(false));

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let ndc = ndc_for_event(&ev, &w.canvas);
        let hit = w.card.borrow().hit_test(ndc);
        let mut was = hovering.borrow_mut();
        if hit != *was {
            *was = hit;
            let cursor = if hit { "pointer" } else { "default" };
            _ = w.canvas.style().set_property("cursor", cursor);
        }
    }) as Box<dyn FnMut(_)>);

    _ = canvas_for_listener
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_click(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let ndc = ndc_for_event(&ev, &w.canvas);
        let effects = w.card.borrow_mut().click(ndc);
        if effects.is_empty() {
            return;
        }
        log::info!("[click] hit at ndc=({:.2},{:.2})", ndc.x, ndc.y);
        w.pending.borrow_mut().extend(effects);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    _ = canvas_for_listener.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
