use crate::input::is_activation_key;
use card_core::{Card, Effect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Let Enter/Space step the card the same way a click on the letter does.
pub fn wire_activation_keys(card: Rc<RefCell<Card>>, pending: Rc<RefCell<Vec<Effect>>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                if ev.repeat() || !is_activation_key(&ev.key()) {
                    return;
                }
                let effects = card.borrow_mut().activate();
                log::info!("[keys] activate -> {:?}", card.borrow().state());
                pending.borrow_mut().extend(effects);
                ev.prevent_default();
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
