use crate::constants::HINT_OVERLAY_ID;
use card_core::CardState;
use web_sys as web;

/// What the next click on the letter does.
pub fn hint_text(state: CardState) -> &'static str {
    match state {
        CardState::Closed => "Click the envelope to open it",
        CardState::Opened => "Click the letter to read it",
        CardState::Zoomed => "Click the letter to download it",
    }
}

/// Update the hint overlay, if the page has one.
pub fn update_hint(document: &web::Document, state: CardState) {
    if let Some(el) = document.get_element_by_id(HINT_OVERLAY_ID) {
        el.set_text_content(Some(hint_text(state)));
        _ = el.set_attribute("data-state", state_attr(state));
    }
}

#[inline]
pub fn state_attr(state: CardState) -> &'static str {
    match state {
        CardState::Closed => "closed",
        CardState::Opened => "opened",
        CardState::Zoomed => "zoomed",
    }
}
