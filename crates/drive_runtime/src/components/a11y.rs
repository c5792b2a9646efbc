//! DOM focus helpers for dialogs and menus.

use wasm_bindgen::JsCast;

/// Focuses an element by ID and reports whether a focusable HTML element was found.
pub(super) fn focus_element_by_id(id: &str) -> bool {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return false;
    };
    let Some(element) = document.get_element_by_id(id) else {
        return false;
    };
    let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() else {
        return false;
    };
    let _ = element.focus();
    true
}

/// Returns `true` for keys that confirm a dialog.
pub(super) fn is_confirm_key(ev: &web_sys::KeyboardEvent) -> bool {
    ev.key() == "Enter" && !ev.shift_key()
}

/// Returns `true` for keys that dismiss a dialog or menu.
pub(super) fn is_dismiss_key(ev: &web_sys::KeyboardEvent) -> bool {
    ev.key() == "Escape"
}

/// Returns `true` when the event target sits inside an element matching `selector`.
pub(super) fn event_within(ev: &web_sys::Event, selector: &str) -> bool {
    ev.target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .and_then(|element| element.closest(selector).ok().flatten())
        .is_some()
}
