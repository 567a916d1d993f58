//! DOM helpers.
//!
//! Only the handful of lookups the bootstrap gate needs; page content is
//! rendered elsewhere.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

pub fn by_id(id: &str) -> Option<Element> {
    gloo_utils::document().get_element_by_id(id)
}

pub fn set_hidden(el: &Element, hidden: bool) {
    let _ = if hidden {
        el.set_attribute("hidden", "")
    } else {
        el.remove_attribute("hidden")
    };
}

/// Stamps `data-session` on `<body>` so stylesheets can react to the gate.
pub fn set_body_state(status: &str) {
    if let Some(body) = gloo_utils::document().body() {
        let _ = body.set_attribute("data-session", status);
    }
}

/// Calls `on_ready` once the document has been parsed, immediately if that
/// already happened.
pub fn when_hydrated<F>(on_ready: F) -> Result<(), JsValue>
where
    F: FnOnce() + 'static,
{
    let doc = gloo_utils::document();
    if doc.ready_state() != "loading" {
        on_ready();
        return Ok(());
    }

    let cb = Closure::once_into_js(on_ready);
    doc.add_event_listener_with_callback("DOMContentLoaded", cb.unchecked_ref())
}

/// Attach a click handler to the element with `id`. Returns `false` when no
/// such element exists yet.
pub fn on_click<F>(id: &str, handler: F) -> Result<bool, JsValue>
where
    F: FnMut(web_sys::MouseEvent) + 'static,
{
    let Some(el) = by_id(id) else {
        return Ok(false);
    };
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::MouseEvent)>);
    el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(true)
}
