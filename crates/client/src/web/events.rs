//! Delegated DOM event listeners.
//!
//! Listeners live on the document, in the capture phase, and look for the
//! closest ancestor carrying the handler attribute. Delegation is what
//! keeps handlers working across whole-subtree `outerHTML` replacement,
//! and capture lets a form submission be cancelled before the browser
//! navigates.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys;
use web_sys::{Event, HtmlFormElement};

use crate::dom::DomEventDetail;
use crate::runtime::JWebRuntime;

const FORWARDED_EVENTS: [&str; 5] = ["click", "input", "change", "keydown", "submit"];

pub fn attach_delegated_listeners(runtime: &JWebRuntime, handler_attr: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    for event_type in FORWARDED_EVENTS {
        let rt = runtime.clone();
        let attr = handler_attr.to_string();
        let listener = Closure::wrap(Box::new(move |event: Event| {
            dispatch(&rt, &attr, &event);
        }) as Box<dyn FnMut(Event)>);
        let _ = document.add_event_listener_with_callback_and_bool(
            event_type,
            listener.as_ref().unchecked_ref(),
            true,
        );
        listener.forget();
    }
}

fn dispatch(runtime: &JWebRuntime, handler_attr: &str, event: &Event) {
    let Some(target) = event
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
    else {
        return;
    };
    let Ok(Some(bound)) = target.closest(&format!("[{handler_attr}]")) else {
        return;
    };
    let Some(handler) = bound.get_attribute(handler_attr) else {
        return;
    };

    let mut detail = DomEventDetail {
        event_type: event.type_(),
        ..Default::default()
    };
    detail.target_id = non_empty(bound.id());

    if let Some(input) = bound.dyn_ref::<web_sys::HtmlInputElement>() {
        detail.value = Some(input.value());
        detail.checked = Some(input.checked());
    } else if let Some(select) = bound.dyn_ref::<web_sys::HtmlSelectElement>() {
        detail.value = Some(select.value());
    } else if let Some(area) = bound.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        detail.value = Some(area.value());
    }

    if let Some(key_event) = event.dyn_ref::<web_sys::KeyboardEvent>() {
        detail.key = Some(key_event.key());
        detail.key_code = Some(key_event.key_code());
        detail.ctrl_key = key_event.ctrl_key();
        detail.shift_key = key_event.shift_key();
        detail.alt_key = key_event.alt_key();
        detail.meta_key = key_event.meta_key();
    } else if let Some(mouse_event) = event.dyn_ref::<web_sys::MouseEvent>() {
        detail.client_x = Some(mouse_event.client_x());
        detail.client_y = Some(mouse_event.client_y());
        detail.ctrl_key = mouse_event.ctrl_key();
        detail.shift_key = mouse_event.shift_key();
        detail.alt_key = mouse_event.alt_key();
        detail.meta_key = mouse_event.meta_key();
    }

    if event.type_() == "submit" {
        if let Some(form) = bound.dyn_ref::<HtmlFormElement>() {
            event.prevent_default();
            detail.form_fields = Some(serialize_form(form));
        }
    }

    runtime.forward_event(&handler, detail);
}

fn serialize_form(form: &HtmlFormElement) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    let Ok(data) = web_sys::FormData::new_with_form(form) else {
        return fields;
    };
    if let Ok(Some(entries)) = js_sys::try_iter(&data) {
        for entry in entries.flatten() {
            let pair = js_sys::Array::from(&entry);
            if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                fields.push((name, value));
            }
        }
    }
    fields
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
