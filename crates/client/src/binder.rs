//! Applies state changes to bound elements.
//!
//! Three binding modes, each expressed as an attribute on the element:
//! mirror (`data-state`), conditional-text (`data-state-bind` plus
//! optional `data-state-text="<truthy>:<falsy>"`, falling back to mirror
//! when the text attribute is absent), and class-toggle
//! (`data-state-toggle`, fixed class). Several elements may bind the same
//! state id; one change updates them all.

use serde_json::Value;

use crate::config::BindingAttrs;
use crate::dom::{Dom, Element, StateChange};

/// Truthiness the way the page's scripts would judge it: null, false,
/// zero and the empty string are falsy, everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// How a state value reads inside an element: strings verbatim, null as
/// nothing, everything else in its JSON form.
pub fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Split a `"<truthy>:<falsy>"` literal at its first colon.
fn conditional_pair(raw: &str) -> (&str, &str) {
    raw.split_once(':').unwrap_or((raw, ""))
}

fn mirror_into(element: &dyn Element, rendered: &str) {
    if element.is_form_control() {
        element.set_value(rendered);
    } else {
        element.set_text(rendered);
    }
}

/// Update every element bound to the changed state id, then dispatch one
/// state-change notification on the document.
pub fn apply_state_change(
    dom: &dyn Dom,
    attrs: &BindingAttrs,
    event_name: &str,
    change: &StateChange,
) {
    let rendered = display(&change.new_value);
    let truthy = is_truthy(&change.new_value);

    for element in dom.select_bound(&attrs.mirror, &change.state_id) {
        mirror_into(element.as_ref(), &rendered);
    }

    for element in dom.select_bound(&attrs.bind, &change.state_id) {
        match element.attr(&attrs.text) {
            Some(literals) => {
                let (when_truthy, when_falsy) = conditional_pair(&literals);
                element.set_text(if truthy { when_truthy } else { when_falsy });
            }
            None => mirror_into(element.as_ref(), &rendered),
        }
    }

    for element in dom.select_bound(&attrs.toggle, &change.state_id) {
        element.set_class(&attrs.toggle_class, truthy);
    }

    dom.dispatch_state_change(event_name, change);
}
