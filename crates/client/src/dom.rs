//! The DOM seam.
//!
//! The binder and the event layer see the document through these traits:
//! the real implementation wraps `web_sys` (see the `web` module), tests
//! drive an in-memory fake. The surface is deliberately the minimum the
//! protocol needs: selection by binding attribute, value/text/class
//! writes, whole-subtree outer-HTML replacement, and the state-change
//! notification.

use serde_json::Value;

/// Scheme and host of the page, used to derive the transport URL.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOrigin {
    pub secure: bool,
    pub host: String,
}

impl PageOrigin {
    /// Transport URL for the given endpoint path; a secure page yields a
    /// secure transport.
    pub fn transport_url(&self, path: &str) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{scheme}://{}{path}", self.host)
    }
}

/// One applied state mutation, as carried by the `jweb:stateChange`
/// notification.
#[derive(Debug, Clone, PartialEq)]
pub struct StateChange {
    pub state_id: String,
    pub new_value: Value,
    pub old_value: Option<Value>,
}

/// A single element, as far as the binder is concerned.
pub trait Element {
    fn attr(&self, name: &str) -> Option<String>;

    /// True for inputs, selects and textareas, whose editable value (not
    /// text content) mirrors the state.
    fn is_form_control(&self) -> bool;

    fn set_value(&self, value: &str);

    fn set_text(&self, text: &str);

    fn set_class(&self, class: &str, present: bool);

    fn set_outer_html(&self, html: &str);
}

pub trait Dom {
    fn origin(&self) -> PageOrigin;

    /// Text content of the element with the given id, if present.
    fn text_of(&self, element_id: &str) -> Option<String>;

    /// Every element whose `attr` attribute equals `state_id`.
    fn select_bound(&self, attr: &str, state_id: &str) -> Vec<Box<dyn Element>>;

    fn by_id(&self, element_id: &str) -> Option<Box<dyn Element>>;

    /// Replace the entire document body's markup.
    fn set_body_html(&self, html: &str);

    /// Dispatch the state-change notification on the document. This is the
    /// only extension point exposed to page-specific code.
    fn dispatch_state_change(&self, event_name: &str, change: &StateChange);
}

/// Facts extracted from a fired DOM event before forwarding. The browser
/// glue fills whichever fields the concrete event carries.
#[derive(Debug, Clone, Default)]
pub struct DomEventDetail {
    pub event_type: String,
    pub target_id: Option<String>,
    pub value: Option<String>,
    pub checked: Option<bool>,
    pub key: Option<String>,
    pub key_code: Option<u32>,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub alt_key: bool,
    pub meta_key: bool,
    pub client_x: Option<i32>,
    pub client_y: Option<i32>,
    /// Named form fields, present only for form submissions.
    pub form_fields: Option<Vec<(String, String)>>,
}
