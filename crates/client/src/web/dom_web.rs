//! `Dom` backed by the live document.

use wasm_bindgen::JsCast;
use web_sys::js_sys;
use web_sys::{CustomEvent, CustomEventInit, Document};

use crate::dom::{Dom, Element, PageOrigin, StateChange};

pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new() -> Self {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("no document in this environment");
        Self { document }
    }
}

impl Default for WebDom {
    fn default() -> Self {
        Self::new()
    }
}

struct WebElement(web_sys::Element);

impl Element for WebElement {
    fn attr(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn is_form_control(&self) -> bool {
        self.0.is_instance_of::<web_sys::HtmlInputElement>()
            || self.0.is_instance_of::<web_sys::HtmlSelectElement>()
            || self.0.is_instance_of::<web_sys::HtmlTextAreaElement>()
    }

    fn set_value(&self, value: &str) {
        if let Some(input) = self.0.dyn_ref::<web_sys::HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = self.0.dyn_ref::<web_sys::HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(area) = self.0.dyn_ref::<web_sys::HtmlTextAreaElement>() {
            area.set_value(value);
        } else {
            self.0.set_text_content(Some(value));
        }
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn set_class(&self, class: &str, present: bool) {
        let list = self.0.class_list();
        let result = if present {
            list.add_1(class)
        } else {
            list.remove_1(class)
        };
        if let Err(e) = result {
            crate::log_warn!("class toggle failed: {e:?}");
        }
    }

    fn set_outer_html(&self, html: &str) {
        self.0.set_outer_html(html);
    }
}

/// Escape a state id for use inside a quoted attribute selector.
fn selector_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

impl Dom for WebDom {
    fn origin(&self) -> PageOrigin {
        let Some(location) = self.document.location() else {
            return PageOrigin {
                secure: false,
                host: String::new(),
            };
        };
        let secure = location.protocol().map(|p| p == "https:").unwrap_or(false);
        let host = location.host().unwrap_or_default();
        PageOrigin { secure, host }
    }

    fn text_of(&self, element_id: &str) -> Option<String> {
        self.document
            .get_element_by_id(element_id)
            .and_then(|el| el.text_content())
    }

    fn select_bound(&self, attr: &str, state_id: &str) -> Vec<Box<dyn Element>> {
        let selector = format!("[{attr}=\"{}\"]", selector_escape(state_id));
        let mut out: Vec<Box<dyn Element>> = Vec::new();
        let Ok(list) = self.document.query_selector_all(&selector) else {
            crate::log_warn!("bad binding selector: {selector}");
            return out;
        };
        for index in 0..list.length() {
            if let Some(node) = list.item(index) {
                if let Ok(element) = node.dyn_into::<web_sys::Element>() {
                    out.push(Box::new(WebElement(element)));
                }
            }
        }
        out
    }

    fn by_id(&self, element_id: &str) -> Option<Box<dyn Element>> {
        self.document
            .get_element_by_id(element_id)
            .map(|element| Box::new(WebElement(element)) as Box<dyn Element>)
    }

    fn set_body_html(&self, html: &str) {
        if let Some(body) = self.document.body() {
            body.set_inner_html(html);
        }
    }

    fn dispatch_state_change(&self, event_name: &str, change: &StateChange) {
        let detail = serde_json::json!({
            "stateId": change.state_id,
            "newValue": change.new_value,
            "oldValue": change.old_value,
        });
        let init = CustomEventInit::new();
        if let Ok(js_detail) = js_sys::JSON::parse(&detail.to_string()) {
            init.set_detail(&js_detail);
        }
        if let Ok(event) = CustomEvent::new_with_event_init_dict(event_name, &init) {
            let _ = self.document.dispatch_event(&event);
        }
    }
}
