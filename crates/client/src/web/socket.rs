//! `Transport` backed by `web_sys::WebSocket`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use crate::transport::{Transport, TransportCallbacks, TransportError, TransportFactory};

pub struct WebSocketFactory;

struct WebSocketTransport {
    ws: WebSocket,
}

impl Transport for WebSocketTransport {
    fn send(&self, frame: &str) -> Result<(), TransportError> {
        if self.ws.ready_state() != WebSocket::OPEN {
            return Err(TransportError::NotOpen);
        }
        self.ws
            .send_with_str(frame)
            .map_err(|e| TransportError::Send(format!("{e:?}")))
    }
}

impl TransportFactory for WebSocketFactory {
    fn connect(
        &self,
        url: &str,
        callbacks: TransportCallbacks,
    ) -> Result<Box<dyn Transport>, TransportError> {
        let ws = WebSocket::new(url).map_err(|e| TransportError::Open(format!("{e:?}")))?;

        let on_open = callbacks.on_open.clone();
        let onopen = Closure::wrap(Box::new(move |_: web_sys::Event| on_open())
            as Box<dyn FnMut(web_sys::Event)>);
        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        onopen.forget();

        let on_message = callbacks.on_message.clone();
        let onmessage = Closure::wrap(Box::new(move |e: MessageEvent| {
            if let Ok(text) = e.data().dyn_into::<js_sys::JsString>() {
                on_message(String::from(text));
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        onmessage.forget();

        let on_close = callbacks.on_close.clone();
        let onclose = Closure::wrap(Box::new(move |e: CloseEvent| {
            crate::log_warn!("socket closed: code {}", e.code());
            on_close();
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
        onclose.forget();

        // The browser always follows `error` with `close`, so the close
        // handler alone drives reconnection.
        let onerror = Closure::wrap(Box::new(move |_: web_sys::ErrorEvent| {
            crate::log_error!("socket error");
        }) as Box<dyn FnMut(web_sys::ErrorEvent)>);
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();

        Ok(Box::new(WebSocketTransport { ws }))
    }
}
