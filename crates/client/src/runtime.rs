//! The client runtime: connection lifecycle, inbound frame routing, and
//! outbound event forwarding.
//!
//! One instance per page. All collaborators are injected (`Dom`,
//! `TransportFactory`, `Scheduler`), so the whole state machine runs
//! deterministically under test with in-memory fakes. Everything is
//! single-threaded and callback-driven; no handler is allowed to panic
//! its way out of a transport callback, failures are logged and recovered.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use jweb_shared::{ClientFrame, DomPatch, EventPayload, ServerFrame, StateEntry};

use crate::binder;
use crate::config::RuntimeConfig;
use crate::connection::ConnectionState;
use crate::dom::{Dom, DomEventDetail, StateChange};
use crate::hydrate;
use crate::scheduler::Scheduler;
use crate::store::StateStore;
use crate::transport::{Transport, TransportCallbacks, TransportFactory};

struct Inner {
    store: StateStore,
    context_id: Option<String>,
    session_id: Option<String>,
    conn: ConnectionState,
    transport: Option<Box<dyn Transport>>,
    /// Reconnect attempts since the last successful open, 1-indexed while
    /// an attempt is pending.
    attempts: u32,
}

/// Handle to one runtime instance. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct JWebRuntime {
    config: Rc<RuntimeConfig>,
    dom: Rc<dyn Dom>,
    factory: Rc<dyn TransportFactory>,
    scheduler: Rc<dyn Scheduler>,
    inner: Rc<RefCell<Inner>>,
}

impl JWebRuntime {
    pub fn new(
        config: RuntimeConfig,
        dom: Rc<dyn Dom>,
        factory: Rc<dyn TransportFactory>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self {
            config: Rc::new(config),
            dom,
            factory,
            scheduler,
            inner: Rc::new(RefCell::new(Inner {
                store: StateStore::new(),
                context_id: None,
                session_id: None,
                conn: ConnectionState::Disconnected,
                transport: None,
                attempts: 0,
            })),
        }
    }

    /// Hydrate from the embedded document, open the transport, and start
    /// the heartbeat. Called once per page load.
    pub fn start(&self) {
        self.hydrate();
        self.connect();
        self.start_heartbeat();
    }

    // --- Introspection ---

    pub fn connection_state(&self) -> ConnectionState {
        self.inner.borrow().conn.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.inner.borrow().conn.is_connected()
    }

    pub fn context_id(&self) -> Option<String> {
        self.inner.borrow().context_id.clone()
    }

    pub fn session_id(&self) -> Option<String> {
        self.inner.borrow().session_id.clone()
    }

    pub fn state_value(&self, state_id: &str) -> Option<Value> {
        self.inner.borrow().store.get(state_id).cloned()
    }

    // --- Hydration ---

    fn hydrate(&self) {
        let seed = hydrate::read_seed(self.dom.as_ref(), &self.config.hydration_element_id);
        let changes: Vec<StateChange> = {
            let mut inner = self.inner.borrow_mut();
            inner.context_id = seed.context_id;
            seed.entries
                .into_iter()
                .map(|entry| {
                    let old = inner.store.put(&entry.id, entry.value.clone());
                    StateChange {
                        state_id: entry.id,
                        new_value: entry.value,
                        old_value: old,
                    }
                })
                .collect()
        };
        self.apply_changes(&changes);
    }

    // --- Connection lifecycle ---

    /// Open a fresh transport. No-op while already connected or after the
    /// retry budget is exhausted.
    pub fn connect(&self) {
        let url = {
            let mut inner = self.inner.borrow_mut();
            match inner.conn {
                ConnectionState::Connected | ConnectionState::Failed { .. } => return,
                _ => {}
            }
            inner.conn = if inner.attempts == 0 {
                ConnectionState::Connecting
            } else {
                ConnectionState::Reconnecting {
                    attempt: inner.attempts,
                }
            };
            self.dom.origin().transport_url(&self.config.endpoint_path)
        };

        let callbacks = TransportCallbacks {
            on_open: {
                let rt = self.clone();
                Rc::new(move || rt.handle_open())
            },
            on_message: {
                let rt = self.clone();
                Rc::new(move |raw: String| rt.handle_message(&raw))
            },
            on_close: {
                let rt = self.clone();
                Rc::new(move || rt.handle_close())
            },
        };

        crate::log_info!("connecting to {url}");
        match self.factory.connect(&url, callbacks) {
            Ok(transport) => {
                self.inner.borrow_mut().transport = Some(transport);
            }
            Err(e) => {
                // Same recovery as an unexpected close.
                crate::log_error!("transport open failed: {e}");
                self.schedule_reconnect();
            }
        }
    }

    fn handle_open(&self) {
        let context_id = {
            let mut inner = self.inner.borrow_mut();
            inner.conn = ConnectionState::Connected;
            inner.attempts = 0;
            inner.context_id.clone()
        };
        crate::log_info!("transport open");
        if let Some(context_id) = context_id {
            self.send_frame(&ClientFrame::Init { context_id });
        }
    }

    fn handle_close(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if matches!(
                inner.conn,
                ConnectionState::Disconnected | ConnectionState::Failed { .. }
            ) {
                return;
            }
            inner.transport = None;
            // The session id is per-connection.
            inner.session_id = None;
            inner.conn = ConnectionState::Disconnected;
        }
        crate::log_warn!("transport closed");
        self.schedule_reconnect();
    }

    fn schedule_reconnect(&self) {
        let delay = {
            let mut inner = self.inner.borrow_mut();
            inner.attempts += 1;
            if inner.attempts > self.config.reconnect.max_attempts {
                let reason = format!(
                    "gave up after {} reconnect attempts",
                    self.config.reconnect.max_attempts
                );
                crate::log_error!("{reason}; reload the page to resume");
                inner.conn = ConnectionState::Failed { reason };
                return;
            }
            self.config.reconnect.delay_for_attempt(inner.attempts)
        };
        crate::log_info!("reconnecting in {delay}ms");
        let rt = self.clone();
        self.scheduler.set_timeout(delay, Box::new(move || rt.connect()));
    }

    fn start_heartbeat(&self) {
        let rt = self.clone();
        self.scheduler.set_interval(
            self.config.heartbeat_interval_ms,
            Box::new(move || rt.heartbeat_tick()),
        );
    }

    fn heartbeat_tick(&self) {
        // Silent no-op while disconnected.
        if !self.is_connected() {
            return;
        }
        self.send_frame(&ClientFrame::Ping);
    }

    // --- Inbound routing ---

    fn handle_message(&self, raw: &str) {
        let frame = match ServerFrame::decode(raw) {
            Ok(frame) => frame,
            Err(e) => {
                crate::log_warn!("ignoring undecodable frame: {e}");
                return;
            }
        };

        match frame {
            ServerFrame::Connected { session_id } => {
                crate::log_info!("session established: {session_id}");
                self.inner.borrow_mut().session_id = Some(session_id);
            }
            ServerFrame::StateUpdate { states } => self.apply_state_update(states),
            ServerFrame::DomUpdate {
                updates,
                html,
                target_id,
            } => {
                if let Some(patch) = DomPatch::resolve(updates, html, target_id) {
                    self.apply_dom_patch(patch);
                }
            }
            ServerFrame::Error { message } => {
                crate::log_error!("server error: {message}");
            }
            ServerFrame::Unknown => {
                crate::log_debug!("ignoring unrecognized frame type");
            }
        }
    }

    fn apply_state_update(&self, states: Vec<StateEntry>) {
        // Store writes happen under one borrow, in arrival order; DOM
        // writes happen after it is released, because the state-change
        // notification can re-enter the runtime.
        let changes: Vec<StateChange> = {
            let mut inner = self.inner.borrow_mut();
            states
                .into_iter()
                .map(|entry| {
                    let old = inner.store.put(&entry.id, entry.value.clone());
                    StateChange {
                        state_id: entry.id,
                        new_value: entry.value,
                        old_value: old,
                    }
                })
                .collect()
        };
        self.apply_changes(&changes);
    }

    fn apply_changes(&self, changes: &[StateChange]) {
        for change in changes {
            binder::apply_state_change(
                self.dom.as_ref(),
                &self.config.attrs,
                &self.config.state_change_event,
                change,
            );
        }
    }

    fn apply_dom_patch(&self, patch: DomPatch) {
        match patch {
            DomPatch::Batch(replacements) => {
                for replacement in replacements {
                    match self.dom.by_id(&replacement.id) {
                        Some(element) => element.set_outer_html(&replacement.html),
                        None => crate::log_warn!("domUpdate target #{} not found", replacement.id),
                    }
                }
            }
            DomPatch::Subtree { html, target_id } => match target_id {
                Some(id) => match self.dom.by_id(&id) {
                    Some(element) => element.set_outer_html(&html),
                    None => crate::log_warn!("domUpdate target #{id} not found"),
                },
                None => self.dom.set_body_html(&html),
            },
        }
    }

    // --- Outbound ---

    /// Forward a DOM event fired by a handler-bound element. Dropped with
    /// a warning while disconnected; there is no queue and no retry.
    pub fn forward_event(&self, handler: &str, detail: DomEventDetail) {
        let context_id = {
            let inner = self.inner.borrow();
            if !inner.conn.is_connected() {
                crate::log_warn!(
                    "dropping {} event for handler {handler}: not connected",
                    detail.event_type
                );
                return;
            }
            inner.context_id.clone().unwrap_or_default()
        };

        let payload = EventPayload {
            handler: handler.to_string(),
            context_id,
            event_type: detail.event_type,
            target_id: detail.target_id,
            value: detail.value,
            checked: detail.checked,
            key: detail.key,
            key_code: detail.key_code,
            ctrl_key: detail.ctrl_key,
            shift_key: detail.shift_key,
            alt_key: detail.alt_key,
            meta_key: detail.meta_key,
            client_x: detail.client_x,
            client_y: detail.client_y,
            form_data: detail.form_fields.map(form_fields_to_json),
        };
        self.send_frame(&ClientFrame::Event(payload));
    }

    /// Optimistic local write: store and DOM update immediately, then a
    /// fire-and-forget frame. The authoritative value only changes when
    /// the server pushes a later `stateUpdate`. Dropped entirely, with a
    /// warning, while disconnected.
    pub fn set_state(&self, state_id: &str, value: Value) {
        let change = {
            let mut inner = self.inner.borrow_mut();
            if !inner.conn.is_connected() {
                crate::log_warn!("dropping setState for {state_id}: not connected");
                return;
            }
            let old = inner.store.put(state_id, value.clone());
            StateChange {
                state_id: state_id.to_string(),
                new_value: value.clone(),
                old_value: old,
            }
        };
        self.apply_changes(std::slice::from_ref(&change));
        self.send_frame(&ClientFrame::SetState {
            state_id: state_id.to_string(),
            value,
        });
    }

    fn send_frame(&self, frame: &ClientFrame) -> bool {
        let inner = self.inner.borrow();
        if !inner.conn.is_connected() {
            return false;
        }
        let Some(transport) = inner.transport.as_ref() else {
            return false;
        };
        match frame.encode() {
            Ok(text) => match transport.send(&text) {
                Ok(()) => true,
                Err(e) => {
                    crate::log_error!("send failed: {e}");
                    false
                }
            },
            Err(e) => {
                crate::log_error!("{e}");
                false
            }
        }
    }
}

fn form_fields_to_json(fields: Vec<(String, String)>) -> Value {
    let mut map = serde_json::Map::new();
    for (name, value) in fields {
        map.insert(name, Value::String(value));
    }
    Value::Object(map)
}
