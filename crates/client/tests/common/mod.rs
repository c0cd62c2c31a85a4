//! In-memory fakes for the runtime's three seams, plus a test harness.
//!
//! Each test binary gets a deterministic environment: a fake document made
//! of flat nodes, a transport factory whose connections the test opens,
//! closes and feeds by hand, and a scheduler whose timers the test fires.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

use jweb_client::dom::{Dom, Element, PageOrigin, StateChange};
use jweb_client::scheduler::Scheduler;
use jweb_client::transport::{Transport, TransportCallbacks, TransportError, TransportFactory};
use jweb_client::{JWebRuntime, RuntimeConfig};

pub const HYDRATION_ID: &str = "jweb-hydration";

// --- DOM fake ---

#[derive(Default)]
pub struct NodeData {
    pub id: Option<String>,
    pub attrs: HashMap<String, String>,
    pub text: String,
    pub value: String,
    pub classes: Vec<String>,
    pub form_control: bool,
    pub replaced_with: Option<String>,
}

#[derive(Clone, Default)]
pub struct FakeNode(pub Rc<RefCell<NodeData>>);

impl FakeNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(self, id: &str) -> Self {
        self.0.borrow_mut().id = Some(id.to_string());
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.0
            .borrow_mut()
            .attrs
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn form_control(self) -> Self {
        self.0.borrow_mut().form_control = true;
        self
    }

    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    pub fn value(&self) -> String {
        self.0.borrow().value.clone()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    pub fn replaced_with(&self) -> Option<String> {
        self.0.borrow().replaced_with.clone()
    }
}

impl Element for FakeNode {
    fn attr(&self, name: &str) -> Option<String> {
        self.0.borrow().attrs.get(name).cloned()
    }

    fn is_form_control(&self) -> bool {
        self.0.borrow().form_control
    }

    fn set_value(&self, value: &str) {
        self.0.borrow_mut().value = value.to_string();
    }

    fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    fn set_class(&self, class: &str, present: bool) {
        let mut data = self.0.borrow_mut();
        data.classes.retain(|c| c != class);
        if present {
            data.classes.push(class.to_string());
        }
    }

    fn set_outer_html(&self, html: &str) {
        self.0.borrow_mut().replaced_with = Some(html.to_string());
    }
}

pub struct FakeDom {
    pub nodes: RefCell<Vec<FakeNode>>,
    hydration: RefCell<HashMap<String, String>>,
    pub body_html: RefCell<Option<String>>,
    pub changes: RefCell<Vec<(String, StateChange)>>,
    pub secure: Cell<bool>,
    pub host: RefCell<String>,
}

impl FakeDom {
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(Vec::new()),
            hydration: RefCell::new(HashMap::new()),
            body_html: RefCell::new(None),
            changes: RefCell::new(Vec::new()),
            secure: Cell::new(false),
            host: RefCell::new("app.test".to_string()),
        }
    }

    pub fn with_hydration(doc: &str) -> Self {
        let dom = Self::new();
        dom.set_hydration(doc);
        dom
    }

    pub fn set_hydration(&self, doc: &str) {
        self.hydration
            .borrow_mut()
            .insert(HYDRATION_ID.to_string(), doc.to_string());
    }

    pub fn add(&self, node: FakeNode) -> FakeNode {
        self.nodes.borrow_mut().push(node.clone());
        node
    }

    /// State-change notifications seen so far, stripped of the event name.
    pub fn change_log(&self) -> Vec<StateChange> {
        self.changes.borrow().iter().map(|(_, c)| c.clone()).collect()
    }
}

impl Dom for FakeDom {
    fn origin(&self) -> PageOrigin {
        PageOrigin {
            secure: self.secure.get(),
            host: self.host.borrow().clone(),
        }
    }

    fn text_of(&self, element_id: &str) -> Option<String> {
        self.hydration.borrow().get(element_id).cloned()
    }

    fn select_bound(&self, attr: &str, state_id: &str) -> Vec<Box<dyn Element>> {
        self.nodes
            .borrow()
            .iter()
            .filter(|node| {
                node.0
                    .borrow()
                    .attrs
                    .get(attr)
                    .map(|v| v == state_id)
                    .unwrap_or(false)
            })
            .map(|node| Box::new(node.clone()) as Box<dyn Element>)
            .collect()
    }

    fn by_id(&self, element_id: &str) -> Option<Box<dyn Element>> {
        self.nodes
            .borrow()
            .iter()
            .find(|node| node.0.borrow().id.as_deref() == Some(element_id))
            .map(|node| Box::new(node.clone()) as Box<dyn Element>)
    }

    fn set_body_html(&self, html: &str) {
        *self.body_html.borrow_mut() = Some(html.to_string());
    }

    fn dispatch_state_change(&self, event_name: &str, change: &StateChange) {
        self.changes
            .borrow_mut()
            .push((event_name.to_string(), change.clone()));
    }
}

// --- Transport fake ---

/// One connection attempt the factory accepted. Tests drive it: `open`,
/// `deliver`, `close`.
pub struct FakeLink {
    pub url: String,
    pub callbacks: TransportCallbacks,
    pub sent: Rc<RefCell<Vec<String>>>,
    pub open_flag: Rc<Cell<bool>>,
}

impl FakeLink {
    pub fn open(&self) {
        self.open_flag.set(true);
        (self.callbacks.on_open)();
    }

    pub fn deliver(&self, raw: &str) {
        (self.callbacks.on_message)(raw.to_string());
    }

    pub fn close(&self) {
        self.open_flag.set(false);
        (self.callbacks.on_close)();
    }

    /// Every frame sent so far, parsed.
    pub fn sent_frames(&self) -> Vec<Value> {
        self.sent
            .borrow()
            .iter()
            .map(|raw| serde_json::from_str(raw).expect("client sent invalid JSON"))
            .collect()
    }
}

struct FakeTransport {
    sent: Rc<RefCell<Vec<String>>>,
    open_flag: Rc<Cell<bool>>,
}

impl Transport for FakeTransport {
    fn send(&self, frame: &str) -> Result<(), TransportError> {
        if !self.open_flag.get() {
            return Err(TransportError::NotOpen);
        }
        self.sent.borrow_mut().push(frame.to_string());
        Ok(())
    }
}

pub struct FakeFactory {
    pub links: RefCell<Vec<Rc<FakeLink>>>,
    pub refuse: Cell<bool>,
}

impl FakeFactory {
    pub fn new() -> Self {
        Self {
            links: RefCell::new(Vec::new()),
            refuse: Cell::new(false),
        }
    }
}

impl TransportFactory for FakeFactory {
    fn connect(
        &self,
        url: &str,
        callbacks: TransportCallbacks,
    ) -> Result<Box<dyn Transport>, TransportError> {
        if self.refuse.get() {
            return Err(TransportError::Open("refused".into()));
        }
        let sent = Rc::new(RefCell::new(Vec::new()));
        let open_flag = Rc::new(Cell::new(false));
        self.links.borrow_mut().push(Rc::new(FakeLink {
            url: url.to_string(),
            callbacks,
            sent: sent.clone(),
            open_flag: open_flag.clone(),
        }));
        Ok(Box::new(FakeTransport { sent, open_flag }))
    }
}

// --- Scheduler fake ---

enum Task {
    Once(Box<dyn FnOnce()>),
    Every(Rc<dyn Fn()>),
}

pub struct FakeScheduler {
    tasks: RefCell<Vec<(u64, Task)>>,
    pub timeout_log: RefCell<Vec<u64>>,
}

impl FakeScheduler {
    pub fn new() -> Self {
        Self {
            tasks: RefCell::new(Vec::new()),
            timeout_log: RefCell::new(Vec::new()),
        }
    }

    /// Fire the earliest pending one-shot timer; returns its delay.
    pub fn run_next_timeout(&self) -> Option<u64> {
        let pos = self
            .tasks
            .borrow()
            .iter()
            .position(|(_, task)| matches!(task, Task::Once(_)))?;
        let (delay, task) = self.tasks.borrow_mut().remove(pos);
        if let Task::Once(callback) = task {
            callback();
        }
        Some(delay)
    }

    pub fn pending_timeouts(&self) -> usize {
        self.tasks
            .borrow()
            .iter()
            .filter(|(_, task)| matches!(task, Task::Once(_)))
            .count()
    }

    /// Fire every repeating timer once.
    pub fn tick_intervals(&self) {
        let intervals: Vec<Rc<dyn Fn()>> = self
            .tasks
            .borrow()
            .iter()
            .filter_map(|(_, task)| match task {
                Task::Every(callback) => Some(callback.clone()),
                Task::Once(_) => None,
            })
            .collect();
        for callback in intervals {
            callback();
        }
    }

    pub fn interval_periods(&self) -> Vec<u64> {
        self.tasks
            .borrow()
            .iter()
            .filter_map(|(period, task)| match task {
                Task::Every(_) => Some(*period),
                Task::Once(_) => None,
            })
            .collect()
    }
}

impl Scheduler for FakeScheduler {
    fn set_timeout(&self, delay_ms: u64, callback: Box<dyn FnOnce()>) {
        self.timeout_log.borrow_mut().push(delay_ms);
        self.tasks
            .borrow_mut()
            .push((delay_ms, Task::Once(callback)));
    }

    fn set_interval(&self, period_ms: u64, callback: Box<dyn Fn()>) {
        self.tasks
            .borrow_mut()
            .push((period_ms, Task::Every(Rc::from(callback))));
    }
}

// --- Harness ---

pub struct Harness {
    pub runtime: JWebRuntime,
    pub dom: Rc<FakeDom>,
    pub factory: Rc<FakeFactory>,
    pub scheduler: Rc<FakeScheduler>,
}

impl Harness {
    pub fn new(dom: FakeDom) -> Self {
        Self::with_config(RuntimeConfig::default(), dom)
    }

    pub fn with_config(config: RuntimeConfig, dom: FakeDom) -> Self {
        let dom = Rc::new(dom);
        let factory = Rc::new(FakeFactory::new());
        let scheduler = Rc::new(FakeScheduler::new());
        let runtime = JWebRuntime::new(config, dom.clone(), factory.clone(), scheduler.clone());
        Self {
            runtime,
            dom,
            factory,
            scheduler,
        }
    }

    pub fn start(&self) {
        self.runtime.start();
    }

    pub fn link(&self, index: usize) -> Rc<FakeLink> {
        self.factory.links.borrow()[index].clone()
    }

    /// Start the runtime and complete the first connection attempt.
    pub fn start_connected(&self) -> Rc<FakeLink> {
        self.start();
        let link = self.link(0);
        link.open();
        link
    }
}
