use async_trait::async_trait;
use reader_assistant::bridge::{BridgeError, HostBridge};
use reader_assistant::client::{AssistantClient, AssistantOp, CapabilityStatus, FailureReporter};
use reader_assistant::item::{Comment, Story};
use reader_assistant::panel::{PanelController, PanelEvent, QuickAction};
use reader_assistant::ui::{
    Point, RenderedMessage, SelectionSnapshot, Size, UiSurface,
};
use serde_json::{Value, json};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use tokio::sync::mpsc;

/// Host bridge double: replays queued results and records every call.
/// An exhausted queue rejects, which keeps forgotten pushes loud.
#[derive(Default)]
pub struct ScriptedBridge {
    calls: RefCell<Vec<(String, Value)>>,
    responses: RefCell<VecDeque<Result<Value, BridgeError>>>,
}

impl ScriptedBridge {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn push_ok(&self, value: Value) {
        self.responses.borrow_mut().push_back(Ok(value));
    }

    pub fn push_err(&self, err: BridgeError) {
        self.responses.borrow_mut().push_back(Err(err));
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn command_names(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn call_args(&self, index: usize) -> Value {
        self.calls.borrow()[index].1.clone()
    }
}

#[async_trait(?Send)]
impl HostBridge for ScriptedBridge {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, BridgeError> {
        self.calls.borrow_mut().push((command.to_owned(), args));
        self.responses.borrow_mut().pop_front().unwrap_or(Err(BridgeError::Unspecified))
    }
}

/// Failure hook double: remembers every report.
#[derive(Default)]
pub struct RecordingReporter {
    pub reports: RefCell<Vec<(AssistantOp, String)>>,
}

impl FailureReporter for RecordingReporter {
    fn report(&self, op: AssistantOp, message: &str) {
        self.reports.borrow_mut().push((op, message.to_owned()));
    }
}

/// UI surface double: records everything the controller and menu push at it.
pub struct RecordingSurface {
    pub focus_count: Cell<usize>,
    pub open_states: RefCell<Vec<bool>>,
    pub affordance_visible: Cell<bool>,
    marker: Cell<bool>,
    pub last_transcript: RefCell<Vec<RenderedMessage>>,
    pub last_loading: Cell<bool>,
    pub transcript_renders: Cell<usize>,
    pub quick_actions: RefCell<Vec<QuickAction>>,
    pub statuses: RefCell<Vec<CapabilityStatus>>,
    pub menu_shown: RefCell<Vec<(Point, bool)>>,
    pub menu_hidden: Cell<usize>,
    pub selection: RefCell<Option<SelectionSnapshot>>,
    pub viewport: Cell<Size>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            focus_count: Cell::new(0),
            open_states: RefCell::new(Vec::new()),
            affordance_visible: Cell::new(false),
            marker: Cell::new(false),
            last_transcript: RefCell::new(Vec::new()),
            last_loading: Cell::new(false),
            transcript_renders: Cell::new(0),
            quick_actions: RefCell::new(Vec::new()),
            statuses: RefCell::new(Vec::new()),
            menu_shown: RefCell::new(Vec::new()),
            menu_hidden: Cell::new(0),
            selection: RefCell::new(None),
            viewport: Cell::new(Size { width: 1280.0, height: 720.0 }),
        }
    }
}

impl RecordingSurface {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn set_selection(&self, snapshot: SelectionSnapshot) {
        *self.selection.borrow_mut() = Some(snapshot);
    }
}

impl UiSurface for RecordingSurface {
    fn focus_input(&self) {
        self.focus_count.set(self.focus_count.get() + 1);
    }

    fn set_panel_open(&self, open: bool) {
        self.open_states.borrow_mut().push(open);
    }

    fn set_affordance_visible(&self, visible: bool) {
        self.affordance_visible.set(visible);
    }

    fn set_selection_assist_marker(&self, active: bool) {
        self.marker.set(active);
    }

    fn selection_assist_marker(&self) -> bool {
        self.marker.get()
    }

    fn render_transcript(&self, messages: &[RenderedMessage], loading: bool) {
        *self.last_transcript.borrow_mut() = messages.to_vec();
        self.last_loading.set(loading);
        self.transcript_renders.set(self.transcript_renders.get() + 1);
    }

    fn render_quick_actions(&self, actions: &[QuickAction]) {
        *self.quick_actions.borrow_mut() = actions.to_vec();
    }

    fn show_capability_status(&self, status: &CapabilityStatus) {
        self.statuses.borrow_mut().push(status.clone());
    }

    fn show_selection_menu(&self, at: Point, draft_enabled: bool) {
        self.menu_shown.borrow_mut().push((at, draft_enabled));
    }

    fn hide_selection_menu(&self) {
        self.menu_hidden.set(self.menu_hidden.get() + 1);
    }

    fn current_selection(&self) -> Option<SelectionSnapshot> {
        self.selection.borrow().clone()
    }

    fn viewport(&self) -> Size {
        self.viewport.get()
    }
}

/// JSON payload for a ready capability status, as `copilot_check`/`init`
/// return it.
pub fn ready_status_value() -> Value {
    json!({
        "available": true,
        "running": true,
        "cli_installed": true,
        "cli_authenticated": true,
        "message": "AI assistant ready",
    })
}

/// JSON payload for an assistant response.
pub fn response_value(content: &str) -> Value {
    json!({ "content": content })
}

pub fn story(url: Option<&str>, descendants: u32) -> Story {
    Story {
        id: 42,
        title: "Rust 2.0 announced".to_owned(),
        url: url.map(str::to_owned),
        score: 321,
        by: Some("pg".to_owned()),
        text: None,
        descendants,
    }
}

pub fn comment(id: u32, text: &str, kids: u32) -> Comment {
    Comment {
        id,
        by: Some(format!("user{id}")),
        text: Some(text.to_owned()),
        kids: (0..kids).map(|k| id * 100 + k).collect(),
    }
}

/// A panel wired to a recording surface; the caller keeps the event
/// receiver and pumps it with [`settle`].
pub fn test_panel(
    bridge: Option<Rc<dyn HostBridge>>,
) -> (PanelController, Rc<RecordingSurface>, mpsc::UnboundedReceiver<PanelEvent>) {
    let surface = RecordingSurface::new();
    let client = Rc::new(AssistantClient::new(bridge));
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let panel = PanelController::new(client, surface.clone(), event_tx);
    (panel, surface, event_rx)
}

/// Let spawned request tasks run, then route their completion events back
/// into the controller. Tests call this inside a `LocalSet`.
pub async fn settle(panel: &mut PanelController, rx: &mut mpsc::UnboundedReceiver<PanelEvent>) {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
    while let Ok(event) = rx.try_recv() {
        panel.handle_event(event);
    }
}
