// reader-assistant — AI reading assistant for a native Hacker News reader
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Capability client: single source of truth for whether the host-provided
//! AI capability can be used, and the sole channel through which requests
//! reach it.
//!
//! Every public operation is fail-soft. Transport failures are caught here,
//! reported through the [`FailureReporter`] hook, and converted to either a
//! degraded [`CapabilityStatus`] or a `None` content result. No exception
//! ever escapes to the panel layer.

mod types;

pub use types::{
    AssistantResponse, CapabilityStatus, CommentSummary, DiscussionContext, ReplyContext,
    StoryContext,
};

use crate::bridge::{HostBridge, commands};
use serde_json::{Value, json};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Which client operation a failure report refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantOp {
    Check,
    Init,
    Summarize,
    AnalyzeDiscussion,
    Explain,
    DraftReply,
    Ask,
    Shutdown,
}

impl AssistantOp {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Init => "init",
            Self::Summarize => "summarize",
            Self::AnalyzeDiscussion => "analyze_discussion",
            Self::Explain => "explain",
            Self::DraftReply => "draft_reply",
            Self::Ask => "ask",
            Self::Shutdown => "shutdown",
        }
    }

    /// Whether a skipped-while-unavailable request is worth a diagnostic.
    /// `explain` fires from ad-hoc text selections and stays quiet.
    fn logs_unavailable(self) -> bool {
        !matches!(self, Self::Explain)
    }
}

/// Structured failure-observation hook. Host applications can substitute
/// their own reporter to count or surface failures without scraping logs.
pub trait FailureReporter {
    fn report(&self, op: AssistantOp, message: &str);
}

/// Default reporter: one `tracing` error line per failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl FailureReporter for LogReporter {
    fn report(&self, op: AssistantOp, message: &str) {
        tracing::error!(op = op.name(), "assistant request failed: {message}");
    }
}

/// Client for the optional host-side assistant capability.
///
/// State lives behind `Cell`/`RefCell` so content operations can run from
/// tasks holding an `Rc<AssistantClient>`; there is exactly one logical
/// writer (the UI thread), all mutation happens between suspension points.
pub struct AssistantClient {
    bridge: Option<Rc<dyn HostBridge>>,
    reporter: Rc<dyn FailureReporter>,
    initialized: Cell<bool>,
    available: Cell<bool>,
    last_status: RefCell<CapabilityStatus>,
}

impl AssistantClient {
    /// A client starts unavailable and uninitialized; `init` transitions it.
    /// `bridge: None` models a runtime without the host bridge.
    #[must_use]
    pub fn new(bridge: Option<Rc<dyn HostBridge>>) -> Self {
        Self::with_reporter(bridge, Rc::new(LogReporter))
    }

    #[must_use]
    pub fn with_reporter(
        bridge: Option<Rc<dyn HostBridge>>,
        reporter: Rc<dyn FailureReporter>,
    ) -> Self {
        Self {
            bridge,
            reporter,
            initialized: Cell::new(false),
            available: Cell::new(false),
            last_status: RefCell::new(CapabilityStatus::unchecked()),
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available.get()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    #[must_use]
    pub fn last_status(&self) -> CapabilityStatus {
        self.last_status.borrow().clone()
    }

    /// Probe the capability without initializing it. Never calls the host
    /// when the bridge is absent.
    pub async fn check(&self) -> CapabilityStatus {
        let Some(bridge) = self.bridge.clone() else {
            return self.adopt(CapabilityStatus::bridge_absent());
        };
        tracing::debug!("checking assistant availability");
        match bridge.invoke(commands::CHECK, Value::Null).await {
            Ok(value) => match serde_json::from_value::<CapabilityStatus>(value) {
                Ok(status) => self.adopt(status),
                Err(err) => {
                    self.degrade(AssistantOp::Check, &format!("malformed status payload: {err}"))
                }
            },
            Err(err) => self.degrade(AssistantOp::Check, &err.message_or("Check failed")),
        }
    }

    /// Initialize the capability. On success the client adopts the returned
    /// `available` flag; on failure it stays uninitialized and unavailable.
    pub async fn init(&self) -> CapabilityStatus {
        let Some(bridge) = self.bridge.clone() else {
            return self.adopt(CapabilityStatus::bridge_absent());
        };
        tracing::debug!("initializing assistant capability");
        match bridge.invoke(commands::INIT, Value::Null).await {
            Ok(value) => match serde_json::from_value::<CapabilityStatus>(value) {
                Ok(status) => {
                    self.initialized.set(true);
                    if status.available {
                        tracing::info!("assistant capability ready");
                    }
                    self.adopt(status)
                }
                Err(err) => {
                    self.degrade(AssistantOp::Init, &format!("malformed status payload: {err}"))
                }
            },
            Err(err) => self.degrade(AssistantOp::Init, &err.message_or("Failed to initialize")),
        }
    }

    /// Summarize a story from its metadata.
    pub async fn summarize(&self, context: StoryContext) -> Option<AssistantResponse> {
        self.request(AssistantOp::Summarize, commands::SUMMARIZE, json!({ "context": context }))
            .await
    }

    /// Analyze a discussion thread.
    pub async fn analyze_discussion(
        &self,
        context: DiscussionContext,
    ) -> Option<AssistantResponse> {
        self.request(
            AssistantOp::AnalyzeDiscussion,
            commands::ANALYZE_DISCUSSION,
            json!({ "context": context }),
        )
        .await
    }

    /// Explain a selected term or passage, optionally with one line of
    /// surrounding context.
    pub async fn explain(&self, text: &str, context: Option<&str>) -> Option<AssistantResponse> {
        self.request(
            AssistantOp::Explain,
            commands::EXPLAIN,
            json!({ "text": text, "context": context }),
        )
        .await
    }

    /// Help draft a reply to a comment.
    pub async fn draft_reply(&self, context: ReplyContext) -> Option<AssistantResponse> {
        self.request(AssistantOp::DraftReply, commands::DRAFT_REPLY, json!({ "context": context }))
            .await
    }

    /// Ask a free-form question.
    pub async fn ask(&self, prompt: &str) -> Option<AssistantResponse> {
        self.request(AssistantOp::Ask, commands::ASK, json!({ "prompt": prompt })).await
    }

    /// Release the host-side capability. A no-op when the bridge is absent
    /// or the client was never initialized; otherwise both lifecycle flags
    /// reset regardless of whether the host call succeeds.
    pub async fn shutdown(&self) {
        let Some(bridge) = self.bridge.clone() else {
            return;
        };
        if !self.initialized.get() {
            return;
        }
        if let Err(err) = bridge.invoke(commands::SHUTDOWN, Value::Null).await {
            tracing::warn!("assistant shutdown failed: {}", err.message_or("shutdown failed"));
        }
        self.available.set(false);
        self.initialized.set(false);
        let mut status = self.last_status.borrow_mut();
        status.available = false;
        status.running = false;
        status.message = "AI assistant stopped.".to_owned();
    }

    /// One content request: no call while unavailable, exactly one host call
    /// otherwise, any failure becomes a terminal `None` for this invocation.
    async fn request(
        &self,
        op: AssistantOp,
        command: &'static str,
        args: Value,
    ) -> Option<AssistantResponse> {
        if !self.available.get() {
            if op.logs_unavailable() {
                tracing::debug!(op = op.name(), "assistant unavailable, request skipped");
            }
            return None;
        }
        // `available` is never true without a bridge.
        let bridge = self.bridge.clone()?;
        match bridge.invoke(command, args).await {
            Ok(value) => match serde_json::from_value::<AssistantResponse>(value) {
                Ok(response) => Some(response),
                Err(err) => {
                    self.reporter.report(op, &format!("malformed response payload: {err}"));
                    None
                }
            },
            Err(err) => {
                self.reporter.report(op, &err.message_or("request failed"));
                None
            }
        }
    }

    fn adopt(&self, status: CapabilityStatus) -> CapabilityStatus {
        self.available.set(status.available);
        *self.last_status.borrow_mut() = status.clone();
        status
    }

    fn degrade(&self, op: AssistantOp, message: &str) -> CapabilityStatus {
        self.reporter.report(op, message);
        self.available.set(false);
        let status = CapabilityStatus::degraded(message);
        *self.last_status.borrow_mut() = status.clone();
        status
    }
}
