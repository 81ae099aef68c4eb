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

use super::state::{
    ConversationContext, Message, MessageRole, PanelEvent, QuickAction, quick_actions,
};
use super::visibility::{ReaderView, assistant_visible};
use crate::client::{
    AssistantClient, CommentSummary, DiscussionContext, ReplyContext, StoryContext,
};
use crate::item::{self, Comment, Story};
use crate::ui::{RenderedMessage, UiSurface, markdown};
use std::rc::Rc;
use tokio::sync::mpsc;

/// Shown in place of a response whenever a content request resolves to
/// nothing. Raw error text never reaches the transcript.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// How many top-level comments a discussion analysis carries.
const ANALYSIS_COMMENT_LIMIT: usize = 10;
/// Plaintext preview length per comment in a discussion analysis.
const PREVIEW_CHAR_LIMIT: usize = 200;
/// Selections longer than this are treated as a reply draft in progress.
const DRAFT_MIN_CHARS: usize = 10;

/// Owner of the conversation transcript, context binding, quick actions and
/// rendering orchestration.
///
/// Public methods are synchronous state transitions; host-bridge work runs
/// in `spawn_local` tasks whose results come back through the event channel
/// as [`PanelEvent`]s. The `is_loading` gate admits at most one request at
/// a time, so responses land in the transcript in issue order.
pub struct PanelController {
    client: Rc<AssistantClient>,
    surface: Rc<dyn UiSurface>,
    event_tx: mpsc::UnboundedSender<PanelEvent>,
    messages: Vec<Message>,
    context: ConversationContext,
    is_open: bool,
    is_loading: bool,
    visible: bool,
}

impl PanelController {
    #[must_use]
    pub fn new(
        client: Rc<AssistantClient>,
        surface: Rc<dyn UiSurface>,
        event_tx: mpsc::UnboundedSender<PanelEvent>,
    ) -> Self {
        Self {
            client,
            surface,
            event_tx,
            messages: Vec::new(),
            context: ConversationContext::default(),
            is_open: false,
            is_loading: false,
            visible: false,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether the visibility policy currently shows the affordance.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    #[must_use]
    pub fn quick_actions(&self) -> Vec<QuickAction> {
        quick_actions(&self.context)
    }

    /// Flip the panel open or closed. Opening lazily initializes the
    /// capability client and focuses the input surface.
    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
        self.surface.set_panel_open(self.is_open);
        if self.is_open {
            if !self.client.is_initialized() {
                self.spawn_init();
            }
            self.surface.focus_input();
            self.render_quick_actions();
            self.render_transcript();
        }
    }

    /// Close the panel if it is open; otherwise nothing happens.
    pub fn close(&mut self) {
        if self.is_open {
            self.toggle();
        }
    }

    /// Bind the panel to the story being read.
    pub fn set_context(&mut self, story: Story, comments: Vec<Comment>) {
        self.context.story = Some(story);
        self.context.comments = comments;
        self.render_quick_actions();
    }

    /// Unbind when the user leaves the story's view. The transcript stays.
    pub fn clear_context(&mut self) {
        self.context.clear();
        self.render_quick_actions();
    }

    /// Apply the visibility policy for the current mode and view. Losing
    /// visibility while open force-closes the panel.
    pub fn set_visibility(&mut self, zen_mode: bool, view: ReaderView) {
        let visible = assistant_visible(zen_mode, view);
        self.visible = visible;
        self.surface.set_affordance_visible(visible);
        self.surface.set_selection_assist_marker(visible);
        if !visible && self.is_open {
            self.close();
        }
    }

    pub fn run_quick_action(&mut self, action: QuickAction) {
        match action {
            QuickAction::Summarize => self.run_summarize(),
            QuickAction::AnalyzeDiscussion => self.run_analyze_discussion(),
            QuickAction::AskAboutThis => self.surface.focus_input(),
        }
    }

    /// Send the user's own question. Empty input and sends while a request
    /// is in flight are ignored.
    pub fn send_freeform(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() || self.is_loading {
            return;
        }
        self.push_message(Message::user(text));
        let prompt = self.annotate_prompt(text);
        self.begin_request(Request::Ask { prompt });
    }

    /// Summarize the bound story from its metadata.
    pub fn run_summarize(&mut self) {
        if self.is_loading {
            return;
        }
        let Some(story) = self.context.story.as_ref() else {
            return;
        };
        let context = StoryContext {
            title: story.title.clone(),
            url: story.url.clone(),
            domain: story.url.as_deref().and_then(item::domain_of),
            score: story.score,
            comment_count: story.descendants,
            author: story.by.clone(),
            text: story.text.clone(),
        };
        self.push_message(Message::user("Summarize this article"));
        self.begin_request(Request::Summarize(context));
    }

    /// Analyze the bound story's discussion from its first comments.
    pub fn run_analyze_discussion(&mut self) {
        if self.is_loading {
            return;
        }
        let Some(story) = self.context.story.as_ref() else {
            return;
        };
        if self.context.comments.is_empty() {
            return;
        }
        let top_comments = self
            .context
            .comments
            .iter()
            .take(ANALYSIS_COMMENT_LIMIT)
            .map(|comment| CommentSummary {
                author: comment.by.clone().unwrap_or_else(|| "unknown".to_owned()),
                text_preview: item::plain_text_preview(
                    comment.text.as_deref().unwrap_or_default(),
                    PREVIEW_CHAR_LIMIT,
                ),
                reply_count: u32::try_from(comment.kids.len()).unwrap_or(u32::MAX),
            })
            .collect();
        let context = DiscussionContext {
            story_title: story.title.clone(),
            comment_count: story.descendants,
            top_comments,
        };
        self.push_message(Message::user("Analyze this discussion"));
        self.begin_request(Request::AnalyzeDiscussion(context));
    }

    /// Explain a selected term or passage. Invoked by the selection menu;
    /// opens the panel if it was closed.
    pub fn run_explain(&mut self, selected: &str) {
        if self.is_loading {
            return;
        }
        if !self.is_open {
            self.toggle();
        }
        self.push_message(Message::user(format!("Explain: \"{selected}\"")));
        let context =
            self.context.story.as_ref().map(|story| format!("Discussion of \"{}\"", story.title));
        self.begin_request(Request::Explain { text: selected.to_owned(), context });
    }

    /// Draft a reply to a comment. Selections longer than a few words are
    /// treated as the user's draft so far.
    pub fn run_draft_reply(&mut self, selected: &str, author: &str, comment_body: &str) {
        if self.is_loading {
            return;
        }
        if !self.is_open {
            self.toggle();
        }
        self.push_message(Message::user(format!("Help me draft a reply to {author}")));
        let user_draft =
            (selected.chars().count() > DRAFT_MIN_CHARS).then(|| selected.to_owned());
        let context = ReplyContext {
            parent_comment: comment_body.to_owned(),
            parent_author: author.to_owned(),
            story_title: self
                .context
                .story
                .as_ref()
                .map(|story| story.title.clone())
                .unwrap_or_default(),
            user_draft,
        };
        self.begin_request(Request::DraftReply(context));
    }

    /// Route a completion event from a spawned task back into the state.
    pub fn handle_event(&mut self, event: PanelEvent) {
        match event {
            PanelEvent::InitFinished(status) => {
                if !status.available {
                    tracing::warn!("assistant unavailable: {}", status.message);
                }
                self.surface.show_capability_status(&status);
            }
            PanelEvent::RequestFinished(response) => {
                let content =
                    response.map_or_else(|| FALLBACK_REPLY.to_owned(), |reply| reply.content);
                self.messages.push(Message::assistant(content));
                self.is_loading = false;
                self.render_transcript();
            }
        }
    }

    fn annotate_prompt(&self, text: &str) -> String {
        let Some(story) = self.context.story.as_ref() else {
            return text.to_owned();
        };
        match story.url.as_deref().and_then(item::domain_of) {
            Some(domain) => format!("[Reading \"{}\" ({domain})] {text}", story.title),
            None => format!("[Reading \"{}\"] {text}", story.title),
        }
    }

    fn push_message(&mut self, message: Message) {
        self.messages.push(message);
        self.render_transcript();
    }

    fn begin_request(&mut self, request: Request) {
        self.is_loading = true;
        self.render_transcript();
        let client = Rc::clone(&self.client);
        let event_tx = self.event_tx.clone();
        tokio::task::spawn_local(async move {
            let response = match request {
                Request::Summarize(context) => client.summarize(context).await,
                Request::AnalyzeDiscussion(context) => client.analyze_discussion(context).await,
                Request::Explain { text, context } => {
                    client.explain(&text, context.as_deref()).await
                }
                Request::DraftReply(context) => client.draft_reply(context).await,
                Request::Ask { prompt } => client.ask(&prompt).await,
            };
            let _ = event_tx.send(PanelEvent::RequestFinished(response));
        });
    }

    fn spawn_init(&self) {
        let client = Rc::clone(&self.client);
        let event_tx = self.event_tx.clone();
        tokio::task::spawn_local(async move {
            let status = client.init().await;
            let _ = event_tx.send(PanelEvent::InitFinished(status));
        });
    }

    fn render_transcript(&self) {
        let rendered: Vec<RenderedMessage> = self
            .messages
            .iter()
            .map(|message| RenderedMessage {
                id: message.id,
                role: message.role,
                markup: match message.role {
                    MessageRole::Assistant => markdown::render(&message.content),
                    MessageRole::User => format!("<p>{}</p>", markdown::escape(&message.content)),
                },
            })
            .collect();
        self.surface.render_transcript(&rendered, self.is_loading);
    }

    fn render_quick_actions(&self) {
        self.surface.render_quick_actions(&quick_actions(&self.context));
    }
}

/// One in-flight content request, handed to the spawned task.
enum Request {
    Summarize(StoryContext),
    AnalyzeDiscussion(DiscussionContext),
    Explain { text: String, context: Option<String> },
    DraftReply(ReplyContext),
    Ask { prompt: String },
}
