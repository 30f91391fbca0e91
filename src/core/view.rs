//! Editor view-model: source text, story text and the loading flag.
//!
//! A request has one suspension point. `on_generate_requested` opens it and
//! hands back a `PendingRequest`; whoever performs the transport call resumes
//! the view with `settle`. Front ends without their own event loop can use
//! `generate`, which does both around a blocking `StoryService`.

use crate::core::service::{ServiceError, StoryService};
use crate::schema::source::DEFAULT_SNIPPET;
use crate::schema::style::StylePreset;
use crate::schema::wire::{StoryRequest, StoryResponse};

/// The one user-visible failure message.
pub const FAILURE_MESSAGE: &str = "Failed to generate story. Is the backend server running?";

/// Trigger label while idle.
pub const TRIGGER_LABEL_IDLE: &str = "✨ Generate Story";

/// Trigger label while a request is in flight.
pub const TRIGGER_LABEL_LOADING: &str = "Weaving a Tale...";

/// Token tying a completion to the request that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(pub u64);

/// Per-request state. `Idle` is both initial and terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Requesting(RequestSeq),
}

/// How the most recent settled request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

/// Result of handing a completion back to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied(Outcome),
    /// The completion did not belong to the in-flight request; nothing changed.
    Discarded,
}

/// An outbound request the view has committed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub seq: RequestSeq,
    pub body: StoryRequest,
}

/// What the result pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultPane<'a> {
    Loading,
    Narrative(&'a str),
}

#[derive(Debug, Clone)]
pub struct EditorView {
    source: String,
    narrative: String,
    style: StylePreset,
    state: RequestState,
    last_outcome: Option<Outcome>,
    next_seq: u64,
}

impl Default for EditorView {
    fn default() -> Self {
        Self::new(StylePreset::default())
    }
}

impl EditorView {
    pub fn new(style: StylePreset) -> Self {
        Self {
            source: DEFAULT_SNIPPET.to_string(),
            narrative: String::new(),
            style,
            state: RequestState::Idle,
            last_outcome: None,
            next_seq: 0,
        }
    }

    /// Start with `source` in the input pane instead of the default snippet.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn narrative(&self) -> &str {
        &self.narrative
    }

    pub fn style(&self) -> &StylePreset {
        &self.style
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Requesting(_))
    }

    pub fn trigger_enabled(&self) -> bool {
        !self.is_loading()
    }

    pub fn trigger_label(&self) -> &'static str {
        if self.is_loading() {
            TRIGGER_LABEL_LOADING
        } else {
            TRIGGER_LABEL_IDLE
        }
    }

    pub fn result_pane(&self) -> ResultPane<'_> {
        if self.is_loading() {
            ResultPane::Loading
        } else {
            ResultPane::Narrative(&self.narrative)
        }
    }

    /// Replace the source text. An editor that reports no value clears it.
    pub fn on_source_change(&mut self, new_text: Option<String>) {
        self.source = new_text.unwrap_or_default();
    }

    pub fn set_style(&mut self, style: StylePreset) {
        self.style = style;
    }

    /// Begin a request. Returns `None` while another one is in flight.
    pub fn on_generate_requested(&mut self) -> Option<PendingRequest> {
        if let RequestState::Requesting(seq) = self.state {
            tracing::debug!(in_flight = seq.0, "Generate ignored while a request is in flight");
            return None;
        }

        self.next_seq += 1;
        let seq = RequestSeq(self.next_seq);
        self.state = RequestState::Requesting(seq);
        self.narrative.clear();

        tracing::info!(seq = seq.0, style = %self.style, "Story request started");

        Some(PendingRequest {
            seq,
            body: StoryRequest {
                code: self.source.clone(),
                style: self.style.as_str().to_string(),
            },
        })
    }

    /// Resume the view with the result of request `seq`.
    ///
    /// Completions for anything other than the in-flight request are dropped
    /// without touching state.
    pub fn settle(
        &mut self,
        seq: RequestSeq,
        result: Result<StoryResponse, ServiceError>,
    ) -> Settlement {
        match self.state {
            RequestState::Requesting(current) if current == seq => {}
            state => {
                tracing::debug!(seq = seq.0, ?state, "Discarding stale story completion");
                return Settlement::Discarded;
            }
        }

        let outcome = match result {
            Ok(response) => {
                tracing::info!(seq = seq.0, story_len = response.story.len(), "Story received");
                self.narrative = response.story;
                Outcome::Succeeded
            }
            Err(error) => {
                tracing::warn!(seq = seq.0, %error, "Error generating story");
                self.narrative = FAILURE_MESSAGE.to_string();
                Outcome::Failed
            }
        };

        self.state = RequestState::Idle;
        self.last_outcome = Some(outcome);
        Settlement::Applied(outcome)
    }

    /// Run one full request cycle against a blocking service.
    ///
    /// Returns `None` if the trigger was inert.
    pub fn generate(&mut self, service: &dyn StoryService) -> Option<Outcome> {
        let pending = self.on_generate_requested()?;
        let result = service.generate(&pending.body);
        match self.settle(pending.seq, result) {
            Settlement::Applied(outcome) => Some(outcome),
            Settlement::Discarded => None,
        }
    }
}
