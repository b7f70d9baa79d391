//! GiftAdvisor — the core's single entry point for transports.
//!
//! A transport delivers `(session_id, Event)` pairs and renders the returned
//! `Reply`. Per-session serialisation is the transport's job; the advisor
//! only guarantees that the session registry lock is never held across the
//! call to the text-generation service.

use std::fmt::Write;
use std::sync::Arc;

use crate::catalog::{CatalogEntry, Dimension};
use crate::config::SessionsConfig;
use crate::conversation::{
    machine, ConversationState, RecommendationRequest, RejectedTransition, SessionId,
    SessionStore,
};
use crate::inference::RecommendationClient;
use crate::recommendation::{self, RecommendationResult};
use crate::TokioMutex;

use super::texts;

// ─── Events and Replies ─────────────────────────────────────────────────────

/// Something the user did, as understood by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Begin (or restart) parameter collection.
    StartCollection,
    /// The user picked `key` for `dimension` (e.g. decoded from callback data).
    SelectionMade { dimension: Dimension, key: String },
    /// Free text to attach to the request.
    FreeTextNote(String),
}

/// What to ask the user next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPrompt {
    pub dimension: Dimension,
    pub title: &'static str,
    pub options: &'static [CatalogEntry],
}

impl StepPrompt {
    pub fn for_dimension(dimension: Dimension) -> Self {
        Self {
            dimension,
            title: dimension.title(),
            options: dimension.options(),
        }
    }

    /// Prompt for the step `state` is waiting on; `None` once completed.
    pub fn for_state(state: &ConversationState) -> Option<Self> {
        state.step().expected_dimension().map(Self::for_dimension)
    }

    /// Resolve free user input against the options: an exact key or a
    /// 1-based position.
    pub fn resolve(&self, input: &str) -> Option<&'static CatalogEntry> {
        let input = input.trim();
        if let Some(entry) = self.options.iter().find(|entry| entry.key == input) {
            return Some(entry);
        }
        let position: usize = input.parse().ok()?;
        position.checked_sub(1).and_then(|i| self.options.get(i))
    }
}

/// The core's answer to one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Ask for the next dimension.
    Prompt(StepPrompt),
    /// The selection was rejected; the same step is asked again.
    ChooseAgain {
        reason: RejectedTransition,
        prompt: StepPrompt,
    },
    /// The note was stored; the current step is unchanged.
    NoteAttached(StepPrompt),
    /// No collection is in progress for this session.
    NoActiveSession,
    /// Collection finished; the final list.
    Recommendations(RecommendationResult),
}

impl Reply {
    /// Plain-text rendering for text-only transports.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        match self {
            Reply::Prompt(prompt) => render_prompt(&mut out, prompt),
            Reply::ChooseAgain { prompt, .. } => {
                out.push_str(texts::CHOOSE_AGAIN);
                out.push_str("\n\n");
                render_prompt(&mut out, prompt);
            }
            Reply::NoteAttached(prompt) => {
                out.push_str(texts::NOTE_ATTACHED);
                out.push_str("\n\n");
                render_prompt(&mut out, prompt);
            }
            Reply::NoActiveSession => out.push_str(texts::NO_ACTIVE_SESSION),
            Reply::Recommendations(result) => {
                out.push_str(texts::RECOMMENDATIONS_HEADER);
                out.push('\n');
                for (i, item) in result.items.iter().enumerate() {
                    let _ = writeln!(out, "{}. {item}", i + 1);
                }
                out.push('\n');
                out.push_str(texts::RECOMMENDATIONS_FOOTER);
            }
        }
        out
    }
}

fn render_prompt(out: &mut String, prompt: &StepPrompt) {
    let _ = writeln!(out, "{}:", prompt.title);
    for (i, entry) in prompt.options.iter().enumerate() {
        let _ = writeln!(out, "  {}. {} [{}]", i + 1, entry.label, entry.key);
    }
}

// ─── GiftAdvisor ────────────────────────────────────────────────────────────

/// Routes events to per-session state and produces recommendations.
pub struct GiftAdvisor {
    client: Arc<dyn RecommendationClient>,
    sessions: TokioMutex<SessionStore>,
    idle_timeout: chrono::Duration,
}

impl GiftAdvisor {
    pub fn new(client: Arc<dyn RecommendationClient>, sessions: &SessionsConfig) -> Self {
        Self {
            client,
            sessions: TokioMutex::new(SessionStore::new()),
            idle_timeout: chrono::Duration::minutes(i64::from(sessions.idle_timeout_mins)),
        }
    }

    /// Handle one event for `session_id`.
    pub async fn handle(&self, session_id: &SessionId, event: Event) -> Reply {
        let request = match self.apply(session_id, event).await {
            Ok(request) => request,
            Err(reply) => return reply,
        };

        tracing::info!(
            session = %session_id,
            category = %request.category,
            has_note = request.note.is_some(),
            "collection complete"
        );
        Reply::Recommendations(self.recommend(&request).await)
    }

    /// Apply the event under the registry lock.
    ///
    /// Returns `Ok(request)` when the collection just completed (the record
    /// has already been removed), or `Err(reply)` for every other outcome.
    async fn apply(
        &self,
        session_id: &SessionId,
        event: Event,
    ) -> Result<RecommendationRequest, Reply> {
        let mut sessions = self.sessions.lock().await;

        match event {
            Event::StartCollection => {
                let state = sessions.start(session_id.clone());
                tracing::info!(session = %session_id, "collection started");
                Err(StepPrompt::for_state(state).map_or(Reply::NoActiveSession, Reply::Prompt))
            }

            Event::FreeTextNote(text) => {
                let state = sessions.get(session_id).ok_or(Reply::NoActiveSession)?;
                let next = machine::attach_note(state, &text);
                let prompt = StepPrompt::for_state(&next).ok_or(Reply::NoActiveSession)?;
                sessions.insert(next);
                Err(Reply::NoteAttached(prompt))
            }

            Event::SelectionMade { dimension, key } => {
                let state = sessions.get(session_id).ok_or(Reply::NoActiveSession)?;
                let next = match machine::advance(state, dimension, &key) {
                    Ok(next) => next,
                    Err(reason) => {
                        tracing::debug!(session = %session_id, %reason, "selection rejected");
                        let prompt = StepPrompt::for_state(state).ok_or(Reply::NoActiveSession)?;
                        return Err(Reply::ChooseAgain { reason, prompt });
                    }
                };

                match next.to_request() {
                    Some(request) => {
                        sessions.remove(session_id);
                        Ok(request)
                    }
                    None => {
                        let prompt = StepPrompt::for_state(&next).ok_or(Reply::NoActiveSession)?;
                        sessions.insert(next);
                        Err(Reply::Prompt(prompt))
                    }
                }
            }
        }
    }

    /// Run the pipeline for a completed request. Never fails: service errors
    /// are logged here and absorbed by the parser's fallback path.
    pub async fn recommend(&self, request: &RecommendationRequest) -> RecommendationResult {
        let prompt = recommendation::build_prompt(request);
        let raw = self.client.fetch(&prompt).await;

        if let Err(e) = &raw {
            tracing::warn!(
                error = %e,
                kind = e.kind(),
                category = %request.category,
                "text generation failed, using fallback recommendations"
            );
        }

        let result = recommendation::parse(raw, &request.category);
        tracing::info!(
            count = result.len(),
            source = ?result.source,
            "recommendations ready"
        );
        result
    }

    /// The step currently awaited by `session_id`, if collecting.
    pub async fn current_prompt(&self, session_id: &SessionId) -> Option<StepPrompt> {
        let sessions = self.sessions.lock().await;
        sessions.get(session_id).and_then(StepPrompt::for_state)
    }

    /// Discard sessions idle longer than the configured timeout.
    pub async fn prune_idle(&self) -> usize {
        let mut sessions = self.sessions.lock().await;
        sessions.prune_idle(chrono::Utc::now(), self.idle_timeout)
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
