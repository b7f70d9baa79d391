//! Shared types for the conversation core.
//!
//! The per-user collection record, the step tag that drives it, and the
//! immutable request derived from a completed record.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Dimension;

// ─── Session Identity ───────────────────────────────────────────────────────

/// Opaque identifier of a user conversation, assigned by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<i64> for SessionId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

// ─── Step ───────────────────────────────────────────────────────────────────

/// Which parameter the conversation is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    AwaitingCategory,
    AwaitingAge,
    AwaitingGender,
    AwaitingOccasion,
    AwaitingBudget,
    Completed,
}

impl Step {
    /// The dimension this step collects, or `None` when completed.
    pub fn expected_dimension(self) -> Option<Dimension> {
        match self {
            Self::AwaitingCategory => Some(Dimension::GiftCategory),
            Self::AwaitingAge => Some(Dimension::AgeGroup),
            Self::AwaitingGender => Some(Dimension::Gender),
            Self::AwaitingOccasion => Some(Dimension::Occasion),
            Self::AwaitingBudget => Some(Dimension::Budget),
            Self::Completed => None,
        }
    }

    /// The step that waits for `dimension`.
    pub fn awaiting(dimension: Dimension) -> Self {
        match dimension {
            Dimension::GiftCategory => Self::AwaitingCategory,
            Dimension::AgeGroup => Self::AwaitingAge,
            Dimension::Gender => Self::AwaitingGender,
            Dimension::Occasion => Self::AwaitingOccasion,
            Dimension::Budget => Self::AwaitingBudget,
        }
    }

    /// The step that follows once `dimension` has been filled.
    pub fn after(dimension: Dimension) -> Self {
        dimension.next().map_or(Self::Completed, Self::awaiting)
    }

    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}

// ─── ConversationState ──────────────────────────────────────────────────────

/// Per-user parameter collection record.
///
/// Fields are only writable from within the conversation module; the step
/// machine is the single place that moves `step` forward.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationState {
    pub(super) session_id: SessionId,
    pub(super) step: Step,
    pub(super) selections: BTreeMap<Dimension, &'static str>,
    pub(super) note: Option<String>,
    pub(super) started_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl ConversationState {
    /// A fresh record waiting for the gift category.
    pub fn new(session_id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            step: Step::AwaitingCategory,
            selections: BTreeMap::new(),
            note: None,
            started_at: now,
            updated_at: now,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// The key selected for `dimension`, if already collected.
    pub fn selection(&self, dimension: Dimension) -> Option<&'static str> {
        self.selections.get(&dimension).copied()
    }

    /// Number of dimensions collected so far.
    pub fn selection_count(&self) -> usize {
        self.selections.len()
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Time of the last applied transition or note.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Build the request for the recommendation pipeline.
    ///
    /// Returns `None` until every dimension has been collected.
    pub fn to_request(&self) -> Option<RecommendationRequest> {
        if !self.step.is_completed() {
            return None;
        }
        Some(RecommendationRequest {
            category: self.selection(Dimension::GiftCategory)?.to_string(),
            age_group: self.selection(Dimension::AgeGroup)?.to_string(),
            gender: self.selection(Dimension::Gender)?.to_string(),
            occasion: self.selection(Dimension::Occasion)?.to_string(),
            budget: self.selection(Dimension::Budget)?.to_string(),
            note: self.note.clone(),
        })
    }
}

// ─── RecommendationRequest ──────────────────────────────────────────────────

/// The five selected keys plus the optional note, passed by value into the
/// prompt builder.
///
/// Keys are plain strings so that callers outside the step machine can still
/// build a request; unknown keys render as themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub category: String,
    pub age_group: String,
    pub gender: String,
    pub occasion: String,
    pub budget: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RecommendationRequest {
    /// The key for `dimension`.
    pub fn key(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::GiftCategory => &self.category,
            Dimension::AgeGroup => &self.age_group,
            Dimension::Gender => &self.gender,
            Dimension::Occasion => &self.occasion,
            Dimension::Budget => &self.budget,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
