//! In-memory registry of live conversations, keyed by session id.
//!
//! Nothing here is persisted. A record lives from the start of collection
//! until recommendations are produced, the user restarts, or it sits idle
//! past the configured timeout.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use super::machine;
use super::types::{ConversationState, SessionId};

/// Live conversation records.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<SessionId, ConversationState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin (or restart) collection for `session_id`.
    ///
    /// An existing record is reset rather than replaced, so the session id
    /// carried by the state never changes.
    pub fn start(&mut self, session_id: SessionId) -> &ConversationState {
        let state = match self.sessions.remove(&session_id) {
            Some(existing) => machine::reset(&existing),
            None => ConversationState::new(session_id.clone()),
        };
        self.sessions.entry(session_id).or_insert(state)
    }

    pub fn get(&self, session_id: &SessionId) -> Option<&ConversationState> {
        self.sessions.get(session_id)
    }

    /// Store `state` under its own session id, replacing any previous record.
    pub fn insert(&mut self, state: ConversationState) {
        self.sessions.insert(state.session_id().clone(), state);
    }

    pub fn remove(&mut self, session_id: &SessionId) -> Option<ConversationState> {
        self.sessions.remove(session_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop records whose last update is older than `max_idle` at `now`.
    ///
    /// Returns the number of records removed.
    pub fn prune_idle(&mut self, now: DateTime<Utc>, max_idle: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, state| now.signed_duration_since(state.updated_at()) <= max_idle);
        let pruned = before - self.sessions.len();
        if pruned > 0 {
            tracing::debug!(pruned, remaining = self.sessions.len(), "pruned idle sessions");
        }
        pruned
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Dimension;
    use crate::conversation::types::Step;

    #[test]
    fn start_creates_fresh_record() {
        let mut store = SessionStore::new();
        let state = store.start("a".into());
        assert_eq!(state.step(), Step::AwaitingCategory);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn start_resets_existing_record() {
        let mut store = SessionStore::new();
        let id = SessionId::from("a");
        let state = store.start(id.clone()).clone();
        let advanced = machine::advance(&state, Dimension::GiftCategory, "toys").unwrap();
        store.insert(advanced);
        assert_eq!(store.get(&id).unwrap().step(), Step::AwaitingAge);

        let restarted = store.start(id.clone());
        assert_eq!(restarted.step(), Step::AwaitingCategory);
        assert_eq!(restarted.selection_count(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn sessions_are_independent() {
        let mut store = SessionStore::new();
        let a = store.start("a".into()).clone();
        store.start("b".into());
        store.insert(machine::advance(&a, Dimension::GiftCategory, "home").unwrap());

        assert_eq!(store.get(&"a".into()).unwrap().step(), Step::AwaitingAge);
        assert_eq!(store.get(&"b".into()).unwrap().step(), Step::AwaitingCategory);
    }

    #[test]
    fn remove_discards_record() {
        let mut store = SessionStore::new();
        store.start("a".into());
        assert!(store.remove(&"a".into()).is_some());
        assert!(store.is_empty());
        assert!(store.remove(&"a".into()).is_none());
    }

    #[test]
    fn prune_idle_drops_only_stale_records() {
        let mut store = SessionStore::new();
        store.start("old".into());
        store.start("new".into());

        let now = Utc::now();
        assert_eq!(store.prune_idle(now, Duration::minutes(30)), 0);

        // Everything was touched "now", so an hour later both are stale.
        let later = now + Duration::hours(1);
        assert_eq!(store.prune_idle(later, Duration::minutes(30)), 2);
        assert!(store.is_empty());
    }
}
