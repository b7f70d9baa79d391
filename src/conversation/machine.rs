//! Step machine — pure transitions over [`ConversationState`].
//!
//! Every function takes the current state by reference and returns the next
//! one, so a rejected transition leaves the caller's state untouched and
//! transitions can be tested without any transport in the loop.
//!
//! Order is fixed: Category → Age → Gender → Occasion → Budget → Completed.
//! There is no way to skip a step or revisit a filled one.

use chrono::Utc;

use crate::catalog::Dimension;

use super::errors::RejectedTransition;
use super::types::{ConversationState, Step};

/// Maximum stored note length in bytes. Longer notes are cut at a UTF-8
/// boundary so a single message cannot blow up the prompt.
pub const MAX_NOTE_BYTES: usize = 500;

/// Apply one user selection.
///
/// Rejects the selection when `dimension` is not the one the current step
/// expects (including after completion) or when `key` is outside the
/// dimension's closed set.
pub fn advance(
    state: &ConversationState,
    dimension: Dimension,
    key: &str,
) -> Result<ConversationState, RejectedTransition> {
    let expected = state.step.expected_dimension();
    if expected != Some(dimension) {
        return Err(RejectedTransition::OutOfOrder {
            expected,
            got: dimension,
        });
    }

    let entry = dimension
        .find(key)
        .ok_or_else(|| RejectedTransition::UnknownKey {
            dimension,
            key: key.to_string(),
        })?;

    let mut next = state.clone();
    next.selections.insert(dimension, entry.key);
    next.step = Step::after(dimension);
    next.updated_at = Utc::now();
    Ok(next)
}

/// Start over for the same session, discarding selections and note.
pub fn reset(state: &ConversationState) -> ConversationState {
    ConversationState::new(state.session_id.clone())
}

/// Attach (or replace) the free-text note. The step does not change.
///
/// Whitespace-only text is ignored. A completed state is returned as-is:
/// its request has already been handed to the pipeline.
pub fn attach_note(state: &ConversationState, text: &str) -> ConversationState {
    let text = text.trim();
    if text.is_empty() || state.step.is_completed() {
        return state.clone();
    }

    let mut next = state.clone();
    next.note = Some(truncate_utf8(text, MAX_NOTE_BYTES).to_string());
    next.updated_at = Utc::now();
    next
}

/// Truncate to at most `max_bytes`, backing off to a char boundary.
fn truncate_utf8(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> ConversationState {
        ConversationState::new("chat-1".into())
    }

    /// Drive a fresh state through the first `n` dimensions using each
    /// dimension's first key.
    fn filled(n: usize) -> ConversationState {
        let mut state = fresh();
        for dimension in Dimension::ALL.iter().take(n) {
            state = advance(&state, *dimension, dimension.options()[0].key).unwrap();
        }
        state
    }

    #[test]
    fn every_valid_selection_moves_exactly_one_step() {
        for (i, dimension) in Dimension::ALL.iter().enumerate() {
            for entry in dimension.options() {
                let before = filled(i);
                let after = advance(&before, *dimension, entry.key).unwrap();
                assert_eq!(after.step(), Step::after(*dimension));
                assert_eq!(after.selection(*dimension), Some(entry.key));
                assert_eq!(after.selection_count(), i + 1);
            }
        }
    }

    #[test]
    fn out_of_order_dimension_is_rejected() {
        let state = filled(1);
        let snapshot = state.clone();
        for dimension in Dimension::ALL {
            if dimension == Dimension::AgeGroup {
                continue;
            }
            let err = advance(&state, dimension, dimension.options()[0].key).unwrap_err();
            assert_eq!(
                err,
                RejectedTransition::OutOfOrder {
                    expected: Some(Dimension::AgeGroup),
                    got: dimension,
                }
            );
        }
        assert_eq!(state, snapshot);
    }

    #[test]
    fn unknown_key_is_rejected_and_state_unchanged() {
        let state = filled(2);
        let snapshot = state.clone();
        let err = advance(&state, Dimension::Gender, "robot").unwrap_err();
        assert_eq!(
            err,
            RejectedTransition::UnknownKey {
                dimension: Dimension::Gender,
                key: "robot".into(),
            }
        );
        assert_eq!(state, snapshot);
    }

    #[test]
    fn key_from_another_dimension_is_rejected() {
        let state = fresh();
        assert!(matches!(
            advance(&state, Dimension::GiftCategory, "teen"),
            Err(RejectedTransition::UnknownKey { .. })
        ));
    }

    #[test]
    fn completed_state_rejects_everything() {
        let done = filled(5);
        assert_eq!(done.step(), Step::Completed);
        for dimension in Dimension::ALL {
            let err = advance(&done, dimension, dimension.options()[0].key).unwrap_err();
            assert_eq!(
                err,
                RejectedTransition::OutOfOrder {
                    expected: None,
                    got: dimension,
                }
            );
        }
    }

    #[test]
    fn completed_state_holds_one_key_per_dimension() {
        let done = filled(5);
        assert_eq!(done.selection_count(), 5);
        let request = done.to_request().unwrap();
        assert_eq!(request.category, "electronics");
        assert_eq!(request.age_group, "child");
        assert_eq!(request.gender, "male");
        assert_eq!(request.occasion, "birthday");
        assert_eq!(request.budget, "low");
        assert!(request.note.is_none());
    }

    #[test]
    fn reset_always_returns_fresh_state_for_same_session() {
        for n in 0..=5 {
            let state = attach_note(&filled(n), "likes jazz");
            let fresh = reset(&state);
            assert_eq!(fresh.step(), Step::AwaitingCategory);
            assert_eq!(fresh.selection_count(), 0);
            assert!(fresh.note().is_none());
            assert_eq!(fresh.session_id(), state.session_id());
        }
    }

    #[test]
    fn note_is_attached_without_moving_step() {
        let state = filled(3);
        let noted = attach_note(&state, "  loves hiking  ");
        assert_eq!(noted.step(), Step::AwaitingOccasion);
        assert_eq!(noted.note(), Some("loves hiking"));
        let replaced = attach_note(&noted, "loves sailing");
        assert_eq!(replaced.note(), Some("loves sailing"));
    }

    #[test]
    fn blank_note_is_ignored() {
        let noted = attach_note(&fresh(), "cats");
        let same = attach_note(&noted, "   \n ");
        assert_eq!(same.note(), Some("cats"));
    }

    #[test]
    fn note_survives_to_request() {
        let mut state = attach_note(&fresh(), "вегетарианец");
        for dimension in Dimension::ALL {
            state = advance(&state, dimension, dimension.options()[1].key).unwrap();
        }
        let request = state.to_request().unwrap();
        assert_eq!(request.note.as_deref(), Some("вегетарианец"));
        assert_eq!(request.category, "clothing");
    }

    #[test]
    fn long_note_is_truncated_on_char_boundary() {
        let long = "ж".repeat(400); // 800 bytes
        let noted = attach_note(&fresh(), &long);
        let note = noted.note().unwrap();
        assert!(note.len() <= MAX_NOTE_BYTES);
        assert_eq!(note.chars().count(), MAX_NOTE_BYTES / 2);
    }
}
