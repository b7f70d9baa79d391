//! Response parser — turns free-form service text into at most five
//! recommendations.
//!
//! Stages run in a fixed order and the first one that yields anything wins:
//! 1. **Service error**: canned list for the category
//! 2. **Structured**: lines starting with a recognised list prefix
//! 3. **Naive**: the first five non-empty lines, verbatim
//! 4. **Fallback**: canned list for the category
//!
//! The result is never empty and never longer than five. Only the fallback
//! path guarantees exactly five; AI-derived paths are never padded.

use serde::Serialize;

use crate::catalog::fallback;
use crate::inference::ServiceError;

/// Maximum number of recommendations returned.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// List-item prefixes, tested per line in this order; first match wins.
const LIST_PREFIXES: [&str; 12] = [
    "1.", "2.", "3.", "4.", "5.", "1)", "2)", "3)", "4)", "5)", "-", "•",
];

/// Which stage produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    /// Extracted from recognised list items.
    Structured,
    /// Raw lines taken verbatim.
    Naive,
    /// Canned recommendations.
    Fallback,
}

/// An ordered, bounded list of recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationResult {
    pub items: Vec<String>,
    pub source: RecommendationSource,
}

impl RecommendationResult {
    fn fallback(category: &str) -> Self {
        Self {
            items: fallback::lookup(category)
                .iter()
                .map(|s| s.to_string())
                .collect(),
            source: RecommendationSource::Fallback,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Parse the service outcome for a request in `category`.
pub fn parse(raw: Result<String, ServiceError>, category: &str) -> RecommendationResult {
    let text = match raw {
        Ok(text) => text,
        Err(_) => return RecommendationResult::fallback(category),
    };

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let structured = extract_structured(&lines);
    if !structured.is_empty() {
        tracing::debug!(count = structured.len(), "structured extraction");
        return RecommendationResult {
            items: structured,
            source: RecommendationSource::Structured,
        };
    }

    let naive: Vec<String> = lines
        .iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|line| line.to_string())
        .collect();
    if !naive.is_empty() {
        tracing::debug!(count = naive.len(), "naive extraction");
        return RecommendationResult {
            items: naive,
            source: RecommendationSource::Naive,
        };
    }

    tracing::debug!(category, "nothing extractable, using fallback");
    RecommendationResult::fallback(category)
}

/// Strip the first matching list prefix from each line; skip lines with none.
fn extract_structured(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| {
            LIST_PREFIXES
                .iter()
                .find_map(|prefix| line.strip_prefix(prefix))
                .map(str::trim)
        })
        .filter(|item| !item.is_empty())
        .take(MAX_RECOMMENDATIONS)
        .map(str::to_string)
        .collect()
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(text: &str) -> Result<String, ServiceError> {
        Ok(text.to_string())
    }

    fn items(result: &RecommendationResult) -> Vec<&str> {
        result.items.iter().map(String::as_str).collect()
    }

    #[test]
    fn numbered_list() {
        let result = parse(ok("1. Headphones\n2. Watch\n3. Book\n4. Mug\n5. Candle"), "home");
        assert_eq!(items(&result), ["Headphones", "Watch", "Book", "Mug", "Candle"]);
        assert_eq!(result.source, RecommendationSource::Structured);
    }

    #[test]
    fn short_bulleted_list_is_not_padded() {
        let result = parse(ok("- Item A\n- Item B"), "books");
        assert_eq!(items(&result), ["Item A", "Item B"]);
        assert_eq!(result.source, RecommendationSource::Structured);
    }

    #[test]
    fn whitespace_only_falls_back_to_category() {
        let result = parse(ok("   \n\n"), "books");
        assert_eq!(items(&result), fallback::lookup("books"));
        assert_eq!(result.source, RecommendationSource::Fallback);
    }

    #[test]
    fn empty_string_falls_back() {
        let result = parse(ok(""), "electronics");
        assert_eq!(result.len(), 5);
        assert_eq!(items(&result), fallback::lookup("electronics"));
    }

    #[test]
    fn service_error_falls_back_for_every_kind() {
        let errors = [
            ServiceError::Auth { reason: "bad key".into() },
            ServiceError::ConnectionFailed {
                endpoint: "http://x".into(),
                reason: "refused".into(),
            },
            ServiceError::Timeout { duration_secs: 30 },
            ServiceError::HttpError { status: 502, body: String::new() },
            ServiceError::EmptyResponse,
        ];
        for err in errors {
            let result = parse(Err(err), "toys");
            assert_eq!(items(&result), fallback::lookup("toys"));
            assert_eq!(result.source, RecommendationSource::Fallback);
        }
    }

    #[test]
    fn service_error_with_unknown_category_uses_generic_list() {
        let result = parse(Err(ServiceError::EmptyResponse), "spaceships");
        assert_eq!(items(&result), fallback::GENERIC);
    }

    #[test]
    fn parenthesis_and_bullet_prefixes() {
        let text = "1) Термокружка\n2)Плед\n• Настольная игра\n-Свеча";
        let result = parse(ok(text), "home");
        assert_eq!(items(&result), ["Термокружка", "Плед", "Настольная игра", "Свеча"]);
    }

    #[test]
    fn preamble_and_unprefixed_lines_are_skipped() {
        let text = "Вот мои рекомендации:\n\n1. Книга\nкакой-то комментарий\n2. Кружка\n\nУдачи!";
        let result = parse(ok(text), "books");
        assert_eq!(items(&result), ["Книга", "Кружка"]);
    }

    #[test]
    fn structured_result_is_truncated_to_five() {
        let text = "- a\n- b\n- c\n- d\n- e\n- f\n- g";
        let result = parse(ok(text), "books");
        assert_eq!(items(&result), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn numbers_beyond_five_are_not_prefixes() {
        // "6." matches nothing, so only the first five survive.
        let text = "1. a\n2. b\n3. c\n4. d\n5. e\n6. f";
        let result = parse(ok(text), "books");
        assert_eq!(items(&result), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn prefix_only_lines_are_dropped() {
        let text = "1.\n2. Кружка\n-   \n•";
        let result = parse(ok(text), "home");
        assert_eq!(items(&result), ["Кружка"]);
    }

    #[test]
    fn first_matching_prefix_wins() {
        // "1.-x" matches "1." before "-" is considered.
        let result = parse(ok("1.- dash inside"), "books");
        assert_eq!(items(&result), ["- dash inside"]);
    }

    #[test]
    fn naive_path_takes_first_five_lines_verbatim() {
        let text = "Наушники\n  Часы  \n\nКнига\nКружка\nСвеча\nПлед";
        let result = parse(ok(text), "books");
        assert_eq!(items(&result), ["Наушники", "Часы", "Книга", "Кружка", "Свеча"]);
        assert_eq!(result.source, RecommendationSource::Naive);
    }

    #[test]
    fn naive_path_may_return_fewer_than_five() {
        let result = parse(ok("Просто подарите цветы"), "home");
        assert_eq!(items(&result), ["Просто подарите цветы"]);
        assert_eq!(result.source, RecommendationSource::Naive);
    }

    #[test]
    fn naive_path_does_not_strip_prefix_like_text() {
        // "10." is not a recognised prefix, so the line is kept whole.
        let result = parse(ok("10. Десятый пункт"), "home");
        assert_eq!(items(&result), ["10. Десятый пункт"]);
    }

    #[test]
    fn never_empty_never_more_than_five() {
        let inputs = ["", " ", "x", "- a", "1. a\n2. b\n3. c\n4. d\n5. e\n- f", "\n\n\nz\n"];
        for input in inputs {
            let result = parse(ok(input), "books");
            assert!(!result.is_empty(), "{input:?}");
            assert!(result.len() <= MAX_RECOMMENDATIONS, "{input:?}");
        }
    }
}
