//! Prompt builder for the text-generation service.
//!
//! The system instruction and the instructional scaffold are constants
//! shared by every request. Only the five labels and the optional note vary.

use std::fmt::Write;

use crate::catalog::{label_of, Dimension};
use crate::conversation::RecommendationRequest;

/// System-role instruction: expert persona, five concrete recommendations,
/// answer in Russian.
pub const SYSTEM_INSTRUCTION: &str = "Ты эксперт по подбору подарков. \
Твоя задача - дать 5 конкретных и полезных рекомендаций подарков на основе \
предоставленных параметров. Отвечай на русском языке.";

const HEADER: &str = "Подбери 5 конкретных рекомендаций подарков со следующими параметрами:";

const NOTE_TITLE: &str = "Дополнительная информация";

const REQUIREMENTS: &str = "\
Требования к ответу:
1. Дай ровно 5 конкретных рекомендаций
2. Каждая рекомендация должна быть конкретным товаром или услугой
3. Учитывай возраст, пол и повод
4. Предложения должны соответствовать бюджету
5. Формат: просто нумерованный список из 5 пунктов, каждый с новой строки
6. Будь практичным и современным в рекомендациях

Пример формата:
1. Название подарка
2. Название подарка
3. Название подарка
4. Название подарка
5. Название подарка
";

/// Render `request` into the user prompt.
///
/// Pure: identical requests always yield byte-identical prompts. Unknown
/// keys are rendered as the raw key.
pub fn build(request: &RecommendationRequest) -> String {
    let mut prompt = String::with_capacity(1024);
    prompt.push_str(HEADER);
    prompt.push_str("\n\n");

    for dimension in Dimension::ALL {
        let label = label_of(dimension, request.key(dimension));
        // Writing to a String cannot fail.
        let _ = writeln!(prompt, "{}: {label}", dimension.title());
    }

    if let Some(note) = &request.note {
        let _ = writeln!(prompt, "\n{NOTE_TITLE}: {note}");
    }

    prompt.push('\n');
    prompt.push_str(REQUIREMENTS);
    prompt
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RecommendationRequest {
        RecommendationRequest {
            category: "electronics".into(),
            age_group: "young_adult".into(),
            gender: "female".into(),
            occasion: "new_year".into(),
            budget: "medium".into(),
            note: None,
        }
    }

    #[test]
    fn renders_labels_for_every_dimension() {
        let prompt = build(&request());
        assert!(prompt.starts_with(HEADER));
        assert!(prompt.contains("Тип подарка: электроника\n"));
        assert!(prompt.contains("Возраст получателя: молодой взрослый (18-30 лет)\n"));
        assert!(prompt.contains("Пол получателя: женский\n"));
        assert!(prompt.contains("Повод: новый год\n"));
        assert!(prompt.contains("Бюджет: от 1000 до 5000 рублей\n"));
        assert!(prompt.ends_with(REQUIREMENTS));
    }

    #[test]
    fn build_is_deterministic() {
        let mut req = request();
        req.note = Some("любит кофе".into());
        assert_eq!(build(&req), build(&req.clone()));
    }

    #[test]
    fn note_is_appended_verbatim_only_when_present() {
        let without = build(&request());
        assert!(!without.contains(NOTE_TITLE));

        let mut req = request();
        req.note = Some("увлекается *фотографией* 📷".into());
        let with = build(&req);
        assert!(with.contains("Дополнительная информация: увлекается *фотографией* 📷\n"));
        // The note sits between the parameters and the requirements.
        let note_at = with.find(NOTE_TITLE).unwrap();
        assert!(note_at > with.find("Бюджет:").unwrap());
        assert!(note_at < with.find("Требования к ответу").unwrap());
    }

    #[test]
    fn unknown_keys_render_raw() {
        let mut req = request();
        req.category = "drones".into();
        req.budget = "unlimited".into();
        let prompt = build(&req);
        assert!(prompt.contains("Тип подарка: drones\n"));
        assert!(prompt.contains("Бюджет: unlimited\n"));
    }

    #[test]
    fn scaffold_demands_five_lines() {
        let prompt = build(&request());
        assert!(prompt.contains("ровно 5"));
        assert!(prompt.contains("5. Название подарка"));
        assert!(SYSTEM_INSTRUCTION.contains("на русском языке"));
    }
}
