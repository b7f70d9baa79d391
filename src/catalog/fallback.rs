//! Canned recommendations used when the text-generation service is
//! unavailable or its output yields nothing usable.

/// Number of recommendations every fallback list carries.
pub const FALLBACK_LEN: usize = 5;

const ELECTRONICS: [&str; FALLBACK_LEN] = [
    "Беспроводные наушники",
    "Портативная колонка",
    "Умные часы",
    "Планшет",
    "Смартфон",
];

const CLOTHING: [&str; FALLBACK_LEN] = [
    "Стильная футболка",
    "Джинсы",
    "Кроссовки",
    "Свитер",
    "Куртка",
];

const BOOKS: [&str; FALLBACK_LEN] = [
    "Художественная литература",
    "Научно-популярная книга",
    "Энциклопедия",
    "Детектив",
    "Фантастика",
];

const TOYS: [&str; FALLBACK_LEN] = ["Настольная игра", "Конструктор", "Кукла", "Машинка", "Пазл"];

const COSMETICS: [&str; FALLBACK_LEN] = [
    "Парфюм",
    "Косметический набор",
    "Крем для лица",
    "Помада",
    "Тушь для ресниц",
];

const HOME: [&str; FALLBACK_LEN] = [
    "Ваза для цветов",
    "Ароматические свечи",
    "Картина",
    "Комнатное растение",
    "Плед",
];

const SPORTS: [&str; FALLBACK_LEN] = [
    "Спортивная форма",
    "Мяч",
    "Гантели",
    "Коврик для йоги",
    "Бутылка для воды",
];

const HOBBY: [&str; FALLBACK_LEN] = [
    "Набор для рисования",
    "Музыкальный инструмент",
    "Набор для рукоделия",
    "Фотоаппарат",
    "Набор инструментов",
];

/// Used for any category outside the catalog.
pub const GENERIC: [&str; FALLBACK_LEN] = [
    "Универсальный подарок",
    "Подарочная карта",
    "Книга",
    "Косметический набор",
    "Аксессуар",
];

/// Five canned recommendations for a gift category key. Never fails.
pub fn lookup(category: &str) -> [&'static str; FALLBACK_LEN] {
    match category {
        "electronics" => ELECTRONICS,
        "clothing" => CLOTHING,
        "books" => BOOKS,
        "toys" => TOYS,
        "cosmetics" => COSMETICS,
        "home" => HOME,
        "sports" => SPORTS,
        "hobby" => HOBBY,
        _ => GENERIC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Dimension;

    #[test]
    fn electronics_list() {
        assert_eq!(
            lookup("electronics"),
            [
                "Беспроводные наушники",
                "Портативная колонка",
                "Умные часы",
                "Планшет",
                "Смартфон",
            ]
        );
    }

    #[test]
    fn unknown_category_gets_generic_list() {
        assert_eq!(lookup("spaceships"), GENERIC);
        assert_eq!(lookup(""), GENERIC);
        // Keys are case-sensitive.
        assert_eq!(lookup("Books"), GENERIC);
    }

    #[test]
    fn every_catalog_category_has_its_own_list() {
        for entry in Dimension::GiftCategory.options() {
            assert_ne!(lookup(entry.key), GENERIC, "{} fell through", entry.key);
        }
    }
}
