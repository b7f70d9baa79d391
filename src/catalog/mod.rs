//! Parameter catalog — the closed set of keys for every gift dimension.
//!
//! Keys are stable identifiers carried through transitions and callback
//! data. Labels are presentation-only (Russian, matching the language the
//! text-generation service is asked to answer in).
//!
//! Submodules:
//! - `fallback`: Canned recommendations used when the service is unusable

pub mod fallback;

use serde::{Deserialize, Serialize};

// ─── Types ──────────────────────────────────────────────────────────────────

/// One selectable value within a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Stable machine identifier (e.g. `"young_adult"`).
    pub key: &'static str,
    /// Human-readable label shown to the user and rendered into prompts.
    pub label: &'static str,
}

/// An independent axis of a gift request.
///
/// Variant order is the order in which the conversation collects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    GiftCategory,
    AgeGroup,
    Gender,
    Occasion,
    Budget,
}

// ─── Closed Key Sets ────────────────────────────────────────────────────────

const GIFT_CATEGORIES: &[CatalogEntry] = &[
    CatalogEntry { key: "electronics", label: "электроника" },
    CatalogEntry { key: "clothing", label: "одежда и аксессуары" },
    CatalogEntry { key: "books", label: "книги" },
    CatalogEntry { key: "toys", label: "игрушки" },
    CatalogEntry { key: "cosmetics", label: "косметика и парфюмерия" },
    CatalogEntry { key: "home", label: "товары для дома" },
    CatalogEntry { key: "sports", label: "спорт и активность" },
    CatalogEntry { key: "hobby", label: "хобби и творчество" },
];

const AGE_GROUPS: &[CatalogEntry] = &[
    CatalogEntry { key: "child", label: "ребенок (до 12 лет)" },
    CatalogEntry { key: "teen", label: "подросток (13-17 лет)" },
    CatalogEntry { key: "young_adult", label: "молодой взрослый (18-30 лет)" },
    CatalogEntry { key: "adult", label: "взрослый (31-50 лет)" },
    CatalogEntry { key: "senior", label: "пожилой человек (50+ лет)" },
];

const GENDERS: &[CatalogEntry] = &[
    CatalogEntry { key: "male", label: "мужской" },
    CatalogEntry { key: "female", label: "женский" },
    CatalogEntry { key: "unisex", label: "унисекс" },
];

const OCCASIONS: &[CatalogEntry] = &[
    CatalogEntry { key: "birthday", label: "день рождения" },
    CatalogEntry { key: "new_year", label: "новый год" },
    CatalogEntry { key: "valentine", label: "день святого валентина" },
    CatalogEntry { key: "graduation", label: "выпускной" },
    CatalogEntry { key: "wedding", label: "свадьба" },
    CatalogEntry { key: "anniversary", label: "годовщина" },
    CatalogEntry { key: "christmas", label: "рождество" },
    CatalogEntry { key: "other", label: "другой повод" },
];

const BUDGETS: &[CatalogEntry] = &[
    CatalogEntry { key: "low", label: "до 1000 рублей" },
    CatalogEntry { key: "medium", label: "от 1000 до 5000 рублей" },
    CatalogEntry { key: "high", label: "от 5000 до 15000 рублей" },
    CatalogEntry { key: "premium", label: "от 15000 рублей" },
];

// ─── Dimension ──────────────────────────────────────────────────────────────

impl Dimension {
    /// All dimensions in collection order.
    pub const ALL: [Dimension; 5] = [
        Dimension::GiftCategory,
        Dimension::AgeGroup,
        Dimension::Gender,
        Dimension::Occasion,
        Dimension::Budget,
    ];

    /// The closed set of valid entries for this dimension.
    pub fn options(self) -> &'static [CatalogEntry] {
        match self {
            Self::GiftCategory => GIFT_CATEGORIES,
            Self::AgeGroup => AGE_GROUPS,
            Self::Gender => GENDERS,
            Self::Occasion => OCCASIONS,
            Self::Budget => BUDGETS,
        }
    }

    /// Look up an entry by key.
    pub fn find(self, key: &str) -> Option<&'static CatalogEntry> {
        self.options().iter().find(|entry| entry.key == key)
    }

    /// The dimension collected after this one, or `None` after the budget.
    pub fn next(self) -> Option<Dimension> {
        match self {
            Self::GiftCategory => Some(Self::AgeGroup),
            Self::AgeGroup => Some(Self::Gender),
            Self::Gender => Some(Self::Occasion),
            Self::Occasion => Some(Self::Budget),
            Self::Budget => None,
        }
    }

    /// Title used both when asking the user and in the rendered prompt.
    pub fn title(self) -> &'static str {
        match self {
            Self::GiftCategory => "Тип подарка",
            Self::AgeGroup => "Возраст получателя",
            Self::Gender => "Пол получателя",
            Self::Occasion => "Повод",
            Self::Budget => "Бюджет",
        }
    }

    /// Prefix used by transports to encode a selection as callback data.
    pub fn callback_prefix(self) -> &'static str {
        match self {
            Self::GiftCategory => "gift_type",
            Self::AgeGroup => "age",
            Self::Gender => "gender",
            Self::Occasion => "occasion",
            Self::Budget => "budget",
        }
    }

    /// Encode a selection as `"<prefix>_<key>"`.
    pub fn callback_data(self, key: &str) -> String {
        format!("{}_{key}", self.callback_prefix())
    }

    /// Decode callback data produced by [`Dimension::callback_data`].
    ///
    /// The key is returned as-is; membership in the closed set is checked
    /// by the step machine, not here.
    pub fn parse_callback(data: &str) -> Option<(Dimension, &str)> {
        Self::ALL.iter().find_map(|&dimension| {
            data.strip_prefix(dimension.callback_prefix())
                .and_then(|rest| rest.strip_prefix('_'))
                .filter(|key| !key.is_empty())
                .map(|key| (dimension, key))
        })
    }
}

/// Label for `key` within `dimension`, or the key itself when unknown.
pub fn label_of(dimension: Dimension, key: &str) -> &str {
    match dimension.find(key) {
        Some(entry) => entry.label,
        None => key,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
