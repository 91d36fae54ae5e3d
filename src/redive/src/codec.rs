//! Composite identifier decoding for equipment and quest ids.
//!
//! Equipment ids are fixed-width digit strings: the first two digits carry
//! the type class, the third the rarity, and everything after position two
//! is the item suffix shared between a full item and its fragment or
//! blueprint. Quest ids are numeric: two difficulty digits followed by a
//! three-digit chapter and a three-digit number.
//!
//! There is no validation here beyond slicing; builders pre-filter rows by
//! id range before decoding.

/// Marker id meaning "no such resource" (no fragment, no memory piece)
pub const SENTINEL_ID: &str = "999999";

/// Rarity assigned to memory-piece pseudo-equipment
pub const MEMORY_PIECE_RARITY: &str = "99";

/// Equipment id type classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentKind {
    Full,
    Fragment,
    Blueprint,
}

impl EquipmentKind {
    /// Two-digit type code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Full => "10",
            Self::Fragment => "11",
            Self::Blueprint => "12",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "10" => Some(Self::Full),
            "11" => Some(Self::Fragment),
            "12" => Some(Self::Blueprint),
            _ => None,
        }
    }
}

/// Quest difficulty classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Normal,
    Hard,
    VeryHard,
}

impl Difficulty {
    /// Two-digit difficulty code (leading digits of the quest id)
    pub fn code(&self) -> i64 {
        match self {
            Self::Normal => 11,
            Self::Hard => 12,
            Self::VeryHard => 13,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            11 => Some(Self::Normal),
            12 => Some(Self::Hard),
            13 => Some(Self::VeryHard),
            _ => None,
        }
    }
}

/// Decomposed equipment id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentParts {
    /// Two-digit type code
    pub kind: String,
    /// Single rarity digit (also the first digit of `item`)
    pub rarity: String,
    /// Item suffix after position two, shared across type classes
    pub item: String,
}

impl EquipmentParts {
    pub fn kind(&self) -> Option<EquipmentKind> {
        EquipmentKind::from_code(&self.kind)
    }

    /// Recompose the original id
    pub fn compose(&self) -> String {
        format!("{}{}", self.kind, self.item)
    }
}

/// Split an equipment id into type code, rarity digit, and item suffix
pub fn decode_equipment(id: &str) -> EquipmentParts {
    EquipmentParts {
        kind: id.get(0..2).unwrap_or_default().to_string(),
        rarity: id.get(2..3).unwrap_or_default().to_string(),
        item: id.get(2..).unwrap_or_default().to_string(),
    }
}

/// Item suffix of an equipment id (digits after position two)
pub fn item_suffix(id: &str) -> &str {
    id.get(2..).unwrap_or_default()
}

/// Decomposed quest id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestParts {
    /// Two-digit difficulty code
    pub difficulty_code: i64,
    pub chapter: i64,
    pub number: i64,
}

impl QuestParts {
    pub fn difficulty(&self) -> Option<Difficulty> {
        Difficulty::from_code(self.difficulty_code)
    }
}

/// Split a quest id into difficulty code, chapter, and number
pub fn decode_quest(id: i64) -> QuestParts {
    QuestParts {
        difficulty_code: id / 1_000_000,
        chapter: (id / 1_000) % 1_000,
        number: id % 1_000,
    }
}

/// Rebuild a quest id from difficulty, chapter, and number
pub fn compose_quest(difficulty: Difficulty, chapter: i64, number: i64) -> i64 {
    difficulty.code() * 1_000_000 + chapter * 1_000 + number
}
