//! Denormalized catalog entities and the top-level assembly pass.
//!
//! All entities are built fresh per run from the current snapshots. Each
//! builder owns its output map exclusively; secondary-region passes only add
//! to existing mappings.

pub mod character;
pub mod equipment;
pub mod quest;

use crate::codec::SENTINEL_ID;
use crate::region::Region;
use crate::store::{RecordStore, StoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single reward: item id plus drop rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDrop {
    pub item: String,
    pub drop_rate: i64,
}

impl ItemDrop {
    /// The "no reward" placeholder
    pub fn none() -> Self {
        Self {
            item: SENTINEL_ID.to_string(),
            drop_rate: 0,
        }
    }
}

impl Default for ItemDrop {
    fn default() -> Self {
        Self::none()
    }
}

/// Fragment or blueprint attached to a full equipment item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fragment {
    pub id: String,
    pub name: BTreeMap<Region, String>,
}

impl Fragment {
    pub fn sentinel() -> Self {
        Self {
            id: SENTINEL_ID.to_string(),
            name: BTreeMap::new(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.id == SENTINEL_ID
    }
}

/// Crafting requirements for one region
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipe {
    /// Fragments of the item itself consumed by the craft. Zero means the
    /// fragment slot was repurposed as a plain required item.
    pub required_piece_count: i64,
    /// Other required item ids, in craft-slot order (at most 9)
    pub required_item_ids: Vec<String>,
    /// Origin region tag
    pub recipe_note: String,
}

impl Recipe {
    /// Single-region placeholder used until the craft pass runs
    pub fn placeholder(region: Region) -> Self {
        Self {
            required_piece_count: 1,
            required_item_ids: Vec::new(),
            recipe_note: region.to_string(),
        }
    }
}

/// One full equipment item with its fragment and per-region recipes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentEntry {
    pub id: String,
    pub name: BTreeMap<Region, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    pub fragment: Fragment,
    pub recipes: BTreeMap<Region, Recipe>,
}

/// One playable unit with per-promotion-rank equipment requirements
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterEntry {
    pub id: String,
    pub name: BTreeMap<Region, String>,
    /// Keyed `rank_<level>`, each holding the six slot requirements
    pub equipment: BTreeMap<String, Vec<String>>,
}

/// One quest keyed by its reconstructed chapter/number/difficulty key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestEntry {
    pub key: String,
    pub name: String,
    pub stamina: i64,
    pub memory_piece: ItemDrop,
    /// Equipment-type drops, in wave order
    pub drops: Vec<ItemDrop>,
    /// Flat-odds item pool, at most five entries
    pub subdrops: Vec<ItemDrop>,
}

/// The aggregate result of one normalization run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub equipment: BTreeMap<String, EquipmentEntry>,
    pub character: BTreeMap<String, CharacterEntry>,
    pub quest: BTreeMap<String, QuestEntry>,
}

/// Run all builders against the primary region, then merge each secondary
/// region's overlay, and assemble the catalog.
pub fn build_catalog(
    primary: &dyn RecordStore,
    secondaries: &[(Region, &dyn RecordStore)],
) -> StoreResult<Catalog> {
    Ok(Catalog {
        equipment: equipment::build_equipment(primary, secondaries)?,
        character: character::build_characters(primary, secondaries)?,
        quest: quest::QuestBuilder::default().build(primary)?,
    })
}
