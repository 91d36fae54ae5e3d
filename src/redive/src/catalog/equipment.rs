//! Equipment and fragment linking.
//!
//! Joins the equipment, item, craft, and quest-reward tables into one
//! catalog of full items: fragments and blueprints attach onto the full
//! entry sharing their item suffix, memory pieces come in through the item
//! table filtered by quest rewards, and each region contributes its own
//! name and recipe keys.

use super::{EquipmentEntry, Fragment, Recipe};
use crate::codec::{self, Difficulty, EquipmentKind, MEMORY_PIECE_RARITY};
use crate::merge::MergeRule;
use crate::region::Region;
use crate::store::{RecordStore, Row, StoreResult};
use std::collections::{BTreeMap, HashSet};

/// Equipment ids at or above this are unique equipment: self-contained
/// full items with no fragment
const UNIQUE_EQUIPMENT_FLOOR: i64 = 130_000;

/// Quest ids at or above this belong to test/unused quest types
const QUEST_ID_CEILING: i64 = 14_000_000;

/// `item_data.item_type` marking a pure memory piece
const MEMORY_PIECE_ITEM_TYPE: i64 = 11;

/// Craft rows carry ten condition slots; the first is the fragment slot
const CRAFT_SLOTS: usize = 10;

/// Build the equipment catalog from the primary region, then overlay each
/// secondary region's names and recipes.
pub fn build_equipment(
    primary: &dyn RecordStore,
    secondaries: &[(Region, &dyn RecordStore)],
) -> StoreResult<BTreeMap<String, EquipmentEntry>> {
    let mut entries = BTreeMap::new();

    seed_unique_equipment(primary, &mut entries)?;
    link_region_equipment(primary, Region::PRIMARY, &mut entries)?;

    let candidates = memory_piece_candidates(primary)?;
    add_memory_pieces(primary, &candidates, &mut entries)?;

    apply_region_recipes(primary, Region::PRIMARY, &mut entries)?;

    for (region, store) in secondaries {
        link_region_equipment(*store, *region, &mut entries)?;
        apply_region_recipes(*store, *region, &mut entries)?;
    }

    Ok(entries)
}

/// Unique equipment rows sit above the id floor and never have fragment or
/// craft rows; seed them as self-contained entries up front.
fn seed_unique_equipment(
    store: &dyn RecordStore,
    entries: &mut BTreeMap<String, EquipmentEntry>,
) -> StoreResult<()> {
    for row in store.rows("equipment_data")? {
        let Some(id) = row.int("equipment_id") else {
            continue;
        };
        if id < UNIQUE_EQUIPMENT_FLOOR {
            continue;
        }
        let id = id.to_string();
        let mut name = BTreeMap::new();
        if let Some(n) = row.string("equipment_name") {
            name.insert(Region::PRIMARY, n);
        }
        entries.insert(
            id.clone(),
            EquipmentEntry {
                rarity: Some(codec::decode_equipment(&id).rarity),
                id,
                name,
                fragment: Fragment::sentinel(),
                recipes: BTreeMap::from([(Region::PRIMARY, Recipe::placeholder(Region::PRIMARY))]),
            },
        );
    }
    Ok(())
}

/// One region's pass over the equipment table: full items create entries,
/// fragments and blueprints attach onto the full entry with the same item
/// suffix. Attachments with no full entry are skipped; upstream data gaps
/// are expected.
fn link_region_equipment(
    store: &dyn RecordStore,
    region: Region,
    entries: &mut BTreeMap<String, EquipmentEntry>,
) -> StoreResult<()> {
    for row in store.rows("equipment_data")? {
        let Some(id) = row.string("equipment_id") else {
            continue;
        };
        if row.int("equipment_id").is_some_and(|n| n >= UNIQUE_EQUIPMENT_FLOOR) {
            continue;
        }
        let parts = codec::decode_equipment(&id);
        let name = row.string("equipment_name").unwrap_or_default();

        match parts.kind() {
            Some(EquipmentKind::Full) => {
                if region == Region::PRIMARY {
                    entries.insert(
                        id.clone(),
                        EquipmentEntry {
                            id: id.clone(),
                            name: BTreeMap::from([(region, name)]),
                            rarity: Some(parts.rarity),
                            fragment: Fragment::sentinel(),
                            recipes: BTreeMap::from([(region, Recipe::placeholder(region))]),
                        },
                    );
                } else if let Some(entry) = entries.get_mut(&id) {
                    MergeRule::AddRegionKey.apply(&mut entry.name, region, name);
                } else {
                    // Region-exclusive item: mirror the discovered name onto
                    // the default key so every entry has a primary name.
                    entries.insert(
                        id.clone(),
                        EquipmentEntry {
                            id: id.clone(),
                            name: BTreeMap::from([
                                (Region::PRIMARY, name.clone()),
                                (region, name),
                            ]),
                            rarity: Some(parts.rarity),
                            fragment: Fragment::sentinel(),
                            recipes: BTreeMap::from([(region, Recipe::placeholder(region))]),
                        },
                    );
                }
            }
            Some(EquipmentKind::Fragment | EquipmentKind::Blueprint) => {
                let full_id = format!("{}{}", EquipmentKind::Full.code(), parts.item);
                if let Some(entry) = entries.get_mut(&full_id) {
                    if region == Region::PRIMARY || entry.fragment.is_sentinel() {
                        entry.fragment.id = id.clone();
                    }
                    MergeRule::AddRegionKey.apply(&mut entry.fragment.name, region, name);
                }
            }
            None => {}
        }
    }
    Ok(())
}

/// Item ids rewarded by hard/very-hard quests or by event quests; only
/// these memory pieces are worth cataloging.
fn memory_piece_candidates(store: &dyn RecordStore) -> StoreResult<HashSet<String>> {
    let mut candidates = HashSet::new();

    for row in store.rows("quest_data")? {
        let Some(quest_id) = row.int("quest_id") else {
            continue;
        };
        if quest_id >= QUEST_ID_CEILING {
            continue;
        }
        let difficulty = codec::decode_quest(quest_id).difficulty();
        if !matches!(difficulty, Some(Difficulty::Hard | Difficulty::VeryHard)) {
            continue;
        }
        for slot in 1..=5 {
            if let Some(reward) = row.int(&format!("reward_image_{slot}")) {
                if reward != 0 {
                    candidates.insert(reward.to_string());
                }
            }
        }
    }

    for row in store.rows("shiori_quest")? {
        if let Some(reward) = row.int("drop_reward_id") {
            if reward != 0 {
                candidates.insert(reward.to_string());
            }
        }
    }

    Ok(candidates)
}

/// Memory pieces live in the item table, not the equipment table; they
/// become pseudo-equipment with the fixed rarity sentinel.
fn add_memory_pieces(
    store: &dyn RecordStore,
    candidates: &HashSet<String>,
    entries: &mut BTreeMap<String, EquipmentEntry>,
) -> StoreResult<()> {
    for row in store.rows("item_data")? {
        if row.int("item_type") != Some(MEMORY_PIECE_ITEM_TYPE) {
            continue;
        }
        let Some(id) = row.string("item_id") else {
            continue;
        };
        if !candidates.contains(&id) {
            continue;
        }
        let mut name = BTreeMap::new();
        if let Some(n) = row.string("item_name") {
            name.insert(Region::PRIMARY, n);
        }
        entries.insert(
            id.clone(),
            EquipmentEntry {
                id,
                name,
                rarity: Some(MEMORY_PIECE_RARITY.to_string()),
                fragment: Fragment::sentinel(),
                recipes: BTreeMap::from([(Region::PRIMARY, Recipe::placeholder(Region::PRIMARY))]),
            },
        );
    }
    Ok(())
}

/// One region's pass over the craft table, writing that region's recipe key.
fn apply_region_recipes(
    store: &dyn RecordStore,
    region: Region,
    entries: &mut BTreeMap<String, EquipmentEntry>,
) -> StoreResult<()> {
    for row in store.rows("equipment_craft")? {
        let Some(id) = row.string("equipment_id") else {
            continue;
        };
        let Some(entry) = entries.get_mut(&id) else {
            // Craft row for an item this region's equipment pass never
            // produced; skip.
            continue;
        };
        let recipe = decode_craft_row(&row, &id, region);
        MergeRule::AddRegionKey.apply(&mut entry.recipes, region, recipe);
    }
    Ok(())
}

/// The first craft slot either holds the item's own fragment (then its
/// consume count is the piece count) or has been repurposed as a plain
/// required item. Remaining slots append until a zero terminator.
fn decode_craft_row(row: &Row, equipment_id: &str, region: Region) -> Recipe {
    let mut recipe = Recipe {
        required_piece_count: 0,
        required_item_ids: Vec::new(),
        recipe_note: region.to_string(),
    };

    if let Some(first) = row.int("condition_equipment_id_1") {
        if first != 0 {
            let first = first.to_string();
            if codec::item_suffix(&first) == codec::item_suffix(equipment_id) {
                recipe.required_piece_count = row.int("consume_num_1").unwrap_or(0);
            } else {
                recipe.required_item_ids.push(first);
            }
        }
    }

    for slot in 2..=CRAFT_SLOTS {
        match row.int(&format!("condition_equipment_id_{slot}")) {
            Some(id) if id != 0 => recipe.required_item_ids.push(id.to_string()),
            _ => break,
        }
    }

    recipe
}
