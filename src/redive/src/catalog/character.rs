//! Character roster assembly.
//!
//! Base units join with their promotion-tier equipment requirements; units
//! that never gain promotion data are dropped as unimplemented. Secondary
//! regions contribute region-exclusive units and fill rank slots the
//! primary region has not defined yet.

use super::CharacterEntry;
use crate::codec::SENTINEL_ID;
use crate::merge::MergeRule;
use crate::region::Region;
use crate::store::{RecordStore, StoreResult};
use std::collections::BTreeMap;

/// Unit ids at or above this are story/NPC units, never playable
const PLAYABLE_UNIT_CEILING: i64 = 190_000;

/// Equipment slots per promotion rank
const RANK_SLOTS: usize = 6;

/// Build the character roster from the primary region, then overlay each
/// secondary region.
pub fn build_characters(
    primary: &dyn RecordStore,
    secondaries: &[(Region, &dyn RecordStore)],
) -> StoreResult<BTreeMap<String, CharacterEntry>> {
    let mut roster = BTreeMap::new();

    collect_region_units(primary, Region::PRIMARY, &mut roster)?;
    collect_region_promotions(primary, &mut roster)?;
    purge_unequipped(&mut roster);

    for (region, store) in secondaries {
        collect_region_units(*store, *region, &mut roster)?;
        collect_region_promotions(*store, &mut roster)?;
    }

    // Region-exclusive units that still have no promotion data get dropped
    // the same way primary ones did.
    purge_unequipped(&mut roster);

    Ok(roster)
}

fn collect_region_units(
    store: &dyn RecordStore,
    region: Region,
    roster: &mut BTreeMap<String, CharacterEntry>,
) -> StoreResult<()> {
    for row in store.rows("unit_data")? {
        let Some(unit_id) = row.int("unit_id") else {
            continue;
        };
        if unit_id >= PLAYABLE_UNIT_CEILING {
            continue;
        }
        let id = unit_id.to_string();
        let name = row.string("unit_name").unwrap_or_default();

        if let Some(entry) = roster.get_mut(&id) {
            MergeRule::FillIfAbsent.apply(&mut entry.name, region, name);
        } else {
            let mut entry = CharacterEntry {
                id: id.clone(),
                ..CharacterEntry::default()
            };
            // A unit first seen in a secondary region is region-exclusive;
            // mirror its name onto the default key as well.
            if region != Region::PRIMARY {
                entry.name.insert(Region::PRIMARY, name.clone());
            }
            entry.name.insert(region, name);
            roster.insert(id, entry);
        }
    }
    Ok(())
}

/// Each promotion row supplies the six slot requirements for one
/// `(unit, promotion level)` pair. Later regions never overwrite a rank the
/// primary region already defined.
fn collect_region_promotions(
    store: &dyn RecordStore,
    roster: &mut BTreeMap<String, CharacterEntry>,
) -> StoreResult<()> {
    for row in store.rows("unit_promotion")? {
        let Some(unit_id) = row.int("unit_id") else {
            continue;
        };
        if unit_id >= PLAYABLE_UNIT_CEILING {
            continue;
        }
        let Some(entry) = roster.get_mut(&unit_id.to_string()) else {
            // Promotion data for a unit this run never saw; skip.
            continue;
        };
        let Some(level) = row.int("promotion_level") else {
            continue;
        };

        let slots: Vec<String> = (1..=RANK_SLOTS)
            .map(|slot| {
                row.string(&format!("equip_slot_{slot}"))
                    .unwrap_or_else(|| SENTINEL_ID.to_string())
            })
            .collect();

        MergeRule::FillIfAbsent.apply(&mut entry.equipment, format!("rank_{level}"), slots);
    }
    Ok(())
}

/// A character with no promotion data after all regions does not exist as
/// far as the catalog is concerned.
fn purge_unequipped(roster: &mut BTreeMap<String, CharacterEntry>) {
    roster.retain(|_, entry| !entry.equipment.is_empty());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Field, MemoryStore, Row};

    fn unit_row(id: i64, name: &str) -> Row {
        vec![
            ("unit_id".to_string(), Field::Int(id)),
            ("unit_name".to_string(), Field::Text(name.to_string())),
        ]
        .into_iter()
        .collect()
    }

    fn promotion_row(id: i64, level: i64, slots: [i64; 6]) -> Row {
        let mut fields = vec![
            ("unit_id".to_string(), Field::Int(id)),
            ("promotion_level".to_string(), Field::Int(level)),
        ];
        for (i, slot) in slots.iter().enumerate() {
            fields.push((format!("equip_slot_{}", i + 1), Field::Int(*slot)));
        }
        fields.into_iter().collect()
    }

    fn region_store(units: Vec<Row>, promotions: Vec<Row>) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert_table("unit_data", units);
        store.insert_table("unit_promotion", promotions);
        store
    }

    #[test]
    fn test_unit_with_promotion_ranks() {
        let store = region_store(
            vec![unit_row(100_101, "Hiyori")],
            vec![
                promotion_row(100_101, 1, [101_011, 101_012, 999_999, 999_999, 999_999, 999_999]),
                promotion_row(100_101, 2, [102_011, 102_012, 102_013, 999_999, 999_999, 999_999]),
            ],
        );

        let roster = build_characters(&store, &[]).unwrap();
        let entry = &roster["100101"];
        assert_eq!(entry.name[&Region::Jp], "Hiyori");
        assert_eq!(entry.equipment.len(), 2);
        assert_eq!(entry.equipment["rank_1"][0], "101011");
        assert_eq!(entry.equipment["rank_1"][5], "999999");
        assert_eq!(entry.equipment["rank_2"][2], "102013");
    }

    #[test]
    fn test_npc_units_excluded() {
        let store = region_store(
            vec![unit_row(190_001, "Story NPC")],
            vec![promotion_row(190_001, 1, [101_011; 6])],
        );

        let roster = build_characters(&store, &[]).unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_unit_without_promotions_purged() {
        let store = region_store(vec![unit_row(100_101, "Hiyori")], vec![]);

        let roster = build_characters(&store, &[]).unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_promotion_for_unknown_unit_skipped() {
        let store = region_store(
            vec![],
            vec![promotion_row(100_101, 1, [101_011; 6])],
        );

        let roster = build_characters(&store, &[]).unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_region_exclusive_character() {
        let jp = region_store(vec![], vec![]);
        let cn = region_store(
            vec![unit_row(100_901, "晶")],
            vec![promotion_row(100_901, 1, [101_011; 6])],
        );

        let roster = build_characters(&jp, &[(Region::Cn, &cn)]).unwrap();
        let entry = &roster["100901"];
        assert_eq!(entry.name[&Region::Cn], "晶");
        assert_eq!(entry.name[&Region::Jp], "晶");
        assert!(entry.equipment.contains_key("rank_1"));
    }

    #[test]
    fn test_region_exclusive_without_promotions_purged() {
        let jp = region_store(vec![], vec![]);
        let cn = region_store(vec![unit_row(100_901, "晶")], vec![]);

        let roster = build_characters(&jp, &[(Region::Cn, &cn)]).unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_secondary_region_never_overwrites_ranks() {
        let jp = region_store(
            vec![unit_row(100_101, "Hiyori")],
            vec![promotion_row(100_101, 1, [101_011; 6])],
        );
        let cn = region_store(
            vec![unit_row(100_101, "日和莉")],
            vec![
                // Divergent definition for an existing rank plus a new one
                promotion_row(100_101, 1, [888_888; 6]),
                promotion_row(100_101, 2, [102_011; 6]),
            ],
        );

        let roster = build_characters(&jp, &[(Region::Cn, &cn)]).unwrap();
        let entry = &roster["100101"];
        assert_eq!(entry.name[&Region::Jp], "Hiyori");
        assert_eq!(entry.name[&Region::Cn], "日和莉");
        assert_eq!(entry.equipment["rank_1"][0], "101011");
        assert_eq!(entry.equipment["rank_2"][0], "102011");
    }
}
