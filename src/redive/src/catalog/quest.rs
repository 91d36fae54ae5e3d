//! Quest catalog reconstruction.
//!
//! The source tables never state how many hard or very-hard quests a
//! chapter has, or which hard quest follows which normal one; the key space
//! is rebuilt from numeric adjacency of quest ids. Wave-group and
//! enemy-reward tables are flattened into per-quest drop lists, and event
//! quests are overlaid on top with fixed placeholder drops.

use super::{ItemDrop, QuestEntry};
use crate::codec::{self, Difficulty};
use crate::store::{RecordStore, StoreResult};
use std::collections::{BTreeMap, HashMap};

/// Quest ids at or above this belong to test/unused quest types
const QUEST_ID_CEILING: i64 = 14_000_000;

/// Event quest keys are derived from `event_id` minus this offset
const EVENT_ID_OFFSET: i64 = 20_000;

/// Reward triple types in enemy-reward rows
const REWARD_TYPE_ITEM: i64 = 2;
const REWARD_TYPE_EQUIPMENT: i64 = 4;

/// Wave-group references per quest and reward slots per group
const WAVES_PER_QUEST: usize = 3;
const REWARDS_PER_GROUP: usize = 5;

/// Item ids starting with this digit are memory pieces
const MEMORY_PIECE_PREFIX: char = '3';

/// One quest row, decoded but not yet keyed
#[derive(Debug, Clone)]
struct QuestRecord {
    name: String,
    stamina: i64,
    /// Chapter/number labels parsed from the display name
    chapter_label: String,
    number_label: String,
    wave_group_ids: [i64; WAVES_PER_QUEST],
}

impl QuestRecord {
    /// Quests missing any wave group are not yet released
    fn fully_populated(&self) -> bool {
        self.wave_group_ids.iter().all(|id| *id != 0)
    }
}

/// A reward triple from an enemy-reward row
type RewardTriple = (i64, i64, i64); // (type, id, odds)

/// Reconstructs the quest catalog from one region's snapshot.
///
/// `walk_ceiling` bounds the hard/very-hard numbering walk so malformed
/// data cannot loop unbounded; the number field is three digits, so the
/// default covers every well-formed id.
#[derive(Debug, Clone)]
pub struct QuestBuilder {
    pub walk_ceiling: i64,
}

impl Default for QuestBuilder {
    fn default() -> Self {
        Self { walk_ceiling: 999 }
    }
}

impl QuestBuilder {
    pub fn build(&self, store: &dyn RecordStore) -> StoreResult<BTreeMap<String, QuestEntry>> {
        let index = load_quest_index(store)?;
        let waves = load_wave_groups(store)?;
        let rewards = load_enemy_rewards(store)?;

        let mut quests = self.reconstruct_keys(&index, &waves, &rewards);
        overlay_event_quests(store, &mut quests)?;
        Ok(quests)
    }

    /// Walk normal quests in id order; each chapter's hard and very-hard
    /// sequences are emitted once, when the chapter's last normal quest is
    /// reached.
    fn reconstruct_keys(
        &self,
        index: &BTreeMap<i64, QuestRecord>,
        waves: &HashMap<i64, [i64; REWARDS_PER_GROUP]>,
        rewards: &HashMap<i64, [RewardTriple; REWARDS_PER_GROUP]>,
    ) -> BTreeMap<String, QuestEntry> {
        let mut quests = BTreeMap::new();

        for (&id, record) in index {
            let parts = codec::decode_quest(id);
            if parts.difficulty() != Some(Difficulty::Normal) || !record.fully_populated() {
                continue;
            }

            let key = format!("{}-{}", record.chapter_label, record.number_label);
            quests.insert(key.clone(), make_entry(key, record, waves, rewards));

            // A later normal quest in this chapter will trigger the
            // hard/very-hard walk instead.
            let next = codec::compose_quest(Difficulty::Normal, parts.chapter, parts.number + 1);
            if index.contains_key(&next) {
                continue;
            }

            for (difficulty, suffix) in [(Difficulty::Hard, "H"), (Difficulty::VeryHard, "VH")] {
                let mut number = 1;
                while number <= self.walk_ceiling {
                    let walk_id = codec::compose_quest(difficulty, parts.chapter, number);
                    let Some(walked) = index.get(&walk_id) else {
                        // Numbering is contiguous from 1; the first gap ends
                        // the sequence.
                        break;
                    };
                    if walked.fully_populated() {
                        let key = format!("{}-{}{}", record.chapter_label, number, suffix);
                        quests.insert(key.clone(), make_entry(key, walked, waves, rewards));
                    }
                    number += 1;
                }
            }
        }

        quests
    }
}

fn load_quest_index(store: &dyn RecordStore) -> StoreResult<BTreeMap<i64, QuestRecord>> {
    let mut index = BTreeMap::new();
    for row in store.rows("quest_data")? {
        let Some(id) = row.int("quest_id") else {
            continue;
        };
        if id >= QUEST_ID_CEILING {
            continue;
        }
        let name = row.string("quest_name").unwrap_or_default();
        let (chapter_label, number_label) = parse_name_labels(&name, id);
        index.insert(
            id,
            QuestRecord {
                stamina: row.int("stamina").unwrap_or(0),
                chapter_label,
                number_label,
                wave_group_ids: [
                    row.int("wave_group_id_1").unwrap_or(0),
                    row.int("wave_group_id_2").unwrap_or(0),
                    row.int("wave_group_id_3").unwrap_or(0),
                ],
                name,
            },
        );
    }
    Ok(index)
}

/// Display names carry the chapter/number pair as their leading token,
/// e.g. `"3-5 王都郊外"`. Falls back to the id fields when the name does
/// not parse.
fn parse_name_labels(name: &str, id: i64) -> (String, String) {
    if let Some(token) = name.split_whitespace().next() {
        if let Some((chapter, number)) = token.split_once('-') {
            if !chapter.is_empty() && !number.is_empty() {
                return (chapter.to_string(), number.to_string());
            }
        }
    }
    let parts = codec::decode_quest(id);
    (parts.chapter.to_string(), parts.number.to_string())
}

fn load_wave_groups(
    store: &dyn RecordStore,
) -> StoreResult<HashMap<i64, [i64; REWARDS_PER_GROUP]>> {
    let mut waves = HashMap::new();
    for row in store.rows("wave_group_data")? {
        let Some(id) = row.int("wave_group_id") else {
            continue;
        };
        let mut refs = [0i64; REWARDS_PER_GROUP];
        for (slot, reward) in refs.iter_mut().enumerate() {
            *reward = row.int(&format!("drop_reward_id_{}", slot + 1)).unwrap_or(0);
        }
        waves.insert(id, refs);
    }
    Ok(waves)
}

fn load_enemy_rewards(
    store: &dyn RecordStore,
) -> StoreResult<HashMap<i64, [RewardTriple; REWARDS_PER_GROUP]>> {
    let mut rewards = HashMap::new();
    for row in store.rows("enemy_reward_data")? {
        let Some(id) = row.int("drop_reward_id") else {
            continue;
        };
        let mut triples = [(0i64, 0i64, 0i64); REWARDS_PER_GROUP];
        for (slot, triple) in triples.iter_mut().enumerate() {
            *triple = (
                row.int(&format!("reward_type_{}", slot + 1)).unwrap_or(0),
                row.int(&format!("reward_id_{}", slot + 1)).unwrap_or(0),
                row.int(&format!("odds_{}", slot + 1)).unwrap_or(0),
            );
        }
        rewards.insert(id, triples);
    }
    Ok(rewards)
}

fn make_entry(
    key: String,
    record: &QuestRecord,
    waves: &HashMap<i64, [i64; REWARDS_PER_GROUP]>,
    rewards: &HashMap<i64, [RewardTriple; REWARDS_PER_GROUP]>,
) -> QuestEntry {
    let mut entry = QuestEntry {
        key,
        name: record.name.clone(),
        stamina: record.stamina,
        memory_piece: ItemDrop::none(),
        drops: Vec::new(),
        subdrops: Vec::new(),
    };

    for wave_id in record.wave_group_ids {
        let Some(group) = waves.get(&wave_id) else {
            continue;
        };
        for reward_ref in group {
            if *reward_ref == 0 {
                continue;
            }
            let Some(triples) = rewards.get(reward_ref) else {
                continue;
            };
            apply_wave_rewards(triples, &mut entry);
        }
    }

    entry
}

/// Classify one enemy-reward row into the quest entry.
///
/// A row with all five reward ids populated is a flat sub-reward pool and
/// replaces the quest's subdrop table wholesale; later waves overwrite
/// earlier ones. Otherwise the triples are scanned in order until a zero
/// id: equipment rewards append to `drops`, item rewards with a
/// memory-piece id replace `memory_piece` (again, last match wins).
fn apply_wave_rewards(triples: &[RewardTriple; REWARDS_PER_GROUP], entry: &mut QuestEntry) {
    if triples.iter().all(|(_, id, _)| *id != 0) {
        entry.subdrops = triples
            .iter()
            .map(|(_, id, odds)| ItemDrop {
                item: id.to_string(),
                drop_rate: *odds,
            })
            .collect();
        return;
    }

    for (reward_type, id, odds) in triples {
        if *id == 0 {
            break;
        }
        let drop = ItemDrop {
            item: id.to_string(),
            drop_rate: *odds,
        };
        match *reward_type {
            REWARD_TYPE_EQUIPMENT => entry.drops.push(drop),
            REWARD_TYPE_ITEM if id.to_string().starts_with(MEMORY_PIECE_PREFIX) => {
                entry.memory_piece = drop;
            }
            _ => {}
        }
    }
}

/// Event quests expose a single reward and no wave data; they get fixed
/// placeholder drop lists and a key derived from the event id.
fn overlay_event_quests(
    store: &dyn RecordStore,
    quests: &mut BTreeMap<String, QuestEntry>,
) -> StoreResult<()> {
    for row in store.rows("shiori_quest")? {
        let Some(reward_id) = row.int("drop_reward_id") else {
            continue;
        };
        if reward_id == 0 {
            continue;
        }
        let Some(event_id) = row.int("event_id") else {
            continue;
        };
        let name = row.string("quest_name").unwrap_or_default();
        let (_, number_label) = parse_name_labels(&name, row.int("quest_id").unwrap_or(0));
        let key = format!("{}-{}E", event_id - EVENT_ID_OFFSET, number_label);

        quests.insert(
            key.clone(),
            QuestEntry {
                key,
                name,
                stamina: row.int("stamina").unwrap_or(0),
                memory_piece: ItemDrop {
                    item: reward_id.to_string(),
                    drop_rate: row.int("drop_reward_odds").unwrap_or(0),
                },
                drops: vec![ItemDrop::none(); WAVES_PER_QUEST],
                subdrops: vec![ItemDrop::none(); REWARDS_PER_GROUP],
            },
        );
    }
    Ok(())
}
