//! Region-overlay merge policy.
//!
//! Secondary-region passes differ only in whether an incoming value may
//! land on a key that is already populated. Character data fills gaps and
//! never displaces the primary region; per-region maps (equipment names,
//! recipes) always gain the new region's key. Both passes route through
//! `MergeRule` so they stay symmetric.

use std::collections::BTreeMap;

/// How a secondary-region value is merged into an owned mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRule {
    /// Write only when the key is still absent (character names, rank slots)
    FillIfAbsent,
    /// Write the region's own key unconditionally (equipment name/recipe maps,
    /// where the primary region lives under a different key)
    AddRegionKey,
}

impl MergeRule {
    /// Apply the rule; returns whether the value was written
    pub fn apply<K: Ord, V>(&self, map: &mut BTreeMap<K, V>, key: K, value: V) -> bool {
        match self {
            Self::FillIfAbsent => {
                if map.contains_key(&key) {
                    false
                } else {
                    map.insert(key, value);
                    true
                }
            }
            Self::AddRegionKey => {
                map.insert(key, value);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_if_absent_keeps_existing() {
        let mut map = BTreeMap::new();
        map.insert("rank_1", vec!["101011"]);
        assert!(!MergeRule::FillIfAbsent.apply(&mut map, "rank_1", vec!["999999"]));
        assert_eq!(map["rank_1"], vec!["101011"]);
    }

    #[test]
    fn test_fill_if_absent_writes_missing() {
        let mut map: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        assert!(MergeRule::FillIfAbsent.apply(&mut map, "rank_2", vec!["101011"]));
        assert_eq!(map["rank_2"], vec!["101011"]);
    }

    #[test]
    fn test_add_region_key_overwrites_own_key() {
        let mut map = BTreeMap::new();
        map.insert("CN", "old");
        assert!(MergeRule::AddRegionKey.apply(&mut map, "CN", "new"));
        assert_eq!(map["CN"], "new");
    }
}
