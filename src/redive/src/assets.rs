//! Missing-asset derivation.
//!
//! After normalization the catalog references image ids that may not exist
//! in the local output tree yet. This pass names every equipment,
//! character, memory-piece, and quest-drop image still missing so the
//! asset pipeline can fetch and decrypt them.

use crate::catalog::Catalog;
use crate::codec::SENTINEL_ID;
use std::collections::BTreeSet;
use std::path::Path;

/// Asset class, matching the bundle name prefix on the CDN
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AssetKind {
    /// Consumable/memory-piece icons (`item_<id>`)
    Item,
    /// Equipment icons (`equipment_<id>`)
    Equipment,
    /// Character icons (`unit_<id>`)
    UnitIcon,
}

impl AssetKind {
    /// Bundle name prefix
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Equipment => "equipment",
            Self::UnitIcon => "unit",
        }
    }

    /// Subdirectory under the image output root
    fn subdir(&self) -> &'static str {
        match self {
            Self::Item | Self::Equipment => "items",
            Self::UnitIcon => "unit_icon",
        }
    }
}

/// One image the asset pipeline still has to resolve
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AssetRequest {
    pub kind: AssetKind,
    pub id: String,
}

impl AssetRequest {
    /// CDN bundle name (`equipment_101011`, `item_31001`, `unit_100131`)
    pub fn bundle_name(&self) -> String {
        format!("{}_{}", self.kind.prefix(), self.id)
    }

    fn exists_under(&self, image_root: &Path) -> bool {
        image_root
            .join(self.kind.subdir())
            .join(format!("{}.png", self.id))
            .exists()
    }
}

/// Memory-piece item ids live in the item bundle, everything else in the
/// equipment bundle.
fn item_or_equipment(id: &str) -> AssetKind {
    if id.starts_with("31") || id.starts_with("32") {
        AssetKind::Item
    } else {
        AssetKind::Equipment
    }
}

/// Unit icons are published per rarity; the catalog stores the base unit
/// id, the icon bundle uses the three-star variant.
fn unit_icon_id(unit_id: &str) -> String {
    if unit_id.len() < 6 {
        return unit_id.to_string();
    }
    format!("{}3{}", &unit_id[..4], &unit_id[5..])
}

/// Every catalog image id whose file is absent under `image_root`,
/// deduplicated and in deterministic order.
pub fn missing_assets(catalog: &Catalog, image_root: &Path) -> Vec<AssetRequest> {
    let mut wanted = BTreeSet::new();

    for (id, entry) in &catalog.equipment {
        wanted.insert(AssetRequest {
            kind: item_or_equipment(id),
            id: id.clone(),
        });
        if !entry.fragment.is_sentinel() {
            wanted.insert(AssetRequest {
                kind: AssetKind::Equipment,
                id: entry.fragment.id.clone(),
            });
        }
    }

    for id in catalog.character.keys() {
        wanted.insert(AssetRequest {
            kind: AssetKind::UnitIcon,
            id: unit_icon_id(id),
        });
    }

    for quest in catalog.quest.values() {
        let singles = std::iter::once(&quest.memory_piece);
        for drop in quest.drops.iter().chain(quest.subdrops.iter()).chain(singles) {
            if drop.item.is_empty() || drop.item == SENTINEL_ID {
                continue;
            }
            wanted.insert(AssetRequest {
                kind: item_or_equipment(&drop.item),
                id: drop.item.clone(),
            });
        }
    }

    wanted
        .into_iter()
        .filter(|request| !request.exists_under(image_root))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CharacterEntry, EquipmentEntry, Fragment, ItemDrop, QuestEntry, Recipe};
    use crate::region::Region;
    use std::collections::BTreeMap;
    use std::fs;

    fn equipment_entry(id: &str, fragment_id: Option<&str>) -> EquipmentEntry {
        EquipmentEntry {
            id: id.to_string(),
            name: BTreeMap::new(),
            rarity: None,
            fragment: match fragment_id {
                Some(fid) => Fragment {
                    id: fid.to_string(),
                    name: BTreeMap::new(),
                },
                None => Fragment::sentinel(),
            },
            recipes: BTreeMap::from([(Region::Jp, Recipe::placeholder(Region::Jp))]),
        }
    }

    fn catalog_with_equipment(entries: Vec<EquipmentEntry>) -> Catalog {
        let mut catalog = Catalog::default();
        for entry in entries {
            catalog.equipment.insert(entry.id.clone(), entry);
        }
        catalog
    }

    #[test]
    fn test_missing_equipment_and_fragment() {
        let dir = tempfile::tempdir().unwrap();
        let catalog =
            catalog_with_equipment(vec![equipment_entry("101011", Some("111011"))]);

        let requests = missing_assets(&catalog, dir.path());
        let names: Vec<String> = requests.iter().map(AssetRequest::bundle_name).collect();
        assert_eq!(names, vec!["equipment_101011", "equipment_111011"]);
    }

    #[test]
    fn test_existing_images_not_requested() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("items")).unwrap();
        fs::write(dir.path().join("items/101011.png"), b"png").unwrap();

        let catalog = catalog_with_equipment(vec![equipment_entry("101011", None)]);
        assert!(missing_assets(&catalog, dir.path()).is_empty());
    }

    #[test]
    fn test_memory_piece_uses_item_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog_with_equipment(vec![equipment_entry("31001", None)]);

        let requests = missing_assets(&catalog, dir.path());
        assert_eq!(requests[0].bundle_name(), "item_31001");
    }

    #[test]
    fn test_unit_icon_three_star_variant() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = Catalog::default();
        catalog.character.insert(
            "100101".to_string(),
            CharacterEntry {
                id: "100101".to_string(),
                ..CharacterEntry::default()
            },
        );

        let requests = missing_assets(&catalog, dir.path());
        assert_eq!(requests[0].bundle_name(), "unit_100131");
    }

    #[test]
    fn test_quest_drops_deduplicated_and_sentinels_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = Catalog::default();
        catalog.quest.insert(
            "3-1".to_string(),
            QuestEntry {
                key: "3-1".to_string(),
                name: String::new(),
                stamina: 10,
                memory_piece: ItemDrop {
                    item: "31001".to_string(),
                    drop_rate: 27,
                },
                drops: vec![
                    ItemDrop {
                        item: "101011".to_string(),
                        drop_rate: 18,
                    },
                    ItemDrop {
                        item: "101011".to_string(),
                        drop_rate: 20,
                    },
                ],
                subdrops: vec![ItemDrop::none()],
            },
        );

        let requests = missing_assets(&catalog, dir.path());
        let names: Vec<String> = requests.iter().map(AssetRequest::bundle_name).collect();
        assert_eq!(names, vec!["item_31001", "equipment_101011"]);
    }
}
