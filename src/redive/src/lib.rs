//! # redive
//!
//! Master database normalization for Princess Connect Re:Dive: turns raw
//! per-region table snapshots into a denormalized, cross-referenced catalog
//! of equipment, characters, and quests with their drop tables.
//!
//! The engine is a single deterministic pass over fully materialized
//! snapshots. Downloading snapshots, writing catalog JSON, and resolving
//! image assets are the callers' concerns (see the `redive` CLI crate).
//!
//! ## Example
//!
//! ```no_run
//! use redive::catalog::build_catalog;
//! use redive::store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let jp = SqliteStore::open("master_jp.db")?;
//! let cn = SqliteStore::open("master_cn.db")?;
//!
//! let catalog = build_catalog(&jp, &[(redive::Region::Cn, &cn)])?;
//! println!("{} equipment entries", catalog.equipment.len());
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod catalog;
pub mod codec;
pub mod merge;
pub mod region;
pub mod store;
pub mod version;

// Re-export commonly used items
#[doc(inline)]
pub use assets::{missing_assets, AssetKind, AssetRequest};
#[doc(inline)]
pub use catalog::{build_catalog, Catalog, CharacterEntry, EquipmentEntry, ItemDrop, QuestEntry};
#[doc(inline)]
pub use codec::{
    compose_quest, decode_equipment, decode_quest, Difficulty, EquipmentKind, SENTINEL_ID,
};
#[doc(inline)]
pub use region::Region;
#[doc(inline)]
pub use store::{MemoryStore, RecordStore, SqliteStore, StoreError};
