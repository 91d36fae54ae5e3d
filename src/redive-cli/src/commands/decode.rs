//! Composite id inspection

use anyhow::Result;
use redive::{codec, Difficulty, EquipmentKind};

/// Handle `redive decode`
///
/// Eight-digit ids are quest ids; everything else is treated as an
/// equipment id.
pub fn handle(id: &str) -> Result<()> {
    if id.len() == 8 && id.chars().all(|c| c.is_ascii_digit()) {
        decode_quest(id);
    } else {
        decode_equipment(id);
    }
    Ok(())
}

fn decode_quest(id: &str) {
    let parts = codec::decode_quest(id.parse().unwrap_or(0));
    let difficulty = match parts.difficulty() {
        Some(Difficulty::Normal) => "normal",
        Some(Difficulty::Hard) => "hard",
        Some(Difficulty::VeryHard) => "very hard",
        None => "unknown",
    };
    println!("quest id:   {id}");
    println!("difficulty: {} ({})", parts.difficulty_code, difficulty);
    println!("chapter:    {}", parts.chapter);
    println!("number:     {}", parts.number);
}

fn decode_equipment(id: &str) {
    let parts = codec::decode_equipment(id);
    let kind = match parts.kind() {
        Some(EquipmentKind::Full) => "full equipment",
        Some(EquipmentKind::Fragment) => "fragment",
        Some(EquipmentKind::Blueprint) => "blueprint",
        None => "unknown",
    };
    println!("equipment id: {id}");
    println!("type:         {} ({})", parts.kind, kind);
    println!("rarity:       {}", parts.rarity);
    println!("item suffix:  {}", parts.item);
}
