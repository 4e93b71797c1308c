//! Item and game-mode records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A stack of items as handed to the host inventory API.
///
/// `material` is the host-defined item kind; `"none"` (see
/// [`crate::loot::MATERIAL_NONE`]) marks an unset kind. Equality is
/// structural over every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub material: String,
    pub data: u8,
    pub amount: u32,
    pub name: Option<String>,
    pub lore: Vec<String>,
    pub enchantments: BTreeMap<String, u32>,
}

impl ItemStack {
    pub fn new(material: impl Into<String>, amount: u32) -> Self {
        Self {
            material: material.into(),
            data: 0,
            amount,
            name: None,
            lore: Vec::new(),
            enchantments: BTreeMap::new(),
        }
    }
}

/// Host game modes. Matches run in `Adventure`, which prevents block
/// placement and breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Survival,
    Creative,
    Adventure,
    Spectator,
}
