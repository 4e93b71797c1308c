//! Per-arena kit configuration.
//!
//! An arena's settings describe the kit handed to every participant at
//! match start: the base inventory (a list of loot rules) and up to four
//! armour pieces. Documents are YAML; individual rules follow the
//! best-effort mapping codec in [`crate::loot`].

use std::path::Path;

use serde_yaml::Value;

use crate::error::GameError;
use crate::loot::ItemFactory;

/// Kit definition for one arena.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArenaSettings {
    /// Base kit, one rule per inventory stack. Rules roll their chance, so
    /// a kit entry with `chance < 1` is present in some matches only.
    pub inventory: Vec<ItemFactory>,
    pub helmet: Option<ItemFactory>,
    pub chestplate: Option<ItemFactory>,
    pub leggings: Option<ItemFactory>,
    pub boots: Option<ItemFactory>,
}

impl ArenaSettings {
    /// Parses a settings document.
    ///
    /// A document that is not valid YAML or not a mapping is
    /// [`GameError::Config`]; inside the mapping every field is optional
    /// and malformed entries default silently.
    pub fn from_yaml(document: &str) -> Result<Self, GameError> {
        let value: Value = serde_yaml::from_str(document)
            .map_err(|e| GameError::Config(e.to_string()))?;
        let mapping = value
            .as_mapping()
            .ok_or_else(|| GameError::Config("settings document is not a mapping".to_owned()))?;

        let mut settings = ArenaSettings::default();

        if let Some(inventory) = mapping.get("inventory").and_then(Value::as_sequence) {
            settings.inventory = inventory
                .iter()
                .filter_map(Value::as_mapping)
                .map(ItemFactory::deserialize)
                .collect();
        }
        settings.helmet = armour_rule(mapping.get("helmet"));
        settings.chestplate = armour_rule(mapping.get("chestplate"));
        settings.leggings = armour_rule(mapping.get("leggings"));
        settings.boots = armour_rule(mapping.get("boots"));

        Ok(settings)
    }

    /// Reads and parses a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let document = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_yaml(&document)?;
        log::debug!(
            "loaded arena settings from {:?} ({} kit rules)",
            path.as_ref(),
            settings.inventory.len()
        );
        Ok(settings)
    }
}

fn armour_rule(value: Option<&Value>) -> Option<ItemFactory> {
    value.and_then(Value::as_mapping).map(ItemFactory::deserialize)
}
