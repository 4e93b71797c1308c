//! Chance-weighted item generation.
//!
//! An [`ItemFactory`] is one loot rule: a chance roll, an item kind and an
//! optional quantity range, plus cosmetic metadata (name, lore,
//! enchantments). Rules come out of configuration mappings and are applied
//! with [`ItemFactory::try_create`] when filling kits.
//!
//! The mapping codec is deliberately best-effort: absent or mistyped keys
//! fall back to their defaults and unknown keys are ignored, so a sloppy
//! config degrades instead of erroring.

use std::collections::BTreeMap;

use rand::Rng;
use serde_yaml::{Mapping, Value};

use crate::models::item::ItemStack;

/// Sentinel material for a rule with no item kind configured.
pub const MATERIAL_NONE: &str = "none";

/// A configuration-driven item generator.
///
/// Immutable value object; equality is structural over all fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFactory {
    /// Probability in `[0, 1]` that [`try_create`](Self::try_create)
    /// produces an item.
    pub chance: f64,
    pub material: String,
    pub data: u8,
    /// Exclusive upper bound on the quantity draw; `-1` means no range.
    pub max: i32,
    pub min: u32,
    pub name: Option<String>,
    pub lore: Vec<String>,
    pub enchantments: BTreeMap<String, u32>,
}

impl Default for ItemFactory {
    fn default() -> Self {
        Self {
            chance: 1.0,
            material: MATERIAL_NONE.to_owned(),
            data: 0,
            max: -1,
            min: 1,
            name: None,
            lore: Vec::new(),
            enchantments: BTreeMap::new(),
        }
    }
}

impl ItemFactory {
    pub fn new(material: impl Into<String>) -> Self {
        Self { material: material.into(), ..Self::default() }
    }

    /// Rolls the chance and produces an item on success.
    pub fn try_create<R: Rng>(&self, rng: &mut R) -> Option<ItemStack> {
        if rng.gen::<f64>() >= self.chance {
            return None;
        }
        Some(self.force_create(rng))
    }

    /// Produces an item unconditionally, ignoring chance.
    pub fn force_create<R: Rng>(&self, rng: &mut R) -> ItemStack {
        ItemStack {
            material: self.material.clone(),
            data: self.data,
            amount: self.amount(rng),
            name: self.name.clone(),
            lore: self.lore.clone(),
            enchantments: self.enchantments.clone(),
        }
    }

    /// Uniform draw in `[min, max)` when a non-empty range is set, else
    /// exactly `min`.
    fn amount<R: Rng>(&self, rng: &mut R) -> u32 {
        if self.is_max_set() && self.max as u32 > self.min {
            rng.gen_range(self.min..self.max as u32)
        } else {
            self.min
        }
    }

    fn is_max_set(&self) -> bool {
        self.max > -1
    }

    /// Builds a rule from a configuration mapping.
    ///
    /// Every field is optional; see the module docs for the best-effort
    /// policy. Enchantments are read from a nested `enchantments` map and
    /// from the flattened `enchantments.<name>` keys that
    /// [`serialize`](Self::serialize) writes.
    pub fn deserialize(data: &Mapping) -> Self {
        let mut factory = ItemFactory::default();

        if let Some(chance) = data.get("chance").and_then(Value::as_f64) {
            factory.chance = chance;
        }
        if let Some(material) = data.get("material").and_then(Value::as_str) {
            factory.material = material.to_owned();
        }
        if let Some(item_data) = data.get("data").and_then(Value::as_u64) {
            factory.data = item_data as u8;
        }
        if let Some(max) = data.get("amount.max").and_then(Value::as_i64) {
            factory.max = max as i32;
        }
        if let Some(min) = data.get("amount.min").and_then(Value::as_u64) {
            factory.min = min as u32;
        }
        if let Some(name) = data.get("name").and_then(Value::as_str) {
            factory.name = Some(name.to_owned());
        }
        if let Some(lore) = data.get("lore").and_then(Value::as_sequence) {
            factory.lore = lore.iter().filter_map(Value::as_str).map(str::to_owned).collect();
        }
        if let Some(enchantments) = data.get("enchantments").and_then(Value::as_mapping) {
            for (key, value) in enchantments {
                if let (Some(name), Some(level)) = (key.as_str(), value.as_u64()) {
                    factory.enchantments.insert(name.to_owned(), level as u32);
                }
            }
        }
        for (key, value) in data {
            if let (Some(key), Some(level)) = (key.as_str(), value.as_u64()) {
                if let Some(name) = key.strip_prefix("enchantments.") {
                    factory.enchantments.insert(name.to_owned(), level as u32);
                }
            }
        }

        factory
    }

    /// Writes the rule back to a mapping, omitting fields at their
    /// defaults. The default rule serializes to an empty mapping; the
    /// round trip is lossy by design since defaults are never written.
    pub fn serialize(&self) -> Mapping {
        let mut target = Mapping::new();

        if self.chance != 1.0 {
            target.insert(Value::from("chance"), Value::from(self.chance));
        }
        if self.material != MATERIAL_NONE {
            target.insert(Value::from("material"), Value::from(self.material.clone()));
        }
        if self.data != 0 {
            target.insert(Value::from("data"), Value::from(self.data as u64));
        }
        if self.is_max_set() {
            target.insert(Value::from("amount.max"), Value::from(self.max as i64));
        }
        if self.min > 1 {
            target.insert(Value::from("amount.min"), Value::from(self.min as u64));
        }
        if let Some(name) = &self.name {
            target.insert(Value::from("name"), Value::from(name.clone()));
        }
        if !self.lore.is_empty() {
            let lore: Vec<Value> = self.lore.iter().map(|l| Value::from(l.clone())).collect();
            target.insert(Value::from("lore"), Value::Sequence(lore));
        }
        for (name, level) in &self.enchantments {
            target.insert(
                Value::from(format!("enchantments.{name}")),
                Value::from(*level as u64),
            );
        }

        target
    }
}
