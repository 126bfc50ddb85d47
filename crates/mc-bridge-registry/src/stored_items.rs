//! Item mappings that translators refer to by name, resolved once.

use crate::error::RegistryError;
use crate::item_mappings::ItemMapping;

#[derive(Debug, Clone)]
pub struct StoredItemMappings {
    pub bamboo: ItemMapping,
    pub banner: ItemMapping,
    pub chest: ItemMapping,
    pub compass: ItemMapping,
    pub egg: ItemMapping,
    pub glass_bottle: ItemMapping,
    pub milk_bucket: ItemMapping,
    pub saddle: ItemMapping,
    pub shears: ItemMapping,
    pub shield: ItemMapping,
    pub water_bucket: ItemMapping,
    pub wheat: ItemMapping,
    pub writable_book: ItemMapping,
}

impl StoredItemMappings {
    /// Resolve every stored item through `find`. A missing item is fatal.
    pub fn resolve<'a, F>(find: F) -> Result<Self, RegistryError>
    where
        F: Fn(&str) -> Option<&'a ItemMapping>,
    {
        let load = |identifier: &str| {
            find(identifier)
                .cloned()
                .ok_or_else(|| RegistryError::UnknownIdentifier {
                    context: "stored items",
                    identifier: identifier.to_owned(),
                })
        };

        Ok(Self {
            bamboo: load("minecraft:bamboo")?,
            banner: load("minecraft:white_banner")?,
            chest: load("minecraft:chest")?,
            compass: load("minecraft:compass")?,
            egg: load("minecraft:egg")?,
            glass_bottle: load("minecraft:glass_bottle")?,
            milk_bucket: load("minecraft:milk_bucket")?,
            saddle: load("minecraft:saddle")?,
            shears: load("minecraft:shears")?,
            shield: load("minecraft:shield")?,
            water_bucket: load("minecraft:water_bucket")?,
            wheat: load("minecraft:wheat")?,
            writable_book: load("minecraft:writable_book")?,
        })
    }
}
