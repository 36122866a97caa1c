//! Compiled-in world name table.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::models::WorldId;

/// Region and language bucket a world belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// 1xxx worlds.
    NorthAmerica,
    /// 20xx worlds.
    EuropeEnglish,
    /// 21xx worlds, tagged `[FR]`.
    EuropeFrench,
    /// 22xx worlds, tagged `[DE]`.
    EuropeGerman,
    /// 23xx worlds, tagged `[SP]`.
    EuropeSpanish,
}

impl Region {
    /// Short label used in the UI.
    pub fn label(self) -> &'static str {
        match self {
            Region::NorthAmerica => "NA",
            Region::EuropeEnglish => "EU",
            Region::EuropeFrench => "EU-FR",
            Region::EuropeGerman => "EU-DE",
            Region::EuropeSpanish => "EU-SP",
        }
    }
}

const WORLD_NAMES: &[(u32, &str)] = &[
    (1001, "Anvil Rock"),
    (1002, "Borlis Pass"),
    (1003, "Yak's Bend"),
    (1004, "Henge of Denravi"),
    (1005, "Maguuma"),
    (1006, "Sorrow's Furnace"),
    (1007, "Gate of Madness"),
    (1008, "Jade Quarry"),
    (1009, "Fort Aspenwood"),
    (1010, "Ehmry Bay"),
    (1011, "Stormbluff Isle"),
    (1012, "Darkhaven"),
    (1013, "Sanctum of Rall"),
    (1014, "Crystal Desert"),
    (1015, "Isle of Janthir"),
    (1016, "Sea of Sorrows"),
    (1017, "Tarnished Coast"),
    (1018, "Northern Shiverpeaks"),
    (1019, "Blackgate"),
    (1020, "Ferguson's Crossing"),
    (1021, "Dragonbrand"),
    (1022, "Kaineng"),
    (1023, "Devona's Rest"),
    (1024, "Eredon Terrace"),
    (2001, "Fissure of Woe"),
    (2002, "Desolation"),
    (2003, "Gandara"),
    (2004, "Blacktide"),
    (2005, "Ring of Fire"),
    (2006, "Underworld"),
    (2007, "Far Shiverpeaks"),
    (2008, "Whiteside Ridge"),
    (2009, "Ruins of Surmia"),
    (2010, "Seafarer's Rest"),
    (2011, "Vabbi"),
    (2012, "Piken Square"),
    (2013, "Aurora Glade"),
    (2014, "Gunnar's Hold"),
    (2101, "Jade Sea [FR]"),
    (2102, "Fort Ranik [FR]"),
    (2103, "Augury Rock [FR]"),
    (2104, "Vizunah Square [FR]"),
    (2105, "Arborstone [FR]"),
    (2201, "Kodash [DE]"),
    (2202, "Riverside [DE]"),
    (2203, "Elona Reach [DE]"),
    (2204, "Abaddon's Mouth [DE]"),
    (2205, "Drakkar Lake [DE]"),
    (2206, "Miller's Sound [DE]"),
    (2207, "Dzagonur [DE]"),
    (2301, "Baruch Bay [SP]"),
];

static TABLE: Lazy<BTreeMap<WorldId, &'static str>> = Lazy::new(|| {
    WORLD_NAMES
        .iter()
        .map(|(id, name)| (WorldId(*id), *name))
        .collect()
});

/// Display name of a world, or `None` when the ID is not in the table.
pub fn resolve_name(id: WorldId) -> Option<&'static str> {
    TABLE.get(&id).copied()
}

/// Region of a known world.
pub fn region(id: WorldId) -> Option<Region> {
    if !TABLE.contains_key(&id) {
        return None;
    }
    match id.0 / 100 {
        10 => Some(Region::NorthAmerica),
        20 => Some(Region::EuropeEnglish),
        21 => Some(Region::EuropeFrench),
        22 => Some(Region::EuropeGerman),
        23 => Some(Region::EuropeSpanish),
        _ => None,
    }
}

/// Every known world in ascending ID order.
pub fn entries() -> impl Iterator<Item = (WorldId, &'static str)> {
    TABLE.iter().map(|(id, name)| (*id, *name))
}

/// Name for display, falling back to a placeholder carrying the raw ID.
pub fn display_name(id: WorldId) -> String {
    resolve_name(id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Unknown world ({id})"))
}
