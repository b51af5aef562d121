//! Catalogue data: level archetypes, stages and boss mechs.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::naming::validate_name;
use crate::reference::Rtid;

/// Top-level level shape, deciding how the player gets plants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    /// Seed chooser before the level starts.
    #[default]
    Standard,
    /// Plants arrive on a conveyor belt.
    Conveyor,
    /// Break vases to find plants and zombies.
    Vasebreaker,
}

impl Archetype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Standard => "standard",
            Archetype::Conveyor => "conveyor",
            Archetype::Vasebreaker => "vasebreaker",
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stages shipped with the engine; each has a matching mower module.
pub const KNOWN_STAGES: [&str; 14] = [
    "EgyptStage",
    "PirateStage",
    "WestStage",
    "IceageStage",
    "LostCityStage",
    "FutureStage",
    "DarkStage",
    "EightiesStage",
    "DinoStage",
    "BeachStage",
    "ModernStage",
    "ZCorpStage",
    "RomanStage",
    "CarnivalStage",
];

/// The lawn a level is played on.
///
/// Any valid name is accepted so custom stages can be targeted; only
/// catalogued stages get mowers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Stage(String);

impl Stage {
    /// Create a stage, validating its name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name("stage", &name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the stage is one of [`KNOWN_STAGES`].
    pub fn is_catalogued(&self) -> bool {
        KNOWN_STAGES.contains(&self.0.as_str())
    }

    /// `RTID(<stage>@LevelModules)`.
    pub fn module_reference(&self) -> Rtid {
        Rtid::level_module(self.0.as_str())
    }

    /// Mower module for catalogued stages, e.g. `EgyptMowers`.
    pub fn mower_module(&self) -> Option<Rtid> {
        if !self.is_catalogued() {
            return None;
        }
        let world = self.0.replace("Stage", "");
        Some(Rtid::level_module(format!("{world}Mowers")))
    }
}

impl TryFrom<String> for Stage {
    type Error = ValidationError;

    fn try_from(name: String) -> Result<Self> {
        Stage::new(name)
    }
}

impl From<Stage> for String {
    fn from(stage: Stage) -> Self {
        stage.0
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Boss mechs available for boss battles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZombossMech {
    #[serde(rename = "zombossmech_egypt")]
    Egypt,
    #[serde(rename = "zombossmech_pirate")]
    Pirate,
    #[serde(rename = "zombossmech_cowboy")]
    Cowboy,
    #[serde(rename = "zombossmech_iceage")]
    Iceage,
    #[serde(rename = "zombossmech_lostcity")]
    LostCity,
    #[serde(rename = "zombossmech_future")]
    Future,
    #[serde(rename = "zombossmech_dark")]
    Dark,
    #[serde(rename = "zombossmech_eighties")]
    Eighties,
    #[serde(rename = "zombossmech_dino")]
    Dino,
    #[serde(rename = "zombossmech_beach")]
    Beach,
    #[serde(rename = "zombossmech_roman")]
    Roman,
    #[serde(rename = "zombossmech_circus")]
    Circus,
}

impl ZombossMech {
    pub const ALL: [ZombossMech; 12] = [
        ZombossMech::Egypt,
        ZombossMech::Pirate,
        ZombossMech::Cowboy,
        ZombossMech::Iceage,
        ZombossMech::LostCity,
        ZombossMech::Future,
        ZombossMech::Dark,
        ZombossMech::Eighties,
        ZombossMech::Dino,
        ZombossMech::Beach,
        ZombossMech::Roman,
        ZombossMech::Circus,
    ];

    /// Engine type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            ZombossMech::Egypt => "zombossmech_egypt",
            ZombossMech::Pirate => "zombossmech_pirate",
            ZombossMech::Cowboy => "zombossmech_cowboy",
            ZombossMech::Iceage => "zombossmech_iceage",
            ZombossMech::LostCity => "zombossmech_lostcity",
            ZombossMech::Future => "zombossmech_future",
            ZombossMech::Dark => "zombossmech_dark",
            ZombossMech::Eighties => "zombossmech_eighties",
            ZombossMech::Dino => "zombossmech_dino",
            ZombossMech::Beach => "zombossmech_beach",
            ZombossMech::Roman => "zombossmech_roman",
            ZombossMech::Circus => "zombossmech_circus",
        }
    }
}
