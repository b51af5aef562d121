//! Last Stand, boss battle, sun bombs and the parameterless side minigames.

use level_model::{Document, Fields, Object, Result, Rtid, ValidationError, ZombossMech};
use serde::Deserialize;

pub const LAST_STAND_ALIAS: &str = "LastStand";
pub const ZOMBOSS_ALIAS: &str = "ZombossBattle";
pub const ZOMBOSS_INTRO_MODULE: &str = "ZombossIntro";
pub const SUN_BOMBS_ALIAS: &str = "SunBombs";

const MAX_STARTING_PLANTFOOD: u32 = 5;

/// Last Stand: no waves until the player is done planting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LastStandSettings {
    pub starting_sun: u32,
    #[serde(default)]
    pub starting_plantfood: u32,
}

impl LastStandSettings {
    pub fn new(starting_sun: u32, starting_plantfood: u32) -> Self {
        Self {
            starting_sun,
            starting_plantfood,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.starting_plantfood > MAX_STARTING_PLANTFOOD {
            return Err(ValidationError::out_of_range(
                "starting plantfood",
                self.starting_plantfood,
                0,
                MAX_STARTING_PLANTFOOD,
            ));
        }
        Ok(())
    }

    pub fn to_object(&self) -> Result<Object> {
        self.validate()?;
        Ok(Object::new("LastStandMinigameProperties")
            .with_alias(LAST_STAND_ALIAS)
            .with_field("StartingPlantfood", self.starting_plantfood)
            .with_field("StartingSun", self.starting_sun))
    }
}

/// Boss battle configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ZombossSettings {
    pub mech: ZombossMech,
}

impl ZombossSettings {
    pub fn new(mech: ZombossMech) -> Self {
        Self { mech }
    }

    pub fn to_object(&self) -> Object {
        Object::new("ZombossBattleModuleProperties")
            .with_alias(ZOMBOSS_ALIAS)
            .with_field("ReservedColumnCount", 2u32)
            .with_field("ZombossMechType", self.mech.type_name())
            .with_field("ZombossDeathRow", 3u32)
            .with_field("ZombossDeathColumn", 5u32)
            .with_field(
                "ZombossSpawnGridPosition",
                Fields::new().with("mX", 6u32).with("mY", 3u32),
            )
    }
}

/// Sun bomb blast settings; fixed for every level.
pub fn sun_bombs_object() -> Object {
    Object::new("SunBombChallengeProperties")
        .with_alias(SUN_BOMBS_ALIAS)
        .with_field("PlantBombExplosionRadius", 25u32)
        .with_field("PlantDamage", 1000u32)
        .with_field("ZombieBombExplosionRadius", 80u32)
        .with_field("ZombieDamage", 500u32)
}

/// Side minigames that only need an empty configuration object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideMinigame {
    /// Every zombie is invisible.
    Invisighoul,
    /// Planting fills the whole column.
    ColumnPlanting,
    /// Every jam plays in turn.
    AllJams,
}

impl SideMinigame {
    pub const ALL: [SideMinigame; 3] = [
        SideMinigame::Invisighoul,
        SideMinigame::ColumnPlanting,
        SideMinigame::AllJams,
    ];

    pub fn alias(&self) -> &'static str {
        match self {
            SideMinigame::Invisighoul => "InvisiGhoul",
            SideMinigame::ColumnPlanting => "ColumnMinigame",
            SideMinigame::AllJams => "EnableAllJams",
        }
    }

    pub fn objclass(&self) -> &'static str {
        match self {
            SideMinigame::Invisighoul => "InvisighoulMinigameProperties",
            SideMinigame::ColumnPlanting => "ColumnMinigameProperties",
            SideMinigame::AllJams => "JamZombiesModuleProperties",
        }
    }

    /// Module reference; resolved against this level at load time.
    pub fn module_reference(&self) -> Rtid {
        Rtid::current_level(self.alias())
    }

    pub fn to_object(&self) -> Object {
        Object::new(self.objclass()).with_alias(self.alias())
    }
}

pub fn add_last_stand(document: &mut Document, settings: &LastStandSettings) -> Result<()> {
    document.push(settings.to_object()?)
}

pub fn add_zomboss(document: &mut Document, settings: &ZombossSettings) -> Result<()> {
    document.push(settings.to_object())
}

pub fn add_sun_bombs(document: &mut Document) -> Result<()> {
    document.push(sun_bombs_object())
}

pub fn add_side_minigame(document: &mut Document, minigame: SideMinigame) -> Result<()> {
    document.push(minigame.to_object())
}
