//! Star challenges.
//!
//! Each [`Challenge`] variant carries its own parameters. Challenges are
//! always emitted in [`ChallengeKind`] order, whatever order they were
//! selected in, since consumers match challenge slots by position.

use std::collections::BTreeMap;

use level_model::{Document, Object, Result, Rtid, ValidationError};
use serde::Deserialize;

pub const CHALLENGE_MODULE_ALIAS: &str = "ChallengeModule";

/// Challenge kinds in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeKind {
    SaveMowers,
    SunUsed,
    SunProduced,
    SunHoldout,
    PlantsLost,
    SimultaneousPlants,
    KillZombies,
    ZombieDistance,
    LevelTimer,
}

impl ChallengeKind {
    pub const ALL: [ChallengeKind; 9] = [
        ChallengeKind::SaveMowers,
        ChallengeKind::SunUsed,
        ChallengeKind::SunProduced,
        ChallengeKind::SunHoldout,
        ChallengeKind::PlantsLost,
        ChallengeKind::SimultaneousPlants,
        ChallengeKind::KillZombies,
        ChallengeKind::ZombieDistance,
        ChallengeKind::LevelTimer,
    ];

    /// The challenge with default parameters.
    pub fn with_defaults(&self) -> Challenge {
        match self {
            ChallengeKind::SaveMowers => Challenge::SaveMowers,
            ChallengeKind::SunUsed => Challenge::SunUsed {
                max_sun: default_max_sun(),
            },
            ChallengeKind::SunProduced => Challenge::SunProduced {
                target_sun: default_target_sun(),
            },
            ChallengeKind::SunHoldout => Challenge::SunHoldout {
                seconds: default_holdout_seconds(),
            },
            ChallengeKind::PlantsLost => Challenge::PlantsLost {
                max_plants: default_max_plants_lost(),
            },
            ChallengeKind::SimultaneousPlants => Challenge::SimultaneousPlants {
                max_plants: default_max_simultaneous(),
            },
            ChallengeKind::KillZombies => Challenge::KillZombies {
                zombies: default_kill_count(),
                seconds: default_kill_seconds(),
            },
            ChallengeKind::ZombieDistance => Challenge::ZombieDistance {
                distance: default_distance(),
            },
            ChallengeKind::LevelTimer => Challenge::LevelTimer {
                seconds: default_time_limit(),
            },
        }
    }

    /// Alias of the parameter object, or of the catalogue entry for
    /// parameterless kinds.
    pub fn alias(&self) -> &'static str {
        match self {
            ChallengeKind::SaveMowers => "SaveMowers",
            ChallengeKind::SunUsed => "SunUsed",
            ChallengeKind::SunProduced => "SunProduced",
            ChallengeKind::SunHoldout => "SunHoldout",
            ChallengeKind::PlantsLost => "PlantsLost",
            ChallengeKind::SimultaneousPlants => "SimultaneousPlants",
            ChallengeKind::KillZombies => "KillZombies",
            ChallengeKind::ZombieDistance => "ZombieDistance",
            ChallengeKind::LevelTimer => "LevelTimer",
        }
    }

    /// Reference placed in the challenge list.
    pub fn reference(&self) -> Rtid {
        match self {
            ChallengeKind::SaveMowers => Rtid::level_module(self.alias()),
            ChallengeKind::LevelTimer => Rtid::current_level(self.alias()),
            _ => Rtid::local(self.alias()),
        }
    }
}

fn default_max_sun() -> u32 {
    500
}
fn default_target_sun() -> u32 {
    1000
}
fn default_holdout_seconds() -> u32 {
    60
}
fn default_max_plants_lost() -> u32 {
    5
}
fn default_max_simultaneous() -> u32 {
    10
}
fn default_kill_count() -> u32 {
    10
}
fn default_kill_seconds() -> u32 {
    30
}
fn default_distance() -> u32 {
    1
}
fn default_time_limit() -> u32 {
    300
}

/// Furthest line (in columns) a zombie-distance challenge can use.
const MAX_ZOMBIE_DISTANCE: u32 = 8;

/// A selected challenge with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Challenge {
    /// Finish without losing a lawn mower.
    SaveMowers,
    /// Spend at most `max_sun` sun.
    SunUsed {
        #[serde(default = "default_max_sun")]
        max_sun: u32,
    },
    /// Produce at least `target_sun` sun.
    SunProduced {
        #[serde(default = "default_target_sun")]
        target_sun: u32,
    },
    /// Spend no sun for the first `seconds` seconds.
    SunHoldout {
        #[serde(default = "default_holdout_seconds")]
        seconds: u32,
    },
    /// Lose at most `max_plants` plants.
    PlantsLost {
        #[serde(default = "default_max_plants_lost")]
        max_plants: u32,
    },
    /// Never have more than `max_plants` plants on the lawn.
    SimultaneousPlants {
        #[serde(default = "default_max_simultaneous")]
        max_plants: u32,
    },
    /// Kill `zombies` zombies within `seconds` seconds.
    KillZombies {
        #[serde(default = "default_kill_count")]
        zombies: u32,
        #[serde(default = "default_kill_seconds")]
        seconds: u32,
    },
    /// Keep zombies from crossing the line `distance` columns in.
    ZombieDistance {
        #[serde(default = "default_distance")]
        distance: u32,
    },
    /// Survive for `seconds` seconds.
    LevelTimer {
        #[serde(default = "default_time_limit")]
        seconds: u32,
    },
}

impl Challenge {
    pub fn kind(&self) -> ChallengeKind {
        match self {
            Challenge::SaveMowers => ChallengeKind::SaveMowers,
            Challenge::SunUsed { .. } => ChallengeKind::SunUsed,
            Challenge::SunProduced { .. } => ChallengeKind::SunProduced,
            Challenge::SunHoldout { .. } => ChallengeKind::SunHoldout,
            Challenge::PlantsLost { .. } => ChallengeKind::PlantsLost,
            Challenge::SimultaneousPlants { .. } => ChallengeKind::SimultaneousPlants,
            Challenge::KillZombies { .. } => ChallengeKind::KillZombies,
            Challenge::ZombieDistance { .. } => ChallengeKind::ZombieDistance,
            Challenge::LevelTimer { .. } => ChallengeKind::LevelTimer,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Challenge::ZombieDistance { distance } = self {
            if !(1..=MAX_ZOMBIE_DISTANCE).contains(distance) {
                return Err(ValidationError::out_of_range(
                    "zombie distance",
                    *distance,
                    1,
                    MAX_ZOMBIE_DISTANCE,
                ));
            }
        }
        Ok(())
    }

    /// Parameter object for this challenge; `None` for save-mowers.
    pub fn parameter_object(&self) -> Option<Object> {
        let alias = self.kind().alias();
        let object = match *self {
            Challenge::SaveMowers => return None,
            Challenge::SunUsed { max_sun } => {
                Object::new("StarChallengeSunUsedProps").with_field("MaximumSun", max_sun)
            }
            Challenge::SunProduced { target_sun } => {
                Object::new("StarChallengeSunProducedProps").with_field("TargetSun", target_sun)
            }
            Challenge::SunHoldout { seconds } => Object::new("StarChallengeSpendSunHoldoutProps")
                .with_field("HoldoutSeconds", seconds),
            Challenge::PlantsLost { max_plants } => Object::new("StarChallengePlantsLostProps")
                .with_field("MaximumPlantsLost", max_plants),
            Challenge::SimultaneousPlants { max_plants } => {
                Object::new("StarChallengeSimultaneousPlantsProps")
                    .with_field("MaximumPlants", max_plants)
            }
            Challenge::KillZombies { zombies, seconds } => {
                Object::new("StarChallengeKillZombiesInTimeProps")
                    .with_field("ZombiesToKill", zombies)
                    .with_field("Time", seconds)
            }
            Challenge::ZombieDistance { distance } => {
                Object::new("StarChallengeZombieDistanceProps")
                    .with_field("TargetDistance", distance)
            }
            Challenge::LevelTimer { seconds } => {
                Object::new("StarChallengeLevelTimerProperties").with_field("TimeLimit", seconds)
            }
        };
        Some(object.with_alias(alias))
    }
}

/// Selected challenges keyed by kind; selecting a kind twice keeps the last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<Challenge>")]
pub struct ChallengeSelection {
    selected: BTreeMap<ChallengeKind, Challenge>,
}

impl From<Vec<Challenge>> for ChallengeSelection {
    fn from(challenges: Vec<Challenge>) -> Self {
        challenges
            .into_iter()
            .fold(Self::new(), |selection, challenge| selection.with(challenge))
    }
}

impl ChallengeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a challenge with explicit parameters.
    pub fn with(mut self, challenge: Challenge) -> Self {
        self.selected.insert(challenge.kind(), challenge);
        self
    }

    /// Select a kind with its default parameters.
    pub fn with_kind(self, kind: ChallengeKind) -> Self {
        self.with(kind.with_defaults())
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn contains(&self, kind: ChallengeKind) -> bool {
        self.selected.contains_key(&kind)
    }

    /// Selected challenges in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Challenge> {
        self.selected.values()
    }

    pub fn validate(&self) -> Result<()> {
        self.iter().try_for_each(Challenge::validate)
    }

    /// Challenge module followed by one parameter object per parameterized kind.
    pub fn to_objects(&self) -> Result<Vec<Object>> {
        self.validate()?;
        if self.is_empty() {
            return Ok(Vec::new());
        }

        let references: Vec<Rtid> = self.iter().map(|c| c.kind().reference()).collect();
        let module = Object::new("StarChallengeModuleProperties")
            .with_alias(CHALLENGE_MODULE_ALIAS)
            .with_field("Challenges", vec![references])
            .with_field("ChallengesAlwaysAvailable", true);

        let mut objects = vec![module];
        objects.extend(self.iter().filter_map(Challenge::parameter_object));
        Ok(objects)
    }
}

/// Append the challenge module and parameter objects. No-op when nothing is
/// selected.
pub fn add_challenges(document: &mut Document, selection: &ChallengeSelection) -> Result<()> {
    let objects = selection.to_objects()?;
    if objects.is_empty() {
        return Ok(());
    }
    document.extend(objects)
}
