//! Level plans: the complete set of feature choices for one level.

use level_model::{validate_name, Archetype, Result, Stage, ValidationError};
use serde::Deserialize;

use crate::grid::{VaseLayout, DEFAULT_COLUMNS, DEFAULT_ROWS};
use crate::modules::{
    ChallengeSelection, ConveyorSettings, LastStandSettings, SeedBankSettings, WaveSpec,
    ZombossSettings,
};

/// Everything the assembler needs to build a level.
///
/// Absent optional sections mean the feature is disabled.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LevelPlan {
    pub name: String,
    pub description: String,
    pub level_number: u32,
    pub stage: Stage,

    #[serde(default)]
    pub archetype: Archetype,

    /// Overrides the configured default starting sun.
    #[serde(default)]
    pub starting_sun: Option<u32>,

    #[serde(default)]
    pub seed_bank: Option<SeedBankSettings>,
    #[serde(default)]
    pub conveyor: Option<ConveyorSettings>,
    #[serde(default)]
    pub vasebreaker: Option<VaseLayout>,

    #[serde(default)]
    pub last_stand: Option<LastStandSettings>,
    #[serde(default)]
    pub zomboss: Option<ZombossSettings>,

    #[serde(default)]
    pub challenges: ChallengeSelection,
    #[serde(default)]
    pub features: FeatureToggles,
    #[serde(default)]
    pub overrides: LevelOverrides,
    #[serde(default)]
    pub waves: WavePlan,
    #[serde(default)]
    pub reward: Option<Reward>,
}

impl LevelPlan {
    /// Create a standard level plan with every feature disabled.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        level_number: u32,
        stage: Stage,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            level_number,
            stage,
            archetype: Archetype::Standard,
            starting_sun: None,
            seed_bank: None,
            conveyor: None,
            vasebreaker: None,
            last_stand: None,
            zomboss: None,
            challenges: ChallengeSelection::new(),
            features: FeatureToggles::default(),
            overrides: LevelOverrides::default(),
            waves: WavePlan::default(),
            reward: None,
        }
    }

    pub fn with_archetype(mut self, archetype: Archetype) -> Self {
        self.archetype = archetype;
        self
    }

    pub fn with_features(mut self, features: FeatureToggles) -> Self {
        self.features = features;
        self
    }

    pub fn with_challenges(mut self, challenges: ChallengeSelection) -> Self {
        self.challenges = challenges;
        self
    }

    /// File name the level is saved under: `my_level.json` for "My Level".
    pub fn default_file_name(&self) -> String {
        format!("{}.json", self.name.to_lowercase().replace(' ', "_"))
    }

    /// Reject bad names and feature combinations the archetype cannot host.
    pub fn check_compatibility(&self) -> Result<()> {
        validate_name("level name", &self.name)?;
        validate_name("level description", &self.description)?;

        let incompatible = |feature: &'static str| ValidationError::IncompatibleFeature {
            archetype: self.archetype,
            feature,
        };

        match self.archetype {
            Archetype::Standard => {
                if self.conveyor.is_some() {
                    return Err(incompatible("conveyor belt settings"));
                }
                if self.vasebreaker.is_some() {
                    return Err(incompatible("a vasebreaker layout"));
                }
            }
            Archetype::Conveyor => {
                if self.seed_bank.is_some() {
                    return Err(incompatible("seed bank settings"));
                }
                if self.vasebreaker.is_some() {
                    return Err(incompatible("a vasebreaker layout"));
                }
                if self.last_stand.is_some() {
                    return Err(incompatible("last stand"));
                }
                if self.conveyor.is_none() {
                    return Err(ValidationError::MissingSettings {
                        archetype: self.archetype,
                        settings: "conveyor belt",
                    });
                }
            }
            Archetype::Vasebreaker => {
                if self.seed_bank.is_some() {
                    return Err(incompatible("seed bank settings"));
                }
                if self.conveyor.is_some() {
                    return Err(incompatible("conveyor belt settings"));
                }
                if self.last_stand.is_some() {
                    return Err(incompatible("last stand"));
                }
                if self.starting_sun.is_some() {
                    return Err(incompatible("a starting sun override"));
                }
                if self.vasebreaker.is_none() {
                    return Err(ValidationError::MissingSettings {
                        archetype: self.archetype,
                        settings: "vasebreaker layout",
                    });
                }
            }
        }

        if let Some(layout) = &self.vasebreaker {
            layout.validate(DEFAULT_ROWS, DEFAULT_COLUMNS)?;
        }
        self.overrides.validate()?;
        if let Some(reward) = &self.reward {
            reward.validate()?;
        }
        Ok(())
    }
}

/// Independent module toggles, applied in declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeatureToggles {
    pub mowers: bool,
    pub sun_dropper: bool,
    pub boosterama: bool,
    /// Implies `sun_dropper`.
    pub sun_bombs: bool,
    pub invisighoul: bool,
    pub column_minigame: bool,
    pub all_jams: bool,
}

impl FeatureToggles {
    /// Whether the default sun dropper module ends up enabled.
    pub fn drops_sun(&self) -> bool {
        self.sun_dropper || self.sun_bombs
    }
}

/// Level fields copied through only when set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LevelOverrides {
    pub zombie_level: Option<u32>,
    pub grid_item_level: Option<u32>,
    pub fixed_plant_level: Option<u32>,
    pub suppress_plantfood_purchase: Option<bool>,
    /// Written to the wave manager rather than the level.
    pub suppress_flag_zombie: Option<bool>,
}

impl LevelOverrides {
    pub fn validate(&self) -> Result<()> {
        let levels = [
            ("zombie level", self.zombie_level),
            ("grid item level", self.grid_item_level),
            ("fixed plant level", self.fixed_plant_level),
        ];
        for (field, level) in levels {
            if let Some(0) = level {
                return Err(ValidationError::out_of_range(field, 0, 1, u32::MAX));
            }
        }
        Ok(())
    }

    /// `(key, value)` pairs of the set level overrides, in emission order.
    pub fn level_fields(&self) -> Vec<(&'static str, u32)> {
        [
            ("Zombie_level", self.zombie_level),
            ("Grid_item_level", self.grid_item_level),
            ("Fixed_plant_level", self.fixed_plant_level),
        ]
        .into_iter()
        .filter_map(|(key, level)| level.map(|l| (key, l)))
        .collect()
    }
}

/// Wave cadence and the waves to add after assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WavePlan {
    pub flag_interval: u32,
    pub first_wave_delay: u32,
    /// Requested count; superseded by `waves.len()` once waves exist.
    pub wave_count: u32,
    pub waves: Vec<WaveSpec>,
}

impl WavePlan {
    /// Count passed to the wave manager's cadence.
    pub fn requested_count(&self) -> u32 {
        let listed = u32::try_from(self.waves.len()).unwrap_or(u32::MAX);
        self.wave_count.max(listed)
    }
}

/// Reward granted on first completion and on replay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reward {
    UnlockPlant { plant: String },
}

impl Reward {
    pub fn unlock_plant(plant: impl Into<String>) -> Self {
        Reward::UnlockPlant {
            plant: plant.into(),
        }
    }

    /// Value of the `*RewardType` fields.
    pub fn reward_type(&self) -> &'static str {
        match self {
            Reward::UnlockPlant { .. } => "unlock_plant",
        }
    }

    /// Value of the `*RewardParam` fields.
    pub fn param(&self) -> &str {
        match self {
            Reward::UnlockPlant { plant } => plant,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Reward::UnlockPlant { plant } => validate_name("reward plant", plant),
        }
    }
}
