//! Seed selection: seed bank, conveyor belt and vasebreaker presets.
//!
//! Exactly one of these runs per level, picked by the archetype.

use level_model::{
    validate_name, validate_names, Document, Fields, Object, Result, ValidationError, Value,
};
use serde::Deserialize;

use crate::grid::{VaseLayout, DEFAULT_COLUMNS, DEFAULT_ROWS};

pub const SEED_BANK_ALIAS: &str = "SeedBank";
pub const CONVEYOR_ALIAS: &str = "ConveyorBelt";
pub const VASEBREAKER_ALIAS: &str = "VaseBreaker";

/// `(delay, unlocked packets)` tiers of the conveyor drop schedule.
const CONVEYOR_DROP_DELAYS: [(u32, u32); 4] = [(3, 0), (6, 2), (9, 4), (12, 8)];
const CONVEYOR_SPEED: u32 = 100;
const MIN_WEIGHT_FACTOR: u32 = 2;
const MAX_WEIGHT_FACTOR: u32 = 0;
const DEFAULT_PLANT_WEIGHT: u32 = 15;

/// Seed chooser restrictions. Absent fields keep the engine default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedBankSettings {
    pub seed_slots_count: Option<u32>,
    /// Plants forced into the bank.
    pub preset_plants: Option<Vec<String>>,
    /// Plants the player may not pick.
    pub excluded_plants: Option<Vec<String>>,
    /// Only these plants may be picked.
    pub included_plants: Option<Vec<String>>,
}

impl SeedBankSettings {
    /// Whether any restriction is set.
    pub fn is_configured(&self) -> bool {
        self.seed_slots_count.is_some()
            || self.preset_plants.is_some()
            || self.excluded_plants.is_some()
            || self.included_plants.is_some()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(slots) = self.seed_slots_count {
            if slots == 0 {
                return Err(ValidationError::out_of_range("seed slots", slots, 1, u32::MAX));
            }
        }
        for plants in [&self.preset_plants, &self.excluded_plants, &self.included_plants]
            .into_iter()
            .flatten()
        {
            validate_names("plant type", plants)?;
        }
        Ok(())
    }

    pub fn to_object(&self) -> Result<Object> {
        self.validate()?;

        let mut data = Fields::new().with("SelectionMethod", "chooser");
        if let Some(slots) = self.seed_slots_count {
            data.insert("Seed_slots_count", slots);
        }
        if let Some(plants) = &self.preset_plants {
            let presets: Vec<Value> = plants
                .iter()
                .map(|p| Fields::new().with("PlantType", p.as_str()).into())
                .collect();
            data.insert("PresetPlantList", presets);
        }
        if let Some(plants) = &self.excluded_plants {
            data.insert("Excluded_plants", plants.clone());
        }
        if let Some(plants) = &self.included_plants {
            data.insert("Included_plants", plants.clone());
        }

        Ok(Object::new("SeedBankProperties")
            .with_alias(SEED_BANK_ALIAS)
            .with_data(data))
    }
}

/// One plant the conveyor can deliver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConveyorPlant {
    pub plant_type: String,
    pub min_count: u32,
    pub max_count: u32,
    #[serde(default = "default_plant_weight")]
    pub weight: u32,
}

fn default_plant_weight() -> u32 {
    DEFAULT_PLANT_WEIGHT
}

impl ConveyorPlant {
    /// Create a plant entry with the default weight.
    pub fn new(plant_type: impl Into<String>, min_count: u32, max_count: u32) -> Self {
        Self {
            plant_type: plant_type.into(),
            min_count,
            max_count,
            weight: DEFAULT_PLANT_WEIGHT,
        }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    fn validate(&self) -> Result<()> {
        validate_name("plant type", &self.plant_type)?;
        if self.min_count == 0 {
            return Err(ValidationError::out_of_range(
                "conveyor min count",
                self.min_count,
                1,
                u32::MAX,
            ));
        }
        if self.max_count < self.min_count {
            return Err(ValidationError::out_of_range(
                "conveyor max count",
                self.max_count,
                self.min_count,
                u32::MAX,
            ));
        }
        Ok(())
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("MinCount", self.min_count)
            .with("MaxCount", self.max_count)
            .with("MinWeightFactor", MIN_WEIGHT_FACTOR)
            .with("MaxWeightFactor", MAX_WEIGHT_FACTOR)
            .with("Weight", self.weight)
            .with("PlantType", self.plant_type.as_str())
    }
}

/// Conveyor belt contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConveyorSettings {
    pub plants: Vec<ConveyorPlant>,
}

impl ConveyorSettings {
    pub fn new(plants: Vec<ConveyorPlant>) -> Self {
        Self { plants }
    }

    pub fn validate(&self) -> Result<()> {
        if self.plants.is_empty() {
            return Err(ValidationError::Empty {
                field: "conveyor plants",
            });
        }
        self.plants.iter().try_for_each(ConveyorPlant::validate)
    }

    pub fn to_object(&self) -> Result<Object> {
        self.validate()?;

        let delays: Vec<Value> = CONVEYOR_DROP_DELAYS
            .iter()
            .map(|&(delay, packets)| {
                Fields::new()
                    .with("Delay", delay)
                    .with("MaxPackets", packets)
                    .into()
            })
            .collect();
        let plants: Vec<Value> = self.plants.iter().map(|p| p.to_fields().into()).collect();
        let speeds = vec![Fields::new()
            .with("MaxPackets", 0u32)
            .with("Speed", CONVEYOR_SPEED)];

        Ok(Object::new("ConveyorSeedBankProperties")
            .with_alias(CONVEYOR_ALIAS)
            .with_field("DropDelayConditions", delays)
            .with_field("InitialPlantList", plants)
            .with_field("SpeedConditions", speeds))
    }
}

/// Append the seed bank configuration.
pub fn add_seed_bank(document: &mut Document, settings: &SeedBankSettings) -> Result<()> {
    document.push(settings.to_object()?)
}

/// Append the conveyor belt configuration.
pub fn add_conveyor_belt(document: &mut Document, settings: &ConveyorSettings) -> Result<()> {
    document.push(settings.to_object()?)
}

/// Append the vasebreaker preset built from a finalized grid selection.
pub fn add_vasebreaker(document: &mut Document, layout: &VaseLayout) -> Result<()> {
    layout.validate(DEFAULT_ROWS, DEFAULT_COLUMNS)?;
    let vases: Vec<Value> = layout.vases.iter().map(|v| v.to_fields().into()).collect();

    document.push(
        Object::new("VaseBreakerPresetProperties")
            .with_alias(VASEBREAKER_ALIAS)
            .with_field("MinColumnIndex", layout.min_column)
            .with_field("MaxColumnIndex", layout.max_column)
            .with_field("Vases", vases)
            .with_field("NumColoredPlantVases", layout.colored_plant_vases())
            .with_field("NumColoredZombieVases", layout.colored_zombie_vases()),
    )
}
