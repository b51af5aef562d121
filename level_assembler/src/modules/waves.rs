//! Wave manager and enemy waves.

use level_model::{
    validate_names, Alias, Document, Fields, Object, Result, Rtid, ValidationError, Value,
};
use serde::Deserialize;

/// Alias of the wave-action module referenced from the level's module list.
pub const WAVE_MODULE_ALIAS: &str = "NewWaves";
/// Alias of the wave manager properties object.
pub const WAVE_PROPS_ALIAS: &str = "WaveManagerProps";

const WAVE_MODULE_CLASS: &str = "WaveManagerModuleProperties";
const WAVE_PROPS_CLASS: &str = "WaveManagerProperties";
const WAVE_CLASS: &str = "SpawnZombiesJitteredWaveActionProps";

/// Most zombies a single wave may spawn.
pub const MAX_WAVE_UNITS: u32 = 200;

/// Wave cadence and the ordered list of waves.
///
/// The wave count written to the document is derived from the wave list as
/// soon as one wave exists; before that it is whatever the last
/// [`WaveManager::set_cadence`] call asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveManager {
    flag_interval: u32,
    first_wave_delay: u32,
    requested_count: u32,
    waves: Vec<Alias>,
    suppress_flag_zombie: Option<bool>,
}

impl Default for WaveManager {
    fn default() -> Self {
        Self {
            flag_interval: 1,
            first_wave_delay: 1,
            requested_count: 0,
            waves: Vec::new(),
            suppress_flag_zombie: None,
        }
    }
}

impl WaveManager {
    /// Create a wave manager with no waves and cadence `(1, 0, 1)`.
    pub fn new(suppress_flag_zombie: Option<bool>) -> Self {
        Self {
            suppress_flag_zombie,
            ..Self::default()
        }
    }

    /// Set wave cadence.
    ///
    /// Interval and delay are clamped to at least 1 for levels with waves. A
    /// level with no waves is an auto-win level and always gets 1 for both.
    pub fn set_cadence(&mut self, flag_interval: u32, wave_count: u32, first_wave_delay: u32) {
        if wave_count > 0 {
            self.flag_interval = flag_interval.max(1);
            self.first_wave_delay = first_wave_delay.max(1);
        } else {
            self.flag_interval = 1;
            self.first_wave_delay = 1;
        }
        self.requested_count = wave_count;
    }

    pub fn flag_interval(&self) -> u32 {
        self.flag_interval
    }

    pub fn first_wave_delay(&self) -> u32 {
        self.first_wave_delay
    }

    /// Recorded wave count; the list length once waves exist.
    pub fn wave_count(&self) -> u32 {
        if self.waves.is_empty() {
            self.requested_count
        } else {
            u32::try_from(self.waves.len()).unwrap_or(u32::MAX)
        }
    }

    /// Aliases of the waves added so far.
    pub fn waves(&self) -> &[Alias] {
        &self.waves
    }

    /// Alias the next wave will be stored under: `w<index>zombies`.
    pub fn next_wave_alias(&self) -> Alias {
        Alias::new(format!("w{}zombies", self.waves.len()))
    }

    pub(crate) fn record_wave(&mut self, alias: Alias) {
        self.waves.push(alias);
    }

    /// The `NewWaves` module object.
    pub fn module_object(&self) -> Object {
        Object::new(WAVE_MODULE_CLASS)
            .with_alias(WAVE_MODULE_ALIAS)
            .with_field("WaveManagerProps", Rtid::local(WAVE_PROPS_ALIAS))
    }

    /// The `WaveManagerProps` object reflecting the current state.
    pub fn properties_object(&self) -> Object {
        Object::new(WAVE_PROPS_CLASS)
            .with_alias(WAVE_PROPS_ALIAS)
            .with_data(self.properties_data())
    }

    fn properties_data(&self) -> Fields {
        let waves: Vec<Value> = self
            .waves
            .iter()
            .map(|alias| Value::from(vec![Rtid::local(alias.clone())]))
            .collect();

        let mut data = Fields::new()
            .with("FlagWaveInterval", self.flag_interval)
            .with("WaveCount", self.wave_count())
            .with("ZombieCountdownFirstWaveSecs", self.first_wave_delay)
            .with("Waves", waves);
        if let Some(suppress) = self.suppress_flag_zombie {
            data.insert("SuppressFlagZombie", suppress);
        }
        data
    }

    /// Rewrite the properties object in `document` from this state.
    pub fn sync(&self, document: &mut Document) {
        if let Some(data) = document.data_mut(WAVE_PROPS_ALIAS) {
            *data = self.properties_data();
        }
    }
}

/// One enemy wave as requested by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WaveSpec {
    /// Zombie type names.
    pub units: Vec<String>,

    /// Repeat count per entry of `units`; one of each when absent.
    #[serde(default)]
    pub counts: Option<Vec<u32>>,

    /// How many zombies in the wave carry plant food.
    #[serde(default)]
    pub bonus_plantfood: u32,
}

impl WaveSpec {
    /// Create a wave with one zombie of each listed type.
    pub fn new<S: Into<String>>(units: impl IntoIterator<Item = S>) -> Self {
        Self {
            units: units.into_iter().map(Into::into).collect(),
            counts: None,
            bonus_plantfood: 0,
        }
    }

    /// Set per-type repeat counts.
    pub fn with_counts(mut self, counts: impl Into<Vec<u32>>) -> Self {
        self.counts = Some(counts.into());
        self
    }

    /// Set the plant food carrier count.
    pub fn with_bonus_plantfood(mut self, bonus: u32) -> Self {
        self.bonus_plantfood = bonus;
        self
    }

    /// Flat list of zombie types, each repeated by its count.
    pub fn expanded_units(&self) -> Vec<&str> {
        match self.counts.as_deref().filter(|c| !c.is_empty()) {
            Some(counts) => self
                .units
                .iter()
                .zip(counts)
                .flat_map(|(unit, count)| std::iter::repeat(unit.as_str()).take(*count as usize))
                .collect(),
            None => self.units.iter().map(String::as_str).collect(),
        }
    }

    /// Total number of zombies in the wave.
    pub fn total_units(&self) -> u32 {
        match self.counts.as_deref().filter(|c| !c.is_empty()) {
            Some(counts) => counts.iter().fold(0, |total, &c| total.saturating_add(c)),
            None => u32::try_from(self.units.len()).unwrap_or(u32::MAX),
        }
    }

    /// Plant food carriers, clamped to the wave size.
    pub fn clamped_bonus(&self) -> u32 {
        self.bonus_plantfood.min(self.total_units())
    }

    /// Check names and counts. Runs before anything is expanded.
    pub fn validate(&self) -> Result<()> {
        if self.units.is_empty() {
            return Err(ValidationError::Empty {
                field: "wave zombie types",
            });
        }
        validate_names("zombie type", &self.units)?;

        if let Some(counts) = self.counts.as_deref().filter(|c| !c.is_empty()) {
            if counts.len() != self.units.len() {
                return Err(ValidationError::LengthMismatch {
                    field: "wave counts",
                    expected: self.units.len(),
                    actual: counts.len(),
                });
            }
            if let Some(&bad) = counts.iter().find(|&&c| c == 0) {
                return Err(ValidationError::out_of_range("wave count", bad, 1, MAX_WAVE_UNITS));
            }
        }

        let total = self.total_units();
        if total > MAX_WAVE_UNITS {
            return Err(ValidationError::out_of_range("wave size", total, 1, MAX_WAVE_UNITS));
        }
        Ok(())
    }

    /// Build the wave object stored under `alias`.
    pub fn to_object(&self, alias: Alias) -> Result<Object> {
        self.validate()?;

        let zombies: Vec<Value> = self
            .expanded_units()
            .into_iter()
            .map(|unit| Fields::new().with("Type", Rtid::zombie_type(unit)).into())
            .collect();

        let mut object = Object::new(WAVE_CLASS)
            .with_alias(alias)
            .with_field("Zombies", zombies);

        let bonus = self.clamped_bonus();
        if bonus > 0 {
            object.objdata.insert("AdditionalPlantfood", bonus);
        }
        Ok(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_wave_cadence_normalizes() {
        let mut manager = WaveManager::new(None);
        manager.set_cadence(0, 0, 0);

        assert_eq!(manager.flag_interval(), 1);
        assert_eq!(manager.wave_count(), 0);
        assert_eq!(manager.first_wave_delay(), 1);

        manager.set_cadence(7, 0, 20);
        assert_eq!((manager.flag_interval(), manager.first_wave_delay()), (1, 1));
    }

    #[test]
    fn test_cadence_clamps_when_waves_requested() {
        let mut manager = WaveManager::new(None);
        manager.set_cadence(0, 4, 0);
        assert_eq!(manager.flag_interval(), 1);
        assert_eq!(manager.first_wave_delay(), 1);
        assert_eq!(manager.wave_count(), 4);

        manager.set_cadence(3, 4, 12);
        assert_eq!(manager.flag_interval(), 3);
        assert_eq!(manager.first_wave_delay(), 12);
    }

    #[test]
    fn test_wave_count_follows_list() {
        let mut manager = WaveManager::new(None);
        manager.set_cadence(2, 10, 5);

        manager.record_wave(manager.next_wave_alias());
        manager.record_wave(manager.next_wave_alias());

        assert_eq!(manager.wave_count(), 2);
        assert_eq!(
            manager.waves(),
            &[Alias::from("w0zombies"), Alias::from("w1zombies")]
        );
    }

    #[test]
    fn test_properties_object() {
        let mut manager = WaveManager::new(Some(true));
        manager.record_wave(Alias::from("w0zombies"));

        let object = manager.properties_object();
        assert!(object.has_alias(WAVE_PROPS_ALIAS));
        assert_eq!(object.objdata.get("WaveCount").and_then(Value::as_int), Some(1));
        assert_eq!(object.objdata.get("SuppressFlagZombie"), Some(&Value::Bool(true)));

        let waves = object.objdata.get("Waves").and_then(Value::as_list).unwrap();
        assert_eq!(
            waves[0],
            Value::List(vec![Value::Ref(Rtid::local("w0zombies"))])
        );
    }

    #[test]
    fn test_wave_expands_counts_and_clamps_bonus() {
        let wave = WaveSpec::new(["tutorial", "tutorial_imp"])
            .with_counts([2, 3])
            .with_bonus_plantfood(10);

        assert_eq!(wave.total_units(), 5);
        assert_eq!(wave.clamped_bonus(), 5);

        let object = wave.to_object(Alias::from("w0zombies")).unwrap();
        let zombies = object.objdata.get("Zombies").and_then(Value::as_list).unwrap();
        assert_eq!(zombies.len(), 5);
        assert_eq!(
            zombies[2].as_map().and_then(|m| m.get("Type")),
            Some(&Value::Ref(Rtid::zombie_type("tutorial_imp")))
        );
        assert_eq!(
            object.objdata.get("AdditionalPlantfood").and_then(Value::as_int),
            Some(5)
        );
    }

    #[test]
    fn test_wave_without_counts() {
        let wave = WaveSpec::new(["tutorial", "tutorial_armor1"]);
        let object = wave.to_object(Alias::from("w3zombies")).unwrap();

        assert!(object.has_alias("w3zombies"));
        assert_eq!(
            object.objdata.get("Zombies").and_then(Value::as_list).map(<[Value]>::len),
            Some(2)
        );
        assert!(!object.objdata.contains_key("AdditionalPlantfood"));
    }

    #[test]
    fn test_wave_validation() {
        assert!(WaveSpec::new(Vec::<String>::new()).validate().is_err());
        assert!(matches!(
            WaveSpec::new(["tutorial", "bad%type"]).validate(),
            Err(ValidationError::InvalidName { .. })
        ));
        assert!(matches!(
            WaveSpec::new(["tutorial"]).with_counts([1, 2]).validate(),
            Err(ValidationError::LengthMismatch { .. })
        ));
        assert!(matches!(
            WaveSpec::new(["tutorial"]).with_counts([0]).validate(),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_wave_size_limit() {
        let huge = WaveSpec::new(["tutorial", "tutorial_imp"]).with_counts([u32::MAX, 1]);
        assert_eq!(huge.total_units(), u32::MAX);
        assert_eq!(
            huge.validate(),
            Err(ValidationError::out_of_range("wave size", u32::MAX, 1, MAX_WAVE_UNITS))
        );
        assert!(huge.to_object(Alias::from("w0zombies")).is_err());

        let over = WaveSpec::new(["tutorial", "tutorial_imp"]).with_counts([150, 51]);
        assert!(matches!(
            over.validate(),
            Err(ValidationError::OutOfRange { field: "wave size", value: 201, .. })
        ));

        let full = WaveSpec::new(["tutorial", "tutorial_imp"]).with_counts([150, 50]);
        assert!(full.validate().is_ok());
    }
}
