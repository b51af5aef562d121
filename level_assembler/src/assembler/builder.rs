//! Editing session over an assembled level.

use level_model::{Alias, Archetype, Document, Result};
use tracing::debug;

use super::plan::Reward;
use super::AssemblyWarning;
use crate::modules::{WaveManager, WaveSpec};

const REWARD_FIELDS: [(&str, &str); 2] = [
    ("FirstRewardType", "FirstRewardParam"),
    ("ReplayRewardType", "ReplayRewardParam"),
];

/// An assembled level that still accepts waves, cadence and rewards.
///
/// Owns the document exclusively; every mutation goes through here so the
/// wave manager properties always mirror the wave list.
#[derive(Debug, Clone)]
pub struct LevelBuilder {
    document: Document,
    waves: WaveManager,
    archetype: Archetype,
    warnings: Vec<AssemblyWarning>,
}

impl LevelBuilder {
    pub(crate) fn new(
        document: Document,
        waves: WaveManager,
        archetype: Archetype,
        warnings: Vec<AssemblyWarning>,
    ) -> Self {
        Self {
            document,
            waves,
            archetype,
            warnings,
        }
    }

    /// Set wave cadence. See [`WaveManager::set_cadence`] for clamping.
    pub fn set_cadence(&mut self, flag_interval: u32, wave_count: u32, first_wave_delay: u32) {
        self.waves
            .set_cadence(flag_interval, wave_count, first_wave_delay);
        self.waves.sync(&mut self.document);
    }

    /// Append a wave and return its alias.
    ///
    /// On error neither the document nor the wave list changes.
    pub fn add_wave(&mut self, wave: &WaveSpec) -> Result<Alias> {
        let alias = self.waves.next_wave_alias();
        let object = wave.to_object(alias.clone())?;
        self.document.push(object)?;
        self.waves.record_wave(alias.clone());
        self.waves.sync(&mut self.document);

        debug!(
            wave = %alias,
            units = wave.total_units(),
            bonus = wave.clamped_bonus(),
            "wave added"
        );
        Ok(alias)
    }

    /// Set both reward field pairs, or remove them when `reward` is `None`.
    pub fn set_rewards(&mut self, reward: Option<&Reward>) -> Result<()> {
        if let Some(reward) = reward {
            reward.validate()?;
        }

        let level = self.document.level_data_mut();
        for (type_key, param_key) in REWARD_FIELDS {
            match reward {
                Some(reward) => {
                    level.insert(type_key, reward.reward_type());
                    level.insert(param_key, reward.param());
                }
                None => {
                    level.remove(type_key);
                    level.remove(param_key);
                }
            }
        }
        Ok(())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn wave_manager(&self) -> &WaveManager {
        &self.waves
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    /// Requested features that were dropped during assembly.
    pub fn warnings(&self) -> &[AssemblyWarning] {
        &self.warnings
    }

    /// End the session and hand out the document.
    pub fn finish(self) -> Document {
        debug_assert!(
            self.document.unresolved_references().is_empty(),
            "unresolved references: {:?}",
            self.document.unresolved_references()
        );
        self.document
    }
}
