//! Level Assembler - decides module composition from a level plan.
//!
//! Composition runs in a fixed order:
//! 1. **Core**: zombie-defeat win condition, default win condition, waves
//! 2. **Archetype**: conveyor belt, vasebreaker preset or seed bank
//! 3. **Last Stand**: standard levels only, dropped when a boss is requested
//! 4. **Toggles**: mowers, sun dropper, boosterama, sun bombs, challenges,
//!    invisighoul, column planting, all jams
//! 5. **Boss**: boss battle plus its intro, on any archetype
//! 6. **Level fields**: starting sun and the explicit overrides
//!
//! Module references are composed first. Configuration objects are then
//! appended in the game's file layout: waves, seed selection, side minigames,
//! challenges, Last Stand, boss, vasebreaker preset, sun bombs.

mod builder;
mod plan;

pub use builder::*;
pub use plan::*;

use level_model::{
    Archetype, Document, Fields, Result, Rtid, Stage, Value, DEFAULT_COMMENT, FORMAT_VERSION,
};
use tracing::{debug, info, warn};

use crate::modules::{
    add_challenges, add_conveyor_belt, add_last_stand, add_seed_bank, add_side_minigame,
    add_sun_bombs, add_vasebreaker, add_zomboss, SideMinigame, WaveManager, CHALLENGE_MODULE_ALIAS,
    CONVEYOR_ALIAS, LAST_STAND_ALIAS, SEED_BANK_ALIAS, SUN_BOMBS_ALIAS, VASEBREAKER_ALIAS,
    WAVE_MODULE_ALIAS, ZOMBOSS_ALIAS, ZOMBOSS_INTRO_MODULE,
};

/// Win condition: every zombie is dead.
pub const ZOMBIES_DEAD_WIN_CONDITION: &str = "ZombiesDeadWinCon";
/// Win condition: fallback used by every level.
pub const DEFAULT_WIN_CONDITION: &str = "DefaultZombieWinCondition";
pub const SUN_DROPPER_MODULE: &str = "DefaultSunDropper";
pub const BOOSTERAMA_MODULE: &str = "Boosterama";
/// Every level currently drops no loot.
pub const NO_LOOT_MODULE: &str = "NoLoot";

/// Tunables for the assembler.
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Comment written at the top of every document.
    pub comment: String,

    /// Document format version.
    pub version: u32,

    /// Starting sun for levels that do not override it.
    pub default_starting_sun: u32,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            comment: DEFAULT_COMMENT.to_string(),
            version: FORMAT_VERSION,
            default_starting_sun: 50,
        }
    }
}

/// A requested feature that assembly dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyWarning {
    /// Last Stand and boss battle were both requested; the boss won.
    LastStandOverriddenByBoss,
    /// Mowers were requested on a stage with no mower module.
    MowersUnavailable { stage: Stage },
}

impl std::fmt::Display for AssemblyWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssemblyWarning::LastStandOverriddenByBoss => {
                write!(f, "last stand was dropped in favour of the boss battle")
            }
            AssemblyWarning::MowersUnavailable { stage } => {
                write!(f, "stage {stage} has no mower module")
            }
        }
    }
}

/// Module list of the level being assembled.
#[derive(Debug, Default)]
struct ModuleList {
    modules: Vec<Rtid>,
}

impl ModuleList {
    fn push(&mut self, module: Rtid) {
        debug_assert!(!self.modules.contains(&module), "module {module} added twice");
        debug!(module = %module, "module enabled");
        self.modules.push(module);
    }

    fn into_value(self) -> Value {
        Value::from(self.modules)
    }
}

/// Builds level documents from plans.
pub struct LevelAssembler {
    config: AssemblerConfig,
}

impl LevelAssembler {
    /// Create an assembler with the given configuration.
    pub fn new(config: AssemblerConfig) -> Self {
        Self { config }
    }

    /// Create an assembler with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(AssemblerConfig::default())
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Compose the level's modules and configuration objects.
    ///
    /// Waves, cadence and rewards are left to the returned builder. Fails
    /// before anything is built if a name is invalid or the plan combines
    /// features its archetype cannot host.
    pub fn assemble(&self, plan: &LevelPlan) -> Result<LevelBuilder> {
        plan.check_compatibility()?;

        let mut warnings = Vec::new();
        let last_stand = match (&plan.last_stand, &plan.zomboss) {
            (Some(_), Some(_)) => {
                warn!(level = %plan.name, "last stand and boss battle are exclusive; keeping the boss battle");
                warnings.push(AssemblyWarning::LastStandOverriddenByBoss);
                None
            }
            (last_stand, None) => last_stand.as_ref(),
            (None, Some(_)) => None,
        };

        let features = &plan.features;
        let side_minigames: Vec<SideMinigame> = [
            (features.invisighoul, SideMinigame::Invisighoul),
            (features.column_minigame, SideMinigame::ColumnPlanting),
            (features.all_jams, SideMinigame::AllJams),
        ]
        .into_iter()
        .filter_map(|(enabled, minigame)| enabled.then_some(minigame))
        .collect();

        let mut modules = ModuleList::default();
        modules.push(Rtid::level_module(ZOMBIES_DEAD_WIN_CONDITION));
        modules.push(Rtid::level_module(DEFAULT_WIN_CONDITION));
        modules.push(Rtid::local(WAVE_MODULE_ALIAS));
        modules.push(match plan.archetype {
            Archetype::Conveyor => Rtid::local(CONVEYOR_ALIAS),
            Archetype::Vasebreaker => Rtid::local(VASEBREAKER_ALIAS),
            Archetype::Standard => Rtid::local(SEED_BANK_ALIAS),
        });
        if last_stand.is_some() {
            modules.push(Rtid::local(LAST_STAND_ALIAS));
        }

        if features.mowers {
            match plan.stage.mower_module() {
                Some(mowers) => modules.push(mowers),
                None => {
                    warn!(stage = %plan.stage, "stage has no mower module; mowers skipped");
                    warnings.push(AssemblyWarning::MowersUnavailable {
                        stage: plan.stage.clone(),
                    });
                }
            }
        }
        if features.drops_sun() {
            modules.push(Rtid::level_module(SUN_DROPPER_MODULE));
        }
        if features.boosterama {
            modules.push(Rtid::level_module(BOOSTERAMA_MODULE));
        }
        if features.sun_bombs {
            modules.push(Rtid::current_level(SUN_BOMBS_ALIAS));
        }
        if !plan.challenges.is_empty() {
            modules.push(Rtid::local(CHALLENGE_MODULE_ALIAS));
        }
        for minigame in &side_minigames {
            modules.push(minigame.module_reference());
        }
        if plan.zomboss.is_some() {
            modules.push(Rtid::local(ZOMBOSS_ALIAS));
            modules.push(Rtid::level_module(ZOMBOSS_INTRO_MODULE));
        }

        // Objects follow the file layout the game ships, not the module order.
        let waves = WaveManager::new(plan.overrides.suppress_flag_zombie);
        let mut document = Document::new(self.level_fields(plan, modules, last_stand.is_some()))
            .with_comment(self.config.comment.as_str())
            .with_version(self.config.version);
        document.extend(vec![waves.module_object(), waves.properties_object()])?;

        match plan.archetype {
            Archetype::Conveyor => {
                if let Some(conveyor) = &plan.conveyor {
                    add_conveyor_belt(&mut document, conveyor)?;
                }
            }
            Archetype::Standard => {
                add_seed_bank(&mut document, &plan.seed_bank.clone().unwrap_or_default())?;
            }
            Archetype::Vasebreaker => {}
        }
        for minigame in side_minigames {
            add_side_minigame(&mut document, minigame)?;
        }
        add_challenges(&mut document, &plan.challenges)?;
        if let Some(settings) = last_stand {
            add_last_stand(&mut document, settings)?;
        }
        if let Some(zomboss) = &plan.zomboss {
            add_zomboss(&mut document, zomboss)?;
        }
        if let Some(layout) = &plan.vasebreaker {
            add_vasebreaker(&mut document, layout)?;
        }
        if features.sun_bombs {
            add_sun_bombs(&mut document)?;
        }
        debug!(objects = document.len(), "configuration objects appended");

        info!(
            level = %plan.name,
            archetype = %plan.archetype,
            stage = %plan.stage,
            objects = document.len(),
            "level assembled"
        );
        Ok(LevelBuilder::new(document, waves, plan.archetype, warnings))
    }

    /// Assemble the level and apply the plan's waves, cadence and reward.
    pub fn assemble_document(&self, plan: &LevelPlan) -> Result<Document> {
        let mut builder = self.assemble(plan)?;

        let waves = &plan.waves;
        builder.set_cadence(
            waves.flag_interval,
            waves.requested_count(),
            waves.first_wave_delay,
        );
        for wave in &waves.waves {
            builder.add_wave(wave)?;
        }
        builder.set_rewards(plan.reward.as_ref())?;

        Ok(builder.finish())
    }

    /// Level definition fields in the order the engine writes them.
    fn level_fields(&self, plan: &LevelPlan, modules: ModuleList, last_stand_active: bool) -> Fields {
        let mut fields = Fields::new()
            .with("StageModule", plan.stage.module_reference())
            .with("Name", plan.name.as_str())
            .with("Description", plan.description.as_str())
            .with("LevelNumber", plan.level_number)
            .with("Loot", Rtid::level_module(NO_LOOT_MODULE))
            .with("Modules", modules.into_value());

        if plan.archetype != Archetype::Vasebreaker && !last_stand_active {
            let sun = plan
                .starting_sun
                .unwrap_or(self.config.default_starting_sun);
            fields.insert("StartingSun", sun);
        }
        if plan.archetype == Archetype::Vasebreaker {
            fields.insert("IsVasebreaker", true);
        }
        for (key, level) in plan.overrides.level_fields() {
            fields.insert(key, level);
        }
        if let Some(suppress) = plan.overrides.suppress_plantfood_purchase {
            fields.insert("SuppressPlantfoodPurchase", suppress);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridSelection, VaseContent};
    use crate::modules::{
        ChallengeKind, ChallengeSelection, ConveyorPlant, ConveyorSettings, LastStandSettings,
        ZombossSettings,
    };
    use level_model::{Alias, ZombossMech};

    fn plan() -> LevelPlan {
        LevelPlan::new("Pirate Day 5", "Plank trouble", 5, Stage::new("PirateStage").unwrap())
    }

    fn module_list(document: &Document) -> Vec<String> {
        document
            .level()
            .objdata
            .get("Modules")
            .and_then(Value::as_list)
            .unwrap()
            .iter()
            .filter_map(Value::as_reference)
            .map(ToString::to_string)
            .collect()
    }

    fn object_aliases(document: &Document) -> Vec<&str> {
        document
            .objects()
            .iter()
            .skip(1)
            .filter_map(|o| o.primary_alias().map(Alias::as_str))
            .collect()
    }

    #[test]
    fn test_standard_level_modules() {
        let document = LevelAssembler::with_defaults()
            .assemble_document(&plan())
            .unwrap();

        assert_eq!(
            module_list(&document),
            vec![
                "RTID(ZombiesDeadWinCon@LevelModules)",
                "RTID(DefaultZombieWinCondition@LevelModules)",
                "RTID(NewWaves@.)",
                "RTID(SeedBank@.)",
            ]
        );
        let level = &document.level().objdata;
        assert_eq!(level.get("StartingSun").and_then(Value::as_int), Some(50));
        assert_eq!(
            level.get("Loot").and_then(Value::as_reference).map(ToString::to_string),
            Some("RTID(NoLoot@LevelModules)".to_string())
        );
        assert_eq!(
            level.keys().collect::<Vec<_>>(),
            vec!["StageModule", "Name", "Description", "LevelNumber", "Loot", "Modules", "StartingSun"]
        );
        assert!(document.unresolved_references().is_empty());
    }

    #[test]
    fn test_toggle_order() {
        let plan = plan()
            .with_features(FeatureToggles {
                mowers: true,
                boosterama: true,
                sun_bombs: true,
                invisighoul: true,
                column_minigame: true,
                all_jams: true,
                ..Default::default()
            })
            .with_challenges(ChallengeSelection::new().with_kind(ChallengeKind::SaveMowers));
        let document = LevelAssembler::with_defaults()
            .assemble_document(&plan)
            .unwrap();

        assert_eq!(
            module_list(&document)[4..],
            [
                "RTID(PirateMowers@LevelModules)",
                "RTID(DefaultSunDropper@LevelModules)",
                "RTID(Boosterama@LevelModules)",
                "RTID(SunBombs@CurrentLevel)",
                "RTID(ChallengeModule@.)",
                "RTID(InvisiGhoul@CurrentLevel)",
                "RTID(ColumnMinigame@CurrentLevel)",
                "RTID(EnableAllJams@CurrentLevel)",
            ]
        );
        assert!(document.unresolved_references().is_empty());
    }

    #[test]
    fn test_object_order() {
        let mut plan = plan()
            .with_features(FeatureToggles {
                sun_bombs: true,
                invisighoul: true,
                column_minigame: true,
                all_jams: true,
                ..Default::default()
            })
            .with_challenges(
                ChallengeSelection::new()
                    .with_kind(ChallengeKind::SunUsed)
                    .with_kind(ChallengeKind::SaveMowers),
            );
        plan.last_stand = Some(LastStandSettings::new(3000, 2));

        let builder = LevelAssembler::with_defaults().assemble(&plan).unwrap();
        assert_eq!(
            object_aliases(builder.document()),
            vec![
                "NewWaves",
                "WaveManagerProps",
                "SeedBank",
                "InvisiGhoul",
                "ColumnMinigame",
                "EnableAllJams",
                "ChallengeModule",
                "SunUsed",
                "LastStand",
                "SunBombs",
            ]
        );
    }

    #[test]
    fn test_object_order_vasebreaker_with_boss() {
        let mut grid = GridSelection::default();
        grid.mark_column(8).unwrap();
        let layout = grid.finalize(vec![VaseContent::plantfood(5)]).unwrap();

        let mut plan = plan()
            .with_archetype(Archetype::Vasebreaker)
            .with_features(FeatureToggles {
                sun_bombs: true,
                all_jams: true,
                ..Default::default()
            });
        plan.vasebreaker = Some(layout);
        plan.zomboss = Some(ZombossSettings::new(ZombossMech::Pirate));

        let builder = LevelAssembler::with_defaults().assemble(&plan).unwrap();
        assert_eq!(
            object_aliases(builder.document()),
            vec![
                "NewWaves",
                "WaveManagerProps",
                "EnableAllJams",
                "ZombossBattle",
                "VaseBreaker",
                "SunBombs",
            ]
        );
    }

    #[test]
    fn test_boss_overrides_last_stand() {
        let mut plan = plan();
        plan.last_stand = Some(LastStandSettings::new(3000, 2));
        plan.zomboss = Some(ZombossSettings::new(ZombossMech::Pirate));

        let builder = LevelAssembler::with_defaults().assemble(&plan).unwrap();
        assert_eq!(builder.warnings(), &[AssemblyWarning::LastStandOverriddenByBoss]);

        let document = builder.finish();
        let modules = module_list(&document);
        assert!(!modules.contains(&"RTID(LastStand@.)".to_string()));
        assert!(modules.ends_with(&[
            "RTID(ZombossBattle@.)".to_string(),
            "RTID(ZombossIntro@LevelModules)".to_string(),
        ]));
        assert!(!document.contains_alias(LAST_STAND_ALIAS));
        assert!(document.contains_alias(ZOMBOSS_ALIAS));
        // Last Stand is not active, so the level keeps its starting sun.
        assert_eq!(
            document.level().objdata.get("StartingSun").and_then(Value::as_int),
            Some(50)
        );
    }

    #[test]
    fn test_last_stand_suppresses_starting_sun() {
        let mut plan = plan();
        plan.last_stand = Some(LastStandSettings::new(3000, 2));

        let document = LevelAssembler::with_defaults()
            .assemble_document(&plan)
            .unwrap();
        assert_eq!(module_list(&document)[4], "RTID(LastStand@.)");
        assert!(!document.level().objdata.contains_key("StartingSun"));
        assert_eq!(
            document
                .get(LAST_STAND_ALIAS)
                .and_then(|o| o.objdata.get("StartingSun"))
                .and_then(Value::as_int),
            Some(3000)
        );
    }

    #[test]
    fn test_conveyor_level() {
        let mut plan = plan().with_archetype(Archetype::Conveyor);
        plan.conveyor = Some(ConveyorSettings::new(vec![ConveyorPlant::new("bonkchoy", 1, 4)]));
        plan.starting_sun = Some(125);

        let document = LevelAssembler::with_defaults()
            .assemble_document(&plan)
            .unwrap();
        assert_eq!(module_list(&document)[3], "RTID(ConveyorBelt@.)");
        assert!(!document.contains_alias(SEED_BANK_ALIAS));
        assert_eq!(
            document.objects_of_class("ConveyorSeedBankProperties").count(),
            1
        );
        assert_eq!(
            document.level().objdata.get("StartingSun").and_then(Value::as_int),
            Some(125)
        );
    }

    #[test]
    fn test_vasebreaker_level() {
        let mut grid = GridSelection::default();
        grid.mark_column(6).unwrap();
        grid.mark_column(7).unwrap();
        let layout = grid
            .finalize(vec![
                VaseContent::plant("peashooter", 4),
                VaseContent::zombie("pirate_imp", 5),
                VaseContent::plantfood(1),
            ])
            .unwrap();

        let mut plan = plan().with_archetype(Archetype::Vasebreaker);
        plan.vasebreaker = Some(layout);

        let document = LevelAssembler::with_defaults()
            .assemble_document(&plan)
            .unwrap();
        let level = &document.level().objdata;
        assert_eq!(level.get("IsVasebreaker"), Some(&Value::Bool(true)));
        assert!(!level.contains_key("StartingSun"));
        assert!(!document.contains_alias(SEED_BANK_ALIAS));
        assert_eq!(document.objects_of_class("VaseBreakerPresetProperties").count(), 1);
    }

    #[test]
    fn test_overrides_copied_when_present() {
        let mut plan = plan();
        plan.overrides = LevelOverrides {
            zombie_level: Some(3),
            suppress_plantfood_purchase: Some(true),
            suppress_flag_zombie: Some(false),
            ..Default::default()
        };

        let document = LevelAssembler::with_defaults()
            .assemble_document(&plan)
            .unwrap();
        let level = &document.level().objdata;
        assert_eq!(level.get("Zombie_level").and_then(Value::as_int), Some(3));
        assert!(!level.contains_key("Grid_item_level"));
        assert_eq!(level.get("SuppressPlantfoodPurchase"), Some(&Value::Bool(true)));
        assert_eq!(
            document
                .get("WaveManagerProps")
                .and_then(|o| o.objdata.get("SuppressFlagZombie")),
            Some(&Value::Bool(false))
        );
    }

    #[test]
    fn test_config_applies() {
        let assembler = LevelAssembler::new(AssemblerConfig {
            comment: "Custom".to_string(),
            version: 1,
            default_starting_sun: 150,
        });
        let document = assembler.assemble_document(&plan()).unwrap();
        assert_eq!(document.comment(), "Custom");
        assert_eq!(
            document.level().objdata.get("StartingSun").and_then(Value::as_int),
            Some(150)
        );
    }

    #[test]
    fn test_uncatalogued_stage_skips_mowers() {
        let plan = LevelPlan::new("Custom", "Homebrew", 1, Stage::new("MyStage").unwrap())
            .with_features(FeatureToggles {
                mowers: true,
                ..Default::default()
            });

        let builder = LevelAssembler::with_defaults().assemble(&plan).unwrap();
        assert!(matches!(
            builder.warnings(),
            [AssemblyWarning::MowersUnavailable { .. }]
        ));
        assert_eq!(module_list(builder.document()).len(), 4);
    }

    #[test]
    fn test_plan_waves_applied() {
        let mut plan = plan();
        plan.waves = WavePlan {
            flag_interval: 2,
            first_wave_delay: 8,
            wave_count: 0,
            waves: vec![
                crate::modules::WaveSpec::new(["pirate"]),
                crate::modules::WaveSpec::new(["pirate", "pirate_imp"]).with_bonus_plantfood(1),
            ],
        };
        plan.reward = Some(Reward::unlock_plant("kernelpult"));

        let document = LevelAssembler::with_defaults()
            .assemble_document(&plan)
            .unwrap();
        let props = &document.get("WaveManagerProps").unwrap().objdata;
        assert_eq!(props.get("WaveCount").and_then(Value::as_int), Some(2));
        assert_eq!(props.get("FlagWaveInterval").and_then(Value::as_int), Some(2));
        assert_eq!(props.get("ZombieCountdownFirstWaveSecs").and_then(Value::as_int), Some(8));
        assert_eq!(
            document.level().objdata.get("FirstRewardParam").and_then(Value::as_text),
            Some("kernelpult")
        );
    }
}
