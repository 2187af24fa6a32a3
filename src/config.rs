//! Battle configuration and the layout derived from it.
//!
//! Defaults reproduce the reference build.  A RON file may override any subset
//! of fields; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::Difficulty;
use crate::error::ConfigError;
use crate::geometry::Rect;

// ── Layout constants ─────────────────────────────────────────────────────────

const BOSS_SIZE: i32 = 150;
const BOSS_TOP: i32 = 50;
const ARENA_TOP: i32 = BOSS_TOP + BOSS_SIZE + 10;

const ATTACK_ARENA: (i32, i32) = (600, 400);
const MENU_ARENA: (i32, i32) = (400, 220);
const FIGHT_ARENA: (i32, i32) = (300, 200);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Preset applied at the first battle reset.
    pub difficulty: Difficulty,
    /// Fixed tick period the front-end should drive `tick` at.
    pub tick_ms: u64,
    /// Seed for the attack patterns' generators; `None` draws from entropy.
    pub seed: Option<u64>,
    pub field_width: i32,
    pub field_height: i32,
    pub boss_name: String,
    pub boss_max_hp: u32,
    /// HP the boss enters the battle with; `None` means full health.
    pub boss_start_hp: Option<u32>,
    /// Pixels moved per tick while a direction is held.
    pub player_speed: i32,
    pub player_size: i32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        BattleConfig {
            difficulty: Difficulty::Easy,
            tick_ms: 15,
            seed: None,
            field_width: 1400,
            field_height: 800,
            boss_name: "GREBBORY ANTONY".to_string(),
            boss_max_hp: 100,
            boss_start_hp: None,
            player_speed: 5,
            player_size: 25,
        }
    }
}

impl BattleConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        BattleConfig::parse(text, None)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = BattleConfig::parse(&text, Some(path))?;
        log::info!("loaded battle config from {}", path.display());
        Ok(config)
    }

    /// Deserialize and validate.  `path` only labels parse errors.
    fn parse(text: &str, path: Option<&Path>) -> Result<Self, ConfigError> {
        let config: BattleConfig = ron::from_str(text).map_err(|source| match path {
            Some(path) => ConfigError::Parse { path: path.to_path_buf(), source },
            None => ConfigError::Syntax(source),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be at least 1".into()));
        }
        if self.boss_max_hp == 0 {
            return Err(ConfigError::Invalid("boss_max_hp must be at least 1".into()));
        }
        if self.boss_start_hp.is_some_and(|hp| hp == 0 || hp > self.boss_max_hp) {
            return Err(ConfigError::Invalid("boss_start_hp must be between 1 and boss_max_hp".into()));
        }
        if self.player_size <= 0 || self.player_speed <= 0 {
            return Err(ConfigError::Invalid("player size and speed must be positive".into()));
        }
        let arena = self.attack_arena();
        if arena.x < 0 || arena.bottom() > self.field_height {
            return Err(ConfigError::Invalid(format!(
                "field {}x{} is too small for a {}x{} arena",
                self.field_width, self.field_height, arena.width, arena.height
            )));
        }
        if self.player_size >= arena.width.min(arena.height) {
            return Err(ConfigError::Invalid("player does not fit inside the arena".into()));
        }
        Ok(())
    }

    // ── Derived layout ───────────────────────────────────────────────────────

    fn centered(&self, (width, height): (i32, i32)) -> Rect {
        Rect::new((self.field_width - width) / 2, ARENA_TOP, width, height)
    }

    /// Where the player dodges during a boss attack.
    pub fn attack_arena(&self) -> Rect {
        self.centered(ATTACK_ARENA)
    }

    /// Dialog and menu box.
    pub fn menu_arena(&self) -> Rect {
        self.centered(MENU_ARENA)
    }

    pub fn fight_arena(&self) -> Rect {
        self.centered(FIGHT_ARENA)
    }

    pub fn boss_region(&self) -> Rect {
        Rect::new((self.field_width - BOSS_SIZE) / 2, BOSS_TOP, BOSS_SIZE, BOSS_SIZE)
    }
}
