use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::GameError;
use crate::rules::{BIG_BLIND, MAX_PLAYERS, MIN_PLAYERS};

/// Environment variable that overrides [`TableConfig::seed`].
pub const SEED_ENV: &str = "HOLDEM_SEED";

pub const DEFAULT_AI_NAMES: [&str; 7] = ["Alex", "Bella", "Chris", "Diana", "Ethan", "Fiona", "George"];

pub const HUMAN_NAME: &str = "You";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<ConfigError> for GameError {
    fn from(e: ConfigError) -> Self {
        GameError::InvalidConfig(e.to_string())
    }
}

/// Table parameters chosen before the first hand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    /// Seats at the table, seat 0 being the human (2-8)
    pub player_count: usize,
    /// Chips every seat starts with
    pub starting_chips: u32,
    /// Seed for shuffling and automated decisions
    pub seed: Option<u64>,
    /// Burn one card before the flop, turn and river
    pub burn_cards: bool,
    /// Names for the automated seats, in seat order
    pub ai_names: Vec<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            starting_chips: 2000,
            seed: None,
            burn_cards: false,
            ai_names: DEFAULT_AI_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TableConfig {
    pub fn new(player_count: usize, starting_chips: u32) -> Self {
        Self {
            player_count,
            starting_chips,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::Invalid(format!(
                "player_count must be between {} and {}, got {}",
                MIN_PLAYERS, MAX_PLAYERS, self.player_count
            )));
        }
        if self.starting_chips < 2 * BIG_BLIND {
            return Err(ConfigError::Invalid(format!(
                "starting_chips must be at least {}, got {}",
                2 * BIG_BLIND,
                self.starting_chips
            )));
        }
        // every chip at the table must fit in one pot
        let total = self.player_count as u64 * u64::from(self.starting_chips);
        if total > u64::from(u32::MAX) {
            return Err(ConfigError::Invalid(format!(
                "{} seats of {} chips exceed the table limit of {}",
                self.player_count,
                self.starting_chips,
                u32::MAX
            )));
        }
        Ok(())
    }

    /// Display name for `seat`.
    pub fn seat_name(&self, seat: usize) -> String {
        if seat == 0 {
            return HUMAN_NAME.to_string();
        }
        self.ai_names
            .get(seat - 1)
            .cloned()
            .unwrap_or_else(|| format!("AI{}", seat))
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: TableConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads a TOML file and applies the environment override.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        let mut cfg = Self::from_toml_str(&s)?;
        cfg.apply_env()?;
        Ok(cfg)
    }

    /// Applies [`SEED_ENV`] when it is set and non-empty.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(seed) = std::env::var(SEED_ENV) {
            if !seed.is_empty() {
                self.seed = Some(
                    seed.parse()
                        .map_err(|_| ConfigError::Invalid(format!("invalid {}: {}", SEED_ENV, seed)))?,
                );
            }
        }
        Ok(())
    }
}
