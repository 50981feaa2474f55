use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use agent_roulette::rules::{HouseRules, RouletteRules, SpinRules};
use agent_roulette::storage::{ICON_DATA_PATH, PLAYER_DATA_PATH, SCHEMA_PATH, WEAPON_DATA_PATH};


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    #[serde(with = "humantime_serde")]
    pub base_delay: Duration,
    pub num_steps: u32,
    pub steady_steps: u32,
    pub delay_growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub roster_path: PathBuf,
    pub schema_path: PathBuf,
    pub icons_path: PathBuf,
    pub weapons_path: PathBuf,
    pub dealers_choice: bool,
    pub spin: SpinConfig,
}

impl Default for SpinConfig {
    fn default() -> Self {
        let rules = SpinRules::reference();
        SpinConfig {
            base_delay: rules.base_delay,
            num_steps: rules.num_steps,
            steady_steps: rules.steady_steps,
            delay_growth: rules.delay_growth,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            roster_path: PLAYER_DATA_PATH.into(),
            schema_path: SCHEMA_PATH.into(),
            icons_path: ICON_DATA_PATH.into(),
            weapons_path: WEAPON_DATA_PATH.into(),
            dealers_choice: false,
            spin: SpinConfig::default(),
        }
    }
}

impl From<&SpinConfig> for SpinRules {
    fn from(config: &SpinConfig) -> Self {
        SpinRules {
            base_delay: config.base_delay,
            num_steps: config.num_steps,
            steady_steps: config.steady_steps,
            delay_growth: config.delay_growth,
        }
    }
}

impl ConsoleConfig {
    pub fn rules(&self) -> RouletteRules {
        let house_rules = HouseRules {
            dealers_choice: self.dealers_choice,
            optimal_comp: false,
        };
        RouletteRules::new(house_rules, (&self.spin).into())
    }
}

pub fn read_config_file(path: Option<&Path>) -> anyhow::Result<ConsoleConfig> {
    let Some(path) = path else {
        return Ok(ConsoleConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}
