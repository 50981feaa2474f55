// Non-interactive "Roll All": fills the lobby, spins everybody and prints who got what.

use anyhow::Context;
use async_std::channel;
use itertools::Itertools;
use log::warn;

use agent_roulette::roulette::lock;
use agent_roulette::rules::SpinRules;
use agent_roulette::{spin, storage};

use crate::assets;
use crate::config::ConsoleConfig;


pub struct RollConfig {
    pub player_names: Vec<String>,
    pub weapon_classes: Vec<String>,
    pub animate: bool,
    pub save: bool,
}

pub fn run(config: ConsoleConfig, roll_config: RollConfig) -> anyhow::Result<()> {
    let mut roulette = assets::load_roulette(&config)?;
    if !roll_config.animate {
        roulette.set_spin_rules(SpinRules::instant());
    }
    for name in &roll_config.player_names {
        if !roulette.add_player_to_lobby(name) {
            warn!("Skipping '{}': unknown, duplicate or lobby full", name);
        }
    }
    let shared = roulette.into_shared();

    // Nobody watches the wheel here, but the receiver has to stay alive for the spins.
    let (events_tx, _events_rx) = channel::unbounded();
    let mut spins = Vec::new();
    let mut failures = Vec::new();
    for (name, spin) in spin::roll_all(&shared, events_tx.clone()) {
        match spin {
            Ok(handle) => spins.push(handle),
            Err(err) => failures.push(format!("{name}: {err}")),
        }
    }
    for class in &roll_config.weapon_classes {
        match spin::roll_weapon(&shared, class, true, events_tx.clone()) {
            Ok(handle) => spins.push(handle),
            Err(err) => failures.push(err.to_string()),
        }
    }
    async_std::task::block_on(async {
        for handle in spins {
            handle.await;
        }
    });

    let roulette = lock(&shared);
    for member in roulette.lobby().members() {
        println!("{:<16} {}", member.name, member.selected.as_deref().unwrap_or("?"));
    }
    for class in &roll_config.weapon_classes {
        if let Some(weapon) = roulette.weapon_slots().last(class) {
            println!("{:<16} {}", class, weapon);
        }
    }
    if roll_config.save {
        storage::save_roster(roulette.roster(), &config.roster_path)
            .with_context(|| format!("Failed to save '{}'", config.roster_path.display()))?;
    }
    if !failures.is_empty() {
        anyhow::bail!("Some rolls failed: {}", failures.iter().join("; "));
    }
    Ok(())
}
