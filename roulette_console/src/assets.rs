use anyhow::Context;
use log::{info, warn};

use agent_roulette::player::DEALER;
use agent_roulette::roulette::Roulette;
use agent_roulette::storage::{self, IconManifest};
use agent_roulette::weapon::WeaponPool;

use crate::config::ConsoleConfig;


// Weapons and icons are optional: without them the weapon roulette is empty and agents are
// shown by name only, which is all the console does anyway.
pub fn load_roulette(config: &ConsoleConfig) -> anyhow::Result<Roulette> {
    let roster = storage::load_roster(&config.roster_path)
        .with_context(|| format!("Failed to load roster '{}'", config.roster_path.display()))?;
    info!("Loaded {} players from {}", roster.len(), config.roster_path.display());

    let weapon_pool = if config.weapons_path.exists() {
        storage::load_weapon_pool(&config.weapons_path).with_context(|| {
            format!("Failed to load weapons '{}'", config.weapons_path.display())
        })?
    } else {
        WeaponPool::default()
    };

    if config.icons_path.exists() {
        match storage::load_icon_manifest(&config.icons_path) {
            Ok(icons) => {
                check_icons(&icons, &roster.agent_catalog().into_iter().collect::<Vec<_>>())
            }
            Err(err) => warn!("Ignoring icon manifest {}: {}", config.icons_path.display(), err),
        }
    }

    let mut roulette = Roulette::new(roster, config.rules());
    roulette.set_weapon_pool(weapon_pool);
    Ok(roulette)
}

fn check_icons(icons: &IconManifest, agents: &[String]) {
    for agent in agents.iter().map(String::as_str).chain(std::iter::once(DEALER)) {
        if !icons.agents.contains_key(agent) {
            warn!("No icon for agent '{}'", agent);
        }
    }
}
