// Command-line replacement for the pool editor window. Every change is saved right away.

use anyhow::Context;
use console::Style;
use itertools::Itertools;

use agent_roulette::storage;

use crate::config::ConsoleConfig;


pub enum EditorCommand {
    List,
    Add { player_name: String },
    Remove { player_name: String },
    Set { player_name: String, agent: String, enabled: bool },
}

pub fn run(config: ConsoleConfig, command: EditorCommand) -> anyhow::Result<()> {
    let mut roster = storage::load_roster(&config.roster_path)
        .with_context(|| format!("Failed to load roster '{}'", config.roster_path.display()))?;
    match command {
        EditorCommand::List => {
            let catalog = roster.agent_catalog();
            for (name, player) in roster.iter() {
                let agents = catalog
                    .iter()
                    .filter(|agent| player.agent_pool.contains_key(*agent))
                    .map(|agent| {
                        if player.is_enabled(agent) {
                            Style::new().green().apply_to(agent.as_str()).to_string()
                        } else {
                            Style::new().dim().strikethrough().apply_to(agent.as_str()).to_string()
                        }
                    })
                    .join(" ");
                println!("{name:<16} {agents}");
            }
            return Ok(());
        }
        EditorCommand::Add { player_name } => {
            let schema = storage::load_schema(&config.schema_path).with_context(|| {
                format!("Failed to load schema '{}'", config.schema_path.display())
            })?;
            roster.add_player(&player_name, &schema)?;
        }
        EditorCommand::Remove { player_name } => {
            if roster.remove_player(&player_name).is_none() {
                anyhow::bail!("Player not in list: '{player_name}'");
            }
        }
        EditorCommand::Set { player_name, agent, enabled } => {
            let Some(player) = roster.get(&player_name) else {
                anyhow::bail!("Player not in list: '{player_name}'");
            };
            if !player.agent_pool.contains_key(&agent) {
                anyhow::bail!("'{player_name}' has no agent '{agent}' in their pool");
            }
            roster.set_agent_availability(&player_name, &agent, enabled);
        }
    }
    storage::save_roster(&roster, &config.roster_path)?;
    println!("Saved!");
    Ok(())
}
