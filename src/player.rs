use std::collections::{BTreeMap, BTreeSet};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::RosterError;


pub type AgentId = String;

// The synthetic wildcard candidate. Whoever lands on it picks freely.
pub const DEALER: &str = "Dealer";


#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Player {
    pub agent_pool: BTreeMap<AgentId, bool>,
    #[serde(default, with = "selection_serde")]
    pub selected: Option<AgentId>,
}

impl Player {
    pub fn from_schema(schema: &Schema) -> Self {
        Player {
            agent_pool: schema.agent_pool.clone(),
            selected: None,
        }
    }

    pub fn enabled_agents(&self) -> impl Iterator<Item = &AgentId> + Clone {
        self.agent_pool.iter().filter(|(_, enabled)| **enabled).map(|(agent, _)| agent)
    }

    pub fn is_enabled(&self, agent: &str) -> bool {
        self.agent_pool.get(agent).copied().unwrap_or(false)
    }
}


// Default pool applied to newly added players.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Schema {
    pub agent_pool: BTreeMap<AgentId, bool>,
}


// Long-lived player records keyed by name. Sorted map so that saving yields sorted keys.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: BTreeMap<String, Player>,
}

impl Roster {
    pub fn new() -> Self { Roster { players: BTreeMap::new() } }

    pub fn len(&self) -> usize { self.players.len() }
    pub fn is_empty(&self) -> bool { self.players.is_empty() }
    pub fn contains(&self, name: &str) -> bool { self.players.contains_key(name) }
    pub fn get(&self, name: &str) -> Option<&Player> { self.players.get(name) }
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Player> { self.players.get_mut(name) }
    pub fn names(&self) -> impl Iterator<Item = &String> { self.players.keys() }
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Player)> { self.players.iter() }

    pub fn insert(&mut self, name: String, player: Player) { self.players.insert(name, player); }

    pub fn add_player(&mut self, name: &str, schema: &Schema) -> Result<(), RosterError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::InvalidPlayerName { player: name.to_owned() });
        }
        if self.players.contains_key(name) {
            return Err(RosterError::PlayerExists { player: name.to_owned() });
        }
        info!("Adding player '{}' with {} agents", name, schema.agent_pool.len());
        self.players.insert(name.to_owned(), Player::from_schema(schema));
        Ok(())
    }

    pub fn remove_player(&mut self, name: &str) -> Option<Player> { self.players.remove(name) }

    // Does nothing if the player is unknown or the agent is not part of their pool: the pool
    // shape is fixed by the schema the player was created with.
    pub fn set_agent_availability(&mut self, name: &str, agent: &str, enabled: bool) {
        let Some(player) = self.players.get_mut(name) else {
            return;
        };
        if let Some(flag) = player.agent_pool.get_mut(agent) {
            *flag = enabled;
        }
    }

    // All agents known to anybody, enabled or not.
    pub fn agent_catalog(&self) -> BTreeSet<AgentId> {
        self.players.values().flat_map(|p| p.agent_pool.keys().cloned()).collect()
    }
}


// The roster file stores "no selection" as an empty string.
mod selection_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.filter(|s| !s.is_empty()))
    }
}
