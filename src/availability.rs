use std::collections::BTreeSet;

use crate::lobby::Lobby;
use crate::player::{AgentId, Player};


// Agents `player` may still land on: enabled in their pool and not held by any other lobby
// member. The player's own current selection never blocks them.
//
// Reads the live lobby, so during concurrent spins other members' intermediate values count
// as claims exactly like settled ones.
pub fn available_agents(name: &str, player: &Player, lobby: &Lobby) -> BTreeSet<AgentId> {
    player
        .enabled_agents()
        .filter(|agent| !lobby.is_claimed_by_other(name, agent))
        .cloned()
        .collect()
}
