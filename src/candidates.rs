use std::collections::BTreeSet;

use crate::player::{AgentId, DEALER};


// Expands available agents into the sampling population: every agent `weight` times, plus a
// single dealer wildcard when the house rule is on and the player is not already sitting on
// it. Order carries no meaning; repetitions do.
pub fn build_candidates(
    available: &BTreeSet<AgentId>, weight: usize, wildcard_active: bool,
    prior_selection: Option<&str>,
) -> Vec<AgentId> {
    let mut candidates = Vec::with_capacity(available.len() * weight + 1);
    for agent in available {
        candidates.extend(std::iter::repeat_n(agent.clone(), weight));
    }
    if wildcard_active && prior_selection != Some(DEALER) {
        candidates.push(DEALER.to_owned());
    }
    candidates
}
