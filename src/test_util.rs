// Test utilities shared by unit tests and integration tests.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::player::{Player, Roster, Schema};
use crate::weapon::WeaponPool;


// In theory random tests verify properties that should always hold, but let's fix the seed to
// avoid sporadic failures.
pub fn deterministic_rng() -> StdRng { StdRng::from_seed([0; 32]) }

// Expected length of `build_candidates` output.
pub fn population_size(num_available: usize, weight: usize, wildcard_eligible: bool) -> usize {
    num_available * weight + usize::from(wildcard_eligible)
}

pub fn player_with_pool(pool: &[(&str, bool)]) -> Player {
    Player {
        agent_pool: pool.iter().map(|&(agent, enabled)| (agent.to_owned(), enabled)).collect(),
        selected: None,
    }
}

pub fn sample_schema() -> Schema {
    Schema {
        agent_pool: BTreeMap::from([
            ("Jett".to_owned(), true),
            ("Omen".to_owned(), true),
            ("Sage".to_owned(), true),
            ("Sova".to_owned(), true),
            ("Viper".to_owned(), false),
        ]),
    }
}

pub fn sample_roster() -> Roster {
    let mut roster = Roster::new();
    roster.insert(
        "Alice".to_owned(),
        player_with_pool(&[("Jett", true), ("Sova", true), ("Omen", false)]),
    );
    roster.insert(
        "Bob".to_owned(),
        player_with_pool(&[("Jett", true), ("Sova", true), ("Omen", true)]),
    );
    roster.insert(
        "Charlie".to_owned(),
        player_with_pool(&[("Jett", true), ("Sage", true), ("Viper", true)]),
    );
    roster.insert(
        "Dave".to_owned(),
        player_with_pool(&[("Omen", true), ("Sage", true), ("Sova", true), ("Viper", true)]),
    );
    roster.insert(
        "Eve".to_owned(),
        player_with_pool(&[("Jett", true), ("Omen", true), ("Sage", true), ("Sova", true), ("Viper", true)]),
    );
    roster.insert("Frank".to_owned(), player_with_pool(&[("Jett", true)]));
    roster
}

pub fn sample_weapon_pool() -> WeaponPool {
    WeaponPool::new(BTreeMap::from([
        (
            "primary".to_owned(),
            vec!["Vandal".to_owned(), "Phantom".to_owned(), "Operator".to_owned()],
        ),
        ("sidearm".to_owned(), vec!["Ghost".to_owned(), "Sheriff".to_owned()]),
    ]))
}
