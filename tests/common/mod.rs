// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::collections::BTreeSet;

use agent_roulette::error::RouletteError;
use agent_roulette::event::RouletteEvent;
use agent_roulette::roulette::{Roulette, SharedRoulette};
use agent_roulette::rules::{HouseRules, RouletteRules, SpinRules};
use agent_roulette::test_util::{deterministic_rng, sample_roster, sample_weapon_pool};
use async_std::channel::Receiver;


#[allow(dead_code)]
pub fn agents(names: &[&str]) -> BTreeSet<String> { names.iter().map(|s| s.to_string()).collect() }

#[allow(dead_code)]
pub fn instant_rules(house_rules: HouseRules) -> RouletteRules {
    RouletteRules::new(house_rules, SpinRules::instant())
}

#[allow(dead_code)]
pub fn sample_roulette(house_rules: HouseRules) -> Roulette {
    let mut roulette = Roulette::with_rng(sample_roster(), instant_rules(house_rules), deterministic_rng());
    roulette.set_weapon_pool(sample_weapon_pool());
    roulette
}

#[allow(dead_code)]
pub fn shared_lobby(house_rules: HouseRules, members: &[&str]) -> SharedRoulette {
    let mut roulette = sample_roulette(house_rules);
    for name in members {
        assert!(roulette.add_player_to_lobby(name), "cannot add {name}");
    }
    roulette.into_shared()
}

// Everything the spins sent so far. Call after all spin tasks were awaited.
#[allow(dead_code)]
pub fn drain(rx: &Receiver<RouletteEvent>) -> Vec<RouletteEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

// `JoinHandle` is not `Debug`, so `unwrap_err` is out.
#[allow(dead_code)]
pub fn expect_err<T>(result: Result<T, RouletteError>) -> RouletteError {
    match result {
        Ok(_) => panic!("expected an error"),
        Err(err) => err,
    }
}
