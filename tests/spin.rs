mod common;

use std::time::Duration;

use agent_roulette::error::RouletteError;
use agent_roulette::event::{RouletteEvent, SpinTarget};
use agent_roulette::roulette::lock;
use agent_roulette::rules::{HouseRules, SpinRules};
use agent_roulette::spin::{roll_all, roll_player, roll_weapon, SpinState};
use async_std::channel;
use common::*;
use itertools::Itertools;
use pretty_assertions::assert_eq;


fn player(name: &str) -> SpinTarget { SpinTarget::Player(name.to_owned()) }

fn icon_values(events: &[RouletteEvent], target: &SpinTarget) -> Vec<String> {
    events
        .iter()
        .filter_map(|ev| match ev {
            RouletteEvent::IconChanged { target: t, value } if t == target => Some(value.clone()),
            _ => None,
        })
        .collect()
}

fn num_sound_cues(events: &[RouletteEvent]) -> usize {
    events.iter().filter(|ev| **ev == RouletteEvent::SoundCue).count()
}


#[async_std::test]
async fn full_spin_settles_on_last_value() {
    let shared = shared_lobby(HouseRules::default(), &["Alice"]);
    let (tx, rx) = channel::unbounded();
    roll_player(&shared, "Alice", false, tx).unwrap().await;

    let events = drain(&rx);
    let values = icon_values(&events, &player("Alice"));
    assert_eq!(values.len(), 30);
    assert!(values.iter().all(|v| v == "Jett" || v == "Sova"));
    assert_eq!(num_sound_cues(&events), 30);
    assert_eq!(events.last(), Some(&RouletteEvent::SpinFinished { target: player("Alice") }));

    let roulette = lock(&shared);
    let last = values.last().cloned();
    assert_eq!(roulette.lobby().selected("Alice").cloned(), last);
    assert_eq!(roulette.roster().get("Alice").unwrap().selected, last);
    assert_eq!(roulette.spin_state(&player("Alice")), SpinState::Settled);
}

#[async_std::test]
async fn muted_spin_makes_no_sound() {
    let shared = shared_lobby(HouseRules::default(), &["Bob"]);
    let (tx, rx) = channel::unbounded();
    roll_player(&shared, "Bob", true, tx).unwrap().await;
    let events = drain(&rx);
    assert_eq!(num_sound_cues(&events), 0);
    assert_eq!(icon_values(&events, &player("Bob")).len(), 30);
}

#[async_std::test]
async fn cannot_reroll_while_spinning() {
    let shared = shared_lobby(HouseRules::default(), &["Alice"]);
    lock(&shared).set_spin_rules(SpinRules {
        base_delay: Duration::from_millis(5),
        ..SpinRules::reference()
    });
    let (tx, _rx) = channel::unbounded();
    let spin = roll_player(&shared, "Alice", false, tx.clone()).unwrap();
    assert_eq!(lock(&shared).spin_state(&player("Alice")), SpinState::Spinning);
    assert_eq!(
        expect_err(roll_player(&shared, "Alice", false, tx.clone())),
        RouletteError::SpinInProgress { target: player("Alice") }
    );
    spin.await;
    roll_player(&shared, "Alice", false, tx).unwrap().await;
}

#[async_std::test]
async fn empty_pool_fails_before_animation() {
    let mut roulette = sample_roulette(HouseRules::default());
    roulette.roster_mut().get_mut("Bob").unwrap().selected = Some("Jett".to_owned());
    assert!(roulette.add_player_to_lobby("Bob"));
    assert!(roulette.add_player_to_lobby("Frank"));
    let shared = roulette.into_shared();

    let (tx, rx) = channel::unbounded();
    assert_eq!(
        expect_err(roll_player(&shared, "Frank", false, tx.clone())),
        RouletteError::EmptyPool { target: player("Frank") }
    );
    assert!(drain(&rx).is_empty());
    assert_eq!(lock(&shared).spin_state(&player("Frank")), SpinState::Idle);
    assert_eq!(lock(&shared).lobby().selected("Frank"), None);

    // The dealer wildcard rescues the roll.
    lock(&shared).set_dealers_choice(true);
    roll_player(&shared, "Frank", false, tx).unwrap().await;
    assert_eq!(
        lock(&shared).lobby().selected("Frank").map(String::as_str),
        Some(agent_roulette::DEALER)
    );
}

#[async_std::test]
async fn unknown_player_cannot_roll() {
    let shared = shared_lobby(HouseRules::default(), &["Alice"]);
    let (tx, rx) = channel::unbounded();
    assert_eq!(
        expect_err(roll_player(&shared, "Bob", false, tx)),
        RouletteError::NotInLobby { player: "Bob".to_owned() }
    );
    assert!(drain(&rx).is_empty());
}

#[async_std::test]
async fn sequential_rolls_never_collide() {
    for _ in 0..5 {
        let shared = shared_lobby(HouseRules::default(), &["Alice", "Bob", "Charlie"]);
        let (tx, _rx) = channel::unbounded();
        for name in ["Alice", "Bob", "Charlie"] {
            roll_player(&shared, name, false, tx.clone()).unwrap().await;
        }
        let roulette = lock(&shared);
        let picks = ["Alice", "Bob", "Charlie"]
            .iter()
            .map(|name| roulette.lobby().selected(name).cloned().unwrap())
            .collect_vec();
        assert_eq!(picks.iter().unique().count(), 3, "{picks:?}");
    }
}

#[async_std::test]
async fn roll_all_mutes_everyone_but_the_first() {
    let shared = shared_lobby(HouseRules::default(), &["Alice", "Bob", "Charlie", "Dave"]);
    let (tx, rx) = channel::unbounded();
    let spins = roll_all(&shared, tx);
    assert_eq!(spins.iter().map(|(name, _)| name.as_str()).collect_vec(), vec![
        "Alice", "Bob", "Charlie", "Dave"
    ]);
    for (_, spin) in spins {
        spin.unwrap().await;
    }
    let events = drain(&rx);
    assert_eq!(num_sound_cues(&events), 30);
    let finished = events
        .iter()
        .filter(|ev| matches!(ev, RouletteEvent::SpinFinished { .. }))
        .count();
    assert_eq!(finished, 4);

    let roulette = lock(&shared);
    for name in ["Alice", "Bob", "Charlie", "Dave"] {
        assert_eq!(roulette.spin_state(&player(name)), SpinState::Settled);
        let pick = roulette.lobby().selected(name).unwrap();
        assert!(roulette.roster().get(name).unwrap().is_enabled(pick), "{name} got {pick}");
    }
}

#[async_std::test]
async fn weapon_slot_never_repeats_previous_result() {
    let shared = shared_lobby(HouseRules::default(), &[]);
    let (tx, rx) = channel::unbounded();
    let slot = SpinTarget::WeaponSlot("primary".to_owned());
    let mut previous: Option<String> = None;
    for _ in 0..10 {
        roll_weapon(&shared, "primary", true, tx.clone()).unwrap().await;
        let last = lock(&shared).weapon_slots().last("primary").cloned().unwrap();
        assert_ne!(Some(&last), previous.as_ref());
        let values = icon_values(&drain(&rx), &slot);
        assert_eq!(values.len(), 30);
        assert_eq!(values.last(), Some(&last));
        if let Some(prev) = &previous {
            assert!(values.iter().all(|v| v != prev));
        }
        previous = Some(last);
    }
    assert_eq!(
        expect_err(roll_weapon(&shared, "melee", true, tx)),
        RouletteError::UnknownWeaponSlot { slot: "melee".to_owned() }
    );
}

#[test]
fn wheel_stays_put_when_pool_runs_dry() {
    let mut roulette = sample_roulette(HouseRules::default());
    assert!(roulette.add_player_to_lobby("Frank"));
    let (id, first) = roulette.begin_spin(&player("Frank")).unwrap();
    assert_eq!(first, "Jett");
    // Bob walks in already holding Frank's only agent.
    roulette.roster_mut().get_mut("Bob").unwrap().selected = Some("Jett".to_owned());
    assert!(roulette.add_player_to_lobby("Bob"));
    assert_eq!(roulette.spin_step(&player("Frank"), id, &first), Some("Jett".to_owned()));
    assert_eq!(roulette.spin_state(&player("Frank")), SpinState::Spinning);
}

#[test]
fn spin_sees_intermediate_values_of_others() {
    let mut roulette = sample_roulette(HouseRules::default());
    assert!(roulette.add_player_to_lobby("Alice"));
    assert!(roulette.add_player_to_lobby("Bob"));
    let (id, first) = roulette.begin_spin(&player("Alice")).unwrap();
    assert_eq!(roulette.spin_state(&player("Alice")), SpinState::Spinning);
    assert!(!roulette.agent_candidates("Bob").unwrap().contains(&first));

    let next = roulette.spin_step(&player("Alice"), id, &first).unwrap();
    let bob_candidates = roulette.agent_candidates("Bob").unwrap();
    assert!(!bob_candidates.contains(&next));
    if next != first {
        assert!(bob_candidates.contains(&first));
    }
}

#[test]
fn stale_spin_cannot_touch_new_one() {
    let mut roulette = sample_roulette(HouseRules::default());
    assert!(roulette.add_player_to_lobby("Alice"));
    let (old_id, old_first) = roulette.begin_spin(&player("Alice")).unwrap();
    roulette.clear_lobby();
    assert!(roulette.add_player_to_lobby("Alice"));
    let (new_id, new_first) = roulette.begin_spin(&player("Alice")).unwrap();
    assert_ne!(old_id, new_id);

    assert_eq!(roulette.spin_step(&player("Alice"), old_id, &old_first), None);
    assert!(!roulette.finish_spin(&player("Alice"), old_id, &old_first));
    assert_eq!(roulette.spin_state(&player("Alice")), SpinState::Spinning);
    assert_eq!(roulette.lobby().selected("Alice"), Some(&new_first));
    assert_eq!(roulette.roster().get("Alice").unwrap().selected, None);
    assert_eq!(
        roulette.begin_spin(&player("Alice")).unwrap_err(),
        RouletteError::SpinInProgress { target: player("Alice") }
    );

    assert!(roulette.finish_spin(&player("Alice"), new_id, &new_first));
    assert_eq!(roulette.spin_state(&player("Alice")), SpinState::Settled);
    assert_eq!(roulette.roster().get("Alice").unwrap().selected, Some(new_first));
}

#[async_std::test]
async fn removed_player_spin_stops_without_settling_rejoined_spin() {
    let shared = shared_lobby(HouseRules::default(), &["Alice"]);
    lock(&shared).set_spin_rules(SpinRules {
        base_delay: Duration::from_millis(10),
        ..SpinRules::reference()
    });
    let (tx, rx) = channel::unbounded();
    let old_spin = roll_player(&shared, "Alice", false, tx.clone()).unwrap();
    {
        let mut roulette = lock(&shared);
        roulette.clear_lobby();
        assert!(roulette.add_player_to_lobby("Alice"));
        roulette.set_spin_rules(SpinRules {
            base_delay: Duration::from_millis(200),
            ..SpinRules::reference()
        });
    }
    let _new_spin = roll_player(&shared, "Alice", true, tx.clone()).unwrap();
    old_spin.await;

    assert_eq!(lock(&shared).spin_state(&player("Alice")), SpinState::Spinning);
    assert_eq!(
        expect_err(roll_player(&shared, "Alice", false, tx)),
        RouletteError::SpinInProgress { target: player("Alice") }
    );
    let events = drain(&rx);
    assert!(!events.iter().any(|ev| matches!(ev, RouletteEvent::SpinFinished { .. })));
    assert!(icon_values(&events, &player("Alice")).len() < 30);
}

#[test]
fn clear_lobby_resets_selections() {
    let mut roulette = sample_roulette(HouseRules::default());
    assert!(roulette.add_player_to_lobby("Alice"));
    let (id, first) = roulette.begin_spin(&player("Alice")).unwrap();
    assert!(roulette.finish_spin(&player("Alice"), id, &first));
    assert!(roulette.roster().get("Alice").unwrap().selected.is_some());
    roulette.clear_lobby();
    assert!(roulette.lobby().is_empty());
    assert_eq!(roulette.roster().get("Alice").unwrap().selected, None);
    assert_eq!(roulette.spin_state(&player("Alice")), SpinState::Idle);
}

#[test]
fn lobby_holds_at_most_five() {
    let mut roulette = sample_roulette(HouseRules::default());
    for name in ["Alice", "Bob", "Charlie", "Dave", "Eve"] {
        assert!(roulette.add_player_to_lobby(name));
    }
    assert!(!roulette.add_player_to_lobby("Frank"));
    assert!(!roulette.add_player_to_lobby("Alice"));
    assert!(!roulette.add_player_to_lobby("Mallory"));
    assert_eq!(roulette.lobby().len(), 5);
}
