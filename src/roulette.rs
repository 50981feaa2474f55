use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::availability::available_agents;
use crate::candidates::build_candidates;
use crate::error::RouletteError;
use crate::event::SpinTarget;
use crate::internal_error_message;
use crate::lobby::Lobby;
use crate::player::{AgentId, Roster};
use crate::rules::{HouseRules, RouletteRules, SpinRules};
use crate::selector::select;
use crate::spin::{SpinId, SpinState};
use crate::weapon::{weapon_candidates, WeaponPool, WeaponSlots};


pub type SharedRoulette = Arc<Mutex<Roulette>>;

// A spin task that panicked must not take the whole session down with it: every write it made
// is a complete value.
pub fn lock(shared: &SharedRoulette) -> MutexGuard<'_, Roulette> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}


// Everything a roll session needs: the roster, who is in the lobby and what they hold right
// now, house rules, weapon slots and the random source.
pub struct Roulette {
    roster: Roster,
    lobby: Lobby,
    rules: RouletteRules,
    weapon_pool: WeaponPool,
    weapon_slots: WeaponSlots,
    spins: HashMap<SpinTarget, (SpinId, SpinState)>,
    next_spin_id: SpinId,
    rng: StdRng,
}

impl Roulette {
    pub fn new(roster: Roster, rules: RouletteRules) -> Self {
        Self::with_rng(roster, rules, StdRng::from_os_rng())
    }

    pub fn with_rng(roster: Roster, rules: RouletteRules, rng: StdRng) -> Self {
        Roulette {
            roster,
            lobby: Lobby::new(),
            rules,
            weapon_pool: WeaponPool::default(),
            weapon_slots: WeaponSlots::new(),
            spins: HashMap::new(),
            next_spin_id: 0,
            rng,
        }
    }

    pub fn into_shared(self) -> SharedRoulette { Arc::new(Mutex::new(self)) }

    pub fn set_weapon_pool(&mut self, pool: WeaponPool) {
        self.weapon_pool = pool;
        self.weapon_slots.clear();
    }

    pub fn roster(&self) -> &Roster { &self.roster }
    pub fn roster_mut(&mut self) -> &mut Roster { &mut self.roster }
    pub fn lobby(&self) -> &Lobby { &self.lobby }
    pub fn rules(&self) -> &RouletteRules { &self.rules }
    pub fn house_rules(&self) -> HouseRules { self.rules.house_rules }
    pub fn weapon_pool(&self) -> &WeaponPool { &self.weapon_pool }
    pub fn weapon_slots(&self) -> &WeaponSlots { &self.weapon_slots }

    pub fn set_dealers_choice(&mut self, enabled: bool) {
        self.rules.house_rules.dealers_choice = enabled;
    }
    pub fn set_optimal_comp(&mut self, enabled: bool) {
        self.rules.house_rules.optimal_comp = enabled;
    }
    // Applies to spins started afterwards.
    pub fn set_spin_rules(&mut self, spin_rules: SpinRules) { self.rules.spin_rules = spin_rules; }

    // No-op for unknown players, duplicates and a full lobby. The member starts out holding
    // whatever the roster remembers for them.
    pub fn add_player_to_lobby(&mut self, name: &str) -> bool {
        let Some(player) = self.roster.get(name) else {
            return false;
        };
        let added = self.lobby.add(name, player.selected.clone());
        if added {
            info!("'{}' joined the lobby ({} players)", name, self.lobby.len());
        }
        added
    }

    pub fn remove_player_from_lobby(&mut self, name: &str) -> bool {
        let removed = self.lobby.remove(name);
        if removed {
            self.spins.remove(&SpinTarget::Player(name.to_owned()));
        }
        removed
    }

    // Drops all members and forgets their selections, both in the lobby and in the roster.
    pub fn clear_lobby(&mut self) {
        for name in self.lobby.names() {
            if let Some(player) = self.roster.get_mut(&name) {
                player.selected = None;
            }
        }
        self.lobby.clear();
        self.spins.retain(|target, _| !matches!(target, SpinTarget::Player(_)));
        info!("Lobby cleared");
    }

    pub fn spin_state(&self, target: &SpinTarget) -> SpinState {
        self.spins.get(target).map_or(SpinState::Idle, |&(_, state)| state)
    }

    // False once the target was removed from the lobby or has been rolled again since.
    pub fn is_current_spin(&self, target: &SpinTarget, id: SpinId) -> bool {
        self.spins.get(target) == Some(&(id, SpinState::Spinning))
    }

    pub fn available_agents(&self, name: &str) -> Result<BTreeSet<AgentId>, RouletteError> {
        if !self.lobby.contains(name) {
            return Err(RouletteError::NotInLobby { player: name.to_owned() });
        }
        let player = self.roster.get(name).ok_or_else(|| RouletteError::Internal {
            message: internal_error_message!("lobby member '{}' missing from roster", name),
        })?;
        Ok(available_agents(name, player, &self.lobby))
    }

    pub fn agent_candidates(&self, name: &str) -> Result<Vec<AgentId>, RouletteError> {
        let available = self.available_agents(name)?;
        Ok(build_candidates(
            &available,
            self.rules.agent_weight,
            self.rules.house_rules.dealers_choice,
            self.lobby.selected(name).map(String::as_str),
        ))
    }

    pub fn candidates(&self, target: &SpinTarget) -> Result<Vec<String>, RouletteError> {
        match target {
            SpinTarget::Player(name) => self.agent_candidates(name),
            SpinTarget::WeaponSlot(class) => {
                weapon_candidates(&self.weapon_pool, &self.weapon_slots, class)
            }
        }
    }

    fn draw(&mut self, target: &SpinTarget) -> Result<String, RouletteError> {
        let candidates = self.candidates(target)?;
        let value = select(&candidates, target, &mut self.rng)?;
        if let SpinTarget::Player(name) = target {
            self.lobby.set_selected(name, value.clone());
        }
        Ok(value)
    }

    // Starts a spin: refuses if the target is already spinning or has nothing to draw from.
    // On success the first intermediate value is already drawn and written. The returned id
    // must accompany every later step of this spin.
    pub fn begin_spin(&mut self, target: &SpinTarget) -> Result<(SpinId, String), RouletteError> {
        if self.spin_state(target) == SpinState::Spinning {
            return Err(RouletteError::SpinInProgress { target: target.clone() });
        }
        let first = self.draw(target)?;
        let id = self.next_spin_id;
        self.next_spin_id += 1;
        self.spins.insert(target.clone(), (id, SpinState::Spinning));
        info!("Spinning {} (spin {})", target, id);
        debug!("{} -> {}", target, first);
        Ok((id, first))
    }

    // One click of the wheel. If the pool ran dry because lobby-mates grabbed everything in the
    // meantime, the wheel stays on `previous`, which was valid when it was drawn.
    // Returns `None` if the spin is no longer current; its task should stop.
    pub fn spin_step(&mut self, target: &SpinTarget, id: SpinId, previous: &str) -> Option<String> {
        if !self.is_current_spin(target, id) {
            debug!("{}: spin {} is stale", target, id);
            return None;
        }
        match self.draw(target) {
            Ok(value) => {
                debug!("{} -> {}", target, value);
                Some(value)
            }
            Err(err) => {
                warn!("{}: keeping '{}' ({})", target, previous, err);
                Some(previous.to_owned())
            }
        }
    }

    // The last intermediate value is the result. For players it is copied into the roster;
    // for weapon slots it becomes the value the next roll must avoid. A stale spin changes
    // nothing and yields false.
    pub fn finish_spin(&mut self, target: &SpinTarget, id: SpinId, value: &str) -> bool {
        if !self.is_current_spin(target, id) {
            debug!("{}: spin {} is stale, dropping '{}'", target, id, value);
            return false;
        }
        match target {
            SpinTarget::Player(name) => {
                if self.lobby.contains(name) {
                    let selected = self.lobby.selected(name).cloned();
                    if let Some(player) = self.roster.get_mut(name) {
                        player.selected = selected;
                    }
                }
            }
            SpinTarget::WeaponSlot(class) => self.weapon_slots.set_last(class, value.to_owned()),
        }
        self.spins.insert(target.clone(), (id, SpinState::Settled));
        info!("{} settled on '{}'", target, value);
        true
    }
}
