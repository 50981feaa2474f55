// The wheel: each spin is an async task that clicks through intermediate picks at a slowing
// cadence and leaves the last one as the result.
//
// Spins share nothing but the `Roulette` behind a mutex, which is locked only for the duration
// of a single draw. A spin therefore sees other spins' intermediate values as claims, same as
// settled ones. Nothing re-validates a settled pick when a later spin overwrites its own value,
// so two concurrently rolled players can in principle end on the same agent.

use std::time::Duration;

use async_std::channel::Sender;
use async_std::task::{self, JoinHandle};
use log::debug;
use strum::Display;

use crate::error::RouletteError;
use crate::event::{RouletteEvent, SpinTarget};
use crate::roulette::{lock, SharedRoulette};
use crate::rules::SpinRules;


// Tells a spin apart from earlier spins of the same target.
pub type SpinId = u64;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SpinState {
    // Nothing rolled yet; roll trigger enabled.
    Idle,
    // Roll trigger disabled until the wheel stops.
    Spinning,
    // Result is final; roll trigger enabled again.
    Settled,
}


// Per-step sleep durations of one spin. The first `steady_steps + 1` steps wait `base_delay`,
// then every step waits `delay_growth` times longer than the previous one. The delay is kept
// in fractional milliseconds and truncated when slept, so growth never resets mid-spin.
#[derive(Clone, Debug)]
pub struct SpinSchedule {
    step: u32,
    num_steps: u32,
    steady_steps: u32,
    delay_growth: f64,
    delay_ms: f64,
}

impl SpinSchedule {
    pub fn new(rules: &SpinRules) -> Self {
        SpinSchedule {
            step: 0,
            num_steps: rules.num_steps,
            steady_steps: rules.steady_steps,
            delay_growth: rules.delay_growth,
            delay_ms: rules.base_delay.as_secs_f64() * 1000.0,
        }
    }
}

impl Iterator for SpinSchedule {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.step >= self.num_steps {
            return None;
        }
        let sleep = Duration::from_millis(self.delay_ms.floor() as u64);
        if self.step >= self.steady_steps {
            self.delay_ms *= self.delay_growth;
        }
        self.step += 1;
        Some(sleep)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.num_steps.saturating_sub(self.step) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for SpinSchedule {}


async fn notify(events: &Sender<RouletteEvent>, event: RouletteEvent) {
    if events.send(event).await.is_err() {
        debug!("Presentation layer is gone, spinning on");
    }
}

// Stops quietly once the spin goes stale: its player left the lobby, possibly to come back and
// start a new spin that now owns the lobby field.
async fn run_spin(
    shared: SharedRoulette, target: SpinTarget, id: SpinId, first: String, rules: SpinRules,
    mute: bool, events: Sender<RouletteEvent>,
) {
    let mut value = first;
    for (step, delay) in SpinSchedule::new(&rules).enumerate() {
        if step > 0 {
            let Some(next) = lock(&shared).spin_step(&target, id, &value) else {
                return;
            };
            value = next;
        }
        notify(&events, RouletteEvent::IconChanged {
            target: target.clone(),
            value: value.clone(),
        })
        .await;
        if !mute {
            notify(&events, RouletteEvent::SoundCue).await;
        }
        if !delay.is_zero() {
            task::sleep(delay).await;
        } else {
            task::yield_now().await;
        }
    }
    if !lock(&shared).finish_spin(&target, id, &value) {
        return;
    }
    notify(&events, RouletteEvent::SpinFinished { target }).await;
}

// Starts a spin for `target`. Fails before anything moves if the target is already spinning
// or has no candidates.
pub fn start_spin(
    shared: &SharedRoulette, target: SpinTarget, mute: bool, events: Sender<RouletteEvent>,
) -> Result<JoinHandle<()>, RouletteError> {
    let (id, first, rules) = {
        let mut roulette = lock(shared);
        let (id, first) = roulette.begin_spin(&target)?;
        (id, first, roulette.rules().spin_rules)
    };
    Ok(task::spawn(run_spin(shared.clone(), target, id, first, rules, mute, events)))
}

pub fn roll_player(
    shared: &SharedRoulette, name: &str, mute: bool, events: Sender<RouletteEvent>,
) -> Result<JoinHandle<()>, RouletteError> {
    {
        let roulette = lock(shared);
        if !roulette.lobby().contains(name) {
            return Err(RouletteError::NotInLobby { player: name.to_owned() });
        }
    }
    start_spin(shared, SpinTarget::Player(name.to_owned()), mute, events)
}

// Rolls every lobby member in join order. Only the first spin clicks audibly so the sounds
// don't pile up. A member that cannot roll does not stop the others.
pub fn roll_all(
    shared: &SharedRoulette, events: Sender<RouletteEvent>,
) -> Vec<(String, Result<JoinHandle<()>, RouletteError>)> {
    let names = lock(shared).lobby().names();
    names
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let spin = roll_player(shared, &name, idx > 0, events.clone());
            (name, spin)
        })
        .collect()
}

pub fn roll_weapon(
    shared: &SharedRoulette, class: &str, mute: bool, events: Sender<RouletteEvent>,
) -> Result<JoinHandle<()>, RouletteError> {
    start_spin(shared, SpinTarget::WeaponSlot(class.to_owned()), mute, events)
}
