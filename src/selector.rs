use rand::Rng;

use crate::error::RouletteError;
use crate::event::SpinTarget;


// Uniform draw over an already weighted population. This is the only random decision in a
// roll; everything feeding into it is deterministic.
pub fn select<R: Rng + ?Sized>(
    candidates: &[String], target: &SpinTarget, rng: &mut R,
) -> Result<String, RouletteError> {
    if candidates.is_empty() {
        return Err(RouletteError::EmptyPool { target: target.clone() });
    }
    let idx = rng.random_range(0..candidates.len());
    Ok(candidates[idx].clone())
}
