//! Random source for generated promo codes and booking IDs.

use std::sync::{Arc, Mutex, PoisonError};

use rand::{SeedableRng, rngs::StdRng};

/// A cloneable handle to one shared generator.
///
/// Clones draw from the same sequence, so a seeded handle replays exactly.
#[derive(Debug, Clone)]
pub struct Entropy {
    rng: Arc<Mutex<StdRng>>,
}

impl Entropy {
    /// Seeded from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// A fixed sequence, for reproducible draws.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Run `draw` with exclusive use of the generator. Never hold this
    /// across an await.
    pub fn draw<T>(&self, draw: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        draw(&mut rng)
    }
}

impl Default for Entropy {
    fn default() -> Self {
        Self::from_os()
    }
}

#[cfg(test)]
mod tests {
    use washbay::codes::generate_booking_id;

    use super::*;

    #[test]
    fn seeded_handles_replay_the_same_sequence() {
        let first = Entropy::seeded(5);
        let second = Entropy::seeded(5);

        for _ in 0..4 {
            assert_eq!(
                first.draw(generate_booking_id),
                second.draw(generate_booking_id),
                "seeded sequences diverged"
            );
        }
    }

    #[test]
    fn clones_share_one_sequence() {
        let entropy = Entropy::seeded(5);
        let clone = entropy.clone();

        let drawn = entropy.draw(generate_booking_id);
        let next = clone.draw(generate_booking_id);

        assert_ne!(drawn, next, "clone should continue the sequence");
    }
}
