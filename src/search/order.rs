//! Move ordering sources
//!
//! Candidate order only matters when evaluations tie, but it decides which of
//! the tied moves is played. The order source is a type parameter of the
//! searcher so tests can pin it down.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::board::Pos;

/// Arranges candidate moves before the search visits them
pub trait MoveOrder {
    fn arrange(&mut self, moves: &mut [Pos]);
}

/// Uniform random order drawn from `R`
#[derive(Debug, Clone)]
pub struct Shuffled<R = StdRng> {
    rng: R,
}

impl Shuffled<StdRng> {
    /// Shuffle with a generator seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible shuffle
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> Shuffled<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MoveOrder for Shuffled<R> {
    fn arrange(&mut self, moves: &mut [Pos]) {
        moves.shuffle(&mut self.rng);
    }
}

/// Leaves candidates in generation (row-major) order
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationOrder;

impl MoveOrder for GenerationOrder {
    fn arrange(&mut self, _moves: &mut [Pos]) {}
}

impl<T: MoveOrder + ?Sized> MoveOrder for Box<T> {
    fn arrange(&mut self, moves: &mut [Pos]) {
        (**self).arrange(moves);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Pos> {
        (0..20).map(|i| Pos::new(i / 5, i % 5)).collect()
    }

    #[test]
    fn test_generation_order_is_identity() {
        let mut moves = sample();
        GenerationOrder.arrange(&mut moves);
        assert_eq!(moves, sample());
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let mut a = sample();
        let mut b = sample();
        Shuffled::seeded(42).arrange(&mut a);
        Shuffled::seeded(42).arrange(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut moves = sample();
        Shuffled::seeded(7).arrange(&mut moves);
        moves.sort();
        assert_eq!(moves, sample());
    }

    #[test]
    fn test_boxed_order() {
        let mut order: Box<dyn MoveOrder> = Box::new(GenerationOrder);
        let mut moves = sample();
        order.arrange(&mut moves);
        assert_eq!(moves, sample());
    }
}
