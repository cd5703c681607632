use alloc::vec::Vec;

use super::*;

/// Draws every pair's face uniformly from [`FaceType::ALL`], with replacement, so the same face can back
/// several pairs.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, difficulty: Difficulty) -> Deck {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let faces: Vec<FaceType> = (0..difficulty.pair_count())
            .map(|_| FaceType::ALL[rng.random_range(0..FaceType::ALL.len())])
            .collect();

        log::debug!(
            "generated {} deck with {} pairs from seed {}",
            difficulty,
            faces.len(),
            self.seed
        );
        Deck::from_pair_faces(faces)
    }
}

/// Board order for `card_count` cards: a seeded permutation of the deck's logical indices.
pub fn deal(seed: u64, card_count: CardCount) -> Vec<CardIndex> {
    use rand::prelude::*;

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut order: Vec<CardIndex> = (0..card_count).collect();
    order.shuffle(&mut rng);
    order
}
