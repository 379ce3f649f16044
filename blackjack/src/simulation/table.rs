use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::{counting::CardCounter, BlackjackError, Rule};

use super::{shoe::Shoe, Card};

/// Everything seats at one table share: the shoe, the counter and the random
/// source. Each campaign owns exactly one.
#[derive(Debug, Clone)]
pub struct TableContext {
    pub shoe: Shoe,
    pub counter: CardCounter,
    pub rng: StdRng,
}

impl TableContext {
    /// Creates a table with a freshly shuffled shoe. Without a seed the random
    /// source is seeded from the operating system.
    pub fn new(rule: &Rule, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut shoe = Shoe::new(rule.number_of_decks);
        shoe.shuffle(&mut rng);
        TableContext {
            shoe,
            counter: CardCounter::new(rule.counting_system, rule.number_of_decks),
            rng,
        }
    }

    pub fn draw(&mut self) -> Result<Card, BlackjackError> {
        self.shoe.deal_card()
    }

    /// Reshuffles when fewer than `threshold` cards remain. The count is kept.
    pub fn reshuffle_if_necessary(&mut self, threshold: u16) -> bool {
        if self.shoe.remaining() >= threshold as usize {
            return false;
        }
        debug!(
            remaining = self.shoe.remaining(),
            running_count = self.counter.running_count(),
            "reshuffling shoe"
        );
        self.shoe.shuffle(&mut self.rng);
        true
    }
}
