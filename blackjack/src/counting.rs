use crate::{simulation::Card, CountingSystem};

const CARDS_PER_DECK: f64 = 52.0;
const MIN_DECKS_REMAINING: f64 = 1.0;

impl CountingSystem {
    /// The count tag of a single card under this system.
    pub fn tag(&self, card: Card) -> i32 {
        let value = card.hard_value();
        match self {
            CountingSystem::HiLo => match value {
                1 | 10 => -1,
                2..=6 => 1,
                _ => 0,
            },
            CountingSystem::Ko => match value {
                1 | 10 => -1,
                2..=7 => 1,
                _ => 0,
            },
            CountingSystem::OmegaII => match value {
                1 | 10 => -2,
                2 | 3 | 7 => 1,
                4..=6 => 2,
                9 => -1,
                _ => 0,
            },
        }
    }
}

/// Running and true count of one table. The counter only changes through
/// `update` and `reset`; reshuffling the shoe leaves it alone.
#[derive(Debug, Clone)]
pub struct CardCounter {
    system: CountingSystem,
    number_of_decks: u8,
    running_count: i32,
    decks_remaining: f64,
    true_count: f64,
    cards_seen: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterSnapshot {
    pub running_count: i32,
    pub true_count: f64,
    pub decks_remaining: f64,
    pub cards_seen: u32,
}

impl CardCounter {
    pub fn new(system: CountingSystem, number_of_decks: u8) -> Self {
        CardCounter {
            system,
            number_of_decks,
            running_count: 0,
            decks_remaining: (number_of_decks as f64).max(MIN_DECKS_REMAINING),
            true_count: 0.0,
            cards_seen: 0,
        }
    }

    pub fn update(&mut self, card: Card) {
        self.running_count += self.system.tag(card);
        self.cards_seen += 1;
        self.decks_remaining =
            (self.decks_remaining - 1.0 / CARDS_PER_DECK).max(MIN_DECKS_REMAINING);
        self.true_count = self.running_count as f64 / self.decks_remaining;
    }

    pub fn reset(&mut self) {
        *self = CardCounter::new(self.system, self.number_of_decks);
    }

    pub fn system(&self) -> CountingSystem {
        self.system
    }

    pub fn running_count(&self) -> i32 {
        self.running_count
    }

    pub fn true_count(&self) -> f64 {
        self.true_count
    }

    pub fn decks_remaining(&self) -> f64 {
        self.decks_remaining
    }

    pub fn cards_seen(&self) -> u32 {
        self.cards_seen
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            running_count: self.running_count,
            true_count: self.true_count,
            decks_remaining: self.decks_remaining,
            cards_seen: self.cards_seen,
        }
    }
}
