mod dealer_play;

use crate::{
    simulation::{hand::Hand, shoe::Shoe, table::TableContext, Card},
    Decision, Rule,
};

pub use dealer_play::{bust_probability, simulate_dealer_bust};

const H: Decision = Decision::Hit;
const S: Decision = Decision::Stand;
const P: Decision = Decision::Split;
const D: Decision = Decision::Double;

// Columns are the dealer up card: A, 2, 3, ..., 9, 10.
static PAIR_CHART: [[Decision; 10]; 10] = [
    [P, P, P, P, P, P, P, P, P, P], // Double Ace
    [H, P, P, P, P, P, H, H, H, H], // Double 2
    [H, P, P, P, P, P, H, H, H, H],
    [H, H, H, H, P, P, H, H, H, H],
    [H, D, D, D, D, D, D, D, D, H],
    [H, P, P, P, P, P, H, H, H, H],
    [H, P, P, P, P, P, P, H, H, H],
    [P, P, P, P, P, P, P, P, P, P],
    [S, P, P, P, P, P, S, P, P, S],
    [S, S, S, S, S, S, S, S, S, S], // Double 10
];
static DOUBLE_CHART: [[Decision; 10]; 3] = [
    [H, H, D, D, D, D, H, H, H, H], // 9
    [H, D, D, D, D, D, D, D, D, H],
    [H, D, D, D, D, D, D, D, D, D], // 11
];
static HARD_CHART: [[Decision; 10]; 5] = [
    [H, H, H, S, S, S, H, H, H, H], // 12
    [H, S, S, S, S, S, H, H, H, H],
    [H, S, S, S, S, S, H, H, H, H],
    [H, S, S, S, S, S, H, H, H, H],
    [H, S, S, S, S, S, H, H, H, H], // 16
];

/// Above this true count, 16 stands against a ten.
const TRUE_COUNT_DEVIATION: f64 = 2.0;
const STAND_ON_BUST_PROBABILITY: f64 = 0.6;
const STAND_ON_DEALER_BUST_PROBABILITY: f64 = 0.5;

/// Probabilities behind a recommendation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Analysis {
    pub decision: Decision,
    pub bust_probability: f64,
    pub dealer_bust_probability: f64,
}

/// Basic strategy plus the count and probability based deviations.
#[derive(Debug, Clone)]
pub struct StrategyEngine {
    dealer_trials: u32,
}

impl StrategyEngine {
    pub fn new(rule: &Rule) -> StrategyEngine {
        StrategyEngine {
            dealer_trials: rule.dealer_trials,
        }
    }

    /// Count-free chart lookup. Pairs use the pair chart, other two card 9, 10
    /// and 11 use the double chart, everything else the hard totals.
    pub fn basic_strategy(&self, hand: &Hand, up_card: Card) -> Decision {
        let col = (up_card.hard_value() - 1) as usize;
        if hand.can_split() {
            let row = (hand.cards()[0].hard_value() - 1) as usize;
            return PAIR_CHART[row][col];
        }

        let total = hand.value();
        if hand.len() == 2 && (9..=11).contains(&total) {
            return DOUBLE_CHART[(total - 9) as usize][col];
        }
        match total {
            0..=11 => Decision::Hit,
            12..=16 => HARD_CHART[(total - 12) as usize][col],
            _ => Decision::Stand,
        }
    }

    pub fn bust_probability(&self, hand: &Hand, shoe: &Shoe) -> f64 {
        bust_probability(hand, shoe.get_card_count())
    }

    pub fn simulate_dealer_bust(&self, up_card: Card, table: &mut TableContext) -> f64 {
        simulate_dealer_bust(
            up_card,
            table.shoe.get_card_count(),
            self.dealer_trials,
            &mut table.rng,
        )
    }

    /// The first matching rule wins: a high count stands 16 against a ten,
    /// then a likely bust stands, then a likely dealer bust stands on 12 or
    /// more, and basic strategy decides the rest. The dealer is only simulated
    /// when that rule can fire.
    pub fn recommend(&self, hand: &Hand, up_card: Card, table: &mut TableContext) -> Decision {
        let bust_probability = self.bust_probability(hand, &table.shoe);
        let true_count = table.counter.true_count();
        self.choose(hand, up_card, true_count, bust_probability, || {
            self.simulate_dealer_bust(up_card, table)
        })
    }

    /// Same decision as `recommend`, reported together with both probabilities.
    pub fn analyze(&self, hand: &Hand, up_card: Card, table: &mut TableContext) -> Analysis {
        let bust_probability = self.bust_probability(hand, &table.shoe);
        let dealer_bust_probability = self.simulate_dealer_bust(up_card, table);
        let decision = self.choose(
            hand,
            up_card,
            table.counter.true_count(),
            bust_probability,
            || dealer_bust_probability,
        );
        Analysis {
            decision,
            bust_probability,
            dealer_bust_probability,
        }
    }

    fn choose<F: FnOnce() -> f64>(
        &self,
        hand: &Hand,
        up_card: Card,
        true_count: f64,
        bust_probability: f64,
        dealer_bust_probability: F,
    ) -> Decision {
        let value = hand.value();
        if true_count > TRUE_COUNT_DEVIATION && value == 16 && up_card.value() == 10 {
            Decision::Stand
        } else if bust_probability > STAND_ON_BUST_PROBABILITY {
            Decision::Stand
        } else if value >= 12 && dealer_bust_probability() > STAND_ON_DEALER_BUST_PROBABILITY {
            Decision::Stand
        } else {
            self.basic_strategy(hand, up_card)
        }
    }
}
