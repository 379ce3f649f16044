use tracing::info;

use crate::{strategy::Analysis, BlackjackError, Rule};

use super::{
    hand::Hand, player::PlayerState, table::TableContext, Card, RoundEventHandler, RoundSimulator,
};

/// Bankroll after every round, one series per seat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignResult {
    pub bankrolls: Vec<Vec<f64>>,
}

impl CampaignResult {
    pub fn final_bankrolls(&self) -> Vec<Option<f64>> {
        self.bankrolls
            .iter()
            .map(|series| series.last().copied())
            .collect()
    }
}

/// Repeats rounds at one table. A campaign owns its table, so independent
/// campaigns never share a shoe or a counter.
pub struct Campaign {
    table: TableContext,
    simulator: RoundSimulator,
    players: Vec<PlayerState>,
}

impl Campaign {
    pub fn new(
        rule: &Rule,
        players: Vec<PlayerState>,
        seed: Option<u64>,
    ) -> Result<Campaign, BlackjackError> {
        rule.validate()?;
        if players.is_empty() {
            return Err(BlackjackError::InvalidConfig(String::from(
                "a campaign needs at least one seat",
            )));
        }
        if players.len() > super::MAX_SEATS {
            return Err(BlackjackError::InvalidConfig(format!(
                "number of seats cannot exceed {}",
                super::MAX_SEATS
            )));
        }
        Ok(Campaign {
            table: TableContext::new(rule, seed),
            simulator: RoundSimulator::new(rule),
            players,
        })
    }

    /// Plays the given number of rounds. Stops at the first error, which can
    /// only come from an exhausted shoe or a broken phase order.
    pub fn run<U: RoundEventHandler>(
        &mut self,
        number_of_rounds: u32,
        handler: &mut U,
    ) -> Result<CampaignResult, BlackjackError> {
        info!(
            rounds = number_of_rounds,
            seats = self.players.len(),
            "campaign started"
        );
        let mut result = CampaignResult {
            bankrolls: vec![Vec::with_capacity(number_of_rounds as usize); self.players.len()],
        };

        for round in 0..number_of_rounds {
            handler.on_round_begin(round, &self.table.shoe);
            self.simulator
                .play_round(&mut self.table, &mut self.players, handler)?;
            for (series, player) in result.bankrolls.iter_mut().zip(&self.players) {
                series.push(player.bankroll());
            }
            handler.on_round_end(round, &self.players);
        }

        info!(
            running_count = self.table.counter.running_count(),
            true_count = self.table.counter.true_count(),
            "campaign finished"
        );
        Ok(result)
    }

    /// Analyzes a hand against the table as it currently stands. The dealer
    /// simulation draws from the table's random source but never from its shoe.
    pub fn analyze(&mut self, hand: &Hand, up_card: Card) -> Analysis {
        self.simulator.engine().analyze(hand, up_card, &mut self.table)
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn table(&self) -> &TableContext {
        &self.table
    }
}
