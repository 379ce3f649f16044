use std::fs;
use std::path::Path;

use self::private::Statistics;
use anyhow::Context;
use blackjack::counting::CardCounter;
use blackjack::simulation::hand::{Hand, SeatHands};
use blackjack::simulation::player::PlayerState;
use blackjack::simulation::shoe::Shoe;
use blackjack::simulation::{Card, HandOutcome, RoundEventHandler};
use blackjack::Decision;
use blackjack_drivers::Config;
use serde::Serialize;
use tracing::{debug, info};

mod private {
    use blackjack::simulation::HandOutcome;

    #[derive(Debug, Clone, Copy, Default)]
    pub struct Statistics {
        wins: u32,
        losses: u32,
        pushes: u32,
        doubles: u32,
        splits: u32,
        busts: u32,
        illegal_actions: u32,

        total_bet: f64,
        min_bankroll: Option<f64>,
    }

    impl Statistics {
        pub fn settle(&mut self, outcome: HandOutcome, bet: f64) {
            match outcome {
                HandOutcome::Win => self.wins += 1,
                HandOutcome::Lose => self.losses += 1,
                HandOutcome::Push => self.pushes += 1,
            }
            self.total_bet += bet;
        }

        pub fn double(&mut self) {
            self.doubles += 1;
        }

        pub fn split(&mut self) {
            self.splits += 1;
        }

        pub fn bust(&mut self) {
            self.busts += 1;
        }

        pub fn illegal_action(&mut self) {
            self.illegal_actions += 1;
        }

        pub fn observe_bankroll(&mut self, bankroll: f64) {
            self.min_bankroll = Some(self.min_bankroll.map_or(bankroll, |min| min.min(bankroll)));
        }

        pub fn get_hands(&self) -> u32 {
            self.wins + self.losses + self.pushes
        }

        pub fn get_win_rate(&self) -> f64 {
            if self.get_hands() == 0 {
                return 0.0;
            }
            self.wins as f64 / self.get_hands() as f64
        }

        pub fn get_total_bet(&self) -> f64 {
            self.total_bet
        }

        pub fn get_min_bankroll(&self) -> Option<f64> {
            self.min_bankroll
        }

        pub fn get_counts(&self) -> [u32; 7] {
            [
                self.wins,
                self.losses,
                self.pushes,
                self.doubles,
                self.splits,
                self.busts,
                self.illegal_actions,
            ]
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Handler {
    rounds: u32,
    reshuffles: u32,
    stats: Vec<Statistics>,
}

impl Handler {
    fn stat(&mut self, seat: usize) -> &mut Statistics {
        if self.stats.len() <= seat {
            self.stats.resize(seat + 1, Statistics::default());
        }
        &mut self.stats[seat]
    }
}

impl RoundEventHandler for Handler {
    fn on_round_begin(&mut self, _: u32, _: &Shoe) {
        self.rounds += 1;
    }

    fn on_reshuffle(&mut self, shoe: &Shoe, counter: &CardCounter) {
        self.reshuffles += 1;
        debug!(
            round = self.rounds,
            cards = shoe.remaining(),
            running_count = counter.running_count(),
            "shoe reshuffled"
        );
    }

    fn on_make_decision(&mut self, seat: usize, _: usize, decision: Decision) {
        if decision == Decision::Double {
            self.stat(seat).double();
        }
    }

    fn on_illegal_action(&mut self, seat: usize, _: usize, _: Decision) {
        self.stat(seat).illegal_action();
    }

    fn on_split(&mut self, seat: usize, _: &SeatHands) {
        self.stat(seat).split();
    }

    fn on_player_bust(&mut self, seat: usize, _: usize) {
        self.stat(seat).bust();
    }

    fn on_settle(&mut self, seat: usize, _: usize, outcome: HandOutcome, bet: f64, _: f64) {
        self.stat(seat).settle(outcome, bet);
    }

    fn on_round_end(&mut self, round: u32, players: &[PlayerState]) {
        for (seat, player) in players.iter().enumerate() {
            self.stat(seat).observe_bankroll(player.bankroll());
        }
        if (round + 1) % 1000 == 0 {
            info!(rounds = round + 1, reshuffles = self.reshuffles, "progress");
        }
    }
}

#[derive(Debug, Serialize)]
struct SeatReport {
    seat: usize,
    skill_level: f64,
    final_bankroll: Option<f64>,
    bankrolls: Vec<f64>,
}

/// Runs the configured campaign, prints a summary per seat and optionally
/// saves the bankroll series.
pub fn run_campaign(config: &Config, output: Option<&Path>) -> anyhow::Result<()> {
    let mut campaign = config.build_campaign()?;
    let mut handler = Handler::default();
    let result = campaign.run(config.campaign.number_of_rounds, &mut handler)?;

    let snapshot = campaign.table().counter.snapshot();
    println!(
        "{} rounds, {} reshuffles. Cards seen: {}. Running count: {}. True count: {:.2} ({:.2} decks remaining).",
        handler.rounds,
        handler.reshuffles,
        snapshot.cards_seen,
        snapshot.running_count,
        snapshot.true_count,
        snapshot.decks_remaining,
    );
    let sixteen = Hand::from_cards(&["10♠".parse::<Card>()?, "6♥".parse::<Card>()?]);
    let analysis = campaign.analyze(&sixteen, "10♦".parse::<Card>()?);
    println!(
        "16 against 10 now: {}. Bust {:.2}%, dealer bust {:.2}%.",
        analysis.decision,
        analysis.bust_probability * 100.0,
        analysis.dealer_bust_probability * 100.0,
    );
    for (seat, player) in campaign.players().iter().enumerate() {
        let stat = handler.stat(seat);
        let [wins, losses, pushes, doubles, splits, busts, illegal] = stat.get_counts();
        println!(
            "Seat {} (skill {:.2}): bankroll {:.2}, min {:.2}. Hands: {} ({} W / {} L / {} P, win rate {:.2}%). Total bet: {:.2}.",
            seat,
            player.skill_level(),
            player.bankroll(),
            stat.get_min_bankroll().unwrap_or(player.bankroll()),
            stat.get_hands(),
            wins,
            losses,
            pushes,
            stat.get_win_rate() * 100.0,
            stat.get_total_bet(),
        );
        println!(
            "    Doubles: {}. Splits: {}. Busts: {}. Illegal actions: {}.",
            doubles, splits, busts, illegal
        );
    }

    if let Some(path) = output {
        let reports: Vec<SeatReport> = result
            .bankrolls
            .iter()
            .zip(campaign.players())
            .enumerate()
            .map(|(seat, (series, player))| SeatReport {
                seat,
                skill_level: player.skill_level(),
                final_bankroll: series.last().copied(),
                bankrolls: series.clone(),
            })
            .collect();
        let content = serde_yaml::to_string(&reports)?;
        fs::write(path, content).with_context(|| format!("cannot write {}", path.display()))?;
        info!(path = %path.display(), "bankroll series saved");
    }

    Ok(())
}
