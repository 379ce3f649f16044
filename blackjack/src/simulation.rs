pub mod campaign;
pub mod hand;
pub mod player;
pub mod shoe;
pub mod table;

use std::str::FromStr;

use crate::{
    counting::CardCounter, policy::DecisionPoint, strategy::StrategyEngine, BlackjackError,
    Decision, Rule,
};
use blackjack_macros::allowed_phase;
use strum_macros::EnumIter;
use tracing::{debug, trace, warn};

use self::{
    hand::{Hand, SeatHands},
    player::PlayerState,
    shoe::Shoe,
    table::TableContext,
};

static FACE_VALUE_TO_BLACKJACK_VALUE: [u8; 13] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10];
static FACE_VALUE_TO_RANK: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];
pub const MAX_SEATS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Suit {
    Diamond = 0,
    Club,
    Heart,
    Spade,
}

impl Suit {
    pub fn symbol(&self) -> char {
        match self {
            Suit::Diamond => '♦',
            Suit::Club => '♣',
            Suit::Heart => '♥',
            Suit::Spade => '♠',
        }
    }

    /// Accepts both the suit symbol and its ASCII letter.
    pub fn from_char(c: char) -> Option<Suit> {
        match c {
            '♦' | 'D' | 'd' => Some(Suit::Diamond),
            '♣' | 'C' | 'c' => Some(Suit::Club),
            '♥' | 'H' | 'h' => Some(Suit::Heart),
            '♠' | 'S' | 's' => Some(Suit::Spade),
            _ => None,
        }
    }
}

/// Represents a card in the real world with a suit and a face value.
/// Face values run from 1 (Ace) to 13 (King).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    face_value: u8,
    suit: Suit,
}

impl Card {
    pub fn new(face_value: u8, suit: Suit) -> Result<Card, BlackjackError> {
        if face_value == 0 || face_value > 13 {
            return Err(BlackjackError::InvalidCard(format!(
                "face value {} is not in [1, 13]",
                face_value
            )));
        }
        Ok(Card { face_value, suit })
    }

    pub fn face_value(&self) -> u8 {
        self.face_value
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn is_ace(&self) -> bool {
        self.face_value == 1
    }

    /// Ace counts 11 and face cards count 10.
    pub fn value(&self) -> u8 {
        if self.is_ace() {
            11
        } else {
            self.hard_value()
        }
    }

    /// Same as `value` but Ace counts 1.
    pub fn hard_value(&self) -> u8 {
        FACE_VALUE_TO_BLACKJACK_VALUE[(self.face_value - 1) as usize]
    }

    pub fn rank(&self) -> &'static str {
        FACE_VALUE_TO_RANK[(self.face_value - 1) as usize]
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = BlackjackError;

    /// Parses `"A♠"`, `"10♥"`, `"KC"` or `"TD"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BlackjackError::InvalidCard(String::from(s));
        let s_trimmed = s.trim();
        let suit_char = s_trimmed.chars().last().ok_or_else(invalid)?;
        let suit = Suit::from_char(suit_char).ok_or_else(invalid)?;
        let rank = &s_trimmed[..s_trimmed.len() - suit_char.len_utf8()];
        let face_value = match rank {
            "A" | "a" => 1,
            "T" | "t" => 10,
            "J" | "j" => 11,
            "Q" | "q" => 12,
            "K" | "k" => 13,
            _ => match rank.parse::<u8>() {
                Ok(n) if (2..=10).contains(&n) => n,
                _ => return Err(invalid()),
            },
        };
        Card::new(face_value, suit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Deal,
    PlayerTurn,
    DealerTurn,
    Settle,
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOutcome {
    Win,
    Lose,
    Push,
}

/// Plays rounds at one table. The simulator owns the per-round hands; the
/// shoe and the counter live in the `TableContext` passed to each step.
pub struct RoundSimulator {
    rule: Rule,
    engine: StrategyEngine,

    // Round state
    current_phase: RoundPhase,
    dealer_hand: Hand,
    seats: Vec<SeatHands>,
}

impl RoundSimulator {
    pub fn new(rule: &Rule) -> Self {
        RoundSimulator {
            rule: *rule,
            engine: StrategyEngine::new(rule),
            current_phase: RoundPhase::Deal,
            dealer_hand: Hand::new(),
            seats: Vec::new(),
        }
    }

    /// Plays one full round: deal, every seat's turn, dealer's turn,
    /// settlement and the count update.
    pub fn play_round<U: RoundEventHandler>(
        &mut self,
        table: &mut TableContext,
        players: &mut [PlayerState],
        handler: &mut U,
    ) -> Result<(), BlackjackError> {
        self.deal_initial_cards(table, players, handler)?;
        self.play_seats(table, players, handler)?;
        self.dealer_plays(table)?;
        self.settle(players, handler)?;
        self.update_count(table)?;
        Ok(())
    }

    /// Can be called at Deal phase.
    /// Reshuffles if the shoe runs low, then deals two cards to each seat and
    /// one (European rules) or two (American rules) to the dealer.
    #[allowed_phase(Deal)]
    pub fn deal_initial_cards<U: RoundEventHandler>(
        &mut self,
        table: &mut TableContext,
        players: &[PlayerState],
        handler: &mut U,
    ) -> Result<(), BlackjackError> {
        if players.len() > MAX_SEATS {
            return Err(BlackjackError::InvalidConfig(format!(
                "number of seats cannot exceed {}",
                MAX_SEATS
            )));
        }
        if table.reshuffle_if_necessary(self.rule.reshuffle_threshold) {
            handler.on_reshuffle(&table.shoe, &table.counter);
        }

        self.dealer_hand.clear();
        self.seats = players
            .iter()
            .map(|player| SeatHands::new(player.bet_size()))
            .collect();

        for pass in 0..2 {
            for seat in self.seats.iter_mut() {
                let card = table.draw()?;
                seat.receive_card(0, card);
            }
            if pass == 0 || !self.rule.european_rules {
                let card = table.draw()?;
                self.dealer_hand.receive_card(card);
            }
        }

        handler.on_deal(self.dealer_up_card()?);
        self.current_phase = RoundPhase::PlayerTurn;
        Ok(())
    }

    /// Can be called at PlayerTurn phase.
    /// Plays every hand of every seat, including hands created by splits.
    #[allowed_phase(PlayerTurn)]
    pub fn play_seats<U: RoundEventHandler>(
        &mut self,
        table: &mut TableContext,
        players: &[PlayerState],
        handler: &mut U,
    ) -> Result<(), BlackjackError> {
        for (seat, player) in players.iter().enumerate() {
            let mut hand_index = 0;
            while hand_index < self.seats[seat].get_number_of_hands() {
                self.play_hand(seat, hand_index, table, player, handler)?;
                hand_index += 1;
            }
        }

        self.current_phase = RoundPhase::DealerTurn;
        Ok(())
    }

    /// Can be called at DealerTurn phase.
    /// Dealer draws (the hole card first under European rules) until reaching 17.
    #[allowed_phase(DealerTurn)]
    pub fn dealer_plays(&mut self, table: &mut TableContext) -> Result<(), BlackjackError> {
        if self.rule.european_rules {
            let card = table.draw()?;
            self.dealer_hand.receive_card(card);
        }
        while self.dealer_hand.value() < 17 {
            let card = table.draw()?;
            self.dealer_hand.receive_card(card);
        }

        self.current_phase = RoundPhase::Settle;
        Ok(())
    }

    /// Can be called at Settle phase.
    /// Settles every hand independently against the dealer and updates the
    /// bankrolls.
    #[allowed_phase(Settle)]
    pub fn settle<U: RoundEventHandler>(
        &mut self,
        players: &mut [PlayerState],
        handler: &mut U,
    ) -> Result<(), BlackjackError> {
        let dealer_value = self.dealer_hand.value();
        let dealer_bust = self.dealer_hand.is_bust();

        for (seat, player) in players.iter_mut().enumerate() {
            let seat_hands = &self.seats[seat];
            for hand_index in 0..seat_hands.get_number_of_hands() {
                let hand = seat_hands.get_hand(hand_index);
                let bet = seat_hands.get_bet(hand_index);
                let outcome = if hand.is_bust() {
                    HandOutcome::Lose
                } else if dealer_bust || hand.value() > dealer_value {
                    HandOutcome::Win
                } else if hand.value() < dealer_value {
                    HandOutcome::Lose
                } else {
                    HandOutcome::Push
                };
                let delta = match outcome {
                    HandOutcome::Win => bet,
                    HandOutcome::Lose => -bet,
                    HandOutcome::Push => 0.0,
                };
                player.settle(delta);
                handler.on_settle(seat, hand_index, outcome, bet, delta);
            }
        }

        self.current_phase = RoundPhase::Count;
        Ok(())
    }

    /// Can be called at Count phase.
    /// Every card dealt this round is shown to the counter exactly once.
    #[allowed_phase(Count)]
    pub fn update_count(&mut self, table: &mut TableContext) -> Result<(), BlackjackError> {
        for card in self.dealt_cards() {
            table.counter.update(card);
        }

        self.current_phase = RoundPhase::Deal;
        Ok(())
    }

    pub fn engine(&self) -> &StrategyEngine {
        &self.engine
    }

    pub fn current_phase(&self) -> RoundPhase {
        self.current_phase
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer_hand
    }

    pub fn seat_hands(&self, seat: usize) -> &SeatHands {
        &self.seats[seat]
    }

    pub fn get_number_of_seats(&self) -> usize {
        self.seats.len()
    }

    /// All cards on the table this round: dealer's first, then seat by seat.
    pub fn dealt_cards(&self) -> Vec<Card> {
        let mut cards = self.dealer_hand.cards().to_vec();
        for seat in &self.seats {
            for hand_index in 0..seat.get_number_of_hands() {
                cards.extend_from_slice(seat.get_hand(hand_index).cards());
            }
        }
        cards
    }

    fn dealer_up_card(&self) -> Result<Card, BlackjackError> {
        self.dealer_hand
            .cards()
            .first()
            .copied()
            .ok_or(BlackjackError::EmptyShoe)
    }

    fn play_hand<U: RoundEventHandler>(
        &mut self,
        seat: usize,
        hand_index: usize,
        table: &mut TableContext,
        player: &PlayerState,
        handler: &mut U,
    ) -> Result<(), BlackjackError> {
        let up_card = self.dealer_up_card()?;
        let split_cap = self.rule.split_cap;

        loop {
            let seat_hands = &self.seats[seat];
            let hand = seat_hands.get_hand(hand_index);
            if hand.is_bust() {
                handler.on_player_bust(seat, hand_index);
                return Ok(());
            }

            let recommendation = self.engine.recommend(hand, up_card, table);
            let point = DecisionPoint {
                hand_value: hand.value(),
                up_card_value: up_card.value(),
                true_count: table.counter.true_count(),
                can_double: hand.len() == 2,
                can_split: seat_hands.can_split(hand_index, split_cap),
            };
            let requested = player.policy().decide(recommendation, &point, &mut table.rng);
            let decision = match seat_hands.check_decision(hand_index, requested, split_cap) {
                Ok(decision) => decision,
                Err(BlackjackError::IllegalAction(illegal)) => {
                    warn!(seat, hand_index, requested = %illegal, "illegal action, hitting instead");
                    handler.on_illegal_action(seat, hand_index, illegal);
                    Decision::Hit
                }
                Err(err) => return Err(err),
            };
            trace!(seat, hand_index, %decision, hand_value = hand.value(), "decision");
            handler.on_make_decision(seat, hand_index, decision);

            match decision {
                Decision::Stand => return Ok(()),
                Decision::Hit => {
                    let card = table.draw()?;
                    self.seats[seat].receive_card(hand_index, card);
                }
                Decision::Double => {
                    let card = table.draw()?;
                    let seat_hands = &mut self.seats[seat];
                    seat_hands.double_down(hand_index);
                    seat_hands.receive_card(hand_index, card);
                    if seat_hands.get_hand(hand_index).is_bust() {
                        handler.on_player_bust(seat, hand_index);
                    }
                    return Ok(());
                }
                Decision::Split => {
                    let new_index = self.seats[seat].split_hand(hand_index);
                    let card = table.draw()?;
                    self.seats[seat].receive_card(hand_index, card);
                    let card = table.draw()?;
                    self.seats[seat].receive_card(new_index, card);
                    debug!(seat, hand_index, new_index, "split");
                    handler.on_split(seat, &self.seats[seat]);
                }
            }
        }
    }
}

/// Receives the events of a round as it is played. Every method defaults to
/// doing nothing.
pub trait RoundEventHandler {
    fn on_round_begin(&mut self, _round: u32, _shoe: &Shoe) {}
    fn on_reshuffle(&mut self, _shoe: &Shoe, _counter: &CardCounter) {}
    fn on_deal(&mut self, _dealer_up_card: Card) {}
    fn on_make_decision(&mut self, _seat: usize, _hand_index: usize, _decision: Decision) {}
    fn on_illegal_action(&mut self, _seat: usize, _hand_index: usize, _requested: Decision) {}
    fn on_split(&mut self, _seat: usize, _seat_hands: &SeatHands) {}
    fn on_player_bust(&mut self, _seat: usize, _hand_index: usize) {}
    fn on_settle(
        &mut self,
        _seat: usize,
        _hand_index: usize,
        _outcome: HandOutcome,
        _bet: f64,
        _delta: f64,
    ) {
    }
    fn on_round_end(&mut self, _round: u32, _players: &[PlayerState]) {}
}

impl RoundEventHandler for () {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{DecisionPolicy, DecisionSource};
    use crate::CountingSystem;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn perfect_player() -> PlayerState {
        PlayerState::new(
            1000.0,
            10.0,
            DecisionPolicy::new(1.0, DecisionSource::Strategy).unwrap(),
        )
        .unwrap()
    }

    fn random_player() -> PlayerState {
        PlayerState::new(
            1000.0,
            10.0,
            DecisionPolicy::new(0.0, DecisionSource::Strategy).unwrap(),
        )
        .unwrap()
    }

    fn stacked_table(rule: &Rule, firsts: &[&str]) -> TableContext {
        let mut table = TableContext::new(rule, Some(7));
        let firsts: Vec<Card> = firsts.iter().map(|s| card(s)).collect();
        table.shoe.shuffle_with_firsts(&firsts, &mut table.rng).unwrap();
        table
    }

    #[derive(Default)]
    struct Recorder {
        deltas: Vec<(usize, f64)>,
        bets: Vec<f64>,
        illegal: Vec<Decision>,
        splits: usize,
        reshuffles: Vec<(usize, i32)>,
    }

    impl RoundEventHandler for Recorder {
        fn on_reshuffle(&mut self, shoe: &Shoe, counter: &CardCounter) {
            self.reshuffles.push((shoe.remaining(), counter.running_count()));
        }

        fn on_illegal_action(&mut self, _: usize, _: usize, requested: Decision) {
            self.illegal.push(requested);
        }

        fn on_split(&mut self, _: usize, _: &SeatHands) {
            self.splits += 1;
        }

        fn on_settle(&mut self, seat: usize, _: usize, _: HandOutcome, bet: f64, delta: f64) {
            self.bets.push(bet);
            self.deltas.push((seat, delta));
        }
    }

    #[test]
    fn card_parsing() {
        let ace = card("A♦");
        assert_eq!(ace.value(), 11);
        assert_eq!(ace.hard_value(), 1);
        assert_eq!(ace.suit(), Suit::Diamond);
        assert_eq!(card("10♠").value(), 10);
        assert_eq!(card("KC").value(), 10);
        assert_eq!(card("TD").face_value(), 10);
        assert_eq!(card("7h").to_string(), "7♥");
        assert!("1♠".parse::<Card>().is_err());
        assert!("11♠".parse::<Card>().is_err());
        assert!("AX".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
        assert!(Card::new(14, Suit::Club).is_err());
        assert!(Card::new(0, Suit::Club).is_err());
    }

    #[test]
    fn test_allowed_phase() {
        let rule = Rule::default();
        let mut simulator = RoundSimulator::new(&rule);
        let mut table = TableContext::new(&rule, Some(1));
        assert_eq!(simulator.current_phase(), RoundPhase::Deal);
        assert!(matches!(
            simulator.dealer_plays(&mut table),
            Err(BlackjackError::WrongPhase {
                expected: RoundPhase::DealerTurn,
                actual: RoundPhase::Deal,
                ..
            })
        ));
        let players = vec![perfect_player()];
        assert!(simulator
            .deal_initial_cards(&mut table, &players, &mut ())
            .is_ok());
        assert_eq!(simulator.current_phase(), RoundPhase::PlayerTurn);
        assert!(simulator
            .deal_initial_cards(&mut table, &players, &mut ())
            .is_err());
    }

    #[test]
    fn american_and_european_deal() {
        let players = vec![perfect_player(), perfect_player()];

        let rule = Rule::default();
        let mut table = TableContext::new(&rule, Some(3));
        let mut simulator = RoundSimulator::new(&rule);
        simulator
            .deal_initial_cards(&mut table, &players, &mut ())
            .unwrap();
        assert_eq!(simulator.dealer_hand().len(), 2);
        assert_eq!(simulator.seat_hands(1).get_hand(0).len(), 2);
        assert_eq!(table.shoe.remaining(), 312 - 6);

        let rule = Rule {
            european_rules: true,
            ..Default::default()
        };
        let mut table = TableContext::new(&rule, Some(3));
        let mut simulator = RoundSimulator::new(&rule);
        simulator
            .deal_initial_cards(&mut table, &players, &mut ())
            .unwrap();
        assert_eq!(simulator.dealer_hand().len(), 1);
        assert_eq!(table.shoe.remaining(), 312 - 5);
        simulator.play_seats(&mut table, &players, &mut ()).unwrap();
        simulator.dealer_plays(&mut table).unwrap();
        assert!(simulator.dealer_hand().len() >= 2);
        assert!(simulator.dealer_hand().value() >= 17);
    }

    #[test]
    fn player_wins_against_dealer_bust() {
        // Deal order: seat, dealer, seat, dealer hole, then draws.
        let rule = Rule::default();
        let mut table = stacked_table(&rule, &["10♠", "6♦", "Q♥", "10♣", "K♦"]);
        let mut players = vec![perfect_player()];
        let mut simulator = RoundSimulator::new(&rule);
        let mut recorder = Recorder::default();
        simulator
            .play_round(&mut table, &mut players, &mut recorder)
            .unwrap();

        // 20 stands; dealer 16 draws a King and busts.
        assert_eq!(simulator.dealer_hand().value(), 26);
        assert_eq!(recorder.deltas, vec![(0, 10.0)]);
        assert_eq!(players[0].bankroll(), 1010.0);
        assert_eq!(players[0].bet_size(), 10.0);
        assert_eq!(simulator.current_phase(), RoundPhase::Deal);
    }

    #[test]
    fn doubled_eleven_wins_twice_the_bet() {
        // 6-5 against a 6 doubles, draws a ten, and the dealer 16 busts.
        let rule = Rule::default();
        let mut table = stacked_table(&rule, &["6♠", "6♦", "5♥", "10♣", "10♠", "10♥"]);
        let mut players = vec![perfect_player()];
        let mut simulator = RoundSimulator::new(&rule);
        let mut recorder = Recorder::default();
        simulator
            .play_round(&mut table, &mut players, &mut recorder)
            .unwrap();

        assert!(simulator.seat_hands(0).is_doubled(0));
        assert_eq!(simulator.seat_hands(0).get_hand(0).value(), 21);
        assert_eq!(simulator.dealer_hand().value(), 26);
        assert_eq!(recorder.bets, vec![20.0]);
        assert_eq!(recorder.deltas, vec![(0, 20.0)]);
        assert_eq!(players[0].bankroll(), 1020.0);
        assert_eq!(players[0].bet_size(), 10.0);
    }

    #[test]
    fn push_leaves_bankroll() {
        let rule = Rule::default();
        let mut table = stacked_table(&rule, &["10♠", "9♦", "K♥", "A♣"]);
        let mut players = vec![perfect_player()];
        let mut simulator = RoundSimulator::new(&rule);
        simulator.play_round(&mut table, &mut players, &mut ()).unwrap();
        // 20 against a soft 20.
        assert_eq!(simulator.dealer_hand().value(), 20);
        assert_eq!(players[0].bankroll(), 1000.0);
    }

    #[test]
    fn every_dealt_card_is_counted_once() {
        let rule = Rule::default();
        let mut table = stacked_table(&rule, &["2♠", "5♦", "3♥", "K♣", "4♦"]);
        let mut players = vec![perfect_player()];
        let mut simulator = RoundSimulator::new(&rule);
        simulator.play_round(&mut table, &mut players, &mut ()).unwrap();

        let dealt = simulator.dealt_cards();
        assert_eq!(dealt.len(), 312 - table.shoe.remaining());
        let expected: i32 = dealt
            .iter()
            .map(|c| CountingSystem::HiLo.tag(*c))
            .sum();
        assert_eq!(table.counter.running_count(), expected);
        assert_eq!(table.counter.cards_seen(), dealt.len() as u32);
    }

    #[test]
    fn reshuffle_keeps_the_count() {
        let rule = Rule::default();
        let mut table = TableContext::new(&rule, Some(11));
        for _ in 0..270 {
            let card = table.draw().unwrap();
            table.counter.update(card);
        }
        let running_count = table.counter.running_count();
        let true_count = table.counter.true_count();
        assert!(table.shoe.remaining() < 52);

        let players = vec![perfect_player()];
        let mut simulator = RoundSimulator::new(&rule);
        let mut recorder = Recorder::default();
        simulator
            .deal_initial_cards(&mut table, &players, &mut recorder)
            .unwrap();
        assert_eq!(recorder.reshuffles, vec![(312, running_count)]);
        assert_eq!(table.counter.running_count(), running_count);
        assert_eq!(table.counter.true_count(), true_count);
        assert_eq!(table.shoe.remaining(), 312 - 4);
    }

    #[test]
    fn split_aces_fan_out() {
        // Seat holds A-A against a dealer 5; the dealer bust estimate stays
        // well below 0.5 so perfect play falls through to splitting Aces.
        let rule = Rule {
            split_cap: 2,
            ..Default::default()
        };
        let mut table = stacked_table(
            &rule,
            &["A♠", "5♦", "A♥", "10♣", "A♦", "A♣", "9♠", "9♥"],
        );
        let players = vec![perfect_player()];
        let mut simulator = RoundSimulator::new(&rule);
        let mut recorder = Recorder::default();
        simulator
            .deal_initial_cards(&mut table, &players, &mut recorder)
            .unwrap();
        simulator
            .play_seats(&mut table, &players, &mut recorder)
            .unwrap();

        let seat_hands = simulator.seat_hands(0);
        assert_eq!(recorder.splits, 1);
        assert_eq!(seat_hands.get_number_of_hands(), 2);
        // Both hands got exactly one supplemental card: A-A and A-A again,
        // and the cap stops a further split, downgrading it to Hit.
        assert_eq!(seat_hands.get_hand(0).cards()[0], card("A♠"));
        assert_eq!(seat_hands.get_hand(0).cards()[1], card("A♦"));
        assert_eq!(seat_hands.get_hand(1).cards()[0], card("A♥"));
        assert_eq!(seat_hands.get_hand(1).cards()[1], card("A♣"));
        assert_eq!(recorder.illegal, vec![Decision::Split, Decision::Split]);
        assert_eq!(seat_hands.get_hand(0).value(), 21);
        assert_eq!(seat_hands.get_hand(1).value(), 21);
    }

    #[test]
    fn settlement_deltas_are_bounded() {
        let rule = Rule {
            dealer_trials: 50,
            ..Default::default()
        };
        let mut table = TableContext::new(&rule, Some(2024));
        let mut players = vec![random_player(), random_player(), perfect_player()];
        let mut simulator = RoundSimulator::new(&rule);
        let mut recorder = Recorder::default();
        for _ in 0..300 {
            let before: Vec<f64> = players.iter().map(|p| p.bankroll()).collect();
            recorder.deltas.clear();
            simulator
                .play_round(&mut table, &mut players, &mut recorder)
                .unwrap();
            for &(_, delta) in &recorder.deltas {
                assert!([-20.0, -10.0, 0.0, 10.0, 20.0].contains(&delta));
            }
            for (seat, player) in players.iter().enumerate() {
                let sum: f64 = recorder
                    .deltas
                    .iter()
                    .filter(|(s, _)| *s == seat)
                    .map(|(_, d)| d)
                    .sum();
                assert_eq!(player.bankroll(), before[seat] + sum);
                assert_eq!(player.bet_size(), 10.0);
            }
        }
    }

    #[test]
    fn too_many_seats() {
        let rule = Rule::default();
        let mut table = TableContext::new(&rule, Some(5));
        let players: Vec<PlayerState> = (0..MAX_SEATS + 1).map(|_| perfect_player()).collect();
        let mut simulator = RoundSimulator::new(&rule);
        assert!(simulator
            .deal_initial_cards(&mut table, &players, &mut ())
            .is_err());
    }
}
