use crate::{BlackjackError, CardCount, Decision};

use super::Card;

/// An ordered sequence of cards held by one seat or by the dealer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hand {
    cards: Vec<Card>,
    card_count: CardCount,
}

impl Hand {
    pub fn new() -> Hand {
        Hand {
            cards: Vec::with_capacity(3),
            card_count: CardCount::default(),
        }
    }

    pub fn from_cards(cards: &[Card]) -> Hand {
        let mut hand = Hand::new();
        for card in cards {
            hand.receive_card(*card);
        }
        hand
    }

    pub fn receive_card(&mut self, card: Card) {
        self.cards.push(card);
        self.card_count.add_card(card.hard_value());
    }

    /// Removes the second card of a pair and returns it as a new hand.
    pub fn split_off(&mut self) -> Option<Hand> {
        if !self.can_split() {
            return None;
        }
        let card = self.cards.pop()?;
        self.card_count.remove_card(card.hard_value());
        Some(Hand::from_cards(&[card]))
    }

    /// Card values summed with every Ace at 11, then 10 taken off per Ace
    /// while the total exceeds 21.
    pub fn value(&self) -> u32 {
        self.card_count.get_actual_sum()
    }

    /// Sum counting every Ace as 1.
    pub fn hard_total(&self) -> u32 {
        self.card_count.get_sum()
    }

    /// Whether an Ace is currently counted as 11.
    pub fn is_soft(&self) -> bool {
        self.value() != self.hard_total()
    }

    pub fn is_bust(&self) -> bool {
        self.card_count.bust()
    }

    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value() == 21
    }

    /// Two cards of the same rank. A King and a Queen are not a pair.
    pub fn can_split(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].face_value() == self.cards[1].face_value()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get_card_count(&self) -> &CardCount {
        &self.card_count
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.card_count = CardCount::default();
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cards: Vec<String> = self.cards.iter().map(|card| card.to_string()).collect();
        write!(f, "{}", cards.join(", "))
    }
}

/// Represents all hands of one seat in a round. Holds more than 1 hand after splits.
#[derive(Debug, Clone)]
pub struct SeatHands {
    hand_bet_pairs: Vec<HandBetPair>,
}

impl SeatHands {
    pub fn new(bet: f64) -> SeatHands {
        SeatHands {
            hand_bet_pairs: vec![HandBetPair {
                hand: Hand::new(),
                bet,
                doubled: false,
            }],
        }
    }

    /// The given hand receives a given card.
    pub fn receive_card(&mut self, hand_index: usize, card: Card) {
        self.hand_bet_pairs[hand_index].hand.receive_card(card);
    }

    /// Splits the given hand. Its second card moves into a new hand that
    /// carries the same bet. Returns the index of the new hand.
    pub fn split_hand(&mut self, hand_index: usize) -> usize {
        let new_hand = self.hand_bet_pairs[hand_index]
            .hand
            .split_off()
            .unwrap_or_default();
        self.hand_bet_pairs.push(HandBetPair {
            hand: new_hand,
            bet: self.hand_bet_pairs[hand_index].bet,
            doubled: false,
        });
        self.hand_bet_pairs.len() - 1
    }

    /// Doubles down the given hand.
    pub fn double_down(&mut self, hand_index: usize) {
        let pair = &mut self.hand_bet_pairs[hand_index];
        pair.bet *= 2.0;
        pair.doubled = true;
    }

    pub fn can_split(&self, hand_index: usize, split_cap: u8) -> bool {
        self.hand_bet_pairs[hand_index].hand.can_split()
            && self.hand_bet_pairs.len() < split_cap as usize
    }

    /// Passes legal decisions through and rejects a Double on anything but
    /// two cards, or a Split on a non-pair or at the split cap.
    pub fn check_decision(
        &self,
        hand_index: usize,
        decision: Decision,
        split_cap: u8,
    ) -> Result<Decision, BlackjackError> {
        let legal = match decision {
            Decision::Hit | Decision::Stand => true,
            Decision::Double => self.hand_bet_pairs[hand_index].hand.len() == 2,
            Decision::Split => self.can_split(hand_index, split_cap),
        };
        if legal {
            Ok(decision)
        } else {
            Err(BlackjackError::IllegalAction(decision))
        }
    }

    pub fn get_number_of_hands(&self) -> usize {
        self.hand_bet_pairs.len()
    }

    pub fn get_hand(&self, hand_index: usize) -> &Hand {
        &self.hand_bet_pairs[hand_index].hand
    }

    pub fn get_bet(&self, hand_index: usize) -> f64 {
        self.hand_bet_pairs[hand_index].bet
    }

    pub fn is_doubled(&self, hand_index: usize) -> bool {
        self.hand_bet_pairs[hand_index].doubled
    }
}

#[derive(Debug, Clone)]
struct HandBetPair {
    hand: Hand,
    bet: f64,
    doubled: bool,
}
