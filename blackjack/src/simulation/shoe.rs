use crate::{BlackjackError, CardCount};

use super::{Card, Suit};

use strum::IntoEnumIterator;

use rand::seq::SliceRandom;
use rand::Rng;

/// Represents a shoe in the real world. Cards are dealt from the back of
/// `cards`, so the last element is the next card.
#[derive(Debug, Clone)]
pub struct Shoe {
    number_of_decks: u8,
    cards: Vec<Card>,
    card_count: CardCount,
}

impl Shoe {
    /// Creates a new full shoe with ordered cards.
    pub fn new(number_of_decks: u8) -> Shoe {
        Shoe {
            number_of_decks,
            cards: ordered_cards(number_of_decks),
            card_count: CardCount::with_number_of_decks(number_of_decks),
        }
    }

    /// Returns all dealt cards back into the shoe and shuffles.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards = ordered_cards(self.number_of_decks);
        self.card_count = CardCount::with_number_of_decks(self.number_of_decks);
        self.cards.shuffle(rng);
    }

    /// Returns the dealt cards back into the shoe, and shuffles. This method makes sure the given
    /// cards will be dealt first, in the given order. Fails if a fresh shoe cannot supply them.
    pub fn shuffle_with_firsts<R: Rng + ?Sized>(
        &mut self,
        firsts: &[Card],
        rng: &mut R,
    ) -> Result<(), BlackjackError> {
        let mut rest = ordered_cards(self.number_of_decks);
        for first in firsts {
            let position = rest.iter().position(|card| card == first).ok_or_else(|| {
                BlackjackError::InvalidCard(format!("{} is not left in the shoe", first))
            })?;
            rest.swap_remove(position);
        }
        rest.shuffle(rng);
        rest.extend(firsts.iter().rev());

        self.cards = rest;
        self.card_count = CardCount::with_number_of_decks(self.number_of_decks);
        Ok(())
    }

    /// Deals the next card. Fails with `EmptyShoe` when nothing is left.
    pub fn deal_card(&mut self) -> Result<Card, BlackjackError> {
        let card = self.cards.pop().ok_or(BlackjackError::EmptyShoe)?;
        self.card_count.remove_card(card.hard_value());
        Ok(card)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn capacity(&self) -> usize {
        self.number_of_decks as usize * 52
    }

    pub fn get_number_of_decks(&self) -> u8 {
        self.number_of_decks
    }

    /// Value histogram of the cards still in the shoe.
    pub fn get_card_count(&self) -> &CardCount {
        &self.card_count
    }
}

fn ordered_cards(number_of_decks: u8) -> Vec<Card> {
    let mut cards = Vec::with_capacity(number_of_decks as usize * 52);
    for _ in 0..number_of_decks {
        for suit in Suit::iter() {
            for face_value in 1..=13 {
                cards.push(Card { face_value, suit });
            }
        }
    }
    cards
}
