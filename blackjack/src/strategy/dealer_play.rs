use rand::Rng;

use crate::{
    simulation::{hand::Hand, Card},
    CardCount,
};

/// Exact share of the remaining cards that would bust `hand` if drawn.
///
/// Soft hands fall back to counting the Ace as 1, so a card busts exactly
/// when the hard total plus its hard value exceeds 21.
pub fn bust_probability(hand: &Hand, remaining: &CardCount) -> f64 {
    if hand.is_bust() {
        return 1.0;
    }
    if remaining.get_total() == 0 {
        return 0.0;
    }

    let hard_total = hand.hard_total();
    let busting: u32 = (1..=10u8)
        .filter(|&card_value| hard_total + card_value as u32 > 21)
        .map(|card_value| remaining[card_value] as u32)
        .sum();
    busting as f64 / remaining.get_total() as f64
}

/// Monte Carlo estimate of the dealer busting from the given up card.
///
/// Every trial draws from its own copy of `remaining`: cards are not replaced
/// within a trial, and the copy is restored for the next one. The live shoe
/// is never touched. A trial that empties its copy stops drawing and counts as
/// no bust.
pub fn simulate_dealer_bust<R: Rng + ?Sized>(
    up_card: Card,
    remaining: &CardCount,
    trials: u32,
    rng: &mut R,
) -> f64 {
    if trials == 0 {
        return 0.0;
    }

    let mut busts = 0u32;
    for _ in 0..trials {
        let mut shoe = *remaining;
        let mut dealer = CardCount::default();
        dealer.add_card(up_card.hard_value());

        while dealer.get_actual_sum() < 17 && shoe.get_total() > 0 {
            let nth = rng.gen_range(0..shoe.get_total());
            let Some(card_value) = shoe.nth_card_value(nth) else {
                break;
            };
            shoe.remove_card(card_value);
            dealer.add_card(card_value);
        }

        if dealer.bust() {
            busts += 1;
        }
    }

    busts as f64 / trials as f64
}
