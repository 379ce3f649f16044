use std::ops::Index;

/// This provides a container to store the numbers of each card value (from
/// 1 to 10 inclusive, Ace being 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardCount {
    counts: [u16; 10],
    sum: u32,
    total: u32,
}

impl CardCount {
    pub fn new(counts: &[u16; 10]) -> CardCount {
        let mut card_count = CardCount {
            counts: *counts,
            sum: 0,
            total: 0,
        };

        card_count.propagate_counts();

        card_count
    }

    pub fn with_number_of_decks(number_of_decks: u8) -> CardCount {
        let mut counts = [number_of_decks as u16 * 4; 10];
        counts[9] = number_of_decks as u16 * 16;
        Self::new(&counts)
    }

    /// Add a card of given card value.
    ///
    /// Note that this method won't check if the card value is valid.
    pub fn add_card(&mut self, card_value: u8) {
        let index = (card_value - 1) as usize;
        self.counts[index] += 1;
        self.sum += card_value as u32;
        self.total += 1;
    }

    /// Remove a card of given card value.
    ///
    /// Note that this method won't check if the card value is valid. It also
    /// won't check if the number of the given card value is already 0.
    pub fn remove_card(&mut self, card_value: u8) {
        let index = (card_value - 1) as usize;
        self.counts[index] -= 1;
        self.sum -= card_value as u32;
        self.total -= 1;
    }

    /// Note that this method treats Ace as 1.
    pub fn get_sum(&self) -> u32 {
        self.sum
    }

    pub fn get_total(&self) -> u32 {
        self.total
    }

    pub fn is_soft(&self) -> bool {
        self.counts[0] > 0
    }

    pub fn bust(&self) -> bool {
        self.sum > 21
    }

    /// The sum counting one Ace as 11 whenever that doesn't bust.
    pub fn get_actual_sum(&self) -> u32 {
        if self.is_soft() && self.sum + 10 <= 21 {
            self.sum + 10
        } else {
            self.sum
        }
    }

    /// Share of cards having the given card value. Returns 0 when empty.
    pub fn get_proportion(&self, card_value: u8) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self[card_value] as f64 / self.total as f64
    }

    /// Returns the card value found at position `nth` when the cards are laid
    /// out by ascending value. Used to pick a card uniformly by position.
    pub fn nth_card_value(&self, nth: u32) -> Option<u8> {
        let mut remaining = nth;
        for (i, &count) in self.counts.iter().enumerate() {
            let count = count as u32;
            if remaining < count {
                return Some((i + 1) as u8);
            }
            remaining -= count;
        }
        None
    }

    fn propagate_counts(&mut self) {
        self.sum = 0;
        self.total = 0;
        for i in 0..self.counts.len() {
            self.sum += ((i + 1) as u32) * self.counts[i] as u32;
            self.total += self.counts[i] as u32;
        }
    }
}

impl Index<u8> for CardCount {
    type Output = u16;
    fn index(&self, index: u8) -> &Self::Output {
        &self.counts[(index - 1) as usize]
    }
}
