mod cardcount;
pub mod counting;
mod error;
pub mod policy;
pub mod simulation;
pub mod strategy;

use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};

pub use cardcount::CardCount;
pub use error::{BlackjackError, ClassifierError};

/// Lowest accepted reshuffle threshold. A round rarely needs more than one
/// deck, so the shoe is never drained between two reshuffle checks.
pub const MIN_RESHUFFLE_THRESHOLD: u16 = 52;

/// The configurable subset of table rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub number_of_decks: u8,
    pub counting_system: CountingSystem,
    /// Dealer's hole card is dealt after all players have played.
    pub european_rules: bool,
    /// Maximum number of hands a seat may hold after splitting.
    pub split_cap: u8,
    /// The shoe is reshuffled before a deal when fewer cards than this remain.
    pub reshuffle_threshold: u16,
    /// Number of Monte Carlo trials behind each dealer bust estimate.
    pub dealer_trials: u32,
}

impl Default for Rule {
    fn default() -> Self {
        Rule {
            number_of_decks: 6,
            counting_system: CountingSystem::HiLo,
            european_rules: false,
            split_cap: 4,
            reshuffle_threshold: 52,
            dealer_trials: 10000,
        }
    }
}

impl Rule {
    pub fn validate(&self) -> Result<(), BlackjackError> {
        if self.number_of_decks == 0 {
            return Err(BlackjackError::InvalidConfig(String::from(
                "number_of_decks must be at least 1",
            )));
        }
        if self.split_cap == 0 {
            return Err(BlackjackError::InvalidConfig(String::from(
                "split_cap must be at least 1",
            )));
        }
        if self.dealer_trials == 0 {
            return Err(BlackjackError::InvalidConfig(String::from(
                "dealer_trials must be at least 1",
            )));
        }
        if self.reshuffle_threshold < MIN_RESHUFFLE_THRESHOLD {
            return Err(BlackjackError::InvalidConfig(format!(
                "reshuffle_threshold must be at least {}, got {}",
                MIN_RESHUFFLE_THRESHOLD, self.reshuffle_threshold
            )));
        }
        if self.reshuffle_threshold as usize > self.number_of_decks as usize * 52 {
            return Err(BlackjackError::InvalidConfig(format!(
                "reshuffle_threshold {} exceeds the shoe size",
                self.reshuffle_threshold
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_enum_str, Deserialize_enum_str)]
pub enum CountingSystem {
    #[serde(rename = "Hi-Lo")]
    HiLo,
    #[serde(rename = "KO")]
    Ko,
    #[serde(rename = "Omega II")]
    OmegaII,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_enum_str, Deserialize_enum_str)]
pub enum Decision {
    Hit,
    Stand,
    Double,
    Split,
}
