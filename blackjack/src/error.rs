use thiserror::Error;

use crate::simulation::RoundPhase;
use crate::Decision;

#[derive(Debug, Error)]
pub enum BlackjackError {
    #[error("invalid card: {0}")]
    InvalidCard(String),
    #[error("the shoe is empty")]
    EmptyShoe,
    #[error("{0} is not allowed for this hand")]
    IllegalAction(Decision),
    #[error("{operation} is only allowed in {expected:?} phase, current phase is {actual:?}")]
    WrongPhase {
        operation: &'static str,
        expected: RoundPhase,
        actual: RoundPhase,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier unavailable: {0}")]
    Unavailable(String),
}
