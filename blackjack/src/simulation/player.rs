use crate::{policy::DecisionPolicy, BlackjackError};

/// A seat's money and how it makes decisions.
#[derive(Debug)]
pub struct PlayerState {
    bankroll: f64,
    /// Base bet placed on each new hand. A double raises the bet of that hand
    /// only, so this never changes during a campaign.
    bet_size: f64,
    policy: DecisionPolicy,
}

impl PlayerState {
    pub fn new(
        starting_bankroll: f64,
        bet_size: f64,
        policy: DecisionPolicy,
    ) -> Result<PlayerState, BlackjackError> {
        if !(bet_size > 0.0) {
            return Err(BlackjackError::InvalidConfig(format!(
                "bet size must be positive, got {}",
                bet_size
            )));
        }
        Ok(PlayerState {
            bankroll: starting_bankroll,
            bet_size,
            policy,
        })
    }

    pub fn bankroll(&self) -> f64 {
        self.bankroll
    }

    pub fn bet_size(&self) -> f64 {
        self.bet_size
    }

    pub fn skill_level(&self) -> f64 {
        self.policy.skill_level()
    }

    pub fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }

    pub(crate) fn settle(&mut self, delta: f64) {
        self.bankroll += delta;
    }
}
