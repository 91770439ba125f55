use crate::env::{Action, ActionSpace, Environment, Observation, Percept, Reward};
use crate::error::AgentError;

pub const TAILS: Action = 0;
pub const HEADS: Action = 1;

/// A biased coin. The agent guesses the outcome of each toss and is
/// rewarded 1 for a correct guess, 0 otherwise.
pub struct CoinFlip {
    probability: f64,
    actions: ActionSpace,
    rng: fastrand::Rng,
}

impl CoinFlip {
    /// `probability` is the chance of heads on each toss.
    ///
    /// # Errors
    /// `AgentError::Configuration` if `probability` is outside `[0, 1]`.
    pub fn new(probability: f64, seed: u64) -> Result<Self, AgentError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(AgentError::configuration(format!(
                "coin probability {probability} outside [0, 1]"
            )));
        }
        Ok(Self {
            probability,
            actions: ActionSpace::Enumerated(vec![TAILS, HEADS]),
            rng: fastrand::Rng::with_seed(seed),
        })
    }

    #[must_use]
    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl Environment for CoinFlip {
    fn action_space(&self) -> &ActionSpace {
        &self.actions
    }

    fn maximum_reward(&self) -> Option<Reward> {
        Some(1.0)
    }

    fn minimum_reward(&self) -> Option<Reward> {
        Some(0.0)
    }

    fn perform_action(&mut self, action: Action) -> Result<Percept, AgentError> {
        if !self.is_valid_action(action) {
            return Err(AgentError::InvalidAction(action));
        }
        let observation: Observation = if self.rng.f64() < self.probability { HEADS } else { TAILS };
        let reward = if observation == action { 1.0 } else { 0.0 };
        Ok(Percept { observation, reward })
    }
}
