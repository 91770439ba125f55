use crate::error::AgentError;

pub type Action = u64;
pub type Observation = u64;
pub type Reward = f64;

/// What the environment hands back after an action has been performed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percept {
    pub observation: Observation,
    pub reward: Reward,
}

/// The set of actions an environment accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionSpace {
    /// Every integer in `minimum..=maximum` is a valid action.
    Bounded { minimum: Action, maximum: Action },
    /// An explicit list of legal actions.
    Enumerated(Vec<Action>),
}

impl ActionSpace {
    #[must_use]
    pub fn contains(&self, action: Action) -> bool {
        match self {
            ActionSpace::Bounded { minimum, maximum } => (*minimum..=*maximum).contains(&action),
            ActionSpace::Enumerated(actions) => actions.contains(&action),
        }
    }

    /// Smallest valid action; `None` when no action is valid.
    #[must_use]
    pub fn minimum(&self) -> Option<Action> {
        match self {
            ActionSpace::Bounded { minimum, maximum } => (minimum <= maximum).then_some(*minimum),
            ActionSpace::Enumerated(actions) => actions.iter().copied().min(),
        }
    }

    /// Largest valid action; `None` when no action is valid.
    #[must_use]
    pub fn maximum(&self) -> Option<Action> {
        match self {
            ActionSpace::Bounded { minimum, maximum } => (minimum <= maximum).then_some(*maximum),
            ActionSpace::Enumerated(actions) => actions.iter().copied().max(),
        }
    }

    /// Checks that [`sample`](Self::sample) has something to draw from.
    ///
    /// # Errors
    /// `AgentError::Configuration` for an empty enumeration or a bounded
    /// range whose half-open sampling interval is empty.
    pub fn validate(&self) -> Result<(), AgentError> {
        match self {
            ActionSpace::Bounded { minimum, maximum } if minimum >= maximum => {
                Err(AgentError::configuration(format!(
                    "bounded action space [{minimum}, {maximum}) is empty"
                )))
            }
            ActionSpace::Enumerated(actions) if actions.is_empty() => Err(
                AgentError::configuration("enumerated action space has no actions"),
            ),
            _ => Ok(()),
        }
    }

    /// Draws an action uniformly at random.
    ///
    /// Enumerated spaces pick one of their listed actions. Bounded spaces
    /// draw from `[minimum, maximum)`, the upper bound being exclusive.
    ///
    /// # Errors
    /// Same conditions as [`validate`](Self::validate).
    pub fn sample(&self, rng: &mut fastrand::Rng) -> Result<Action, AgentError> {
        self.validate()?;
        let action = match self {
            ActionSpace::Bounded { minimum, maximum } => rng.u64(*minimum..*maximum),
            ActionSpace::Enumerated(actions) => actions[rng.usize(..actions.len())],
        };
        Ok(action)
    }
}

/// Capability interface an agent consumes from the world it acts in.
///
/// Only [`action_space`], [`maximum_reward`] and [`perform_action`] are
/// required; the remaining queries are derived from the action space.
///
/// [`action_space`]: Environment::action_space
/// [`maximum_reward`]: Environment::maximum_reward
/// [`perform_action`]: Environment::perform_action
pub trait Environment {
    fn action_space(&self) -> &ActionSpace;

    /// Largest reward obtainable in a single cycle, if known.
    fn maximum_reward(&self) -> Option<Reward>;

    /// Apply `action` and return the resulting observation and reward.
    ///
    /// # Errors
    /// `AgentError::InvalidAction` if the action is not accepted.
    fn perform_action(&mut self, action: Action) -> Result<Percept, AgentError>;

    fn is_valid_action(&self, action: Action) -> bool {
        self.action_space().contains(action)
    }

    fn minimum_action(&self) -> Option<Action> {
        self.action_space().minimum()
    }

    fn maximum_action(&self) -> Option<Action> {
        self.action_space().maximum()
    }

    fn minimum_reward(&self) -> Option<Reward> {
        None
    }

    /// Whether the environment has reached a terminal state.
    fn is_finished(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_space_is_inclusive_for_validity() {
        let space = ActionSpace::Bounded { minimum: 2, maximum: 5 };
        assert!(!space.contains(1));
        assert!(space.contains(2));
        assert!(space.contains(5));
        assert!(!space.contains(6));
        assert_eq!(space.minimum(), Some(2));
        assert_eq!(space.maximum(), Some(5));
    }

    #[test]
    fn bounded_sample_excludes_upper_bound() {
        let space = ActionSpace::Bounded { minimum: 0, maximum: 3 };
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..500 {
            let a = space.sample(&mut rng).unwrap();
            assert!(a < 3);
        }
    }

    #[test]
    fn enumerated_sample_stays_in_set() {
        let space = ActionSpace::Enumerated(vec![3, 9, 27]);
        let mut rng = fastrand::Rng::with_seed(11);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let a = space.sample(&mut rng).unwrap();
            let idx = [3, 9, 27].iter().position(|&x| x == a).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(space.maximum(), Some(27));
    }

    #[test]
    fn empty_spaces_are_configuration_errors() {
        let mut rng = fastrand::Rng::with_seed(1);
        let empty = ActionSpace::Enumerated(Vec::new());
        assert!(matches!(empty.sample(&mut rng), Err(AgentError::Configuration(_))));
        let degenerate = ActionSpace::Bounded { minimum: 4, maximum: 4 };
        assert!(matches!(degenerate.validate(), Err(AgentError::Configuration(_))));
    }

    #[test]
    fn inverted_bounds_have_no_extremes() {
        let inverted = ActionSpace::Bounded { minimum: 5, maximum: 2 };
        assert!(!inverted.contains(2));
        assert!(!inverted.contains(5));
        assert_eq!(inverted.minimum(), None);
        assert_eq!(inverted.maximum(), None);
        let single = ActionSpace::Bounded { minimum: 4, maximum: 4 };
        assert_eq!(single.maximum(), Some(4));
    }
}
