use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::env::{Action, Environment, Observation, Reward};
use crate::error::{AgentError, UpdatePhase};
use crate::options::{AgentOptions, LEARNING_PERIOD, RANDOM_SEED};
use crate::stats::RewardStats;

/// Handle to an environment shared between an agent and the loop driving it.
pub type SharedEnvironment<E> = Rc<RefCell<E>>;

/// State and bookkeeping every agent carries: the action/percept turn
/// order, the cycle counter and the reward statistics.
///
/// Concrete agents embed one of these and route each update through
/// [`record_action`](Self::record_action) and
/// [`record_percept`](Self::record_percept) exactly once.
pub struct AgentCore<E: Environment + ?Sized> {
    environment: SharedEnvironment<E>,
    options: AgentOptions,
    learning_period: u64,
    age: u64,
    phase: UpdatePhase,
    rewards: RewardStats,
    rng: fastrand::Rng,
}

impl<E: Environment + ?Sized> AgentCore<E> {
    /// # Errors
    /// `AgentError::Configuration` if `learning-period` or `random-seed`
    /// is present but not a non-negative integer.
    pub fn new(environment: SharedEnvironment<E>, options: AgentOptions) -> Result<Self, AgentError> {
        let learning_period = options.parse_or(LEARNING_PERIOD, 0_u64)?;
        let rng = match options.parse::<u64>(RANDOM_SEED)? {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        debug!(learning_period, "agent created");
        Ok(Self {
            environment,
            options,
            learning_period,
            age: 0,
            phase: UpdatePhase::Action,
            rewards: RewardStats::new(),
            rng,
        })
    }

    #[must_use]
    pub fn environment(&self) -> &SharedEnvironment<E> {
        &self.environment
    }

    #[must_use]
    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    /// Number of cycles learning is active for; 0 means unbounded.
    #[must_use]
    pub fn learning_period(&self) -> u64 {
        self.learning_period
    }

    #[must_use]
    pub fn is_learning(&self) -> bool {
        self.learning_period == 0 || self.age < self.learning_period
    }

    /// Completed action updates since construction or the last reset.
    #[must_use]
    pub fn age(&self) -> u64 {
        self.age
    }

    /// The update that must come next.
    #[must_use]
    pub fn phase(&self) -> UpdatePhase {
        self.phase
    }

    #[must_use]
    pub fn reward_stats(&self) -> &RewardStats {
        &self.rewards
    }

    #[must_use]
    pub fn average_reward(&self) -> Reward {
        self.rewards.mean()
    }

    #[must_use]
    pub fn total_reward(&self) -> Reward {
        self.rewards.total()
    }

    #[must_use]
    pub fn reward_variance(&self) -> f64 {
        self.rewards.variance()
    }

    #[must_use]
    pub fn reward_std_dev(&self) -> f64 {
        self.rewards.std_dev()
    }

    #[must_use]
    pub fn maximum_action(&self) -> Option<Action> {
        self.environment.borrow().maximum_action()
    }

    #[must_use]
    pub fn maximum_reward(&self) -> Option<Reward> {
        self.environment.borrow().maximum_reward()
    }

    /// Pick an action uniformly at random from the environment's action space.
    ///
    /// # Errors
    /// `AgentError::Configuration` if the action space has nothing to draw from.
    pub fn generate_random_action(&mut self) -> Result<Action, AgentError> {
        let env = self.environment.borrow();
        let action = env.action_space().sample(&mut self.rng)?;
        trace!(action, "random action");
        Ok(action)
    }

    /// Base transition for an action update.
    ///
    /// # Errors
    /// `AgentError::InvalidAction` if the environment rejects `action`, then
    /// `AgentError::Protocol` if a percept update was due instead. Nothing is
    /// modified on error.
    pub fn record_action(&mut self, action: Action) -> Result<(), AgentError> {
        if !self.environment.borrow().is_valid_action(action) {
            warn!(action, "invalid action rejected");
            return Err(AgentError::InvalidAction(action));
        }
        self.expect_phase(UpdatePhase::Action)?;
        self.age += 1;
        self.phase = UpdatePhase::Percept;
        debug!(age = self.age, action, "action update");
        Ok(())
    }

    /// Base transition for a percept update. Feeds `reward` into the
    /// running statistics.
    ///
    /// # Errors
    /// `AgentError::Protocol` if an action update was due instead. Nothing is
    /// modified on error.
    pub fn record_percept(&mut self, observation: Observation, reward: Reward) -> Result<(), AgentError> {
        self.expect_phase(UpdatePhase::Percept)?;
        self.rewards.push(reward);
        self.phase = UpdatePhase::Action;
        debug!(
            age = self.age,
            observation,
            reward,
            mean = self.rewards.mean(),
            "percept update"
        );
        Ok(())
    }

    /// Back to the initial state. Environment and options are kept.
    pub fn reset(&mut self) {
        self.age = 0;
        self.phase = UpdatePhase::Action;
        self.rewards.clear();
        debug!("agent reset");
    }

    fn expect_phase(&self, attempted: UpdatePhase) -> Result<(), AgentError> {
        if self.phase == attempted {
            return Ok(());
        }
        warn!(expected = %self.phase, attempted = %attempted, "update out of turn");
        Err(AgentError::Protocol {
            expected: self.phase,
            attempted,
        })
    }
}

/// Extension points of a learning agent.
///
/// The provided methods implement the bare behaviour. Implementations that
/// override an update, `search` or `reset` must still call the matching
/// [`AgentCore`] routine once per call.
pub trait Agent {
    type Env: Environment + ?Sized;

    fn core(&self) -> &AgentCore<Self::Env>;
    fn core_mut(&mut self) -> &mut AgentCore<Self::Env>;

    /// Size of the learned model. Zero for an agent without one.
    fn model_size(&self) -> usize {
        0
    }

    /// # Errors
    /// See [`AgentCore::record_action`].
    fn model_update_action(&mut self, action: Action) -> Result<(), AgentError> {
        self.core_mut().record_action(action)
    }

    /// # Errors
    /// See [`AgentCore::record_percept`].
    fn model_update_percept(&mut self, observation: Observation, reward: Reward) -> Result<(), AgentError> {
        self.core_mut().record_percept(observation, reward)
    }

    /// Best action according to the agent. The default just picks the
    /// maximum action.
    ///
    /// # Errors
    /// `AgentError::Configuration` if the environment has no maximum action.
    fn search(&mut self) -> Result<Action, AgentError> {
        self.core()
            .maximum_action()
            .ok_or_else(|| AgentError::configuration("environment has no maximum action"))
    }

    fn reset(&mut self) {
        self.core_mut().reset();
    }

    /// # Errors
    /// See [`AgentCore::generate_random_action`].
    fn generate_random_action(&mut self) -> Result<Action, AgentError> {
        self.core_mut().generate_random_action()
    }

    fn age(&self) -> u64 {
        self.core().age()
    }

    fn average_reward(&self) -> Reward {
        self.core().average_reward()
    }

    fn total_reward(&self) -> Reward {
        self.core().total_reward()
    }

    fn maximum_action(&self) -> Option<Action> {
        self.core().maximum_action()
    }

    fn maximum_reward(&self) -> Option<Reward> {
        self.core().maximum_reward()
    }
}

/// An agent with no model: every extension point keeps its default.
pub struct BaseAgent<E: Environment + ?Sized> {
    core: AgentCore<E>,
}

impl<E: Environment + ?Sized> BaseAgent<E> {
    /// # Errors
    /// See [`AgentCore::new`].
    pub fn new(environment: SharedEnvironment<E>, options: AgentOptions) -> Result<Self, AgentError> {
        Ok(Self {
            core: AgentCore::new(environment, options)?,
        })
    }
}

impl<E: Environment + ?Sized> Agent for BaseAgent<E> {
    type Env = E;

    fn core(&self) -> &AgentCore<E> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore<E> {
        &mut self.core
    }
}
