#![allow(dead_code)]

use agent::{Action, ActionSpace, AgentError, AgentOptions, BaseAgent, Environment, Percept, Reward, SharedEnvironment};
use std::cell::RefCell;
use std::rc::Rc;

/// Environment with a fixed action space that echoes the action back as
/// the observation and pays a constant reward.
pub struct FixedEnv {
    pub space: ActionSpace,
    pub max_reward: Option<Reward>,
    pub reward: Reward,
}

impl Environment for FixedEnv {
    fn action_space(&self) -> &ActionSpace {
        &self.space
    }

    fn maximum_reward(&self) -> Option<Reward> {
        self.max_reward
    }

    fn perform_action(&mut self, action: Action) -> Result<Percept, AgentError> {
        if !self.is_valid_action(action) {
            return Err(AgentError::InvalidAction(action));
        }
        Ok(Percept { observation: action, reward: self.reward })
    }
}

pub fn bounded_env(minimum: Action, maximum: Action) -> SharedEnvironment<FixedEnv> {
    Rc::new(RefCell::new(FixedEnv {
        space: ActionSpace::Bounded { minimum, maximum },
        max_reward: Some(10.0),
        reward: 0.0,
    }))
}

pub fn enumerated_env(actions: Vec<Action>) -> SharedEnvironment<FixedEnv> {
    Rc::new(RefCell::new(FixedEnv {
        space: ActionSpace::Enumerated(actions),
        max_reward: Some(1.0),
        reward: 0.0,
    }))
}

pub fn seeded() -> AgentOptions {
    AgentOptions::new().with("random-seed", 42)
}

pub fn base_agent() -> BaseAgent<FixedEnv> {
    BaseAgent::new(bounded_env(0, 3), seeded()).unwrap()
}
