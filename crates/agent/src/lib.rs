#![deny(clippy::all, clippy::pedantic)]

pub mod agent;
pub mod env;
pub mod environments;
pub mod error;
pub mod options;
pub mod stats;

pub use agent::{Agent, AgentCore, BaseAgent, SharedEnvironment};
pub use env::{Action, ActionSpace, Environment, Observation, Percept, Reward};
pub use environments::CoinFlip;
pub use error::{AgentError, UpdatePhase};
pub use options::AgentOptions;
pub use stats::RewardStats;
