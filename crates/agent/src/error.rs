use thiserror::Error;

use crate::env::Action;

/// Which of the two alternating updates a call belongs to.
///
/// As an agent's phase it names the update due next, not the one done
/// last: a fresh agent is in `Action` and takes an action update first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdatePhase {
    Action,
    Percept,
}

impl std::fmt::Display for UpdatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdatePhase::Action => f.write_str("action update"),
            UpdatePhase::Percept => f.write_str("percept update"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid action {0}")]
    InvalidAction(Action),
    #[error("protocol violation: expected {expected}, got {attempted}")]
    Protocol {
        expected: UpdatePhase,
        attempted: UpdatePhase,
    },
}

impl AgentError {
    pub(crate) fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
