use std::collections::BTreeMap;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AgentError;

pub const LEARNING_PERIOD: &str = "learning-period";
pub const RANDOM_SEED: &str = "random-seed";

/// Named settings handed to an agent at construction.
///
/// Values are kept as strings and parsed on lookup, so one map can carry
/// settings for the agent and for whatever drives it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentOptions {
    #[serde(deserialize_with = "scalars_as_strings")]
    values: BTreeMap<String, String>,
}

/// Accepts a flat object whose values are strings, numbers or booleans.
fn scalars_as_strings<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => {
                    return Err(D::Error::custom(format!(
                        "option '{key}' must be a string, number or boolean, got {other}"
                    )))
                }
            };
            Ok((key, text))
        })
        .collect()
}

impl AgentOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat JSON object. Numbers and booleans are stored in their
    /// textual form.
    ///
    /// # Errors
    /// `AgentError::Configuration` if the input is not a flat JSON object.
    pub fn from_json(json: &str) -> Result<Self, AgentError> {
        serde_json::from_str(json)
            .map_err(|e| AgentError::configuration(format!("invalid options JSON: {e}")))
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.values.insert(key.into(), value.to_string());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// # Errors
    /// `AgentError::Configuration` if the value is present but does not parse.
    pub fn parse<T: FromStr>(&self, key: &str) -> Result<Option<T>, AgentError> {
        self.get(key)
            .map(|raw| {
                raw.trim().parse::<T>().map_err(|_| {
                    AgentError::configuration(format!("option '{key}' has invalid value '{raw}'"))
                })
            })
            .transpose()
    }

    /// # Errors
    /// `AgentError::Configuration` if the value is present but does not parse.
    pub fn parse_or<T: FromStr>(&self, key: &str, default: T) -> Result<T, AgentError> {
        Ok(self.parse(key)?.unwrap_or(default))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for AgentOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        }
    }
}
