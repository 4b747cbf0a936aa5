use derive_more::{Display, FromStr};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, str::FromStr as _};
use thiserror::Error as ThisError;

///
/// Placement
/// Where the box sits on the edit screen.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[remain::sorted]
pub enum Placement {
    Advanced,
    #[default]
    Normal,
    Side,
}

///
/// Priority
/// Ordering weight among boxes in the same placement.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[remain::sorted]
pub enum Priority {
    #[default]
    Default,
    High,
    Low,
}

///
/// Operator
///
/// Boolean operator joining the clauses of a visibility condition.
/// The accepted tokens are exactly `and`, `AND`, `or`, `OR`; anything else
/// (including mixed case) is rejected so no operator directive is emitted.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[remain::sorted]
pub enum Operator {
    #[default]
    And,
    Or,
}

impl Operator {
    /// Strict whitelist parse; `None` for any token outside it.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "and" | "AND" => Some(Self::And),
            "or" | "OR" => Some(Self::Or),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// Choice
/// One selectable option of a select/radio/checkbox field.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

///
/// MinMaxStep
///
/// Numeric slider bounds. The legacy text form `"min,max,step"` is the wire
/// representation; it round-trips through serde as that string.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxStep {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for MinMaxStep {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
        }
    }
}

#[derive(Debug, ThisError)]
#[error("invalid min/max/step triple: '{raw}'")]
pub struct ParseMinMaxStepError {
    pub raw: String,
}

impl std::str::FromStr for MinMaxStep {
    type Err = ParseMinMaxStepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMinMaxStepError { raw: s.to_string() };

        let mut parts = s.split(',').map(str::trim);
        let min = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let max = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let step = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        if parts.next().is_some() {
            return Err(err());
        }

        Ok(Self { min, max, step })
    }
}

impl fmt::Display for MinMaxStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.min, self.max, self.step)
    }
}

impl Serialize for MinMaxStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MinMaxStep {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_str(&raw).map_err(de::Error::custom)
    }
}

///
/// TESTS
///
