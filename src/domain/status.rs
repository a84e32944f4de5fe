//! Status Enum
//!
//! Progress of an item, independent of its `done` flag. Any status can be
//! set from any other.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::TodoError;

/// Item status. Serialized as the label shown in the selector, which is
/// also what existing stored lists contain. `as_str` and `from_str` are the
/// only label tables; serde goes through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    NotStarted,
    InProgress,
    Closed,
}

impl Status {
    /// Selector order
    pub const ALL: [Status; 3] = [Status::NotStarted, Status::InProgress, Status::Closed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "시작 전",
            Status::InProgress => "진행중",
            Status::Closed => "마감",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TodoError;

    /// Accepts the labels and the upper-case constant names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "시작 전" | "NOT_STARTED" => Ok(Status::NotStarted),
            "진행중" | "IN_PROGRESS" => Ok(Status::InProgress),
            "마감" | "CLOSED" => Ok(Status::Closed),
            other => Err(TodoError::InvalidStatus(other.to_string())),
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
