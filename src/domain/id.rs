use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier for a column or card.
///
/// Seeded items use small integers, items created at runtime get a generated
/// string. An integer id never equals a string id, even if the text matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Int(u64),
    Str(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Id {
    fn from(n: u64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Uuid> for Id {
    fn from(uuid: Uuid) -> Self {
        Self::Str(uuid.to_string())
    }
}

/// Source of fresh identifiers for created columns and cards
pub trait IdGenerator: Send + Sync {
    fn next_id(&mut self) -> Id;
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> Id {
        Uuid::new_v4().into()
    }
}

/// Millisecond wall-clock ids.
///
/// Two ids requested within the same millisecond would collide, so the value
/// is bumped past the last one handed out.
#[derive(Debug, Default, Clone)]
pub struct TimestampIdGenerator {
    last: i64,
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&mut self) -> Id {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        Id::Str(self.last.to_string())
    }
}

/// Counter-based ids (`"{prefix}1"`, `"{prefix}2"`, ...), for fixtures and tests
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> Id {
        let id = Id::Str(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

/// Which generator a store should be built with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Uuid,
    Timestamp,
}

impl IdStrategy {
    pub fn generator(self) -> Box<dyn IdGenerator> {
        match self {
            Self::Uuid => Box::new(UuidIdGenerator),
            Self::Timestamp => Box::new(TimestampIdGenerator::default()),
        }
    }
}
