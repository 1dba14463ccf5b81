//! Identifier types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Player identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl PlayerId {
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for PlayerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player-{}", self.0)
    }
}

/// Which probability regime a round runs under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameVariant {
    /// Every slot equally likely
    #[default]
    Fair,
    /// Caller-shaped weights, usually favouring low prizes
    Tweaked,
}

impl GameVariant {
    pub fn name(self) -> &'static str {
        match self {
            Self::Fair => "Fair Game",
            Self::Tweaked => "Tweaked Game",
        }
    }
}

impl fmt::Display for GameVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
