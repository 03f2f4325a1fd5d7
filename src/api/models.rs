//! Wire models for the plants API

use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment category a plant can be placed in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub key: String,
    pub title: String,
}

impl Environment {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
        }
    }
}

/// Plant identifier; the API hands out either numbers or strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlantId {
    Number(u64),
    Text(String),
}

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlantId::Number(n) => write!(f, "{}", n),
            PlantId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Watering frequency, e.g. 2 times per "week"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    #[serde(default)]
    pub times: u32,
    #[serde(default)]
    pub repeat_every: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub water_tips: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub environments: Vec<String>,
    #[serde(default)]
    pub frequency: Frequency,
}

impl Plant {
    /// Whether this plant is tagged with the given environment key
    pub fn has_environment(&self, key: &str) -> bool {
        self.environments.iter().any(|e| e == key)
    }
}
