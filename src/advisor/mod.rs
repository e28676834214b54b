pub mod engine;
pub mod params;
pub mod taste;

use serde::{Deserialize, Serialize};

pub use engine::evaluate;
pub use params::BrewParams;
pub use taste::{GoalTag, Method, TasteTag};

/// Category of adjustment a recommendation advises.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentType {
    Grind,
    Ratio,
    Temp,
    None,
}

impl AdjustmentType {
    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Grind => "grind",
            Self::Ratio => "ratio",
            Self::Temp => "temp",
            Self::None => "none",
        }
    }
}

/// Derived figures computed fresh on every evaluation. The copy embedded
/// in a [`Recommendation`] is a display snapshot and is never re-derived
/// downstream.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct BrewMetrics {
    pub ratio: f64,
    pub flow_rate: f64,
}

/// Result of one evaluation: what to change, how to say it, and the
/// metric snapshot the wording was based on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub kind: AdjustmentType,
    pub message: String,
    pub detail: Option<String>,
    pub icon: String,
    pub metrics: BrewMetrics,
}
