use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of taste descriptors a user can report for a brew.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TasteTag {
    Sour,
    Bitter,
    Balanced,
    Weak,
    Strong,
    Salty,
    Hollow,
    Astringent,
    Muddled,
}

impl TasteTag {
    pub const ALL: [TasteTag; 9] = [
        TasteTag::Sour,
        TasteTag::Bitter,
        TasteTag::Balanced,
        TasteTag::Weak,
        TasteTag::Strong,
        TasteTag::Salty,
        TasteTag::Hollow,
        TasteTag::Astringent,
        TasteTag::Muddled,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Sour => "sour",
            Self::Bitter => "bitter",
            Self::Balanced => "balanced",
            Self::Weak => "weak",
            Self::Strong => "strong",
            Self::Salty => "salty",
            Self::Hollow => "hollow",
            Self::Astringent => "astringent",
            Self::Muddled => "muddled",
        }
    }
}

impl Display for TasteTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Sour => "Sour / Acidic",
            Self::Bitter => "Bitter / Dry",
            Self::Balanced => "Perfect / Balanced",
            Self::Weak => "Weak / Watery",
            Self::Strong => "Strong / Heavy",
            Self::Salty => "Salty",
            Self::Hollow => "Hollow",
            Self::Astringent => "Astringent",
            Self::Muddled => "Muddled",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Error)]
#[error("unknown taste tag: {0}")]
pub struct TasteParseError(pub String);

impl FromStr for TasteTag {
    type Err = TasteParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "sour" | "acidic" | "lemon" => Ok(Self::Sour),
            "bitter" | "dry" => Ok(Self::Bitter),
            "balanced" | "perfect" => Ok(Self::Balanced),
            "weak" | "watery" | "thin" => Ok(Self::Weak),
            "strong" | "heavy" | "intense" => Ok(Self::Strong),
            "salty" | "salt" => Ok(Self::Salty),
            "hollow" | "empty" => Ok(Self::Hollow),
            "astringent" | "drying" => Ok(Self::Astringent),
            "muddled" | "muddy" => Ok(Self::Muddled),
            _ => Err(TasteParseError(s.to_string())),
        }
    }
}

/// Refinement direction a user wants to push the next brew toward.
/// Recorded on log entries as `preference`; the current decision table
/// does not branch on it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalTag {
    Acidic,
    Sweet,
    Body,
    #[default]
    Fix,
}

impl GoalTag {
    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Acidic => "acidic",
            Self::Sweet => "sweet",
            Self::Body => "body",
            Self::Fix => "fix",
        }
    }
}

impl Display for GoalTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

#[derive(Debug, Error)]
#[error("unknown goal tag: {0}")]
pub struct GoalParseError(pub String);

impl FromStr for GoalTag {
    type Err = GoalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "acidic" | "acidity" | "bright" => Ok(Self::Acidic),
            "sweet" | "sweetness" => Ok(Self::Sweet),
            "body" | "texture" => Ok(Self::Body),
            "fix" | "" => Ok(Self::Fix),
            _ => Err(GoalParseError(s.to_string())),
        }
    }
}

/// Brewing method. Only two methods matter for threshold purposes: a
/// missing method resolves to espresso, and any non-espresso value is
/// treated as filter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    #[default]
    Espresso,
    Filter,
}

impl Method {
    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Espresso => "espresso",
            Self::Filter => "filter",
        }
    }

    /// Resolves a raw method string from user input or a stored entry.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Espresso,
            Some(value) => {
                let normalized = value.trim().to_ascii_lowercase();
                if normalized.is_empty() || normalized == "espresso" {
                    Self::Espresso
                } else {
                    Self::Filter
                }
            }
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

impl FromStr for Method {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_raw(Some(s)))
    }
}
