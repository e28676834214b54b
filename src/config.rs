use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::advisor::{GoalTag, Method};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub brew: BrewConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub placeholders: PlaceholdersConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrewConfig {
    #[serde(default)]
    pub method: Method,
    #[serde(default)]
    pub goal: GoalTag,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_log_path")]
    pub log_path: String,
}

/// Input hints shown by the interactive session, per method. These are
/// display defaults only; they never enter an evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceholdersConfig {
    #[serde(default = "default_espresso_hint")]
    pub espresso: RecipeHint,
    #[serde(default = "default_filter_hint")]
    pub filter: RecipeHint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeHint {
    pub dose: String,
    #[serde(rename = "yield")]
    pub yield_g: String,
    pub time: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub method: Option<Method>,
    pub log_path: Option<String>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/brew-compass/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(method) = overrides.method {
            self.brew.method = method;
        }
        if let Some(log_path) = overrides.log_path {
            self.storage.log_path = log_path;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn resolved_log_path(&self) -> PathBuf {
        expand_tilde(&self.storage.log_path)
    }

    pub fn hint_for(&self, method: Method) -> &RecipeHint {
        match method {
            Method::Espresso => &self.placeholders.espresso,
            Method::Filter => &self.placeholders.filter,
        }
    }

    pub fn default_template() -> String {
        let template = r#"[brew]
method = "espresso"
goal = "fix"

[storage]
log_path = "~/.local/share/brew-compass/brewlog.json"

[placeholders.espresso]
dose = "18"
yield = "36"
time = "28"

[placeholders.filter]
dose = "15"
yield = "250"
time = "180"
"#;
        template.to_string()
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
        }
    }
}

impl Default for PlaceholdersConfig {
    fn default() -> Self {
        Self {
            espresso: default_espresso_hint(),
            filter: default_filter_hint(),
        }
    }
}

fn default_log_path() -> String {
    "~/.local/share/brew-compass/brewlog.json".to_string()
}

fn default_espresso_hint() -> RecipeHint {
    RecipeHint {
        dose: "18".to_string(),
        yield_g: "36".to_string(),
        time: "28".to_string(),
    }
}

fn default_filter_hint() -> RecipeHint {
    RecipeHint {
        dose: "15".to_string(),
        yield_g: "250".to_string(),
        time: "180".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.brew.method, Method::Espresso);
        assert_eq!(config.placeholders.filter.yield_g, "250");
    }

    #[test]
    fn template_parses_back() {
        let config: Config = toml::from_str(&Config::default_template()).unwrap();
        assert_eq!(config.brew.goal, GoalTag::Fix);
        assert_eq!(config.hint_for(Method::Espresso).dose, "18");
    }

    #[test]
    fn overrides_replace_method_and_path() {
        let mut config = Config::default();
        config.apply_overrides(ConfigOverrides {
            method: Some(Method::Filter),
            log_path: Some("/tmp/test-brewlog.json".to_string()),
        });
        assert_eq!(config.brew.method, Method::Filter);
        assert_eq!(
            config.resolved_log_path(),
            PathBuf::from("/tmp/test-brewlog.json")
        );
    }
}
