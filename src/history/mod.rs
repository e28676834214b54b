pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::advisor::BrewParams;

pub use store::LogStore;

/// One saved brew: a frozen snapshot of the inputs plus identifying
/// metadata. Numeric fields keep the strings the user typed so a stored
/// entry re-reads byte-for-byte. `temperature` arrived after the first
/// release, so readers must tolerate its absence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coffee_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dose: Option<String>,
    #[serde(default, rename = "yield", skip_serializing_if = "Option::is_none")]
    pub yield_g: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taste: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference: Option<String>,
}

impl LogEntry {
    /// Snapshots the current inputs into a new entry stamped with the
    /// creation instant. The id is the millisecond timestamp; the store
    /// bumps it on collision.
    pub fn from_params(
        params: &BrewParams,
        coffee_name: Option<String>,
        taste: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis(),
            date: now,
            method: params.method.as_slug().to_string(),
            coffee_name,
            dose: params.dose.clone(),
            yield_g: params.yield_g.clone(),
            time: params.time.clone(),
            temperature: params.temperature.clone(),
            taste,
            preference: Some(params.goal.as_slug().to_string()),
        }
    }

    /// Rebuilds evaluation inputs from the stored snapshot, tolerating
    /// partially populated entries.
    pub fn to_params(&self) -> BrewParams {
        BrewParams {
            dose: self.dose.clone(),
            yield_g: self.yield_g.clone(),
            time: self.time.clone(),
            temperature: self.temperature.clone(),
            method: crate::advisor::Method::from_raw(Some(self.method.as_str())),
            goal: self
                .preference
                .as_deref()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_default(),
        }
    }

    pub fn matches_coffee(&self, filter: &str) -> bool {
        self.coffee_name
            .as_deref()
            .map(|name| name.to_lowercase().contains(&filter.to_lowercase()))
            .unwrap_or(false)
    }

    /// Stored method strings resolve the same way evaluation inputs do:
    /// anything that is not espresso counts as filter.
    pub fn matches_method(&self, method: crate::advisor::Method) -> bool {
        crate::advisor::Method::from_raw(Some(self.method.as_str())) == method
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::{GoalTag, Method};

    #[test]
    fn snapshot_preserves_raw_strings() {
        let params = BrewParams {
            dose: Some("18.0".to_string()),
            yield_g: Some("036".to_string()),
            time: Some("28".to_string()),
            temperature: None,
            method: Method::Espresso,
            goal: GoalTag::Sweet,
        };
        let entry = LogEntry::from_params(&params, Some("Ethiopia Natural".to_string()), Some("sour".to_string()));
        assert_eq!(entry.dose.as_deref(), Some("18.0"));
        assert_eq!(entry.yield_g.as_deref(), Some("036"));
        assert_eq!(entry.method, "espresso");
        assert_eq!(entry.preference.as_deref(), Some("sweet"));

        let rebuilt = entry.to_params();
        assert_eq!(rebuilt.dose, params.dose);
        assert_eq!(rebuilt.yield_g, params.yield_g);
        assert_eq!(rebuilt.method, Method::Espresso);
        assert_eq!(rebuilt.goal, GoalTag::Sweet);
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let json = r#"{
            "id": 1700000000000,
            "date": "2024-01-15T08:30:00Z",
            "method": "filter"
        }"#;
        let entry: LogEntry = serde_json::from_str(json).unwrap();
        assert!(entry.temperature.is_none());
        assert!(entry.taste.is_none());
        let params = entry.to_params();
        assert_eq!(params.method, Method::Filter);
        assert_eq!(params.goal, GoalTag::Fix);
    }

    #[test]
    fn method_filter_resolves_stored_strings() {
        let espresso = LogEntry::from_params(&BrewParams::default(), None, None);
        assert!(espresso.matches_method(Method::Espresso));
        assert!(!espresso.matches_method(Method::Filter));

        let mut v60 = LogEntry::from_params(&BrewParams::default(), None, None);
        v60.method = "v60".to_string();
        assert!(v60.matches_method(Method::Filter));
        assert!(!v60.matches_method(Method::Espresso));
    }

    #[test]
    fn coffee_filter_is_case_insensitive_substring() {
        let mut entry = LogEntry::from_params(&BrewParams::default(), Some("Ethiopia Natural".to_string()), None);
        assert!(entry.matches_coffee("ethiopia"));
        assert!(!entry.matches_coffee("kenya"));
        entry.coffee_name = None;
        assert!(!entry.matches_coffee("ethiopia"));
    }
}
