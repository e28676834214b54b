use serde::{Deserialize, Serialize};

use crate::advisor::taste::{GoalTag, Method};
use crate::advisor::BrewMetrics;

/// Raw inputs for one evaluation. Numeric fields stay as the strings the
/// user typed; parsing happens at evaluation time and never fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrewParams {
    pub dose: Option<String>,
    #[serde(rename = "yield")]
    pub yield_g: Option<String>,
    pub time: Option<String>,
    pub temperature: Option<String>,
    #[serde(default)]
    pub method: Method,
    #[serde(default)]
    pub goal: GoalTag,
}

impl BrewParams {
    pub fn dose_g(&self) -> f64 {
        parse_or_zero(self.dose.as_deref())
    }

    pub fn yield_out_g(&self) -> f64 {
        parse_or_zero(self.yield_g.as_deref())
    }

    pub fn time_s(&self) -> f64 {
        parse_or_zero(self.time.as_deref())
    }

    pub fn temperature_c(&self) -> f64 {
        parse_or_zero(self.temperature.as_deref())
    }

    pub fn metrics(&self) -> BrewMetrics {
        let dose = self.dose_g();
        let yield_out = self.yield_out_g();
        let time = self.time_s();
        let ratio = if dose > 0.0 && yield_out > 0.0 {
            yield_out / dose
        } else {
            0.0
        };
        let flow_rate = if time > 0.0 && yield_out > 0.0 {
            yield_out / time
        } else {
            0.0
        };
        BrewMetrics { ratio, flow_rate }
    }
}

/// Missing, non-numeric, and negative values all degrade to 0.0 so the
/// engine can still produce a best-effort message.
pub fn parse_or_zero(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}
