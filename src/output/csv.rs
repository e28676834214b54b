use anyhow::Result;

use crate::history::LogEntry;

pub fn history_to_csv(entries: &[&LogEntry]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "id",
        "date",
        "method",
        "coffee_name",
        "dose_g",
        "yield_g",
        "time_s",
        "temperature_c",
        "taste",
        "preference",
    ])?;
    for entry in entries {
        writer.write_record([
            entry.id.to_string(),
            entry.date.to_rfc3339(),
            entry.method.clone(),
            entry.coffee_name.clone().unwrap_or_default(),
            entry.dose.clone().unwrap_or_default(),
            entry.yield_g.clone().unwrap_or_default(),
            entry.time.clone().unwrap_or_default(),
            entry.temperature.clone().unwrap_or_default(),
            entry.taste.clone().unwrap_or_default(),
            entry.preference.clone().unwrap_or_default(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::BrewParams;

    #[test]
    fn exports_raw_field_strings() {
        let params = BrewParams {
            dose: Some("18".to_string()),
            yield_g: Some("36".to_string()),
            ..BrewParams::default()
        };
        let entry =
            LogEntry::from_params(&params, Some("Kenya AA".to_string()), Some("bitter".to_string()));
        let csv = history_to_csv(&[&entry]).unwrap();
        assert!(csv.starts_with("id,date,method,"));
        assert!(csv.contains("Kenya AA"));
        assert!(csv.contains(",18,36,"));
    }
}
