use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::advisor::{AdjustmentType, Recommendation};
use crate::history::LogEntry;
use crate::output::icons::glyph;

pub fn render_recommendation(rec: &Recommendation) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Recommendation"]);

    let message_cell = match rec.kind {
        AdjustmentType::None => Cell::new(&rec.message).fg(Color::Green),
        AdjustmentType::Temp => Cell::new(&rec.message).fg(Color::Red),
        _ => Cell::new(&rec.message).fg(Color::Yellow),
    };
    table.add_row(Row::from(vec![Cell::new(glyph(&rec.icon)), message_cell]));

    if let Some(detail) = &rec.detail {
        table.add_row(vec!["", detail.as_str()]);
    }

    let mut figures = Vec::new();
    if rec.metrics.ratio > 0.0 {
        figures.push(format!("ratio 1:{:.1}", rec.metrics.ratio));
    }
    if rec.metrics.flow_rate > 0.0 {
        figures.push(format!("flow {:.1} g/s", rec.metrics.flow_rate));
    }
    if !figures.is_empty() {
        table.add_row(vec!["".to_string(), figures.join("  |  ")]);
    }

    table.add_row(vec![
        "".to_string(),
        format!("adjust: {}", rec.kind.as_slug()),
    ]);
    table.to_string()
}

pub fn render_history_table(entries: &[&LogEntry]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Id", "Date", "Method", "Coffee", "In (g)", "Out (g)", "Time (s)", "Temp", "Taste", "Goal",
    ]);

    for entry in entries {
        table.add_row(vec![
            entry.id.to_string(),
            entry.date.format("%Y-%m-%d %H:%M").to_string(),
            entry.method.clone(),
            entry.coffee_name.clone().unwrap_or_else(|| "-".to_string()),
            entry.dose.clone().unwrap_or_else(|| "-".to_string()),
            entry.yield_g.clone().unwrap_or_else(|| "-".to_string()),
            entry.time.clone().unwrap_or_else(|| "-".to_string()),
            entry.temperature.clone().unwrap_or_else(|| "-".to_string()),
            entry.taste.clone().unwrap_or_else(|| "-".to_string()),
            entry.preference.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::{evaluate, BrewParams, TasteTag};

    #[test]
    fn recommendation_panel_includes_metrics_and_kind() {
        let params = BrewParams {
            dose: Some("18".to_string()),
            yield_g: Some("36".to_string()),
            time: Some("30".to_string()),
            ..BrewParams::default()
        };
        let rendered = render_recommendation(&evaluate(Some(TasteTag::Sour), &params));
        assert!(rendered.contains("Increase Yield to ~41g."));
        assert!(rendered.contains("ratio 1:2.0"));
        assert!(rendered.contains("adjust: ratio"));
    }

    #[test]
    fn history_table_shows_dash_for_missing_fields() {
        let entry = LogEntry::from_params(&BrewParams::default(), None, None);
        let rendered = render_history_table(&[&entry]);
        assert!(rendered.contains("espresso"));
        assert!(rendered.contains('-'));
    }
}
