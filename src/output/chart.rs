use std::fmt::Write as _;

use crate::advisor::params::parse_or_zero;
use crate::history::LogEntry;
use crate::output::icons::taste_marker;

const GRID_WIDTH: usize = 60;
const GRID_HEIGHT: usize = 18;

// Extraction-time zone boundaries, seconds. Under 22s reads sour, over
// 32s reads bitter; between is the target window.
const SOUR_ZONE_MAX_S: f64 = 22.0;
const BITTER_ZONE_MIN_S: f64 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartView {
    /// Time (s) on x, yield (g) on y, with sour/balanced/bitter zones.
    Extraction,
    /// Dose (g) on x, yield (g) on y, with the 1:2 reference diagonal.
    Ratio,
}

struct Point {
    x: f64,
    y: f64,
    marker: char,
}

/// Terminal scatter chart of logged brews. Entries with unparseable or
/// non-positive dose/yield/time are dropped; an optional coffee-name
/// substring filter narrows further.
pub fn render_chart(entries: &[&LogEntry], view: ChartView, coffee: Option<&str>) -> String {
    if entries.is_empty() {
        return "Log your first brew to see the analysis chart.".to_string();
    }

    let points: Vec<Point> = entries
        .iter()
        .filter(|entry| {
            if let Some(filter) = coffee {
                if !entry.matches_coffee(filter) {
                    return false;
                }
            }
            true
        })
        .filter_map(|entry| {
            let dose = parse_or_zero(entry.dose.as_deref());
            let yield_out = parse_or_zero(entry.yield_g.as_deref());
            let time = parse_or_zero(entry.time.as_deref());
            if dose <= 0.0 || yield_out <= 0.0 || time <= 0.0 {
                return None;
            }
            let x = match view {
                ChartView::Extraction => time,
                ChartView::Ratio => dose,
            };
            Some(Point {
                x,
                y: yield_out,
                marker: taste_marker(entry.taste.as_deref()),
            })
        })
        .collect();

    if points.is_empty() {
        return match coffee {
            Some(name) => format!("No plottable brews found for \"{name}\"."),
            None => "No plottable brews yet; log one with dose, yield and time.".to_string(),
        };
    }

    let (x_min, x_max) = padded_domain(points.iter().map(|p| p.x));
    let (y_min, y_max) = padded_domain(points.iter().map(|p| p.y));

    let mut grid = vec![vec![' '; GRID_WIDTH]; GRID_HEIGHT];

    match view {
        ChartView::Extraction => {
            draw_zone_boundary(&mut grid, SOUR_ZONE_MAX_S, x_min, x_max);
            draw_zone_boundary(&mut grid, BITTER_ZONE_MIN_S, x_min, x_max);
        }
        ChartView::Ratio => {
            // y = 2x across the visible domain.
            for col in 0..GRID_WIDTH {
                let x = x_min + (x_max - x_min) * (col as f64 / (GRID_WIDTH - 1) as f64);
                if let Some(row) = to_row(2.0 * x, y_min, y_max) {
                    grid[row][col] = '.';
                }
            }
        }
    }

    for point in &points {
        let col = to_col(point.x, x_min, x_max);
        if let (Some(col), Some(row)) = (col, to_row(point.y, y_min, y_max)) {
            grid[row][col] = point.marker;
        }
    }

    let mut out = String::new();
    let title = match view {
        ChartView::Extraction => "Extraction Map  (time vs yield)",
        ChartView::Ratio => "Extraction Map  (dose vs yield)",
    };
    let _ = writeln!(out, "{title}");
    for (row_idx, row) in grid.iter().enumerate() {
        let label = if row_idx == 0 {
            format!("{y_max:>5.0}g")
        } else if row_idx == GRID_HEIGHT - 1 {
            format!("{y_min:>5.0}g")
        } else {
            "      ".to_string()
        };
        let line: String = row.iter().collect();
        let _ = writeln!(out, "{label} |{line}");
    }
    let _ = writeln!(out, "       +{}", "-".repeat(GRID_WIDTH));
    let x_unit = match view {
        ChartView::Extraction => "s",
        ChartView::Ratio => "g",
    };
    let _ = writeln!(
        out,
        "        {x_min:<.0}{x_unit}{pad}{x_max:.0}{x_unit}",
        pad = " ".repeat(GRID_WIDTH.saturating_sub(10))
    );
    match view {
        ChartView::Extraction => {
            let _ = writeln!(
                out,
                "zones: sour <{SOUR_ZONE_MAX_S:.0}s | balanced {SOUR_ZONE_MAX_S:.0}-{BITTER_ZONE_MIN_S:.0}s | bitter >{BITTER_ZONE_MIN_S:.0}s"
            );
        }
        ChartView::Ratio => {
            let _ = writeln!(out, "reference: dotted line = 1:2 ratio");
        }
    }
    let _ = writeln!(
        out,
        "markers: s sour  b bitter  O balanced  w weak  S strong  n salty  h hollow  a astringent  m muddled  ? other"
    );
    out
}

/// Five units of slack on each side, floored at zero, matching how the
/// history view frames its axes.
fn padded_domain(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    ((min - 5.0).max(0.0), max + 5.0)
}

fn to_col(x: f64, x_min: f64, x_max: f64) -> Option<usize> {
    if x < x_min || x > x_max || x_max <= x_min {
        return None;
    }
    let frac = (x - x_min) / (x_max - x_min);
    Some(((frac * (GRID_WIDTH - 1) as f64).round() as usize).min(GRID_WIDTH - 1))
}

fn to_row(y: f64, y_min: f64, y_max: f64) -> Option<usize> {
    if y < y_min || y > y_max || y_max <= y_min {
        return None;
    }
    let frac = (y - y_min) / (y_max - y_min);
    let from_bottom = (frac * (GRID_HEIGHT - 1) as f64).round() as usize;
    Some(GRID_HEIGHT - 1 - from_bottom.min(GRID_HEIGHT - 1))
}

fn draw_zone_boundary(grid: &mut [Vec<char>], x: f64, x_min: f64, x_max: f64) {
    if let Some(col) = to_col(x, x_min, x_max) {
        for row in grid.iter_mut() {
            if row[col] == ' ' {
                row[col] = ':';
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::BrewParams;

    fn entry(dose: &str, yield_g: &str, time: &str, taste: &str, coffee: Option<&str>) -> LogEntry {
        let params = BrewParams {
            dose: Some(dose.to_string()),
            yield_g: Some(yield_g.to_string()),
            time: Some(time.to_string()),
            ..BrewParams::default()
        };
        LogEntry::from_params(&params, coffee.map(str::to_string), Some(taste.to_string()))
    }

    #[test]
    fn empty_history_prompts_first_brew() {
        let rendered = render_chart(&[], ChartView::Extraction, None);
        assert!(rendered.contains("first brew"));
    }

    #[test]
    fn invalid_entries_are_filtered_out() {
        let bad = entry("0", "36", "30", "sour", None);
        let rendered = render_chart(&[&bad], ChartView::Extraction, None);
        assert!(rendered.contains("No plottable brews"));
    }

    #[test]
    fn plots_markers_and_zones() {
        let a = entry("18", "36", "28", "balanced", None);
        let b = entry("18", "30", "18", "sour", None);
        let rendered = render_chart(&[&a, &b], ChartView::Extraction, None);
        assert!(rendered.contains('O'));
        assert!(rendered.contains('s'));
        assert!(rendered.contains("zones: sour <22s"));
    }

    #[test]
    fn coffee_filter_excludes_other_beans() {
        let a = entry("18", "36", "28", "balanced", Some("Ethiopia Natural"));
        let b = entry("15", "250", "180", "bitter", Some("Kenya AA"));
        let rendered = render_chart(&[&a, &b], ChartView::Ratio, Some("kenya"));
        let grid = rendered.split("markers:").next().unwrap();
        assert!(grid.contains('b'));
        assert!(!grid.contains('O'));

        let rendered = render_chart(&[&a, &b], ChartView::Ratio, Some("colombia"));
        assert!(rendered.contains("No plottable brews found for \"colombia\"."));
    }

    #[test]
    fn ratio_view_draws_reference_line() {
        let a = entry("18", "36", "28", "balanced", None);
        let rendered = render_chart(&[&a], ChartView::Ratio, None);
        assert!(rendered.contains("1:2 ratio"));
        assert!(rendered.contains('.'));
    }
}
