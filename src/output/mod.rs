pub mod chart;
pub mod csv;
pub mod icons;
pub mod json;
pub mod table;

pub use chart::{render_chart, ChartView};
pub use csv::history_to_csv;
pub use json::render_json;
pub use table::{render_history_table, render_recommendation};
