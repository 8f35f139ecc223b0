pub mod chart;
pub mod formatter;

pub use chart::render_pie_chart;
pub use formatter::{OutputFormat, Reporter};
