use std::path::Path;

use plotters::element::Pie;
use plotters::prelude::*;

use crate::error::{Error, Result};
use crate::models::SentimentCategory;

const CHART_SIZE: (u32, u32) = (1000, 600);

fn slice_color(category: SentimentCategory) -> RGBColor {
    match category {
        SentimentCategory::Positive => RGBColor(76, 175, 80),
        SentimentCategory::Negative => RGBColor(229, 57, 53),
        SentimentCategory::Neutral => RGBColor(158, 158, 158),
    }
}

/// Writes an SVG pie chart of raw category counts to `path`. Slice
/// percentages are derived from the counts here.
pub fn render_pie_chart(
    counts: &[(SentimentCategory, usize)],
    path: &Path,
    title: &str,
) -> Result<()> {
    let counts: Vec<_> = counts.iter().filter(|(_, count)| *count > 0).copied().collect();
    if counts.is_empty() {
        return Err(Error::Chart("no sentiment counts to plot".to_string()));
    }

    let sizes: Vec<f64> = counts.iter().map(|(_, count)| *count as f64).collect();
    let colors: Vec<RGBColor> = counts.iter().map(|(category, _)| slice_color(*category)).collect();
    let labels: Vec<&str> = counts.iter().map(|(category, _)| category.as_str()).collect();

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| Error::Chart(e.to_string()))?;

    let root = root
        .titled(title, ("sans-serif", 28).into_font())
        .map_err(|e| Error::Chart(e.to_string()))?;

    let (width, height) = root.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(("sans-serif", 22).into_font().color(&BLACK));
    pie.percentages(("sans-serif", 18).into_font().color(&WHITE));

    root.draw(&pie).map_err(|e| Error::Chart(e.to_string()))?;
    root.present()
        .map_err(|e| Error::Chart(format!("cannot write {}: {}", path.display(), e)))?;

    tracing::debug!("Rendered pie chart with {} slices", counts.len());
    Ok(())
}
