use std::fs;
use std::path::{Path, PathBuf};

use dps_core::errors::{DpsError, ErrorInfo};
use dps_exp::read_table;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chart::{chart_from_table, Chart};

const PALETTE: [&str; 6] = [
    "#3b82f6", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureConfig {
    pub width: u32,
    pub height: u32,
    /// Padding around the plot area, also hosting title and axis labels.
    pub margin: u32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            margin: 40,
        }
    }
}

pub fn render_line_chart_svg(chart: &Chart, config: &FigureConfig) -> String {
    let width = config.width as f64;
    let height = config.height as f64;
    let margin = (config.margin as f64).min(width / 2.0).min(height / 2.0);
    let mut parts = vec![
        format!(
            "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}'>",
            w = config.width,
            h = config.height
        ),
        format!(
            "<text x='{:.2}' y='{:.2}' text-anchor='middle' font-size='14'>{}</text>",
            width / 2.0,
            margin / 2.0,
            escape(&chart.title)
        ),
    ];
    let (Some(&x_min), Some(&x_max), Some((y_min, y_max))) =
        (chart.x.iter().min(), chart.x.iter().max(), chart.y_range())
    else {
        parts.push("</svg>".into());
        return parts.join("");
    };

    let x_span = ((x_max - x_min) as f64).max(1e-9);
    let y_span = (y_max - y_min).max(1e-9);
    let plot_w = width - 2.0 * margin;
    let plot_h = height - 2.0 * margin;
    let project = |x: i64, y: f64| {
        (
            margin + (x - x_min) as f64 / x_span * plot_w,
            height - margin - (y - y_min) / y_span * plot_h,
        )
    };

    parts.push(format!(
        "<rect x='{m:.2}' y='{m:.2}' width='{:.2}' height='{:.2}' fill='none' stroke='#9ca3af' />",
        plot_w,
        plot_h,
        m = margin
    ));
    parts.push(format!(
        "<text x='{:.2}' y='{:.2}' font-size='10'>{:.2}</text><text x='{:.2}' y='{:.2}' font-size='10'>{:.2}</text>",
        2.0,
        margin,
        y_max,
        2.0,
        height - margin,
        y_min
    ));
    parts.push(format!(
        "<text x='{:.2}' y='{:.2}' font-size='10'>{}</text><text x='{:.2}' y='{:.2}' font-size='10' text-anchor='end'>{}</text>",
        margin,
        height - margin / 2.0,
        x_min,
        width - margin,
        height - margin / 2.0,
        x_max
    ));

    for (idx, series) in chart.series.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];
        let points = chart
            .x
            .iter()
            .zip(&series.values)
            .map(|(&x, &y)| {
                let (px, py) = project(x, y);
                format!("{px:.2},{py:.2}")
            })
            .collect::<Vec<_>>()
            .join(" ");
        parts.push(format!(
            "<polyline points='{points}' fill='none' stroke='{color}' stroke-width='2' />"
        ));
        let legend_y = margin + 14.0 * (idx as f64 + 1.0);
        parts.push(format!(
            "<text x='{:.2}' y='{:.2}' font-size='11' fill='{color}'>{}</text>",
            margin + 6.0,
            legend_y,
            escape(&series.label)
        ));
    }
    parts.push("</svg>".into());
    parts.join("")
}

/// Renders the table at `path` to an SVG next to it and returns the SVG path.
pub fn render_file(path: &Path, config: &FigureConfig) -> Result<PathBuf, DpsError> {
    let table = read_table(path)?;
    let title = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let chart = chart_from_table(&table, &title)?;
    let svg = render_line_chart_svg(&chart, config);
    let out = path.with_extension("svg");
    fs::write(&out, svg).map_err(|err| {
        DpsError::Io(
            ErrorInfo::new("chart-write", "failed to write chart")
                .with_context("path", out.display())
                .with_hint(err.to_string()),
        )
    })?;
    info!(path = %out.display(), series = chart.series.len(), "chart written");
    Ok(out)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
}
