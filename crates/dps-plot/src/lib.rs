//! Chart rendering for sweep tables written by the driver.

pub mod chart;
pub mod figures;

pub use chart::{chart_from_table, Chart, Series};
pub use figures::{render_file, render_line_chart_svg, FigureConfig};
