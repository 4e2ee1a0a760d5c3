//! Console formatting helpers shared by the driver and inspector.

use std::io::Write;

const SEPARATOR_WIDTH: usize = 80;

/// Write a dashed separator line, optionally centring a title in it.
pub fn print_separator<W: Write>(out: &mut W, title: Option<&str>) -> std::io::Result<()> {
    let line = match title {
        Some(title) => {
            let padding = SEPARATOR_WIDTH.saturating_sub(title.chars().count() + 2) / 2;
            let dashes = "-".repeat(padding);
            format!("{dashes} {title} {dashes}")
        }
        None => "-".repeat(SEPARATOR_WIDTH),
    };
    writeln!(out, "\n{line}\n")
}

/// Render an optional relevance score.
pub fn format_score(score: Option<f32>) -> String {
    match score {
        Some(score) => format!("{score:.3}"),
        None => "N/A".to_string(),
    }
}
