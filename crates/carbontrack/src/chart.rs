//! Text bar chart of a footprint by category.

use std::fmt::Write as _;

use crate::aggregate::FootprintSummary;

const BAR: char = '█';

/// Render one bar per category, scaled so the largest fills `width`.
///
/// Returns `None` for an empty summary. Categories with a non-positive sum
/// get an empty bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_bar_chart(summary: &FootprintSummary, width: usize) -> Option<String> {
    if summary.is_empty() {
        return None;
    }

    let rows = summary.labelled();
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let max = rows.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);

    let mut out = String::new();
    let _ = writeln!(out, "Carbon Footprint by Category (kg CO2e)");
    for (label, value) in rows {
        let len = if max > 0.0 && value > 0.0 {
            ((value / max) * width as f64).round().max(1.0) as usize
        } else {
            0
        };
        let bar: String = std::iter::repeat(BAR).take(len).collect();
        let _ = writeln!(out, "{label:<label_width$} | {bar} {value:.2}");
    }
    Some(out)
}
