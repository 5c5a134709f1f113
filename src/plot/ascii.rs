//! ASCII stacked-area plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Each bucket is one layer, stacked bottom-up in key order and drawn with its own
//! glyph. The x axis is the output rows (days or samples), resampled to `width`.

use crate::domain::BurndownSeries;
use crate::report::row_totals;

/// Layer glyphs, reused cyclically when there are more buckets.
const GLYPHS: [char; 8] = ['#', '*', '+', '=', 'o', '%', '@', 'x'];

/// Render a stacked-area plot of a resampled series.
pub fn render_stacked_plot(series: &BurndownSeries, width: usize, height: usize) -> String {
    let width = width.max(2);
    let height = height.max(2);

    if series.data.is_empty() {
        return "Plot: no data\n".to_string();
    }

    let y_max = row_totals(series)
        .into_iter()
        .fold(0.0_f64, f64::max);
    let y_max = if y_max > 0.0 { y_max } else { 1.0 };

    let n = series.data.len();
    let mut grid = vec![vec![' '; width]; height];

    for x in 0..width {
        let row = &series.data[map_row(x, width, n)];
        let stack = cumulative(row);

        for h in 0..height {
            let level = (h as f64 + 0.5) / height as f64 * y_max;
            if let Some(layer) = stack.iter().position(|&top| top >= level) {
                grid[height - 1 - h][x] = GLYPHS[layer % GLYPHS.len()];
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!("Plot: rows={n} | lines=[0, {y_max:.2}]\n"));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    for (idx, key) in series.keys.iter().enumerate() {
        out.push_str(&format!("{} {key}\n", GLYPHS[idx % GLYPHS.len()]));
    }

    out
}

/// Output row shown in screen column `x`.
fn map_row(x: usize, width: usize, rows: usize) -> usize {
    let u = x as f64 / (width as f64 - 1.0);
    ((u * (rows as f64 - 1.0)).round() as usize).min(rows - 1)
}

/// Running layer tops; negative interpolation noise is drawn as zero.
fn cumulative(row: &[f64]) -> Vec<f64> {
    let mut acc = 0.0;
    row.iter()
        .map(|&v| {
            acc += v.max(0.0);
            acc
        })
        .collect()
}
