//! Text charts for the terminal.
//!
//! Bar charts scale each bar to the configured width; heatmaps shade each
//! cell by where its value falls between the grid's minimum and maximum.

use serde::Serialize;

/// Shading ramp from lowest to highest value.
const SHADES: [char; 5] = ['·', '░', '▒', '▓', '█'];

/// A horizontal bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    /// Chart heading.
    pub title: String,
    /// One bar per label, drawn top to bottom.
    pub bars: Vec<(String, f64)>,
    /// Value mapped to a full-width bar. Defaults to the largest bar.
    pub scale_max: Option<f64>,
    /// Decimal places of the printed values.
    pub precision: usize,
}

impl BarChart {
    /// Chart of integer counts.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn counts<L: ToString>(title: &str, counts: &[(L, usize)]) -> Self {
        Self {
            title: title.to_string(),
            bars: counts
                .iter()
                .map(|(label, n)| (label.to_string(), *n as f64))
                .collect(),
            scale_max: None,
            precision: 0,
        }
    }

    /// Render the chart with the longest bar `width` characters wide.
    #[must_use]
    pub fn render(&self, width: usize) -> String {
        let mut out = format!("{}\n", self.title);
        let label_width = self
            .bars
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        let max = self
            .scale_max
            .unwrap_or_else(|| self.bars.iter().map(|(_, v)| *v).fold(0.0, f64::max));

        for (label, value) in &self.bars {
            let bar = "█".repeat(scaled(*value, max, width));
            out.push_str(&format!(
                "  {label:<label_width$} | {bar} {value:.prec$}\n",
                prec = self.precision
            ));
        }
        out
    }
}

/// A labelled grid of numeric cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    /// Heatmap heading.
    pub title: String,
    /// Row labels, top to bottom.
    pub rows: Vec<String>,
    /// Column labels, left to right.
    pub columns: Vec<String>,
    /// `cells[row][column]`; `None` renders blank.
    pub cells: Vec<Vec<Option<f64>>>,
    /// Decimal places of the printed values.
    pub precision: usize,
}

impl Heatmap {
    /// Render the grid with a shade glyph in front of each value.
    #[must_use]
    pub fn render(&self) -> String {
        let values = self.cells.iter().flatten().filter_map(|v| *v);
        let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

        let text: Vec<Vec<String>> = self
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(v) => format!("{} {v:.prec$}", shade(*v, lo, hi), prec = self.precision),
                        None => String::new(),
                    })
                    .collect()
            })
            .collect();

        let label_width = self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let col_widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(c, header)| {
                text.iter()
                    .map(|row| row[c].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = format!("{}\n", self.title);
        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&col_widths)
            .map(|(h, w)| format!("{h:>w$}"))
            .collect();
        out.push_str(&format!("  {:label_width$}   {}\n", "", header.join("  ")));
        for (label, row) in self.rows.iter().zip(&text) {
            let cells: Vec<String> = row
                .iter()
                .zip(&col_widths)
                .map(|(cell, w)| format!("{cell:>w$}"))
                .collect();
            out.push_str(&format!("  {label:<label_width$} | {}\n", cells.join("  ")));
        }
        out
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scaled(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    let len = (value / max * width as f64).round();
    (len as usize).min(width)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn shade(value: f64, lo: f64, hi: f64) -> char {
    let top = SHADES.len() - 1;
    if hi <= lo {
        return SHADES[top];
    }
    let step = ((value - lo) / (hi - lo) * top as f64).round() as usize;
    SHADES[step.min(top)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled() {
        assert_eq!(scaled(5.0, 10.0, 40), 20);
        assert_eq!(scaled(10.0, 10.0, 40), 40);
        assert_eq!(scaled(0.0, 10.0, 40), 0);
        assert_eq!(scaled(3.0, 0.0, 40), 0);
        assert_eq!(scaled(200.0, 105.0, 10), 10);
    }

    #[test]
    fn test_shade_extremes() {
        assert_eq!(shade(0.0, 0.0, 100.0), '·');
        assert_eq!(shade(100.0, 0.0, 100.0), '█');
        assert_eq!(shade(42.0, 42.0, 42.0), '█');
    }

    #[test]
    fn test_bar_chart_counts() {
        let chart = BarChart::counts("Activities by Type", &[("Repair", 4), ("Cleaning", 2)]);
        let rendered = chart.render(8);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Activities by Type");
        assert_eq!(lines[1], "  Repair   | ████████ 4");
        assert_eq!(lines[2], "  Cleaning | ████ 2");
    }

    #[test]
    fn test_bar_chart_fixed_scale() {
        let chart = BarChart {
            title: "Average".to_string(),
            bars: vec![("WS-A".to_string(), 52.5)],
            scale_max: Some(105.0),
            precision: 1,
        };
        assert!(chart.render(10).contains("| █████ 52.5"));
    }

    #[test]
    fn test_heatmap_render() {
        let heatmap = Heatmap {
            title: "Scores".to_string(),
            rows: vec!["A".to_string(), "BB".to_string()],
            columns: vec!["2024-01-01".to_string(), "2024-01-02".to_string()],
            cells: vec![vec![Some(0.0), None], vec![None, Some(100.0)]],
            precision: 1,
        };
        let rendered = heatmap.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("2024-01-01  2024-01-02"));
        assert!(lines[2].starts_with("  A  |"));
        assert!(lines[2].contains("· 0.0"));
        assert!(lines[3].contains("█ 100.0"));
    }
}
