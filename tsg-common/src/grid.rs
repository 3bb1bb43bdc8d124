//! Grid model for rendering the status matrix as a heatmap.
//!
//! Rendering is a pure function from a dense [`StatusMatrix`] to an abstract
//! grid figure: per-cell colors, axis labels, and canvas sizing. The figure
//! carries no charting-library state, so output formats stay swappable behind
//! the export interface.

use crate::matrix::StatusMatrix;

/// Pixel size of one grid cell.
const CELL_SIZE_PX: u32 = 12;
/// Horizontal gap between test columns.
const CELL_GAP_PX: u32 = 1;
/// Fixed canvas width spent on the day-label margin.
const WIDTH_BASE_PX: u32 = 100;
/// Fixed canvas height spent on the rotated test labels along the top edge.
const HEIGHT_BASE_PX: u32 = 520;

/// Ordered two-color scale: `low` for passed (0), `high` for failed (1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScale {
    pub low: String,
    pub high: String,
}

impl Default for ColorScale {
    fn default() -> Self {
        Self {
            low: "lightgreen".to_string(),
            high: "red".to_string(),
        }
    }
}

impl ColorScale {
    pub fn new(low: impl Into<String>, high: impl Into<String>) -> Self {
        Self {
            low: low.into(),
            high: high.into(),
        }
    }

    /// Color for a cell value.
    pub fn color_for(&self, value: u8) -> &str {
        if value == 0 { &self.low } else { &self.high }
    }
}

/// One colored cell of the grid, addressed by render position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// Row index into `day_labels` (0 = most recent day).
    pub row: usize,
    /// Column index into `test_labels`.
    pub col: usize,
    pub value: u8,
    pub color: String,
}

/// Abstract heatmap figure: everything an exporter needs, nothing more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridFigure {
    /// Day tick labels, most recent first, formatted `YYYY-MM-DD`.
    pub day_labels: Vec<String>,
    /// Test tick labels along the top edge, in matrix column order,
    /// rendered rotated for readability.
    pub test_labels: Vec<String>,
    /// Cells in row-major order over `day_labels` x `test_labels`.
    pub cells: Vec<GridCell>,
    /// Canvas width, grows with the test count so cells stay legible.
    pub width_px: u32,
    /// Canvas height, grows with the day count.
    pub height_px: u32,
}

/// Render a dense matrix into a grid figure.
///
/// The day axis is reverse chronological (most recent day first) regardless
/// of row insertion order; the test axis keeps matrix column order. No
/// legend or colorbar is produced.
pub fn render(matrix: &StatusMatrix, scale: &ColorScale) -> GridFigure {
    let mut indexed: Vec<usize> = (0..matrix.n_days()).collect();
    indexed.sort_by(|&a, &b| matrix.days()[b].cmp(&matrix.days()[a]));

    let day_labels: Vec<String> = indexed
        .iter()
        .map(|&i| matrix.days()[i].format("%Y-%m-%d").to_string())
        .collect();
    let test_labels = matrix.tests().to_vec();

    let mut cells = Vec::with_capacity(matrix.n_days() * matrix.n_tests());
    for (row, &i) in indexed.iter().enumerate() {
        for (col, &value) in matrix.rows()[i].iter().enumerate() {
            cells.push(GridCell {
                row,
                col,
                value,
                color: scale.color_for(value).to_string(),
            });
        }
    }

    GridFigure {
        day_labels,
        test_labels,
        cells,
        width_px: WIDTH_BASE_PX + (CELL_SIZE_PX + CELL_GAP_PX) * matrix.n_tests() as u32,
        height_px: HEIGHT_BASE_PX + CELL_SIZE_PX * matrix.n_days() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixture() -> StatusMatrix {
        let known: Vec<String> = ["Test1", "Test2"].iter().map(|s| s.to_string()).collect();
        let mut m = StatusMatrix::new();
        m.apply_day_result("2020-08-20".parse().unwrap(), &[], &known)
            .unwrap();
        m.apply_day_result(
            "2020-08-21".parse::<NaiveDate>().unwrap(),
            &known[1..],
            &known,
        )
        .unwrap();
        m
    }

    #[test]
    fn test_days_render_most_recent_first() {
        let fig = render(&fixture(), &ColorScale::default());
        assert_eq!(fig.day_labels, vec!["2020-08-21", "2020-08-20"]);
    }

    #[test]
    fn test_cells_carry_scale_colors() {
        let fig = render(&fixture(), &ColorScale::default());
        // Row 0 is 2020-08-21: Test1 passed, Test2 failed.
        assert_eq!(fig.cells[0].color, "lightgreen");
        assert_eq!(fig.cells[1].color, "red");
        assert_eq!(fig.cells[1].value, 1);
        assert_eq!((fig.cells[1].row, fig.cells[1].col), (0, 1));
    }

    #[test]
    fn test_custom_scale_is_applied() {
        let scale = ColorScale::new("#eeeeee", "#990000");
        let fig = render(&fixture(), &scale);
        assert!(fig.cells.iter().any(|c| c.color == "#990000"));
        assert!(fig.cells.iter().any(|c| c.color == "#eeeeee"));
    }

    #[test]
    fn test_canvas_grows_with_matrix_shape() {
        let fig = render(&fixture(), &ColorScale::default());
        assert_eq!(fig.width_px, 100 + 13 * 2);
        assert_eq!(fig.height_px, 520 + 12 * 2);
    }

    #[test]
    fn test_empty_matrix_renders_empty_figure() {
        let fig = render(&StatusMatrix::new(), &ColorScale::default());
        assert!(fig.cells.is_empty());
        assert!(fig.day_labels.is_empty());
        assert!(fig.test_labels.is_empty());
    }

    #[test]
    fn test_cell_count_matches_shape() {
        let fig = render(&fixture(), &ColorScale::default());
        assert_eq!(fig.cells.len(), fig.day_labels.len() * fig.test_labels.len());
    }
}
