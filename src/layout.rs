//! Responsive column layout.
//!
//! Pure functions: fit a fixed column schema to the available terminal width
//! and project rows onto the columns that fit. Truncation is strictly
//! left-to-right: once a column overflows, no later column is considered,
//! even a narrower one.

use crate::types::{Column, Row, Schema};

/// Longest prefix of `columns` whose cumulative width fits in `available`.
pub fn fit(columns: &[Column], available: u16) -> &[Column] {
    let mut used: u32 = 0;
    let mut count = 0;

    for column in columns {
        if used + u32::from(column.width) > u32::from(available) {
            break;
        }
        used += u32::from(column.width);
        count += 1;
    }

    &columns[..count]
}

/// First `visible` cells of a row.
///
/// Panics if the row is shorter than `visible`: rows are built with the full
/// schema arity, so that would be a formatting bug.
pub fn project(row: &[String], visible: usize) -> &[String] {
    &row[..visible]
}

/// Visible projection of a table at a given width.
///
/// Always recomputed from the full rows so repeated resizes never truncate
/// already-truncated data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl TableLayout {
    pub fn compute(schema: &Schema, rows: &[Row], width: u16) -> Self {
        let columns = fit(schema.columns(), width);
        let visible = columns.len();

        TableLayout {
            columns: columns.to_vec(),
            rows: rows.iter().map(|r| project(r, visible).to_vec()).collect(),
        }
    }

    /// Width actually occupied by the visible columns.
    pub fn width(&self) -> u16 {
        self.columns.iter().map(|c| c.width).sum()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::profiles()
    }

    fn full_row(tag: &str) -> Row {
        (0..8).map(|i| format!("{}{}", tag, i)).collect()
    }

    #[test]
    fn everything_fits_at_full_width() {
        let s = schema();
        assert_eq!(fit(s.columns(), 110).len(), 8);
        assert_eq!(fit(s.columns(), 500).len(), 8);
    }

    #[test]
    fn width_25_keeps_only_id() {
        let s = schema();
        let visible = fit(s.columns(), 25);
        assert_eq!(visible, &[Column::new("Id", 10)]);
    }

    #[test]
    fn narrower_than_first_column_is_empty() {
        let s = schema();
        assert!(fit(s.columns(), 9).is_empty());
        assert!(fit(s.columns(), 0).is_empty());
    }

    #[test]
    fn exact_boundary_is_inclusive() {
        let s = schema();
        // Id + Name + Active = 40
        assert_eq!(fit(s.columns(), 40).len(), 3);
        assert_eq!(fit(s.columns(), 39).len(), 2);
    }

    #[test]
    fn stops_at_first_overflow_even_if_later_column_is_narrower() {
        let columns = [
            Column::new("a", 5),
            Column::new("wide", 50),
            Column::new("b", 1),
        ];
        let visible = fit(&columns, 10);
        assert_eq!(visible.len(), 1);
    }

    #[test]
    fn fit_is_the_longest_fitting_prefix_for_every_width() {
        let s = schema();
        for width in 0..=130u16 {
            let visible = fit(s.columns(), width);
            let used: u16 = visible.iter().map(|c| c.width).sum();
            assert!(used <= width);
            assert_eq!(visible, &s.columns()[..visible.len()]);
            if let Some(next) = s.columns().get(visible.len()) {
                assert!(used + next.width > width, "prefix could be extended at width {}", width);
            }
        }
    }

    #[test]
    fn project_takes_leading_cells() {
        let row = full_row("c");
        for k in 0..=8 {
            let projected = project(&row, k);
            assert_eq!(projected.len(), k);
            assert_eq!(projected, &row[..k]);
        }
    }

    #[test]
    fn compute_is_idempotent() {
        let s = schema();
        let rows = vec![full_row("a"), full_row("b")];
        let first = TableLayout::compute(&s, &rows, 45);
        let second = TableLayout::compute(&s, &rows, 45);
        assert_eq!(first, second);
        assert_eq!(first.columns.len(), 3);
        assert!(first.rows.iter().all(|r| r.len() == 3));
    }

    #[test]
    fn compute_at_zero_width_keeps_rows_with_no_cells() {
        let s = schema();
        let rows = vec![full_row("a")];
        let layout = TableLayout::compute(&s, &rows, 0);
        assert!(layout.columns.is_empty());
        assert_eq!(layout.rows, vec![Vec::<String>::new()]);
        assert_eq!(layout.width(), 0);
    }
}
