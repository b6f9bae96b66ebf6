//! Cell occupancy shared by the grid and table adapters.
//!
//! [§ 8.5 Grid Item Placement Algorithm](https://www.w3.org/TR/css-grid-1/#auto-placement-algo)

/// Largest span, and last line, a cell may claim. HTML caps `colspan` at
/// 1000; grid spans and line numbers are held to the same bound.
pub(crate) const MAX_SPAN: usize = 1000;

/// Rows of occupied flags over a fixed number of columns. Rows are added
/// on demand.
#[derive(Debug, Clone, Default)]
pub(crate) struct Occupancy {
    cells: Vec<Vec<bool>>,
    columns: usize,
}

impl Occupancy {
    pub(crate) fn new(columns: usize) -> Self {
        Self {
            cells: Vec::new(),
            columns,
        }
    }

    pub(crate) const fn columns(&self) -> usize {
        self.columns
    }

    pub(crate) fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Widen every row to at least `columns`.
    pub(crate) fn widen(&mut self, columns: usize) {
        if columns <= self.columns {
            return;
        }
        self.columns = columns;
        for row in &mut self.cells {
            row.resize(columns, false);
        }
    }

    fn grow(&mut self, rows: usize) {
        while self.cells.len() < rows {
            self.cells.push(vec![false; self.columns]);
        }
    }

    /// Whether the area is inside the columns and unoccupied.
    pub(crate) fn is_free(
        &mut self,
        column: usize,
        column_span: usize,
        row: usize,
        row_span: usize,
    ) -> bool {
        let column_end = column + column_span;
        if column_end > self.columns {
            return false;
        }
        self.grow(row + row_span);
        self.cells[row..row + row_span]
            .iter()
            .all(|cells| cells[column..column_end].iter().all(|cell| !cell))
    }

    pub(crate) fn mark(&mut self, column: usize, column_span: usize, row: usize, row_span: usize) {
        self.widen(column + column_span);
        self.grow(row + row_span);
        for cells in &mut self.cells[row..row + row_span] {
            for cell in &mut cells[column..column + column_span] {
                *cell = true;
            }
        }
    }

    /// First free column of `row` with room for `column_span`, searching from
    /// `from`. Widens the grid when no column fits.
    pub(crate) fn first_free_in_row(
        &mut self,
        row: usize,
        from: usize,
        column_span: usize,
        row_span: usize,
    ) -> usize {
        let mut column = from;
        while column + column_span <= self.columns {
            if self.is_free(column, column_span, row, row_span) {
                return column;
            }
            column += 1;
        }
        let start = column.max(self.columns);
        self.widen(start + column_span);
        start
    }
}
