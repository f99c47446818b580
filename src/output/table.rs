#![forbid(unsafe_code)]

//! Column-aligned text tables
//!
//! Every column is as wide as its widest entry and is preceded by a fixed pad.
//! Cells may contain newlines: each line of a cell goes on its own output
//! line, and the row continues until its tallest cell is exhausted, with the
//! other columns left blank.

use std::collections::VecDeque;
use unicode_width::UnicodeWidthStr;

/// A table with a fixed number of columns
#[derive(Debug, Clone, Default)]
pub struct Table {
    pads: Vec<usize>,
    rows: Vec<Option<Vec<Option<String>>>>,
}

impl Table {
    /// Creates a table with one column per entry in `pads`
    ///
    /// Each pad is the number of spaces written before that column.
    pub fn new(pads: &[usize]) -> Self {
        Table {
            pads: pads.to_vec(),
            rows: Vec::new(),
        }
    }

    /// Appends a row; `None` cells render as empty
    ///
    /// Extra cells beyond the column count are ignored.
    pub fn row(&mut self, cells: Vec<Option<String>>) -> &mut Self {
        self.rows.push(Some(cells));
        self
    }

    /// Appends a blank line
    pub fn separator(&mut self) -> &mut Self {
        self.rows.push(None);
        self
    }

    /// Number of columns, fixed by the pads given to `new`
    pub fn columns(&self) -> usize {
        self.pads.len()
    }

    /// Lays the table out, one string per output line, without trailing spaces
    pub fn render(&self) -> Vec<String> {
        let widths = self.widths();
        let mut lines = Vec::new();

        for row in &self.rows {
            let Some(cells) = row else {
                lines.push(String::new());
                continue;
            };

            let mut queues: Vec<VecDeque<&str>> = (0..self.columns())
                .map(|column| match cells.get(column) {
                    Some(Some(cell)) => cell.split('\n').collect(),
                    _ => VecDeque::new(),
                })
                .collect();

            loop {
                let mut line = String::new();
                for (column, queue) in queues.iter_mut().enumerate() {
                    let text = queue.pop_front().unwrap_or("");
                    line.push_str(&" ".repeat(self.pads[column]));
                    line.push_str(text);
                    line.push_str(&" ".repeat(widths[column].saturating_sub(text.width())));
                }
                lines.push(line.trim_end().to_string());

                if queues.iter().all(VecDeque::is_empty) {
                    break;
                }
            }
        }

        lines
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths = vec![0; self.columns()];
        for cells in self.rows.iter().flatten() {
            for (column, cell) in cells.iter().take(self.columns()).enumerate() {
                if let Some(cell) = cell {
                    let widest = cell.split('\n').map(|line| line.width()).max().unwrap_or(0);
                    widths[column] = widths[column].max(widest);
                }
            }
        }
        widths
    }
}
