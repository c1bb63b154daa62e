//! Console rendering of matrices

use std::io::{self, Write};

use crate::matrix::SparseMatrix;

/// Prints `matrix` as a dense grid, zeros included
///
/// Each cell is `cell_width` characters wide with `precision` decimals; the
/// grid is framed by `|` on both sides and a dashed rule above and below.
pub fn render<W: Write>(
    matrix: &SparseMatrix<f64>,
    cell_width: usize,
    precision: usize,
    out: &mut W,
) -> io::Result<()> {
    let rule = "-".repeat(matrix.cols() * cell_width + 3);
    writeln!(out, "{rule}")?;

    for i in 1..=matrix.rows() {
        write!(out, "|")?;
        let mut stored = matrix.row_iter(i).peekable();
        for j in 1..=matrix.cols() {
            let value = match stored.peek() {
                Some(&(col, &value)) if col == j => {
                    stored.next();
                    value
                }
                _ => 0.0,
            };
            write!(out, "{value:>cell_width$.precision$}")?;
        }
        writeln!(out, " |")?;
    }

    writeln!(out, "{rule}")
}
