//! Triplet text import and export
//!
//! The format is a `rows cols` header followed by whitespace-separated
//! `row col value` triplets until end of input, with 1-based indices.
//! Line breaks carry no meaning beyond error reporting.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::ImportError;
use crate::matrix::SparseMatrix;

/// Whitespace-separated tokens tagged with their 1-based line number
struct Tokens<R> {
    lines: io::Lines<R>,
    line_no: usize,
    pending: std::vec::IntoIter<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            pending: Vec::new().into_iter(),
        }
    }

    fn next_token(&mut self) -> Result<Option<(usize, String)>, ImportError> {
        loop {
            if let Some(token) = self.pending.next() {
                return Ok(Some((self.line_no, token)));
            }
            match self.lines.next() {
                Some(line) => {
                    let line = line?;
                    self.line_no += 1;
                    self.pending = line
                        .split_whitespace()
                        .map(str::to_owned)
                        .collect::<Vec<_>>()
                        .into_iter();
                }
                None => return Ok(None),
            }
        }
    }
}

fn parse<T: std::str::FromStr>((line, token): (usize, String)) -> Result<T, ImportError> {
    token
        .parse()
        .map_err(|_| ImportError::InvalidToken { line, token })
}

/// Reads a matrix in triplet format
///
/// Triplets with a zero value are skipped without checking their indices.
/// Later triplets overwrite earlier ones at the same position.
///
/// # Errors
///
/// Fails on I/O errors, a missing or malformed header, a malformed token,
/// a trailing incomplete triplet, or indices outside the declared shape.
/// No partially filled matrix is returned on failure.
pub fn read_triplets<R: BufRead>(reader: R) -> Result<SparseMatrix<f64>, ImportError> {
    let mut tokens = Tokens::new(reader);

    let rows: usize = parse(tokens.next_token()?.ok_or(ImportError::MissingHeader)?)?;
    let cols: usize = parse(tokens.next_token()?.ok_or(ImportError::MissingHeader)?)?;
    let mut matrix = SparseMatrix::new(rows, cols)?;

    let mut skipped = 0usize;
    while let Some(first) = tokens.next_token()? {
        let line = first.0;
        let i: usize = parse(first)?;
        let j: usize = parse(
            tokens
                .next_token()?
                .ok_or(ImportError::IncompleteRecord { line })?,
        )?;
        let value: f64 = parse(
            tokens
                .next_token()?
                .ok_or(ImportError::IncompleteRecord { line })?,
        )?;

        if value == 0.0 {
            skipped += 1;
            continue;
        }
        matrix.insert(i, j, value)?;
    }

    debug!(skipped, "skipped zero-valued triplets");
    Ok(matrix)
}

/// Reads a matrix in triplet format from a file
pub fn read_triplets_file<P: AsRef<Path>>(path: P) -> Result<SparseMatrix<f64>, ImportError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let matrix = read_triplets(BufReader::new(file))?;

    info!(
        path = %path.display(),
        rows = matrix.rows(),
        cols = matrix.cols(),
        nnz = matrix.count_non_zero(),
        "loaded matrix"
    );
    Ok(matrix)
}

/// Writes a matrix in triplet format, one triplet per line in row-major order
pub fn write_triplets<W: Write>(matrix: &SparseMatrix<f64>, mut writer: W) -> io::Result<()> {
    writeln!(writer, "{} {}", matrix.rows(), matrix.cols())?;
    for (i, j, value) in matrix.triplets() {
        writeln!(writer, "{} {} {}", i, j, value)?;
    }
    writer.flush()
}

/// Writes a matrix in triplet format to a file, replacing its contents
pub fn write_triplets_file<P: AsRef<Path>>(matrix: &SparseMatrix<f64>, path: P) -> io::Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_triplets(matrix, BufWriter::new(file))?;

    info!(path = %path.display(), "saved matrix");
    Ok(())
}
