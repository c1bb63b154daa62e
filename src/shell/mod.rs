//! Line-oriented interactive shell over a registry of sparse matrices
//!
//! The shell reads one command per line, resolves matrix indices through the
//! [`Registry`], calls into the engine and prints the outcome. Errors are
//! reported and the loop carries on; only `exit` or end of input stop it.

pub mod command;
pub mod registry;
pub mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::error::{ImportError, MatrixError};
use crate::io::{read_triplets_file, write_triplets_file};
use crate::matrix::{multiply_with_config, sum, ArithmeticConfig, SparseMatrix};

pub use command::{Command, COMMANDS};
pub use registry::Registry;
pub use render::render;

/// Errors reported by the shell for a single command
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("unknown command `{0}`; type `help` for the list of commands")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid matrix index {index} ({len} matrices loaded)")]
    UnknownMatrix { index: usize, len: usize },

    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error("cannot read {}: {source}", path.display())]
    Import {
        path: PathBuf,
        #[source]
        source: ImportError,
    },

    #[error("cannot write {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failure writing to the shell's own output
    #[error("output error: {0}")]
    Io(#[from] io::Error),
}

/// Settings for the interactive shell
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Printed before reading each command
    pub prompt: String,
    /// Width of one rendered cell, in characters
    pub cell_width: usize,
    /// Decimals shown per rendered cell
    pub precision: usize,
    /// Ask before keeping a sum or product; when off, results are always kept
    pub confirm_save: bool,
    pub arithmetic: ArithmeticConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: ">> ".to_string(),
            cell_width: 6,
            precision: 1,
            confirm_save: true,
            arithmetic: ArithmeticConfig::default(),
        }
    }
}

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<R, W> {
    input: R,
    output: W,
    registry: Registry,
    config: ShellConfig,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, config: ShellConfig) -> Self {
        Self {
            input,
            output,
            registry: Registry::new(),
            config,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Runs the command loop until `exit` or end of input
    ///
    /// Only failures to read input or write output are returned; command
    /// errors are printed and the loop continues.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Sparse matrix shell. Type 'help' for the list of commands.")?;

        loop {
            write!(self.output, "\n{}", self.config.prompt)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                info!("end of input");
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let outcome = line
                .parse::<Command>()
                .and_then(|command| self.execute(command));

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(ShellError::Io(err)) => return Err(err),
                Err(err) => {
                    warn!(command = line.trim(), error = %err, "command failed");
                    writeln!(self.output, "error: {err}")?;
                }
            }
        }

        writeln!(self.output, "Bye.")?;
        self.output.flush()
    }

    /// Reads one line; bytes that are not valid UTF-8 become U+FFFD
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Executes a single command against the registry
    pub fn execute(&mut self, command: Command) -> Result<Flow, ShellError> {
        match command {
            Command::Exit => return Ok(Flow::Exit),
            Command::Help => self.help()?,
            Command::Create { rows, cols } => {
                let index = self.registry.push(SparseMatrix::new(rows, cols)?);
                info!(index, rows, cols, "created matrix");
                writeln!(self.output, "Matrix created with index {index}.")?;
            }
            Command::Read(path) => {
                let matrix = read_triplets_file(&path).map_err(|source| ShellError::Import {
                    path: path.clone(),
                    source,
                })?;
                let (rows, cols) = matrix.dimensions();
                let index = self.registry.push(matrix);
                writeln!(
                    self.output,
                    "Loaded {rows}x{cols} matrix from {} as index {index}.",
                    path.display()
                )?;
            }
            Command::Save(index, path) => {
                let matrix = self.registry.get(index)?;
                write_triplets_file(matrix, &path).map_err(|source| ShellError::Export {
                    path: path.clone(),
                    source,
                })?;
                writeln!(self.output, "Matrix {index} saved to {}.", path.display())?;
            }
            Command::ShowIndexes => {
                if self.registry.is_empty() {
                    writeln!(self.output, "No matrices loaded.")?;
                } else {
                    let indices: Vec<String> =
                        (0..self.registry.len()).map(|i| i.to_string()).collect();
                    writeln!(self.output, "Matrix indices: {}", indices.join(", "))?;
                }
            }
            Command::Show(index) => {
                let matrix = self.registry.get(index)?;
                writeln!(self.output, "Matrix [{index}]:")?;
                render(
                    matrix,
                    self.config.cell_width,
                    self.config.precision,
                    &mut self.output,
                )?;
            }
            Command::Sum(i, j) => {
                let result = sum(self.registry.get(i)?, self.registry.get(j)?)?;
                writeln!(self.output, "Result of sum:")?;
                self.offer_result(result)?;
            }
            Command::Multiply(i, j) => {
                let result = multiply_with_config(
                    self.registry.get(i)?,
                    self.registry.get(j)?,
                    &self.config.arithmetic,
                )?;
                writeln!(self.output, "Result of multiplication:")?;
                self.offer_result(result)?;
            }
            Command::Clear(index) => {
                self.registry.get_mut(index)?.clear();
                writeln!(self.output, "Matrix {index} cleared.")?;
            }
            Command::Count(index) => {
                let count = self.registry.get(index)?.count_non_zero();
                writeln!(self.output, "Matrix {index} has {count} non-zero elements.")?;
            }
            Command::Update {
                matrix,
                row,
                col,
                value,
            } => {
                self.registry.get_mut(matrix)?.insert(row, col, value)?;
                writeln!(self.output, "Value updated.")?;
            }
            Command::EraseAll => {
                let removed = self.registry.erase_all();
                info!(removed, "erased all matrices");
                writeln!(self.output, "All matrices erased.")?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Prints an arithmetic result and keeps it if the user agrees
    fn offer_result(&mut self, result: SparseMatrix<f64>) -> Result<(), ShellError> {
        render(
            &result,
            self.config.cell_width,
            self.config.precision,
            &mut self.output,
        )?;

        if self.config.confirm_save {
            write!(self.output, "Save result? (y/n): ")?;
            self.output.flush()?;
            let answer = self.read_line()?.unwrap_or_default();
            if !matches!(answer.trim_start().chars().next(), Some('y' | 'Y')) {
                writeln!(self.output, "Result discarded.")?;
                return Ok(());
            }
        }

        let index = self.registry.push(result);
        writeln!(self.output, "Result saved as index {index}.")?;
        Ok(())
    }

    fn help(&mut self) -> io::Result<()> {
        let rule = "-".repeat(72);
        writeln!(self.output, "{rule}")?;
        for (usage, description) in COMMANDS {
            writeln!(self.output, "{usage:<24}{description}")?;
        }
        writeln!(self.output, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(script: &str, config: ShellConfig) -> (String, usize) {
        let mut output = Vec::new();
        let mut shell = Shell::new(script.as_bytes(), &mut output, config);
        shell.run().unwrap();
        let loaded = shell.registry().len();
        (String::from_utf8(output).unwrap(), loaded)
    }

    #[test]
    fn test_create_update_count() {
        let (out, loaded) = run_script(
            "create 2 2\nupdate 0 1 1 5\nupdate 0 2 2 3\ncount 0\nexit\n",
            ShellConfig::default(),
        );

        assert_eq!(loaded, 1);
        assert!(out.contains("Matrix created with index 0."));
        assert!(out.contains("Matrix 0 has 2 non-zero elements."));
        assert!(out.ends_with("Bye.\n"));
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let (out, loaded) = run_script(
            "create 0 3\nshow 4\nfrobnicate\nupdate 0 1 1 1\ncreate 1 1\n",
            ShellConfig::default(),
        );

        assert!(out.contains("error: invalid dimensions 0x3"));
        assert!(out.contains("error: invalid matrix index 4 (0 matrices loaded)"));
        assert!(out.contains("error: unknown command `frobnicate`"));
        assert_eq!(loaded, 1);
    }

    #[test]
    fn test_invalid_utf8_line_is_reported() {
        let script: &[u8] = b"create 1 1\nshow \xff\ncreate 2 2\nshowidx\n";
        let mut output = Vec::new();
        let mut shell = Shell::new(script, &mut output, ShellConfig::default());
        shell.run().unwrap();
        let loaded = shell.registry().len();
        let out = String::from_utf8(output).unwrap();

        assert!(out.contains("error: usage: show i"));
        assert!(out.contains("Matrix created with index 1."));
        assert!(out.contains("Matrix indices: 0, 1"));
        assert_eq!(loaded, 2);
    }

    #[test]
    fn test_oversized_create_is_reported() {
        let (out, loaded) = run_script(
            "create 18446744073709551615 1\ncreate 1 1\n",
            ShellConfig::default(),
        );

        assert!(out.contains("error: dimensions 18446744073709551615x1 are too large"));
        assert_eq!(loaded, 1);
    }

    #[test]
    fn test_sum_asks_before_saving() {
        let script = "create 1 1\nupdate 0 1 1 2\nsum 0 0\nn\nsum 0 0\ny\nshowidx\n";
        let (out, loaded) = run_script(script, ShellConfig::default());

        assert!(out.contains("Result discarded."));
        assert!(out.contains("Result saved as index 1."));
        assert!(out.contains("Matrix indices: 0, 1"));
        assert_eq!(loaded, 2);
    }

    #[test]
    fn test_results_kept_without_confirmation() {
        let config = ShellConfig {
            confirm_save: false,
            ..ShellConfig::default()
        };
        let (out, loaded) = run_script("create 2 2\nmultiply 0 0\n", config);

        assert!(out.contains("Result of multiplication:"));
        assert!(!out.contains("Save result?"));
        assert_eq!(loaded, 2);
    }

    #[test]
    fn test_erase_all() {
        let (out, loaded) = run_script(
            "create 1 1\ncreate 2 2\neraseAll\nshowidx\n",
            ShellConfig::default(),
        );

        assert!(out.contains("All matrices erased."));
        assert!(out.contains("No matrices loaded."));
        assert_eq!(loaded, 0);
    }
}
