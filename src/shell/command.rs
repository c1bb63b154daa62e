//! Parsing of shell command lines

use std::path::PathBuf;
use std::str::FromStr;

use crate::shell::ShellError;

/// One parsed shell command
///
/// Matrix references are 0-based registry indices; cell coordinates are the
/// matrix's own 1-based indices.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Create { rows: usize, cols: usize },
    Show(usize),
    ShowIndexes,
    Sum(usize, usize),
    Multiply(usize, usize),
    Clear(usize),
    Read(PathBuf),
    Save(usize, PathBuf),
    Count(usize),
    Update {
        matrix: usize,
        row: usize,
        col: usize,
        value: f64,
    },
    EraseAll,
    Help,
    Exit,
}

/// `(usage, description)` for every command, in help order
pub const COMMANDS: &[(&str, &str)] = &[
    ("exit", "leave the shell"),
    ("create m n", "create an empty matrix with m rows and n columns"),
    ("show i", "print matrix i"),
    ("showidx", "list the indices of all matrices"),
    ("sum i j", "add matrices i and j"),
    ("multiply i j", "multiply matrix i by matrix j"),
    ("clear i", "remove every element of matrix i"),
    ("read <file>", "load a matrix from a triplet file"),
    ("save i <file>", "write matrix i to a triplet file"),
    ("count i", "count the non-zero elements of matrix i"),
    ("update m i j value", "set cell (i, j) of matrix m"),
    ("eraseAll", "delete every matrix"),
    ("help", "show this list"),
];

fn usage(name: &str) -> &'static str {
    COMMANDS
        .iter()
        .find(|(usage, _)| usage.split_whitespace().next() == Some(name))
        .map(|(usage, _)| *usage)
        .unwrap_or("help")
}

/// Checks the argument count and parses each argument
fn args<const N: usize>(name: &str, rest: &[&str]) -> Result<[String; N], ShellError> {
    if rest.len() != N {
        return Err(ShellError::Usage(usage(name)));
    }
    Ok(std::array::from_fn(|k| rest[k].to_owned()))
}

fn number<T: FromStr>(name: &str, token: &str) -> Result<T, ShellError> {
    token.parse().map_err(|_| ShellError::Usage(usage(name)))
}

impl FromStr for Command {
    type Err = ShellError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, rest)) = tokens.split_first() else {
            return Err(ShellError::Usage("help"));
        };

        let command = match name {
            "exit" => {
                args::<0>(name, rest)?;
                Command::Exit
            }
            "help" => {
                args::<0>(name, rest)?;
                Command::Help
            }
            "showidx" => {
                args::<0>(name, rest)?;
                Command::ShowIndexes
            }
            "eraseAll" => {
                args::<0>(name, rest)?;
                Command::EraseAll
            }
            "create" => {
                let [m, n] = args::<2>(name, rest)?;
                Command::Create {
                    rows: number(name, &m)?,
                    cols: number(name, &n)?,
                }
            }
            "show" => {
                let [i] = args::<1>(name, rest)?;
                Command::Show(number(name, &i)?)
            }
            "clear" => {
                let [i] = args::<1>(name, rest)?;
                Command::Clear(number(name, &i)?)
            }
            "count" => {
                let [i] = args::<1>(name, rest)?;
                Command::Count(number(name, &i)?)
            }
            "sum" => {
                let [i, j] = args::<2>(name, rest)?;
                Command::Sum(number(name, &i)?, number(name, &j)?)
            }
            "multiply" => {
                let [i, j] = args::<2>(name, rest)?;
                Command::Multiply(number(name, &i)?, number(name, &j)?)
            }
            "read" => {
                let [path] = args::<1>(name, rest)?;
                Command::Read(PathBuf::from(path))
            }
            "save" => {
                let [i, path] = args::<2>(name, rest)?;
                Command::Save(number(name, &i)?, PathBuf::from(path))
            }
            "update" => {
                let [m, i, j, value] = args::<4>(name, rest)?;
                Command::Update {
                    matrix: number(name, &m)?,
                    row: number(name, &i)?,
                    col: number(name, &j)?,
                    value: number(name, &value)?,
                }
            }
            other => return Err(ShellError::UnknownCommand(other.to_owned())),
        };
        Ok(command)
    }
}
