//! # ringmat: sparse matrices on sentinel rings
//!
//! A sparse matrix whose non-zero entries are linked nodes hanging off a
//! skeleton of sentinels: one master sentinel, one sentinel per row and one
//! per column. Every row keeps its entries in a circular list sorted by
//! column, so the matrix never materializes dense storage.
//!
//! ## Overview
//!
//! - [`SparseMatrix`]: construction, insert/update, lookup, counting,
//!   clearing and row-major enumeration of stored triplets
//! - [`sum`] and [`multiply`]: arithmetic producing a new matrix, with
//!   row accumulators chosen by [`ArithmeticConfig`]
//! - [`io`]: the `rows cols` + `row col value` triplet text format
//! - [`shell`]: the line-oriented command shell used by the binary
//!
//! ## Usage
//!
//! ```
//! use ringmat::{multiply, sum, SparseMatrix};
//!
//! let mut a = SparseMatrix::new(2, 2)?;
//! a.insert(1, 1, 5.0)?;
//! a.insert(2, 2, 3.0)?;
//! assert_eq!(a.count_non_zero(), 2);
//! assert_eq!(a.get(1, 2)?, 0.0);
//!
//! let doubled = sum(&a, &a)?;
//! assert_eq!(doubled.get(1, 1)?, 10.0);
//!
//! let identity = SparseMatrix::identity(2)?;
//! assert_eq!(multiply(&doubled, &identity)?, doubled);
//! # Ok::<(), ringmat::MatrixError>(())
//! ```

pub mod accumulator;
pub mod error;
pub mod io;
pub mod matrix;
pub mod shell;
pub mod utils;

// Re-export primary components
pub use error::{ImportError, MatrixError, Result};
pub use matrix::{multiply, multiply_with_config, sum, ArithmeticConfig, SparseMatrix};
pub use utils::{from_dense, from_sprs, to_dense, to_sprs_csr};

/// Version information for the ringmat library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
