// Matrix data structures and operations

pub mod arithmetic;
pub mod config;
pub mod linked;
pub(crate) mod node;

pub use arithmetic::{multiply, multiply_with_config, sum};
pub use config::ArithmeticConfig;
pub use linked::{RowIter, SparseMatrix, Triplets};
