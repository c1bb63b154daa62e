//! Configuration for the arithmetic kernels

/// Default threshold for switching from dense to sort-based accumulation
pub const DEFAULT_DENSE_ACCUM_THRESHOLD: usize = 256;

/// Tuning parameters for [`multiply_with_config`](crate::matrix::multiply_with_config)
#[derive(Debug, Clone, PartialEq)]
pub struct ArithmeticConfig {
    /// Widest output (in columns) that still uses a dense row accumulator
    pub dense_accum_threshold: usize,
}

impl Default for ArithmeticConfig {
    fn default() -> Self {
        Self {
            dense_accum_threshold: DEFAULT_DENSE_ACCUM_THRESHOLD,
        }
    }
}

impl ArithmeticConfig {
    /// Config that always uses the sort-based accumulator
    pub fn sort_only() -> Self {
        Self {
            dense_accum_threshold: 0,
        }
    }

    /// Config that always uses the dense accumulator
    pub fn dense_only() -> Self {
        Self {
            dense_accum_threshold: usize::MAX,
        }
    }
}
