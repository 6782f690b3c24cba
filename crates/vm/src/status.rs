//! Run status codes.
//!
//! A run finishes with [`NO_ERROR`], the code passed to EXIT, or one of the
//! two input fault codes. Fatal errors are reported separately as
//! [`RuntimeError`](crate::RuntimeError) and carry no status.

/// The script ran off its end, or exited with 0.
pub const NO_ERROR: i64 = 0;

/// An INPUT line could not be interpreted in the requested format.
pub const INVALID_INPUT: i64 = -1;

/// An INPUT instruction hit end of input.
pub const END_OF_INPUT: i64 = -2;
