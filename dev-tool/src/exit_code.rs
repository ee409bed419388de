/// Everything went fine.
pub(crate) const NO_ERROR: i32 = 0;

/// The command ran to completion, but some inputs were skipped.
pub(crate) const NON_FATAL_ERROR: i32 = 1;

/// The command was aborted.
pub(crate) const FATAL_ERROR: i32 = 2;
