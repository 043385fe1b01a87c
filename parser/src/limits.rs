//! Fixed sheet bounds. These are a recompile-time constant, not a runtime
//! knob, so a config-file/env layer would be unjustified for this crate.

/// Maximum number of rows a position may address (exclusive upper bound).
pub const MAX_ROWS: u32 = 16384;

/// Maximum number of columns a position may address (exclusive upper bound).
pub const MAX_COLS: u32 = 16384;
