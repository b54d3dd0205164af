

/// Load-use stall detection and insertion.
pub mod load_use;
