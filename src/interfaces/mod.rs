// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod timestamp;

pub use timestamp::{instant_from_timestamp, parse_time_key, IntoTimestamp};
