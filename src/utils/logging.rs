// ============================================================================
// Logging Setup
// tracing-subscriber wiring for binaries, benches and tests
// ============================================================================

use tracing::Level;

/// Install a global `fmt` subscriber that prints events at `level` and above.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .try_init()
        .is_ok()
}
