//! Tracing initialization.
//!
//! The crate is a library with no binary of its own, so subscriber setup is
//! explicit: host applications (and tests) call [`init`] once. All other
//! modules only emit `tracing` events.

use tracing_subscriber::EnvFilter;

/// Install a global tracing subscriber filtered by `RUST_LOG`
/// (default level: `info`).
///
/// Idempotent: a second call is a no-op rather than a panic, so tests can
/// call it freely.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
