//! Diagnostic output for the CLI.
//!
//! The library only emits `tracing` events; nothing is printed unless a
//! subscriber is installed here.

use tracing_subscriber::fmt;

/// Install a stderr subscriber when `verbose` is set.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbose: bool) {
    if !verbose {
        return;
    }
    let _ = fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .try_init();
}
