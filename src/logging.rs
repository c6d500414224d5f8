//! Logging setup.
//!
//! All modules log through `tracing`. Native builds (tests, tooling) get the
//! fmt subscriber; in the browser panics are routed to the console instead.

/// Install the process-wide subscriber. Safe to call more than once.
pub fn init() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    }

    #[cfg(all(target_arch = "wasm32", feature = "console_error_panic_hook"))]
    console_error_panic_hook::set_once();
}
