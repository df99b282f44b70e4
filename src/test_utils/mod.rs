//! Test utilities for Folio
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration tests.
//!
//! - [`init_test_logging`] installs a test-writer tracing subscriber once
//! - [`TestDocument`] lays out a document directory in a temp dir, with an
//!   optional shell-script converter that records its arguments (unix only)

pub mod fixtures;

pub use fixtures::TestDocument;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. An explicit `level` wins over
/// `RUST_LOG`; with neither, nothing is logged.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
