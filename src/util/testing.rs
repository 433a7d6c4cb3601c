//! Shared logging setup for tests
//!
//! Integration tests call [`init_test_setup`] once per binary, usually from a
//! `#[ctor::ctor]` hook. `RUST_LOG` overrides the default filter.

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{fmt, fmt::format::FmtSpan, prelude::*, EnvFilter};

/// gdmate spans at trace level; dependencies only when they warn.
const DEFAULT_FILTER: &str = "warn,gdmate=trace";

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let layer = fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter);

        // another harness may already own the global subscriber
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            eprintln!("test logging: global subscriber already set");
            return;
        }
        debug!("test logging ready");
    });
}
