//! Shared test setup: once-guarded tracing initialization.

use std::env;
use std::sync::Once;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "debug");
        }
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_test_writer();
        let _ = tracing_subscriber::registry()
            .with(fmt_layer.with_filter(EnvFilter::from_default_env()))
            .try_init();
        info!("Test setup complete");
    });
}
