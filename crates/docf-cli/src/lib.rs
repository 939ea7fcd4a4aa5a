//! docf library - expose modules for testing
//!
//! The binary in `main.rs` is a thin clap front end over these modules.

pub mod commands;
pub mod common;

pub use common::GlobalOpts;
pub use docf_config as config_manager;
pub use docf_logger as logger;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a tracing filter that overrides `-v`
pub const LOG_ENV: &str = "DOCF_LOG";

/// Install the tracing subscriber used by the library crates
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| logger::verbosity_to_filter().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init();
}
