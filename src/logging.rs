use std::io::{self, IsTerminal};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `RUST_LOG` wins over `verbose`.
/// Safe to call more than once; later calls are no-ops.
pub fn init(verbose: bool) {
    let default = if verbose { "strmatch=debug" } else { "strmatch=warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(io::stderr().is_terminal())
            .with_target(false),
    );

    if subscriber.try_init().is_err() {
        return;
    }

    tracing::debug!(verbose, "tracing initialized");
}
