//! Logging setup for the command-line tool.
//!
//! Logs go to stderr so rendered output on stdout stays clean. The default
//! level is `warn` (`debug` for eidtext with `--verbose`); set `EID_LOG` to
//! any `EnvFilter` directive to override both.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Environment variable holding an explicit filter directive.
pub const LOG_ENV: &str = "EID_LOG";

/// Filter used when `EID_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,eidtext=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let _ = tracing_subscriber::registry().with(filter).with(stderr_layer).try_init();
}
