//! Log filter setup

use tracing_subscriber::EnvFilter;

/// Build the log filter.
///
/// A valid, non-empty `RUST_LOG` wins; otherwise `-v` selects `debug` and the default is `info`.
pub fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    if let Some(filter) = rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
    {
        return filter;
    }
    EnvFilter::new(if verbose { "debug" } else { "info" })
}
