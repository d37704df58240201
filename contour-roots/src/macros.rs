//! Internal macros

/// Emit a diagnostic trace event: `info` when verbose, `debug` otherwise
macro_rules! report {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::info!($($arg)+);
        } else {
            tracing::debug!($($arg)+);
        }
    };
}
