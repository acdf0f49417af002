//! Opt-in JSON trace log for debugging key handling inside a host.

use std::path::Path;

/// Targets traced when `RUST_LOG` is unset.
pub const DEFAULT_TRACE_FILTER: &str = "tabim_core=debug,tabim_session=debug";

/// Start writing JSON-lines traces to `log_dir/file_name`.
///
/// Only the first call can install the subscriber. Returns `false` when
/// tracing is compiled out, or another global subscriber already exists.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path, file_name: &str) -> bool {
    use std::sync::OnceLock;

    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    static INSTALLED: OnceLock<bool> = OnceLock::new();

    *INSTALLED.get_or_init(|| {
        let file_appender = tracing_appender::rolling::never(log_dir, file_name);
        let (writer, guard) = tracing_appender::non_blocking(file_appender);

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_FILTER));
        let installed = tracing_subscriber::fmt()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_env_filter(filter)
            .try_init()
            .is_ok();
        if installed {
            // Flushes until process exit; hosts keep the engine loaded.
            std::mem::forget(guard);
        }
        installed
    })
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &Path, _file_name: &str) -> bool {
    false
}
