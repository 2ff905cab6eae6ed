//! Logging and observability infrastructure for appforge
//!
//! Sets up `tracing` with an env-filter and a compact formatter. The
//! pipeline emits structured events (tier, batch, path) from the
//! orchestrator and file generator; verbose mode widens the filter to
//! include debug-level events from appforge crates.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Initialize the tracing subscriber for structured logging.
///
/// Honors `RUST_LOG` when set; otherwise defaults to `appforge=info,warn`
/// (or `appforge=debug,info` in verbose mode).
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            if verbose {
                EnvFilter::try_new("appforge=debug,info")
            } else {
                EnvFilter::try_new("appforge=info,warn")
            }
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if verbose {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_line_number(false)
                    .with_file(false)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_line_number(false)
                    .with_file(false)
                    .compact(),
            )
            .try_init()?;
    }

    Ok(())
}

/// Create a span for a single pipeline run with structured fields.
#[must_use]
pub fn pipeline_span(project: &str, operation: &str) -> tracing::Span {
    tracing::span!(
        tracing::Level::INFO,
        "pipeline_run",
        project = %project,
        operation = %operation,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_span_constructs_without_subscriber() {
        let span = pipeline_span("storefront", "tiered");
        let _guard = span.enter();
    }
}
