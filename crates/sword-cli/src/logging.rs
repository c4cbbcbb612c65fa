//! Logging setup for the `sword` binary
//!
//! Everything goes to stderr so stdout stays clean for table or JSON output.
//! `RUST_LOG` takes precedence over the default filter.

use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Whether to include file/line information in logs
    pub include_location: bool,

    /// Whether to log span creation and close (for timing)
    pub enable_spans: bool,

    /// Default log level filter
    pub default_filter: String,
}

impl LoggingConfig {
    /// Warnings only, which surfaces read diagnostics
    pub fn quiet() -> Self {
        Self {
            include_location: false,
            enable_spans: false,
            default_filter: "warn".to_string(),
        }
    }

    /// Debug output for the sword crates
    pub fn verbose() -> Self {
        Self {
            include_location: true,
            enable_spans: true,
            default_filter:
                "info,sword_cli=debug,sword_core=debug,sword_model=debug,sword_driver_sqlite=debug"
                    .to_string(),
        }
    }
}

/// Initialize the logging system with the given configuration
pub fn init(config: LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    // NEW fires once per span; ENTER would repeat on every async re-poll
    let span_events = if config.enable_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_span_events(span_events)
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).try_init()?;

    tracing::debug!(filter = %config.default_filter, "logging initialized");
    Ok(())
}
