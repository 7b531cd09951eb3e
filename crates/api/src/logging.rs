//! Logging initialization for processes embedding sbomkit.
//!
//! Installs a `tracing-subscriber` registry driven by the `[general]` section
//! of `SbomToolConfig`. `RUST_LOG` takes precedence over the configured level.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use sbomkit_core::Verbosity;
use sbomkit_core::config::GeneralConfig;

/// Initialize the global tracing subscriber.
///
/// Must be called at most once per process. Library code never calls this.
/// When `verbosity` is given (e.g. from `RuntimeConfiguration::verbosity`),
/// it replaces `config.log_level`. `RUST_LOG` still wins over both.
///
/// # Formats
///
/// * `"json"` - JSON lines (default)
/// * `"pretty"` - human-readable multi-line output
pub fn init_tracing(config: &GeneralConfig, verbosity: Option<Verbosity>) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directive = level_directive(config, verbosity);
            EnvFilter::try_new(directive)
                .with_context(|| format!("invalid log level '{directive}'"))?
        }
    };

    let (json, pretty) = match config.log_format.as_str() {
        "json" => (Some(tracing_subscriber::fmt::layer().json()), None),
        "pretty" => (None, Some(tracing_subscriber::fmt::layer().pretty())),
        other => anyhow::bail!("unknown log format '{other}', expected 'json' or 'pretty'"),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json)
        .with(pretty)
        .try_init()
        .with_context(|| {
            format!(
                "failed to initialize {} tracing subscriber",
                config.log_format
            )
        })?;

    Ok(())
}

fn level_directive(config: &GeneralConfig, verbosity: Option<Verbosity>) -> &str {
    match verbosity {
        Some(verbosity) => filter_directive(verbosity),
        None => &config.log_level,
    }
}

/// Map a caller-facing verbosity to a `tracing` filter directive.
pub fn filter_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Verbose => "trace",
        Verbosity::Debug => "debug",
        Verbosity::Information => "info",
        Verbosity::Warning => "warn",
        Verbosity::Error | Verbosity::Fatal => "error",
    }
}
