//! Centralized logging configuration
//!
//! Structured logging through `tracing`:
//! - JSON output by default, one event per line
//! - Pretty-print format for development (`LOG_FORMAT=pretty`)
//! - Level filtering via `RUST_LOG`
//! - Redaction helpers for key material
//!
//! Events go to stderr so the CLI's JSON result on stdout stays clean.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RUST_LOG` | `babyjub_elgamal=info` | Log level filter (standard tracing format) |
//! | `LOG_FORMAT` | `json` | Output format: `json` or `pretty` |
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use babyjub_elgamal::config::logging::{init_logging, SanitizedValue};
//!
//! init_logging();
//!
//! let sk = "2291123624948246627368989940774052753470489062495018070576418670157516550852";
//! tracing::info!(private_key = %SanitizedValue::new(sk), "Loaded key");
//! // Output: private_key = "2291...REDACTED"
//! ```

use std::env;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing_subscriber::{fmt as ts_fmt, fmt::format::FmtSpan, prelude::*, EnvFilter};

/// Flag to track if logging has been initialized (prevents double-init)
static LOGGING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Default log level when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "babyjub_elgamal=info";

/// Field names whose values must never reach a log line in the clear.
///
/// Wrap matching values with `SanitizedValue::new()` and add them to
/// `skip(...)` in `#[instrument]` attributes.
pub const SENSITIVE_FIELD_PATTERNS: &[&str] = &[
    "private_key",
    "secret",
    "randomness",
    "balance_old_me_clear",
    "seed",
];

/// Wrapper for sensitive data that should be redacted in logs.
///
/// `Display` shows the first four characters of long values followed by
/// "...REDACTED", and "REDACTED" alone for short ones. `Debug` shows nothing.
///
/// ```rust,ignore
/// use babyjub_elgamal::config::logging::SanitizedValue;
///
/// assert_eq!(format!("{}", SanitizedValue::new("123456789")), "1234...REDACTED");
/// assert_eq!(format!("{}", SanitizedValue::new("42")), "REDACTED");
/// ```
#[derive(Clone)]
pub struct SanitizedValue<'a>(&'a str);

impl<'a> SanitizedValue<'a> {
    pub fn new(value: &'a str) -> Self {
        Self(value)
    }

    /// The wrapped value. For actual processing only, never for logging.
    pub fn expose(&self) -> &str {
        self.0
    }
}

impl<'a> fmt::Display for SanitizedValue<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() > 8 {
            write!(f, "{}...REDACTED", &self.0[..4])
        } else {
            write!(f, "REDACTED")
        }
    }
}

impl<'a> fmt::Debug for SanitizedValue<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SanitizedValue(***)")
    }
}

/// Shorthand for `SanitizedValue::new(value)`.
pub fn sanitize(value: &str) -> SanitizedValue<'_> {
    SanitizedValue::new(value)
}

/// Whether a field name matches one of [`SENSITIVE_FIELD_PATTERNS`].
pub fn is_sensitive_field(name: &str) -> bool {
    let lower = name.to_lowercase();
    SENSITIVE_FIELD_PATTERNS.iter().any(|p| lower.contains(p))
}

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter string (e.g., "babyjub_elgamal=debug")
    pub level_filter: String,
    /// Use pretty format instead of JSON
    pub use_pretty_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level_filter: DEFAULT_LOG_LEVEL.to_string(),
            use_pretty_format: false,
        }
    }
}

impl LoggingConfig {
    /// Read `RUST_LOG` and `LOG_FORMAT` from the environment.
    pub fn from_env() -> Self {
        let level_filter = env::var("RUST_LOG")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let use_pretty_format = env::var("LOG_FORMAT")
            .map(|v| v.to_lowercase() == "pretty")
            .unwrap_or(false);

        Self {
            level_filter,
            use_pretty_format,
        }
    }
}

/// Initialize logging from the environment. Subsequent calls are no-ops.
pub fn init_logging() {
    init_logging_with_config(LoggingConfig::from_env());
}

/// Initialize logging with an explicit configuration.
///
/// An unparseable filter falls back to [`DEFAULT_LOG_LEVEL`]. If another
/// global subscriber is already installed, this does nothing.
pub fn init_logging_with_config(config: LoggingConfig) {
    if LOGGING_INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }

    let env_filter = EnvFilter::try_new(&config.level_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let result = if config.use_pretty_format {
        tracing_subscriber::registry()
            .with(
                ts_fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                ts_fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_target(true)
                    .with_current_span(true),
            )
            .with(env_filter)
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized elsewhere: {}", e);
    }
}

/// Test subscriber writing through the test harness capture.
#[cfg(test)]
pub fn init_test_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
