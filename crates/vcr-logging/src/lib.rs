//! `tracing` subscriber setup for applications that log through VCR
//!
//! VCR frames reach the application's ambient log stream through
//! [`TracingTape`], which emits them under the `vcr` target. This crate
//! installs the subscriber that stream ends up in: JSONL on the console by
//! default, pretty human-readable output for development. Frames are
//! filtered on their own level, separately from the application's other
//! events.
//!
//! ```ignore
//! use vcr_logging::{LogConfig, VcrSubscriberBuilder};
//!
//! // JSONL to console, every frame
//! VcrSubscriberBuilder::new().init();
//!
//! // Pretty output while developing, frames from warn up
//! VcrSubscriberBuilder::new()
//!     .with_config(LogConfig::development())
//!     .with_frame_level("warn")
//!     .init();
//!
//! let app = vcr_logging::recorder("app");
//! app.warn(vcr_core::args!["disk almost full", 93])?;
//! ```

pub mod config;

pub use config::{ConsoleConfig, FrameConfig, JsonlConfig, LogConfig};

use std::{env, io};

use thiserror::Error;
use tracing::Subscriber;
use tracing_subscriber::{
    filter::ParseError,
    fmt::{writer::BoxMakeWriter, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    util::TryInitError,
    EnvFilter, Layer, Registry,
};
use vcr_core::{tapes::TracingTape, Vcr};

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("Failed to install subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Builder for configuring and initializing the logging subscriber
pub struct VcrSubscriberBuilder {
    config: LogConfig,
    writer: BoxMakeWriter,
    read_env: bool,
}

impl VcrSubscriberBuilder {
    /// Create a new subscriber builder with default configuration
    ///
    /// Default: JSONL output to stdout, `RUST_LOG` honoured
    pub fn new() -> Self {
        Self {
            config: LogConfig::default(),
            writer: BoxMakeWriter::new(io::stdout),
            read_env: true,
        }
    }

    /// Use a specific configuration
    pub fn with_config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default log level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.config.default_level = level.into();
        self
    }

    /// Set the lowest frame level let through
    pub fn with_frame_level(mut self, level: impl Into<String>) -> Self {
        self.config.frames.level = level.into();
        self
    }

    /// Let frames through or drop them all
    pub fn with_frames(mut self, enabled: bool) -> Self {
        self.config.frames.enabled = enabled;
        self
    }

    /// Enable or disable console output
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.config.console.enabled = enabled;
        self
    }

    /// Switch between pretty and JSONL console output
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.config.console.pretty = pretty;
        self
    }

    /// Send console output somewhere other than stdout
    pub fn with_writer<W>(mut self, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        self.writer = BoxMakeWriter::new(writer);
        self
    }

    /// Whether `RUST_LOG` is layered over the configured directives
    pub fn with_env_filter(mut self, read_env: bool) -> Self {
        self.read_env = read_env;
        self
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// The filter the subscriber is built with
    ///
    /// `RUST_LOG` directives come after the configured ones, so a bare
    /// level there replaces `default_level` and a `vcr=...` directive
    /// replaces the frame level.
    pub fn env_filter(&self) -> Result<EnvFilter, ParseError> {
        let overrides = if self.read_env {
            env::var(EnvFilter::DEFAULT_ENV)
                .ok()
                .filter(|directives| !directives.trim().is_empty())
        } else {
            None
        };

        match overrides {
            Some(overrides) => {
                EnvFilter::try_new(format!("{},{overrides}", self.config.directives()))
            }
            None => self.config.env_filter(),
        }
    }

    /// Build the subscriber without installing it
    ///
    /// Useful with `tracing::subscriber::with_default` for scoped capture.
    pub fn build(self) -> Result<impl Subscriber + Send + Sync + 'static, LoggingError> {
        let env_filter = self.env_filter()?;
        let console = console_layer(&self.config, self.writer);

        Ok(Registry::default().with(env_filter).with(console))
    }

    /// Initialize the subscriber globally
    ///
    /// # Panics
    ///
    /// Panics if the configured directives do not parse or if a global
    /// subscriber has already been set.
    pub fn init(self) {
        if let Err(err) = self.try_init() {
            panic!("failed to initialize VCR logging: {err}");
        }
    }

    /// Try to initialize the subscriber globally
    ///
    /// Fails if the configured directives do not parse or if a global
    /// subscriber has already been set.
    pub fn try_init(self) -> Result<(), LoggingError> {
        self.build()?.try_init()?;
        Ok(())
    }
}

impl Default for VcrSubscriberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn console_layer<S>(
    config: &LogConfig,
    writer: BoxMakeWriter,
) -> Option<Box<dyn Layer<S> + Send + Sync>>
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    let console = &config.console;
    if !console.enabled {
        return None;
    }

    let layer = if console.pretty {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(console.ansi)
            .with_target(true)
            .boxed()
    } else {
        let jsonl = &config.jsonl;
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_current_span(jsonl.include_current_span)
            .with_span_list(jsonl.include_spans)
            .flatten_event(jsonl.flatten_events)
            .with_file(jsonl.include_location)
            .with_line_number(jsonl.include_location)
            .boxed()
    };
    Some(layer)
}

/// A logger whose frames go to the installed subscriber
pub fn recorder(tag: impl Into<String>) -> Vcr {
    let mut vcr = Vcr::new(tag);
    vcr.use_tape(TracingTape::new());
    vcr
}

/// Initialize logging with default settings (JSONL to console)
pub fn init_default() {
    VcrSubscriberBuilder::new().init();
}

/// Initialize logging for development (verbose, pretty console output)
pub fn init_development() {
    VcrSubscriberBuilder::new()
        .with_config(LogConfig::development())
        .init();
}

/// Initialize logging for testing (minimal output)
///
/// Safe to call from every test: an already-installed subscriber is kept.
pub fn init_testing() {
    let _ = VcrSubscriberBuilder::new()
        .with_config(LogConfig::testing())
        .try_init();
}
