//! Configuration types for the logging subscriber

use serde::{Deserialize, Serialize};
use tracing_subscriber::{filter::ParseError, EnvFilter};
use vcr_core::tapes::TARGET;

/// Main logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Level for everything outside the frame target (can be overridden by RUST_LOG)
    pub default_level: String,

    /// Which VCR frames reach the subscriber
    pub frames: FrameConfig,

    /// Console output configuration
    pub console: ConsoleConfig,

    /// JSONL output configuration
    pub jsonl: JsonlConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: "info".to_string(),
            frames: FrameConfig::default(),
            console: ConsoleConfig::default(),
            jsonl: JsonlConfig::default(),
        }
    }
}

impl LogConfig {
    /// Verbose, human-readable console output
    pub fn development() -> Self {
        Self {
            default_level: "debug".to_string(),
            console: ConsoleConfig {
                enabled: true,
                pretty: true,
                ansi: true,
            },
            ..Default::default()
        }
    }

    /// Warnings and errors only, no colours
    pub fn testing() -> Self {
        Self {
            default_level: "warn".to_string(),
            frames: FrameConfig {
                enabled: true,
                level: "warn".to_string(),
            },
            console: ConsoleConfig {
                enabled: true,
                pretty: false,
                ansi: false,
            },
            ..Default::default()
        }
    }

    /// Filter directives: the default level followed by the frame target
    ///
    /// ```
    /// use vcr_logging::LogConfig;
    ///
    /// assert_eq!(LogConfig::default().directives(), "info,vcr=debug");
    /// ```
    pub fn directives(&self) -> String {
        format!("{},{}", self.default_level, self.frames.directive())
    }

    /// Build the filter described by [`directives`](Self::directives)
    pub fn env_filter(&self) -> Result<EnvFilter, ParseError> {
        EnvFilter::try_new(self.directives())
    }
}

/// Selection of frames re-emitted by `TracingTape`
///
/// Frames travel under their own target, so they are filtered apart from
/// the application's other events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Let frames through at all
    pub enabled: bool,
    /// Lowest frame level that is kept
    pub level: String,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "debug".to_string(),
        }
    }
}

impl FrameConfig {
    /// `vcr=<level>`, or `vcr=off` when disabled
    pub fn directive(&self) -> String {
        let level = if self.enabled { self.level.as_str() } else { "off" };
        format!("{TARGET}={level}")
    }
}

/// Console output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Enable console output
    pub enabled: bool,
    /// Use pretty (human-readable) format instead of JSONL
    pub pretty: bool,
    /// Include ANSI colors (pretty format only)
    pub ansi: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pretty: false,
            ansi: false,
        }
    }
}

/// JSONL formatting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonlConfig {
    /// Flatten frame fields (`tag`, `id`, `logdate`, `args`) to root level
    pub flatten_events: bool,
    /// Include span list in events
    pub include_spans: bool,
    /// Include current span details
    pub include_current_span: bool,
    /// Include file/line information
    pub include_location: bool,
}

impl Default for JsonlConfig {
    fn default() -> Self {
        Self {
            flatten_events: true,
            include_spans: true,
            include_current_span: true,
            include_location: false,
        }
    }
}
