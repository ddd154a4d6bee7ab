//! Debug-channel tape
//!
//! Every frame tag gets its own channel in a process-wide registry. A
//! channel is created the first time its tag is seen and lives for the rest
//! of the process. Whether a channel prints is decided by a process-wide
//! namespace filter, initialised from the `DEBUG` environment variable:
//!
//! ```text
//! DEBUG=app:*,-app:noisy:*   # everything under app except app:noisy
//! ```
//!
//! Patterns are separated by commas or whitespace, `*` matches any run of
//! characters, and a leading `-` turns a pattern into an exclusion.
//! Exclusions win over inclusions.

use std::env;
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, LazyLock};
use std::time::{Duration, Instant};

use chrono::{SecondsFormat, Utc};
use colored::{Color, Colorize};
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};

use crate::error::BoxError;
use crate::frame::Frame;
use crate::traits::Tape;

/// Colours handed out to channels
const COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Red,
];

static CHANNELS: LazyLock<DashMap<String, Arc<DebugChannel>>> = LazyLock::new(DashMap::new);

static FILTER: LazyLock<RwLock<Namespaces>> =
    LazyLock::new(|| RwLock::new(Namespaces::parse(&env::var("DEBUG").unwrap_or_default())));

/// Parsed namespace filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespaces {
    source: String,
    names: Vec<String>,
    skips: Vec<String>,
}

impl Namespaces {
    /// Parse a `DEBUG`-style pattern list
    pub fn parse(patterns: &str) -> Self {
        let mut names = Vec::new();
        let mut skips = Vec::new();
        for pattern in patterns.split(|c: char| c == ',' || c.is_whitespace()) {
            if pattern.is_empty() {
                continue;
            }
            match pattern.strip_prefix('-') {
                Some(skip) => skips.push(skip.to_string()),
                None => names.push(pattern.to_string()),
            }
        }
        Self {
            source: patterns.to_string(),
            names,
            skips,
        }
    }

    /// The pattern list this filter was parsed from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether `name` passes the filter
    pub fn enabled(&self, name: &str) -> bool {
        if name.ends_with('*') {
            return true;
        }
        if self.skips.iter().any(|skip| wildcard_match(skip, name)) {
            return false;
        }
        self.names.iter().any(|pattern| wildcard_match(pattern, name))
    }
}

/// Glob match where `*` stands for any (possibly empty) run of characters
fn wildcard_match(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();

    let (mut p, mut n) = (0, 0);
    let mut star: Option<usize> = None;
    let mut resume = 0;

    while n < name.len() {
        if p < pattern.len() && pattern[p] == '*' {
            star = Some(p);
            resume = n;
            p += 1;
        } else if p < pattern.len() && pattern[p] == name[n] {
            p += 1;
            n += 1;
        } else if let Some(s) = star {
            p = s + 1;
            resume += 1;
            n = resume;
        } else {
            return false;
        }
    }
    pattern[p..].iter().all(|&c| c == '*')
}

/// Replace the process-wide filter
pub fn enable(patterns: &str) {
    *FILTER.write() = Namespaces::parse(patterns);
}

/// Disable every channel, returning the previous pattern list
pub fn disable() -> String {
    let previous = std::mem::take(&mut *FILTER.write());
    previous.source
}

/// Whether the channel `name` would print under the current filter
pub fn enabled(name: &str) -> bool {
    FILTER.read().enabled(name)
}

/// Get or create the channel for `namespace`
pub fn channel(namespace: &str) -> Arc<DebugChannel> {
    if let Some(existing) = CHANNELS.get(namespace) {
        return Arc::clone(existing.value());
    }
    CHANNELS
        .entry(namespace.to_string())
        .or_insert_with(|| Arc::new(DebugChannel::new(namespace)))
        .value()
        .clone()
}

/// Colour for a namespace, stable across runs
///
/// The hash runs over UTF-16 code units so a namespace gets the same colour
/// as it does in other `debug`-style tools.
pub fn select_color(namespace: &str) -> Color {
    let mut hash: i32 = 0;
    for unit in namespace.encode_utf16() {
        hash = (hash << 5).wrapping_sub(hash).wrapping_add(i32::from(unit));
    }
    COLORS[hash.unsigned_abs() as usize % COLORS.len()]
}

/// Render a duration the way debug output shows deltas (`+12ms`, `+3s`)
pub fn humanize(elapsed: Duration) -> String {
    const SECOND: f64 = 1_000.0;
    const MINUTE: f64 = SECOND * 60.0;
    const HOUR: f64 = MINUTE * 60.0;
    const DAY: f64 = HOUR * 24.0;

    let ms = elapsed.as_secs_f64() * 1_000.0;
    if ms >= DAY {
        format!("{}d", (ms / DAY).round())
    } else if ms >= HOUR {
        format!("{}h", (ms / HOUR).round())
    } else if ms >= MINUTE {
        format!("{}m", (ms / MINUTE).round())
    } else if ms >= SECOND {
        format!("{}s", (ms / SECOND).round())
    } else {
        format!("{}ms", elapsed.as_millis())
    }
}

/// A named debug channel
#[derive(Debug)]
pub struct DebugChannel {
    namespace: String,
    color: Color,
    last: Mutex<Option<Instant>>,
}

impl DebugChannel {
    fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            color: select_color(namespace),
            last: Mutex::new(None),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_enabled(&self) -> bool {
        enabled(&self.namespace)
    }

    /// Time since the previous tick (zero on the first), then restart
    pub fn tick(&self) -> Duration {
        let now = Instant::now();
        let mut last = self.last.lock();
        let elapsed = last.map(|prev| now.duration_since(prev)).unwrap_or_default();
        *last = Some(now);
        elapsed
    }
}

/// Output settings for [`DebugTape`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugConfig {
    /// Colourise the namespace and delta
    pub colors: bool,
    /// Omit the timestamp prefix on uncoloured output
    pub hide_date: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            colors: io::stderr().is_terminal(),
            hide_date: false,
        }
    }
}

impl DebugConfig {
    /// Read `DEBUG_COLORS` and `DEBUG_HIDE_DATE`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            colors: env_flag("DEBUG_COLORS").unwrap_or(defaults.colors),
            hide_date: env_flag("DEBUG_HIDE_DATE").unwrap_or(defaults.hide_date),
        }
    }

    /// Plain output without colours or dates
    pub fn plain() -> Self {
        Self {
            colors: false,
            hide_date: true,
        }
    }
}

fn env_flag(key: &str) -> Option<bool> {
    env::var(key).ok().and_then(|value| parse_flag(&value))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "on" | "true" | "enabled" => Some(true),
        "no" | "off" | "false" | "disabled" => Some(false),
        other => other.parse::<i64>().ok().map(|n| n != 0),
    }
}

/// Writes each frame to the debug channel named by its tag
///
/// The payload is written as a single JSON array. Frames on disabled
/// channels are dropped without error.
pub struct DebugTape {
    config: DebugConfig,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl DebugTape {
    /// Debug tape on standard error, configured from the environment
    pub fn new() -> Self {
        Self::with_writer(DebugConfig::from_env(), io::stderr())
    }

    /// Debug tape on any writer
    ///
    /// With `config.colors` set, `colored` output is forced on for the
    /// process, whether or not the writer is a terminal.
    pub fn with_writer(config: DebugConfig, writer: impl Write + Send + 'static) -> Self {
        if config.colors {
            colored::control::set_override(true);
        }
        Self {
            config,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    pub fn config(&self) -> DebugConfig {
        self.config
    }

    fn render(&self, channel: &DebugChannel, args: &str, elapsed: Duration) -> String {
        if self.config.colors {
            let color = channel.color();
            format!(
                "  {} {} {}",
                channel.namespace().color(color).bold(),
                args,
                format!("+{}", humanize(elapsed)).color(color),
            )
        } else if self.config.hide_date {
            format!("{} {}", channel.namespace(), args)
        } else {
            let date = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            format!("{} {} {}", date, channel.namespace(), args)
        }
    }
}

impl Default for DebugTape {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DebugTape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugTape")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Tape for DebugTape {
    fn record(&self, frame: &Frame) -> Result<(), BoxError> {
        let channel = channel(&frame.tag);
        if !channel.is_enabled() {
            return Ok(());
        }

        let args = serde_json::to_string(&frame.args)?;
        let line = self.render(&channel, &args, channel.tick());

        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}
