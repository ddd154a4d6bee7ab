//! The VCR logger
//!
//! A [`Vcr`] ties a namespace tag to an ordered formatter chain and an
//! ordered list of tapes. Every level call builds a fresh [`Frame`], runs
//! its payload through each formatter in registration order, then hands
//! the finished frame to each tape in registration order.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::VcrError;
use crate::frame::Frame;
use crate::level::Level;
use crate::traits::{Formatter, Tape};

/// Join a base tag and a suffix with `:`
///
/// No normalisation is applied: empty parts and embedded colons are kept.
pub fn namespace(base: &str, suffix: &str) -> String {
    format!("{}:{}", base, suffix)
}

/// Named, configurable log emitter
///
/// Configuration methods take `&mut self` and level methods take `&self`,
/// so a logger cannot be reconfigured while a dispatch is in flight. Both
/// return the receiver itself for chaining:
///
/// ```
/// use vcr_core::{args, tapes::MemoryTape, Vcr};
///
/// let tape = MemoryTape::new();
/// let mut root = Vcr::new("app");
/// root.use_tape(tape.clone());
///
/// root.info(args!["started", 42])?.debug(args!["ready"])?;
/// assert_eq!(tape.len(), 2);
/// # Ok::<(), vcr_core::VcrError>(())
/// ```
#[derive(Clone)]
pub struct Vcr {
    tag: String,
    formatters: Vec<Arc<dyn Formatter>>,
    tapes: Vec<Arc<dyn Tape>>,
}

impl Vcr {
    /// Create a root logger with no formatters and no tapes
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        tracing::trace!(tag = %tag, "vcr created");
        Self {
            tag,
            formatters: Vec::new(),
            tapes: Vec::new(),
        }
    }

    /// This logger's namespace
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Number of registered formatters
    pub fn formatter_count(&self) -> usize {
        self.formatters.len()
    }

    /// Number of registered tapes
    pub fn tape_count(&self) -> usize {
        self.tapes.len()
    }

    /// Create a child logger tagged `{self.tag}:{suffix}`
    ///
    /// The child starts with a copy of this logger's current formatters and
    /// tapes. Registrations made afterwards on either logger stay local.
    pub fn extend(&self, suffix: &str) -> Vcr {
        let mut child = Vcr {
            tag: namespace(&self.tag, suffix),
            formatters: Vec::with_capacity(self.formatters.len()),
            tapes: Vec::with_capacity(self.tapes.len()),
        };
        for formatter in &self.formatters {
            child.push_formatter(Arc::clone(formatter));
        }
        for tape in &self.tapes {
            child.push_tape(Arc::clone(tape));
        }

        tracing::trace!(
            parent = %self.tag,
            tag = %child.tag,
            formatters = child.formatters.len(),
            tapes = child.tapes.len(),
            "vcr extended"
        );
        child
    }

    /// Append a formatter to the chain
    pub fn formatter(&mut self, formatter: impl Formatter + 'static) -> &mut Self {
        self.push_formatter(Arc::new(formatter))
    }

    /// Append a tape to the dispatch list
    pub fn use_tape(&mut self, tape: impl Tape + 'static) -> &mut Self {
        self.push_tape(Arc::new(tape))
    }

    /// Append a formatter shared with other loggers
    pub fn push_formatter(&mut self, formatter: Arc<dyn Formatter>) -> &mut Self {
        self.formatters.push(formatter);
        self
    }

    /// Append a tape shared with other loggers
    pub fn push_tape(&mut self, tape: Arc<dyn Tape>) -> &mut Self {
        self.tapes.push(tape);
        self
    }

    /// Log `args` under `{tag}:debug`
    pub fn debug(&self, args: Vec<Value>) -> Result<&Self, VcrError> {
        self.write(Level::Debug, args)
    }

    /// Log `args` under `{tag}:info`
    pub fn info(&self, args: Vec<Value>) -> Result<&Self, VcrError> {
        self.write(Level::Info, args)
    }

    /// Log `args` under `{tag}:warn`
    pub fn warn(&self, args: Vec<Value>) -> Result<&Self, VcrError> {
        self.write(Level::Warn, args)
    }

    /// Log `args` under `{tag}:error`
    pub fn error(&self, args: Vec<Value>) -> Result<&Self, VcrError> {
        self.write(Level::Error, args)
    }

    /// Build, format and dispatch one frame at `level`
    ///
    /// The first failing formatter or tape ends the call: nothing after it
    /// runs and its error is returned.
    pub fn write(&self, level: Level, args: Vec<Value>) -> Result<&Self, VcrError> {
        let mut frame = Frame::new(namespace(&self.tag, level.as_str()), args);

        for (index, formatter) in self.formatters.iter().enumerate() {
            let args = std::mem::take(&mut frame.args);
            frame.args = formatter
                .format(args)
                .map_err(|source| VcrError::Formatter {
                    tag: frame.tag.clone(),
                    index,
                    source,
                })?;
        }

        for (index, tape) in self.tapes.iter().enumerate() {
            tape.record(&frame).map_err(|source| VcrError::Tape {
                tag: frame.tag.clone(),
                index,
                source,
            })?;
        }

        Ok(self)
    }
}

impl fmt::Debug for Vcr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vcr")
            .field("tag", &self.tag)
            .field("formatters", &self.formatters.len())
            .field("tapes", &self.tapes.len())
            .finish()
    }
}
