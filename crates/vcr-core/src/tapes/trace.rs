//! Bridge from frames to `tracing` events

use crate::error::BoxError;
use crate::frame::Frame;
use crate::level::Level;
use crate::traits::Tape;

/// Target of every event emitted by [`TracingTape`]
pub const TARGET: &str = "vcr";

/// Emits every frame as a `tracing` event
///
/// The event level follows the tag's trailing segment; frames whose tag
/// does not end in a level are emitted at INFO. Events carry the `tag`,
/// `id`, `logdate` and JSON-encoded `args` fields under the [`TARGET`] target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTape;

impl TracingTape {
    pub fn new() -> Self {
        Self
    }
}

impl Tape for TracingTape {
    fn record(&self, frame: &Frame) -> Result<(), BoxError> {
        let args = serde_json::to_string(&frame.args)?;
        let tag = frame.tag.as_str();
        let id = frame.id.as_str();
        let logdate = frame.logdate;

        match frame.level().unwrap_or(Level::Info) {
            Level::Debug => {
                tracing::debug!(target: TARGET, tag = tag, id = id, logdate = logdate, args = %args)
            }
            Level::Info => {
                tracing::info!(target: TARGET, tag = tag, id = id, logdate = logdate, args = %args)
            }
            Level::Warn => {
                tracing::warn!(target: TARGET, tag = tag, id = id, logdate = logdate, args = %args)
            }
            Level::Error => {
                tracing::error!(target: TARGET, tag = tag, id = id, logdate = logdate, args = %args)
            }
        }
        Ok(())
    }
}
