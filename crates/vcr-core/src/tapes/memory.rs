//! In-memory frame capture

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::BoxError;
use crate::frame::Frame;
use crate::traits::Tape;

/// Tape that keeps every recorded frame
///
/// Clones share the same buffer, so a test can register one clone and
/// inspect through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryTape {
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl MemoryTape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded frames, oldest first
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().clone()
    }

    /// Most recently recorded frame
    pub fn last(&self) -> Option<Frame> {
        self.frames.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.frames.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.lock().is_empty()
    }

    /// Drop all recorded frames
    pub fn clear(&self) {
        self.frames.lock().clear();
    }
}

impl Tape for MemoryTape {
    fn record(&self, frame: &Frame) -> Result<(), BoxError> {
        self.frames.lock().push(frame.clone());
        Ok(())
    }
}
