//! Log frames
//!
//! A [`Frame`] is one log event. It is built once per level call, has its
//! payload rewritten in place by the formatter chain, and is then handed to
//! every tape by shared reference.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::level::Level;

/// One log event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Payload values, in call order
    pub args: Vec<Value>,
    /// Unique identifier (hyphenated UUID v4)
    pub id: String,
    /// Construction time in milliseconds since the Unix epoch
    pub logdate: i64,
    /// Fully qualified tag, e.g. `app:worker:warn`
    pub tag: String,
}

impl Frame {
    /// Build a frame with a fresh id and the current wall-clock time
    pub fn new(tag: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            args,
            id: Uuid::new_v4().to_string(),
            logdate: Utc::now().timestamp_millis(),
            tag: tag.into(),
        }
    }

    /// Level named by the trailing tag segment, if any
    pub fn level(&self) -> Option<Level> {
        self.tag.rsplit(':').next()?.parse().ok()
    }

    /// Tag without its trailing level segment
    ///
    /// Returns the whole tag when the last segment is not a level.
    pub fn namespace(&self) -> &str {
        match self.tag.rsplit_once(':') {
            Some((base, last)) if last.parse::<Level>().is_ok() => base,
            _ => &self.tag,
        }
    }
}
