//! Console tape

use std::io::{self, Write};

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::BoxError;
use crate::frame::Frame;
use crate::traits::Tape;

/// Writes `tag arg arg ...` lines
///
/// String arguments are written as-is; every other value is written as
/// compact JSON.
#[derive(Debug)]
pub struct ConsoleTape<W = io::Stdout> {
    writer: Mutex<W>,
}

impl ConsoleTape<io::Stdout> {
    /// Console tape on standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Default for ConsoleTape<io::Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write + Send> ConsoleTape<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

/// Render one frame as a console line, without the trailing newline
pub fn render(frame: &Frame) -> String {
    let mut line = frame.tag.clone();
    for arg in &frame.args {
        line.push(' ');
        match arg {
            Value::String(s) => line.push_str(s),
            other => line.push_str(&other.to_string()),
        }
    }
    line
}

impl<W: Write + Send> Tape for ConsoleTape<W> {
    fn record(&self, frame: &Frame) -> Result<(), BoxError> {
        let line = render(frame);
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}
