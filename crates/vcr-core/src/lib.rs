//! # VCR Core
//!
//! A small structured-logging core. A [`Vcr`] logger turns each call into
//! an immutable [`Frame`], rewrites its payload through an ordered chain of
//! [`Formatter`]s, and hands the result to an ordered list of [`Tape`]s.
//!
//! Loggers nest: [`Vcr::extend`] creates a child whose tag is
//! `parent:child` and which starts with a copy of the parent's formatters
//! and tapes.
//!
//! ```
//! use vcr_core::{args, formatter_fn, tapes::MemoryTape, Vcr};
//! use serde_json::Value;
//!
//! let tape = MemoryTape::new();
//! let mut root = Vcr::new("app");
//! root.formatter(formatter_fn(|args| {
//!     Ok(args
//!         .into_iter()
//!         .map(|arg| match arg {
//!             Value::String(s) => Value::String(s.to_uppercase()),
//!             other => other,
//!         })
//!         .collect())
//! }))
//! .use_tape(tape.clone());
//!
//! let worker = root.extend("worker");
//! worker.warn(args!["slow", 250])?;
//!
//! let frame = tape.last().unwrap();
//! assert_eq!(frame.tag, "app:worker:warn");
//! assert_eq!(frame.args, args!["SLOW", 250]);
//! # Ok::<(), vcr_core::VcrError>(())
//! ```
//!
//! ## Built-in tapes
//!
//! - [`tapes::ConsoleTape`]: `tag arg arg ...` on stdout
//! - [`tapes::DebugTape`]: per-tag debug channels selected with `DEBUG`
//! - [`tapes::TracingTape`]: forwards frames into `tracing`
//! - [`tapes::MemoryTape`]: in-memory capture

pub mod error;
pub mod frame;
pub mod level;
pub mod tapes;
pub mod traits;
pub mod vcr;

pub use error::{BoxError, ParseLevelError, VcrError};
pub use frame::Frame;
pub use level::Level;
pub use traits::{formatter_fn, tape_fn, FnFormatter, FnTape, Formatter, Tape};
pub use vcr::{namespace, Vcr};

#[doc(hidden)]
pub use serde_json as __serde_json;

/// Build a payload list from heterogeneous values
///
/// Arguments are read as the elements of a `serde_json::json!` array, so
/// anything `json!` accepts there (literals, serialisable expressions,
/// inline objects) works.
///
/// ```
/// use vcr_core::args;
///
/// let port = 8080;
/// let payload = args!["listening", port, -1, { "tls": false }];
/// assert_eq!(payload.len(), 4);
/// assert!(args![].is_empty());
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:tt)*) => {
        match $crate::__serde_json::json!([$($arg)*]) {
            $crate::__serde_json::Value::Array(args) => args,
            _ => ::std::unreachable!(),
        }
    };
}
