//! Formatter and tape seams
//!
//! - [`Formatter`]: rewrites a frame's payload before dispatch
//! - [`Tape`]: consumes a finished frame
//!
//! Closures are adapted with [`formatter_fn`] and [`tape_fn`], which pin the
//! closure signature so argument and error types are inferred.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::BoxError;
use crate::frame::Frame;

/// Rewrites the payload of a frame
///
/// Formatters receive the current argument list (possibly already rewritten
/// by earlier formatters) and return its replacement, which may differ in
/// length and content.
pub trait Formatter: Send + Sync {
    fn format(&self, args: Vec<Value>) -> Result<Vec<Value>, BoxError>;
}

/// Output sink for finished frames
///
/// Tapes run synchronously on the caller's thread. A tape shared by several
/// loggers, or by a logger used from several threads, must be reentrant.
pub trait Tape: Send + Sync {
    fn record(&self, frame: &Frame) -> Result<(), BoxError>;
}

impl<T: Formatter + ?Sized> Formatter for Arc<T> {
    fn format(&self, args: Vec<Value>) -> Result<Vec<Value>, BoxError> {
        (**self).format(args)
    }
}

impl<T: Tape + ?Sized> Tape for Arc<T> {
    fn record(&self, frame: &Frame) -> Result<(), BoxError> {
        (**self).record(frame)
    }
}

/// [`Formatter`] backed by a closure, see [`formatter_fn`]
#[derive(Clone, Copy)]
pub struct FnFormatter<F>(F);

/// [`Tape`] backed by a closure, see [`tape_fn`]
#[derive(Clone, Copy)]
pub struct FnTape<F>(F);

/// Adapt a closure into a [`Formatter`]
pub fn formatter_fn<F>(f: F) -> FnFormatter<F>
where
    F: Fn(Vec<Value>) -> Result<Vec<Value>, BoxError> + Send + Sync,
{
    FnFormatter(f)
}

/// Adapt a closure into a [`Tape`]
pub fn tape_fn<F>(f: F) -> FnTape<F>
where
    F: Fn(&Frame) -> Result<(), BoxError> + Send + Sync,
{
    FnTape(f)
}

impl<F> Formatter for FnFormatter<F>
where
    F: Fn(Vec<Value>) -> Result<Vec<Value>, BoxError> + Send + Sync,
{
    fn format(&self, args: Vec<Value>) -> Result<Vec<Value>, BoxError> {
        (self.0)(args)
    }
}

impl<F> Tape for FnTape<F>
where
    F: Fn(&Frame) -> Result<(), BoxError> + Send + Sync,
{
    fn record(&self, frame: &Frame) -> Result<(), BoxError> {
        (self.0)(frame)
    }
}

impl<F> fmt::Debug for FnFormatter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFormatter").finish_non_exhaustive()
    }
}

impl<F> fmt::Debug for FnTape<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTape").finish_non_exhaustive()
    }
}
