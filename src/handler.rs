use thiserror::Error;

use crate::level::Level;
use crate::record::{Attr, Record};

/// Errors a handler may surface from [`LogHandler::handle`].
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler has shut down and can no longer accept records.
    #[error("handler is closed")]
    Closed,
}

/// Contract implemented by log sinks.
///
/// Handlers are `Send + Sync` so a front-end can call them from any thread.
/// Deriving a handler with [`with_attrs`](LogHandler::with_attrs) or
/// [`with_group`](LogHandler::with_group) must never mutate the receiver:
/// parent and child handlers share no mutable state, so a parent can be used
/// concurrently to derive any number of children.
pub trait LogHandler: Send + Sync {
    /// Report whether records at `level` should be handled at all.
    fn enabled(&self, level: Level) -> bool;

    /// Dispatch one log record.
    fn handle(&self, record: Record) -> Result<(), HandlerError>;

    /// Derive a handler with `attrs` bound under the current group path.
    fn with_attrs(&self, attrs: Vec<Attr>) -> Self
    where
        Self: Sized;

    /// Derive a handler whose group path is extended by `name`.
    ///
    /// An empty `name` is a no-op: the returned handler is observably
    /// identical to the receiver.
    fn with_group(&self, name: &str) -> Self
    where
        Self: Sized;
}
