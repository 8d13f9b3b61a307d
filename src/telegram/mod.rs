//! Telegram sink: credential validation, conversion, dispatch.
//!
//! [`TelegramHandler`] implements the [`LogHandler`](crate::LogHandler)
//! contract against the Telegram Bot API.
//!
//! # Construction
//!
//! [`TelegramHandlerBuilder`] validates that a token and chat id are
//! present, then verifies both against the live API (`getChat`, falling
//! back to `getMe` to tell a bad token from a bad chat id). Construction
//! fails with a [`BuildError`] rather than yielding a handler that silently
//! drops everything.
//!
//! # Dispatch semantics
//!
//! Delivery is fire-and-forget. Each handled record spawns its own dispatch
//! thread; the logging caller never waits on the network, delivery errors
//! are logged (with the token redacted) and discarded, and no ordering is
//! guaranteed between concurrent dispatches. There is no retry, no
//! batching and no delivery tracking.

mod api;
mod builder;
mod config;
mod handler;


pub use api::{ApiError, ParseMode, REDACTED_TOKEN, redact_token};
pub use builder::{BuildError, TelegramHandlerBuilder};
pub use config::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
pub use handler::TelegramHandler;
