//! The Telegram handler itself.

use std::fmt;
use std::sync::Arc;
use std::thread;

use log::warn;

use crate::context::BoundContext;
use crate::handler::{HandlerError, LogHandler};
use crate::level::Level;
use crate::record::{Attr, Record};

use super::api::{redact_token, send_message};
use super::builder::TelegramHandlerBuilder;
use super::config::TelegramConfig;

/// Log sink delivering records to a Telegram chat.
///
/// Cloning or deriving a handler is cheap: all handlers created from one
/// builder share a single immutable [`TelegramConfig`] behind an `Arc`, and
/// each carries its own immutable [`BoundContext`].
#[derive(Clone)]
pub struct TelegramHandler {
    config: Arc<TelegramConfig>,
    context: BoundContext,
}

impl TelegramHandler {
    /// Start configuring a handler.
    pub fn builder() -> TelegramHandlerBuilder {
        TelegramHandlerBuilder::new()
    }

    pub(crate) fn from_config(config: TelegramConfig) -> Self {
        Self {
            config: Arc::new(config),
            context: BoundContext::new(),
        }
    }

    fn derive(&self, context: BoundContext) -> Self {
        Self {
            config: Arc::clone(&self.config),
            context,
        }
    }

    #[cfg(test)]
    pub(crate) fn context(&self) -> &BoundContext {
        &self.context
    }
}

impl LogHandler for TelegramHandler {
    fn enabled(&self, level: Level) -> bool {
        level >= self.config.level
    }

    /// Render the record and dispatch it without blocking the caller.
    ///
    /// Delivery runs on a freshly spawned thread and is fire-and-forget:
    /// `handle` returns as soon as the thread is launched, a delivery
    /// failure is logged (token redacted) through the `log` facade and then
    /// dropped, and nothing cancels or joins an in-flight dispatch. There
    /// is no bound on concurrently in-flight dispatches and no ordering
    /// between them; a slow or unreachable endpoint can accumulate threads
    /// under sustained log volume. That trade-off keeps log call sites free
    /// of network latency.
    fn handle(&self, record: Record) -> Result<(), HandlerError> {
        let text = self.config.converter.convert(
            self.config.add_source,
            self.config.replace_attr.as_deref(),
            self.context.attrs(),
            self.context.groups(),
            &record,
        );

        let config = Arc::clone(&self.config);
        thread::spawn(move || {
            if let Err(err) = send_message(
                &config.agent,
                &config.api_base,
                &config.token,
                &config.chat_id,
                config.parse_mode,
                &text,
            ) {
                warn!(
                    "telelog: dropping undelivered record: {}",
                    redact_token(&err.to_string(), &config.token)
                );
            }
        });

        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Self {
        self.derive(self.context.with_attrs(attrs))
    }

    fn with_group(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }
        self.derive(self.context.with_group(name))
    }
}

impl fmt::Debug for TelegramHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramHandler")
            .field("config", &self.config)
            .field("context", &self.context)
            .finish()
    }
}
