//! Configuration shared by a Telegram handler and everything derived from it.
//!
//! A [`TelegramConfig`] is assembled once by
//! [`TelegramHandlerBuilder`](super::TelegramHandlerBuilder) and is read-only
//! afterwards. Every derived handler and every dispatch thread shares the
//! same instance through an `Arc`, so no locking is needed anywhere.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use ureq::{Agent, AgentBuilder};

use crate::convert::{Converter, ReplaceAttr};
use crate::level::Level;

use super::api::ParseMode;

/// Default connection timeout applied when establishing HTTP connections.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default timeout applied to each HTTP request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The agent used when the caller does not inject one.
pub(crate) fn default_agent() -> Agent {
    AgentBuilder::new()
        .timeout_connect(DEFAULT_CONNECT_TIMEOUT)
        .timeout(DEFAULT_REQUEST_TIMEOUT)
        .build()
}

pub(crate) struct TelegramConfig {
    /// Minimum severity a record needs to be handled.
    pub(crate) level: Level,
    /// Bot token. Never printed; see [`super::api::redact_token`].
    pub(crate) token: String,
    /// Destination chat identifier.
    pub(crate) chat_id: String,
    pub(crate) parse_mode: ParseMode,
    /// Append the record's source file and line to the message.
    pub(crate) add_source: bool,
    pub(crate) replace_attr: Option<Arc<ReplaceAttr>>,
    pub(crate) converter: Arc<dyn Converter>,
    /// Injected HTTP transport; `ureq::Agent` clones share a connection pool.
    pub(crate) agent: Agent,
    pub(crate) api_base: String,
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("level", &self.level)
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("parse_mode", &self.parse_mode)
            .field("add_source", &self.add_source)
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::DefaultConverter;

    #[test]
    fn debug_output_never_contains_the_token() {
        let config = TelegramConfig {
            level: Level::Error,
            token: "123456:SECRET".into(),
            chat_id: "-1000".into(),
            parse_mode: ParseMode::default(),
            add_source: false,
            replace_attr: None,
            converter: Arc::new(DefaultConverter),
            agent: default_agent(),
            api_base: "https://api.telegram.org".into(),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("SECRET"));
        assert!(debug.contains("<redacted>"));
    }
}
