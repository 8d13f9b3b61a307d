//! Builder for [`TelegramHandler`](super::TelegramHandler).
//!
//! Required fields (token, chat id) are validated before anything touches
//! the network, then the credentials themselves are verified against the
//! API. Construction either yields a working handler or a distinguishable
//! [`BuildError`]; a misconfigured handler is never silently usable.

use std::sync::Arc;

use thiserror::Error;
use ureq::Agent;

use crate::convert::{Converter, DefaultConverter, ReplaceAttr};
use crate::level::Level;

use super::api::{self, ApiError, DEFAULT_API_BASE, ParseMode};
use super::config::{TelegramConfig, default_agent};
use super::handler::TelegramHandler;

/// Errors that may occur while building a handler.
#[derive(Debug, Error)]
pub enum BuildError {
    /// No bot token, or a blank one, was configured.
    #[error("telegram handler requires a bot token")]
    MissingToken,
    /// No chat identifier, or a blank one, was configured.
    #[error("telegram handler requires a chat id")]
    MissingChatId,
    /// The configured credentials failed live validation.
    #[error("credential validation failed: {0}")]
    Credentials(#[from] ApiError),
}

/// Builder collecting the handler configuration.
#[derive(Clone, Default)]
pub struct TelegramHandlerBuilder {
    level: Option<Level>,
    token: Option<String>,
    chat_id: Option<String>,
    parse_mode: Option<ParseMode>,
    add_source: bool,
    replace_attr: Option<Arc<ReplaceAttr>>,
    converter: Option<Arc<dyn Converter>>,
    agent: Option<Agent>,
    api_base: Option<String>,
}

impl TelegramHandlerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum severity to handle. Defaults to [`Level::Debug`].
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Set the bot token (required).
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the destination chat identifier (required).
    pub fn with_chat_id(mut self, chat_id: impl Into<String>) -> Self {
        self.chat_id = Some(chat_id.into());
        self
    }

    /// Override the rendering mode. Defaults to [`ParseMode::Html`].
    pub fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = Some(parse_mode);
        self
    }

    /// Append the record's source file and line to each message.
    pub fn with_add_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }

    /// Install a per-attribute filter; returning `None` omits the attribute.
    pub fn with_replace_attr<F>(mut self, replace: F) -> Self
    where
        F: Fn(&[String], crate::record::Attr) -> Option<crate::record::Attr>
            + Send
            + Sync
            + 'static,
    {
        self.replace_attr = Some(Arc::new(replace));
        self
    }

    /// Replace the default message converter.
    pub fn with_converter<C>(mut self, converter: C) -> Self
    where
        C: Converter + 'static,
    {
        self.converter = Some(Arc::new(converter));
        self
    }

    /// Inject a preconfigured HTTP agent.
    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Point the handler at a different API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Validate the configuration and credentials, then build the handler.
    pub fn build(self) -> Result<TelegramHandler, BuildError> {
        let token = match self.token {
            Some(token) if !token.trim().is_empty() => token,
            _ => return Err(BuildError::MissingToken),
        };
        let chat_id = match self.chat_id {
            Some(chat_id) if !chat_id.trim().is_empty() => chat_id,
            _ => return Err(BuildError::MissingChatId),
        };

        let agent = self.agent.unwrap_or_else(default_agent);
        let api_base = self
            .api_base
            .unwrap_or_else(|| DEFAULT_API_BASE.to_owned());

        api::check_credentials(&agent, &api_base, &token, &chat_id)?;

        Ok(TelegramHandler::from_config(TelegramConfig {
            level: self.level.unwrap_or_default(),
            token,
            chat_id,
            parse_mode: self.parse_mode.unwrap_or_default(),
            add_source: self.add_source,
            replace_attr: self.replace_attr,
            converter: self.converter.unwrap_or_else(|| Arc::new(DefaultConverter)),
            agent,
            api_base,
        }))
    }
}
