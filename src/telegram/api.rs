//! Bot API calls: credential validation and message dispatch.
//!
//! Three endpoints are used. `getChat` and `getMe` run once at construction
//! to validate the configured credentials; `sendMessage` delivers rendered
//! records. The bot token rides in every request URL, so any error text
//! derived from a request is redacted before it leaves this module.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Serialize;
use thiserror::Error;
use ureq::Agent;

pub(crate) const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Placeholder substituted for the bot token in redacted text.
pub const REDACTED_TOKEN: &str = "<redacted-token>";

/// Rendering mode Telegram applies to the message text.
///
/// Defaults to HTML: Telegram's markdown validation is strict about
/// unbalanced markup and rejects otherwise-fine log output, while HTML mode
/// passes plain text through untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParseMode {
    #[default]
    Html,
    Markdown,
    MarkdownV2,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Markdown => "Markdown",
            Self::MarkdownV2 => "MarkdownV2",
        }
    }
}

/// Failures talking to the Bot API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The bot token was rejected, or the token probe could not be reached.
    #[error("invalid bot token")]
    InvalidToken,
    /// The token is valid but the chat identifier was rejected.
    #[error("invalid chat id")]
    InvalidChatId,
    /// The API answered with a non-2xx status.
    #[error("telegram rejected the request: [{status}] {body}")]
    Rejected { status: u16, body: String },
    /// The request never produced a response.
    #[error("http transport failure: {0}")]
    Transport(String),
    #[error("failed to encode payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Replace every occurrence of `token` in `text` with [`REDACTED_TOKEN`].
pub fn redact_token(text: &str, token: &str) -> String {
    if token.is_empty() {
        return text.to_owned();
    }
    text.replace(token, REDACTED_TOKEN)
}

/// Characters percent-encoded in query parameter values.
///
/// Everything outside RFC 3986 unreserved characters that can appear in a
/// chat identifier (`@channelname`, negative numeric ids) or confuse query
/// parsing is encoded.
const QUERY_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

fn query_escape(value: &str) -> String {
    utf8_percent_encode(value, QUERY_ENCODE_SET).to_string()
}

fn method_url(api_base: &str, token: &str, method: &str) -> String {
    format!("{}/bot{}/{}", api_base.trim_end_matches('/'), token, method)
}

/// Issue a GET and map the outcome, redacting the token from error text.
fn probe(agent: &Agent, url: &str, token: &str) -> Result<(), ApiError> {
    match agent.get(url).call() {
        Ok(_) => Ok(()),
        Err(err) => Err(request_error(err, token)),
    }
}

fn request_error(err: ureq::Error, token: &str) -> ApiError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            ApiError::Rejected {
                status,
                body: redact_token(&body, token),
            }
        }
        ureq::Error::Transport(transport) => {
            ApiError::Transport(redact_token(&transport.to_string(), token))
        }
    }
}

fn get_me(agent: &Agent, api_base: &str, token: &str) -> Result<(), ApiError> {
    probe(agent, &method_url(api_base, token, "getMe"), token)
}

fn get_chat(agent: &Agent, api_base: &str, token: &str, chat_id: &str) -> Result<(), ApiError> {
    let url = format!(
        "{}?chat_id={}",
        method_url(api_base, token, "getChat"),
        query_escape(chat_id)
    );
    probe(agent, &url, token)
}

/// Verify the token and chat identifier against the live API.
///
/// A failing `getChat` alone cannot tell a bad token from a bad chat id, so
/// a second `getMe` probe isolates which credential is wrong. A transport
/// outage during the probes also reads as an invalid token; upstream has the
/// same blind spot and the behaviour is kept as-is.
pub(crate) fn check_credentials(
    agent: &Agent,
    api_base: &str,
    token: &str,
    chat_id: &str,
) -> Result<(), ApiError> {
    if get_chat(agent, api_base, token, chat_id).is_ok() {
        return Ok(());
    }
    match get_me(agent, api_base, token) {
        Ok(()) => Err(ApiError::InvalidChatId),
        Err(_) => Err(ApiError::InvalidToken),
    }
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Deliver one rendered message to the chat.
///
/// A non-2xx answer surfaces as [`ApiError::Rejected`] carrying the status
/// and the full response body; a connection failure surfaces as
/// [`ApiError::Transport`]. Both are redacted.
pub(crate) fn send_message(
    agent: &Agent,
    api_base: &str,
    token: &str,
    chat_id: &str,
    parse_mode: ParseMode,
    text: &str,
) -> Result<(), ApiError> {
    let url = method_url(api_base, token, "sendMessage");
    let payload = serde_json::to_string(&SendMessage {
        chat_id,
        text,
        parse_mode: parse_mode.as_str(),
    })?;

    match agent
        .post(&url)
        .set("Content-Type", "application/json")
        .send_string(&payload)
    {
        Ok(_) => Ok(()),
        Err(err) => Err(request_error(err, token)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redaction_removes_every_token_occurrence() {
        let token = "123456:SECRET";
        let text = format!("GET https://api.telegram.org/bot{token}/getMe failed; token {token} rejected");
        let redacted = redact_token(&text, token);
        assert!(!redacted.contains(token));
        assert_eq!(redacted.matches(REDACTED_TOKEN).count(), 2);
    }

    #[test]
    fn redaction_with_empty_token_is_identity() {
        assert_eq!(redact_token("unchanged", ""), "unchanged");
    }

    #[test]
    fn method_url_joins_base_token_and_method() {
        assert_eq!(
            method_url("https://api.telegram.org/", "123:abc", "getMe"),
            "https://api.telegram.org/bot123:abc/getMe"
        );
    }

    #[test]
    fn query_escape_handles_channel_names_and_spaces() {
        assert_eq!(query_escape("@chan nel"), "%40chan%20nel");
        assert_eq!(query_escape("-1000123"), "-1000123");
        assert_eq!(query_escape("a&b=c"), "a%26b%3Dc");
    }

    #[test]
    fn parse_mode_defaults_to_html() {
        assert_eq!(ParseMode::default().as_str(), "HTML");
        assert_eq!(ParseMode::MarkdownV2.as_str(), "MarkdownV2");
    }
}
