//! Send a test error notification to a Telegram chat.
//!
//! Usage:
//!
//! ```sh
//! TELEGRAM_TOKEN=<token> TELEGRAM_CHAT_ID=<chat-id> cargo run --example error_notify
//! ```

use std::env;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use telelog::{Attr, Level, LogHandler, Record, TelegramHandler};

fn main() -> ExitCode {
    let Ok(token) = env::var("TELEGRAM_TOKEN") else {
        eprintln!("TELEGRAM_TOKEN is not set");
        return ExitCode::FAILURE;
    };
    let Ok(chat_id) = env::var("TELEGRAM_CHAT_ID") else {
        eprintln!("TELEGRAM_CHAT_ID is not set");
        return ExitCode::FAILURE;
    };
    let level = env::var("TELELOG_LEVEL")
        .map(|s| Level::parse_or_default(&s))
        .unwrap_or_default();

    let handler = match TelegramHandler::builder()
        .with_token(token)
        .with_chat_id(chat_id)
        .with_level(level)
        .build()
    {
        Ok(handler) => handler,
        Err(err) => {
            eprintln!("telelog: {err}");
            return ExitCode::FAILURE;
        }
    };

    let handler = handler
        .with_attrs(vec![Attr::new("release", "v1.0.0")])
        .with_group("user")
        .with_attrs(vec![Attr::new("id", "user-123")]);

    let record = Record::new(Level::Error, "Hello from telelog")
        .with_attrs(vec![Attr::new("environment", "dev")]);
    if handler.enabled(record.level) {
        let _ = handler.handle(record);
    }

    // Dispatch is fire-and-forget; give the background send a moment.
    thread::sleep(Duration::from_secs(1));
    ExitCode::SUCCESS
}
