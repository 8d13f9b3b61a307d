//! Forward structured log records to a Telegram chat.
//!
//! The crate implements a log sink: records produced by a structured
//! logging front-end are rendered to text and delivered to a Telegram
//! chat via the Bot API. Delivery is fire-and-forget so log statements
//! never block on the network.
//!
//! ```no_run
//! use telelog::{Attr, Level, LogHandler, Record, TelegramHandler};
//!
//! let handler = TelegramHandler::builder()
//!     .with_token("123456:bot-token")
//!     .with_chat_id("-1000000000")
//!     .with_level(Level::Error)
//!     .build()
//!     .expect("valid Telegram credentials");
//!
//! let handler = handler
//!     .with_attrs(vec![Attr::new("release", "v1.0.0")])
//!     .with_group("user")
//!     .with_attrs(vec![Attr::new("id", "user-123")]);
//!
//! if handler.enabled(Level::Error) {
//!     let _ = handler.handle(Record::new(Level::Error, "payment failed"));
//! }
//! ```

pub mod context;
pub mod convert;
pub mod handler;
pub mod level;
pub mod record;
pub mod telegram;

pub use context::{BoundAttr, BoundContext};
pub use convert::{Converter, DefaultConverter, ReplaceAttr};
pub use handler::{HandlerError, LogHandler};
pub use level::Level;
pub use record::{Attr, AttrValue, Record, Source};
pub use telegram::{ApiError, BuildError, ParseMode, TelegramHandler, TelegramHandlerBuilder};
