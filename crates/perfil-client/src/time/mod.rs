mod message;
mod parse;

pub use message::{MessageDay, classify_message_day, format_message_time, format_message_time_at};
pub use parse::parse_timestamp;
