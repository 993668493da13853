//! Reader Events - WebSocket 消息定义

mod reader_events;

pub use reader_events::{ClientInput, ClientMessage, ReaderEvent};
