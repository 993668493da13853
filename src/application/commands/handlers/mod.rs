//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod reader_command_handlers;

pub use reader_command_handlers::*;
