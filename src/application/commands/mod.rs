//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod reader_commands;

pub mod handlers;

pub use reader_commands::*;
