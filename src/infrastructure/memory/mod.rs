//! Memory Layer - In-Memory State Management
//!
//! 管理打开中的阅读会话

mod reader_registry;

pub use reader_registry::InMemoryReaderRegistry;
