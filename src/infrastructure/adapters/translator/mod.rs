//! Translator Adapter - 外部翻译服务

mod mymemory_client;

pub use mymemory_client::*;
