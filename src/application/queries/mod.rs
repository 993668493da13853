//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod audio_queries;
mod lookup_queries;
mod passage_queries;
mod reader_queries;

pub mod handlers;

pub use audio_queries::*;
pub use lookup_queries::*;
pub use passage_queries::*;
pub use reader_queries::*;
