//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod audio_handlers;
mod lookup_handlers;
mod passage_handlers;
mod reader_handlers;

pub use audio_handlers::*;
pub use lookup_handlers::*;
pub use passage_handlers::*;
pub use reader_handlers::*;
