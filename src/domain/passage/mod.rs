//! Passage Context - 文章限界上下文
//!
//! 职责:
//! - 文章聚合（标题、正文、语言、slug、配图）
//! - 单词 Token 实体
//! - 数据边界校验（行 -> 聚合）

mod aggregate;
mod entities;
mod errors;
mod value_objects;

pub use aggregate::Passage;
pub use entities::Token;
pub use errors::PassageError;
pub use value_objects::{Language, PassageId, Slug, Title};
