//! SQLite Persistence - SQLite 数据库持久化实现

mod category_repo;
mod database;
mod dictionary_repo;
mod passage_repo;

pub use category_repo::*;
pub use database::*;
pub use dictionary_repo::*;
pub use passage_repo::*;
