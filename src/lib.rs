//! Lector - 多语种阅读服务，朗读时逐词高亮
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Passage Context: 文章、分词、高亮状态
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Repositories, NativeSpeech, ProxiedAudio, Translator, AudioRelay, AudioCache, ReaderRegistry）
//! - Synchronizer: 朗读同步器与阅读会话任务
//! - Commands / Queries: CQRS 处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + Reader WebSocket
//! - Memory: ReaderRegistry 内存实现
//! - Persistence: SQLite + Sled 存储
//! - Adapters: Google TTS 中转, MyMemory 翻译, 浏览器音频桥接
//! - Events: WebSocket 消息定义

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
