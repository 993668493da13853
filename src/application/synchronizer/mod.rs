//! 朗读同步器 - 单词高亮与音频播放保持一致
//!
//! - session: 播放会话状态机
//! - synchronizer: 后端选择、高亮推进
//! - reader: 阅读会话任务与句柄
//! - timer: 代理音频的估算/兜底定时器

mod reader;
mod session;
#[allow(clippy::module_inception)]
mod synchronizer;
mod timer;

pub use reader::{spawn_reader, ReaderCommand, ReaderHandle, ReaderInput};
pub use session::{PlaybackMode, PlaybackSession};
pub use synchronizer::{FinishReason, Outcome, Synchronizer, SynchronizerConfig};
