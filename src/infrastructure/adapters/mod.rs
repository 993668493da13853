//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod browser_audio;
pub mod translator;
pub mod tts_proxy;

pub use browser_audio::*;
pub use translator::*;
pub use tts_proxy::*;
