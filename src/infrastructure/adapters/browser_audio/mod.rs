//! Browser Audio Adapter - 由浏览器执行的音频后端

mod client_bridge;

pub use client_bridge::ClientAudioBridge;
