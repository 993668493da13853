//! TTS Proxy Adapter - 远端 TTS 音频中转

mod google_tts_client;

pub use google_tts_client::*;
