//! HTTP Handlers

mod audio;
mod category;
mod lookup;
mod passage;
mod ping;
mod reader;
mod reader_ws;

pub use audio::*;
pub use category::*;
pub use lookup::*;
pub use passage::*;
pub use ping::*;
pub use reader::*;
pub use reader_ws::*;
