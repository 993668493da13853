//! HTTP Layer - RESTful API + Reader WebSocket

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, StatusError};
pub use routes::create_routes;
pub use server::HttpServer;
pub use state::{AppState, ReaderSettings};
