pub mod config;
pub mod core;
pub mod errors;
pub mod handlers;
pub mod proto;
pub mod routes;
pub mod server;
pub mod state;
pub mod transport;

// Re-export commonly used items for convenience
pub use config::ServerConfig;
pub use core::*;
pub use errors::app_error::{AppError, AppResult};
pub use errors::stream_error::{StreamError, StreamResult, TransportError};
pub use state::AppState;
