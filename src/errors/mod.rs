pub mod app_error;
pub mod stream_error;
