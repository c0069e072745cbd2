//! HTTP request handlers
//!
//! - `api` - Health check endpoint
//! - `webhook` - Call-setup webhooks the telephony platform invokes

pub mod api;
pub mod webhook;
