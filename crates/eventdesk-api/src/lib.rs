// eventdesk-api: Async Rust client for the eventdesk REST backend

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod account;
mod dashboard;
mod feedback;

pub use auth::BearerToken;
pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
