// aurora-api: Async Rust client for the Aurora Voyages booking REST API

pub mod bookings;
pub mod catalog;
pub mod client;
pub mod error;
pub mod models;
pub mod payments;
pub mod transport;

pub use bookings::IDEMPOTENCY_HEADER;
pub use client::ApiClient;
pub use error::Error;
pub use transport::{AUTH_HEADER, DEFAULT_TIMEOUT, TlsMode, TransportConfig};
