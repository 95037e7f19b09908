//! Phishing-simulation service library.
//!
//! Hexagonal layout: `domain` holds the campaign lifecycle and its ports,
//! `inbound` the HTTP adapter, `outbound` the PostgreSQL and SMTP adapters,
//! and `server` the wiring that assembles them from configuration.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use middleware::RequestTrace;
