//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod campaign;
pub mod dashboard;
pub mod error;
pub mod login_pages;
pub mod session;
pub mod state;
pub mod status;
pub mod templates;
#[cfg(test)]
pub mod test_utils;
pub mod tracking;

pub use error::ApiResult;
