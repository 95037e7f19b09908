//! Outbound adapters implementing domain ports against external systems.

pub mod mail;
pub mod persistence;
