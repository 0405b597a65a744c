// src/core/mod.rs

//! The central module containing the core logic and data structures of SqlHub.

pub mod admin;
pub mod classifier;
pub mod connector;
pub mod dispatcher;
pub mod errors;
pub mod parser;
pub mod registry;
pub mod resultset;
pub mod slowlog;

pub use errors::HubError;
pub use resultset::ResultSet;
