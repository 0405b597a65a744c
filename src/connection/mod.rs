// src/connection/mod.rs

//! The contract the wire-protocol layer drives: session lifecycle events and
//! per-statement dispatch.

// Declare the private sub-modules of the `connection` module.
mod handler;

// Publicly re-export the primary types from the sub-modules.
pub use handler::HubHandler;
