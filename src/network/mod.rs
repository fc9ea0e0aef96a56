//! Network layer - query execution against the backend
//!
//! The Network actor receives query commands and sends back outcomes.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::QueryClient;
