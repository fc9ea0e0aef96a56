//! # Querydesk
//!
//! A terminal client for asking natural-language questions about orders and
//! inventory. Questions are POSTed to a backend that turns them into SQL;
//! the answer comes back as an error, a message, or rows of data.
//!
//! ## Features
//! - One query in flight at a time; the search control is disabled meanwhile
//! - Responses classified into error / message / table
//! - Tables whose columns are only known once the response arrives
//! - One-shot mode printing the result as plain text
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod classify;
pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod table;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState, LifecyclePhase, QueryState, SubmissionController};
pub use classify::{classify, resolve_outcome};
pub use config::Config;
pub use error::{StateError, TransportError};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{ClassifiedResult, QueryRequest, RawResponse, Row};
pub use network::{NetworkActor, QueryClient};
pub use table::{ColumnSchema, ResultView, TableGrid};
