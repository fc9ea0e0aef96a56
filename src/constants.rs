//! Application constants
//!
//! Centralized location for user-facing strings and configuration defaults.

/// Default query endpoint of the backend
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/query";

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "querydesk.log";

/// Shown for every transport failure; the cause only goes to the log
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to process your query. Please try again.";

/// Shown instead of a table when a tabular result has no rows
pub const EMPTY_RESULT_PLACEHOLDER: &str = "No data found matching your query.";

/// Cell text for a null value
pub const NULL_CELL: &str = "N/A";

/// Submit control labels
pub const SUBMIT_LABEL_IDLE: &str = "Search";
pub const SUBMIT_LABEL_BUSY: &str = "Processing...";

/// Page header
pub const APP_TITLE: &str = "Database Query Assistant";
pub const APP_SUBTITLE: &str = "Ask questions about orders and inventory in plain English";

/// Shown in the empty query input
pub const INPUT_PLACEHOLDER: &str = "Example: Show me all pending orders for customer Smith";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
