//! Render state - data structure sent from App layer to UI for rendering

use chrono::{DateTime, Local};

use crate::app::state::LifecyclePhase;
use crate::constants::{DEFAULT_ENDPOINT, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE};
use crate::models::ClassifiedResult;

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Query input
    pub query_text: String,
    pub cursor_position: usize,
    pub phase: LifecyclePhase,

    // Result area
    pub last_result: Option<ClassifiedResult>,
    pub result_scroll: usize,
    pub last_status: Option<u16>,
    pub last_time_ms: u64,
    pub completed_at: Option<DateTime<Local>>,

    pub endpoint: String,
    pub show_help: bool,
}

impl RenderState {
    pub fn is_submitting(&self) -> bool {
        self.phase == LifecyclePhase::Submitting
    }

    /// Label of the submit control
    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            SUBMIT_LABEL_BUSY
        } else {
            SUBMIT_LABEL_IDLE
        }
    }

    /// Whether the submit control accepts input
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && !self.query_text.is_empty()
    }
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            query_text: String::new(),
            cursor_position: 0,
            phase: LifecyclePhase::Idle,
            last_result: None,
            result_scroll: 0,
            last_status: None,
            last_time_ms: 0,
            completed_at: None,
            endpoint: String::from(DEFAULT_ENDPOINT),
            show_help: false,
        }
    }
}
