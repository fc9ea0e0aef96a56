//! App state - pure data structure with no I/O logic

use chrono::{DateTime, Local};

use crate::error::StateError;
use crate::messages::RenderState;
use crate::models::ClassifiedResult;

/// Submission lifecycle phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LifecyclePhase {
    #[default]
    Idle,
    Submitting,
}

/// Query text, phase and last result of the session
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryState {
    query_text: String,
    phase: LifecyclePhase,
    last_result: Option<ClassifiedResult>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn last_result(&self) -> Option<&ClassifiedResult> {
        self.last_result.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == LifecyclePhase::Submitting
    }

    /// Replace the query text. Allowed in any phase.
    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.query_text = text.into();
    }

    pub(crate) fn query_text_mut(&mut self) -> &mut String {
        &mut self.query_text
    }

    /// Idle -> Submitting. The previous result stays visible.
    pub fn begin_submission(&mut self) -> Result<(), StateError> {
        if self.phase != LifecyclePhase::Idle {
            return Err(StateError::AlreadySubmitting);
        }
        self.phase = LifecyclePhase::Submitting;
        Ok(())
    }

    /// Submitting -> Idle, replacing the last result
    pub fn complete_submission(&mut self, result: ClassifiedResult) -> Result<(), StateError> {
        if self.phase != LifecyclePhase::Submitting {
            return Err(StateError::NotSubmitting);
        }
        self.last_result = Some(result);
        self.phase = LifecyclePhase::Idle;
        Ok(())
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub query: QueryState,
    pub cursor_position: usize,

    // Result area
    pub result_scroll: usize,
    pub last_status: Option<u16>,
    pub last_time_ms: u64,
    pub completed_at: Option<DateTime<Local>>,

    // Request tracking
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,

    pub endpoint: String,
    pub show_help: bool,
}

impl AppState {
    pub fn new(endpoint: impl Into<String>) -> Self {
        AppState {
            query: QueryState::new(),
            cursor_position: 0,
            result_scroll: 0,
            last_status: None,
            last_time_ms: 0,
            completed_at: None,
            next_request_id: 1,
            pending_request_id: None,
            endpoint: endpoint.into(),
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            query_text: self.query.query_text().to_string(),
            cursor_position: self.cursor_position,
            phase: self.query.phase(),
            last_result: self.query.last_result().cloned(),
            result_scroll: self.result_scroll,
            last_status: self.last_status,
            last_time_ms: self.last_time_ms,
            completed_at: self.completed_at,
            endpoint: self.endpoint.clone(),
            show_help: self.show_help,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_round_trip() {
        let mut state = QueryState::new();
        state.set_query_text("pending orders");
        assert_eq!(state.phase(), LifecyclePhase::Idle);

        state.begin_submission().unwrap();
        assert_eq!(state.phase(), LifecyclePhase::Submitting);

        state
            .complete_submission(ClassifiedResult::Message("done".into()))
            .unwrap();
        assert_eq!(state.phase(), LifecyclePhase::Idle);
        assert_eq!(state.last_result(), Some(&ClassifiedResult::Message("done".into())));
    }

    #[test]
    fn test_begin_twice_is_rejected() {
        let mut state = QueryState::new();
        state.begin_submission().unwrap();
        assert_eq!(state.begin_submission(), Err(StateError::AlreadySubmitting));
        assert!(state.is_submitting());
    }

    #[test]
    fn test_complete_without_begin_is_rejected() {
        let mut state = QueryState::new();
        let result = state.complete_submission(ClassifiedResult::Error("x".into()));
        assert_eq!(result, Err(StateError::NotSubmitting));
        assert_eq!(state.last_result(), None);
    }

    #[test]
    fn test_previous_result_visible_while_submitting() {
        let mut state = QueryState::new();
        state.begin_submission().unwrap();
        state
            .complete_submission(ClassifiedResult::Message("first".into()))
            .unwrap();

        state.begin_submission().unwrap();
        assert_eq!(state.last_result(), Some(&ClassifiedResult::Message("first".into())));

        state
            .complete_submission(ClassifiedResult::Error("second".into()))
            .unwrap();
        assert_eq!(state.last_result(), Some(&ClassifiedResult::Error("second".into())));
    }

    #[test]
    fn test_text_editable_mid_flight() {
        let mut state = QueryState::new();
        state.set_query_text("a");
        state.begin_submission().unwrap();
        state.set_query_text("ab");
        assert_eq!(state.query_text(), "ab");
    }

    #[test]
    fn test_next_id_increments() {
        let mut state = AppState::new("http://localhost:5000/api/query");
        assert_eq!(state.next_id(), 1);
        assert_eq!(state.next_id(), 2);
    }
}
