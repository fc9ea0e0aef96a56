//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::classify::{classify, resolve_outcome};
use crate::error::{StateError, TransportError};
use crate::messages::{NetworkCommand, NetworkResponse};

impl AppState {
    // ========================
    // Input editing
    // ========================

    pub fn move_cursor_left(&mut self) {
        let input = self.query.query_text();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.query.query_text();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.query.query_text().len();
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        let input = self.query.query_text_mut();
        if cursor_pos <= input.len() {
            input.insert(cursor_pos, c);
            self.cursor_position = cursor_pos + c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let cursor_pos = self.cursor_position;
            let input = self.query.query_text_mut();
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    pub fn delete_char_forward(&mut self) {
        let cursor_pos = self.cursor_position;
        let input = self.query.query_text_mut();
        if cursor_pos < input.len() {
            input.remove(cursor_pos);
        }
    }

    pub fn clear_query(&mut self) {
        self.query.set_query_text(String::new());
        self.cursor_position = 0;
    }

    // ========================
    // Result scrolling
    // ========================

    pub fn scroll_up(&mut self, rows: usize) {
        self.result_scroll = self.result_scroll.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.result_scroll = self.result_scroll.saturating_add(rows);
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Query submission
    // ========================

    /// Start a submission and build the command that performs it.
    ///
    /// Returns `None` while a query is in flight or when the text is empty.
    pub fn submit_query(&mut self) -> Option<NetworkCommand> {
        if self.query.query_text().is_empty() {
            tracing::debug!(reason = %StateError::EmptyQuery, "Submission rejected");
            return None;
        }
        if let Err(e) = self.query.begin_submission() {
            tracing::debug!(reason = %e, "Submission rejected");
            return None;
        }

        let id = self.next_id();
        self.pending_request_id = Some(id);

        Some(NetworkCommand::SubmitQuery {
            id,
            query: self.query.query_text().to_string(),
        })
    }

    /// Cancel the query in flight, if any
    pub fn cancel_query(&mut self) -> Option<NetworkCommand> {
        self.pending_request_id.map(NetworkCommand::CancelQuery)
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        let response_id = response.id();
        if self.pending_request_id != Some(response_id) {
            tracing::debug!(id = response_id, "Ignoring stale response");
            return;
        }
        self.last_time_ms = response.time_ms();

        let result = match response {
            NetworkResponse::Payload { status, raw, .. } => {
                self.last_status = Some(status);
                classify(raw)
            }
            NetworkResponse::TransportFailure { error, .. } => {
                self.last_status = None;
                resolve_outcome(Err(error))
            }
            NetworkResponse::Cancelled { .. } => {
                self.last_status = None;
                resolve_outcome(Err(TransportError::Request("cancelled".to_string())))
            }
        };

        tracing::info!(id = response_id, kind = result.kind(), "Query result ready");
        self.pending_request_id = None;
        self.result_scroll = 0;
        self.completed_at = Some(chrono::Local::now());
        if let Err(e) = self.query.complete_submission(result) {
            tracing::warn!(id = response_id, error = %e, "Response without submission");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::LifecyclePhase;
    use crate::models::{ClassifiedResult, RawResponse};
    use serde_json::json;

    fn state_with_query(text: &str) -> AppState {
        let mut state = AppState::new("http://localhost:5000/api/query");
        for c in text.chars() {
            state.enter_char(c);
        }
        state
    }

    #[test]
    fn test_editing_with_multibyte_chars() {
        let mut state = state_with_query("café");
        state.move_cursor_left();
        state.enter_char('x');
        assert_eq!(state.query.query_text(), "cafxé");

        state.cursor_end();
        state.delete_char();
        assert_eq!(state.query.query_text(), "cafx");

        state.cursor_home();
        state.delete_char_forward();
        assert_eq!(state.query.query_text(), "afx");
    }

    #[test]
    fn test_empty_query_not_submitted() {
        let mut state = state_with_query("");
        assert!(state.submit_query().is_none());
        assert_eq!(state.query.phase(), LifecyclePhase::Idle);
    }

    #[test]
    fn test_submit_emits_command_and_enters_submitting() {
        let mut state = state_with_query("pending orders");
        match state.submit_query() {
            Some(NetworkCommand::SubmitQuery { id, query }) => {
                assert_eq!(id, 1);
                assert_eq!(query, "pending orders");
            }
            other => panic!("expected submit command, got {:?}", other),
        }
        assert_eq!(state.query.phase(), LifecyclePhase::Submitting);
        assert_eq!(state.pending_request_id, Some(1));
    }

    #[test]
    fn test_second_submit_while_submitting_is_rejected() {
        let mut state = state_with_query("pending orders");
        assert!(state.submit_query().is_some());
        assert!(state.submit_query().is_none());
        assert_eq!(state.next_request_id, 2);
    }

    #[test]
    fn test_payload_completes_submission() {
        let mut state = state_with_query("stock");
        state.submit_query();
        state.handle_response(NetworkResponse::Payload {
            id: 1,
            status: 200,
            raw: RawResponse::from_value(json!({"question": "stock", "data": [{"qty": 0}]})),
            time_ms: 12,
        });

        assert_eq!(state.query.phase(), LifecyclePhase::Idle);
        assert_eq!(state.last_status, Some(200));
        assert_eq!(state.last_time_ms, 12);
        assert!(matches!(
            state.query.last_result(),
            Some(ClassifiedResult::Tabular { rows, .. }) if rows.len() == 1
        ));
    }

    #[test]
    fn test_transport_failure_returns_to_idle_with_generic_text() {
        let mut state = state_with_query("stock");
        state.submit_query();
        state.handle_response(NetworkResponse::TransportFailure {
            id: 1,
            error: TransportError::Connect("connection refused".into()),
            time_ms: 3,
        });

        assert_eq!(state.query.phase(), LifecyclePhase::Idle);
        assert_eq!(
            state.query.last_result(),
            Some(&ClassifiedResult::Error(
                "Failed to process your query. Please try again.".into()
            ))
        );
    }

    #[test]
    fn test_stale_response_ignored() {
        let mut state = state_with_query("stock");
        state.submit_query();
        state.handle_response(NetworkResponse::Payload {
            id: 42,
            status: 200,
            raw: RawResponse::from_value(json!({"message": "old"})),
            time_ms: 1,
        });

        assert_eq!(state.query.phase(), LifecyclePhase::Submitting);
        assert_eq!(state.query.last_result(), None);
    }

    #[test]
    fn test_phase_transitions_once_per_submission() {
        let mut state = state_with_query("orders");
        let mut phases = vec![state.query.phase()];

        for round in 1..=2u64 {
            state.submit_query();
            phases.push(state.query.phase());
            state.handle_response(NetworkResponse::Payload {
                id: round,
                status: 200,
                raw: RawResponse::from_value(json!({"message": "ok"})),
                time_ms: 1,
            });
            phases.push(state.query.phase());
        }

        use LifecyclePhase::*;
        assert_eq!(phases, [Idle, Submitting, Idle, Submitting, Idle]);
    }

    #[test]
    fn test_cancel_only_when_pending() {
        let mut state = state_with_query("orders");
        assert!(state.cancel_query().is_none());
        state.submit_query();
        assert!(matches!(state.cancel_query(), Some(NetworkCommand::CancelQuery(1))));
    }

    #[test]
    fn test_scroll_saturates() {
        let mut state = state_with_query("");
        state.scroll_up(3);
        assert_eq!(state.result_scroll, 0);
        state.scroll_down(10);
        state.scroll_up(4);
        assert_eq!(state.result_scroll, 6);
    }
}
