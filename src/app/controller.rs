//! Direct submission driver for callers that own the query state
//! (one-shot mode). The TUI goes through the actors instead.

use crate::app::state::QueryState;
use crate::classify::resolve_outcome;
use crate::error::StateError;
use crate::models::ClassifiedResult;
use crate::network::QueryClient;

pub struct SubmissionController {
    client: QueryClient,
}

impl SubmissionController {
    pub fn new(client: QueryClient) -> Self {
        SubmissionController { client }
    }

    /// Submit the current query text and store the classified result.
    ///
    /// The state is Submitting for the duration of the request and Idle
    /// again afterwards, whatever the outcome.
    pub async fn submit(&self, state: &mut QueryState) -> Result<ClassifiedResult, StateError> {
        if state.query_text().is_empty() {
            return Err(StateError::EmptyQuery);
        }
        state.begin_submission()?;

        tracing::info!(endpoint = %self.client.endpoint(), "Submitting query");
        let outcome = self
            .client
            .post_query(state.query_text())
            .await
            .map(|(_, raw)| raw);
        let result = resolve_outcome(outcome);

        state.complete_submission(result.clone())?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::LifecyclePhase;
    use crate::network::client::tests::{refused_endpoint, serve_once};

    #[tokio::test]
    async fn test_connection_refused_gives_generic_error() {
        let controller = SubmissionController::new(QueryClient::new(refused_endpoint().await, None));
        let mut state = QueryState::new();
        state.set_query_text("show me all pending orders");

        let result = controller.submit(&mut state).await.unwrap();
        assert_eq!(
            result,
            ClassifiedResult::Error("Failed to process your query. Please try again.".into())
        );
        assert_eq!(state.phase(), LifecyclePhase::Idle);
        assert_eq!(state.last_result(), Some(&result));
    }

    #[tokio::test]
    async fn test_server_error_is_shown_verbatim() {
        let (endpoint, _rx) =
            serve_once("400 Bad Request", r#"{"error":"Could not map 'widgets' to a table"}"#).await;
        let controller = SubmissionController::new(QueryClient::new(endpoint, None));
        let mut state = QueryState::new();
        state.set_query_text("widgets");

        let result = controller.submit(&mut state).await.unwrap();
        assert_eq!(result, ClassifiedResult::Error("Could not map 'widgets' to a table".into()));
    }

    #[tokio::test]
    async fn test_tabular_result_stored() {
        let (endpoint, _rx) = serve_once(
            "200 OK",
            r#"{"question":"pending orders","sql":"SELECT * FROM orders","data":[{"id":1,"status":"pending"}]}"#,
        )
        .await;
        let controller = SubmissionController::new(QueryClient::new(endpoint, None));
        let mut state = QueryState::new();
        state.set_query_text("pending orders");

        let result = controller.submit(&mut state).await.unwrap();
        assert_eq!(result.kind(), "tabular");
        assert_eq!(state.phase(), LifecyclePhase::Idle);
    }

    #[tokio::test]
    async fn test_empty_query_rejected_without_request() {
        let controller = SubmissionController::new(QueryClient::new(refused_endpoint().await, None));
        let mut state = QueryState::new();

        assert_eq!(controller.submit(&mut state).await, Err(StateError::EmptyQuery));
        assert_eq!(state.phase(), LifecyclePhase::Idle);
    }

    #[tokio::test]
    async fn test_submit_while_submitting_rejected() {
        let controller = SubmissionController::new(QueryClient::new(refused_endpoint().await, None));
        let mut state = QueryState::new();
        state.set_query_text("orders");
        state.begin_submission().unwrap();

        assert_eq!(
            controller.submit(&mut state).await,
            Err(StateError::AlreadySubmitting)
        );
        assert_eq!(state.phase(), LifecyclePhase::Submitting);
    }
}
