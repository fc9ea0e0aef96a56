//! Network actor - runs queries in the Tokio async runtime

use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::QueryClient;

/// Tracks a query in flight for cancellation
struct ActiveQuery {
    cancel_tx: oneshot::Sender<()>,
}

/// Network actor that processes query commands
pub struct NetworkActor {
    client: QueryClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_queries: JoinSet<u64>,
    cancel_handles: HashMap<u64, ActiveQuery>,
}

impl NetworkActor {
    pub fn new(client: QueryClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_queries: JoinSet::new(),
            cancel_handles: HashMap::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::SubmitQuery { id, query }) => {
                            let (cancel_tx, cancel_rx) = oneshot::channel();
                            self.cancel_handles.insert(id, ActiveQuery { cancel_tx });

                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_queries.spawn(async move {
                                tracing::info!(id, endpoint = %client.endpoint(), "Submitting query");
                                tokio::select! {
                                    result = client.execute(id, &query) => {
                                        tracing::info!(id, time_ms = result.time_ms(), "Query completed");
                                        let _ = response_tx.send(result);
                                    }
                                    _ = cancel_rx => {
                                        tracing::info!(id, "Query abandoned");
                                    }
                                }
                                id
                            });
                        }

                        Some(NetworkCommand::CancelQuery(id)) => {
                            if let Some(active) = self.cancel_handles.remove(&id) {
                                tracing::info!(id, "Cancelling query");
                                let _ = active.cancel_tx.send(());
                                let _ = self.response_tx.send(NetworkResponse::Cancelled { id });
                            }
                        }

                        Some(NetworkCommand::Shutdown) => {
                            for (_, active) in self.cancel_handles.drain() {
                                let _ = active.cancel_tx.send(());
                            }
                            break;
                        }

                        None => break,
                    }
                }

                Some(finished) = self.active_queries.join_next() => {
                    if let Ok(id) = finished {
                        self.cancel_handles.remove(&id);
                    }
                }
            }
        }
    }
}
