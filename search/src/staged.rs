//! Background worker scheduling quick and full searches for live input.
//!
//! Input is debounced, a quick result set is published right away, and the
//! full ranking follows after a short delay unless a newer query has been
//! processed in the meantime.

use crate::engine::SearchEngine;
use crate::results::SearchResult;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::debug;
use typeahead_core::types::StagedConfig;

/// Published by the worker, in the order the caller should apply them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedUpdate {
    /// The query became too short; drop any displayed results.
    Cleared,
    Quick {
        query: String,
        results: Vec<SearchResult>,
    },
    Full {
        query: String,
        results: Vec<SearchResult>,
    },
}

enum Request {
    Query(String),
    Shutdown,
}

/// Handle to the staged search worker thread.
///
/// Dropping the handle shuts the worker down and waits for it.
pub struct StagedSearch {
    requests: Sender<Request>,
    worker: Option<JoinHandle<()>>,
}

impl StagedSearch {
    /// Starts the worker. Updates go to `updates` until its receiver is dropped.
    pub fn spawn(
        engine: Arc<SearchEngine>,
        config: StagedConfig,
        updates: Sender<StagedUpdate>,
    ) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<Request>();

        let worker = thread::spawn(move || {
            Worker::new(engine, config, updates).run(request_rx);
        });

        Self {
            requests: request_tx,
            worker: Some(worker),
        }
    }

    /// Feeds the current input text. Returns false once the worker has stopped.
    pub fn submit(&self, input: impl Into<String>) -> bool {
        self.requests.send(Request::Query(input.into())).is_ok()
    }

    /// Stops the worker and waits for it to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.requests.send(Request::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for StagedSearch {
    fn drop(&mut self) {
        self.stop();
    }
}

struct Worker {
    engine: Arc<SearchEngine>,
    config: StagedConfig,
    updates: Sender<StagedUpdate>,
    /// Latest raw input and when its debounce window closes.
    pending_input: Option<(String, Instant)>,
    /// Query awaiting its full search and when to run it.
    pending_full: Option<(String, Instant)>,
    last_query: Option<String>,
}

impl Worker {
    fn new(engine: Arc<SearchEngine>, config: StagedConfig, updates: Sender<StagedUpdate>) -> Self {
        Self {
            engine,
            config,
            updates,
            pending_input: None,
            pending_full: None,
            last_query: None,
        }
    }

    fn run(mut self, requests: Receiver<Request>) {
        loop {
            let received = match self.next_deadline() {
                Some(deadline) => {
                    requests.recv_timeout(deadline.saturating_duration_since(Instant::now()))
                }
                None => requests.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };

            match received {
                Ok(Request::Query(input)) => {
                    self.pending_input = Some((input, Instant::now() + self.config.debounce()));
                }
                Ok(Request::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }

            if self.fire_due().is_err() {
                debug!("staged search receiver dropped, stopping worker");
                break;
            }
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        let input = self.pending_input.as_ref().map(|(_, at)| *at);
        let full = self.pending_full.as_ref().map(|(_, at)| *at);
        input.into_iter().chain(full).min()
    }

    /// Runs whatever is due. Errs when the update receiver is gone.
    fn fire_due(&mut self) -> Result<(), mpsc::SendError<StagedUpdate>> {
        let now = Instant::now();

        if let Some((input, _)) = self.pending_input.take_if(|(_, at)| *at <= now) {
            self.handle_input(&input)?;
        }

        if let Some((query, _)) = self.pending_full.take_if(|(_, at)| *at <= now) {
            self.run_full(query)?;
        }

        Ok(())
    }

    fn handle_input(&mut self, input: &str) -> Result<(), mpsc::SendError<StagedUpdate>> {
        let query = input.trim();

        if query.chars().count() < self.config.min_query_len {
            self.pending_full = None;
            self.last_query = None;
            return self.updates.send(StagedUpdate::Cleared);
        }

        if self.last_query.as_deref() == Some(query) {
            debug!(query, "query unchanged, skipping");
            return Ok(());
        }
        self.last_query = Some(query.to_string());

        let results = self.engine.quick_search(query);
        let wants_full = query.chars().count() >= self.config.full_search_min_len
            || results.len() < self.config.quick_result_threshold;

        self.pending_full = if wants_full {
            debug!(query, quick = results.len(), "scheduling full search");
            Some((query.to_string(), Instant::now() + self.config.full_delay()))
        } else {
            None
        };

        self.updates.send(StagedUpdate::Quick {
            query: query.to_string(),
            results,
        })
    }

    fn run_full(&mut self, query: String) -> Result<(), mpsc::SendError<StagedUpdate>> {
        if self.last_query.as_deref() != Some(query.as_str()) {
            debug!(query = %query, "discarding superseded full search");
            return Ok(());
        }

        let results = self.engine.search(&query);
        self.updates.send(StagedUpdate::Full { query, results })
    }
}
