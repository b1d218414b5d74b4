use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use super::tokens::{RequestPurpose, RequestToken, RequestTracker};
use crate::client::{EntrySource, FetchError};
use crate::models::{Entry, LayerInfo, SourceRequest, Stats};

/// Result of one background collaborator call
#[derive(Debug)]
pub enum FetchPayload {
    Entries(Result<Vec<Entry>, FetchError>),
    Layers(Result<Vec<LayerInfo>, FetchError>),
    Stats(Result<Stats, FetchError>),
}

impl FetchPayload {
    pub fn purpose(&self) -> RequestPurpose {
        match self {
            FetchPayload::Entries(_) => RequestPurpose::Entries,
            FetchPayload::Layers(_) => RequestPurpose::Layers,
            FetchPayload::Stats(_) => RequestPurpose::Stats,
        }
    }
}

#[derive(Debug)]
pub struct FetchResponse {
    pub token: RequestToken,
    pub payload: FetchPayload,
}

/// Runs collaborator calls on background threads so the UI loop never blocks.
///
/// Responses come back over a channel and pass through a [`RequestTracker`]:
/// only the latest request of each purpose is handed to the caller.
pub struct Fetcher {
    source: Arc<dyn EntrySource>,
    tracker: RequestTracker,
    tx: Sender<FetchResponse>,
    rx: Receiver<FetchResponse>,
}

impl Fetcher {
    pub fn new(source: Arc<dyn EntrySource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { source, tracker: RequestTracker::new(), tx, rx }
    }

    pub fn request_entries(&mut self, request: SourceRequest) -> RequestToken {
        self.spawn(RequestPurpose::Entries, move |source| {
            FetchPayload::Entries(source.fetch_source(&request))
        })
    }

    pub fn request_layers(&mut self) -> RequestToken {
        self.spawn(RequestPurpose::Layers, |source| FetchPayload::Layers(source.fetch_layers()))
    }

    pub fn request_stats(&mut self) -> RequestToken {
        self.spawn(RequestPurpose::Stats, |source| FetchPayload::Stats(source.fetch_stats()))
    }

    fn spawn<F>(&mut self, purpose: RequestPurpose, job: F) -> RequestToken
    where
        F: FnOnce(&dyn EntrySource) -> FetchPayload + Send + 'static,
    {
        let token = self.tracker.issue(purpose);
        debug!(?purpose, token = token.value(), "issuing request");

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let payload = job(source.as_ref());
            // Receiver is gone once the session has ended
            let _ = tx.send(FetchResponse { token, payload });
        });

        token
    }

    /// Next current response, without blocking
    pub fn try_next(&mut self) -> Option<FetchResponse> {
        while let Ok(response) = self.rx.try_recv() {
            if self.accept(&response) {
                return Some(response);
            }
        }
        None
    }

    /// Next current response, waiting up to `timeout`
    pub fn wait_next(&mut self, timeout: Duration) -> Option<FetchResponse> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(response) if self.accept(&response) => return Some(response),
                Ok(_) => continue,
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    fn accept(&mut self, response: &FetchResponse) -> bool {
        let purpose = response.payload.purpose();
        let current = self.tracker.complete(purpose, response.token);
        if !current {
            debug!(?purpose, token = response.token.value(), "discarding stale response");
        }
        current
    }

    /// Whether any latest request is still outstanding
    pub fn is_loading(&self) -> bool {
        self.tracker.any_pending()
    }

    pub fn is_pending(&self, purpose: RequestPurpose) -> bool {
        self.tracker.is_pending(purpose)
    }
}
