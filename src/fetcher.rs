//! Background fetch worker
//!
//! Runs queued `FetchRequest`s on tokio tasks so the UI loop never blocks on
//! the network, and delivers the outcomes back over a tokio channel.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::controller::{FetchOutcome, FetchRequest};
use crate::data::ImageSearch;

/// Capacity of the outcome channel
const CHANNEL_CAPACITY: usize = 32;

/// Handle for submitting requests and collecting their outcomes
pub struct FetchWorker {
    client: Arc<dyn ImageSearch>,
    sender: mpsc::Sender<FetchOutcome>,
    receiver: mpsc::Receiver<FetchOutcome>,
}

impl FetchWorker {
    /// Creates a worker that resolves requests with `client`
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(client: Arc<dyn ImageSearch>) -> Self {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            client,
            sender,
            receiver,
        }
    }

    /// Starts fetching `request` in the background
    pub fn submit(&self, request: FetchRequest) {
        let client = Arc::clone(&self.client);
        let tx = self.sender.clone();

        tokio::spawn(async move {
            tracing::debug!(seq = request.seq, query = %request.query, page = request.page, "fetch started");
            let outcome = request.resolve(client.as_ref()).await;
            // The receiver only goes away when the app is shutting down
            let _ = tx.send(outcome).await;
        });
    }

    /// Starts every request in `requests`
    pub fn submit_all(&self, requests: Vec<FetchRequest>) {
        for request in requests {
            self.submit(request);
        }
    }

    /// Returns a finished outcome without blocking, if one is ready
    pub fn try_recv(&mut self) -> Option<FetchOutcome> {
        self.receiver.try_recv().ok()
    }

    /// Waits for the next finished outcome
    pub async fn recv(&mut self) -> Option<FetchOutcome> {
        self.receiver.recv().await
    }
}
