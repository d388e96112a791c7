use futures::StreamExt;
use logwatch_types::WatchEvent;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::api::LogApiClient;
use crate::sse::SseDecoder;

/// What happened on the live channel
#[derive(Clone, Debug, PartialEq)]
pub enum StreamUpdate {
    /// The watch request succeeded and events are flowing
    Opened,
    /// One decoded event
    Event(WatchEvent),
    /// The channel ended on its own (transport error or server close)
    Closed { reason: String },
}

/// A [`StreamUpdate`] tagged with the session that produced it
///
/// Receivers compare `session` with [`LogStreamManager::session`] to drop
/// updates from a channel that has since been stopped.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamMessage {
    pub session: u64,
    pub update: StreamUpdate,
}

/// Manages the single live watch channel
pub struct LogStreamManager {
    /// Cancellation token for stopping the stream
    cancel: CancellationToken,

    /// Active stream task handle
    task: Option<tokio::task::JoinHandle<()>>,

    /// Incremented on every start
    session: u64,
}

impl LogStreamManager {
    pub fn new() -> Self {
        Self {
            cancel: CancellationToken::new(),
            task: None,
            session: 0,
        }
    }

    /// Open the watch channel
    ///
    /// Returns `false` without doing anything when a channel is already
    /// running.
    pub fn start(
        &mut self,
        client: LogApiClient,
        tail: usize,
        tx: mpsc::UnboundedSender<StreamMessage>,
    ) -> bool {
        if self.is_running() {
            return false;
        }

        self.session += 1;
        let session = self.session;
        let cancel = self.cancel.clone();

        tracing::info!(session, tail, "opening live channel");
        self.task = Some(tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                reason = run_channel(client, tail, session, &tx) => {
                    tracing::info!(session, %reason, "live channel closed");
                    let _ = tx.send(StreamMessage {
                        session,
                        update: StreamUpdate::Closed { reason },
                    });
                }
            }
        }));
        true
    }

    /// Close the channel. Nothing is reported for a stopped session.
    pub fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!(session = self.session, "live channel stopped");
        }
        // Create a fresh cancellation token for future streams
        self.cancel = CancellationToken::new();
    }

    /// Check if the channel task is still running
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Id of the most recently started session (0 before the first start)
    pub fn session(&self) -> u64 {
        self.session
    }
}

impl Default for LogStreamManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LogStreamManager {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Consume the watch stream until it ends, returning why it ended
async fn run_channel(
    client: LogApiClient,
    tail: usize,
    session: u64,
    tx: &mpsc::UnboundedSender<StreamMessage>,
) -> String {
    let send = |update| tx.send(StreamMessage { session, update }).is_ok();

    let response = match client.open_watch(tail).await {
        Ok(response) => response,
        Err(e) => return e.to_string(),
    };
    if !send(StreamUpdate::Opened) {
        return "receiver dropped".to_string();
    }

    let mut body = response.bytes_stream();
    let mut decoder = SseDecoder::new();

    loop {
        match body.next().await {
            Some(Ok(chunk)) => {
                for payload in decoder.feed(&chunk) {
                    let Some(event) = decode_event(&payload) else {
                        continue;
                    };
                    if !send(StreamUpdate::Event(event)) {
                        return "receiver dropped".to_string();
                    }
                }
            }
            Some(Err(e)) => return format!("stream error: {e}"),
            None => {
                if let Some(event) = decoder.finish().as_deref().and_then(decode_event) {
                    send(StreamUpdate::Event(event));
                }
                return "server closed the stream".to_string();
            }
        }
    }
}

/// Parse one `data` payload; malformed payloads are logged and skipped
pub fn decode_event(payload: &str) -> Option<WatchEvent> {
    match serde_json::from_str(payload) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!(error = %e, payload, "skipping malformed event");
            None
        }
    }
}
