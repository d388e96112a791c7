use std::time::Duration;

use logwatch_types::LogInfo;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::api::LogApiClient;

/// Default metadata refresh period
pub const DEFAULT_INFO_INTERVAL: Duration = Duration::from_secs(30);

/// Outcome of one metadata fetch; errors are already formatted for display
pub type InfoResult = Result<LogInfo, String>;

/// Periodically fetches `/api/log/info`
///
/// The first fetch happens immediately. The task stops when the poller is
/// dropped or the receiver goes away.
pub struct InfoPoller {
    cancel: CancellationToken,
    task: tokio::task::JoinHandle<()>,
}

impl InfoPoller {
    pub fn spawn(
        client: LogApiClient,
        period: Duration,
        tx: mpsc::UnboundedSender<InfoResult>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let period = period.max(Duration::from_secs(1));

        let task = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = ticker.tick() => {
                            let result = client.fetch_info().await.map_err(|e| {
                                tracing::warn!(error = %e, "log info fetch failed");
                                e.to_string()
                            });
                            if tx.send(result).is_err() {
                                break;
                            }
                        }
                    }
                }
                tracing::debug!("info poller stopped");
            })
        };

        Self { cancel, task }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for InfoPoller {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.task.abort();
    }
}
