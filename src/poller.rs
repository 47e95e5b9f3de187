use crate::{gateway::ExplorerApi, types::AppEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Poller state as reported to the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollState {
    /// Waiting for the next period
    Idle,
    /// Request outstanding
    Fetching,
}

#[derive(Clone, Debug)]
pub struct PollSettings {
    pub interval: Duration,
    /// Blocks requested per tick
    pub batch: u32,
    /// Blocks requested when the explorer page opens
    pub initial_limit: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(15_000),
            batch: 3,
            initial_limit: 10,
        }
    }
}

/// Explorer block feed: one initial page, then the newest `batch` blocks every
/// `interval`. The period is measured from when the previous request settled,
/// so ticks never overlap. Merging is done by the receiver of the events.
pub async fn run_poller(
    api: Arc<dyn ExplorerApi>,
    settings: PollSettings,
    epoch: u64,
    tx: UnboundedSender<AppEvent>,
) {
    log::info!(
        "🚀 Block polling started - every {}ms, batch {}",
        settings.interval.as_millis(),
        settings.batch
    );

    let initial = match api.get_blocks(Some(settings.initial_limit)).await {
        Ok(blocks) => blocks,
        Err(e) => {
            log::error!("❌ Initial block load failed: {e}");
            Vec::new()
        }
    };
    log::info!("🏁 Loaded {} blocks", initial.len());
    if tx.send(AppEvent::ExplorerLoaded { epoch, blocks: initial }).is_err() {
        return;
    }

    loop {
        sleep(settings.interval).await;

        let fetching = AppEvent::PollState {
            epoch,
            state: PollState::Fetching,
        };
        if tx.send(fetching).is_err() {
            return;
        }
        log::debug!("📡 Poll tick - requesting {} newest blocks", settings.batch);
        let outcome = api.get_blocks(Some(settings.batch)).await;

        let delivered = match outcome {
            Ok(blocks) => {
                log::debug!("✅ Poll returned {} blocks", blocks.len());
                tx.send(AppEvent::LatestBlocks { epoch, blocks }).is_ok()
            }
            Err(e) => {
                // Next period retries; nothing else to do here
                log::error!("❌ Error polling latest blocks: {e}");
                true
            }
        };
        let idle = AppEvent::PollState {
            epoch,
            state: PollState::Idle,
        };
        if !delivered || tx.send(idle).is_err() {
            return;
        }
    }
}

/// A running poller scoped to one explorer page activation. Dropping the
/// handle stops polling; a request in flight at that point is abandoned.
pub struct PollHandle {
    epoch: u64,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn spawn(
        api: Arc<dyn ExplorerApi>,
        settings: PollSettings,
        epoch: u64,
        tx: UnboundedSender<AppEvent>,
    ) -> Self {
        let task = tokio::spawn(run_poller(api, settings, epoch, tx));
        Self { epoch, task }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn stop(self) {
        log::info!("⏹ Block polling stopped (epoch {})", self.epoch);
        // Drop aborts
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
