//! Debounce loop: fire once a burst of changes has gone quiet.

use std::future::Future;

use async_trait::async_trait;
use tokio::time::{Instant, MissedTickBehavior, interval};
use tracing::debug;

use crate::config::DebounceSettings;

use super::state::WatcherState;

/// Action run when pending changes have been quiet for the debounce period.
#[async_trait]
pub trait Trigger: Send + Sync {
    async fn fire(&self);
}

/// Poll `state` every `poll_interval` and fire `trigger` after a quiet period.
///
/// Each tick first rescans directories queued by the watcher callback.
///
/// The trigger is awaited inline before `pending` is cleared, so runs never
/// overlap. `shutdown` is only raced against the tick: a run that has
/// started always completes before the loop returns.
pub async fn run_debounce_loop<T, S>(
    state: &WatcherState,
    trigger: &T,
    settings: DebounceSettings,
    shutdown: S,
) where
    T: Trigger + ?Sized,
    S: Future<Output = ()>,
{
    let mut ticker = interval(settings.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                debug!("Debounce loop shutting down");
                return;
            }
            _ = ticker.tick() => {}
        }

        state.recheck_new_dirs();
        if state.is_quiet(Instant::now(), settings.quiet_period) {
            debug!("Changes quiet for {:?}, firing", settings.quiet_period);
            trigger.fire().await;
            state.clear();
        }
    }
}
