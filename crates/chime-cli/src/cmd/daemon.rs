//! The `daemon` command: wake on each minute boundary and dispatch.

use std::path::Path;

use anyhow::{Context, Result};
use chime_core::dispatch;
use chime_core::notify::{DesktopSink, NotificationSink};
use chime_core::store::ScheduleStore;
use chime_core::tick::{self, Tick};
use chrono::Utc;
use tracing::{error, info};

pub fn run(db: &Path) -> Result<()> {
    let store = ScheduleStore::open(db)
        .with_context(|| format!("open schedule database {}", db.display()))?;
    info!(db = %db.display(), "notification daemon started");

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let sink = DesktopSink;
        tokio::select! {
            res = dispatch_forever(&store, &sink) => res,
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt received, shutting down");
                Ok(())
            }
        }
    })
}

/// Dispatch a cycle, then sleep until the next minute boundary, forever.
///
/// The sleep is recomputed from the wall clock on every pass so the loop
/// stays aligned with minute boundaries instead of drifting.
async fn dispatch_forever(store: &ScheduleStore, sink: &dyn NotificationSink) -> Result<()> {
    loop {
        if let Err(e) = dispatch::run_cycle(store, sink, Tick::now()) {
            error!(error = %e, "dispatch cycle aborted, retrying next minute");
        }
        tokio::time::sleep(tick::until_next_minute(Utc::now())).await;
    }
}
