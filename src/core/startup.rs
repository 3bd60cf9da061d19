use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::config::StorageConfig;
use crate::core::state::AppState;
use crate::stores::kv::{KvStore, LogKv, MemoryKv};

// this runs at boot time
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn KvStore>> {
    // an empty path in the config file also means memory only
    let Some(path) = config.path.as_ref().filter(|p| !p.as_os_str().is_empty()) else {
        warn!("No storage path configured, clock records will not survive a restart");
        return Ok(Arc::new(MemoryKv::new()));
    };

    let store = LogKv::open(path.clone())
        .context(format!("Failed to open key-value store at {}", path.display()))?;

    if config.compact_on_start {
        let live = store.compact().context("Failed to compact key-value log")?;
        info!(path = %path.display(), live_keys = live, "Key-value log compacted");
    }

    Ok(Arc::new(store))
}

pub fn log_startup_summary(state: &AppState) {
    let staff = state.staff.stats();
    let records = state.records.counts();
    let renewals = state.renewals.summary();

    info!(
        stored_keys = state.kv.len(),
        staff = staff.total,
        staff_active = staff.active,
        records = records.total,
        printable = state.print_queue.search(None).len(),
        cards = renewals.total,
        cards_expired = renewals.expired,
        form_variant = ?state.config.enrollment.form_variant,
        iris_scanner_online = state.config.enrollment.iris_scanner_online,
        "Console state loaded"
    );
}
