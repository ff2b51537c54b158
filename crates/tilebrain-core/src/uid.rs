//! Process-unique id minting for page ids and variable ids.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Mint a stable, UUID-like id with the given prefix.
///
/// Ids are unique within a process and collision-resistant across processes
/// via the wall-clock component.
pub fn mint(prefix: &str) -> String {
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    format!("{prefix}-{millis:x}-{count:04x}")
}
