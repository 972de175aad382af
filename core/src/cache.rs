//! # Destination Dedup Cache
//!
//! Bounded, time-expiring suppression of recently seen destination
//! addresses. Lookups are advisory: an evicted or expired address is simply
//! re-emitted downstream, where the repository's key uniqueness is the
//! authoritative dedup layer.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::trace;

pub const DEFAULT_CAPACITY: usize = 10_000;
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Time source for entry expiry.
///
/// Production uses [`SystemClock`]; tests drive a manual clock so expiry is
/// deterministic.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock backed [`Clock`].
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry {
    host: String,
    written_at: Instant,
}

struct CacheState {
    entries: HashMap<String, CacheEntry>,
    write_order: VecDeque<String>,
}

/// Address → resolved-host map with expire-after-write semantics and a hard
/// entry bound.
///
/// The state sits behind a mutex so the cache stays usable from concurrent
/// callers, though the extraction pipeline drives it from a single thread.
pub struct DedupCache {
    state: Mutex<CacheState>,
    capacity: usize,
    window: Duration,
    clock: Arc<dyn Clock>,
}

impl DedupCache {
    pub fn new(capacity: usize, window: Duration) -> Self {
        Self::with_clock(capacity, window, Arc::new(SystemClock))
    }

    pub fn with_clock(capacity: usize, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                write_order: VecDeque::new(),
            }),
            capacity,
            window,
            clock,
        }
    }

    /// True when `address` was written within the expiry window.
    ///
    /// An expired entry is dropped on probe, so the next sighting of that
    /// address registers as new.
    pub fn contains(&self, address: &str) -> bool {
        let now = self.clock.now();
        let mut state = self.state.lock().unwrap();

        let expired = match state.entries.get(address) {
            Some(entry) => now.saturating_duration_since(entry.written_at) >= self.window,
            None => return false,
        };
        if expired {
            state.entries.remove(address);
            return false;
        }
        true
    }

    /// Resolved host recorded for `address`, if still within the window.
    pub fn get(&self, address: &str) -> Option<String> {
        let now = self.clock.now();
        let state = self.state.lock().unwrap();
        state
            .entries
            .get(address)
            .filter(|entry| now.saturating_duration_since(entry.written_at) < self.window)
            .map(|entry| entry.host.clone())
    }

    /// Records `address → host`, restarting its expiry window and evicting
    /// the oldest writes once the capacity bound is crossed.
    pub fn insert(&self, address: String, host: String) {
        let written_at = self.clock.now();
        let mut state = self.state.lock().unwrap();

        let entry = CacheEntry { host, written_at };
        if state.entries.insert(address.clone(), entry).is_none() {
            state.write_order.push_back(address);
        }

        while state.entries.len() > self.capacity {
            let Some(oldest) = state.write_order.pop_front() else {
                break;
            };
            if state.entries.remove(&oldest).is_some() {
                trace!("evicted {oldest} from dedup cache");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
