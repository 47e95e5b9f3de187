//! Transient visual events ("these blocks just arrived").
//!
//! A signal is a value with an expiry instant. The renderer asks whether a key
//! is live at the current time; nothing has to remember to switch it off, and a
//! re-render after expiry simply stops highlighting.

use std::time::{Duration, Instant};

/// Default settle delay before an entrance highlight stops.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(600);

#[derive(Clone, Debug, PartialEq)]
pub struct PendingVisual<K> {
    keys: Vec<K>,
    expires_at: Instant,
}

impl<K: PartialEq> PendingVisual<K> {
    pub fn new(keys: Vec<K>, now: Instant, settle: Duration) -> Self {
        Self {
            keys,
            expires_at: now + settle,
        }
    }

    pub fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }

    pub fn covers(&self, key: &K, now: Instant) -> bool {
        self.is_live(now) && self.keys.contains(key)
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }
}

/// Drop an expired signal. Returns true when something was cleared.
pub fn clear_expired<K: PartialEq>(slot: &mut Option<PendingVisual<K>>, now: Instant) -> bool {
    if slot.as_ref().is_some_and(|v| !v.is_live(now)) {
        *slot = None;
        true
    } else {
        false
    }
}
