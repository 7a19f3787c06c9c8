//! Telegram update deduplication cache

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

/// Default dedup TTL (5 minutes)
const DEDUP_TTL_SECS: u64 = 300;

/// Maximum dedup cache entries
const DEDUP_MAX_ENTRIES: usize = 2000;

/// Telegram update deduplication cache
///
/// Telegram redelivers webhook updates it considers unacknowledged. Remembers
/// recent `update_id`s with a TTL and a hard cap, evicting oldest first.
#[derive(Debug)]
pub struct UpdateDedup {
    seen: HashMap<i64, Instant>,
    order: VecDeque<i64>,
    ttl: Duration,
    max_entries: usize,
}

impl Default for UpdateDedup {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEDUP_TTL_SECS), DEDUP_MAX_ENTRIES)
    }
}

impl UpdateDedup {
    /// Create a cache with a custom TTL and capacity
    #[must_use]
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            seen: HashMap::new(),
            order: VecDeque::new(),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Check whether `update_id` has been seen recently
    ///
    /// Returns `true` for a duplicate. Returns `false` on first sight and
    /// records the id.
    pub fn is_duplicate(&mut self, update_id: i64) -> bool {
        let now = Instant::now();

        while let Some(oldest) = self.order.front().copied() {
            let expired = self
                .seen
                .get(&oldest)
                .is_none_or(|ts| now.duration_since(*ts) >= self.ttl);
            if !expired && self.order.len() < self.max_entries {
                break;
            }
            self.order.pop_front();
            self.seen.remove(&oldest);
        }

        if self.seen.contains_key(&update_id) {
            return true;
        }

        self.seen.insert(update_id, now);
        self.order.push_back(update_id);
        false
    }

    /// Number of remembered updates
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_delivery_is_duplicate() {
        let mut dedup = UpdateDedup::default();
        assert!(!dedup.is_duplicate(100));
        assert!(dedup.is_duplicate(100));
        assert!(!dedup.is_duplicate(101));
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut dedup = UpdateDedup::new(Duration::from_secs(60), 2);
        dedup.is_duplicate(1);
        dedup.is_duplicate(2);
        dedup.is_duplicate(3);

        assert_eq!(dedup.len(), 2);
        assert!(!dedup.is_duplicate(1));
    }

    #[test]
    fn expired_ids_are_forgotten() {
        let mut dedup = UpdateDedup::new(Duration::ZERO, 10);
        dedup.is_duplicate(1);
        assert!(!dedup.is_duplicate(1));
    }
}
