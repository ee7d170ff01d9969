use std::sync::Arc;

use fxhash::FxHashMap;
use jiff::{SignedDuration, Timestamp};
use parking_lot::Mutex;

use crate::{cache_key::ItineraryCacheKey, clock::Clock, itinerary::Itinerary};

pub const DEFAULT_CACHE_TTL: SignedDuration = SignedDuration::from_secs(10 * 60);

struct CacheEntry {
    itinerary: Arc<Itinerary>,
    expires_at: Timestamp,
}

/// Process wide itinerary cache. Expired entries are never evicted, a lookup treats them
/// as a miss and the next insert overwrites them.
pub struct ItineraryCache<C> {
    entries: Mutex<FxHashMap<ItineraryCacheKey, CacheEntry>>,
    ttl: SignedDuration,
    clock: C,
}

impl<C: Clock> ItineraryCache<C> {
    pub fn new(clock: C, ttl: SignedDuration) -> Self {
        Self {
            entries: Mutex::new(FxHashMap::default()),
            ttl,
            clock,
        }
    }

    pub fn get(&self, key: &ItineraryCacheKey) -> Option<Arc<Itinerary>> {
        let now = self.clock.now();
        self.entries
            .lock()
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| Arc::clone(&entry.itinerary))
    }

    /// Stores the itinerary until `now + ttl`, replacing whatever was there. Returns the expiry.
    pub fn insert(&self, key: ItineraryCacheKey, itinerary: Arc<Itinerary>) -> Timestamp {
        let expires_at = self.clock.now() + self.ttl;
        self.entries.lock().insert(
            key,
            CacheEntry {
                itinerary,
                expires_at,
            },
        );
        expires_at
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
