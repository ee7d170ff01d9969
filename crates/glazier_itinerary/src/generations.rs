use fxhash::FxHashMap;
use parking_lot::Mutex;

/// Marks one in-flight computation for a key (a date or a block label).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    key: String,
    generation: u64,
}

impl GenerationTicket {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Latest generation per key. Starting a new computation for a key makes every older
/// ticket for that key stale.
///
/// Keys are never evicted. There is one entry per date or block label ever requested,
/// which stays small for a schedule measured in days.
#[derive(Debug, Default)]
pub struct RequestGenerations {
    latest: Mutex<FxHashMap<String, u64>>,
}

impl RequestGenerations {
    pub fn begin(&self, key: impl Into<String>) -> GenerationTicket {
        let key = key.into();
        let mut latest = self.latest.lock();
        let generation = latest.entry(key.clone()).or_insert(0);
        *generation += 1;

        GenerationTicket {
            key,
            generation: *generation,
        }
    }

    pub fn is_current(&self, ticket: &GenerationTicket) -> bool {
        self.latest.lock().get(&ticket.key) == Some(&ticket.generation)
    }
}
