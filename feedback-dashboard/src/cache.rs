use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// A single cached value that goes stale after a fixed time to live.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    entry: Option<(Instant, T)>,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// The cached value, if one was stored less than `ttl` ago.
    pub fn get(&self) -> Option<&T> {
        self.get_at(Instant::now())
    }

    fn get_at(&self, now: Instant) -> Option<&T> {
        match &self.entry {
            Some((stored_at, value)) if now.saturating_duration_since(*stored_at) < self.ttl => {
                Some(value)
            }
            _ => None,
        }
    }

    pub fn insert(&mut self, value: T) -> &T {
        let (_, value) = self.entry.insert((Instant::now(), value));
        value
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

impl<T> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
