use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);
pub const REFRESH_THROTTLE: Duration = Duration::from_secs(2);

/// Every keystroke bumps the generation; a delayed apply only runs for the last one.
#[derive(Clone, Default)]
pub struct Debounce {
    generation: Arc<AtomicU64>,
}

impl Debounce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bump(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_latest(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Resolves to `true` when no newer input arrived during `delay`.
    pub async fn settle(&self, delay: Duration) -> bool {
        let generation = self.bump();
        tokio::time::sleep(delay).await;
        self.is_latest(generation)
    }
}

#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn try_acquire(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

pub fn clipboard_script(text: &str) -> String {
    let literal = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        "try {{ await navigator.clipboard.writeText({literal}); return true; }} catch (_) {{ return false; }}"
    )
}
