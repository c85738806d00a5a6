//! Best-score persistence
//!
//! A single scalar read once when the game starts and written when a run
//! ends above it. LocalStorage on the web, in-memory elsewhere.

/// Where the best score lives between sessions
pub trait HighScoreStore {
    /// Stored best score, 0 when absent or unreadable
    fn load(&self) -> u64;
    /// Replace the stored best score
    fn save(&mut self, score: u64);
}

/// Parse a stored value; anything unreadable counts as no score
pub fn parse_stored(raw: &str) -> u64 {
    match raw.trim().parse::<u64>() {
        Ok(score) => score,
        Err(e) => {
            log::warn!("Ignoring stored high score {:?}: {}", raw, e);
            0
        }
    }
}

/// Process-lifetime store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    score: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a best score
    pub fn with_score(score: u64) -> Self {
        Self { score: Some(score) }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.score.unwrap_or(0)
    }

    fn save(&mut self, score: u64) {
        self.score = Some(score);
    }
}

/// Browser LocalStorage under the `highscore` key
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "highscore";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> u64 {
        let stored = Self::storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());
        match stored {
            Some(raw) => {
                let score = parse_stored(&raw);
                log::info!("Loaded high score {}", score);
                score
            }
            None => {
                log::info!("No high score found, starting fresh");
                0
            }
        }
    }

    fn save(&mut self, score: u64) {
        match Self::storage() {
            Some(storage) => {
                if storage
                    .set_item(Self::STORAGE_KEY, &score.to_string())
                    .is_err()
                {
                    log::warn!("Failed to write high score");
                } else {
                    log::info!("High score saved ({})", score);
                }
            }
            None => log::warn!("LocalStorage unavailable, high score not saved"),
        }
    }
}
