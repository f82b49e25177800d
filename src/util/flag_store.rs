use std::collections::HashMap;
use std::sync::Mutex;

/// Keys used in the visitor flag store.
pub mod keys {
    /// Set once the newsletter signup prompt has been shown.
    pub const NEWSLETTER_PROMPT_SEEN: &str = "newsletter_prompt_seen";

    /// Per-email flag recording a completed newsletter signup.
    pub fn newsletter_subscribed(email: &str) -> String {
        format!("newsletter_subscribed:{}", email.trim().to_lowercase())
    }
}

/// Small persistent flag store shared across the client components
/// (the browser-local storage analog). Reads and writes are idempotent
/// and last-write-wins.
pub trait FlagStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);

    fn get_bool(&self, key: &str) -> bool {
        matches!(self.get(key).as_deref(), Some("true"))
    }

    fn set_bool(&self, key: &str, value: bool) {
        self.set(key, if value { "true" } else { "false" });
    }
}

/// In-memory implementation backing tests and the server-rendered demo
/// pages.
#[derive(Default)]
pub struct MemoryFlagStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for MemoryFlagStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("flag store poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("flag store poisoned")
            .insert(key.to_string(), value.to_string());
    }
}
