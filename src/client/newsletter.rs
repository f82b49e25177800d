use std::sync::Arc;

use crate::util::flag_store::{keys, FlagStore};

/// Decides whether the newsletter signup prompt should appear for this
/// visitor, backed by the persistent flag store. Both flags are
/// idempotent and last-write-wins, so repeat visits and rapid re-submits
/// settle to the same state.
pub struct NewsletterGate {
    store: Arc<dyn FlagStore>,
}

impl NewsletterGate {
    pub fn new(store: Arc<dyn FlagStore>) -> Self {
        NewsletterGate { store }
    }

    /// Show the prompt only to visitors who have not seen it yet.
    pub fn should_prompt(&self) -> bool {
        !self.store.get_bool(keys::NEWSLETTER_PROMPT_SEEN)
    }

    pub fn mark_prompt_seen(&self) {
        self.store.set_bool(keys::NEWSLETTER_PROMPT_SEEN, true);
    }

    pub fn has_subscribed(&self, email: &str) -> bool {
        self.store.get_bool(&keys::newsletter_subscribed(email))
    }

    /// Record a completed signup so the visitor is not prompted again.
    pub fn mark_subscribed(&self, email: &str) {
        self.store.set_bool(&keys::newsletter_subscribed(email), true);
        self.mark_prompt_seen();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::flag_store::MemoryFlagStore;

    #[test]
    fn test_prompt_shown_once() {
        let gate = NewsletterGate::new(Arc::new(MemoryFlagStore::new()));
        assert!(gate.should_prompt());
        gate.mark_prompt_seen();
        assert!(!gate.should_prompt());
    }

    #[test]
    fn test_subscription_suppresses_prompt() {
        let gate = NewsletterGate::new(Arc::new(MemoryFlagStore::new()));
        gate.mark_subscribed("Ana@Example.com");
        assert!(gate.has_subscribed("ana@example.com"));
        assert!(!gate.should_prompt());
    }

    #[test]
    fn test_marking_twice_is_idempotent() {
        let gate = NewsletterGate::new(Arc::new(MemoryFlagStore::new()));
        gate.mark_subscribed("ana@example.com");
        gate.mark_subscribed("ana@example.com");
        assert!(gate.has_subscribed("ana@example.com"));
    }
}
