//! Ordered middleware chain of a single node.

use std::collections::BTreeMap;

/// Mapping from ordinal to the child key of the middleware leaf holding it.
///
/// Ordinals may be sparse; [`MiddlewareChain::keys`] yields them compacted
/// in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MiddlewareChain {
    slots: BTreeMap<usize, String>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot taken by middleware without an explicit ordinal: one past the
    /// highest ordinal in use, 0 when empty.
    pub fn next_slot(&self) -> usize {
        self.slots
            .last_key_value()
            .map(|(ordinal, _)| ordinal + 1)
            .unwrap_or(0)
    }

    /// Key currently holding `ordinal`.
    pub fn holder(&self, ordinal: usize) -> Option<&str> {
        self.slots.get(&ordinal).map(String::as_str)
    }

    /// Place `key` at `ordinal`, displacing any holder.
    pub(crate) fn insert(&mut self, ordinal: usize, key: &str) {
        self.slots.insert(ordinal, key.to_string());
    }

    /// Drop whatever slot `key` holds.
    pub fn release(&mut self, key: &str) {
        self.slots.retain(|_, held| held != key);
    }

    /// Child keys in execution order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_slot_follows_highest() {
        let mut chain = MiddlewareChain::new();
        assert_eq!(chain.next_slot(), 0);

        chain.insert(0, "0-cors");
        chain.insert(1, "1-logger");
        assert_eq!(chain.next_slot(), 2);

        chain.insert(5, "5-audit");
        assert_eq!(chain.next_slot(), 6);
    }

    #[test]
    fn test_holder() {
        let mut chain = MiddlewareChain::new();
        chain.insert(1, "1-auth");
        assert_eq!(chain.holder(1), Some("1-auth"));
        assert_eq!(chain.holder(0), None);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_keys_compacted_in_order() {
        let mut chain = MiddlewareChain::new();
        chain.insert(7, "7-last");
        chain.insert(0, "0-first");
        chain.insert(3, "3-middle");

        let keys: Vec<&str> = chain.keys().collect();
        assert_eq!(keys, vec!["0-first", "3-middle", "7-last"]);
    }

    #[test]
    fn test_release() {
        let mut chain = MiddlewareChain::new();
        chain.insert(0, "auth");
        chain.release("auth");
        assert!(chain.is_empty());
        assert_eq!(chain.holder(0), None);
    }
}
