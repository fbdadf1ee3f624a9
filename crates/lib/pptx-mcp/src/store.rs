//! The in-memory session store.
//!
//! Decks live under caller-chosen filename handles until saved. The map
//! itself sits behind an `RwLock` so lookups don't serialize; each deck has
//! its own `Mutex` so mutations to one presentation never block work on
//! another.

use std::collections::HashMap;
use std::sync::Arc;

use pptx_core::Presentation;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// All open presentations, keyed by filename handle.
#[derive(Debug, Default)]
pub struct DeckStore {
    decks: RwLock<HashMap<String, Arc<Mutex<Presentation>>>>,
}

impl DeckStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a deck under `name`, replacing any existing deck with the
    /// same handle.
    pub async fn insert(&self, name: &str, deck: Presentation) {
        let mut decks = self.decks.write().await;
        if decks
            .insert(name.to_string(), Arc::new(Mutex::new(deck)))
            .is_some()
        {
            debug!(name, "replaced existing presentation");
        } else {
            debug!(name, "registered presentation");
        }
    }

    /// The deck registered under `name`, if any. Clones of the handle share
    /// the same lock, so concurrent callers mutate one deck in turn.
    pub async fn get(&self, name: &str) -> Option<Arc<Mutex<Presentation>>> {
        self.decks.read().await.get(name).cloned()
    }

    /// All decks, sorted by handle for stable listings.
    pub async fn entries(&self) -> Vec<(String, Arc<Mutex<Presentation>>)> {
        let decks = self.decks.read().await;
        let mut entries: Vec<_> = decks
            .iter()
            .map(|(name, deck)| (name.clone(), Arc::clone(deck)))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub async fn len(&self) -> usize {
        self.decks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.decks.read().await.is_empty()
    }

    /// Drops every deck. Unsaved work is gone; callers own that decision.
    pub async fn clear(&self) {
        let mut decks = self.decks.write().await;
        let dropped = decks.len();
        decks.clear();
        debug!(dropped, "cleared presentation store");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_replaces_decks_with_the_same_handle() {
        let store = DeckStore::new();
        let mut first = Presentation::new();
        first.add_slide(pptx_core::SlideLayout::Blank);
        store.insert("deck.pptx", first).await;
        store.insert("deck.pptx", Presentation::new()).await;

        assert_eq!(store.len().await, 1);
        let deck = store.get("deck.pptx").await.expect("deck registered");
        assert_eq!(deck.lock().await.slide_count(), 0);
    }

    #[tokio::test]
    async fn entries_are_sorted_by_handle() {
        let store = DeckStore::new();
        store.insert("b.pptx", Presentation::new()).await;
        store.insert("a.pptx", Presentation::new()).await;
        store.insert("c.pptx", Presentation::new()).await;

        let names: Vec<_> = store
            .entries()
            .await
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["a.pptx", "b.pptx", "c.pptx"]);
    }

    #[tokio::test]
    async fn clear_empties_the_store() {
        let store = DeckStore::new();
        store.insert("deck.pptx", Presentation::new()).await;
        assert!(!store.is_empty().await);
        store.clear().await;
        assert!(store.is_empty().await);
        assert!(store.get("deck.pptx").await.is_none());
    }
}
