//! In-memory display surface
//!
//! Records every bubble and every indicator toggle. Useful for embedding
//! the session behind another UI and for asserting on rendering in tests.

use super::{Bubble, DisplaySurface};
use std::sync::{Mutex, MutexGuard};

/// Display surface that keeps rendered state in memory
#[derive(Debug, Default)]
pub struct MemoryDisplay {
    bubbles: Mutex<Vec<Bubble>>,
    loading_events: Mutex<Vec<bool>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MemoryDisplay {
    /// Creates an empty surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Bubbles in the order they were appended
    pub fn bubbles(&self) -> Vec<Bubble> {
        lock(&self.bubbles).clone()
    }

    /// Every `set_loading` call, in order
    pub fn loading_events(&self) -> Vec<bool> {
        lock(&self.loading_events).clone()
    }

    /// Current indicator visibility
    pub fn is_loading(&self) -> bool {
        lock(&self.loading_events).last().copied().unwrap_or(false)
    }
}

impl DisplaySurface for MemoryDisplay {
    fn append(&self, bubble: Bubble) {
        lock(&self.bubbles).push(bubble);
    }

    fn set_loading(&self, visible: bool) {
        lock(&self.loading_events).push(visible);
    }
}
