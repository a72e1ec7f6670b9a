//! Boolean membership over character ids, persisted under a fixed key.
//!
//! The same type backs both favorites and soft deletes. A store is owned by
//! whoever composes the application (the API facade); views that need to
//! follow changes register a listener with [`MembershipStore::subscribe`]
//! and receive the full set after every write.

use super::{load_or_default, save, StorageBackend};
use crate::error::Result;
use crate::model::HasId;
use std::collections::BTreeSet;
use std::fmt;

pub const FAVORITES_KEY: &str = "rickAndMorty_favorites";
pub const DELETED_KEY: &str = "rickAndMorty_deletedCharacters";

type Listener = Box<dyn FnMut(&BTreeSet<u32>)>;

/// Handle returned by [`MembershipStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

pub struct MembershipStore {
    key: &'static str,
    members: BTreeSet<u32>,
    listeners: Vec<(Subscription, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for MembershipStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MembershipStore")
            .field("key", &self.key)
            .field("members", &self.members)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl MembershipStore {
    /// Load the set stored under `key`. Missing or malformed data yields an
    /// empty set.
    pub fn load<S: StorageBackend + ?Sized>(backend: &S, key: &'static str) -> Self {
        let ids: Vec<u32> = load_or_default(backend, key);
        Self {
            key,
            members: ids.into_iter().collect(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn favorites<S: StorageBackend + ?Sized>(backend: &S) -> Self {
        Self::load(backend, FAVORITES_KEY)
    }

    pub fn deleted<S: StorageBackend + ?Sized>(backend: &S) -> Self {
        Self::load(backend, DELETED_KEY)
    }

    /// Flip membership of `id` and return the new state.
    ///
    /// The new set is persisted before it replaces the in-memory one, so a
    /// failed write leaves the store unchanged.
    pub fn toggle<S: StorageBackend + ?Sized>(&mut self, backend: &S, id: u32) -> Result<bool> {
        let mut next = self.members.clone();
        let now_member = if next.remove(&id) {
            false
        } else {
            next.insert(id);
            true
        };
        self.replace(backend, next)?;
        tracing::debug!(key = self.key, id, member = now_member, "toggled membership");
        Ok(now_member)
    }

    /// Remove every member.
    pub fn clear<S: StorageBackend + ?Sized>(&mut self, backend: &S) -> Result<()> {
        self.replace(backend, BTreeSet::new())
    }

    pub fn contains(&self, id: u32) -> bool {
        self.members.contains(&id)
    }

    pub fn members(&self) -> &BTreeSet<u32> {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Items whose id is in the set, in input order.
    pub fn filter_members<T: HasId + Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .filter(|item| self.contains(item.id()))
            .cloned()
            .collect()
    }

    /// Items whose id is not in the set, in input order.
    pub fn filter_non_members<T: HasId + Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .filter(|item| !self.contains(item.id()))
            .cloned()
            .collect()
    }

    /// Register a listener called with the full set after every write.
    pub fn subscribe(&mut self, listener: impl FnMut(&BTreeSet<u32>) + 'static) -> Subscription {
        let subscription = Subscription(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((subscription, Box::new(listener)));
        subscription
    }

    /// Drop a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(s, _)| *s != subscription);
        self.listeners.len() != before
    }

    fn replace<S: StorageBackend + ?Sized>(
        &mut self,
        backend: &S,
        next: BTreeSet<u32>,
    ) -> Result<()> {
        let ids: Vec<u32> = next.iter().copied().collect();
        save(backend, self.key, &ids)?;
        self.members = next;
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.members);
        }
        Ok(())
    }
}
