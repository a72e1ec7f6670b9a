//! # API Facade
//!
//! The single entry point for all mortydex operations, regardless of the UI
//! in front of it.
//!
//! `DexApi` owns the storage backend, the catalog and the loaded
//! [`UserState`], and dispatches each call to the matching command module.
//! It does no business logic and no I/O of its own.
//!
//! ## Generic Over Storage And Catalog
//!
//! - Production: `DexApi<FileBackend, Box<dyn Catalog>>`
//! - Testing: `DexApi<MemBackend, StaticCatalog>`
//!
//! ## Shared State
//!
//! There is exactly one favorites store and one deleted store per API
//! instance. Views that must follow changes made elsewhere subscribe through
//! [`DexApi::subscribe_favorites`] / [`DexApi::subscribe_deleted`] instead of
//! holding their own copies.

use crate::catalog::Catalog;
use crate::commands::{self, UserState};
use crate::error::Result;
use crate::filter::FilterEdit;
use crate::store::membership::Subscription;
use crate::store::StorageBackend;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub struct DexApi<S: StorageBackend, C: Catalog> {
    backend: S,
    catalog: C,
    state: UserState,
    data_dir: PathBuf,
}

impl<S: StorageBackend, C: Catalog> DexApi<S, C> {
    /// Build the API and load all stored user state from `backend`.
    pub fn new(backend: S, catalog: C, data_dir: PathBuf) -> Self {
        let state = UserState::load(&backend);
        Self {
            backend,
            catalog,
            state,
            data_dir,
        }
    }

    pub fn list(&self, query: &ListQuery) -> Result<CmdResult> {
        commands::list::run(&self.catalog, &self.state, query)
    }

    pub fn list_deleted(&self, order: SortOrder) -> Result<CmdResult> {
        commands::list::deleted(&self.catalog, &self.state, order)
    }

    pub fn view(&self, id: u32) -> Result<CmdResult> {
        commands::view::run(&self.catalog, &self.state, id)
    }

    pub fn toggle_favorites(&mut self, ids: &[u32]) -> Result<CmdResult> {
        commands::favorites::toggle(&self.backend, &mut self.state, ids)
    }

    pub fn toggle_deleted(&mut self, ids: &[u32]) -> Result<CmdResult> {
        commands::delete::toggle(&self.backend, &mut self.state, ids)
    }

    pub fn add_comment(&mut self, character_id: u32, text: &str) -> Result<CmdResult> {
        commands::comments::add(&self.backend, &mut self.state, character_id, text)
    }

    pub fn delete_comment(&mut self, character_id: u32, comment_id: &str) -> Result<CmdResult> {
        commands::comments::delete(&self.backend, &mut self.state, character_id, comment_id)
    }

    pub fn comments(&self, character_id: u32) -> Result<CmdResult> {
        commands::comments::list(&self.state, character_id)
    }

    pub fn filters(&self) -> Result<CmdResult> {
        commands::filters::show(&self.state)
    }

    pub fn edit_filters(&mut self, edit: &FilterEdit) -> Result<CmdResult> {
        commands::filters::edit(&self.backend, &mut self.state, edit)
    }

    pub fn apply_filters(&mut self) -> Result<CmdResult> {
        commands::filters::commit(&self.backend, &mut self.state)
    }

    pub fn clear_filters(&mut self) -> Result<CmdResult> {
        commands::filters::clear(&self.backend, &mut self.state)
    }

    pub fn search(&mut self, text: &str) -> Result<CmdResult> {
        commands::filters::search(&self.backend, &mut self.state, text)
    }

    pub fn reset(&mut self, target: ResetTarget) -> Result<CmdResult> {
        commands::reset::run(&self.backend, &mut self.state, target)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.data_dir, action)
    }

    pub fn subscribe_favorites(
        &mut self,
        listener: impl FnMut(&BTreeSet<u32>) + 'static,
    ) -> Subscription {
        self.state.favorites.subscribe(listener)
    }

    pub fn unsubscribe_favorites(&mut self, subscription: Subscription) -> bool {
        self.state.favorites.unsubscribe(subscription)
    }

    pub fn subscribe_deleted(
        &mut self,
        listener: impl FnMut(&BTreeSet<u32>) + 'static,
    ) -> Subscription {
        self.state.deleted.subscribe(listener)
    }

    pub fn unsubscribe_deleted(&mut self, subscription: Subscription) -> bool {
        self.state.deleted.unsubscribe(subscription)
    }

    pub fn state(&self) -> &UserState {
        &self.state
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::list::ListQuery;
pub use crate::commands::reset::ResetTarget;
pub use crate::commands::{CharacterRow, CharacterView, CmdMessage, CmdResult, MessageLevel};
pub use crate::config::ConfigKey;
pub use crate::sort::SortOrder;
