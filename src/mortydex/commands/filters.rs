use crate::commands::{CmdMessage, CmdResult, UserState};
use crate::error::Result;
use crate::filter::{FilterEdit, FilterState};
use crate::store::{load_or_default, save, StorageBackend};

pub const FILTERS_KEY: &str = "rickAndMorty_filters";

pub fn load<S: StorageBackend + ?Sized>(backend: &S) -> FilterState {
    load_or_default(backend, FILTERS_KEY)
}

fn persist<S: StorageBackend + ?Sized>(backend: &S, state: &UserState) -> Result<()> {
    save(backend, FILTERS_KEY, &state.filters)
}

pub fn show(state: &UserState) -> Result<CmdResult> {
    Ok(CmdResult::default().with_filters(state.filters.clone()))
}

/// Change the pending selection. The list keeps using the applied one until
/// [`commit`].
pub fn edit<S: StorageBackend + ?Sized>(
    backend: &S,
    state: &mut UserState,
    edit: &FilterEdit,
) -> Result<CmdResult> {
    state.filters.edit(edit);
    persist(backend, state)?;

    let mut result = CmdResult::default().with_filters(state.filters.clone());
    if state.filters.has_uncommitted_changes() {
        result.add_message(CmdMessage::info(
            "Filters updated; run `mortydex filter apply` to use them",
        ));
    }
    Ok(result)
}

pub fn commit<S: StorageBackend + ?Sized>(backend: &S, state: &mut UserState) -> Result<CmdResult> {
    state.filters.commit();
    persist(backend, state)?;

    let mut result = CmdResult::default().with_filters(state.filters.clone());
    result.add_message(CmdMessage::success(format!(
        "Filters applied: {}",
        state.filters.applied.describe()
    )));
    Ok(result)
}

pub fn clear<S: StorageBackend + ?Sized>(backend: &S, state: &mut UserState) -> Result<CmdResult> {
    state.filters.clear();
    persist(backend, state)?;

    let mut result = CmdResult::default().with_filters(state.filters.clone());
    result.add_message(CmdMessage::success("Filters cleared"));
    Ok(result)
}

/// Set the search text. Takes effect immediately.
pub fn search<S: StorageBackend + ?Sized>(
    backend: &S,
    state: &mut UserState,
    text: &str,
) -> Result<CmdResult> {
    state.filters.set_search(text.trim());
    persist(backend, state)?;

    let mut result = CmdResult::default().with_filters(state.filters.clone());
    let message = if state.filters.applied.search.is_empty() {
        "Search cleared".to_string()
    } else {
        format!("Searching for \"{}\"", state.filters.applied.search)
    };
    result.add_message(CmdMessage::success(message));
    Ok(result)
}
