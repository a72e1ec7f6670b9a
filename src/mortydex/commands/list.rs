use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult, UserState};
use crate::error::Result;
use crate::filter;
use crate::sort::{sort, SortOrder};

/// Options for one rendering of the character list.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Overrides the stored search text for this listing only.
    pub search: Option<String>,
    pub order: SortOrder,
}

/// The primary list: catalog → applied filters → minus soft-deleted → sorted.
pub fn run<C: Catalog + ?Sized>(
    catalog: &C,
    state: &UserState,
    query: &ListQuery,
) -> Result<CmdResult> {
    let characters = catalog.list_characters()?;

    let mut selection = state.filters.applied.clone();
    if let Some(search) = &query.search {
        selection.search = search.clone();
    }

    let shown = filter::visible(&characters, &selection, &state.favorites, &state.deleted);
    let rows = sort(&shown, query.order)
        .into_iter()
        .map(|c| state.row(c))
        .collect();

    let mut result = CmdResult::default().with_listed(rows);
    if selection.has_active_filters() {
        result.add_message(CmdMessage::info(format!(
            "Filters: {}",
            selection.describe()
        )));
    }
    if state.filters.has_uncommitted_changes() {
        result.add_message(CmdMessage::warning(
            "Pending filter changes are not applied yet (run `mortydex filter apply`)",
        ));
    }
    Ok(result)
}

/// The deleted view: only soft-deleted characters, sorted.
pub fn deleted<C: Catalog + ?Sized>(
    catalog: &C,
    state: &UserState,
    order: SortOrder,
) -> Result<CmdResult> {
    let characters = catalog.list_characters()?;
    let shown = filter::deleted_view(&characters, &state.deleted);
    let rows = sort(&shown, order)
        .into_iter()
        .map(|c| state.row(c))
        .collect();
    Ok(CmdResult::default().with_listed(rows))
}
