use crate::commands::{CmdMessage, CmdResult, UserState};
use crate::error::Result;
use crate::filter::FilterState;
use crate::store::comments::{CommentStore, COMMENTS_KEY};
use crate::store::StorageBackend;

use super::filters::FILTERS_KEY;

/// Which stored state to wipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetTarget {
    Favorites,
    Deleted,
    Comments,
    Filters,
    All,
}

pub fn run<S: StorageBackend + ?Sized>(
    backend: &S,
    state: &mut UserState,
    target: ResetTarget,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let all = target == ResetTarget::All;

    if all || target == ResetTarget::Favorites {
        let count = state.favorites.len();
        state.favorites.clear(backend)?;
        result.add_message(CmdMessage::success(format!("Cleared {} favorites", count)));
    }
    if all || target == ResetTarget::Deleted {
        let count = state.deleted.len();
        state.deleted.clear(backend)?;
        result.add_message(CmdMessage::success(format!(
            "Restored {} deleted characters",
            count
        )));
    }
    if all || target == ResetTarget::Comments {
        let count = state.comments.len();
        backend.remove(COMMENTS_KEY)?;
        state.comments = CommentStore::default();
        result.add_message(CmdMessage::success(format!("Removed {} comments", count)));
    }
    if all || target == ResetTarget::Filters {
        backend.remove(FILTERS_KEY)?;
        state.filters = FilterState::default();
        result.add_message(CmdMessage::success("Filters reset"));
    }

    Ok(result)
}
