use crate::commands::{stopped_at, CmdMessage, CmdResult, UserState};
use crate::error::Result;
use crate::store::StorageBackend;

/// Flip the favorite flag of each id.
pub fn toggle<S: StorageBackend + ?Sized>(
    backend: &S,
    state: &mut UserState,
    ids: &[u32],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for &id in ids {
        let starred = match state.favorites.toggle(backend, id) {
            Ok(starred) => starred,
            Err(e) => return stopped_at(result, id, e),
        };
        let message = if starred {
            format!("Character {} added to favorites", id)
        } else {
            format!("Character {} removed from favorites", id)
        };
        result.add_message(CmdMessage::success(message));

        if starred && state.deleted.contains(id) {
            result.add_message(CmdMessage::warning(format!(
                "Character {} is deleted and stays hidden until restored",
                id
            )));
        }
    }

    Ok(result)
}
