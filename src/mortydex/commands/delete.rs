use crate::commands::{stopped_at, CmdMessage, CmdResult, UserState};
use crate::error::Result;
use crate::store::StorageBackend;

/// Flip the soft-delete flag of each id: deleting hides a character from
/// the list, running it again restores it.
pub fn toggle<S: StorageBackend + ?Sized>(
    backend: &S,
    state: &mut UserState,
    ids: &[u32],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for &id in ids {
        let deleted = match state.deleted.toggle(backend, id) {
            Ok(deleted) => deleted,
            Err(e) => return stopped_at(result, id, e),
        };
        let message = if deleted {
            format!("Character {} deleted", id)
        } else {
            format!("Character {} restored", id)
        };
        result.add_message(CmdMessage::success(message));
    }

    Ok(result)
}
