use crate::catalog::Catalog;
use crate::commands::{CharacterView, CmdMessage, CmdResult, UserState};
use crate::error::{DexError, Result};

/// The detail page of one character, with its comments.
pub fn run<C: Catalog + ?Sized>(catalog: &C, state: &UserState, id: u32) -> Result<CmdResult> {
    let detail = catalog
        .character(id)?
        .ok_or(DexError::CharacterNotFound(id))?;

    let view = CharacterView {
        is_favorite: state.favorites.contains(id),
        is_deleted: state.deleted.contains(id),
        comments: state.comments.list(id),
        detail,
    };

    let mut result = CmdResult::default();
    if view.is_deleted {
        result.add_message(CmdMessage::info(
            "This character is deleted; it only appears in the deleted list",
        ));
    }
    Ok(result.with_view(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;
    use crate::store::memory::MemBackend;

    #[test]
    fn shows_detail_flags_and_comments() {
        let backend = MemBackend::new();
        let mut state = UserState::load(&backend);
        state.favorites.toggle(&backend, 4).unwrap();
        state.comments.add(&backend, 4, "Caw caw").unwrap();

        let result = run(&fixtures::catalog(), &state, 4).unwrap();
        let view = result.view.unwrap();
        assert_eq!(view.detail.character.name, "Birdperson");
        assert_eq!(view.detail.location, "Citadel of Ricks");
        assert!(view.is_favorite);
        assert!(!view.is_deleted);
        assert_eq!(view.comments.len(), 1);
    }

    #[test]
    fn deleted_characters_remain_viewable() {
        let backend = MemBackend::new();
        let mut state = UserState::load(&backend);
        state.deleted.toggle(&backend, 1).unwrap();

        let result = run(&fixtures::catalog(), &state, 1).unwrap();
        assert!(result.view.unwrap().is_deleted);
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let backend = MemBackend::new();
        let state = UserState::load(&backend);
        assert!(matches!(
            run(&fixtures::catalog(), &state, 999),
            Err(DexError::CharacterNotFound(999))
        ));
    }
}
