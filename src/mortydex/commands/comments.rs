use crate::commands::{CmdMessage, CmdResult, UserState};
use crate::error::{DexError, Result};
use crate::store::StorageBackend;

pub fn add<S: StorageBackend + ?Sized>(
    backend: &S,
    state: &mut UserState,
    character_id: u32,
    text: &str,
) -> Result<CmdResult> {
    let comment = state.comments.add(backend, character_id, text)?;
    let mut result = CmdResult::default().with_comments(vec![comment.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Comment {} added to character {}",
        short_id(&comment.id),
        character_id
    )));
    Ok(result)
}

/// Delete a comment by its id, or by any unambiguous prefix of it among
/// the character's comments.
pub fn delete<S: StorageBackend + ?Sized>(
    backend: &S,
    state: &mut UserState,
    character_id: u32,
    comment_id: &str,
) -> Result<CmdResult> {
    let comment_id = comment_id.trim();
    if comment_id.is_empty() {
        return Err(DexError::Validation("Comment id cannot be empty".to_string()));
    }

    let candidates: Vec<String> = state
        .comments
        .list(character_id)
        .into_iter()
        .map(|c| c.id)
        .filter(|id| id.starts_with(comment_id))
        .collect();

    let mut result = CmdResult::default();
    match candidates.as_slice() {
        [id] => {
            state.comments.delete(backend, character_id, id)?;
            result.add_message(CmdMessage::success(format!(
                "Comment {} deleted",
                short_id(id)
            )));
        }
        [] => result.add_message(CmdMessage::warning(format!(
            "No comment {} on character {}",
            comment_id, character_id
        ))),
        _ => result.add_message(CmdMessage::warning(format!(
            "Comment id {} is ambiguous ({} matches)",
            comment_id,
            candidates.len()
        ))),
    }
    Ok(result)
}

pub fn list(state: &UserState, character_id: u32) -> Result<CmdResult> {
    let comments = state.comments.list(character_id);
    let mut result = CmdResult::default();
    if comments.is_empty() {
        result.add_message(CmdMessage::info("No comments yet"));
    }
    Ok(result.with_comments(comments))
}

/// The first block of a UUID, enough to tell a character's comments apart.
pub fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemBackend;

    #[test]
    fn add_returns_the_stored_comment() {
        let backend = MemBackend::new();
        let mut state = UserState::load(&backend);
        let result = add(&backend, &mut state, 7, "  Show me what you got  ").unwrap();
        assert_eq!(result.comments[0].text, "Show me what you got");
        assert_eq!(list(&state, 7).unwrap().comments.len(), 1);
    }

    #[test]
    fn invalid_text_is_a_validation_error() {
        let backend = MemBackend::new();
        let mut state = UserState::load(&backend);
        assert!(matches!(
            add(&backend, &mut state, 7, "   "),
            Err(DexError::Validation(_))
        ));
        assert!(list(&state, 7).unwrap().comments.is_empty());
    }

    #[test]
    fn delete_by_prefix() {
        let backend = MemBackend::new();
        let mut state = UserState::load(&backend);
        let added = add(&backend, &mut state, 7, "Get schwifty").unwrap();
        let id = added.comments[0].id.clone();

        let result = delete(&backend, &mut state, 7, short_id(&id)).unwrap();
        assert!(result.messages[0].content.contains("deleted"));
        assert!(state.comments.list(7).is_empty());
    }

    #[test]
    fn delete_unknown_comment_warns() {
        let backend = MemBackend::new();
        let mut state = UserState::load(&backend);
        let added = add(&backend, &mut state, 7, "Get schwifty").unwrap();

        // Right id, wrong character.
        let result = delete(&backend, &mut state, 8, &added.comments[0].id).unwrap();
        assert!(matches!(
            result.messages[0].level,
            crate::commands::MessageLevel::Warning
        ));
        assert_eq!(state.comments.list(7).len(), 1);
    }

    #[test]
    fn empty_list_has_info_message() {
        let backend = MemBackend::new();
        let state = UserState::load(&backend);
        let result = list(&state, 1).unwrap();
        assert_eq!(result.messages[0].content, "No comments yet");
    }
}
