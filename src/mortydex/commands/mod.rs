//! # Command Layer
//!
//! One module per user-facing operation. Commands take plain Rust arguments
//! (a storage backend, a catalog, the loaded [`UserState`]) and return a
//! [`CmdResult`]; they never print.

use crate::config::DexConfig;
use crate::error::{DexError, Result};
use crate::filter::FilterState;
use crate::model::{Character, CharacterDetail, Comment};
use crate::store::comments::CommentStore;
use crate::store::membership::MembershipStore;
use crate::store::StorageBackend;

pub mod comments;
pub mod config;
pub mod delete;
pub mod favorites;
pub mod filters;
pub mod list;
pub mod reset;
pub mod view;

/// Everything the user has stored, loaded once per session.
#[derive(Debug)]
pub struct UserState {
    pub favorites: MembershipStore,
    pub deleted: MembershipStore,
    pub comments: CommentStore,
    pub filters: FilterState,
}

impl UserState {
    pub fn load<S: StorageBackend + ?Sized>(backend: &S) -> Self {
        Self {
            favorites: MembershipStore::favorites(backend),
            deleted: MembershipStore::deleted(backend),
            comments: CommentStore::load(backend),
            filters: filters::load(backend),
        }
    }

    pub fn row(&self, character: Character) -> CharacterRow {
        CharacterRow {
            is_favorite: self.favorites.contains(character.id),
            is_deleted: self.deleted.contains(character.id),
            character,
        }
    }
}

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// End a multi-id command that failed on `id`. With nothing done yet the
/// error is returned as is; otherwise the ids already toggled keep their
/// messages and the failure is appended as an error message.
pub(crate) fn stopped_at(mut result: CmdResult, id: u32, error: DexError) -> Result<CmdResult> {
    if result.messages.is_empty() {
        return Err(error);
    }
    result.add_message(CmdMessage::error(format!(
        "Stopped at character {}: {}",
        id, error
    )));
    Ok(result)
}

/// A character as a list shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRow {
    pub character: Character,
    pub is_favorite: bool,
    pub is_deleted: bool,
}

/// The detail page of one character.
#[derive(Debug, Clone)]
pub struct CharacterView {
    pub detail: CharacterDetail,
    pub is_favorite: bool,
    pub is_deleted: bool,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed: Vec<CharacterRow>,
    pub view: Option<CharacterView>,
    pub comments: Vec<Comment>,
    pub filters: Option<FilterState>,
    pub config: Option<DexConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    /// True when the command stopped partway and said so in its messages.
    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Error))
    }

    pub fn with_listed(mut self, rows: Vec<CharacterRow>) -> Self {
        self.listed = rows;
        self
    }

    pub fn with_view(mut self, view: CharacterView) -> Self {
        self.view = Some(view);
        self
    }

    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn with_config(mut self, config: DexConfig) -> Self {
        self.config = Some(config);
        self
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::catalog::StaticCatalog;
    use crate::model::{Character, CharacterDetail, Episode, Gender, Status};

    pub fn cast() -> Vec<Character> {
        vec![
            Character::new(1, "Rick Sanchez", "Human", Status::Alive, Gender::Male),
            Character::new(2, "Morty Smith", "Human", Status::Alive, Gender::Male),
            Character::new(3, "Summer Smith", "Human", Status::Alive, Gender::Female),
            Character::new(4, "Birdperson", "Alien", Status::Dead, Gender::Male),
            Character::new(5, "Abradolf Lincler", "Human", Status::Unknown, Gender::Male),
        ]
    }

    pub fn catalog() -> StaticCatalog {
        let details = cast()
            .into_iter()
            .map(|character| CharacterDetail {
                origin: "Earth (C-137)".to_string(),
                location: "Citadel of Ricks".to_string(),
                episodes: vec![Episode {
                    id: 1,
                    name: "Pilot".to_string(),
                    code: "S01E01".to_string(),
                }],
                character,
            })
            .collect();
        StaticCatalog::with_details(details)
    }
}
