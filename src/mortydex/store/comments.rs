//! Free-text comments attached to characters.
//!
//! All comments share one flat collection under [`COMMENTS_KEY`]; a
//! character's comments are selected at read time.

use super::{load_or_default, save, StorageBackend};
use crate::error::{DexError, Result};
use crate::model::Comment;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const COMMENTS_KEY: &str = "rickAndMorty_comments";
pub const MAX_COMMENT_LENGTH: usize = 500;

#[derive(Debug, Default)]
pub struct CommentStore {
    comments: Vec<Comment>,
}

impl CommentStore {
    pub fn load<S: StorageBackend + ?Sized>(backend: &S) -> Self {
        Self {
            comments: load_or_default(backend, COMMENTS_KEY),
        }
    }

    /// Add a comment for `character_id`, timestamped now.
    pub fn add<S: StorageBackend + ?Sized>(
        &mut self,
        backend: &S,
        character_id: u32,
        text: &str,
    ) -> Result<Comment> {
        self.add_at(backend, character_id, text, Utc::now())
    }

    pub fn add_at<S: StorageBackend + ?Sized>(
        &mut self,
        backend: &S,
        character_id: u32,
        text: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Comment> {
        let text = validate(text)?;
        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            character_id,
            text: escape_html(text),
            created_at,
        };

        let mut next = self.comments.clone();
        next.push(comment.clone());
        save(backend, COMMENTS_KEY, &next)?;
        self.comments = next;

        tracing::debug!(character_id, comment_id = %comment.id, "comment added");
        Ok(comment)
    }

    /// Delete comment `comment_id` if it belongs to `character_id`.
    /// Returns whether anything was removed.
    pub fn delete<S: StorageBackend + ?Sized>(
        &mut self,
        backend: &S,
        character_id: u32,
        comment_id: &str,
    ) -> Result<bool> {
        let next: Vec<Comment> = self
            .comments
            .iter()
            .filter(|c| !(c.character_id == character_id && c.id == comment_id))
            .cloned()
            .collect();
        if next.len() == self.comments.len() {
            return Ok(false);
        }
        save(backend, COMMENTS_KEY, &next)?;
        self.comments = next;
        Ok(true)
    }

    /// Comments for `character_id`, newest first. Equal timestamps keep
    /// insertion order.
    pub fn list(&self, character_id: u32) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|c| c.character_id == character_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

/// Trim `text` and check it is between 1 and [`MAX_COMMENT_LENGTH`]
/// characters.
pub fn validate(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    let length = trimmed.chars().count();
    if length == 0 {
        return Err(DexError::Validation("Comment cannot be empty".to_string()));
    }
    if length > MAX_COMMENT_LENGTH {
        return Err(DexError::Validation(format!(
            "Comment cannot exceed {} characters (got {})",
            MAX_COMMENT_LENGTH, length
        )));
    }
    Ok(trimmed)
}

/// Escape the characters that could open markup when the stored text is
/// rendered verbatim.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            other => out.push(other),
        }
    }
    out
}
