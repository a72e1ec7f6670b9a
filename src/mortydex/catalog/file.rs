use super::{parse_response, Catalog, CharactersData, WireCharacter};
use crate::error::{DexError, Result};
use crate::model::{Character, CharacterDetail};
use std::fs;
use std::path::{Path, PathBuf};

/// Catalog read from a saved list-query response.
///
/// The file holds `{"data":{"characters":{"results":[...]}}}`. Results may
/// carry the detail fields (`origin`, `location`, `episode`); the detail
/// lookup falls back to `unknown` / no episodes when they are absent. The
/// file is re-read on every call, like a fresh network request.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn results(&self) -> Result<Vec<WireCharacter>> {
        let body = fs::read_to_string(&self.path).map_err(|e| {
            DexError::Fetch(format!("cannot read catalog file {}: {}", self.path.display(), e))
        })?;
        let data: CharactersData = parse_response(&body)?;
        Ok(data.characters.results)
    }
}

impl Catalog for JsonFileCatalog {
    fn list_characters(&self) -> Result<Vec<Character>> {
        Ok(self
            .results()?
            .into_iter()
            .map(WireCharacter::into_character)
            .collect())
    }

    fn character(&self, id: u32) -> Result<Option<CharacterDetail>> {
        Ok(self
            .results()?
            .into_iter()
            .find(|c| c.id() == id)
            .map(WireCharacter::into_detail))
    }
}
