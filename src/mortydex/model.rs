use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Accepts an id written either as a JSON number or as a numeric string.
///
/// GraphQL `ID` fields arrive as strings, and older comment records stored
/// the owning character id as a string.
pub fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(u32),
        Str(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Int(n) => Ok(n),
        RawId::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Alive,
    Dead,
    // The catalog spells this one lowercase; anything it adds later lands here too.
    #[serde(rename = "unknown", other)]
    Unknown,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Alive => "Alive",
            Status::Dead => "Dead",
            Status::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Genderless,
    #[serde(rename = "unknown", other)]
    Unknown,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Genderless => "Genderless",
            Gender::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog record as returned by the list query.
///
/// Characters are owned by the remote catalog; nothing here creates or
/// mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub species: String,
    pub status: Status,
    pub gender: Gender,
    pub image_url: String,
}

impl Character {
    pub fn new(id: u32, name: &str, species: &str, status: Status, gender: Gender) -> Self {
        Self {
            id,
            name: name.to_string(),
            species: species.to_string(),
            status,
            gender,
            image_url: format!(
                "https://rickandmortyapi.com/api/character/avatar/{}.jpeg",
                id
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u32,
    pub name: String,
    /// Season/episode code, e.g. `S01E01`.
    pub code: String,
}

/// The single-character query result: list fields plus origin, last known
/// location and the episodes the character appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDetail {
    pub character: Character,
    pub origin: String,
    pub location: String,
    pub episodes: Vec<Episode>,
}

/// Anything keyed by a catalog character id.
pub trait HasId {
    fn id(&self) -> u32;
}

impl HasId for Character {
    fn id(&self) -> u32 {
        self.id
    }
}

impl HasId for CharacterDetail {
    fn id(&self) -> u32 {
        self.character.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub character_id: u32,
    /// Stored HTML-escaped.
    pub text: String,
    pub created_at: DateTime<Utc>,
}
