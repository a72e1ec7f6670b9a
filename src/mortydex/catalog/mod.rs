//! # Catalog Client
//!
//! Read-only access to the remote character catalog. Two queries exist: the
//! list query (first page of characters) and the detail query (one character
//! with origin, location and episodes).
//!
//! - [`graphql::GraphQlCatalog`]: the public GraphQL endpoint over HTTP.
//! - [`file::JsonFileCatalog`]: a saved GraphQL response on disk, for offline
//!   use and tests.
//! - [`StaticCatalog`]: an in-memory list, for tests.
//!
//! Both wire-backed implementations decode responses through
//! [`parse_response`], so a GraphQL `errors` array, a missing `data` field or
//! a malformed body all surface as [`DexError::Fetch`].

use crate::error::{DexError, Result};
use crate::model::{deserialize_id, Character, CharacterDetail, Episode, Gender, Status};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub mod file;
pub mod graphql;

pub const LIST_QUERY: &str = r#"
  query GetCharacters {
    characters {
      results {
        id
        image
        name
        status
        species
        gender
      }
    }
  }
"#;

pub const DETAIL_QUERY: &str = r#"
  query GetCharacter($id: ID!) {
    character(id: $id) {
      id
      image
      name
      status
      species
      gender
      origin {
        name
      }
      location {
        name
      }
      episode {
        id
        name
        episode
      }
    }
  }
"#;

pub trait Catalog {
    /// The characters of the list query, in catalog order.
    fn list_characters(&self) -> Result<Vec<Character>>;

    /// One character with its detail fields. `Ok(None)` if the catalog has
    /// no character with that id.
    fn character(&self, id: u32) -> Result<Option<CharacterDetail>>;
}

impl<C: Catalog + ?Sized> Catalog for Box<C> {
    fn list_characters(&self) -> Result<Vec<Character>> {
        (**self).list_characters()
    }

    fn character(&self, id: u32) -> Result<Option<CharacterDetail>> {
        (**self).character(id)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CharactersData {
    pub characters: CharacterPage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CharacterPage {
    pub results: Vec<WireCharacter>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CharacterData {
    pub character: Option<WireCharacter>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WireEpisode {
    #[serde(deserialize_with = "deserialize_id")]
    id: u32,
    name: String,
    episode: String,
}

/// A character as the GraphQL API returns it. Detail-only fields are
/// optional so the same shape decodes both queries.
#[derive(Debug, Deserialize)]
pub(crate) struct WireCharacter {
    #[serde(deserialize_with = "deserialize_id")]
    id: u32,
    name: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    species: String,
    status: Status,
    gender: Gender,
    #[serde(default)]
    origin: Option<NamedRef>,
    #[serde(default)]
    location: Option<NamedRef>,
    #[serde(default)]
    episode: Vec<WireEpisode>,
}

impl WireCharacter {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn into_character(self) -> Character {
        Character {
            id: self.id,
            name: self.name,
            species: self.species,
            status: self.status,
            gender: self.gender,
            image_url: self.image,
        }
    }

    pub fn into_detail(mut self) -> CharacterDetail {
        let origin = name_or_unknown(self.origin.take());
        let location = name_or_unknown(self.location.take());
        let episodes = std::mem::take(&mut self.episode)
            .into_iter()
            .map(|e| Episode {
                id: e.id,
                name: e.name,
                code: e.episode,
            })
            .collect();
        CharacterDetail {
            character: self.into_character(),
            origin,
            location,
            episodes,
        }
    }
}

fn name_or_unknown(place: Option<NamedRef>) -> String {
    place
        .map(|p| p.name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Decode a GraphQL response body into its `data` payload.
pub(crate) fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T> {
    let response: GraphQlResponse<T> = serde_json::from_str(body)
        .map_err(|e| DexError::Fetch(format!("malformed catalog response: {}", e)))?;

    if !response.errors.is_empty() {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(DexError::Fetch(messages.join("; ")));
    }

    response
        .data
        .ok_or_else(|| DexError::Fetch("catalog response has no data".to_string()))
}

/// In-memory catalog, for tests and for embedding a fixed list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    details: Vec<CharacterDetail>,
}

impl StaticCatalog {
    pub fn new(characters: Vec<Character>) -> Self {
        Self {
            details: characters
                .into_iter()
                .map(|character| CharacterDetail {
                    character,
                    origin: "unknown".to_string(),
                    location: "unknown".to_string(),
                    episodes: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn with_details(details: Vec<CharacterDetail>) -> Self {
        Self { details }
    }
}

impl Catalog for StaticCatalog {
    fn list_characters(&self) -> Result<Vec<Character>> {
        Ok(self.details.iter().map(|d| d.character.clone()).collect())
    }

    fn character(&self, id: u32) -> Result<Option<CharacterDetail>> {
        Ok(self.details.iter().find(|d| d.character.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_list_response_with_string_ids() {
        let body = r#"{"data":{"characters":{"results":[
            {"id":"1","image":"https://img/1.jpeg","name":"Rick Sanchez","status":"Alive","species":"Human","gender":"Male"},
            {"id":"8","image":"https://img/8.jpeg","name":"Adjudicator Rick","status":"Dead","species":"Human","gender":"Male"}
        ]}}}"#;
        let data: CharactersData = parse_response(body).unwrap();
        let characters: Vec<Character> = data
            .characters
            .results
            .into_iter()
            .map(WireCharacter::into_character)
            .collect();
        assert_eq!(characters.len(), 2);
        assert_eq!(characters[1].id, 8);
        assert_eq!(characters[1].status, Status::Dead);
        assert_eq!(characters[0].image_url, "https://img/1.jpeg");
    }

    #[test]
    fn unrecognised_status_maps_to_unknown() {
        let body = r#"{"data":{"character":{"id":3,"name":"X","status":"Pickled","species":"Human","gender":"unknown"}}}"#;
        let data: CharacterData = parse_response(body).unwrap();
        let detail = data.character.unwrap().into_detail();
        assert_eq!(detail.character.status, Status::Unknown);
        assert_eq!(detail.character.gender, Gender::Unknown);
        assert_eq!(detail.origin, "unknown");
    }

    #[test]
    fn decodes_detail_fields() {
        let body = r#"{"data":{"character":{
            "id":"2","image":"i","name":"Morty Smith","status":"Alive","species":"Human","gender":"Male",
            "origin":{"name":"unknown"},"location":{"name":"Citadel of Ricks"},
            "episode":[{"id":"1","name":"Pilot","episode":"S01E01"}]
        }}}"#;
        let data: CharacterData = parse_response(body).unwrap();
        let detail = data.character.unwrap().into_detail();
        assert_eq!(detail.location, "Citadel of Ricks");
        assert_eq!(detail.episodes[0].code, "S01E01");
        assert_eq!(detail.episodes[0].id, 1);
    }

    #[test]
    fn null_character_is_none() {
        let data: CharacterData = parse_response(r#"{"data":{"character":null}}"#).unwrap();
        assert!(data.character.is_none());
    }

    #[test]
    fn graphql_errors_are_fetch_errors() {
        let body = r#"{"errors":[{"message":"Cannot query field"}],"data":null}"#;
        let err = parse_response::<CharactersData>(body).unwrap_err();
        assert!(matches!(err, DexError::Fetch(ref m) if m.contains("Cannot query field")));
        assert!(err.is_fetch_error());
    }

    #[test]
    fn garbage_body_is_fetch_error() {
        assert!(matches!(
            parse_response::<CharactersData>("<html>502</html>"),
            Err(DexError::Fetch(_))
        ));
        assert!(matches!(
            parse_response::<CharactersData>("{}"),
            Err(DexError::Fetch(_))
        ));
    }

    #[test]
    fn static_catalog_from_plain_characters_has_unknown_places() {
        let catalog = StaticCatalog::new(vec![Character::new(
            12,
            "Alexander",
            "Human",
            Status::Dead,
            Gender::Male,
        )]);
        assert_eq!(catalog.list_characters().unwrap().len(), 1);

        let detail = catalog.character(12).unwrap().unwrap();
        assert_eq!(detail.origin, "unknown");
        assert_eq!(detail.location, "unknown");
        assert!(detail.episodes.is_empty());
        assert!(catalog.character(13).unwrap().is_none());
    }
}
