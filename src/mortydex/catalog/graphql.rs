use super::{parse_response, Catalog, CharacterData, CharactersData, DETAIL_QUERY, LIST_QUERY};
use crate::error::{DexError, Result};
use crate::model::{Character, CharacterDetail};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://rickandmortyapi.com/graphql";

/// Catalog backed by the public GraphQL endpoint.
///
/// A failed request is re-issued up to `retries` more times before the
/// error is returned.
#[derive(Debug, Clone)]
pub struct GraphQlCatalog {
    client: Client,
    endpoint: String,
    retries: u32,
}

impl GraphQlCatalog {
    pub fn new(endpoint: impl Into<String>, timeout: Duration, retries: u32) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mortydex/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            retries,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn query<T: DeserializeOwned>(&self, query: &str, variables: serde_json::Value) -> Result<T> {
        let mut attempt = 0;
        loop {
            match self.post(query, &variables) {
                Ok(data) => return Ok(data),
                Err(e) if attempt < self.retries && e.is_fetch_error() => {
                    attempt += 1;
                    tracing::warn!(
                        endpoint = %self.endpoint,
                        attempt,
                        error = %e,
                        "catalog request failed, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn post<T: DeserializeOwned>(&self, query: &str, variables: &serde_json::Value) -> Result<T> {
        tracing::debug!(endpoint = %self.endpoint, %variables, "catalog request");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(DexError::Fetch(format!("catalog returned HTTP {}", status)));
        }
        let body = response.text()?;
        parse_response(&body)
    }
}

impl Catalog for GraphQlCatalog {
    fn list_characters(&self) -> Result<Vec<Character>> {
        let data: CharactersData = self.query(LIST_QUERY, json!({}))?;
        Ok(data
            .characters
            .results
            .into_iter()
            .map(|c| c.into_character())
            .collect())
    }

    fn character(&self, id: u32) -> Result<Option<CharacterDetail>> {
        let data: CharacterData = self.query(DETAIL_QUERY, json!({ "id": id.to_string() }))?;
        Ok(data.character.map(|c| c.into_detail()))
    }
}
