use serde::Deserialize;

use crate::state::{Entry, EntryDetail};

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_LIST_LIMIT: u16 = 151;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeName {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    types: Vec<PokemonTypeSlot>,
    #[serde(default)]
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    slot: u8,
    #[serde(rename = "type")]
    type_info: TypeName,
}

#[derive(Clone, Debug, Deserialize)]
struct SpeciesResponse {
    flavor_text_entries: Vec<FlavorTextEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct FlavorTextEntry {
    flavor_text: String,
}

/// Client for the handful of PokeAPI endpoints the catalog reads.
#[derive(Clone, Debug)]
pub struct PokeApi {
    http: reqwest::Client,
    base: String,
    limit: u16,
}

impl Default for PokeApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, DEFAULT_LIST_LIMIT)
    }
}

impl PokeApi {
    pub fn new(base: impl Into<String>, limit: u16) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base,
            limit,
        }
    }

    pub fn list_url(&self) -> String {
        format!("{}/pokemon?limit={}", self.base, self.limit)
    }

    pub fn species_url(&self, id: u32) -> String {
        format!("{}/pokemon-species/{id}", self.base)
    }

    pub async fn fetch_list(&self) -> Result<Vec<Entry>, FetchError> {
        let bytes = self.fetch_bytes(&self.list_url()).await?;
        parse_list(&bytes)
    }

    /// Detail record without description; `caught` is left for the caller to fill in.
    pub async fn fetch_detail(&self, url: &str) -> Result<EntryDetail, FetchError> {
        let bytes = self.fetch_bytes(url).await?;
        parse_detail(&bytes)
    }

    pub async fn fetch_description(&self, id: u32) -> Result<Option<String>, FetchError> {
        let bytes = self.fetch_bytes(&self.species_url(id)).await?;
        parse_description(&bytes)
    }

    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.fetch_bytes(url).await
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

pub fn parse_list(bytes: &[u8]) -> Result<Vec<Entry>, FetchError> {
    let response: ListResponse = serde_json::from_slice(bytes)?;
    Ok(response
        .results
        .into_iter()
        .map(|resource| Entry {
            display_name: capitalize(&resource.name),
            detail_url: resource.url,
        })
        .collect())
}

pub fn parse_detail(bytes: &[u8]) -> Result<EntryDetail, FetchError> {
    let response: PokemonResponse = serde_json::from_slice(bytes)?;
    let mut primary_type = None;
    let mut secondary_type = None;
    for slot in response.types {
        match slot.slot {
            1 => primary_type = Some(slot.type_info.name),
            2 => secondary_type = Some(slot.type_info.name),
            _ => {}
        }
    }
    Ok(EntryDetail {
        id: response.id,
        name: response.name,
        primary_type,
        secondary_type,
        sprite_url: pointer_string(&response.sprites, "/front_default"),
        description: None,
        caught: false,
    })
}

/// First flavor text entry, flattened onto one line.
pub fn parse_description(bytes: &[u8]) -> Result<Option<String>, FetchError> {
    let response: SpeciesResponse = serde_json::from_slice(bytes)?;
    Ok(response
        .flavor_text_entries
        .first()
        .map(|entry| sanitize_text(&entry.flavor_text)))
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn sanitize_text(text: &str) -> String {
    text.replace(['\n', '\u{000C}'], " ")
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}
