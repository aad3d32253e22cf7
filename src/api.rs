use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::evolution::{self, EvolutionNode, EvolutionStage};
use crate::state::{CatalogEntry, PokemonDetail, PokemonSpecies, PokemonStat};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ApiResource {
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct CatalogResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStatSlot>,
    abilities: Vec<PokemonAbilitySlot>,
    moves: Vec<PokemonMoveSlot>,
    #[serde(default)]
    sprites: serde_json::Value,
    species: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonMoveSlot {
    #[serde(rename = "move")]
    move_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct SpeciesResponse {
    name: String,
    evolution_chain: Option<ApiResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct EvolutionChainResponse {
    chain: EvolutionNode,
}

pub fn catalog_url(api_base: &str, limit: usize) -> String {
    format!("{api_base}/pokemon?limit={limit}")
}

pub fn pokemon_url(api_base: &str, name: &str) -> String {
    format!("{api_base}/pokemon/{name}")
}

pub async fn fetch_catalog(url: &str) -> Result<Vec<CatalogEntry>, ApiError> {
    let bytes = fetch_bytes(url).await?;
    decode_catalog(&bytes)
}

pub async fn fetch_pokemon_detail(url: &str) -> Result<PokemonDetail, ApiError> {
    let bytes = fetch_bytes(url).await?;
    decode_pokemon_detail(&bytes)
}

pub async fn fetch_species(url: &str) -> Result<PokemonSpecies, ApiError> {
    let bytes = fetch_bytes(url).await?;
    decode_species(&bytes)
}

pub async fn fetch_evolution_chain(url: &str) -> Result<Vec<EvolutionStage>, ApiError> {
    let bytes = fetch_bytes(url).await?;
    decode_evolution_chain(&bytes)
}

pub fn decode_catalog(bytes: &[u8]) -> Result<Vec<CatalogEntry>, ApiError> {
    let response: CatalogResponse = decode(bytes)?;
    Ok(response
        .results
        .into_iter()
        .map(|entry| CatalogEntry {
            name: entry.name,
            url: entry.url,
        })
        .collect())
}

pub fn decode_pokemon_detail(bytes: &[u8]) -> Result<PokemonDetail, ApiError> {
    let response: PokemonResponse = decode(bytes)?;

    let types = response
        .types
        .into_iter()
        .map(|slot| slot.type_info.name)
        .collect();
    let stats = response
        .stats
        .into_iter()
        .map(|slot| PokemonStat {
            name: slot.stat.name,
            value: slot.base_stat,
        })
        .collect();
    let abilities = response
        .abilities
        .into_iter()
        .map(|slot| slot.ability.name)
        .collect();
    let moves = response
        .moves
        .into_iter()
        .map(|slot| slot.move_info.name)
        .collect();

    Ok(PokemonDetail {
        id: response.id,
        name: response.name,
        height: response.height,
        weight: response.weight,
        types,
        stats,
        abilities,
        moves,
        artwork_url: pointer_string(&response.sprites, "/other/official-artwork/front_default"),
        species_url: response.species.url,
    })
}

pub fn decode_species(bytes: &[u8]) -> Result<PokemonSpecies, ApiError> {
    let response: SpeciesResponse = decode(bytes)?;
    Ok(PokemonSpecies {
        name: response.name,
        evolution_chain_url: response.evolution_chain.map(|chain| chain.url),
    })
}

pub fn decode_evolution_chain(bytes: &[u8]) -> Result<Vec<EvolutionStage>, ApiError> {
    let response: EvolutionChainResponse = decode(bytes)?;
    Ok(evolution::resolve_chain(Some(&response.chain)))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    Ok(serde_json::from_slice(bytes)?)
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, ApiError> {
    tracing::debug!(url, "GET");
    let response = http_client().get(url).send().await?;
    let response = response.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}
