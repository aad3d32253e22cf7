//! Evolution chain linearization.
//!
//! PokeAPI returns a chain as a tree (`chain.evolves_to[..]`). The detail view
//! only shows the first branch at every fork, so e.g. Eevee resolves to
//! `eevee -> vaporeon` and the other eeveelutions are not listed.

use serde::{Deserialize, Serialize};

const SPECIES_SEGMENT: &str = "/pokemon-species/";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRef {
    pub name: String,
    pub url: String,
}

/// One link of the upstream `evolution-chain` resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionNode {
    pub species: SpeciesRef,
    #[serde(default)]
    pub evolves_to: Vec<EvolutionNode>,
}

impl EvolutionNode {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            species: SpeciesRef {
                name: name.to_string(),
                url: url.to_string(),
            },
            evolves_to: Vec::new(),
        }
    }

    pub fn evolves_to(mut self, next: EvolutionNode) -> Self {
        self.evolves_to.push(next);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionStage {
    pub name: String,
    /// `None` when the species URL does not have the expected shape; the view
    /// then renders the stage without a sprite.
    pub species_id: Option<u32>,
}

/// Walk the chain from `root`, always following the first evolution.
pub fn resolve_chain(root: Option<&EvolutionNode>) -> Vec<EvolutionStage> {
    let mut stages = Vec::new();
    let mut current = root;
    while let Some(node) = current {
        stages.push(EvolutionStage {
            name: node.species.name.clone(),
            species_id: species_id_from_url(&node.species.url),
        });
        current = node.evolves_to.first();
    }
    stages
}

/// Extract `{id}` from `.../pokemon-species/{id}/`.
pub fn species_id_from_url(url: &str) -> Option<u32> {
    url.match_indices(SPECIES_SEGMENT)
        .find_map(|(start, segment)| id_segment(&url[start + segment.len()..]))
}

fn id_segment(rest: &str) -> Option<u32> {
    let digits_end = rest.find(|ch: char| !ch.is_ascii_digit())?;
    if digits_end == 0 || !rest[digits_end..].starts_with('/') {
        return None;
    }
    rest[..digits_end].parse().ok()
}
