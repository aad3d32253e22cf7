/// Upstream requests declared by the reducer. Every variant carries the full
/// URL so the effect handler needs no configuration of its own.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadCatalog { url: String },
    LoadPokemonDetail { name: String, url: String },
    LoadSpecies { name: String, url: String },
    LoadEvolutionChain { name: String, url: String },
}
