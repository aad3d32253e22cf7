use serde::{Deserialize, Serialize};

use crate::evolution::EvolutionStage;
use crate::state::{CatalogEntry, PokemonDetail, PokemonSpecies};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,
    CatalogDidLoad(Vec<CatalogEntry>),
    CatalogDidError(String),

    SearchStart,
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,
    SearchClear,

    PageNext,
    PagePrev,
    PageFirst,
    PageLast,
    PageGoto(usize),

    CardSelect(usize),
    CardMove(i16),

    DetailOpen(String),
    DetailBack,
    PokemonDidLoad { name: String, detail: PokemonDetail },
    PokemonDidError { name: String, error: String },
    SpeciesDidLoad { name: String, species: PokemonSpecies },
    SpeciesDidError { name: String, error: String },
    EvolutionDidLoad { name: String, stages: Vec<EvolutionStage> },
    EvolutionDidError { name: String, error: String },
    EvolutionSelect(usize),
    EvolutionOpen,
    MovesToggle,

    UiTerminalResize(u16, u16),
    Quit,
}
