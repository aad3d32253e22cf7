use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::config::Config;
use crate::evolution::EvolutionStage;
use crate::pagination::{self, PageLabel};

/// Moves listed before the "show more" toggle.
pub const MOVES_PREVIEW: usize = 12;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub url: String,
}

impl CatalogEntry {
    /// Numeric id from the trailing path segment, e.g. `.../pokemon/25/`.
    pub fn id(&self) -> Option<u32> {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    /// Decimetres.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub types: Vec<String>,
    pub stats: Vec<PokemonStat>,
    pub abilities: Vec<String>,
    pub moves: Vec<String>,
    pub artwork_url: Option<String>,
    pub species_url: String,
}

impl PokemonDetail {
    pub fn height_m(&self) -> f32 {
        self.height as f32 / 10.0
    }

    pub fn weight_kg(&self) -> f32 {
        self.weight as f32 / 10.0
    }

    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub name: String,
    pub value: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatTier {
    Low,
    Mid,
    High,
}

impl PokemonStat {
    /// Bar fill against the 255 stat ceiling.
    pub fn percent(&self) -> u16 {
        ((u32::from(self.value) * 100 / 255).min(100)) as u16
    }

    pub fn tier(&self) -> StatTier {
        match self.value {
            0..=40 => StatTier::Low,
            41..=70 => StatTier::Mid,
            _ => StatTier::High,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonSpecies {
    pub name: String,
    pub evolution_chain_url: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Catalog,
    Detail,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub config: Config,
    pub view: View,

    pub catalog: DataResource<Vec<CatalogEntry>>,
    pub filtered_indices: Vec<usize>,
    pub search: SearchState,
    pub page: usize,
    pub selected_index: usize,

    pub detail_name: Option<String>,
    pub detail: DataResource<PokemonDetail>,
    pub species: Option<PokemonSpecies>,
    pub evolution: DataResource<Vec<EvolutionStage>>,
    pub evolution_selected_index: usize,
    pub show_all_moves: bool,

    pub message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let config = config.normalized();
        let search = SearchState {
            active: false,
            query: config.initial_search.clone().unwrap_or_default(),
        };
        let (view, detail_name) = match config.initial_pokemon.clone() {
            Some(name) => (View::Detail, Some(name)),
            None => (View::Catalog, None),
        };
        Self {
            terminal_size: (80, 24),
            page: config.initial_page,
            config,
            view,
            catalog: DataResource::Empty,
            filtered_indices: Vec::new(),
            search,
            selected_index: 0,
            detail_name,
            detail: DataResource::Empty,
            species: None,
            evolution: DataResource::Empty,
            evolution_selected_index: 0,
            show_all_moves: false,
            message: None,
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        self.catalog.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rebuild_filtered(&mut self) {
        let query = self.search.query.trim().to_lowercase();
        self.filtered_indices = self
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| query.is_empty() || entry.name.to_lowercase().contains(&query))
            .map(|(idx, _)| idx)
            .collect();
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.filtered_indices.len(), self.config.page_size)
    }

    pub fn page_labels(&self) -> Vec<PageLabel> {
        pagination::page_window(
            self.total_pages(),
            self.page,
            self.config.max_visible_pages,
        )
    }

    /// Page behind the `n`-th numbered button of the control, counting from 1.
    pub fn page_button(&self, n: usize) -> Option<usize> {
        self.page_labels()
            .iter()
            .filter_map(PageLabel::number)
            .nth(n.checked_sub(1)?)
    }

    /// Entries of the current page, in catalog order.
    pub fn page_entries(&self) -> Vec<&CatalogEntry> {
        let range = pagination::page_range(
            self.filtered_indices.len(),
            self.config.page_size,
            self.page,
        );
        self.filtered_indices[range]
            .iter()
            .filter_map(|idx| self.entries().get(*idx))
            .collect()
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }

    /// The control is hidden while everything fits on one page.
    pub fn shows_pagination(&self) -> bool {
        self.filtered_indices.len() > self.config.page_size
    }

    /// Move to `page` (clamped). Returns whether the page changed.
    pub fn set_page(&mut self, page: usize) -> bool {
        let page = pagination::clamp_page(page, self.total_pages());
        if page == self.page {
            return false;
        }
        self.page = page;
        self.selected_index = 0;
        true
    }

    pub fn clamp_page(&mut self) {
        self.page = pagination::clamp_page(self.page, self.total_pages());
        let visible = self.page_entries().len();
        if self.selected_index >= visible {
            self.selected_index = visible.saturating_sub(1);
        }
    }

    pub fn set_selected_index(&mut self, index: usize) -> bool {
        let visible = self.page_entries().len();
        if visible == 0 {
            self.selected_index = 0;
            return false;
        }
        let bounded = index.min(visible - 1);
        if bounded != self.selected_index {
            self.selected_index = bounded;
            return true;
        }
        false
    }

    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.page_entries().get(self.selected_index).copied()
    }

    /// Reset the detail view for `name`. Previously fetched data is dropped;
    /// responses still in flight for other names are ignored by the reducer.
    pub fn open_detail(&mut self, name: &str) {
        self.view = View::Detail;
        self.detail_name = Some(name.to_string());
        self.detail = DataResource::Loading;
        self.species = None;
        self.evolution = DataResource::Empty;
        self.evolution_selected_index = 0;
        self.show_all_moves = false;
        self.message = None;
    }

    pub fn is_current_detail(&self, name: &str) -> bool {
        self.view == View::Detail && self.detail_name.as_deref() == Some(name)
    }

    pub fn current_detail(&self) -> Option<&PokemonDetail> {
        self.detail.data()
    }

    pub fn evolution_stages(&self) -> &[EvolutionStage] {
        self.evolution.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn visible_moves(&self) -> &[String] {
        let Some(detail) = self.current_detail() else {
            return &[];
        };
        if self.show_all_moves {
            &detail.moves
        } else {
            &detail.moves[..detail.moves.len().min(MOVES_PREVIEW)]
        }
    }

    pub fn hidden_move_count(&self) -> usize {
        let total = self.current_detail().map_or(0, |detail| detail.moves.len());
        total.saturating_sub(self.visible_moves().len())
    }

    pub fn sprite_url(&self, id: Option<u32>) -> Option<String> {
        id.map(|id| self.config.sprite_url(id))
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("total", ron_string(&self.entries().len()))
                .entry("filtered", ron_string(&self.filtered_indices.len()))
                .entry("page", ron_string(&self.page))
                .entry("pages", ron_string(&self.total_pages()))
                .entry("selected", ron_string(&self.selected_index))
                .entry("search", ron_string(&self.search.query))
                .entry("search_active", ron_string(&self.search.active)),
            DebugSection::new("Detail")
                .entry("view", ron_string(&self.view))
                .entry("name", ron_string(&self.detail_name))
                .entry("evolution_index", ron_string(&self.evolution_selected_index))
                .entry("all_moves", ron_string(&self.show_all_moves)),
            DebugSection::new("Status")
                .entry("catalog_loading", ron_string(&self.catalog.is_loading()))
                .entry("detail_loading", ron_string(&self.detail.is_loading()))
                .entry("evolution_loading", ron_string(&self.evolution.is_loading()))
                .entry("message", ron_string(&self.message)),
        ]
    }
}
