use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::api;
use crate::effect::Effect;
use crate::state::{AppState, View};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.catalog = DataResource::Loading;
            state.message = None;
            let mut effects = vec![Effect::LoadCatalog {
                url: api::catalog_url(&state.config.api_base, state.config.catalog_limit),
            }];
            if state.view == View::Detail {
                if let Some(name) = state.detail_name.clone() {
                    effects.push(open_detail(state, &name));
                }
            }
            DispatchResult::changed_with_many(effects)
        }

        Action::CatalogDidLoad(entries) => {
            tracing::info!(count = entries.len(), "catalog loaded");
            state.catalog = DataResource::Loaded(entries);
            state.rebuild_filtered();
            state.clamp_page();
            DispatchResult::changed()
        }

        Action::CatalogDidError(error) => {
            tracing::warn!(%error, "catalog fetch failed");
            state.catalog = DataResource::Failed(error.clone());
            state.filtered_indices.clear();
            state.page = 1;
            state.selected_index = 0;
            state.message = Some(format!("Catalog error: {error}"));
            DispatchResult::changed()
        }

        Action::SearchStart => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            apply_search(state);
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            state.search.active = false;
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            state.search.query.push(ch);
            apply_search(state);
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if state.search.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            apply_search(state);
            DispatchResult::changed()
        }

        Action::SearchClear => {
            if state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.query.clear();
            apply_search(state);
            DispatchResult::changed()
        }

        Action::PageNext => page_result(state.set_page(state.page.saturating_add(1))),
        Action::PagePrev => page_result(state.set_page(state.page.saturating_sub(1))),
        Action::PageFirst => page_result(state.set_page(1)),
        Action::PageLast => {
            let last = state.total_pages();
            page_result(state.set_page(last))
        }
        Action::PageGoto(page) => page_result(state.set_page(page)),

        Action::CardSelect(index) => page_result(state.set_selected_index(index)),

        Action::CardMove(delta) => {
            let index = (state.selected_index as i64 + i64::from(delta)).max(0) as usize;
            page_result(state.set_selected_index(index))
        }

        Action::DetailOpen(name) => {
            let name = name.trim().to_lowercase();
            if name.is_empty() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with(open_detail(state, &name))
        }

        Action::DetailBack => {
            if state.view == View::Catalog {
                return DispatchResult::unchanged();
            }
            state.view = View::Catalog;
            state.detail_name = None;
            state.message = None;
            state.clamp_page();
            DispatchResult::changed()
        }

        Action::PokemonDidLoad { name, detail } => {
            if !state.is_current_detail(&name) {
                return DispatchResult::unchanged();
            }
            let url = detail.species_url.clone();
            state.detail = DataResource::Loaded(detail);
            state.evolution = DataResource::Loading;
            DispatchResult::changed_with(Effect::LoadSpecies { name, url })
        }

        Action::PokemonDidError { name, error } => {
            tracing::warn!(%name, %error, "pokemon fetch failed");
            if !state.is_current_detail(&name) {
                return DispatchResult::unchanged();
            }
            state.detail = DataResource::Failed(error);
            state.evolution = DataResource::Empty;
            DispatchResult::changed()
        }

        Action::SpeciesDidLoad { name, species } => {
            if !state.is_current_detail(&name) {
                return DispatchResult::unchanged();
            }
            let chain_url = species.evolution_chain_url.clone();
            state.species = Some(species);
            match chain_url {
                Some(url) => DispatchResult::changed_with(Effect::LoadEvolutionChain { name, url }),
                None => {
                    tracing::info!(%name, "species has no evolution chain");
                    state.evolution = DataResource::Failed("no evolution chain".to_string());
                    DispatchResult::changed()
                }
            }
        }

        Action::SpeciesDidError { name, error } => {
            tracing::warn!(%name, %error, "species fetch failed");
            if !state.is_current_detail(&name) {
                return DispatchResult::unchanged();
            }
            state.evolution = DataResource::Failed(error);
            DispatchResult::changed()
        }

        Action::EvolutionDidLoad { name, stages } => {
            if !state.is_current_detail(&name) {
                return DispatchResult::unchanged();
            }
            state.evolution_selected_index = stages
                .iter()
                .position(|stage| stage.name == name)
                .unwrap_or(0);
            state.evolution = DataResource::Loaded(stages);
            DispatchResult::changed()
        }

        Action::EvolutionDidError { name, error } => {
            tracing::warn!(%name, %error, "evolution chain fetch failed");
            if !state.is_current_detail(&name) {
                return DispatchResult::unchanged();
            }
            state.evolution = DataResource::Failed(error);
            DispatchResult::changed()
        }

        Action::EvolutionSelect(index) => {
            let count = state.evolution_stages().len();
            if count == 0 {
                return DispatchResult::unchanged();
            }
            let index = index.min(count - 1);
            if index == state.evolution_selected_index {
                return DispatchResult::unchanged();
            }
            state.evolution_selected_index = index;
            DispatchResult::changed()
        }

        Action::EvolutionOpen => {
            let Some(stage_name) = state
                .evolution_stages()
                .get(state.evolution_selected_index)
                .map(|stage| stage.name.clone())
            else {
                return DispatchResult::unchanged();
            };
            if state.detail_name.as_deref() == Some(stage_name.as_str()) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with(open_detail(state, &stage_name))
        }

        Action::MovesToggle => {
            if state.current_detail().is_none() {
                return DispatchResult::unchanged();
            }
            state.show_all_moves = !state.show_all_moves;
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn apply_search(state: &mut AppState) {
    state.rebuild_filtered();
    state.page = 1;
    state.selected_index = 0;
}

fn open_detail(state: &mut AppState, name: &str) -> Effect {
    state.open_detail(name);
    Effect::LoadPokemonDetail {
        name: name.to_string(),
        url: api::pokemon_url(&state.config.api_base, name),
    }
}

fn page_result(changed: bool) -> DispatchResult<Effect> {
    if changed {
        DispatchResult::changed()
    } else {
        DispatchResult::unchanged()
    }
}
