//! Store-level flows driven through `EffectStoreTestHarness`.

use tui_dispatch::testing::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_dispatch::{DataResource, EventKind, NumericComponentId};
use tui_dispatch_components::SelectList;

use pokedex::action::Action;
use pokedex::config::Config;
use pokedex::effect::Effect;
use pokedex::evolution::EvolutionStage;
use pokedex::reducer::reducer;
use pokedex::state::{AppState, CatalogEntry, PokemonDetail, PokemonSpecies, PokemonStat, View};
use pokedex::ui::handle_catalog_event;

fn entry(id: u32, name: &str) -> CatalogEntry {
    CatalogEntry {
        name: name.to_string(),
        url: format!("https://pokeapi.co/api/v2/pokemon/{id}/"),
    }
}

fn catalog(count: u32) -> Vec<CatalogEntry> {
    let mut entries: Vec<_> = (1..=count).map(|id| entry(id, &format!("mon-{id}"))).collect();
    entries.push(entry(25, "pikachu"));
    entries
}

fn detail(name: &str, moves: usize) -> PokemonDetail {
    PokemonDetail {
        id: 25,
        name: name.to_string(),
        height: 4,
        weight: 60,
        types: vec!["electric".to_string()],
        stats: vec![PokemonStat {
            name: "hp".to_string(),
            value: 35,
        }],
        abilities: vec!["static".to_string()],
        moves: (0..moves).map(|idx| format!("move-{idx}")).collect(),
        artwork_url: None,
        species_url: format!("https://pokeapi.co/api/v2/pokemon-species/{name}/"),
    }
}

fn species(name: &str, chain: Option<&str>) -> PokemonSpecies {
    PokemonSpecies {
        name: name.to_string(),
        evolution_chain_url: chain.map(str::to_string),
    }
}

fn stages() -> Vec<EvolutionStage> {
    ["pichu", "pikachu", "raichu"]
        .iter()
        .zip([172, 25, 26])
        .map(|(name, id)| EvolutionStage {
            name: name.to_string(),
            species_id: Some(id),
        })
        .collect()
}

#[test]
fn catalog_load_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.catalog.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::LoadCatalog { url } if url == "https://pokeapi.co/api/v2/pokemon?limit=1200")
    });

    harness.complete_action(Action::CatalogDidLoad(catalog(60)));
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 1);
    assert_eq!(changed, 1);

    harness.assert_state(|s| s.catalog.is_loaded());
    harness.assert_state(|s| s.filtered_indices.len() == 61);
    harness.assert_state(|s| s.total_pages() == 4);
    harness.assert_state(|s| s.shows_pagination());
}

#[test]
fn catalog_error_leaves_empty_list() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    harness.complete_action(Action::CatalogDidError("request failed: timeout".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.catalog.is_failed());
    harness.assert_state(|s| s.filtered_indices.is_empty());
    harness.assert_state(|s| !s.shows_pagination());
    harness.assert_state(|s| s.message.as_deref() == Some("Catalog error: request failed: timeout"));
}

#[test]
fn initial_page_is_clamped_after_load() {
    let config = Config {
        initial_page: 99,
        ..Config::default()
    };
    let mut harness = EffectStoreTestHarness::new(AppState::new(config), reducer);

    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.page == 99);
    harness.dispatch_collect(Action::CatalogDidLoad(catalog(60)));
    harness.assert_state(|s| s.page == 4);
}

#[test]
fn initial_page_survives_when_in_range() {
    let config = Config {
        initial_page: 3,
        ..Config::default()
    };
    let mut harness = EffectStoreTestHarness::new(AppState::new(config), reducer);

    harness.dispatch_all([Action::Init, Action::CatalogDidLoad(catalog(60))]);
    harness.assert_state(|s| s.page == 3);
    harness.assert_state(|s| s.page_entries()[0].name == "mon-41");
}

#[test]
fn search_resets_page_and_filters_case_insensitively() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_all([
        Action::Init,
        Action::CatalogDidLoad(catalog(60)),
        Action::PageNext,
        Action::PageNext,
    ]);
    harness.assert_state(|s| s.page == 3);

    harness.dispatch_collect(Action::SearchStart);
    harness.dispatch_collect(Action::SearchInput('P'));
    harness.assert_state(|s| s.page == 1);
    for ch in "IKA".chars() {
        harness.dispatch_collect(Action::SearchInput(ch));
    }
    harness.dispatch_collect(Action::SearchSubmit);

    harness.assert_state(|s| !s.search.active);
    harness.assert_state(|s| s.filtered_indices.len() == 1);
    harness.assert_state(|s| s.page_entries()[0].name == "pikachu");
    harness.assert_state(|s| !s.shows_pagination());
}

#[test]
fn search_without_matches_then_clear() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_all([Action::Init, Action::CatalogDidLoad(catalog(60))]);

    harness.dispatch_collect(Action::SearchStart);
    for ch in "zzz".chars() {
        harness.dispatch_collect(Action::SearchInput(ch));
    }
    harness.dispatch_collect(Action::SearchSubmit);
    harness.assert_state(|s| s.filtered_indices.is_empty());
    harness.assert_state(|s| s.total_pages() == 0);

    harness.dispatch_collect(Action::SearchClear);
    harness.assert_state(|s| s.search.query.is_empty());
    harness.assert_state(|s| s.filtered_indices.len() == 61);
}

#[test]
fn detail_pipeline_runs_in_sequence() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_all([Action::Init, Action::CatalogDidLoad(catalog(10))]);
    harness.drain_effects();

    harness.dispatch_collect(Action::DetailOpen("Pikachu".into()));
    harness.assert_state(|s| s.view == View::Detail);
    harness.assert_state(|s| s.detail.is_loading());
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::LoadPokemonDetail { name, url }
            if name == "pikachu" && url == "https://pokeapi.co/api/v2/pokemon/pikachu")
    });

    harness.dispatch_collect(Action::PokemonDidLoad {
        name: "pikachu".into(),
        detail: detail("pikachu", 3),
    });
    harness.assert_state(|s| s.detail.is_loaded());
    harness.assert_state(|s| s.evolution.is_loading());
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::LoadSpecies { url, .. }
            if url == "https://pokeapi.co/api/v2/pokemon-species/pikachu/")
    });

    harness.dispatch_collect(Action::SpeciesDidLoad {
        name: "pikachu".into(),
        species: species("pikachu", Some("https://pokeapi.co/api/v2/evolution-chain/10/")),
    });
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::LoadEvolutionChain { url, .. }
            if url == "https://pokeapi.co/api/v2/evolution-chain/10/")
    });

    harness.dispatch_collect(Action::EvolutionDidLoad {
        name: "pikachu".into(),
        stages: stages(),
    });
    harness.assert_state(|s| s.evolution_stages().len() == 3);
    harness.assert_state(|s| s.evolution_selected_index == 1);
}

#[test]
fn detail_failure_is_not_found() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::DetailOpen("missingno".into()));
    harness.dispatch_collect(Action::PokemonDidError {
        name: "missingno".into(),
        error: "request failed: 404 Not Found".into(),
    });

    harness.assert_state(|s| s.detail.is_failed());
    harness.assert_state(|s| s.current_detail().is_none());
    let effects = harness.drain_effects();
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::LoadSpecies { .. })));
}

#[test]
fn species_failure_keeps_detail() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_all([
        Action::DetailOpen("pikachu".into()),
        Action::PokemonDidLoad {
            name: "pikachu".into(),
            detail: detail("pikachu", 3),
        },
        Action::SpeciesDidError {
            name: "pikachu".into(),
            error: "request failed".into(),
        },
    ]);

    harness.assert_state(|s| s.detail.is_loaded());
    harness.assert_state(|s| s.evolution.is_failed());
}

#[test]
fn species_without_chain_marks_evolution_failed() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_all([
        Action::DetailOpen("ditto".into()),
        Action::PokemonDidLoad {
            name: "ditto".into(),
            detail: detail("ditto", 1),
        },
    ]);
    harness.drain_effects();

    harness.dispatch_collect(Action::SpeciesDidLoad {
        name: "ditto".into(),
        species: species("ditto", None),
    });
    harness.assert_state(|s| s.evolution.is_failed());
    harness.assert_state(|s| s.detail.is_loaded());
    harness.drain_effects().effects_count(0);
}

#[test]
fn stale_responses_are_dropped() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_all([
        Action::DetailOpen("pikachu".into()),
        Action::DetailOpen("raichu".into()),
    ]);
    harness.drain_effects();

    harness.dispatch_collect(Action::PokemonDidLoad {
        name: "pikachu".into(),
        detail: detail("pikachu", 3),
    });
    harness.assert_state(|s| s.detail.is_loading());
    harness.assert_state(|s| s.detail_name.as_deref() == Some("raichu"));
    harness.drain_effects().effects_count(0);
}

#[test]
fn evolution_stage_opens_its_detail() {
    let mut state = AppState::default();
    state.view = View::Detail;
    state.detail_name = Some("pikachu".into());
    state.detail = DataResource::Loaded(detail("pikachu", 3));
    state.evolution = DataResource::Loaded(stages());
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    harness.dispatch_collect(Action::EvolutionSelect(2));
    harness.dispatch_collect(Action::EvolutionOpen);

    harness.assert_state(|s| s.detail_name.as_deref() == Some("raichu"));
    harness.assert_state(|s| s.detail.is_loading());
    harness
        .drain_effects()
        .effects_first_matches(|e| matches!(e, Effect::LoadPokemonDetail { name, .. } if name == "raichu"));
}

#[test]
fn moves_toggle_reveals_all_moves() {
    let mut state = AppState::default();
    state.view = View::Detail;
    state.detail_name = Some("pikachu".into());
    state.detail = DataResource::Loaded(detail("pikachu", 30));
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    harness.assert_state(|s| s.visible_moves().len() == 12);
    harness.assert_state(|s| s.hidden_move_count() == 18);
    harness.dispatch_collect(Action::MovesToggle);
    harness.assert_state(|s| s.visible_moves().len() == 30);
    harness.assert_state(|s| s.hidden_move_count() == 0);
}

#[test]
fn back_returns_to_the_same_page() {
    let mut state = AppState::default();
    reducer(&mut state, Action::CatalogDidLoad(catalog(60)));
    reducer(&mut state, Action::PageNext);

    let enter = EventKind::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    let actions = handle_catalog_event(&enter, &state, &mut SelectList::new()).actions;
    assert_eq!(actions, vec![Action::DetailOpen("mon-21".into())]);

    let mut harness = EffectStoreTestHarness::new(state, reducer);
    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.detail_name.as_deref() == Some("mon-21"));

    harness.dispatch_collect(Action::DetailBack);
    harness.assert_state(|s| s.view == View::Catalog);
    harness.assert_state(|s| s.page == 2);
}

#[test]
fn initial_pokemon_opens_detail_on_init() {
    let config = Config {
        initial_pokemon: Some("Bulbasaur".into()),
        ..Config::default()
    };
    let mut harness = EffectStoreTestHarness::new(AppState::new(config), reducer);

    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.view == View::Detail);
    harness.assert_state(|s| s.detail.is_loading());
    let effects = harness.drain_effects();
    effects.effects_count(2);
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::LoadPokemonDetail { name, .. } if name == "bulbasaur")));
}

#[test]
fn keys_drive_catalog_navigation() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_all([Action::Init, Action::CatalogDidLoad(catalog(60))]);
    let mut list = SelectList::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("l", |state, event| {
        handle_catalog_event(&event.kind, state, &mut list).actions
    });
    actions.assert_count(1);
    actions.assert_first(Action::PageNext);
    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.page == 2);

    let actions = harness.send_keys::<NumericComponentId, _, _>("c", |state, event| {
        handle_catalog_event(&event.kind, state, &mut list).actions
    });
    actions.assert_first(Action::SearchClear);
}

#[test]
fn number_keys_jump_to_page_buttons() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_all([Action::Init, Action::CatalogDidLoad(catalog(200))]);
    harness.assert_state(|s| s.total_pages() == 11);
    let mut list = SelectList::new();

    // Buttons on page 1: 1 2 3 4 … 11
    let actions = harness.send_keys::<NumericComponentId, _, _>("5", |state, event| {
        handle_catalog_event(&event.kind, state, &mut list).actions
    });
    actions.assert_first(Action::PageGoto(11));
    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.page == 11);

    // Buttons on page 11: 1 … 8 9 10 11
    let actions = harness.send_keys::<NumericComponentId, _, _>("2", |state, event| {
        handle_catalog_event(&event.kind, state, &mut list).actions
    });
    actions.assert_first(Action::PageGoto(8));
    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.page == 8);

    // No sixth button on page 8: 1 … 7 8 9 … 11
    let actions = harness.send_keys::<NumericComponentId, _, _>("6", |state, event| {
        handle_catalog_event(&event.kind, state, &mut list).actions
    });
    actions.assert_empty();
}
