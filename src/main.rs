use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pokedex::action::Action;
use pokedex::api;
use pokedex::config::{
    Config, DEFAULT_API_BASE, DEFAULT_CATALOG_LIMIT, DEFAULT_PAGE_SIZE, DEFAULT_SPRITE_BASE,
};
use pokedex::effect::Effect;
use pokedex::logging;
use pokedex::reducer::reducer;
use pokedex::state::AppState;
use pokedex::ui::{self, PokedexComponentId, PokedexContext, PokedexUi};
use ratatui::{backend::CrosstermBackend, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, Keybindings, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Browse the PokeAPI catalog from the terminal
#[derive(Parser, Debug)]
#[command(name = "pokedex-tui")]
#[command(about = "Paginated Pokémon catalog with search and detail views")]
struct Args {
    /// Catalog page to show first
    #[arg(long, short, default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
    page: u64,

    /// Open the detail view for this Pokémon on start
    #[arg(long)]
    pokemon: Option<String>,

    /// Initial search query
    #[arg(long, short)]
    search: Option<String>,

    /// Cards per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE as u64, value_parser = clap::value_parser!(u64).range(1..))]
    page_size: u64,

    /// Number of catalog entries requested from the API
    #[arg(long, default_value_t = DEFAULT_CATALOG_LIMIT as u64, value_parser = clap::value_parser!(u64).range(1..))]
    limit: u64,

    /// Upstream API base URL
    #[arg(long, env = "POKEDEX_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Sprite URL prefix, `{id}.png` is appended
    #[arg(long, env = "POKEDEX_SPRITE_BASE", default_value = DEFAULT_SPRITE_BASE)]
    sprite_base: String,

    /// Write tracing output to this file
    #[arg(long, env = "POKEDEX_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            api_base: self.api_base.clone(),
            sprite_base: self.sprite_base.clone(),
            catalog_limit: self.limit as usize,
            page_size: self.page_size as usize,
            initial_page: self.page as usize,
            initial_search: self.search.clone(),
            initial_pokemon: self.pokemon.clone(),
            log_file: self.log_file.clone(),
            ..Config::default()
        }
        .normalized()
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let config = args.config();
    logging::init(config.log_file.as_deref())?;
    tracing::info!(api_base = %config.api_base, page = config.initial_page, "starting");

    let debug = DebugSession::new(args.debug);

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(config))
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PokedexUi::new()));
    let mut bus: EventBus<AppState, Action, PokedexComponentId, PokedexContext> = EventBus::new();
    let keybindings: Keybindings<PokedexContext> = Keybindings::new();

    let ui_catalog = Rc::clone(&ui);
    bus.register(PokedexComponentId::Catalog, move |event, state| {
        ui_catalog
            .borrow_mut()
            .handle_catalog_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(PokedexComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(PokedexComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    bus.register_global(|event, state| ui::handle_global_event(&event.kind, state));

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadCatalog { url } => {
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                match api::fetch_catalog(&url).await {
                    Ok(entries) => Action::CatalogDidLoad(entries),
                    Err(error) => Action::CatalogDidError(error.to_string()),
                }
            });
        }
        Effect::LoadPokemonDetail { name, url } => {
            let key = format!("pokemon_{name}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_pokemon_detail(&url).await {
                    Ok(detail) => Action::PokemonDidLoad { name, detail },
                    Err(error) => Action::PokemonDidError {
                        name,
                        error: error.to_string(),
                    },
                }
            });
        }
        Effect::LoadSpecies { name, url } => {
            let key = format!("species_{name}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_species(&url).await {
                    Ok(species) => Action::SpeciesDidLoad { name, species },
                    Err(error) => Action::SpeciesDidError {
                        name,
                        error: error.to_string(),
                    },
                }
            });
        }
        Effect::LoadEvolutionChain { name, url } => {
            let key = format!("evo_{name}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_evolution_chain(&url).await {
                    Ok(stages) => Action::EvolutionDidLoad { name, stages },
                    Err(error) => Action::EvolutionDidError {
                        name,
                        error: error.to_string(),
                    },
                }
            });
        }
    }
}
