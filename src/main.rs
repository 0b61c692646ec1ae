use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::Terminal;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    HandlerResponse, Keybindings,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokedex::action::Action;
use pokedex::api::{PokeApi, DEFAULT_API_BASE, DEFAULT_LIST_LIMIT};
use pokedex::config::Config;
use pokedex::effect::{Effect, EffectHandler};
use pokedex::logging;
use pokedex::prefs::{JsonPreferenceStore, PreferenceStore};
use pokedex::reducer::reducer;
use pokedex::sprite_backend::{self, SpriteBackend};
use pokedex::state::AppState;
use pokedex::ui::{CatalogComponentId, CatalogContext, CatalogUi};

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse the Pokedex and keep track of what you caught")]
struct Args {
    /// PokeAPI root URL
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Number of entries to list
    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
    limit: u16,

    /// Caught-flag file (defaults to the local data dir)
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Log file (defaults to the local data dir)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        api_base,
        limit,
        prefs,
        log_file,
        debug: debug_args,
    } = Args::parse();
    let config = Config::resolve(api_base, limit, prefs, log_file);
    logging::init(&config.log_path)?;
    tracing::info!(
        api = %config.api_base,
        limit = config.limit,
        prefs = %config.prefs_path.display(),
        "starting pokedex"
    );

    let prefs: Arc<dyn PreferenceStore> = Arc::new(JsonPreferenceStore::open(&config.prefs_path));
    let effects = EffectHandler::new(PokeApi::new(&config.api_base, config.limit), prefs);

    let debug = DebugSession::new(debug_args);
    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::default()) })
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
    let slot = sprite_backend::shared_slot();
    let backend = SpriteBackend::new(stdout, Arc::clone(&slot));
    let mut terminal = Terminal::new(backend)?;
    let ui = CatalogUi::new().with_sprite_slot(slot);

    let result = run_app(&mut terminal, &debug, store, replay_actions, ui, effects).await;

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
    tracing::info!("pokedex exited");
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
    ui: CatalogUi,
    effects: EffectHandler,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(ui));
    let mut bus: EventBus<AppState, Action, CatalogComponentId, CatalogContext> = EventBus::new();
    let keybindings: Keybindings<CatalogContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(CatalogComponentId::List, move |event, state| {
        ui_list.borrow_mut().handle_list_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(CatalogComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(CatalogComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    bus.register_global(|event, state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key) => match key.code {
            KeyCode::Char('q') if !state.search.active => HandlerResponse::action(Action::Quit),
            _ => HandlerResponse::ignored(),
        },
        _ => HandlerResponse::ignored(),
    });

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
            move |effect: Effect, ctx: &mut EffectContext<Action>| effects.handle(effect, ctx),
        )
        .await
}
