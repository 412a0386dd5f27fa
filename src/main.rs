//! Weather screen TUI

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weather_screen::action::Action;
use weather_screen::api::{WeatherApiClient, WeatherProvider};
use weather_screen::components::{Component, WeatherScreen, WeatherScreenProps};
use weather_screen::config::{self, RuntimeConfig};
use weather_screen::effect::Effect;
use weather_screen::persist::KeyValueStore;
use weather_screen::reducer::reducer;
use weather_screen::state::{AppState, DEFAULT_CITY, DEFAULT_LOADING_TIMEOUT_MS, SEARCH_DEBOUNCE_MS};
use weather_screen::tasks;

/// Current weather and a 7-day forecast for a searchable city
#[derive(Parser, Debug)]
#[command(name = "weather-screen")]
#[command(about = "Current weather and a 7-day forecast backed by WeatherAPI.com")]
struct Args {
    /// City shown when no city has been saved yet
    #[arg(long, short, default_value = DEFAULT_CITY)]
    city: String,

    /// WeatherAPI.com key (falls back to WEATHER_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Longest time the loading screen stays up, in milliseconds
    #[arg(long, default_value_t = DEFAULT_LOADING_TIMEOUT_MS, value_parser = clap::value_parser!(u64).range(1..))]
    loading_timeout_ms: u64,

    /// Directory for the saved city (defaults to the platform data dir)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log file (defaults to <data-dir>/weather-screen.log)
    #[arg(long)]
    log_file: Option<String>,

    /// Drop search results as soon as the query is too short to search
    #[arg(long)]
    clear_stale_results: bool,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum WeatherComponentId {
    Screen,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum WeatherContext {
    Main,
    Search,
}

impl EventRoutingState<WeatherComponentId, WeatherContext> for AppState {
    fn focused(&self) -> Option<WeatherComponentId> {
        if self.search_visible {
            Some(WeatherComponentId::Search)
        } else {
            Some(WeatherComponentId::Screen)
        }
    }

    fn modal(&self) -> Option<WeatherComponentId> {
        if self.search_visible {
            Some(WeatherComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: WeatherComponentId) -> WeatherContext {
        match id {
            WeatherComponentId::Screen => WeatherContext::Main,
            WeatherComponentId::Search => WeatherContext::Search,
        }
    }

    fn default_context(&self) -> WeatherContext {
        WeatherContext::Main
    }
}

/// Services the effect handler needs
struct Services {
    provider: Arc<dyn WeatherProvider>,
    store: KeyValueStore,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    let Some(api_key) = config::resolve_api_key(args.api_key.clone()) else {
        eprintln!("Error: no WeatherAPI.com key configured.");
        eprintln!(
            "Pass --api-key or set {} (free keys at https://www.weatherapi.com).",
            config::API_KEY_ENV
        );
        std::process::exit(1);
    };

    let data_dir = config::resolve_data_dir(args.data_dir.as_deref());
    let config = RuntimeConfig {
        api_key,
        base_url: config::resolve_base_url(),
        default_city: args.city.clone(),
        loading_timeout_ms: args.loading_timeout_ms,
        log_file: args
            .log_file
            .as_deref()
            .map(Into::into)
            .unwrap_or_else(|| config::default_log_file(&data_dir)),
        data_dir,
        clear_stale_results: args.clear_stale_results,
    };

    init_logging(&config.log_file)?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        default_city = %config.default_city,
        loading_timeout_ms = config.loading_timeout_ms,
        "starting weather screen"
    );

    let debug = DebugSession::new(args.debug);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(|| {
            let config = config.clone();
            async move {
                Ok::<AppState, io::Error>(
                    AppState::new(config.default_city, config.loading_timeout_ms)
                        .with_clear_stale_results(config.clear_stale_results),
                )
            }
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let services = Arc::new(Services {
        provider: Arc::new(WeatherApiClient::new(
            config.api_key.clone(),
            config.base_url.clone(),
        )),
        store: KeyValueStore::in_dir(&config.data_dir),
    });

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, services).await;

    // ===== Cleanup =====
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
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("weather screen exited");
    Ok(())
}

/// Log to a file; the terminal belongs to the UI. `RUST_LOG` overrides the default level.
fn init_logging(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

struct WeatherUi {
    screen: WeatherScreen,
}

impl WeatherUi {
    fn new() -> Self {
        Self {
            screen: WeatherScreen::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<WeatherComponentId>,
    ) {
        event_ctx.set_component_area(WeatherComponentId::Screen, area);
        if state.search_visible {
            event_ctx.set_component_area(WeatherComponentId::Search, area);
        } else {
            event_ctx
                .component_areas
                .remove(&WeatherComponentId::Search);
        }

        let props = WeatherScreenProps {
            state,
            today: chrono::Local::now().date_naive(),
            is_focused: render_ctx.is_focused(),
        };
        self.screen.render(frame, area, props);
    }

    fn handle_screen_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = WeatherScreenProps {
            state,
            today: chrono::Local::now().date_naive(),
            is_focused: true,
        };
        let actions: Vec<_> = self
            .screen
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.screen.search.set_open(state.search_visible);
        let props = WeatherScreen::search_props(state, true);
        let actions: Vec<_> = self
            .screen
            .search
            .handle_event(event, props)
            .into_iter()
            .collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    services: Arc<Services>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(WeatherUi::new()));
    let mut bus: EventBus<AppState, Action, WeatherComponentId, WeatherContext> = EventBus::new();
    let keybindings: Keybindings<WeatherContext> = Keybindings::new();

    let ui_screen = Rc::clone(&ui);
    bus.register(WeatherComponentId::Screen, move |event, state| {
        ui_screen
            .borrow_mut()
            .handle_screen_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(WeatherComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::WeatherLoadDefault),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &services),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, services: &Arc<Services>) {
    match effect {
        Effect::LoadStoredCity => {
            let store = services.store.clone();
            ctx.tasks()
                .spawn(TaskKey::new("stored_city"), tasks::load_stored_city(store));
        }
        Effect::FetchForecast {
            city,
            days,
            origin,
            request,
        } => {
            let provider = Arc::clone(&services.provider);
            let key = format!("forecast_{request}");
            ctx.tasks().spawn(
                TaskKey::new(key),
                tasks::fetch_forecast(provider, city, days, origin, request),
            );
        }
        Effect::PersistCity { name } => {
            let store = services.store.clone();
            ctx.tasks()
                .spawn(TaskKey::new("persist_city"), tasks::persist_city(store, name));
        }
        Effect::DebounceSearch { query } => {
            ctx.tasks().debounce(
                "city_search_debounce",
                Duration::from_millis(SEARCH_DEBOUNCE_MS),
                async move { Action::SearchDebounceElapsed(query) },
            );
        }
        Effect::SearchCities { query } => {
            let provider = Arc::clone(&services.provider);
            let key = format!("city_search_{query}");
            ctx.tasks()
                .spawn(TaskKey::new(key), tasks::search_cities(provider, query));
        }
        Effect::ScheduleProgressTick { run } => {
            ctx.tasks()
                .spawn(TaskKey::new("progress_tick"), tasks::progress_tick(run));
        }
        Effect::StartLoadingTimeout { run, after_ms } => {
            ctx.tasks().spawn(
                TaskKey::new("loading_timeout"),
                tasks::loading_timeout(run, after_ms),
            );
        }
        Effect::StopLoadingTimers => {
            ctx.tasks().cancel(&TaskKey::new("progress_tick"));
            ctx.tasks().cancel(&TaskKey::new("loading_timeout"));
        }
    }
}
