//! Weathervue - weather panel with a signup form

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::info;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weathervue::action::Action;
use weathervue::api::{FetchError, WeatherApi};
use weathervue::components::{
    Component, NoticeModal, NoticeModalProps, SearchOverlay, SearchOverlayProps, SignupOverlay,
    SignupOverlayProps, WeatherDisplay, WeatherDisplayProps,
};
use weathervue::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, PanelConfig};
use weathervue::effect::Effect;
use weathervue::logging;
use weathervue::reducer::reducer;
use weathervue::state::{AppState, DEFAULT_CITY, LOADING_ANIM_TICK_MS, Units};

/// Terminal weather panel backed by OpenWeatherMap
#[derive(Parser, Debug)]
#[command(name = "weathervue")]
#[command(about = "Current weather, a four-day forecast and a signup form")]
struct Args {
    /// City searched on startup
    #[arg(long, short, default_value = DEFAULT_CITY)]
    city: String,

    /// Measurement system requested from the provider
    #[arg(long, value_enum, default_value_t = Units::Metric)]
    units: Units,

    /// Provider base URL (endpoints are appended to it)
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// API key; falls back to OPENWEATHER_API_KEY
    #[arg(long)]
    api_key: Option<String>,

    /// Append tracing output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PanelComponentId {
    Display,
    Search,
    Signup,
    Notice,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PanelContext {
    Main,
    Search,
    Signup,
    Notice,
}

impl EventRoutingState<PanelComponentId, PanelContext> for AppState {
    fn focused(&self) -> Option<PanelComponentId> {
        self.modal().or(Some(PanelComponentId::Display))
    }

    // A notice sits above whichever overlay raised it
    fn modal(&self) -> Option<PanelComponentId> {
        if self.notice.is_some() {
            Some(PanelComponentId::Notice)
        } else if self.signup_mode {
            Some(PanelComponentId::Signup)
        } else if self.search_mode {
            Some(PanelComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: PanelComponentId) -> PanelContext {
        match id {
            PanelComponentId::Display => PanelContext::Main,
            PanelComponentId::Search => PanelContext::Search,
            PanelComponentId::Signup => PanelContext::Signup,
            PanelComponentId::Notice => PanelContext::Notice,
        }
    }

    fn default_context(&self) -> PanelContext {
        PanelContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        city,
        units,
        base_url,
        timeout_secs,
        api_key,
        log_file,
        debug: debug_args,
    } = Args::parse();

    logging::init_file_logging(log_file.as_deref())?;

    let config = PanelConfig {
        base_url,
        units,
        timeout_secs,
        default_city: city,
        ..PanelConfig::default()
    }
    .with_api_key(api_key);
    config.validate().map_err(io::Error::other)?;

    let api = Arc::new(WeatherApi::new(&config).map_err(io::Error::other)?);
    info!(city = %config.default_city, units = units.as_query(), "starting weather panel");

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let initial_city = config.default_city.clone();
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(initial_city, units))
        })
        .await
        .map_err(debug_error)?;

    // Restored snapshots search for whatever city they hold
    let startup_city = state.city.clone();

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        api,
        startup_city,
        replay_actions,
    )
    .await;

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

    Ok(())
}

struct PanelUi {
    display: WeatherDisplay,
    search: SearchOverlay,
    signup: SignupOverlay,
    notice: NoticeModal,
}

impl PanelUi {
    fn new() -> Self {
        Self {
            display: WeatherDisplay,
            search: SearchOverlay::new(),
            signup: SignupOverlay::new(),
            notice: NoticeModal::default(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<PanelComponentId>,
    ) {
        event_ctx.set_component_area(PanelComponentId::Display, area);

        let modal = state.modal();
        let props = WeatherDisplayProps {
            state,
            is_focused: render_ctx.is_focused() && modal.is_none(),
        };
        self.display.render(frame, area, props);

        self.search.set_open(state.search_mode);
        if state.search_mode {
            event_ctx.set_component_area(PanelComponentId::Search, centered_rect(60, 7, area));
            let props = SearchOverlayProps {
                query: &state.search_query,
                is_focused: render_ctx.is_focused() && modal == Some(PanelComponentId::Search),
                on_query_change: Action::SearchQueryChange,
                on_query_submit: Action::SearchQuerySubmit,
            };
            self.search.render(frame, area, props);
        } else {
            event_ctx.component_areas.remove(&PanelComponentId::Search);
        }

        self.signup.sync(state.signup_mode, state.signup_focus);
        if state.signup_mode {
            event_ctx.set_component_area(PanelComponentId::Signup, centered_rect(60, 17, area));
            let props = SignupOverlayProps {
                form: &state.signup,
                focus: state.signup_focus,
                is_focused: render_ctx.is_focused() && modal == Some(PanelComponentId::Signup),
            };
            self.signup.render(frame, area, props);
        } else {
            event_ctx.component_areas.remove(&PanelComponentId::Signup);
        }

        if let Some(notice) = &state.notice {
            event_ctx.set_component_area(PanelComponentId::Notice, centered_rect(56, 8, area));
            let props = NoticeModalProps {
                notice,
                is_focused: render_ctx.is_focused(),
            };
            self.notice.render(frame, area, props);
        } else {
            event_ctx.component_areas.remove(&PanelComponentId::Notice);
        }
    }

    fn handle_display_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
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
        self.search.set_open(state.search_mode);
        let props = SearchOverlayProps {
            query: &state.search_query,
            is_focused: true,
            on_query_change: Action::SearchQueryChange,
            on_query_submit: Action::SearchQuerySubmit,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        consumed(actions)
    }

    fn handle_signup_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.signup.sync(state.signup_mode, state.signup_focus);
        let props = SignupOverlayProps {
            form: &state.signup,
            focus: state.signup_focus,
            is_focused: true,
        };
        let actions: Vec<_> = self.signup.handle_event(event, props).into_iter().collect();
        consumed(actions)
    }

    fn handle_notice_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let Some(notice) = &state.notice else {
            return HandlerResponse::ignored();
        };
        let props = NoticeModalProps {
            notice,
            is_focused: true,
        };
        let actions: Vec<_> = self.notice.handle_event(event, props).into_iter().collect();
        consumed(actions)
    }
}

/// Modal handlers swallow every event, even ones they ignore
fn consumed(actions: Vec<Action>) -> HandlerResponse<Action> {
    HandlerResponse {
        actions,
        consumed: true,
        needs_render: false,
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    api: Arc<WeatherApi>,
    startup_city: String,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PanelUi::new()));
    let mut bus: EventBus<AppState, Action, PanelComponentId, PanelContext> = EventBus::new();
    let keybindings: Keybindings<PanelContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(PanelComponentId::Display, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_display_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(PanelComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_signup = Rc::clone(&ui);
    bus.register(PanelComponentId::Signup, move |event, state| {
        ui_signup
            .borrow_mut()
            .handle_signup_event(&event.kind, state)
    });

    let ui_notice = Rc::clone(&ui);
    bus.register(PanelComponentId::Notice, move |event, state| {
        ui_notice
            .borrow_mut()
            .handle_notice_event(&event.kind, state)
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
            Some(Action::WeatherSearch(startup_city)),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, api.clone()),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, api: Arc<WeatherApi>) {
    match effect {
        Effect::FetchWeather { city } => {
            // Same key: a newer search replaces one still in flight
            ctx.tasks().spawn(TaskKey::new("weather"), async move {
                match api.fetch_report(&city).await {
                    Ok(report) => Action::WeatherDidLoad(report),
                    Err(FetchError::Provider(message)) => Action::WeatherDidReject(message),
                    Err(e) => Action::WeatherDidError(e.to_string()),
                }
            });
        }
    }
}
