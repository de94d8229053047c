//! Weather card - terminal host for the card presenter

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing_subscriber::filter::EnvFilter;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weather_card::action::Action;
use weather_card::card;
use weather_card::details::present_details;
use weather_card::components::{CardDisplay, CardDisplayProps, Component};
use weather_card::effect::Effect;
use weather_card::reducer::reducer;
use weather_card::snapshot;
use weather_card::state::{AppState, DetailTab, FetchState, SPINNER_TICK_MS};

/// Weather card - renders a weather and air-quality snapshot as a card
#[derive(Parser, Debug)]
#[command(name = "weather-card")]
#[command(about = "Render a weather and air-quality snapshot as a card")]
struct Args {
    /// JSON snapshot of the fetch state (stdin in --plain mode when omitted)
    snapshot: Option<PathBuf>,

    /// Print the card as text and exit
    #[arg(long)]
    plain: bool,

    /// With --plain, print the card description as JSON
    #[arg(long, requires = "plain")]
    json: bool,

    /// With --plain, also print both detail tabs
    #[arg(long, requires = "plain")]
    details: bool,

    /// Snapshot re-read interval in seconds (minimum 1)
    #[arg(long, short, default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
    refresh_interval: u64,

    /// Append logs to this file; the terminal UI logs nowhere otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum CardComponentId {
    Display,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum CardContext {
    Main,
}

impl EventRoutingState<CardComponentId, CardContext> for AppState {
    fn focused(&self) -> Option<CardComponentId> {
        Some(CardComponentId::Display)
    }

    fn modal(&self) -> Option<CardComponentId> {
        None
    }

    fn binding_context(&self, id: CardComponentId) -> CardContext {
        match id {
            CardComponentId::Display => CardContext::Main,
        }
    }

    fn default_context(&self) -> CardContext {
        CardContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        snapshot,
        plain,
        json,
        details,
        refresh_interval,
        log_file,
        debug: debug_args,
    } = Args::parse();

    init_tracing(log_file.as_deref(), plain)?;

    if plain {
        return print_plain(snapshot.as_deref(), json, details).await;
    }

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let snapshot = snapshot.map(|path| path.display().to_string());
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(snapshot))
        })
        .await
        .map_err(debug_error)?;

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
        refresh_interval,
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

/// `RUST_LOG` filter, `info` by default. Plain mode logs to stderr; the
/// terminal UI only logs when given a file.
fn init_tracing(log_file: Option<&Path>, plain: bool) -> io::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_target(true)
        .with_env_filter(env_filter)
        .compact();

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if plain => builder.with_writer(io::stderr).init(),
        None => {}
    }
    Ok(())
}

async fn print_plain(path: Option<&Path>, json: bool, details: bool) -> io::Result<()> {
    let fetch = match path {
        Some(path) => snapshot::load_or_failed(path).await,
        None => snapshot::read_snapshot(io::stdin().lock()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "snapshot unavailable");
            FetchState::Failed
        }),
    };

    let rendered = card::render(&fetch).map_err(|e| {
        tracing::error!(error = %e, "cannot present snapshot");
        io::Error::new(io::ErrorKind::InvalidData, e)
    })?;

    let today = chrono::Local::now().date_naive();
    let views = if details {
        [DetailTab::Weather, DetailTab::AirQuality]
            .into_iter()
            .filter_map(|tab| present_details(&fetch, tab, today))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
    } else {
        Vec::new()
    };

    if json {
        let out = if details {
            serde_json::to_string_pretty(&serde_json::json!({
                "card": rendered,
                "details": views,
            }))
        } else {
            serde_json::to_string_pretty(&rendered)
        };
        let out = out.map_err(io::Error::other)?;
        println!("{out}");
    } else {
        print!("{rendered}");
        for view in &views {
            print!("\n{view}");
        }
    }
    Ok(())
}

struct CardUi {
    display: CardDisplay,
}

impl CardUi {
    fn new() -> Self {
        Self {
            display: CardDisplay,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<CardComponentId>,
    ) {
        event_ctx.set_component_area(CardComponentId::Display, area);

        let props = CardDisplayProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.display.render(frame, area, props);
    }

    fn handle_display_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = CardDisplayProps {
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
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    refresh_interval: u64,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(CardUi::new()));
    let mut bus: EventBus<AppState, Action, CardComponentId, CardContext> = EventBus::new();
    let keybindings: Keybindings<CardContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(CardComponentId::Display, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_display_event(&event.kind, state)
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
            Some(Action::SnapshotLoad),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );

                runtime.subscriptions().interval(
                    "refresh",
                    Duration::from_secs(refresh_interval),
                    || Action::SnapshotLoad,
                );
            },
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

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadSnapshot { path } => {
            ctx.tasks().spawn("snapshot", async move {
                match snapshot::load_snapshot(&path).await {
                    Ok(fetch) => Action::SnapshotDidLoad(fetch),
                    Err(e) => Action::SnapshotDidError(e.to_string()),
                }
            });
        }
    }
}
