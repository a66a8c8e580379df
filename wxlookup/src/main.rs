//! wxlookup - weather lookup TUI
//!
//! ```sh
//! WEATHER_API_KEY=... wxlookup --tier forecast --city Lisbon
//! ```

use std::cell::RefCell;
use std::io;
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
use tui_dispatch::debug::DebugLayer;
use tui_dispatch::{
    EffectRuntime, EffectStoreWithMiddleware, EventKind, EventOutcome, RenderContext,
};
use wxlookup::AppError;
use wxlookup::action::Action;
use wxlookup::components::{Component, LookupScreen, LookupScreenProps};
use wxlookup::config::{Args, Config};
use wxlookup::effect::EffectHandler;
use wxlookup::logging;
use wxlookup::reducer::reducer;
use wxlookup::state::{AppState, LOADING_ANIM_TICK_MS};
use wxlookup_provider::{WeatherApiClient, WeatherProvider};

#[tokio::main]
async fn main() {
    if let Err(e) = run(Args::parse()).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let config = args.resolve()?;
    logging::init(&config.log_file)?;

    let provider: Arc<dyn WeatherProvider> =
        Arc::new(WeatherApiClient::new(config.provider.clone())?);
    info!(
        tier = config.tier.name(),
        base_url = %config.provider.base_url,
        "starting"
    );

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &config, provider).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("exiting");
    result.map_err(AppError::from)
}

struct LookupUi {
    screen: LookupScreen,
}

impl LookupUi {
    fn new() -> Self {
        Self {
            screen: LookupScreen::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState, ctx: RenderContext) {
        let props = LookupScreenProps {
            state,
            is_focused: ctx.is_focused(),
        };
        self.screen.render(frame, area, props);
    }

    fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        if let EventKind::Resize(..) = event {
            return EventOutcome::ignored().with_render();
        }

        let props = LookupScreenProps {
            state,
            is_focused: true,
        };
        EventOutcome::from_actions(self.screen.handle_event(event, props))
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: &Config,
    provider: Arc<dyn WeatherProvider>,
) -> io::Result<()> {
    let store = EffectStoreWithMiddleware::new(
        AppState::new(config.tier),
        reducer,
        tui_dispatch::NoopMiddleware,
    );

    // Debug layer for inspection (F12) - only active when --debug
    let debug = DebugLayer::simple().active(config.debug);

    let mut runtime = EffectRuntime::from_store(store).with_debug(debug);

    // Tick timer for loading animation
    runtime
        .subscriptions()
        .interval("tick", Duration::from_millis(LOADING_ANIM_TICK_MS), || {
            Action::Tick
        });

    if let Some(city) = &config.city {
        runtime.enqueue(Action::QueryChange(city.clone()));
        runtime.enqueue(Action::SearchSubmit);
    }

    let ui = RefCell::new(LookupUi::new());
    let effects = EffectHandler::new(provider, config.suggest_debounce);

    runtime
        .run(
            terminal,
            |frame, area, state, render_ctx| {
                ui.borrow_mut().render(frame, area, state, render_ctx);
            },
            |event, state| ui.borrow_mut().map_event(event, state),
            |action| matches!(action, Action::Quit),
            |effect, ctx| effects.handle(effect, ctx.tasks()),
        )
        .await
}
