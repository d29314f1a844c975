//! globe-weather: click anywhere on a spinning globe or world map to see the
//! current weather there.
//!
//! # Usage
//!
//! ```sh
//! # Start over Seoul
//! OPENWEATHER_API_KEY=... globe-weather
//!
//! # Start somewhere else, refresh every 10 minutes, log to a file
//! globe-weather --lat 48.8566 --lng 2.3522 --refresh-interval 600 --log-file /tmp/gw.log
//! ```

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use globe_weather::components::App;
use globe_weather::state::FRAME_INTERVAL;
use globe_weather::{reducer, weather_effects, Action, AppState, FrameClock, TracingMiddleware};
use globe_weather_core::{Config, ConfigLayer, RetentionPolicy, WeatherClient};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tui_dispatch::{EffectRuntime, EffectStoreWithMiddleware};

/// Terminal globe and world map with current weather
#[derive(Parser, Debug)]
#[command(name = "globe-weather", version)]
#[command(about = "Click a point on the globe or map to see the weather there")]
struct Args {
    /// Start latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Start longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lng: Option<f64>,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Current-weather endpoint
    #[arg(long, env = "OPENWEATHER_ENDPOINT")]
    endpoint: Option<String>,

    /// Refresh interval in seconds (0 disables)
    #[arg(long)]
    refresh_interval: Option<u64>,

    /// What to show after a failed fetch: keep the last weather or clear it
    #[arg(long, value_name = "keep|clear")]
    on_error: Option<RetentionPolicy>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Config file (default: <config dir>/globe-weather/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file. Filter with RUST_LOG.
    #[arg(long, env = "GLOBE_WEATHER_LOG")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn layer(&self) -> ConfigLayer {
        ConfigLayer {
            api_key: self.api_key.clone(),
            endpoint: self.endpoint.clone(),
            latitude: self.lat,
            longitude: self.lng,
            refresh_interval: self.refresh_interval,
            on_error: self.on_error,
            timeout: self.timeout,
        }
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("globe_weather=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("Error: could not open log file {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    // Resolve configuration before entering TUI mode
    let config = match Config::load(args.layer(), args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    info!(
        start = %config.start,
        endpoint = %config.endpoint,
        retention = %config.retention,
        "starting"
    );

    let mut state = AppState::new(config.start, config.retention);
    if let Err(e) = config.require_api_key() {
        warn!(error = %e, "weather disabled");
        state = state.with_config_error(e.to_string());
    }

    let client = match WeatherClient::new(config.client_settings()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: could not build HTTP client: {e}");
            std::process::exit(1);
        }
    };
    let refresh_interval = config.refresh_interval.filter(|_| state.config_error.is_none());

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, state, client, refresh_interval).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: AppState,
    client: WeatherClient,
    refresh_interval: Option<Duration>,
) -> io::Result<()> {
    let store = EffectStoreWithMiddleware::new(state, reducer, TracingMiddleware);
    let mut runtime = EffectRuntime::from_store(store);

    // Animation frames carry the measured time since the previous one
    let clock = FrameClock::new();
    runtime
        .subscriptions()
        .interval("tick", FRAME_INTERVAL, move || Action::Tick(clock.lap()));

    if let Some(period) = refresh_interval {
        runtime
            .subscriptions()
            .interval("refresh", period, || Action::WeatherFetch);
    }

    // Fetch for the start location right away
    runtime.enqueue(Action::WeatherFetch);

    let app = RefCell::new(App::new());

    let result = runtime
        .run(
            terminal,
            |frame, area, state, _render_ctx| app.borrow_mut().render(frame, area, state),
            |event, state| app.borrow_mut().handle_event(event, state),
            |action| matches!(action, Action::Quit),
            weather_effects(Arc::new(client)),
        )
        .await;
    info!("exiting");
    result
}
