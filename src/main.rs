use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing_subscriber::EnvFilter;

use hostwatch::app::{export_json, unix_now, App, View};
use hostwatch::config::Settings;
use hostwatch::data::duration::{format_duration, parse_duration};
use hostwatch::ui::MapViewport;
use hostwatch::{events, ui, Dashboard, DataSource, DisplayState, FileSource, StreamSource};

#[derive(Parser, Debug)]
#[command(name = "hostwatch")]
#[command(about = "Terminal dashboard for host up/down status and report freshness")]
struct Args {
    /// Path to the status report JSON file
    #[arg(short, long, default_value = "status.json", conflicts_with_all = ["connect"])]
    file: PathBuf,

    /// Connect to a TCP endpoint streaming reports (host:port)
    #[arg(short, long, conflicts_with_all = ["file", "export"])]
    connect: Option<String>,

    /// File poll interval in seconds [default: from config, 1]
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Flag data as too old after this long without a report (e.g. "90s", "2m")
    #[arg(long)]
    stale_after: Option<String>,

    /// Configuration file
    #[arg(long, default_value = "hostwatch.toml")]
    config: PathBuf,

    /// Export the evaluated state of --file to JSON and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log_file.as_deref(), args.export.is_some())?;

    let settings = Settings::load(&args.config)?;
    let stale_after = match args.stale_after {
        Some(ref s) => parse_duration(s).with_context(|| format!("invalid --stale-after {:?}", s))?,
        None => settings.stale_after()?,
    };
    let refresh = Duration::from_secs(args.refresh.unwrap_or(settings.refresh).max(1));

    tracing::info!(
        stale_after = %format_duration(stale_after),
        refresh_secs = refresh.as_secs(),
        "starting hostwatch"
    );

    let dashboard = Dashboard::new(settings.marker_set(), stale_after, unix_now());

    if let Some(export_path) = args.export {
        return export_to_file(&args.file, &export_path, dashboard);
    }

    let map = MapViewport::from(settings.map);

    if let Some(ref addr) = args.connect {
        return run_with_tcp(addr, dashboard, map);
    }

    let source = Box::new(FileSource::new(&args.file));
    run_tui(source, dashboard, map, refresh)
}

/// Set up tracing. Logs go to `log_file` when given; without one they go to
/// stderr in export mode and nowhere while the TUI runs.
fn init_logging(log_file: Option<&Path>, export_mode: bool) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hostwatch=info"));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if export_mode {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

/// Run with a TCP stream data source
fn run_with_tcp(addr: &str, dashboard: Dashboard, map: MapViewport) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    let source = rt.block_on(async {
        use tokio::net::TcpStream;

        println!("Connecting to {}...", addr);
        match TcpStream::connect(addr).await {
            Ok(stream) => {
                tracing::info!(%addr, "connected to report stream");
                Ok(Box::new(StreamSource::spawn(stream, addr)) as Box<dyn DataSource>)
            }
            Err(e) => Err(anyhow::anyhow!("Failed to connect to {}: {}", addr, e)),
        }
    })?;

    // Reports are pushed, so poll on every loop iteration
    run_tui(source, dashboard, map, Duration::from_millis(100))
}

/// Run the TUI with the given data source
fn run_tui(
    source: Box<dyn DataSource>,
    dashboard: Dashboard,
    map: MapViewport,
    refresh_interval: Duration,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Restore the terminal before printing a panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(source, dashboard, map);
    app.reload_data(unix_now());

    let result = run_app(&mut terminal, &mut app, refresh_interval);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        // Age label and stale alarm are settled before drawing so header and
        // footer come from the same update
        app.tick(unix_now());

        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                ui::common::render_too_small(frame, area, MIN_WIDTH, MIN_HEIGHT);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Footer
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Map => ui::map::render(frame, app, chunks[2]),
                View::Hosts => ui::hosts::render(frame, app, chunks[2]),
            }

            ui::common::render_footer(frame, app, chunks[3]);

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                _ => {}
            }
        }

        if last_refresh.elapsed() >= refresh_interval {
            app.reload_data(unix_now());
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

/// Evaluate the report in `report_path` once and write the result as JSON.
fn export_to_file(report_path: &Path, export_path: &Path, mut dashboard: Dashboard) -> Result<()> {
    let mut source = FileSource::new(report_path);
    let Some(report) = source.poll() else {
        anyhow::bail!(
            "No report in {}: {}",
            report_path.display(),
            source.error().unwrap_or("empty")
        );
    };

    let now = unix_now();
    let mut display = DisplayState::new();
    let rejected = dashboard.receive(report, now, &mut display);
    dashboard.tick(now, &mut display);

    let export = export_json(&dashboard, &display, &rejected, now);
    std::fs::write(export_path, serde_json::to_string_pretty(&export)?)
        .with_context(|| format!("writing {}", export_path.display()))?;

    println!("Exported dashboard state to: {}", export_path.display());
    Ok(())
}
