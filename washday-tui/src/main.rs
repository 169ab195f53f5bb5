//! Terminal UI for washday that walks through booking a collection and a delivery slot.

mod app;
mod config;
mod input;
mod ui;

use std::{
    fs::{self, File},
    io,
    sync::{Arc, Mutex},
    time::Duration as StdDuration,
};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use washday_core::{BookingPort, InMemoryBookings, ScheduleCalculator, SchedulingService};

use crate::app::{App, Screen};
use crate::config::TuiConfig;
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = TuiConfig::from_env()?;
    init_tracing(&config)?;

    // Booking source + service setup
    let bookings = load_bookings(&config)?;
    let calculator = ScheduleCalculator::new(config.policy).context("Invalid scheduling policy")?;
    let service = Arc::new(SchedulingService::new(calculator, bookings));
    info!(horizon_days = config.policy.horizon_days, "starting washday booking flow");

    // App state
    let app = App::new(service);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

/// Send logs to the configured file; the terminal itself belongs to the UI.
fn init_tracing(config: &TuiConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("Invalid WASHDAY_LOG_LEVEL value: {}", config.log_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_bookings(config: &TuiConfig) -> Result<Arc<dyn BookingPort>> {
    let Some(path) = &config.bookings_file else {
        return Ok(Arc::new(InMemoryBookings::default()));
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read bookings file {}", path.display()))?;
    let bookings = InMemoryBookings::from_json(&json)
        .with_context(|| format!("Failed to parse bookings file {}", path.display()))?;
    info!(
        path = %path.display(),
        days = bookings.booked_days(),
        "loaded booked slots"
    );
    Ok(Arc::new(bookings))
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    let mut pending = Action::LoadCollectionDates;

    loop {
        match pending {
            Action::Quit => break,
            Action::None => {}
            Action::LoadCollectionDates => {
                app.is_loading = true;
                app.error_message = None;
                terminal.draw(|frame| ui::draw(frame, &app))?;

                let res = app.service.collection_dates().await;

                app.is_loading = false;
                match res {
                    Ok(days) => app.set_collection_days(days),
                    Err(err) => {
                        warn!(error = %err, "collection dates unavailable");
                        app.collection_days.clear();
                        app.error_message = Some(format!("Failed to load collection days: {err}"));
                    }
                }
            }
            Action::LoadDeliveryDates => {
                let Some(collection) = app.collection else {
                    app.error_message = Some("Pick a collection slot first".into());
                    pending = Action::None;
                    continue;
                };

                app.is_loading = true;
                app.error_message = None;
                terminal.draw(|frame| ui::draw(frame, &app))?;

                let res = app
                    .service
                    .delivery_dates(collection.date, &collection.range)
                    .await;

                app.is_loading = false;
                match res {
                    Ok(days) => app.set_delivery_days(days),
                    Err(err) => {
                        warn!(error = %err, "delivery dates unavailable");
                        app.error_message = Some(format!("Failed to load delivery days: {err}"));
                    }
                }
            }
            Action::ValidateSchedule => {
                let Some(request) = app.schedule_request() else {
                    app.error_message = Some("Pick a delivery slot first".into());
                    pending = Action::None;
                    continue;
                };

                let outcome = app.service.validate(&request);
                info!(
                    valid = outcome.is_valid,
                    collection = %request.collection_start(),
                    delivery = %request.delivery_start(),
                    "validated schedule"
                );
                app.outcome = Some(outcome);
                app.screen = Screen::Summary;
            }
        }

        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        pending = Action::None;
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            pending = input::handle_key_event(key, &mut app);
        }
    }

    Ok(())
}
