//! Screen CLI commands
//!
//! One-shot renders of the home, history and analytics screens, CSV export,
//! and a live `watch` mode that re-renders on every snapshot.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use clap::{Subcommand, ValueEnum};
use tracing::debug;

use crate::config::Settings;
use crate::display::{format_analytics, format_history, format_home};
use crate::error::{ExpensioError, ExpensioResult};
use crate::export::{export_categories_csv, export_expenses_csv};
use crate::models::{Identity, TimeRange};
use crate::storage::JsonExpenseStore;
use crate::views::{AnalyticsView, HistoryView, HomeView, LiveFeed, ViewState};

/// Screens that `watch` can follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Screen {
    Home,
    History,
    Analytics,
}

/// Screen subcommands
#[derive(Subcommand)]
pub enum ScreenCommands {
    /// Show today, week and month totals with recent expenses
    Home,
    /// List every expense, newest first
    History {
        /// Only show expenses whose title or category contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Write the list to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show spending by category
    Analytics {
        /// Time range (today, 7d, month, year, all)
        #[arg(short, long, value_parser = parse_range)]
        range: Option<TimeRange>,
        /// Write the category breakdown to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Keep a screen open and re-render whenever the data changes
    Watch {
        /// Screen to follow
        #[arg(short, long, value_enum, default_value = "home")]
        screen: Screen,
        /// Time range for the analytics screen
        #[arg(short, long, value_parser = parse_range)]
        range: Option<TimeRange>,
        /// Search text for the history screen
        #[arg(long)]
        search: Option<String>,
        /// Stop after this many refresh intervals
        #[arg(long, hide = true)]
        ticks: Option<u64>,
    },
}

fn parse_range(s: &str) -> Result<TimeRange, String> {
    TimeRange::parse(s).ok_or_else(|| {
        format!(
            "Invalid range: '{}'. Valid ranges: today, 7d, month, year, all",
            s
        )
    })
}

/// A screen together with its view model
enum ActiveScreen {
    Home(HomeView),
    History(HistoryView),
    Analytics(AnalyticsView),
}

impl ActiveScreen {
    fn render(&self, feed: &LiveFeed, identity: &Identity, settings: &Settings) -> String {
        let now = Local::now();
        match self {
            Self::Home(view) => format_home(&view.render(feed, &now), identity, settings),
            Self::History(view) => format_history(&view.render(feed), view.query(), settings),
            Self::Analytics(view) => format_analytics(&view.render(feed, &now), settings),
        }
    }
}

fn write_csv(path: &Path, write: impl FnOnce(File) -> ExpensioResult<usize>) -> ExpensioResult<()> {
    let file = File::create(path).map_err(|e| {
        ExpensioError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;
    let rows = write(file)?;
    println!("Exported {} row(s) to {}", rows, path.display());
    Ok(())
}

/// Refuse to export data that could not be loaded
fn exportable<T>(state: &ViewState<T>) -> ExpensioResult<()> {
    match state {
        ViewState::Failed { message, .. } => Err(ExpensioError::Store(message.clone())),
        _ => Ok(()),
    }
}

/// Handle a screen command
pub fn handle_screen_command(
    store: &JsonExpenseStore,
    identity: Option<&Identity>,
    settings: &Settings,
    cmd: ScreenCommands,
) -> ExpensioResult<()> {
    let identity = identity.ok_or(ExpensioError::Unauthenticated)?;

    let mut feed = LiveFeed::new();
    feed.activate(store, Some(identity));

    match cmd {
        ScreenCommands::Home => {
            let screen = ActiveScreen::Home(HomeView::new(settings.recent_limit));
            print!("{}", screen.render(&feed, identity, settings));
        }

        ScreenCommands::History { search, output } => {
            let view = HistoryView::with_query(search.unwrap_or_default());
            let state = view.render(&feed);
            print!("{}", format_history(&state, view.query(), settings));

            if let Some(path) = output {
                exportable(&state)?;
                let rows = state.data().cloned().unwrap_or_default();
                write_csv(&path, |file| export_expenses_csv(&rows, file))?;
            }
        }

        ScreenCommands::Analytics { range, output } => {
            let view = AnalyticsView::new(range.unwrap_or(settings.default_range));
            let state = view.render(&feed, &Local::now());
            print!("{}", format_analytics(&state, settings));

            if let Some(path) = output {
                exportable(&state)?;
                let categories = state
                    .data()
                    .map(|data| data.categories.clone())
                    .unwrap_or_default();
                write_csv(&path, |file| export_categories_csv(&categories, file))?;
            }
        }

        ScreenCommands::Watch {
            screen,
            range,
            search,
            ticks,
        } => {
            let screen = match screen {
                Screen::Home => ActiveScreen::Home(HomeView::new(settings.recent_limit)),
                Screen::History => {
                    ActiveScreen::History(HistoryView::with_query(search.unwrap_or_default()))
                }
                Screen::Analytics => ActiveScreen::Analytics(AnalyticsView::new(
                    range.unwrap_or(settings.default_range),
                )),
            };
            watch(store, &mut feed, &screen, identity, settings, ticks)?;
        }
    }

    feed.deactivate();
    Ok(())
}

fn redraw(text: &str) -> ExpensioResult<()> {
    let mut stdout = io::stdout().lock();
    // Clear the terminal and move the cursor home
    write!(stdout, "\x1b[2J\x1b[H{}", text)?;
    stdout.flush()?;
    Ok(())
}

fn watch(
    store: &JsonExpenseStore,
    feed: &mut LiveFeed,
    screen: &ActiveScreen,
    identity: &Identity,
    settings: &Settings,
    ticks: Option<u64>,
) -> ExpensioResult<()> {
    let interval = Duration::from_millis(settings.watch_interval_ms.max(50));
    redraw(&screen.render(feed, identity, settings))?;

    let mut tick: u64 = 0;
    while ticks.map_or(true, |max| tick < max) {
        tick += 1;

        // Failures reach the feed as error events
        if let Err(err) = store.reload() {
            debug!(error = %err, "reload failed");
        }

        if feed.wait(interval) {
            redraw(&screen.render(feed, identity, settings))?;
        }
    }

    Ok(())
}
