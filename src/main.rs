mod config;

use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use logwatch_client::{
    InfoPoller, InfoResult, LogApiClient, LogStreamManager, StreamMessage, StreamUpdate,
};
use logwatch_logs::{LogStream, LogStreamConfig};
use logwatch_tui::{
    Action, AppState, ConfirmDialog, Event, EventHandler, HelpOverlay, KeyBindings, KeyContext,
    LogViewerScreen, Tui,
};
use logwatch_types::ConnectionState;

use crate::config::{Args, Settings};

/// Result of a bulk fetch, error already formatted for display
type FetchResult = Result<Vec<String>, String>;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::load(args)?;

    init_tracing(&settings)?;

    // Run the application
    let result = run_app(settings).await;

    // Handle any errors
    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

/// Diagnostics go to stderr or `--log-file`; `RUST_LOG` overrides the level
fn init_tracing(settings: &Settings) -> Result<()> {
    let default_level = if settings.debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match &settings.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Network side of the app: the client and the channels its tasks report on
struct Services {
    client: LogApiClient,
    settings: Settings,
    fetch_tx: mpsc::UnboundedSender<FetchResult>,
    stream_tx: mpsc::UnboundedSender<StreamMessage>,
    stream_manager: LogStreamManager,
}

impl Services {
    /// Run a bulk fetch of the last `tail` lines in the background
    fn spawn_fetch(&self, tail: usize) {
        let client = self.client.clone();
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_tail(tail).await.map_err(|e| e.to_string());
            let _ = tx.send(result);
        });
    }

    fn start_live(&mut self, logs: &mut LogStream) {
        if self
            .stream_manager
            .start(self.client.clone(), logs.tail(), self.stream_tx.clone())
        {
            logs.set_connection(ConnectionState::Connecting);
        }
    }

    fn stop_live(&mut self, logs: &mut LogStream) {
        self.stream_manager.stop();
        logs.set_connection(ConnectionState::Idle);
    }
}

async fn run_app(settings: Settings) -> Result<()> {
    let client = LogApiClient::new(&settings.base_url)?;

    // Create channels
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<FetchResult>();
    let (stream_tx, mut stream_rx) = mpsc::unbounded_channel::<StreamMessage>();
    let (info_tx, mut info_rx) = mpsc::unbounded_channel::<InfoResult>();

    // Initialize state
    let mut state = AppState::new(client.base_url());
    let mut logs = LogStream::new(LogStreamConfig {
        max_logs: settings.max_logs,
        tail: settings.tail,
        auto_scroll: true,
    });

    let poller = InfoPoller::spawn(client.clone(), settings.info_interval, info_tx);
    let follow = settings.follow;
    let mut services = Services {
        client,
        settings,
        fetch_tx,
        stream_tx,
        stream_manager: LogStreamManager::new(),
    };

    // Initial load goes through the refresh guard like any later refresh
    if let Some(tail) = logs.begin_refresh() {
        services.spawn_fetch(tail);
    }
    if follow {
        services.start_live(&mut logs);
    }

    // Initialize TUI
    let mut tui = Tui::new()?;
    let mut events = EventHandler::new(Duration::from_millis(250));
    let keybindings = KeyBindings::new();

    render(&mut tui, &mut state, &logs)?;

    // Main event loop
    loop {
        tokio::select! {
            // Handle terminal events
            Some(event) = events.next() => {
                match event {
                    Event::Key(key) => {
                        let action = if state.ui_state.confirm_clear {
                            keybindings.get_action(KeyContext::ConfirmDialog, &key)
                        } else if state.ui_state.help_visible {
                            // Any key closes help; quit still quits
                            match keybindings.get_action(KeyContext::Global, &key) {
                                Some(Action::Quit) => Some(Action::Quit),
                                _ => Some(Action::ToggleHelp),
                            }
                        } else if state.ui_state.search_active {
                            keybindings.get_search_input_action(&key)
                        } else {
                            keybindings.get_action(KeyContext::LogViewer, &key)
                        };

                        if let Some(action) = action {
                            let _ = action_tx.send(action);
                        }
                    }
                    Event::Tick => {}
                    Event::Resize(_, _) => {
                        let _ = action_tx.send(Action::Render);
                    }
                    Event::Error(e) => {
                        state.show_error(e);
                        state.render_dirty = true;
                    }
                }
            }

            // Handle user actions
            Some(action) = action_rx.recv() => {
                handle_action(&mut state, &mut logs, &mut services, action);
                state.render_dirty = true;
            }

            // Bulk fetch results
            Some(result) = fetch_rx.recv() => {
                logs.finish_refresh(result, Local::now());
                state.render_dirty = true;
            }

            // Live channel updates; stale sessions are ignored
            Some(message) = stream_rx.recv() => {
                if message.session == services.stream_manager.session() {
                    handle_stream_update(&mut logs, message.update);
                    state.render_dirty = true;
                } else {
                    tracing::trace!(session = message.session, "dropping update from stale session");
                }
            }

            // Log file metadata
            Some(result) = info_rx.recv() => {
                match result {
                    Ok(info) => logs.set_info(info),
                    Err(e) => logs.info_failed(e),
                }
                state.render_dirty = true;
            }
        }

        if state.should_quit {
            break;
        }

        if let Some(target) = logs.take_scroll_request() {
            state.apply_scroll_target(target, logs.view());
        }

        if state.render_dirty {
            render(&mut tui, &mut state, &logs)?;
        }
    }

    // Cleanup
    services.stop_live(&mut logs);
    drop(poller);
    events.shutdown();
    tui.restore()?;

    Ok(())
}

fn handle_stream_update(logs: &mut LogStream, update: StreamUpdate) {
    match update {
        StreamUpdate::Opened => logs.set_connection(ConnectionState::Connected),
        StreamUpdate::Event(event) => logs.handle_event(event, Local::now()),
        StreamUpdate::Closed { reason } => logs.stream_failed(reason),
    }
}

fn handle_action(
    state: &mut AppState,
    logs: &mut LogStream,
    services: &mut Services,
    action: Action,
) {
    let visible = logs.view().visible_count();

    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::ToggleHelp => {
            state.ui_state.help_visible = !state.ui_state.help_visible;
        }

        // Log navigation
        Action::ScrollUp(n) => {
            let at_bottom = state.scroll_up(n, visible);
            logs.on_user_scroll(at_bottom);
        }
        Action::ScrollDown(n) => {
            let at_bottom = state.scroll_down(n, visible);
            logs.on_user_scroll(at_bottom);
        }
        Action::PageUp => {
            let at_bottom = state.scroll_up(state.page_size(), visible);
            logs.on_user_scroll(at_bottom);
        }
        Action::PageDown => {
            let at_bottom = state.scroll_down(state.page_size(), visible);
            logs.on_user_scroll(at_bottom);
        }
        Action::ScrollToTop => {
            state.scroll_to_top();
            logs.on_user_scroll(state.is_at_bottom(visible));
        }
        Action::ScrollToBottom => {
            logs.scroll_to_newest();
        }
        Action::ToggleAutoScroll => {
            if logs.toggle_auto_scroll() {
                state.show_info("Auto-scroll on");
            } else {
                state.show_info("Auto-scroll off");
            }
        }

        // Search
        Action::OpenSearch => {
            state.start_search();
        }
        Action::CloseSearch => {
            state.close_search();
        }
        Action::SearchInput(c) => {
            let input = state.search_input_char(c).to_string();
            logs.on_search_input(&input);
        }
        Action::SearchBackspace => {
            let input = state.search_input_backspace().to_string();
            logs.on_search_input(&input);
        }
        Action::SearchClear => {
            state.clear_search_input();
            logs.on_search_input("");
        }
        Action::SubmitSearch => {
            logs.submit_search(&state.ui_state.search_input);
            state.close_search();
        }
        Action::ClearSearch => {
            state.clear_search_input();
            logs.clear_search();
        }

        // Manual operations
        Action::RequestClear => {
            state.ui_state.confirm_clear = true;
        }
        Action::ConfirmClear => {
            state.ui_state.confirm_clear = false;
            logs.clear();
            state.scroll_to_top();
            state.show_info("Log display cleared");
        }
        Action::CancelClear => {
            state.ui_state.confirm_clear = false;
        }
        Action::ExportLogs => {
            let exported = logs
                .export(Local::now().date_naive())
                .and_then(|artifact| {
                    let path = artifact.write_to(&services.settings.export_dir)?;
                    Ok((artifact.line_count, path))
                });
            match exported {
                Ok((count, path)) => {
                    state.show_info(format!("Exported {} lines to {}", count, path.display()));
                }
                Err(e) => {
                    state.show_error(format!("Export failed: {}", e));
                }
            }
        }
        Action::Refresh => {
            if let Some(tail) = logs.begin_refresh() {
                services.spawn_fetch(tail);
            } else {
                state.show_info("Refresh already in progress");
            }
        }
        Action::IncreaseTail => change_tail(state, logs, services, true),
        Action::DecreaseTail => change_tail(state, logs, services, false),
        Action::ToggleLive => {
            if services.stream_manager.is_running() {
                services.stop_live(logs);
                state.show_info("Live view stopped");
            } else {
                services.start_live(logs);
                state.show_info("Live view starting");
            }
        }
        Action::ToggleStats => {
            state.ui_state.stats_visible = !state.ui_state.stats_visible;
        }
        Action::DismissMessage => {
            state.dismiss_message();
            logs.dismiss_notice();
        }
        Action::Render => {}
    }
}

/// Step the tail and reload with it
fn change_tail(state: &mut AppState, logs: &mut LogStream, services: &Services, up: bool) {
    let before = logs.tail();
    let tail = logs.step_tail(up);
    if tail == before {
        state.show_info(format!("Tail stays at {} lines", tail));
        return;
    }
    match logs.begin_refresh() {
        Some(tail) => {
            services.spawn_fetch(tail);
            state.show_info(format!("Tail set to {} lines", tail));
        }
        None => state.show_info(format!(
            "Tail set to {} lines; applies to the next refresh",
            tail
        )),
    }
}

fn render(tui: &mut Tui, state: &mut AppState, logs: &LogStream) -> Result<()> {
    tui.draw(|frame| {
        LogViewerScreen::render(frame, state, logs);

        if state.ui_state.confirm_clear {
            ConfirmDialog::render(
                frame,
                "Clear logs",
                "Clear all displayed entries? The log file on the server is not changed.",
            );
        }

        // Render help overlay if visible
        if state.ui_state.help_visible {
            HelpOverlay::render(frame);
        }
    })?;

    state.render_dirty = false;
    Ok(())
}
