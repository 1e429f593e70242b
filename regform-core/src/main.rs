//! src/main.rs
//! Employee registration form TUI

use std::{
    io::{self, Stdout},
    panic::PanicHookInfo,
    path::PathBuf,
    sync::{Arc, atomic::Ordering},
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use tokio::{
    signal,
    sync::{Notify, mpsc},
};
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use regform_core::{
    Logger,
    client::registration_client::{RegistrationClient, RegistrationSink},
    config::Config,
    controller::{
        action_dispatcher::{ActionDispatcher, DispatcherStats},
        actions::Action,
        event_loop::{EventLoop, MetricsSnap, TaskResult},
    },
    logging::LoggerConfig,
    model::app_state::AppState,
    view::ui::UIRenderer,
};

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<()> {
    setup_panic_handler();

    let app = App::new()
        .await
        .context("Failed to initialize application")?;
    app.run().await.context("Application runtime error")?;

    info!("Application exited cleanly");
    Ok(())
}

struct App {
    terminal: AppTerminal,
    event_loop: EventLoop,
    state: AppState,
    action_dispatcher: ActionDispatcher,
    ui_renderer: UIRenderer,
    shutdown: Arc<Notify>,
    performance_monitor: PerformanceMonitor,
    _log_guard: Option<WorkerGuard>,
}

#[derive(Debug)]
struct PerformanceMonitor {
    last_metrics_log: Instant,
    slow_frames: u32,
}

impl PerformanceMonitor {
    fn new() -> Self {
        Self {
            last_metrics_log: Instant::now(),
            slow_frames: 0,
        }
    }

    fn record_frame_time(&mut self, duration: Duration) {
        if duration.as_millis() > 16 {
            self.slow_frames += 1;
        }
    }

    fn should_log_metrics(&mut self) -> bool {
        let now = Instant::now();
        if now.duration_since(self.last_metrics_log).as_secs() >= 30 {
            self.last_metrics_log = now;
            true
        } else {
            false
        }
    }
}

impl App {
    async fn new() -> Result<Self> {
        let config_dir = Config::config_dir().unwrap_or_else(|_| PathBuf::from("."));

        let (config, config_error) = match Config::load().await {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        };
        let config = Arc::new(config);

        // Logging goes to a file only; stdout belongs to the terminal UI.
        let log_guard = match Logger::init(&LoggerConfig::from_app_config(&config, &config_dir)) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("Logging disabled: {e}");
                None
            }
        };
        info!("Starting employee registration form");
        if let Some(e) = config_error {
            warn!("Failed to load config, using defaults: {}", e);
        }

        let client = RegistrationClient::new(&config.endpoint)
            .context("Failed to build registration client")?;
        info!(url = client.url(), "Registration endpoint configured");
        let sink: Arc<dyn RegistrationSink> = Arc::new(client);

        let (task_tx, task_rx) = mpsc::unbounded_channel::<TaskResult>();

        let terminal = setup_terminal().context("Failed to initialize terminal")?;

        info!("Application initialized successfully");

        Ok(Self {
            terminal,
            event_loop: EventLoop::new(task_rx),
            state: AppState::new(config),
            action_dispatcher: ActionDispatcher::new(sink, task_tx),
            ui_renderer: UIRenderer::new(),
            shutdown: Arc::new(Notify::new()),
            performance_monitor: PerformanceMonitor::new(),
            _log_guard: log_guard,
        })
    }

    async fn run(mut self) -> Result<()> {
        self.setup_shutdown_handler();
        info!("Starting event loop");

        loop {
            self.render()?;
            self.monitor_performance();

            let focus = self.state.form.focus;
            tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("Shutdown signal received");
                    break;
                }

                action = self.event_loop.next_action(focus) => {
                    if matches!(action, Action::Quit) {
                        info!("Quit action from event loop");
                        break;
                    }
                    if !self.dispatch_action(action) {
                        info!("Termination from dispatched action");
                        break;
                    }
                }
            }
        }

        self.log_final_metrics();
        info!("Event loop terminated cleanly");
        Ok(())
    }

    fn dispatch_action(&mut self, action: Action) -> bool {
        if !matches!(action, Action::Tick) {
            debug!("Dispatching action: {:?}", action);
        }
        self.action_dispatcher.handle(&mut self.state, action)
    }

    fn render(&mut self) -> Result<()> {
        if !self.state.ui.needs_redraw() {
            return Ok(());
        }

        let start = Instant::now();
        let state = &self.state;
        let renderer = &mut self.ui_renderer;
        self.terminal
            .draw(|frame: &mut Frame<'_>| renderer.render(frame, state))
            .context("Failed to draw terminal")?;

        self.state.ui.clear_redraw();
        self.state.ui.increment_frame();

        let duration = start.elapsed();
        self.performance_monitor.record_frame_time(duration);
        if duration.as_millis() > 16 {
            warn!("Slow render: {}ms (target: <16ms)", duration.as_millis());
        }

        Ok(())
    }

    fn monitor_performance(&mut self) {
        if !self.performance_monitor.should_log_metrics() {
            return;
        }

        let dispatcher_stats: DispatcherStats = self.action_dispatcher.get_stats();
        let render_stats = self.ui_renderer.stats();
        info!(
            "Performance: Actions: {}, Submits: {}, FPS: {:.1}, Slow frames: {}",
            dispatcher_stats.total_actions,
            dispatcher_stats.submits_sent,
            render_stats.fps(),
            self.performance_monitor.slow_frames
        );
    }

    fn log_final_metrics(&self) {
        let event_loop_metrics: MetricsSnap = self.event_loop.snapshot_metrics();
        let dispatcher_stats = self.action_dispatcher.get_stats();

        info!("Final metrics:");
        info!("  Terminal events: {}", event_loop_metrics.terminal_events);
        info!("  Task results: {}", event_loop_metrics.tasks);
        info!("  Ticks: {}", event_loop_metrics.ticks);
        info!(
            "  Submits sent/rejected: {}/{}",
            dispatcher_stats.submits_sent, dispatcher_stats.submits_rejected
        );
        info!("  Responses applied: {}", dispatcher_stats.responses);
        info!("  Notifications shown: {}", self.state.ui.notifications_shown);

        let render_stats = self.ui_renderer.stats();
        info!(
            "  Frames drawn: {} (slow: {}, {:.1} fps)",
            self.state.ui.frame_count.load(Ordering::Relaxed),
            render_stats.slow,
            render_stats.fps()
        );
    }

    fn setup_shutdown_handler(&self) {
        let shutdown: Arc<Notify> = self.shutdown.clone();

        tokio::spawn(async move {
            #[cfg(unix)]
            {
                use tokio::signal::unix::{SignalKind, signal};

                let mut sigterm = match signal(SignalKind::terminate()) {
                    Ok(s) => s,
                    Err(e) => {
                        warn!("Failed to create SIGTERM handler: {}", e);
                        return;
                    }
                };

                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM"),
                    _ = signal::ctrl_c() => info!("Received Ctrl+C"),
                }
            }

            #[cfg(not(unix))]
            {
                if let Err(e) = signal::ctrl_c().await {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                    return;
                }
                info!("Received Ctrl+C");
            }

            shutdown.notify_one();
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Err(e) = cleanup_terminal(&mut self.terminal) {
            warn!("Failed to cleanup terminal: {}", e);
        }
    }
}

fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    info!("Terminal setup complete");
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Terminal cleanup complete");
    Ok(())
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);

        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
