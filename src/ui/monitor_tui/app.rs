use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::core::config::DashboardConfig;
use crate::core::system_monitor::{terminate, DashboardState, MetricsRuntime, RenderGate};

use super::event_handler::{map_key, MonitorEvent};
use super::render::render_ui;

/// How long to wait for input before redrawing
const FRAME_INTERVAL: Duration = Duration::from_millis(250);

/// UI-side state. Metric data lives behind the gate.
pub struct MonitorApp {
    pub gate: RenderGate<DashboardState>,
    pub should_quit: bool,
    pub show_help: bool,
    pub selected_row: usize,
    /// Set after the first `d` of a `dd` chord
    kill_armed: bool,
}

impl MonitorApp {
    pub fn new(gate: RenderGate<DashboardState>) -> Self {
        Self {
            gate,
            should_quit: false,
            show_help: false,
            selected_row: 0,
            kill_armed: false,
        }
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: MonitorEvent) {
        let arm_kill = event == MonitorEvent::Kill && !self.kill_armed;

        match event {
            MonitorEvent::Quit => self.should_quit = true,
            MonitorEvent::ToggleHelp => self.show_help = !self.show_help,
            MonitorEvent::SortBy(key) => {
                if self.gate.write(|state| state.processes.set_sort_key(key)) {
                    self.selected_row = 0;
                }
            }
            MonitorEvent::ToggleGrouping => {
                self.gate.write(|state| state.processes.toggle_grouped());
                self.selected_row = 0;
            }
            MonitorEvent::ProcessUp => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            MonitorEvent::ProcessDown => {
                let max_index = self.row_count().saturating_sub(1);
                if self.selected_row < max_index {
                    self.selected_row += 1;
                }
            }
            MonitorEvent::ProcessTop => self.selected_row = 0,
            MonitorEvent::ProcessBottom => {
                self.selected_row = self.row_count().saturating_sub(1);
            }
            MonitorEvent::Kill => {
                if self.kill_armed {
                    self.kill_selected();
                }
            }
            MonitorEvent::None => {}
        }

        self.kill_armed = arm_kill;
    }

    /// Number of rows in the current process view
    pub fn row_count(&self) -> usize {
        self.gate.read(|state| state.processes.rows.len())
    }

    /// Keep the selection inside the table after a refresh shrank it
    pub fn clamp_selection(&mut self) {
        let max_index = self.row_count().saturating_sub(1);
        self.selected_row = self.selected_row.min(max_index);
    }

    fn kill_selected(&self) {
        let target = self
            .gate
            .read(|state| state.processes.kill_target(self.selected_row));
        match target {
            Some(target) => terminate(&target),
            None => log::debug!("No process at row {} to terminate", self.selected_row),
        }
    }
}

/// Run the monitor TUI application
pub fn run_monitor_app(config: &DashboardConfig) -> Result<()> {
    let runtime = MetricsRuntime::new(config).context("Failed to start metrics collection")?;
    let mut app = MonitorApp::new(runtime.gate.clone());

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    runtime.shutdown();
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut MonitorApp,
) -> Result<()> {
    loop {
        app.clamp_selection();

        {
            // Read-intent is held for the whole frame
            let state = app.gate.read_guard();
            terminal.draw(|frame| render_ui(frame, &state, app))?;
        }

        if event::poll(FRAME_INTERVAL).context("Event poll failed")? {
            if let Event::Key(key) = event::read().context("Event read failed")? {
                if key.kind == KeyEventKind::Press {
                    if app.show_help {
                        app.show_help = false;
                        continue;
                    }
                    app.handle_event(map_key(key.code));
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
