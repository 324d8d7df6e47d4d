use crossterm::event::KeyCode;

use crate::core::system_monitor::SortKey;

/// Events that can occur in the monitor TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEvent {
    /// Quit the application
    Quit,
    /// Toggle help overlay
    ToggleHelp,
    /// Sort the process table by a key
    SortBy(SortKey),
    /// Switch between grouped and per-process rows
    ToggleGrouping,
    /// Navigate process list up
    ProcessUp,
    /// Navigate process list down
    ProcessDown,
    /// Jump to the first row
    ProcessTop,
    /// Jump to the last row
    ProcessBottom,
    /// First or second half of the `dd` kill chord
    Kill,
    /// No action
    None,
}

/// Map a key press to a monitor event
pub fn map_key(code: KeyCode) -> MonitorEvent {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => MonitorEvent::Quit,
        KeyCode::Char('?') => MonitorEvent::ToggleHelp,
        KeyCode::Char('c') => MonitorEvent::SortBy(SortKey::Cpu),
        KeyCode::Char('m') => MonitorEvent::SortBy(SortKey::Memory),
        KeyCode::Char('p') => MonitorEvent::SortBy(SortKey::Pid),
        KeyCode::Tab => MonitorEvent::ToggleGrouping,
        KeyCode::Up | KeyCode::Char('k') => MonitorEvent::ProcessUp,
        KeyCode::Down | KeyCode::Char('j') => MonitorEvent::ProcessDown,
        KeyCode::Home | KeyCode::Char('g') => MonitorEvent::ProcessTop,
        KeyCode::End | KeyCode::Char('G') => MonitorEvent::ProcessBottom,
        KeyCode::Char('d') => MonitorEvent::Kill,
        _ => MonitorEvent::None,
    }
}
