//! Fixed-column parser for `ps` process listings.
//!
//! `ps -axo pid:10,comm:50,pcpu:5,pmem:5,args` pads every field to the
//! requested width and separates fields with a single space, so each line can be
//! cut at fixed offsets. The widths are kept in a [`ColumnLayout`] so the table
//! can be matched to whatever the installed `ps` emits.

use serde::{Deserialize, Serialize};

use super::metrics::ProcessRecord;

/// Field widths requested from `ps`, in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub pid: usize,
    pub command: usize,
    pub cpu: usize,
    pub mem: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            pid: 10,
            command: 50,
            cpu: 5,
            mem: 5,
        }
    }
}

/// Widest column a layout may request
pub const MAX_COLUMN_WIDTH: usize = 4096;

/// Character span `[start, end)` of a field within a line
type Span = (usize, usize);

impl ColumnLayout {
    /// The `-o` argument that makes `ps` emit this layout
    pub fn ps_format(&self) -> String {
        format!(
            "pid:{},comm:{},pcpu:{},pmem:{},args",
            self.pid, self.command, self.cpu, self.mem
        )
    }

    fn pid_span(&self) -> Span {
        (0, self.pid)
    }

    fn command_span(&self) -> Span {
        let start = self.pid + 1;
        (start, start + self.command)
    }

    fn cpu_span(&self) -> Span {
        let start = self.command_span().1 + 1;
        (start, start + self.cpu)
    }

    fn mem_span(&self) -> Span {
        let start = self.cpu_span().1 + 1;
        (start, start + self.mem)
    }

    fn args_start(&self) -> usize {
        self.mem_span().1 + 1
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.pid == 0 || self.command == 0 || self.cpu == 0 || self.mem == 0 {
            return Err(crate::DashError::config(format!(
                "ps column widths must be non-zero: {:?}",
                self
            )));
        }
        if [self.pid, self.command, self.cpu, self.mem]
            .iter()
            .any(|&width| width > MAX_COLUMN_WIDTH)
        {
            return Err(crate::DashError::config(format!(
                "ps column widths must be at most {}: {:?}",
                MAX_COLUMN_WIDTH, self
            )));
        }
        Ok(())
    }
}

/// Slice a line by character positions, clamping to the line length.
fn field(line: &str, (start, end): Span) -> &str {
    let byte_at = |pos: usize| {
        line.char_indices()
            .nth(pos)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    };

    let start = byte_at(start);
    let end = byte_at(end);
    &line[start..end.max(start)]
}

fn parse_number<T: std::str::FromStr + Default>(
    raw: &str,
    what: &str,
    line: &str,
    accept: fn(&T) -> bool,
) -> T {
    let trimmed = raw.trim();
    match trimmed.parse::<T>() {
        Ok(value) if accept(&value) => value,
        _ => {
            log::warn!(
                "Failed to parse {} from {:?}, defaulting to 0. line: {}",
                what,
                trimmed,
                line
            );
            T::default()
        }
    }
}

// "nan" and "inf" parse as f64 but are not usable percentages
fn is_finite(value: &f64) -> bool {
    value.is_finite()
}

/// Parse one listing line into a record. Malformed numeric fields become 0.
pub fn parse_line(line: &str, layout: &ColumnLayout) -> ProcessRecord {
    let pid = parse_number::<u32>(field(line, layout.pid_span()), "PID", line, |_| true);
    let cpu_percent =
        parse_number::<f64>(field(line, layout.cpu_span()), "CPU usage", line, is_finite);
    let mem_percent =
        parse_number::<f64>(field(line, layout.mem_span()), "Mem usage", line, is_finite);

    ProcessRecord {
        pid,
        command_name: field(line, layout.command_span()).trim().to_string(),
        full_command: field(line, (layout.args_start(), usize::MAX))
            .trim_end()
            .to_string(),
        cpu_percent,
        mem_percent,
    }
}

/// Parse a complete listing, discarding the header line and blank lines.
pub fn parse_listing(output: &str, layout: &ColumnLayout) -> Vec<ProcessRecord> {
    output
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_line(line, layout))
        .collect()
}
