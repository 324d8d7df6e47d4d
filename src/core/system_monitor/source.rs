//! OS-metrics sources.
//!
//! Each metric family owns one source. Tests implement the traits to script
//! the data a family sees.

use std::process::Command;

use sysinfo::{
    Components, CpuRefreshKind, MemoryRefreshKind, Networks, ProcessRefreshKind,
    ProcessesToUpdate, RefreshKind, System, UpdateKind,
};

use super::metrics::{InterfaceCounters, ProcessRecord, RawSensorReading, LIVE_INPUT_SUFFIX};
use super::ps_parser::{parse_listing, ColumnLayout};
use crate::error::{DashError, Result};

pub trait NetworkSource: Send {
    /// Cumulative byte counters per interface
    fn interface_counters(&mut self) -> Result<Vec<InterfaceCounters>>;
}

pub trait ProcessSource: Send {
    /// Current process table. CPU% is per core (100 = one fully busy core).
    fn processes(&mut self) -> Result<Vec<ProcessRecord>>;

    /// Logical CPU count
    fn cpu_count(&self) -> usize;
}

pub trait SensorSource: Send {
    fn sensor_readings(&mut self) -> Result<Vec<RawSensorReading>>;
}

fn logical_cpu_count() -> usize {
    let system =
        System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing()));
    system.cpus().len().max(1)
}

// ---------------------------------------------------------------------------
// sysinfo-backed sources
// ---------------------------------------------------------------------------

pub struct SysinfoNetworkSource {
    networks: Networks,
}

impl SysinfoNetworkSource {
    pub fn new() -> Self {
        Self {
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl Default for SysinfoNetworkSource {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkSource for SysinfoNetworkSource {
    fn interface_counters(&mut self) -> Result<Vec<InterfaceCounters>> {
        self.networks.refresh(true);

        Ok(self
            .networks
            .iter()
            .map(|(name, data)| InterfaceCounters {
                name: name.to_string(),
                bytes_recv: data.total_received(),
                bytes_sent: data.total_transmitted(),
            })
            .collect())
    }
}

pub struct SysinfoProcessSource {
    system: System,
    cpu_count: usize,
}

impl SysinfoProcessSource {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::nothing())
            .with_memory(MemoryRefreshKind::nothing().with_ram());

        let system = System::new_with_specifics(refresh_kind);
        let cpu_count = system.cpus().len().max(1);

        Self { system, cpu_count }
    }
}

impl Default for SysinfoProcessSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSource for SysinfoProcessSource {
    fn processes(&mut self) -> Result<Vec<ProcessRecord>> {
        self.system
            .refresh_memory_specifics(MemoryRefreshKind::nothing().with_ram());
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing()
                .with_cpu()
                .with_memory()
                .with_cmd(UpdateKind::OnlyIfNotSet),
        );

        let total_memory = self.system.total_memory();
        if total_memory == 0 {
            return Err(DashError::metric_collection("total memory reported as 0"));
        }

        Ok(self
            .system
            .processes()
            .values()
            .map(|proc| {
                let command_name = proc.name().to_string_lossy().to_string();
                let args: Vec<String> = proc
                    .cmd()
                    .iter()
                    .map(|arg| arg.to_string_lossy().to_string())
                    .collect();
                let full_command = if args.is_empty() {
                    format!("[{}]", command_name)
                } else {
                    args.join(" ")
                };

                ProcessRecord {
                    pid: proc.pid().as_u32(),
                    command_name,
                    full_command,
                    cpu_percent: proc.cpu_usage() as f64,
                    mem_percent: proc.memory() as f64 / total_memory as f64 * 100.0,
                }
            })
            .collect())
    }

    fn cpu_count(&self) -> usize {
        self.cpu_count
    }
}

pub struct SysinfoSensorSource {
    components: Components,
}

impl SysinfoSensorSource {
    pub fn new() -> Self {
        Self {
            components: Components::new_with_refreshed_list(),
        }
    }
}

impl Default for SysinfoSensorSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSource for SysinfoSensorSource {
    /// sysinfo exposes one component per sensor; it is expanded into the
    /// `<label>_input` / `_max` / `_crit` key scheme the sensor filter expects.
    fn sensor_readings(&mut self) -> Result<Vec<RawSensorReading>> {
        self.components.refresh(true);

        let mut readings = Vec::new();
        for component in self.components.iter() {
            let label = component.label().trim().replace(' ', "_");
            if let Some(temperature) = component.temperature() {
                readings.push(RawSensorReading {
                    key: format!("{}{}", label, LIVE_INPUT_SUFFIX),
                    temperature,
                });
            }
            if let Some(max) = component.max() {
                readings.push(RawSensorReading {
                    key: format!("{}_max", label),
                    temperature: max,
                });
            }
            if let Some(critical) = component.critical() {
                readings.push(RawSensorReading {
                    key: format!("{}_crit", label),
                    temperature: critical,
                });
            }
        }

        Ok(readings)
    }
}

// ---------------------------------------------------------------------------
// ps-backed process source
// ---------------------------------------------------------------------------

/// Process source that shells out to `ps` and parses its fixed-column output
pub struct PsProcessSource {
    layout: ColumnLayout,
    cpu_count: usize,
}

impl PsProcessSource {
    pub fn new(layout: ColumnLayout) -> Result<Self> {
        layout.validate()?;
        Ok(Self {
            layout,
            cpu_count: logical_cpu_count(),
        })
    }
}

impl ProcessSource for PsProcessSource {
    fn processes(&mut self) -> Result<Vec<ProcessRecord>> {
        let output = Command::new("ps")
            .arg("-axo")
            .arg(self.layout.ps_format())
            .output()?;

        if !output.status.success() {
            return Err(DashError::process_listing(format!(
                "ps exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(parse_listing(
            &String::from_utf8_lossy(&output.stdout),
            &self.layout,
        ))
    }

    fn cpu_count(&self) -> usize {
        self.cpu_count
    }
}
