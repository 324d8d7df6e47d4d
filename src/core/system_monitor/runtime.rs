//! Tokio runtime and scheduler for the sampling tasks.
//!
//! Owns the render gate and spawns one periodic task per metric family.

use tokio::sync::broadcast;

use super::gate::RenderGate;
use super::sensors::SensorFilter;
use super::source::{
    NetworkSource, ProcessSource, PsProcessSource, SensorSource, SysinfoNetworkSource,
    SysinfoProcessSource, SysinfoSensorSource,
};
use super::tasks::{periodic_task, NetworkFamily, ProcessFamily, TemperatureFamily};
use super::views::{DashboardState, NetworkView, ProcessView, TemperatureView};
use crate::core::config::{DashboardConfig, ProcessBackend};

/// One source per metric family
pub struct Sources {
    pub network: Box<dyn NetworkSource>,
    pub processes: Box<dyn ProcessSource>,
    pub sensors: Box<dyn SensorSource>,
}

impl Sources {
    /// OS-backed sources selected by `config`
    pub fn from_config(config: &DashboardConfig) -> crate::Result<Self> {
        let processes: Box<dyn ProcessSource> = match config.process_backend {
            ProcessBackend::Sysinfo => Box::new(SysinfoProcessSource::new()),
            ProcessBackend::Ps => Box::new(PsProcessSource::new(config.ps_layout)?),
        };

        Ok(Self {
            network: Box::new(SysinfoNetworkSource::new()),
            processes,
            sensors: Box::new(SysinfoSensorSource::new()),
        })
    }
}

/// Initial published state for `config`
pub fn initial_state(config: &DashboardConfig) -> DashboardState {
    DashboardState {
        network: NetworkView::with_history(config.history_size),
        processes: ProcessView::new(config.sort_key, config.group_processes),
        temperatures: TemperatureView::new(config.temperature_mode, config.temp_threshold_celsius),
    }
}

/// Wrapper around the Tokio runtime for metrics collection.
pub struct MetricsRuntime {
    /// Published state shared with the renderer
    pub gate: RenderGate<DashboardState>,

    /// Shutdown signal sender
    shutdown_tx: broadcast::Sender<()>,

    /// Handle to the runtime (for shutdown)
    runtime: tokio::runtime::Runtime,
}

impl MetricsRuntime {
    /// Start sampling with OS-backed sources.
    pub fn new(config: &DashboardConfig) -> anyhow::Result<Self> {
        let sources = Sources::from_config(config)?;
        Self::with_sources(config, sources)
    }

    /// Start sampling with the given sources.
    pub fn with_sources(config: &DashboardConfig, sources: Sources) -> anyhow::Result<Self> {
        log::info!("Initializing MetricsRuntime");

        // One worker per family so a stalled source only stalls its own cadence
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(3)
            .enable_time()
            .thread_name("metrics-worker")
            .build()?;

        let gate = RenderGate::new(initial_state(config));
        let (shutdown_tx, _) = broadcast::channel::<()>(1);

        runtime.spawn(periodic_task(
            NetworkFamily::new(
                sources.network,
                config.excluded_interfaces.clone(),
                config.network_interval(),
            ),
            gate.clone(),
            shutdown_tx.subscribe(),
        ));

        runtime.spawn(periodic_task(
            ProcessFamily::new(sources.processes, config.process_interval()),
            gate.clone(),
            shutdown_tx.subscribe(),
        ));

        runtime.spawn(periodic_task(
            TemperatureFamily::new(
                sources.sensors,
                SensorFilter::new(config.temperature_mode),
                config.sensor_interval(),
            ),
            gate.clone(),
            shutdown_tx.subscribe(),
        ));

        log::info!("MetricsRuntime initialized successfully");

        Ok(Self {
            gate,
            shutdown_tx,
            runtime,
        })
    }

    /// Stop every sampling task and wait briefly for them to exit.
    pub fn shutdown(self) {
        log::info!("Shutting down MetricsRuntime");
        // send() only fails if every task already exited
        let _ = self.shutdown_tx.send(());
        self.runtime
            .shutdown_timeout(std::time::Duration::from_millis(500));
    }
}
