use std::thread;
use std::time::{Duration, Instant};

use sysdash::core::config::DashboardConfig;
use sysdash::core::system_monitor::{DashboardState, MetricsRuntime, Sources, Totals};

use super::support::{iface, proc, sensor, FakeNetwork, FakeProcesses, FakeSensors, Script};

fn fast_config() -> DashboardConfig {
    DashboardConfig {
        network_interval_ms: 20,
        process_interval_ms: 20,
        sensor_interval_ms: 50,
        ..Default::default()
    }
}

fn fake_sources() -> Sources {
    Sources {
        network: Box::new(FakeNetwork(Script::new(vec![
            Some(vec![iface("eth0", 1000, 500)]),
            Some(vec![iface("eth0", 1500, 900)]),
        ]))),
        processes: Box::new(FakeProcesses {
            script: Script::new(vec![Some(vec![
                proc(1, "a", 2.0, 1.0),
                proc(2, "a", 3.0, 1.0),
                proc(3, "b", 1.0, 1.0),
            ])]),
            cpus: 1,
        }),
        sensors: Box::new(FakeSensors(Script::new(vec![Some(vec![sensor(
            "cpu_input",
            60.0,
        )])]))),
    }
}

fn wait_for(runtime: &MetricsRuntime, check: impl Fn(&DashboardState) -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if runtime.gate.read(&check) {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    false
}

#[test]
fn test_all_families_publish_independently() {
    let runtime = MetricsRuntime::with_sources(&fast_config(), fake_sources()).unwrap();

    assert!(wait_for(&runtime, |s| s.network.recent.is_some()));
    assert!(wait_for(&runtime, |s| !s.processes.rows.is_empty()));
    assert!(wait_for(&runtime, |s| !s.temperatures.rows.is_empty()));

    runtime.gate.read(|state| {
        assert_eq!(state.network.totals, Totals::new(1500, 900));
        // The script repeats its last totals, so later deltas are 0
        assert!(state.network.history.recv.contains(&500));
        assert_eq!(state.processes.rows[0][1], "a");
        assert_eq!(state.temperatures.rows[0].value, 60);
    });

    runtime.shutdown();
}

#[test]
fn test_render_reads_see_consistent_process_view() {
    let runtime = MetricsRuntime::with_sources(&fast_config(), fake_sources()).unwrap();
    assert!(wait_for(&runtime, |s| !s.processes.rows.is_empty()));

    for _ in 0..200 {
        let state = runtime.gate.read_guard();
        assert_eq!(state.processes.rows.len(), state.processes.records().len());
        drop(state);
        thread::sleep(Duration::from_millis(1));
    }

    runtime.shutdown();
}

#[test]
fn test_initial_state_follows_config() {
    let config = DashboardConfig {
        group_processes: false,
        ..fast_config()
    };
    let state = sysdash::core::system_monitor::initial_state(&config);
    assert!(!state.processes.is_grouped());
    assert_eq!(state.processes.header[0], "PID");
    assert!(state.network.history.is_empty());
}
