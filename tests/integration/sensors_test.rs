use std::time::Duration;

use sysdash::core::system_monitor::{
    run_tick, DashboardState, RawSensorReading, RenderGate, SensorFilter, TemperatureFamily,
    TemperatureMode, TemperatureView,
};

use super::support::{sensor, FakeSensors, Script};

fn setup(
    mode: TemperatureMode,
    steps: Vec<Option<Vec<RawSensorReading>>>,
) -> (TemperatureFamily, RenderGate<DashboardState>) {
    let family = TemperatureFamily::new(
        Box::new(FakeSensors(Script::new(steps))),
        SensorFilter::new(mode),
        Duration::from_secs(5),
    );
    let gate = RenderGate::new(DashboardState {
        temperatures: TemperatureView::new(mode, 80),
        ..Default::default()
    });
    (family, gate)
}

#[test]
fn test_only_live_nonzero_inputs_are_published() {
    let (mut temps, gate) = setup(
        TemperatureMode::Celsius,
        vec![Some(vec![
            sensor("coretemp_core1_input", 62.4),
            sensor("coretemp_core0_input", 85.0),
            sensor("coretemp_core0_crit", 100.0),
            sensor("acpitz_input", 0.0),
            sensor("nvme_max", 70.0),
        ])],
    );

    assert!(run_tick(&mut temps, &gate));
    gate.read(|state| {
        let rows = &state.temperatures.rows;
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].label, "coretemp_core0");
        assert_eq!(rows[0].value, 85);
        assert!(rows[0].alert);
        assert_eq!(rows[0].display, " 85C");

        assert_eq!(rows[1].label, "coretemp_core1");
        assert_eq!(rows[1].value, 62);
        assert!(!rows[1].alert);
    });
}

#[test]
fn test_fahrenheit_mode_converts_values_and_threshold() {
    let (mut temps, gate) = setup(
        TemperatureMode::Fahrenheit,
        vec![Some(vec![sensor("gpu_input", 75.0), sensor("cpu_input", 81.0)])],
    );

    run_tick(&mut temps, &gate);
    gate.read(|state| {
        assert_eq!(state.temperatures.threshold(), 176);
        let rows = &state.temperatures.rows;
        assert_eq!(rows[0].label, "cpu");
        assert_eq!(rows[0].value, 177);
        assert!(rows[0].alert);
        assert_eq!(rows[0].display, "177F");
        assert_eq!(rows[1].value, 167);
        assert!(!rows[1].alert);
    });
}

#[test]
fn test_labels_persist_and_update_across_ticks() {
    let (mut temps, gate) = setup(
        TemperatureMode::Celsius,
        vec![
            Some(vec![sensor("a_input", 40.0), sensor("b_input", 50.0)]),
            Some(vec![sensor("a_input", 45.0)]),
        ],
    );

    run_tick(&mut temps, &gate);
    run_tick(&mut temps, &gate);

    let values: Vec<(String, i32)> = gate.read(|s| {
        s.temperatures
            .rows
            .iter()
            .map(|r| (r.label.clone(), r.value))
            .collect()
    });
    assert_eq!(
        values,
        vec![("a".to_string(), 45), ("b".to_string(), 50)]
    );
}

#[test]
fn test_source_failure_keeps_previous_rows() {
    let (mut temps, gate) = setup(
        TemperatureMode::Celsius,
        vec![Some(vec![sensor("cpu_input", 55.0)]), None],
    );

    run_tick(&mut temps, &gate);
    assert!(!run_tick(&mut temps, &gate));
    assert_eq!(gate.read(|s| s.temperatures.rows.len()), 1);
}
