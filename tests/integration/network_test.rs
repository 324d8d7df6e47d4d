use std::time::Duration;

use sysdash::core::system_monitor::{
    run_tick, DashboardState, InterfaceCounters, NetworkFamily, RenderGate, Totals,
};

use super::support::{iface, FakeNetwork, Script};

fn family(steps: Vec<Option<Vec<InterfaceCounters>>>) -> NetworkFamily {
    NetworkFamily::new(
        Box::new(FakeNetwork(Script::new(steps))),
        vec!["tun0".to_string()],
        Duration::from_secs(1),
    )
}

#[test]
fn test_two_samples_publish_recent_delta() {
    let gate = RenderGate::new(DashboardState::default());
    let mut net = family(vec![
        Some(vec![iface("eth0", 1000, 500)]),
        Some(vec![iface("eth0", 1500, 900)]),
    ]);

    assert!(run_tick(&mut net, &gate));
    gate.read(|state| {
        assert_eq!(state.network.recent, None);
        assert!(state.network.history.is_empty());
        assert_eq!(state.network.totals, Totals::new(1000, 500));
    });

    assert!(run_tick(&mut net, &gate));
    gate.read(|state| {
        assert_eq!(state.network.recent, Some(Totals::new(500, 400)));
        assert_eq!(state.network.history.recv_tail(1), vec![500]);
        assert_eq!(state.network.history.sent_tail(1), vec![400]);
        assert_eq!(state.network.recv_total_title, " Total RX:   1.5 KB");
        assert_eq!(state.network.sent_total_title, " Total TX: 900.0 B");
        assert_eq!(state.network.recv_rate_title, " RX/s:     500.0  B/s");
        assert_eq!(state.network.sent_rate_title, " TX/s:     400.0  B/s");
    });
}

#[test]
fn test_counter_reset_publishes_zero_then_recovers() {
    let gate = RenderGate::new(DashboardState::default());
    let mut net = family(vec![
        Some(vec![iface("eth0", 50_000, 20_000)]),
        Some(vec![iface("eth0", 100, 20_500)]),
        Some(vec![iface("eth0", 400, 21_000)]),
    ]);

    run_tick(&mut net, &gate);
    run_tick(&mut net, &gate);
    assert_eq!(
        gate.read(|s| s.network.recent),
        Some(Totals::new(0, 500))
    );

    run_tick(&mut net, &gate);
    assert_eq!(
        gate.read(|s| s.network.recent),
        Some(Totals::new(300, 500))
    );
}

#[test]
fn test_published_delta_is_never_negative() {
    let totals = [10u64, 5, 5, 9000, 3, 3, 400, 0, 12];
    let gate = RenderGate::new(DashboardState::default());
    let mut net = family(
        totals
            .iter()
            .map(|&t| Some(vec![iface("eth0", t, t / 2)]))
            .collect(),
    );

    for _ in &totals {
        run_tick(&mut net, &gate);
    }

    gate.read(|state| {
        assert_eq!(state.network.history.len(), totals.len() - 1);
        for (i, &recv) in state.network.history.recv.iter().enumerate() {
            let expected = totals[i + 1].saturating_sub(totals[i]);
            assert_eq!(recv, expected);
        }
    });
}

#[test]
fn test_excluded_interface_is_not_counted() {
    let gate = RenderGate::new(DashboardState::default());
    let mut net = family(vec![Some(vec![
        iface("eth0", 100, 10),
        iface("tun0", 1_000_000, 1_000_000),
    ])]);

    run_tick(&mut net, &gate);
    assert_eq!(gate.read(|s| s.network.totals), Totals::new(100, 10));
}

#[test]
fn test_source_failure_keeps_previous_state() {
    let gate = RenderGate::new(DashboardState::default());
    let mut net = family(vec![
        Some(vec![iface("eth0", 1000, 500)]),
        Some(vec![iface("eth0", 1500, 900)]),
        None,
    ]);

    run_tick(&mut net, &gate);
    run_tick(&mut net, &gate);
    let before = gate.read(|s| s.network.recv_rate_title.clone());

    assert!(!run_tick(&mut net, &gate));
    gate.read(|state| {
        assert_eq!(state.network.recv_rate_title, before);
        assert_eq!(state.network.recent, Some(Totals::new(500, 400)));
        assert_eq!(state.network.history.len(), 1);
    });
}

#[test]
fn test_rate_is_scaled_to_interval() {
    let gate = RenderGate::new(DashboardState::default());
    let mut net = NetworkFamily::new(
        Box::new(FakeNetwork(Script::new(vec![
            Some(vec![iface("eth0", 0, 0)]),
            Some(vec![iface("eth0", 4000, 2000)]),
        ]))),
        Vec::new(),
        Duration::from_secs(2),
    );

    run_tick(&mut net, &gate);
    run_tick(&mut net, &gate);
    assert_eq!(gate.read(|s| s.network.recent), Some(Totals::new(2000, 1000)));
}
