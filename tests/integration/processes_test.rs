use std::time::Duration;

use sysdash::core::system_monitor::{
    parse_listing, run_tick, ColumnLayout, DashboardState, ProcessFamily, ProcessRecord,
    ProcessView, RenderGate, SortKey, TerminateTarget,
};

use super::support::{proc, FakeProcesses, Script};

fn family(steps: Vec<Option<Vec<ProcessRecord>>>, cpus: usize) -> ProcessFamily {
    ProcessFamily::new(
        Box::new(FakeProcesses {
            script: Script::new(steps),
            cpus,
        }),
        Duration::from_secs(1),
    )
}

fn gate_with(view: ProcessView) -> RenderGate<DashboardState> {
    RenderGate::new(DashboardState {
        processes: view,
        ..Default::default()
    })
}

#[test]
fn test_grouped_scenario_sorted_by_cpu() {
    let gate = gate_with(ProcessView::new(SortKey::Cpu, true));
    let mut procs = family(
        vec![Some(vec![
            proc(100, "b", 1.0, 0.0),
            proc(101, "a", 2.0, 0.0),
            proc(102, "a", 3.0, 0.0),
        ])],
        1,
    );

    assert!(run_tick(&mut procs, &gate));
    gate.read(|state| {
        let records = state.processes.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].command_name, "a");
        assert_eq!(records[0].pid, 2);
        assert_eq!(records[0].cpu_percent, 5.0);
        assert_eq!(records[1].command_name, "b");
        assert_eq!(records[1].pid, 1);
        assert_eq!(records[1].cpu_percent, 1.0);

        assert_eq!(state.processes.header, vec!["Count", "Command", "CPU%▼", "Mem%"]);
        assert_eq!(state.processes.rows[0], vec!["2", "a", " 5.0", " 0.0"]);
    });
}

#[test]
fn test_cpu_is_normalized_by_core_count() {
    let gate = gate_with(ProcessView::new(SortKey::Cpu, false));
    let mut procs = family(vec![Some(vec![proc(1, "busy", 200.0, 1.0)])], 4);

    run_tick(&mut procs, &gate);
    gate.read(|state| {
        assert_eq!(state.processes.records()[0].cpu_percent, 50.0);
    });
}

#[test]
fn test_toggle_grouping_flips_pid_direction() {
    let gate = gate_with(ProcessView::new(SortKey::Pid, false));
    let mut procs = family(
        vec![Some(vec![
            proc(30, "solo", 0.0, 0.0),
            proc(10, "pair", 0.0, 0.0),
            proc(20, "pair", 0.0, 0.0),
            proc(5, "trio", 0.0, 0.0),
            proc(6, "trio", 0.0, 0.0),
            proc(7, "trio", 0.0, 0.0),
        ])],
        1,
    );
    run_tick(&mut procs, &gate);

    let pids: Vec<u32> = gate.read(|s| s.processes.records().iter().map(|r| r.pid).collect());
    assert_eq!(pids, vec![5, 6, 7, 10, 20, 30]);

    gate.write(|s| s.processes.toggle_grouped());
    gate.read(|state| {
        let names: Vec<&str> = state
            .processes
            .records()
            .iter()
            .map(|r| r.command_name.as_str())
            .collect();
        assert_eq!(names, vec!["trio", "pair", "solo"]);
        assert_eq!(state.processes.header[0], "Count▼");
        assert_eq!(state.processes.unique_col, 1);
    });

    gate.write(|s| s.processes.toggle_grouped());
    gate.read(|state| {
        assert_eq!(state.processes.records()[0].pid, 5);
        assert_eq!(state.processes.header[0], "PID▼");
        assert_eq!(state.processes.unique_col, 0);
    });
}

#[test]
fn test_refresh_keeps_selected_sort_key() {
    let gate = gate_with(ProcessView::new(SortKey::Cpu, false));
    let mut procs = family(
        vec![
            Some(vec![proc(1, "a", 1.0, 9.0), proc(2, "b", 5.0, 1.0)]),
            Some(vec![
                proc(1, "a", 1.0, 9.0),
                proc(2, "b", 5.0, 1.0),
                proc(3, "c", 0.0, 5.0),
            ]),
        ],
        1,
    );

    run_tick(&mut procs, &gate);
    gate.write(|s| s.processes.set_sort_key(SortKey::Memory));
    run_tick(&mut procs, &gate);

    let pids: Vec<u32> = gate.read(|s| s.processes.records().iter().map(|r| r.pid).collect());
    assert_eq!(pids, vec![1, 3, 2]);
}

#[test]
fn test_repeated_refresh_with_ties_is_stable() {
    let snapshot = vec![
        proc(1, "a", 1.0, 0.0),
        proc(2, "b", 1.0, 0.0),
        proc(3, "c", 1.0, 0.0),
    ];
    let gate = gate_with(ProcessView::new(SortKey::Cpu, false));
    let mut procs = family(vec![Some(snapshot.clone()), Some(snapshot)], 1);

    run_tick(&mut procs, &gate);
    let first = gate.read(|s| s.processes.rows.clone());
    run_tick(&mut procs, &gate);
    assert_eq!(gate.read(|s| s.processes.rows.clone()), first);
}

#[test]
fn test_source_failure_keeps_previous_table() {
    let gate = gate_with(ProcessView::new(SortKey::Cpu, true));
    let mut procs = family(vec![Some(vec![proc(1, "init", 0.1, 0.1)]), None], 1);

    run_tick(&mut procs, &gate);
    assert!(!run_tick(&mut procs, &gate));
    assert_eq!(gate.read(|s| s.processes.rows.len()), 1);
}

#[test]
fn test_kill_target_from_published_row() {
    let gate = gate_with(ProcessView::new(SortKey::Cpu, true));
    let mut procs = family(vec![Some(vec![proc(42, "nginx", 3.0, 0.0)])], 1);
    run_tick(&mut procs, &gate);

    assert_eq!(
        gate.read(|s| s.processes.kill_target(0)),
        Some(TerminateTarget::Name("nginx".to_string()))
    );
}

#[test]
fn test_ps_listing_feeds_grouping() {
    let layout = ColumnLayout::default();
    let line = |pid: &str, comm: &str, cpu: &str, mem: &str, args: &str| {
        format!("{:>10} {:<50} {:>5} {:>5} {}", pid, comm, cpu, mem, args)
    };
    let listing = [
        line("PID", "COMMAND", "%CPU", "%MEM", "COMMAND"),
        line("1", "systemd", "0.1", "0.3", "/sbin/init"),
        line("200", "bash", "1.0", "0.1", "-bash"),
        line("201", "bash", "oops", "0.1", "-bash"),
        String::new(),
    ]
    .join("\n");

    let records = parse_listing(&listing, &layout);
    assert_eq!(records.len(), 3);
    assert_eq!(records[2].cpu_percent, 0.0);

    let mut view = ProcessView::new(SortKey::Pid, true);
    view.replace(records);
    assert_eq!(view.records()[0].command_name, "bash");
    assert_eq!(view.records()[0].pid, 2);
}

#[test]
fn test_ps_listing_with_nan_columns_sorts_cleanly() {
    let layout = ColumnLayout::default();
    let mut lines = vec![format!(
        "{:>10} {:<50} {:>5} {:>5} {}",
        "PID", "COMMAND", "%CPU", "%MEM", "COMMAND"
    )];
    for pid in 1..=40 {
        let cpu = if pid % 3 == 0 { "nan".to_string() } else { format!("{}.0", pid % 7) };
        lines.push(format!(
            "{:>10} {:<50} {:>5} {:>5} {}",
            pid,
            format!("worker{}", pid % 5),
            cpu,
            "0.1",
            "worker --loop"
        ));
    }
    let records = parse_listing(&lines.join("\n"), &layout);
    assert_eq!(records.len(), 40);
    assert!(records.iter().all(|r| r.cpu_percent.is_finite()));
    assert_eq!(records[2].cpu_percent, 0.0);

    let mut view = ProcessView::new(SortKey::Cpu, false);
    view.replace(records);
    assert_eq!(view.records().len(), 40);

    view.toggle_grouped();
    assert_eq!(view.records().len(), 5);
}
