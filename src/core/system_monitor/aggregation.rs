//! Process grouping and sorting.
//!
//! Groups a flat process list by command name and orders either view by a
//! selectable key.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::metrics::{ProcessRecord, SortKey};

/// Scale per-core CPU percentages to a share of total system capacity.
pub fn normalize_cpu(records: &mut [ProcessRecord], cpu_count: usize) {
    let divisor = cpu_count.max(1) as f64;
    for record in records.iter_mut() {
        record.cpu_percent /= divisor;
    }
}

/// Group records by command name.
///
/// Each output record carries the member count in `pid` and the summed CPU and
/// memory usage. Groups appear in the order their command was first seen.
pub fn group_by_command(records: &[ProcessRecord]) -> Vec<ProcessRecord> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<ProcessRecord> = Vec::new();

    for record in records {
        match index.get(record.command_name.as_str()) {
            Some(&i) => {
                let group = &mut groups[i];
                group.pid += 1;
                group.cpu_percent += record.cpu_percent;
                group.mem_percent += record.mem_percent;
            }
            None => {
                index.insert(record.command_name.as_str(), groups.len());
                groups.push(ProcessRecord {
                    pid: 1,
                    command_name: record.command_name.clone(),
                    full_command: String::new(),
                    cpu_percent: record.cpu_percent,
                    mem_percent: record.mem_percent,
                });
            }
        }
    }

    groups
}

// Total order; a NaN sorts above every number
fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Stable sort by `key`. Equal keys keep their input order.
pub fn sort_records(records: &mut [ProcessRecord], key: SortKey, grouped: bool) {
    match key {
        SortKey::Cpu => records.sort_by(|a, b| descending(a.cpu_percent, b.cpu_percent)),
        SortKey::Memory => records.sort_by(|a, b| descending(a.mem_percent, b.mem_percent)),
        SortKey::Pid if grouped => records.sort_by(|a, b| b.pid.cmp(&a.pid)),
        SortKey::Pid => records.sort_by(|a, b| a.pid.cmp(&b.pid)),
    }
}
