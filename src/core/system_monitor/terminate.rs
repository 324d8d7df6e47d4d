//! Process termination for the selected table row.
//!
//! Fire-and-forget: failures are logged and the next process sample shows
//! whatever actually happened.

use std::process::Command;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TerminateTarget {
    /// A single process (ungrouped view)
    Pid(u32),
    /// Every process whose name matches exactly (grouped view)
    Name(String),
}

impl TerminateTarget {
    /// The OS command that terminates this target
    pub fn command(&self) -> Command {
        match self {
            TerminateTarget::Pid(pid) => {
                let mut cmd = Command::new("kill");
                cmd.arg(pid.to_string());
                cmd
            }
            TerminateTarget::Name(name) => {
                let mut cmd = Command::new("pkill");
                cmd.arg("-x").arg(name);
                cmd
            }
        }
    }
}

/// Ask the OS to terminate `target`.
pub fn terminate(target: &TerminateTarget) {
    log::info!("Terminating {:?}", target);

    match target.command().status() {
        Ok(status) if status.success() => {}
        Ok(status) => log::warn!("Terminating {:?} exited with {}", target, status),
        Err(e) => log::warn!("Failed to run terminate command for {:?}: {}", target, e),
    }
}
