use anyhow::Result;

use sysdash::commands::monitor::build_cli;

fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    sysdash::commands::monitor(&matches)
}
