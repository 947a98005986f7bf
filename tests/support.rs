use std::ffi::OsStr;
use std::fmt::Write as _;
use std::path::Path;
use std::process::{Command, Output};

/// Run the `ratechart` binary from `dir` and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_ratechart<I, S>(dir: &Path, args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = ratechart_bin()?;
    Command::new(bin)
        .current_dir(dir)
        .args(args)
        .env("RUST_LOG", "error")
        .env_remove("RATECHART_LOG")
        .output()
        .map_err(|err| format!("run ratechart failed: {}", err))
}

fn ratechart_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_ratechart").map_or_else(
        || Err("CARGO_BIN_EXE_ratechart missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}

/// CSV with a CPU counter family and a network counter family, one row per
/// sample, times in nanoseconds since the epoch.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn metrics_csv(ticks: i64) -> Result<String, String> {
    let mut content = String::from("time,name,label,value\n");
    for tick in 0..ticks {
        let nanos = tick.saturating_mul(1_000_000_000);
        for (state, per_tick) in [("user", 30.0), ("system", 10.0), ("idle", 60.0)] {
            writeln!(content, "{},cpu_all,{},{}", nanos, state, per_tick * tick as f64)
                .map_err(|err| format!("format failed: {}", err))?;
        }
        writeln!(content, "{},network_rx,eth0,{}", nanos, 2e6 * tick as f64)
            .map_err(|err| format!("format failed: {}", err))?;
    }
    Ok(content)
}

pub fn describe(output: &Output) -> String {
    format!(
        "status: {}\nstdout: {}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}
