//! Profiler command implementation

use anyhow::Result;
use tcgs_profiler::{Color, Profiler};

use crate::output;

pub fn run() -> Result<()> {
    let profiler = Profiler::global();
    let recording = profiler.scope("tcgs_probe", Color::Blue).is_recording();

    match profiler.backend_name() {
        "none" => output::warning("No profiling backend available; spans are no-ops"),
        name => output::success(&format!(
            "Profiling backend: {} (probe span {})",
            name,
            if recording { "recorded" } else { "skipped" }
        )),
    }
    Ok(())
}
