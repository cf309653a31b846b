use super::write_json;
use clap::Args;
use seatforge::api::{spawn_search, SearchRequest};
use seatforge::error::{SeatError, SfResult};
use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// SearchRequest JSON
    #[arg(short, long)]
    pub input: PathBuf,

    /// Where to write the SearchResponse JSON (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Status polling interval in milliseconds
    #[arg(long, default_value_t = 500)]
    pub poll_ms: u64,
}

pub fn run(args: &RequestArgs) -> SfResult<()> {
    let raw = fs::read_to_string(&args.input).map_err(|e| {
        SeatError::Config(format!(
            "Could not read request '{}': {}",
            args.input.display(),
            e
        ))
    })?;
    let request: SearchRequest = serde_json::from_str(&raw)?;

    let handle = spawn_search(request);
    let poll = Duration::from_millis(args.poll_ms.max(1));
    while !handle.is_finished() {
        thread::sleep(poll);
        let status = handle.status();
        info!(
            "iter {}/{} | best {} | {} ms",
            status.iteration,
            status.total_iterations,
            status
                .best_score
                .map_or_else(|| "-".to_string(), |s| format!("{:.3}", s)),
            status.elapsed_ms
        );
    }

    let response = handle.join()?;
    match &args.output {
        Some(path) => write_json(path, &response)?,
        None => println!("{}", serde_json::to_string_pretty(&response)?),
    }
    Ok(())
}
