// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # wayfare
//!
//! Command line front end: loads a flight file and an alliance file, solves
//! the work-hard and play-hard propositions and writes one report file for
//! each.
//!
//! ```text
//! wayfare --from Paris --to Boston \
//!     --departure-time-min 01102020000000 --departure-time-max 01112020000000 \
//!     --arrival-time-min 01142020000000 --arrival-time-max 01152020000000 \
//!     --max-layover 21600 --vacation-time-min 86400 --vacation-time-max 259200 \
//!     --vacation-airports Rome Oslo \
//!     --flights flights.txt --alliances alliances.txt \
//!     --work-hard-file work_hard.txt --play-hard-file play_hard.txt
//! ```
//!
//! Log output goes to stderr; `RUST_LOG` overrides the default filter.

use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use wayfare_model::alliance::AllianceIndex;
use wayfare_model::error::ModelError;
use wayfare_model::graph::FlightGraph;
use wayfare_model::loading::{FlightLoader, load_alliances};
use wayfare_model::time::{Timestamp, decode_timestamp};
use wayfare_solver::error::SolverError;
use wayfare_solver::parameters::{Parameters, ParametersBuilder};
use wayfare_solver::report::{write_play_hard, write_work_hard};
use wayfare_solver::solution::Solution;
use wayfare_solver::solver::{Solver, SolverBuilder};

#[derive(Parser, Debug)]
#[command(author, version, about = "Cheapest work-hard and play-hard itineraries", long_about = None)]
pub struct Args {
    #[arg(long, help = "home city")]
    from: String,
    #[arg(long, help = "conference city")]
    to: String,
    #[arg(long, value_parser = parse_timestamp, help = "earliest take-off towards the conference (MMDDYYYYhhmmss)")]
    departure_time_min: Timestamp,
    #[arg(long, value_parser = parse_timestamp, help = "latest landing at the conference (MMDDYYYYhhmmss)")]
    departure_time_max: Timestamp,
    #[arg(long, value_parser = parse_timestamp, help = "earliest take-off from the conference (MMDDYYYYhhmmss)")]
    arrival_time_min: Timestamp,
    #[arg(long, value_parser = parse_timestamp, help = "latest landing after the conference (MMDDYYYYhhmmss)")]
    arrival_time_max: Timestamp,
    #[arg(long, help = "longest wait between two flights, in seconds")]
    max_layover: i64,
    #[arg(long, default_value_t = 0, help = "shortest vacation, in seconds")]
    vacation_time_min: i64,
    #[arg(long, default_value_t = 0, help = "longest vacation, in seconds")]
    vacation_time_max: i64,
    #[arg(long, num_args = 1.., help = "side-trip cities for the play-hard propositions")]
    vacation_airports: Vec<String>,
    #[arg(long, help = "path to the flight file")]
    flights: PathBuf,
    #[arg(long, help = "path to the alliance file")]
    alliances: Option<PathBuf>,
    #[arg(long, default_value = "work_hard.txt", help = "output path of the work-hard report")]
    work_hard_file: PathBuf,
    #[arg(long, default_value = "play_hard.txt", help = "output path of the play-hard report")]
    play_hard_file: PathBuf,
    #[arg(long, help = "worker threads (defaults to the number of cores)")]
    nb_threads: Option<usize>,
    #[arg(long, help = "keep every in-window itinerary of every leg")]
    exhaustive: bool,
    #[arg(long, help = "skip malformed flight lines instead of failing")]
    lenient: bool,
    #[arg(long, value_name = "LEVELS", help = "log leg search progress every LEVELS levels (1 with --verbose)")]
    progress_interval: Option<u64>,
    #[arg(long, short, help = "log at debug level unless RUST_LOG is set")]
    verbose: bool,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Solver(#[from] SolverError),
    #[error("failed to write {path}: {source}")]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn parse_timestamp(text: &str) -> Result<Timestamp, String> {
    decode_timestamp(text).map_err(|e| e.to_string())
}

impl Args {
    fn parameters(&self) -> Result<Parameters, SolverError> {
        let mut builder = ParametersBuilder::new(&self.from, &self.to)
            .departure_window(self.departure_time_min, self.departure_time_max)
            .arrival_window(self.arrival_time_min, self.arrival_time_max)
            .max_layover(self.max_layover)
            .vacation(self.vacation_time_min, self.vacation_time_max)
            .side_trips(self.vacation_airports.iter().cloned());
        if let Some(threads) = self.nb_threads {
            builder = builder.workers(threads);
        }
        builder.build()
    }

    fn solver(&self) -> Solver {
        let mut builder = SolverBuilder::new().with_pruning(!self.exhaustive);
        if let Some(levels) = self.progress_interval.or(self.verbose.then_some(1)) {
            builder = builder.with_progress_logging(levels);
        }
        builder.build()
    }
}

fn write_report<F>(path: &Path, render: F) -> Result<(), CliError>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let output = |source| CliError::Output {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(output)?;
    let mut out = BufWriter::new(file);
    render(&mut out).map_err(output)?;
    out.flush().map_err(output)
}

fn write_reports(args: &Args, graph: &FlightGraph, solution: &Solution<'_>) -> Result<(), CliError> {
    write_report(&args.work_hard_file, |out| write_work_hard(out, graph, solution))?;
    write_report(&args.play_hard_file, |out| write_play_hard(out, graph, solution))?;
    log::info!(
        "reports written to {} and {}",
        args.work_hard_file.display(),
        args.play_hard_file.display()
    );
    Ok(())
}

pub fn run(args: &Args) -> Result<(), CliError> {
    let parameters = args.parameters()?;
    log::debug!("{parameters}");

    let graph = FlightLoader::new()
        .lenient(args.lenient)
        .from_path(&args.flights)?;
    log::info!("loaded {graph} from {}", args.flights.display());

    let groups = match &args.alliances {
        Some(path) => load_alliances(path)?,
        None => Vec::new(),
    };
    let alliances = AllianceIndex::from_names(&graph, &groups);
    log::info!("{alliances}");

    let outcome = args.solver().solve(&graph, &alliances, &parameters)?;
    log::info!("{}", outcome.solution());
    log::debug!("{}", outcome.statistics());

    write_reports(args, &graph, outcome.solution())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("wayfare failed: {e}");
            ExitCode::FAILURE
        }
    }
}
