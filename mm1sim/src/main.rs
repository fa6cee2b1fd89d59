//! Single-server queueing simulation application.
#![warn(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::default_trait_access)]

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use eyre::WrapErr;
use structopt::StructOpt;

use mm1sim::{Config, OutputFormat, Simulation};

/// Runs a single-server queueing simulation.
#[derive(StructOpt)]
struct Opt {
    /// Path to the input file.
    ///
    /// If its extension is `.json`, it is parsed as a JSON configuration.
    /// Otherwise, it must contain a single line with the mean interarrival time,
    /// the mean service time, and the number of customers to delay.
    #[structopt(long, default_value = "mm1.in")]
    input: PathBuf,

    /// Write the report to this file instead of the standard output.
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// Report format: `text` or `json`.
    #[structopt(short, long, default_value = "text")]
    format: OutputFormat,

    /// Random seed; overrides the seed in the input file.
    #[structopt(long)]
    seed: Option<u64>,

    /// Maximum number of customers in queue; overrides the input file.
    #[structopt(long)]
    queue_capacity: Option<usize>,

    /// Verbosity.
    #[structopt(short, long, parse(from_occurrences))]
    verbose: i32,

    /// Store the logs this file.
    #[structopt(long)]
    log_output: Option<PathBuf>,

    /// Do not log to the stderr.
    #[structopt(long)]
    no_stderr: bool,
}

impl Opt {
    /// Reads the configuration from the input file and applies command line overrides.
    fn config(&self) -> eyre::Result<Config> {
        let mut config = read_config(&self.input)?;
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(capacity) = self.queue_capacity {
            config.queue_capacity = capacity;
        }
        config
            .validate()
            .wrap_err_with(|| format!("rejected input: `{}`", self.input.display()))?;
        Ok(config)
    }
}

/// Reads configuration from `file_path`.
///
/// If the file's extension is `.json`, then it will treat it as a JSON file.
/// Otherwise, it will be treated as the plain input format; see [`Config::from_input`].
fn read_config(file_path: &Path) -> eyre::Result<Config> {
    let file = File::open(file_path)
        .wrap_err_with(|| format!("unable to open input file: {}", file_path.display()))?;
    if file_path.extension().map_or(false, |e| e == "json") {
        Config::from_json(file).wrap_err("unable to parse JSON configuration")
    } else {
        Config::from_input(file).wrap_err("unable to parse input file")
    }
}

/// Set up a logger based on the given user options.
fn set_up_logger(opt: &Opt) -> Result<(), fern::InitError> {
    let log_level = match opt.verbose {
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        3 => log::LevelFilter::Trace,
        _ => log::LevelFilter::Warn,
    };
    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("[{}] {}", record.level(), message)))
        .level(log_level);
    let dispatch = if let Some(path) = &opt.log_output {
        let _ = std::fs::remove_file(path);
        dispatch.chain(
            std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .append(false)
                .open(path)?,
        )
    } else {
        dispatch
    };
    let dispatch = if opt.no_stderr {
        dispatch
    } else {
        dispatch.chain(std::io::stderr())
    };
    dispatch.apply()?;
    Ok(())
}

fn run(opt: &Opt) -> eyre::Result<()> {
    let config = opt.config()?;
    let report = Simulation::seeded(&config)?.run()?;
    let writer: Box<dyn Write> = match &opt.output {
        Some(path) => Box::new(
            File::create(path)
                .wrap_err_with(|| format!("unable to create output file: {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    let mut writer = BufWriter::new(writer);
    report
        .write(opt.format, &mut writer)
        .wrap_err("unable to write report")?;
    writer.flush()?;
    Ok(())
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let opt = Opt::from_args();
    set_up_logger(&opt)?;
    run(&opt)
}
