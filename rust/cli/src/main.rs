//! Prints how many operations per sample each way of filtering a template bank costs.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use flopbudget_cli::bank_file::read_bank;
use flopbudget_cli::report::{Settings, compare, render_latex, render_plain};
use flopbudget_cli::{ColorLogger, Error, TermResult};
use flopbudget_cost::{
    CASCADE_RESAMPLE_KERNEL_LENGTH, DEFAULT_BLOCK_LEN_FACTOR, DEFAULT_RECONSTRUCTION_DUTY_CYCLE,
    DEFAULT_RESAMPLE_KERNEL_LENGTH,
};
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Aligned columns for the terminal
    Plain,
    /// A LaTeX tabular environment
    Latex,
}

#[derive(Parser)]
#[command(name = "flopbudget", version)]
struct Cli {
    /// Template bank description (JSON) listing the bank's time slices
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "plain")]
    format: Format,

    /// FFT block length as a multiple of the kernel length. Must be greater than 1.
    #[arg(short = 'b', long = "block-len-factor", default_value_t = DEFAULT_BLOCK_LEN_FACTOR)]
    block_len_factor: f64,

    /// Fraction of samples on which templates are reconstructed from the SVD basis
    #[arg(short = 'd', long = "duty-cycle", default_value_t = DEFAULT_RECONSTRUCTION_DUTY_CYCLE)]
    duty_cycle: f64,

    /// Taps in the resampling filters of the flat LLOID models
    #[arg(long = "resample-kernel-length", default_value_t = DEFAULT_RESAMPLE_KERNEL_LENGTH)]
    resample_kernel_length: u32,

    /// Taps in the resampling filters of the cascade models
    #[arg(
        long = "cascade-resample-kernel-length",
        default_value_t = CASCADE_RESAMPLE_KERNEL_LENGTH
    )]
    cascade_resample_kernel_length: u32,

    /// Print diagnostic messages
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Quiet mode: suppress all log output
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn main() -> TermResult {
    TermResult(run())
}

fn run() -> Result<(), Error> {
    let cli = Cli::parse();
    ColorLogger::new(cli.quiet, cli.verbose).init()?;

    let bank = read_bank(&cli.file)?;
    info!(
        "{} time slices, {} Hz maximum rate",
        bank.slices().len(),
        bank.max_rate()
    );

    let settings = Settings {
        block_len_factor: cli.block_len_factor,
        reconstruction_duty_cycle: cli.duty_cycle,
        resample_kernel_length: cli.resample_kernel_length,
        cascade_resample_kernel_length: cli.cascade_resample_kernel_length,
    };
    debug!("{settings:?}");

    let rows = compare(&bank, settings)?;
    for row in &rows {
        debug!(
            "{}: {} ops/sample, {} s",
            row.method.label(),
            row.ops,
            row.latency
        );
    }

    let table = match cli.format {
        Format::Plain => render_plain(&rows),
        Format::Latex => render_latex(&rows),
    };
    io::stdout()
        .lock()
        .write_all(table.as_bytes())
        .map_err(Error::Write)
}
