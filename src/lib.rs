//! voc2cls: turn a Pascal VOC detection dataset into a classification dataset.
//!
//! Every annotated bounding box is cropped out of its image, its label is
//! normalized to one of a fixed set of posture classes, and the crops are
//! distributed over `train/`, `val/` and `test/` folders per class.
//!
//! The pipeline runs in four sequential stages:
//!
//! - [`layout`]: create the `{split}/{class}` output tree
//! - [`scan`]: pair XML files with images, parse boxes, crop ([`voc`], [`crop`], [`label`])
//! - [`split`]: shuffle and partition each class 80/10/10
//! - [`writer`]: save each crop as JPEG
//!
//! Per-file and per-object problems never stop a run; they are logged and
//! collected in a [`report::RunReport`].

pub mod bbox;
pub mod config;
pub mod crop;
pub mod error;
pub mod label;
pub mod layout;
pub mod report;
pub mod scan;
pub mod split;
pub mod voc;
pub mod writer;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use config::SplitRatios;
pub use error::Voc2ClsError;
use report::RunReport;

/// The voc2cls CLI application.
#[derive(Parser)]
#[command(name = "voc2cls")]
#[command(version, about)]
struct Cli {
    /// Directory holding image + VOC XML pairs.
    #[arg(long, default_value = config::DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// Root of the generated train/val/test tree.
    #[arg(long, default_value = config::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Seed for the per-class shuffle (random on every run if omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Format of the final run report.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,
}

/// How the run report is printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Inputs of one pipeline run.
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub ratios: SplitRatios,
    pub seed: Option<u64>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(config::DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(config::DEFAULT_OUTPUT_DIR),
            ratios: SplitRatios::DEFAULT,
            seed: None,
        }
    }
}

/// Run layout, scan, split and write once.
pub fn run_pipeline(opts: &PipelineOptions) -> Result<RunReport, Voc2ClsError> {
    let mut report = RunReport::new();

    layout::init_output_layout(&opts.output_dir)?;
    let buckets = scan::scan_dataset(&opts.input_dir, &mut report)?;
    let plan = split::split_buckets(buckets, opts.ratios, opts.seed);
    writer::write_splits(&opts.output_dir, &plan, &mut report);

    Ok(report)
}

/// Run the voc2cls CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), Voc2ClsError> {
    let cli = Cli::parse();

    let opts = PipelineOptions {
        input_dir: cli.input_dir,
        output_dir: cli.output_dir,
        seed: cli.seed,
        ..Default::default()
    };

    log::info!(
        "Converting {} into {}",
        opts.input_dir.display(),
        opts.output_dir.display()
    );
    let report = run_pipeline(&opts)?;

    match cli.report {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormat::Text => print!("{}", report),
    }

    println!(
        "Dataset organized into {}/train/val/test folders by class.",
        opts.output_dir.display()
    );
    Ok(())
}
