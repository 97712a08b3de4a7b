use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use pulse_trace_rs::logger;
use pulse_trace_rs::waveform_pipeline::conversions::default_extract_output_dir;
use pulse_trace_rs::waveform_pipeline::{
    AugmentBatchConfig, AugmentConfig, CsvAugmentPipeline, CsvHeader, CsvToPngPipeline,
    ExtractBatchConfig, ExtractionConfig, ImageToCsvPipeline, PlotConfig, RenderBatchConfig,
    RowReduction,
};

#[derive(Parser, Debug)]
#[command(name = "pulse-trace", about = "Extract, augment and plot pulse waveform traces")]
struct Cli {
    /// Default to debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert chart images into CSV traces
    Extract(ExtractArgs),
    /// Generate augmented variants of CSV traces
    Augment(AugmentArgs),
    /// Plot CSV traces to PNG
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Directory of chart images
    #[arg(long, default_value = "maibo")]
    input: PathBuf,

    /// Output directory (default: <input>_csv_results next to the input)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Brightness ceiling (0-255) for a pixel to count as ink
    #[arg(long, default_value_t = 60)]
    v_max: u8,

    /// Truncate each column's mean row to a whole pixel
    #[arg(long)]
    truncate_rows: bool,

    /// Omit the `x,y` header row
    #[arg(long)]
    no_header: bool,
}

#[derive(Args, Debug)]
struct AugmentArgs {
    /// Root directory of source CSV traces
    #[arg(long, default_value = "pulse_data")]
    input: PathBuf,

    /// Root directory for augmented traces
    #[arg(long, default_value = "pulse_data_augmented")]
    output: PathBuf,

    /// Level sub-directory to process; repeat for several
    #[arg(long = "level")]
    levels: Vec<String>,

    /// Augmented files per source CSV
    #[arg(long, default_value_t = 50)]
    count: usize,

    /// Jitter deviation relative to the trace's standard deviation
    #[arg(long, default_value_t = 0.02)]
    jitter: f64,

    #[arg(long, default_value_t = 0.98)]
    scale_min: f64,

    #[arg(long, default_value_t = 1.02)]
    scale_max: f64,

    /// Smallest fraction of samples kept by the window slice
    #[arg(long, default_value_t = 0.9)]
    slice_min: f64,

    #[arg(long, default_value_t = 1.0)]
    slice_max: f64,

    /// Seed for reproducible output (default: OS randomness)
    #[arg(long)]
    seed: Option<u64>,

    /// Write an `x,y` header row
    #[arg(long)]
    header: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Directory of CSV traces
    #[arg(long, default_value = "maibo_csv_results")]
    input: PathBuf,

    /// Directory for PNG plots
    #[arg(long, default_value = "csv2png")]
    output: PathBuf,

    /// Appended to each CSV stem to name its PNG
    #[arg(long, default_value = "_plot")]
    suffix: String,

    #[arg(long, default_value_t = 1000)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Draw larger y lower, as rows appear in the source image
    #[arg(long)]
    flip_y: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_with_default(if cli.verbose { "debug" } else { "info" });

    match cli.command {
        Command::Extract(args) => extract(args),
        Command::Augment(args) => augment(args),
        Command::Render(args) => render(args),
    }
}

fn extract(args: ExtractArgs) -> Result<()> {
    let output = args
        .output
        .unwrap_or_else(|| default_extract_output_dir(&args.input));

    let extraction = ExtractionConfig::builder()
        .value_max(args.v_max)
        .row_reduction(if args.truncate_rows {
            RowReduction::TruncatedMean
        } else {
            RowReduction::Mean
        })
        .build();
    let config = ExtractBatchConfig::builder()
        .extraction(extraction)
        .header(if args.no_header { CsvHeader::Absent } else { CsvHeader::Present })
        .build();

    info!("Ink brightness ceiling: {}", args.v_max);

    let report = ImageToCsvPipeline::new(config)
        .run_batch(&args.input, &output)
        .with_context(|| format!("extracting waveforms from {}", args.input.display()))?;

    report.log_summary("Extraction");
    Ok(())
}

fn augment(args: AugmentArgs) -> Result<()> {
    let augment = AugmentConfig::builder()
        .jitter_strength(args.jitter)
        .scale_range(args.scale_min, args.scale_max)
        .slice_ratio_range(args.slice_min, args.slice_max)
        .build();
    let config = AugmentBatchConfig::builder()
        .augment(augment)
        .count(args.count)
        .levels(args.levels)
        .header(if args.header { CsvHeader::Present } else { CsvHeader::Absent })
        .seed(args.seed)
        .build();

    let pipeline = CsvAugmentPipeline::new(config).context("invalid augmentation settings")?;
    info!(
        "Augmentation: {:?}, {} per source",
        pipeline.config().augment,
        pipeline.config().count
    );
    let report = pipeline
        .run_batch(&args.input, &args.output)
        .with_context(|| format!("augmenting traces from {}", args.input.display()))?;

    report.log_summary("Augmentation");
    Ok(())
}

fn render(args: RenderArgs) -> Result<()> {
    let plot = PlotConfig::builder()
        .size(args.width, args.height)
        .flip_y(args.flip_y)
        .build();
    let config = RenderBatchConfig::builder()
        .plot(plot)
        .suffix(args.suffix)
        .build();

    let pipeline = CsvToPngPipeline::new(config).context("invalid plot settings")?;
    info!(
        "Plot size: {}x{}",
        pipeline.config().plot.width,
        pipeline.config().plot.height
    );
    let report = pipeline
        .run_batch(&args.input, &args.output)
        .with_context(|| format!("rendering traces from {}", args.input.display()))?;

    report.log_summary("Rendering");
    Ok(())
}
