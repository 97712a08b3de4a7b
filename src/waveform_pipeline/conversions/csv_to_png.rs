use std::io::Write;
use std::path::Path;

use rayon::prelude::*;
use tracing::{info, instrument, warn};

use crate::waveform_pipeline::{
    common::error::{PipelineError, Result},
    conversions::batch::{self, BatchReport, CSV_EXTENSIONS},
    conversions::timing::Timer,
    conversions::types::RenderBatchConfig,
    render::{PlotWriter, PngPlotWriter},
    trace::{CsvTraceReader, TraceReader},
};

/// CSV traces in, one PNG plot per trace out.
pub struct CsvToPngPipeline<R: TraceReader, P: PlotWriter> {
    reader: R,
    plotter: P,
    config: RenderBatchConfig,
}

impl CsvToPngPipeline<CsvTraceReader, PngPlotWriter> {
    pub fn new(config: RenderBatchConfig) -> Result<Self> {
        Self::with_custom(CsvTraceReader, PngPlotWriter, config)
    }
}

impl<R: TraceReader, P: PlotWriter> CsvToPngPipeline<R, P> {
    pub fn with_custom(reader: R, plotter: P, config: RenderBatchConfig) -> Result<Self> {
        config.plot.validate()?;
        Ok(Self {
            reader,
            plotter,
            config,
        })
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<usize> {
        let trace = self.reader.read_trace(input_data)?;
        if trace.is_empty() {
            return Err(PipelineError::EmptyTrace("no samples to plot".to_string()));
        }

        self.plotter.write_plot(&trace, output, &self.config.plot)?;
        Ok(trace.len())
    }

    pub fn convert_file<A: AsRef<Path>, B: AsRef<Path>>(
        &self,
        input_path: A,
        output_path: B,
    ) -> Result<usize> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        let input_data = std::fs::read(input_path).map_err(|e| {
            PipelineError::InputReadError(format!("{}: {}", input_path.display(), e))
        })?;

        // Render to memory first so a bad trace leaves no partial PNG behind
        let mut buffer = Vec::new();
        let samples = self.convert(&input_data, &mut buffer)?;

        std::fs::write(output_path, &buffer).map_err(|e| {
            PipelineError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;
        Ok(samples)
    }

    /// Renders every CSV in `input_dir` to `<stem><suffix>.png` under `output_dir`.
    #[instrument(skip(self, input_dir, output_dir))]
    pub fn run_batch<A: AsRef<Path>, B: AsRef<Path>>(
        &self,
        input_dir: A,
        output_dir: B,
    ) -> Result<BatchReport>
    where
        R: Sync,
        P: Sync,
    {
        let input_dir = input_dir.as_ref();
        let output_dir = output_dir.as_ref();
        let mut report = BatchReport::default();

        let timer = Timer::start("list_traces");
        let (traces, duplicates) =
            batch::split_duplicate_stems(batch::list_files(input_dir, CSV_EXTENSIONS)?);
        batch::ensure_dir(output_dir)?;
        report.timings.record(timer);

        info!(
            input = %input_dir.display(),
            output = %output_dir.display(),
            traces = traces.len(),
            "Rendering traces"
        );

        for path in &duplicates {
            warn!("{} shares its stem with an earlier trace, skipped", path.display());
        }

        let timer = Timer::start("render_traces");
        let rendered = traces
            .par_iter()
            .filter(|csv_path| {
                let file_name = format!("{}{}.png", batch::file_stem(csv_path), self.config.suffix);
                let output_path = output_dir.join(file_name);
                match self.convert_file(csv_path, &output_path) {
                    Ok(_) => {
                        info!("{} -> {}", csv_path.display(), output_path.display());
                        true
                    }
                    Err(e) => {
                        warn!("Skipping {}: {}", csv_path.display(), e);
                        false
                    }
                }
            })
            .count();
        report.timings.record(timer);

        report.scanned = traces.len() + duplicates.len();
        report.succeeded = rendered;
        report.generated = rendered;
        report.skipped = report.scanned - rendered;
        Ok(report)
    }

    pub fn config(&self) -> &RenderBatchConfig {
        &self.config
    }
}
