use std::io::Write;
use std::path::Path;

use rayon::prelude::*;
use tracing::{info, instrument, warn};

use crate::waveform_pipeline::{
    common::error::{PipelineError, Result},
    conversions::batch::{self, BatchReport, IMAGE_EXTENSIONS},
    conversions::timing::Timer,
    conversions::types::ExtractBatchConfig,
    extract::{ImageCrateReader, RasterReader, WaveformExtractor},
    trace::{CsvTraceWriter, TraceWriter},
};

/// Chart images in, one CSV trace per image out.
pub struct ImageToCsvPipeline<R: RasterReader, W: TraceWriter> {
    extractor: WaveformExtractor<R>,
    writer: W,
}

impl ImageToCsvPipeline<ImageCrateReader, CsvTraceWriter> {
    pub fn new(config: ExtractBatchConfig) -> Self {
        Self {
            extractor: WaveformExtractor::new(config.extraction),
            writer: CsvTraceWriter::new(config.header),
        }
    }
}

impl<R: RasterReader, W: TraceWriter> ImageToCsvPipeline<R, W> {
    pub fn with_custom(extractor: WaveformExtractor<R>, writer: W) -> Self {
        Self { extractor, writer }
    }

    /// Extracts the waveform from `input_data` and writes it to `output`.
    ///
    /// Returns the number of samples written. An image without a waveform is
    /// reported as `EmptyTrace` and nothing is written.
    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<usize> {
        let trace = {
            let _span = tracing::info_span!("extract_waveform").entered();
            self.extractor.extract(input_data)
        };

        if trace.is_empty() {
            return Err(PipelineError::EmptyTrace("no waveform found in image".to_string()));
        }

        {
            let _span = tracing::info_span!("write_csv", samples = trace.len()).entered();
            self.writer.write_trace(&trace, output)?;
        }

        Ok(trace.len())
    }

    /// Converts one image file. The output file is only created when a waveform
    /// was found.
    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<usize> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        let input_data = std::fs::read(input_path).map_err(|e| {
            PipelineError::InputReadError(format!("{}: {}", input_path.display(), e))
        })?;

        let trace = self.extractor.extract(&input_data);
        if trace.is_empty() {
            return Err(PipelineError::EmptyTrace(input_path.display().to_string()));
        }

        let mut output_file = std::fs::File::create(output_path).map_err(|e| {
            PipelineError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;
        self.writer.write_trace(&trace, &mut output_file)?;

        Ok(trace.len())
    }

    /// Converts every image in `input_dir` into `<stem>.csv` under `output_dir`.
    ///
    /// Per-image failures are logged and counted as skipped; only an unreadable
    /// input directory or an uncreatable output directory fails the batch.
    #[instrument(skip(self, input_dir, output_dir))]
    pub fn run_batch<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Q,
    ) -> Result<BatchReport>
    where
        R: Sync,
        W: Sync,
    {
        let input_dir = input_dir.as_ref();
        let output_dir = output_dir.as_ref();
        let mut report = BatchReport::default();

        let timer = Timer::start("list_images");
        let (images, duplicates) =
            batch::split_duplicate_stems(batch::list_files(input_dir, IMAGE_EXTENSIONS)?);
        batch::ensure_dir(output_dir)?;
        report.timings.record(timer);

        info!(
            input = %input_dir.display(),
            output = %output_dir.display(),
            images = images.len(),
            "Extracting waveforms"
        );

        for path in &duplicates {
            warn!("{} shares its stem with an earlier image, skipped", path.display());
        }

        let timer = Timer::start("extract_images");
        let written = images
            .par_iter()
            .filter(|image_path| {
                let output_path = output_dir.join(format!("{}.csv", batch::file_stem(image_path)));
                match self.convert_file(image_path, &output_path) {
                    Ok(samples) => {
                        info!("{} -> {} ({} samples)", image_path.display(), output_path.display(), samples);
                        true
                    }
                    Err(PipelineError::EmptyTrace(_)) => {
                        warn!("No waveform found in {}, skipped", image_path.display());
                        false
                    }
                    Err(e) => {
                        warn!("Failed to convert {}: {}", image_path.display(), e);
                        false
                    }
                }
            })
            .count();
        report.timings.record(timer);

        report.scanned = images.len() + duplicates.len();
        report.succeeded = written;
        report.generated = written;
        report.skipped = report.scanned - written;
        Ok(report)
    }
}
