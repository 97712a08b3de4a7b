use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{info, instrument, warn};

use crate::waveform_pipeline::{
    augment::TraceAugmenter,
    common::error::{PipelineError, Result},
    conversions::batch::{self, BatchReport, CSV_EXTENSIONS},
    conversions::timing::Timer,
    conversions::types::AugmentBatchConfig,
    trace::{CsvTraceReader, CsvTraceWriter, Trace, TraceReader, TraceWriter},
};

/// One source CSV together with the directory its variants go to.
struct AugmentJob {
    source: PathBuf,
    output_dir: PathBuf,
}

/// Source CSV traces in, `count` augmented CSV traces per source out.
pub struct CsvAugmentPipeline<R: TraceReader, W: TraceWriter> {
    reader: R,
    writer: W,
    augmenter: TraceAugmenter,
    config: AugmentBatchConfig,
}

impl CsvAugmentPipeline<CsvTraceReader, CsvTraceWriter> {
    pub fn new(config: AugmentBatchConfig) -> Result<Self> {
        let writer = CsvTraceWriter::new(config.header);
        Self::with_custom(CsvTraceReader, writer, config)
    }
}

impl<R: TraceReader, W: TraceWriter> CsvAugmentPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: AugmentBatchConfig) -> Result<Self> {
        let augmenter = TraceAugmenter::new(config.augment.clone())?;
        Ok(Self {
            reader,
            writer,
            augmenter,
            config,
        })
    }

    /// Loads a source trace, rejecting files with no usable rows.
    pub fn load_trace(&self, path: &Path) -> Result<Trace> {
        let data = std::fs::read(path)
            .map_err(|e| PipelineError::InputReadError(format!("{}: {}", path.display(), e)))?;

        let trace = self.reader.read_trace(&data)?;
        if trace.is_empty() {
            return Err(PipelineError::EmptyTrace(path.display().to_string()));
        }
        Ok(trace)
    }

    /// Writes `count` variants of `source_path` as `<stem>_aug_<NNN>.csv` into
    /// `output_dir`. Returns the number of files written; individual write
    /// failures are logged and do not stop the remaining variants.
    #[instrument(skip(self, source_path, output_dir, rng))]
    pub fn augment_file<G: Rng + ?Sized>(
        &self,
        source_path: &Path,
        output_dir: &Path,
        rng: &mut G,
    ) -> Result<usize> {
        let source = self.load_trace(source_path)?;
        let stem = batch::file_stem(source_path);

        let mut generated = 0;
        for sequence in 1..=self.config.count {
            let augmented = self.augmenter.augment(&source, rng);
            let output_path = output_dir.join(batch::augmented_file_name(&stem, sequence));

            match self.write_trace_file(&augmented, &output_path) {
                Ok(()) => generated += 1,
                Err(e) => warn!("Failed to save {}: {}", output_path.display(), e),
            }
        }

        Ok(generated)
    }

    fn write_trace_file(&self, trace: &Trace, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .map_err(|e| PipelineError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
        self.writer.write_trace(trace, &mut file)
    }

    /// Augments every CSV under `input_root` (or under each configured level
    /// sub-directory) into the mirrored location under `output_root`.
    ///
    /// Missing level directories and unusable source files are logged and
    /// skipped.
    #[instrument(skip(self, input_root, output_root))]
    pub fn run_batch<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_root: P,
        output_root: Q,
    ) -> Result<BatchReport>
    where
        R: Sync,
        W: Sync,
    {
        let input_root = input_root.as_ref();
        let output_root = output_root.as_ref();
        let mut report = BatchReport::default();

        let timer = Timer::start("list_sources");
        let jobs = self.collect_jobs(input_root, output_root)?;
        report.timings.record(timer);

        info!(
            input = %input_root.display(),
            output = %output_root.display(),
            sources = jobs.len(),
            per_source = self.config.count,
            "Augmenting traces"
        );

        let timer = Timer::start("augment_sources");
        let outcomes: Vec<Option<usize>> = jobs
            .par_iter()
            .enumerate()
            .map(|(index, job)| {
                let mut rng = self.job_rng(index);
                match self.augment_file(&job.source, &job.output_dir, &mut rng) {
                    Ok(generated) => {
                        info!("{} -> {} variants", job.source.display(), generated);
                        Some(generated)
                    }
                    Err(e) => {
                        warn!("Skipping {}: {}", job.source.display(), e);
                        None
                    }
                }
            })
            .collect();
        report.timings.record(timer);

        report.scanned = outcomes.len();
        report.succeeded = outcomes.iter().flatten().count();
        report.skipped = report.scanned - report.succeeded;
        report.generated = outcomes.iter().flatten().sum();
        Ok(report)
    }

    fn collect_jobs(&self, input_root: &Path, output_root: &Path) -> Result<Vec<AugmentJob>> {
        if self.config.levels.is_empty() {
            return Self::level_jobs(input_root, output_root);
        }

        let mut jobs = Vec::new();
        for level in &self.config.levels {
            let input_dir = input_root.join(level);
            if !input_dir.is_dir() {
                warn!("Level directory {} not found, skipped", input_dir.display());
                continue;
            }
            match Self::level_jobs(&input_dir, &output_root.join(level)) {
                Ok(level_jobs) if level_jobs.is_empty() => {
                    warn!("No CSV files in {}", input_dir.display());
                }
                Ok(level_jobs) => jobs.extend(level_jobs),
                Err(e) => warn!("Skipping level {}: {}", level, e),
            }
        }
        Ok(jobs)
    }

    fn level_jobs(input_dir: &Path, output_dir: &Path) -> Result<Vec<AugmentJob>> {
        let sources = batch::list_files(input_dir, CSV_EXTENSIONS)?;
        if !sources.is_empty() {
            batch::ensure_dir(output_dir)?;
        }
        Ok(sources
            .into_iter()
            .map(|source| AugmentJob {
                source,
                output_dir: output_dir.to_path_buf(),
            })
            .collect())
    }

    fn job_rng(&self, index: usize) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
            None => StdRng::from_os_rng(),
        }
    }

    pub fn config(&self) -> &AugmentBatchConfig {
        &self.config
    }
}
