//! Batch conversion configuration types

use crate::waveform_pipeline::augment::AugmentConfig;
use crate::waveform_pipeline::extract::ExtractionConfig;
use crate::waveform_pipeline::render::PlotConfig;
use crate::waveform_pipeline::trace::CsvHeader;

/// Configuration for the image to CSV batch
#[derive(Debug, Clone)]
pub struct ExtractBatchConfig {
    pub extraction: ExtractionConfig,
    /// Header policy of the written CSV files
    pub header: CsvHeader,
}

impl Default for ExtractBatchConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            header: CsvHeader::Present,
        }
    }
}

impl ExtractBatchConfig {
    pub fn builder() -> ExtractBatchConfigBuilder {
        ExtractBatchConfigBuilder::default()
    }
}

/// Builder for ExtractBatchConfig
#[derive(Default)]
pub struct ExtractBatchConfigBuilder {
    extraction: Option<ExtractionConfig>,
    header: Option<CsvHeader>,
}

impl ExtractBatchConfigBuilder {
    pub fn extraction(mut self, extraction: ExtractionConfig) -> Self {
        self.extraction = Some(extraction);
        self
    }

    pub fn header(mut self, header: CsvHeader) -> Self {
        self.header = Some(header);
        self
    }

    pub fn build(self) -> ExtractBatchConfig {
        let default = ExtractBatchConfig::default();
        ExtractBatchConfig {
            extraction: self.extraction.unwrap_or(default.extraction),
            header: self.header.unwrap_or(default.header),
        }
    }
}

/// Configuration for the CSV augmentation batch
#[derive(Debug, Clone)]
pub struct AugmentBatchConfig {
    pub augment: AugmentConfig,
    /// Augmented files generated per source CSV
    pub count: usize,
    /// Sub-directories processed as `input/<level>` into `output/<level>`.
    /// Empty means the input directory itself.
    pub levels: Vec<String>,
    /// Header policy of the written CSV files
    pub header: CsvHeader,
    /// Base seed; each source file gets its own generator derived from it.
    /// `None` seeds every generator from the OS.
    pub seed: Option<u64>,
}

impl Default for AugmentBatchConfig {
    fn default() -> Self {
        Self {
            augment: AugmentConfig::default(),
            count: 50,
            levels: Vec::new(),
            header: CsvHeader::Absent,
            seed: None,
        }
    }
}

impl AugmentBatchConfig {
    pub fn builder() -> AugmentBatchConfigBuilder {
        AugmentBatchConfigBuilder::default()
    }
}

/// Builder for AugmentBatchConfig
#[derive(Default)]
pub struct AugmentBatchConfigBuilder {
    augment: Option<AugmentConfig>,
    count: Option<usize>,
    levels: Option<Vec<String>>,
    header: Option<CsvHeader>,
    seed: Option<Option<u64>>,
}

impl AugmentBatchConfigBuilder {
    pub fn augment(mut self, augment: AugmentConfig) -> Self {
        self.augment = Some(augment);
        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn levels<I, S>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.levels = Some(levels.into_iter().map(Into::into).collect());
        self
    }

    pub fn header(mut self, header: CsvHeader) -> Self {
        self.header = Some(header);
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> AugmentBatchConfig {
        let default = AugmentBatchConfig::default();
        AugmentBatchConfig {
            augment: self.augment.unwrap_or(default.augment),
            count: self.count.unwrap_or(default.count),
            levels: self.levels.unwrap_or(default.levels),
            header: self.header.unwrap_or(default.header),
            seed: self.seed.unwrap_or(default.seed),
        }
    }
}

/// Configuration for the CSV to PNG batch
#[derive(Debug, Clone)]
pub struct RenderBatchConfig {
    pub plot: PlotConfig,
    /// Appended to the CSV stem to form the PNG name
    pub suffix: String,
}

impl Default for RenderBatchConfig {
    fn default() -> Self {
        Self {
            plot: PlotConfig::default(),
            suffix: "_plot".to_string(),
        }
    }
}

impl RenderBatchConfig {
    pub fn builder() -> RenderBatchConfigBuilder {
        RenderBatchConfigBuilder::default()
    }
}

/// Builder for RenderBatchConfig
#[derive(Default)]
pub struct RenderBatchConfigBuilder {
    plot: Option<PlotConfig>,
    suffix: Option<String>,
}

impl RenderBatchConfigBuilder {
    pub fn plot(mut self, plot: PlotConfig) -> Self {
        self.plot = Some(plot);
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn build(self) -> RenderBatchConfig {
        let default = RenderBatchConfig::default();
        RenderBatchConfig {
            plot: self.plot.unwrap_or(default.plot),
            suffix: self.suffix.unwrap_or(default.suffix),
        }
    }
}
