use std::io::Write;
use crate::waveform_pipeline::common::error::Result;
use crate::waveform_pipeline::render::types::PlotConfig;
use crate::waveform_pipeline::trace::Trace;

pub trait PlotWriter {
    fn write_plot(&self, trace: &Trace, output: &mut dyn Write, config: &PlotConfig) -> Result<()>;
}
