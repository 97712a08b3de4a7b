use std::io::Write;
use crate::waveform_pipeline::common::error::Result;
use crate::waveform_pipeline::trace::types::Trace;

/// Whether a `x,y` header row precedes the data rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvHeader {
    Present,
    Absent,
}

pub trait TraceWriter {
    fn write_trace(&self, trace: &Trace, output: &mut dyn Write) -> Result<()>;
}
