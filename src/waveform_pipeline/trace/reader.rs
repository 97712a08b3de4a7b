use crate::waveform_pipeline::common::error::Result;
use crate::waveform_pipeline::trace::types::Trace;

pub trait TraceReader {
    fn read_trace(&self, data: &[u8]) -> Result<Trace>;
}
