use std::io::Write;
use tracing::debug;
use crate::waveform_pipeline::common::error::Result;
use crate::waveform_pipeline::trace::types::Trace;
use crate::waveform_pipeline::trace::writer::{CsvHeader, TraceWriter};

pub struct CsvTraceWriter {
    header: CsvHeader,
}

impl CsvTraceWriter {
    pub fn new(header: CsvHeader) -> Self {
        Self { header }
    }
}

impl TraceWriter for CsvTraceWriter {
    fn write_trace(&self, trace: &Trace, output: &mut dyn Write) -> Result<()> {
        debug!("Writing {} samples as CSV ({:?} header)", trace.len(), self.header);

        let mut writer = csv::Writer::from_writer(output);

        if self.header == CsvHeader::Present {
            writer.write_record(["x", "y"])?;
        }

        for sample in trace {
            writer.write_record([sample.x.to_string(), sample.y.to_string()])?;
        }

        writer.flush()?;
        Ok(())
    }
}
