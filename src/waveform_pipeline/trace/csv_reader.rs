//! Two-column CSV trace reader.
//!
//! Only the first two fields of each record are read, positionally as `x` and `y`.
//! Any record where either field is not a finite number (or `x` is not a whole
//! number) is dropped, which also drops a leading `x,y` header. Files written with
//! or without a header therefore load the same way.
//!
//! A row whose `x` does not move past the last kept row is dropped too, so a
//! repeated or backwards `x` costs that row rather than the whole file.

use tracing::debug;
use crate::waveform_pipeline::common::error::Result;
use crate::waveform_pipeline::trace::reader::TraceReader;
use crate::waveform_pipeline::trace::types::{Sample, Trace};

pub struct CsvTraceReader;

impl CsvTraceReader {
    fn parse_record(record: &csv::StringRecord) -> Option<Sample> {
        let x = record.get(0)?.parse::<f64>().ok()?;
        let y = record.get(1)?.parse::<f64>().ok()?;

        if !x.is_finite() || !y.is_finite() || x.fract() != 0.0 {
            return None;
        }
        if x < i64::MIN as f64 || x > i64::MAX as f64 {
            return None;
        }

        Some(Sample::new(x as i64, y))
    }
}

impl TraceReader for CsvTraceReader {
    fn read_trace(&self, data: &[u8]) -> Result<Trace> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(data);

        let mut samples = Vec::new();
        let mut dropped = 0usize;

        for record in reader.records() {
            match record.ok().as_ref().and_then(Self::parse_record) {
                Some(sample) if samples.last().is_none_or(|last: &Sample| last.x < sample.x) => {
                    samples.push(sample)
                }
                _ => dropped += 1,
            }
        }

        debug!("Parsed {} samples, dropped {} rows", samples.len(), dropped);

        Trace::from_samples(samples)
    }
}
