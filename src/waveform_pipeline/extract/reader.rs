use image::RgbImage;
use crate::waveform_pipeline::common::error::Result;

pub trait RasterReader {
    fn read_raster(&self, data: &[u8]) -> Result<RgbImage>;
}
