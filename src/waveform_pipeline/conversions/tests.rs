use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use tempfile::TempDir;

use crate::waveform_pipeline::augment::AugmentConfig;
use crate::waveform_pipeline::common::error::{PipelineError, Result};
use crate::waveform_pipeline::conversions::batch::{has_extension, list_files};
use crate::waveform_pipeline::conversions::{
    AugmentBatchConfig, CsvAugmentPipeline, CsvToPngPipeline, ExtractBatchConfig,
    ImageToCsvPipeline, RenderBatchConfig, augmented_file_name, default_extract_output_dir,
};
use crate::waveform_pipeline::extract::{ExtractionConfig, RasterReader, WaveformExtractor};
use crate::waveform_pipeline::render::PlotConfig;
use crate::waveform_pipeline::trace::{CsvHeader, CsvTraceReader, Trace, TraceReader, TraceWriter};

struct MockReader {
    image: RgbImage,
}

impl RasterReader for MockReader {
    fn read_raster(&self, _data: &[u8]) -> Result<RgbImage> {
        Ok(self.image.clone())
    }
}

struct MockWriter {
    should_fail: bool,
    written: Arc<Mutex<Vec<Trace>>>,
}

impl TraceWriter for MockWriter {
    fn write_trace(&self, trace: &Trace, _output: &mut dyn Write) -> Result<()> {
        if self.should_fail {
            return Err(PipelineError::OutputWriteError("Mock write error".to_string()));
        }
        self.written.lock().unwrap().push(trace.clone());
        Ok(())
    }
}

fn line_image(width: u32, height: u32, row: u32) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, Rgb([250, 250, 250]));
    for col in 0..width {
        image.put_pixel(col, row, Rgb([10, 10, 10]));
    }
    image
}

fn save_image(image: &RgbImage, path: &Path, format: ImageFormat) {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(image.clone())
        .write_to(&mut Cursor::new(&mut bytes), format)
        .unwrap();
    fs::write(path, bytes).unwrap();
}

fn save_png(image: &RgbImage, path: &Path) {
    save_image(image, path, ImageFormat::Png);
}

fn read_trace(path: &Path) -> Trace {
    CsvTraceReader.read_trace(&fs::read(path).unwrap()).unwrap()
}

fn seeded_augment_config(count: usize, seed: u64) -> AugmentBatchConfig {
    AugmentBatchConfig::builder()
        .count(count)
        .seed(Some(seed))
        .build()
}

#[test]
fn test_augmented_file_name() {
    assert_eq!(augmented_file_name("pulse", 1), "pulse_aug_001.csv");
    assert_eq!(augmented_file_name("pulse", 42), "pulse_aug_042.csv");
    assert_eq!(augmented_file_name("平脈", 50), "平脈_aug_050.csv");
    assert_eq!(augmented_file_name("pulse", 1234), "pulse_aug_1234.csv");
}

#[test]
fn test_default_extract_output_dir() {
    assert_eq!(
        default_extract_output_dir(Path::new("data/maibo")),
        Path::new("data/maibo_csv_results")
    );
    assert_eq!(
        default_extract_output_dir(Path::new("maibo")),
        Path::new("maibo_csv_results")
    );
}

#[test]
fn test_has_extension_ignores_case() {
    let images = &["png", "tiff"];
    assert!(has_extension(Path::new("a/scan.PNG"), images));
    assert!(has_extension(Path::new("scan.Tiff"), images));
    assert!(!has_extension(Path::new("scan.jpg"), images));
    assert!(!has_extension(Path::new("png"), images));
}

#[test]
fn test_list_files_sorted_and_filtered() {
    let dir = TempDir::new().unwrap();
    for name in ["b.csv", "a.CSV", "notes.txt", "c.csv"] {
        fs::write(dir.path().join(name), "0,1\n").unwrap();
    }
    fs::create_dir(dir.path().join("nested.csv")).unwrap();

    let files = list_files(dir.path(), &["csv"]).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["a.CSV", "b.csv", "c.csv"]);
}

#[test]
fn test_list_files_missing_dir() {
    let result = list_files(Path::new("/definitely/not/here"), &["csv"]);
    assert!(matches!(result.unwrap_err(), PipelineError::InputReadError(_)));
}

#[test]
fn test_convert_with_custom_parts() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let extractor = WaveformExtractor::with_custom(
        MockReader { image: line_image(8, 4, 2) },
        ExtractionConfig::default(),
    );
    let pipeline = ImageToCsvPipeline::with_custom(
        extractor,
        MockWriter { should_fail: false, written: written.clone() },
    );

    let mut output = Cursor::new(Vec::new());
    let samples = pipeline.convert(b"fake image", &mut output).unwrap();

    assert_eq!(samples, 8);
    assert_eq!(written.lock().unwrap().len(), 1);
}

#[test]
fn test_convert_writer_failure() {
    let extractor = WaveformExtractor::with_custom(
        MockReader { image: line_image(8, 4, 2) },
        ExtractionConfig::default(),
    );
    let pipeline = ImageToCsvPipeline::with_custom(
        extractor,
        MockWriter { should_fail: true, written: Arc::new(Mutex::new(Vec::new())) },
    );

    let result = pipeline.convert(b"fake image", &mut Cursor::new(Vec::new()));
    assert!(matches!(result.unwrap_err(), PipelineError::OutputWriteError(_)));
}

#[test]
fn test_convert_blank_image_writes_nothing() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let extractor = WaveformExtractor::with_custom(
        MockReader { image: RgbImage::from_pixel(8, 4, Rgb([255, 255, 255])) },
        ExtractionConfig::default(),
    );
    let pipeline = ImageToCsvPipeline::with_custom(
        extractor,
        MockWriter { should_fail: false, written: written.clone() },
    );

    let result = pipeline.convert(b"fake image", &mut Cursor::new(Vec::new()));

    assert!(matches!(result.unwrap_err(), PipelineError::EmptyTrace(_)));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_extract_batch_skips_bad_images() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    save_png(&line_image(30, 20, 7), &input.path().join("pulse_a.png"));
    save_png(&RgbImage::from_pixel(30, 20, Rgb([255, 255, 255])), &input.path().join("blank.png"));
    fs::write(input.path().join("broken.jpg"), b"not a jpeg").unwrap();
    fs::write(input.path().join("readme.txt"), b"ignored").unwrap();

    let pipeline = ImageToCsvPipeline::new(ExtractBatchConfig::default());
    let report = pipeline.run_batch(input.path(), output.path()).unwrap();

    assert_eq!(report.scanned, 3);
    assert_eq!(report.generated, 1);
    assert_eq!(report.skipped, 2);
    assert!(!output.path().join("blank.csv").exists());
    assert!(!output.path().join("broken.csv").exists());

    let csv = fs::read_to_string(output.path().join("pulse_a.csv")).unwrap();
    assert!(csv.starts_with("x,y\n0,7\n1,7\n"));
    assert_eq!(csv.lines().count(), 31);
}

#[test]
fn test_extract_batch_missing_input() {
    let output = TempDir::new().unwrap();
    let pipeline = ImageToCsvPipeline::new(ExtractBatchConfig::default());

    let result = pipeline.run_batch(output.path().join("missing"), output.path());
    assert!(matches!(result.unwrap_err(), PipelineError::InputReadError(_)));
}

#[test]
fn test_extract_batch_duplicate_stem_counted_once() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    save_image(&line_image(10, 12, 3), &input.path().join("s.bmp"), ImageFormat::Bmp);
    save_png(&line_image(10, 12, 9), &input.path().join("s.png"));

    let pipeline = ImageToCsvPipeline::new(ExtractBatchConfig::default());
    let report = pipeline.run_batch(input.path(), output.path()).unwrap();

    assert_eq!(report.scanned, 2);
    assert_eq!(report.generated, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(list_files(output.path(), &["csv"]).unwrap().len(), 1);

    let trace = read_trace(&output.path().join("s.csv"));
    assert!(trace.ys().all(|y| y == 3.0));
}

#[test]
fn test_augment_batch_with_levels() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let deep = input.path().join("deep");
    let middle = input.path().join("middle");
    fs::create_dir_all(&deep).unwrap();
    fs::create_dir_all(&middle).unwrap();
    fs::write(deep.join("wave.csv"), "0,10\n1,12\n2,15\n3,11\n4,9\n5,10\n").unwrap();
    fs::write(middle.join("headed.csv"), "x,y\n0,3\n1,4\n2,5\n").unwrap();
    fs::write(middle.join("empty.csv"), "x,y\n").unwrap();

    let config = AugmentBatchConfig::builder()
        .count(3)
        .levels(["deep", "middle", "surface"])
        .seed(Some(17))
        .build();
    let pipeline = CsvAugmentPipeline::new(config).unwrap();
    let report = pipeline.run_batch(input.path(), output.path()).unwrap();

    assert_eq!(report.scanned, 3);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.generated, 6);
    assert!(!output.path().join("surface").exists());

    for sequence in 1..=3 {
        let path = output.path().join("deep").join(augmented_file_name("wave", sequence));
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("0,"));

        let trace = read_trace(&path);
        assert!(trace.len() <= 6 && !trace.is_empty());
        assert_eq!(trace.xs().collect::<Vec<_>>(), (0..trace.len() as i64).collect::<Vec<_>>());
    }
    assert!(output.path().join("middle").join("headed_aug_003.csv").exists());
    assert!(!output.path().join("middle").join("empty_aug_001.csv").exists());
}

#[test]
fn test_augment_batch_seed_is_reproducible() {
    let input = TempDir::new().unwrap();
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    fs::write(input.path().join("wave.csv"), "0,1\n1,5\n2,2\n3,8\n4,3\n5,7\n6,1\n").unwrap();

    for out in [&first, &second] {
        CsvAugmentPipeline::new(seeded_augment_config(4, 99))
            .unwrap()
            .run_batch(input.path(), out.path())
            .unwrap();
    }

    for sequence in 1..=4 {
        let name = augmented_file_name("wave", sequence);
        assert_eq!(
            fs::read(first.path().join(&name)).unwrap(),
            fs::read(second.path().join(&name)).unwrap()
        );
    }
}

#[test]
fn test_augment_batch_header_option() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("wave.csv"), "0,1\n1,2\n").unwrap();

    let config = AugmentBatchConfig::builder()
        .count(1)
        .header(CsvHeader::Present)
        .seed(Some(0))
        .build();
    CsvAugmentPipeline::new(config)
        .unwrap()
        .run_batch(input.path(), output.path())
        .unwrap();

    let contents = fs::read_to_string(output.path().join("wave_aug_001.csv")).unwrap();
    assert!(contents.starts_with("x,y\n"));
}

#[test]
fn test_augment_batch_drops_repeated_x_rows() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("wave.csv"), "0,2\n1,4\n1,9\n2,6\n3,8\n").unwrap();

    let config = AugmentBatchConfig::builder()
        .count(1)
        .augment(
            AugmentConfig::builder()
                .jitter_strength(0.0)
                .scale_range(1.0, 1.0)
                .slice_ratio_range(1.0, 1.0)
                .build(),
        )
        .seed(Some(3))
        .build();
    let report = CsvAugmentPipeline::new(config)
        .unwrap()
        .run_batch(input.path(), output.path())
        .unwrap();

    assert_eq!(report.succeeded, 1);
    let trace = read_trace(&output.path().join(augmented_file_name("wave", 1)));
    assert_eq!(trace.ys().collect::<Vec<_>>(), vec![2.0, 4.0, 6.0, 8.0]);
}

#[test]
fn test_augment_pipeline_rejects_invalid_config() {
    let config = AugmentBatchConfig::builder()
        .augment(AugmentConfig::builder().scale_range(2.0, 1.0).build())
        .build();
    assert!(matches!(
        CsvAugmentPipeline::new(config),
        Err(PipelineError::InvalidConfig(_))
    ));
}

#[test]
fn test_render_batch() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("wave.csv"), "x,y\n0,5\n1,9\n2,4\n").unwrap();
    fs::write(input.path().join("junk.csv"), "nothing,here\n").unwrap();

    let config = RenderBatchConfig::builder()
        .plot(PlotConfig::builder().size(240, 160).margin(12).build())
        .build();
    let report = CsvToPngPipeline::new(config)
        .unwrap()
        .run_batch(input.path(), output.path())
        .unwrap();

    assert_eq!(report.scanned, 2);
    assert_eq!(report.generated, 1);
    assert_eq!(report.skipped, 1);
    assert!(!output.path().join("junk_plot.png").exists());

    let png = image::open(output.path().join("wave_plot.png")).unwrap();
    assert_eq!((png.width(), png.height()), (240, 160));
}

#[test]
fn test_extracted_csv_feeds_augmentation() {
    let images = TempDir::new().unwrap();
    let traces = TempDir::new().unwrap();
    let augmented = TempDir::new().unwrap();
    save_png(&line_image(40, 16, 9), &images.path().join("scan.png"));

    ImageToCsvPipeline::new(ExtractBatchConfig::default())
        .run_batch(images.path(), traces.path())
        .unwrap();

    let config = AugmentBatchConfig::builder()
        .augment(
            AugmentConfig::builder()
                .jitter_strength(0.0)
                .scale_range(2.0, 2.0)
                .slice_ratio_range(1.0, 1.0)
                .build(),
        )
        .count(1)
        .seed(Some(5))
        .build();
    let report = CsvAugmentPipeline::new(config)
        .unwrap()
        .run_batch(traces.path(), augmented.path())
        .unwrap();
    assert_eq!(report.generated, 1);

    let trace = read_trace(&augmented.path().join("scan_aug_001.csv"));
    assert_eq!(trace.len(), 40);
    assert!(trace.ys().all(|y| y == 18.0));
}
