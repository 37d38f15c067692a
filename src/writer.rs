//! JPEG output of split samples.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::ImageResult;

use crate::config::JPEG_QUALITY;
use crate::crop::CroppedSample;
use crate::layout::class_dir;
use crate::report::{RunReport, SkipReason};
use crate::split::SplitPlan;

/// Save every sample of `plan` under `output_base/<split>/<class>/`.
///
/// Existing files with the same name are overwritten. A sample that fails
/// to save is recorded as a skip; the rest are still written.
pub fn write_splits(
    output_base: &Path,
    plan: &SplitPlan<CroppedSample>,
    report: &mut RunReport,
) {
    for (class, samples) in plan {
        for (split, slice) in samples.iter() {
            let dir = class_dir(output_base, split, *class);
            for sample in slice {
                let path = dir.join(&sample.file_name);
                match save_jpeg(&path, sample) {
                    Ok(()) => report.record_written(*class, split),
                    Err(err) => report.skip(
                        SkipReason::WriteFailed,
                        format!("Failed to save {}: {err}", path.display()),
                    ),
                }
            }
        }
    }
}

/// Encode one sample as JPEG at `path`.
pub fn save_jpeg(path: &Path, sample: &CroppedSample) -> ImageResult<()> {
    let file = File::create(path)?;
    let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY);
    encoder.encode_image(&sample.image)
}
