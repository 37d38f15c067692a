//! Annotation scanning.
//!
//! Walks the input directory, pairs each VOC XML file with its image, and
//! crops every recognized object into a per-class bucket. Nothing in here
//! aborts on a bad file or object: problems are recorded as skips on the
//! [`RunReport`] and the scan moves on.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageReader, RgbImage};
use walkdir::WalkDir;

use crate::config::{ANNOTATION_EXTENSION, IMAGE_EXTENSIONS};
use crate::crop::{crop_region, CroppedSample};
use crate::error::Voc2ClsError;
use crate::label::{normalize_label, CanonicalClass};
use crate::report::{RunReport, SkipReason};
use crate::voc::{parse_voc_xml, BndBoxError, VocObject};

/// Cropped samples grouped by class, in discovery order.
pub type ClassBuckets = BTreeMap<CanonicalClass, Vec<CroppedSample>>;

/// Scan `input_dir` and crop every usable object.
///
/// Only fails if `input_dir` itself cannot be listed.
pub fn scan_dataset(
    input_dir: &Path,
    report: &mut RunReport,
) -> Result<ClassBuckets, Voc2ClsError> {
    let xml_files = collect_annotation_files(input_dir, report)?;
    report.annotation_files = xml_files.len();
    log::info!(
        "Found {} annotation file(s) in {}",
        xml_files.len(),
        input_dir.display()
    );

    let mut buckets = ClassBuckets::new();
    for xml_path in &xml_files {
        scan_annotation_file(xml_path, &mut buckets, report);
    }

    for (class, samples) in &buckets {
        report.cropped.insert(*class, samples.len());
        log::info!("Cropped {} sample(s) for class {}", samples.len(), class);
    }

    Ok(buckets)
}

/// List the `.xml` files directly inside `dir`, sorted by file name.
///
/// Annotation files in subdirectories are not scanned; if any exist a
/// single skip is recorded for them.
pub fn collect_annotation_files(
    dir: &Path,
    report: &mut RunReport,
) -> Result<Vec<PathBuf>, Voc2ClsError> {
    let input_dir_err = |source| Voc2ClsError::InputDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(input_dir_err)? {
        let path = entry.map_err(input_dir_err)?.path();
        if path.is_file() && has_xml_extension(&path) {
            files.push(path);
        }
    }

    files.sort_by_cached_key(|path| {
        path.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    });

    let mut nested_xml: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .min_depth(2)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && has_xml_extension(entry.path()))
        .map(|entry| entry.path().to_path_buf())
        .collect();

    if !nested_xml.is_empty() {
        nested_xml.sort();
        report.skip(
            SkipReason::NestedAnnotation,
            format!(
                "Input directory is scanned flat; skipping {} nested .xml file(s), e.g. {}",
                nested_xml.len(),
                rel_string(dir, &nested_xml[0])
            ),
        );
    }

    Ok(files)
}

/// Find the image that belongs to `base_name` in `dir`.
///
/// Extensions are tried in [`IMAGE_EXTENSIONS`] order; the first existing
/// file wins.
pub fn resolve_companion_image(dir: &Path, base_name: &str) -> Option<PathBuf> {
    IMAGE_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{base_name}.{ext}")))
        .find(|candidate| candidate.is_file())
}

/// Process one annotation file, appending its crops to `buckets`.
pub fn scan_annotation_file(
    xml_path: &Path,
    buckets: &mut ClassBuckets,
    report: &mut RunReport,
) {
    let file = display_name(xml_path);
    let Some(base_name) = xml_path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
        return;
    };
    let dir = xml_path.parent().unwrap_or_else(|| Path::new("."));

    let Some(image_path) = resolve_companion_image(dir, &base_name) else {
        report.skip(SkipReason::MissingImage, format!("Missing image for {file}"));
        return;
    };

    let image = match open_rgb(&image_path) {
        Ok(image) => image,
        Err(message) => {
            report.skip(
                SkipReason::UnreadableImage,
                format!("Failed to open {}: {message}", image_path.display()),
            );
            return;
        }
    };

    let annotation = match parse_voc_xml(xml_path) {
        Ok(annotation) => annotation,
        Err(err) => {
            report.skip(SkipReason::MalformedXml, err.to_string());
            return;
        }
    };

    log::debug!(
        "{}: {} object(s), image {}x{}",
        file,
        annotation.objects.len(),
        image.width(),
        image.height()
    );
    report.objects += annotation.objects.len();

    for object in &annotation.objects {
        if let Some((class, sample)) = crop_object(&image, &base_name, &file, object, report) {
            buckets.entry(class).or_default().push(sample);
        }
    }
}

fn crop_object(
    image: &RgbImage,
    base_name: &str,
    file: &str,
    object: &VocObject,
    report: &mut RunReport,
) -> Option<(CanonicalClass, CroppedSample)> {
    let Some(raw_label) = object.name.as_deref() else {
        report.skip(
            SkipReason::MissingLabel,
            format!("Missing <name> for object {} in {file}", object.index),
        );
        return None;
    };

    let Some(class) = normalize_label(raw_label) else {
        report.skip(
            SkipReason::UnknownLabel,
            format!("Unknown label: {raw_label} in {file}"),
        );
        return None;
    };

    let bbox = match &object.bndbox {
        Ok(bbox) => bbox,
        Err(BndBoxError::Missing) => {
            report.skip(SkipReason::MissingBndBox, format!("Missing <bndbox> in {file}"));
            return None;
        }
        Err(err) => {
            report.skip(
                SkipReason::MalformedBndBox,
                format!("Incomplete bounding box in {file}: {err}"),
            );
            return None;
        }
    };

    let cropped = match crop_region(image, bbox) {
        Ok(cropped) => cropped,
        Err(err) => {
            report.skip(
                SkipReason::MalformedBndBox,
                format!(
                    "Unusable bounding box ({}, {}, {}, {}) in {file}: {err}",
                    bbox.xmin, bbox.ymin, bbox.xmax, bbox.ymax
                ),
            );
            return None;
        }
    };

    Some((class, CroppedSample::new(cropped, base_name, object.index)))
}

fn open_rgb(path: &Path) -> Result<RgbImage, String> {
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|err| err.to_string())?;
    let decoded = reader.decode().map_err(|err| err.to_string())?;
    Ok(decoded.to_rgb8())
}

fn has_xml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == ANNOTATION_EXTENSION)
        .unwrap_or(false)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn rel_string(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}
