#![allow(dead_code)]

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};

/// Write a solid-colour RGB image; the format follows the file extension.
pub fn write_image(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    RgbImage::from_pixel(width, height, Rgb([90, 120, 150]))
        .save(path)
        .expect("write image file");
}

/// A `<object>` entry for [`voc_xml`].
pub struct Obj<'a> {
    pub name: &'a str,
    pub bbox: (f64, f64, f64, f64),
}

pub fn obj(name: &str, bbox: (f64, f64, f64, f64)) -> Obj<'_> {
    Obj { name, bbox }
}

/// Build a minimal VOC annotation document.
pub fn voc_xml(filename: &str, objects: &[Obj<'_>]) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<annotation>\n");
    xml.push_str(&format!("  <filename>{filename}</filename>\n"));
    for object in objects {
        let (xmin, ymin, xmax, ymax) = object.bbox;
        xml.push_str("  <object>\n");
        xml.push_str(&format!("    <name>{}</name>\n", object.name));
        xml.push_str("    <bndbox>\n");
        xml.push_str(&format!("      <xmin>{xmin}</xmin>\n      <ymin>{ymin}</ymin>\n"));
        xml.push_str(&format!("      <xmax>{xmax}</xmax>\n      <ymax>{ymax}</ymax>\n"));
        xml.push_str("    </bndbox>\n  </object>\n");
    }
    xml.push_str("</annotation>\n");
    xml
}

/// Write `<base>.xml` and `<base>.<image_ext>` into `dir`.
pub fn write_pair(
    dir: &Path,
    base: &str,
    image_ext: &str,
    size: (u32, u32),
    objects: &[Obj<'_>],
) {
    let image_name = format!("{base}.{image_ext}");
    write_image(&dir.join(&image_name), size.0, size.1);
    fs::write(dir.join(format!("{base}.xml")), voc_xml(&image_name, objects)).expect("write xml");
}

/// Every `.jpg` under `root`, as `split/class/name` strings, sorted.
pub fn output_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .expect("under root")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}
