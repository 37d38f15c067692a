//! Pascal VOC XML annotation reader.
//!
//! Only the parts needed for cropping are read: every `<object>` directly
//! under the root element, its `<name>`, and its `<bndbox>`. Problems inside
//! a single object are kept on that object so the caller can skip it and
//! carry on with the rest of the file.

use std::fs;
use std::path::Path;

use roxmltree::Node;
use thiserror::Error;

use crate::bbox::PixelBox;
use crate::error::Voc2ClsError;

/// The objects of one annotation file, in document order.
#[derive(Clone, Debug, Default)]
pub struct VocAnnotation {
    pub objects: Vec<VocObject>,
}

/// One `<object>` element.
#[derive(Clone, Debug)]
pub struct VocObject {
    /// Position among the file's `<object>` elements, counting every one.
    pub index: usize,
    /// Trimmed `<name>` text, or `None` if absent or empty.
    pub name: Option<String>,
    pub bndbox: Result<PixelBox, BndBoxError>,
}

/// Why an object's bounding box could not be read.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BndBoxError {
    #[error("missing <bndbox> in <object>")]
    Missing,

    #[error("missing <{tag}> in <bndbox>")]
    MissingCoord { tag: &'static str },

    #[error("invalid <{tag}> value '{raw}' in <bndbox>; expected a finite number")]
    InvalidCoord { tag: &'static str, raw: String },
}

/// Read and parse one VOC XML file.
pub fn parse_voc_xml(path: &Path) -> Result<VocAnnotation, Voc2ClsError> {
    let xml = fs::read_to_string(path).map_err(|source| Voc2ClsError::VocXmlParse {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;
    parse_voc_xml_str(&xml, path)
}

/// Parse VOC XML from a string. `path` is only used in error messages.
pub fn parse_voc_xml_str(xml: &str, path: &Path) -> Result<VocAnnotation, Voc2ClsError> {
    let document =
        roxmltree::Document::parse(xml).map_err(|source| Voc2ClsError::VocXmlParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

    let objects = document
        .root_element()
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "object")
        .enumerate()
        .map(|(index, object)| VocObject {
            index,
            name: optional_child_text(object, "name"),
            bndbox: parse_bndbox(object),
        })
        .collect();

    Ok(VocAnnotation { objects })
}

fn parse_bndbox(object: Node<'_, '_>) -> Result<PixelBox, BndBoxError> {
    let bndbox = child_element(object, "bndbox").ok_or(BndBoxError::Missing)?;

    let xmin = parse_coord(bndbox, "xmin")?;
    let ymin = parse_coord(bndbox, "ymin")?;
    let xmax = parse_coord(bndbox, "xmax")?;
    let ymax = parse_coord(bndbox, "ymax")?;

    Ok(PixelBox::from_f64_truncated(xmin, ymin, xmax, ymax))
}

fn parse_coord(bndbox: Node<'_, '_>, tag: &'static str) -> Result<f64, BndBoxError> {
    let raw = optional_child_text(bndbox, tag).ok_or(BndBoxError::MissingCoord { tag })?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(BndBoxError::InvalidCoord { tag, raw }),
    }
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

fn optional_child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    child_element(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> VocAnnotation {
        parse_voc_xml_str(xml, Path::new("sample.xml")).expect("parse xml")
    }

    #[test]
    fn parse_voc_xml_extracts_names_and_boxes() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<annotation>
  <filename>img1.jpg</filename>
  <object>
    <name> Sujud </name>
    <bndbox>
      <xmin>10.7</xmin>
      <ymin>20</ymin>
      <xmax>30</xmax>
      <ymax>40.2</ymax>
    </bndbox>
  </object>
  <object>
    <name>julus</name>
    <bndbox>
      <xmin>1</xmin>
      <ymin>2</ymin>
      <xmax>3</xmax>
      <ymax>4</ymax>
    </bndbox>
  </object>
</annotation>"#;

        let parsed = parse(xml);
        assert_eq!(parsed.objects.len(), 2);
        assert_eq!(parsed.objects[0].index, 0);
        assert_eq!(parsed.objects[0].name.as_deref(), Some("Sujud"));
        assert_eq!(
            parsed.objects[0].bndbox,
            Ok(PixelBox::from_xyxy(10, 20, 30, 40))
        );
        assert_eq!(parsed.objects[1].index, 1);
        assert_eq!(parsed.objects[1].name.as_deref(), Some("julus"));
    }

    #[test]
    fn object_level_problems_stay_on_the_object() {
        let xml = r#"<annotation>
  <object><name>ruku</name></object>
  <object>
    <bndbox><xmin>1</xmin><ymin>2</ymin><xmax>3</xmax><ymax>4</ymax></bndbox>
  </object>
  <object>
    <name>qiyam</name>
    <bndbox><xmin>1</xmin><ymin>abc</ymin><xmax>3</xmax><ymax>4</ymax></bndbox>
  </object>
  <object>
    <name>qiyam</name>
    <bndbox><xmin>1</xmin><ymin>2</ymin><xmax>3</xmax></bndbox>
  </object>
  <object>
    <name>qiyam</name>
    <bndbox><xmin>nan</xmin><ymin>2</ymin><xmax>3</xmax><ymax>4</ymax></bndbox>
  </object>
</annotation>"#;

        let parsed = parse(xml);
        assert_eq!(parsed.objects.len(), 5);
        assert_eq!(parsed.objects[0].bndbox, Err(BndBoxError::Missing));
        assert_eq!(parsed.objects[1].name, None);
        assert!(parsed.objects[1].bndbox.is_ok());
        assert_eq!(
            parsed.objects[2].bndbox,
            Err(BndBoxError::InvalidCoord {
                tag: "ymin",
                raw: "abc".to_string()
            })
        );
        assert_eq!(
            parsed.objects[3].bndbox,
            Err(BndBoxError::MissingCoord { tag: "ymax" })
        );
        assert!(matches!(
            parsed.objects[4].bndbox,
            Err(BndBoxError::InvalidCoord { tag: "xmin", .. })
        ));
    }

    #[test]
    fn nested_objects_are_not_collected() {
        let xml = r#"<annotation>
  <part><object><name>ruku</name></object></part>
</annotation>"#;
        assert!(parse(xml).objects.is_empty());
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let err = parse_voc_xml_str("<annotation><object>", Path::new("bad.xml"))
            .expect_err("should fail");
        assert!(matches!(err, Voc2ClsError::VocXmlParse { .. }));
        assert!(err.to_string().contains("bad.xml"));
    }
}
