//! Pixel-space bounding boxes in XYXY format.

use serde::Serialize;

/// An axis-aligned bounding box in absolute pixel coordinates
/// (xmin, ymin, xmax, ymax).
///
/// Note: the constructor does NOT enforce min < max. Boxes are built from
/// whatever the annotation says; the cropper rejects boxes that cannot
/// produce an image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PixelBox {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

impl PixelBox {
    /// Creates a new bounding box from explicit integer coordinates.
    #[inline]
    pub fn from_xyxy(xmin: i64, ymin: i64, xmax: i64, ymax: i64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Creates a box from floating-point annotation values, truncating each
    /// one toward zero.
    ///
    /// Values beyond the `i64` range saturate; NaN becomes 0.
    pub fn from_f64_truncated(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self::from_xyxy(
            xmin.trunc() as i64,
            ymin.trunc() as i64,
            xmax.trunc() as i64,
            ymax.trunc() as i64,
        )
    }

    /// Returns the width of the bounding box, or `None` if it does not fit
    /// in an `i64`.
    ///
    /// May be negative if the box is malformed (xmax < xmin).
    #[inline]
    pub fn width(&self) -> Option<i64> {
        self.xmax.checked_sub(self.xmin)
    }

    /// Returns the height of the bounding box, or `None` if it does not fit
    /// in an `i64`.
    ///
    /// May be negative if the box is malformed (ymax < ymin).
    #[inline]
    pub fn height(&self) -> Option<i64> {
        self.ymax.checked_sub(self.ymin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_toward_zero() {
        let bbox = PixelBox::from_f64_truncated(10.9, -0.7, 30.2, 40.999);
        assert_eq!(bbox, PixelBox::from_xyxy(10, 0, 30, 40));
        assert_eq!(bbox.width(), Some(20));
        assert_eq!(bbox.height(), Some(40));
    }

    #[test]
    fn out_of_range_values_saturate() {
        let bbox = PixelBox::from_f64_truncated(-1e300, 0.0, 1e300, 1.0);
        assert_eq!(bbox.xmin, i64::MIN);
        assert_eq!(bbox.xmax, i64::MAX);
        assert_eq!(bbox.width(), None);
        assert_eq!(bbox.height(), Some(1));
    }

    #[test]
    fn inverted_boxes_have_negative_extent() {
        let bbox = PixelBox::from_xyxy(5, 5, 10, 2);
        assert_eq!(bbox.width(), Some(5));
        assert_eq!(bbox.height(), Some(-3));
    }
}
