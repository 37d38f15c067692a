//! Fixed pipeline configuration.
//!
//! The split ratios, the label table (see [`crate::label`]) and the output
//! encoding are compile-time constants. Only the input and output
//! directories can be overridden from the command line.

/// Directory scanned for image + XML pairs when `--input-dir` is not given.
pub const DEFAULT_INPUT_DIR: &str = "Salat-All-img-xml";

/// Root of the generated `{train,val,test}/{class}` tree when
/// `--output-dir` is not given.
pub const DEFAULT_OUTPUT_DIR: &str = "classified_dataset";

/// Extensions tried, in order, when looking for an annotation's image.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];

/// Extension of annotation files (matched case-sensitively).
pub const ANNOTATION_EXTENSION: &str = "xml";

/// Extension given to every written crop.
pub const OUTPUT_EXTENSION: &str = "jpg";

/// JPEG quality used for crops.
pub const JPEG_QUALITY: u8 = 75;

/// Largest crop, in pixels, that will be allocated. Boxes above this are
/// rejected as malformed.
pub const MAX_CROP_PIXELS: u64 = 1 << 26;

/// Proportions of each class routed to train and validation.
///
/// The test share is whatever is left after truncation, so it is not
/// stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitRatios {
    pub train: f64,
    pub val: f64,
}

impl SplitRatios {
    /// 80% train, 10% validation, remainder test.
    pub const DEFAULT: SplitRatios = SplitRatios {
        train: 0.8,
        val: 0.1,
    };
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self::DEFAULT
    }
}
