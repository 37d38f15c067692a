//! Output directory layout.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Voc2ClsError;
use crate::label::CanonicalClass;
use crate::split::Split;

/// Destination folder for one split/class pair.
pub fn class_dir(output_base: &Path, split: Split, class: CanonicalClass) -> PathBuf {
    output_base.join(split.as_str()).join(class.as_str())
}

/// Create `output_base/<split>/<class>` for every split and class.
///
/// Existing directories and their contents are left alone.
pub fn init_output_layout(output_base: &Path) -> Result<(), Voc2ClsError> {
    for split in Split::ALL {
        for class in CanonicalClass::ALL {
            let dir = class_dir(output_base, split, class);
            fs::create_dir_all(&dir)
                .map_err(|source| Voc2ClsError::OutputLayout { path: dir, source })?;
        }
    }
    log::debug!("Output layout ready under {}", output_base.display());
    Ok(())
}
