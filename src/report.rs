//! Run report types for tracking skipped items and output counts.
//!
//! Every stage of the pipeline appends to a single [`RunReport`]. Skips are
//! logged as they happen and kept here so the final summary can list them.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::label::CanonicalClass;
use crate::split::Split;

/// A report generated during one pipeline run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RunReport {
    /// Annotation files found in the input directory.
    pub annotation_files: usize,
    /// `<object>` elements seen across all parsed annotation files.
    pub objects: usize,
    /// Crops buffered per class after scanning.
    pub cropped: BTreeMap<CanonicalClass, usize>,
    /// Crops written per class and split.
    pub written: BTreeMap<CanonicalClass, SplitCounts>,
    /// Items skipped along the way.
    pub issues: Vec<SkipIssue>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a skip at warn level and record it.
    pub fn skip(&mut self, reason: SkipReason, message: impl Into<String>) {
        let issue = SkipIssue {
            reason,
            message: message.into(),
        };
        log::warn!("[{}] {}", issue.reason, issue.message);
        self.issues.push(issue);
    }

    /// Count of skips with the given reason.
    pub fn skip_count(&self, reason: SkipReason) -> usize {
        self.issues.iter().filter(|i| i.reason == reason).count()
    }

    /// Total crops written across all classes and splits.
    pub fn total_written(&self) -> usize {
        self.written.values().map(SplitCounts::total).sum()
    }

    pub(crate) fn record_written(&mut self, class: CanonicalClass, split: Split) {
        let counts = self.written.entry(class).or_default();
        match split {
            Split::Train => counts.train += 1,
            Split::Val => counts.val += 1,
            Split::Test => counts.test += 1,
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  {} annotation files, {} objects, {} crops written",
            self.annotation_files,
            self.objects,
            self.total_written()
        )?;

        if !self.written.is_empty() {
            writeln!(f)?;
            writeln!(f, "Per class (train/val/test):")?;
            for (class, counts) in &self.written {
                writeln!(
                    f,
                    "  {:<8} {}/{}/{}",
                    class.as_str(),
                    counts.train,
                    counts.val,
                    counts.test
                )?;
            }
        }

        if !self.issues.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skipped ({}):", self.issues.len())?;
            for issue in &self.issues {
                writeln!(f, "  - [{}] {}", issue.reason, issue.message)?;
            }
        }

        Ok(())
    }
}

/// Crops per split for one class.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SplitCounts {
    pub train: usize,
    pub val: usize,
    pub test: usize,
}

impl SplitCounts {
    pub fn total(&self) -> usize {
        self.train + self.val + self.test
    }
}

/// A single skipped file or object.
#[derive(Clone, Debug, Serialize)]
pub struct SkipIssue {
    pub reason: SkipReason,
    pub message: String,
}

/// Why an item was skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// No image with a known extension shares the annotation's base name.
    MissingImage,
    /// The companion image could not be opened or decoded.
    UnreadableImage,
    /// The annotation file is not readable XML.
    MalformedXml,
    /// An object has no `<name>`.
    MissingLabel,
    /// An object's label is not in the label table.
    UnknownLabel,
    /// An object has no `<bndbox>`.
    MissingBndBox,
    /// A coordinate is missing or non-numeric, or the box has no area.
    MalformedBndBox,
    /// A crop could not be saved.
    WriteFailed,
    /// Annotation files below the top level are not scanned.
    NestedAnnotation,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::MissingImage => "missing_image",
            SkipReason::UnreadableImage => "unreadable_image",
            SkipReason::MalformedXml => "malformed_xml",
            SkipReason::MissingLabel => "missing_label",
            SkipReason::UnknownLabel => "unknown_label",
            SkipReason::MissingBndBox => "missing_bndbox",
            SkipReason::MalformedBndBox => "malformed_bndbox",
            SkipReason::WriteFailed => "write_failed",
            SkipReason::NestedAnnotation => "nested_annotation",
        };
        f.write_str(s)
    }
}
