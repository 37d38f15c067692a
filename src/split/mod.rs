//! Train/validation/test splitting.
//!
//! Each class is shuffled on its own and cut into three contiguous slices.
//! Boundaries use truncating arithmetic, so the test slice absorbs whatever
//! rounding leaves over.

use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::SplitRatios;
use crate::label::CanonicalClass;

/// One of the three dataset subsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Val,
    Test,
}

impl Split {
    /// Every split, in output order.
    pub const ALL: [Split; 3] = [Split::Train, Split::Val, Split::Test];

    /// Folder name for this split.
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three slices of one class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitSamples<T> {
    pub train: Vec<T>,
    pub val: Vec<T>,
    pub test: Vec<T>,
}

impl<T> SplitSamples<T> {
    /// Samples in all three slices.
    pub fn len(&self) -> usize {
        self.train.len() + self.val.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the slice for `split`.
    pub fn get(&self, split: Split) -> &[T] {
        match split {
            Split::Train => &self.train,
            Split::Val => &self.val,
            Split::Test => &self.test,
        }
    }

    /// Iterate over `(split, slice)` pairs in train, val, test order.
    pub fn iter(&self) -> impl Iterator<Item = (Split, &[T])> + '_ {
        Split::ALL.into_iter().map(move |split| (split, self.get(split)))
    }
}

/// Split assignment for every class.
pub type SplitPlan<T> = BTreeMap<CanonicalClass, SplitSamples<T>>;

/// Compute `(train_end, val_end)` for `total` items.
///
/// `train_end = trunc(total * train)` and
/// `val_end = train_end + trunc(total * val)`, clamped to `total`.
pub fn partition_bounds(total: usize, ratios: SplitRatios) -> (usize, usize) {
    let train_end = ((total as f64 * ratios.train) as usize).min(total);
    let val_len = (total as f64 * ratios.val) as usize;
    let val_end = (train_end + val_len).min(total);
    (train_end, val_end)
}

/// Cut `items` into contiguous train/val/test slices, keeping their order.
pub fn partition<T>(mut items: Vec<T>, ratios: SplitRatios) -> SplitSamples<T> {
    let (train_end, val_end) = partition_bounds(items.len(), ratios);
    let test = items.split_off(val_end);
    let val = items.split_off(train_end);
    SplitSamples {
        train: items,
        val,
        test,
    }
}

/// Shuffle and partition every class bucket.
///
/// With a seed the assignment is reproducible; without one each call draws
/// a fresh order from the thread-local generator.
pub fn split_buckets<T>(
    buckets: BTreeMap<CanonicalClass, Vec<T>>,
    ratios: SplitRatios,
    seed: Option<u64>,
) -> SplitPlan<T> {
    let mut plan = SplitPlan::new();

    if let Some(seed) = seed {
        let mut rng = StdRng::seed_from_u64(seed);
        for (class, mut items) in buckets {
            items.shuffle(&mut rng);
            plan.insert(class, partition(items, ratios));
        }
    } else {
        let mut rng = rand::rng();
        for (class, mut items) in buckets {
            items.shuffle(&mut rng);
            plan.insert(class, partition(items, ratios));
        }
    }

    for (class, samples) in &plan {
        log::info!(
            "{}: {} train, {} val, {} test",
            class,
            samples.train.len(),
            samples.val.len(),
            samples.test.len()
        );
    }

    plan
}
