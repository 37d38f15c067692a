//! Raw label normalization.
//!
//! Annotators used several spellings for the same posture. Every accepted
//! spelling maps to one [`CanonicalClass`], whose name is also the output
//! folder name.

use serde::Serialize;
use std::fmt;

/// A normalized target class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalClass {
    Qiyam,
    Ruku,
    Sitting,
    Sujud,
}

impl CanonicalClass {
    /// Every canonical class, in folder-name order.
    pub const ALL: [CanonicalClass; 4] = [
        CanonicalClass::Qiyam,
        CanonicalClass::Ruku,
        CanonicalClass::Sitting,
        CanonicalClass::Sujud,
    ];

    /// Folder name for this class.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalClass::Qiyam => "qiyam",
            CanonicalClass::Ruku => "ruku",
            CanonicalClass::Sitting => "sitting",
            CanonicalClass::Sujud => "sujud",
        }
    }
}

impl fmt::Display for CanonicalClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw label spellings and the class each one maps to.
pub const LABEL_TABLE: [(&str, CanonicalClass); 6] = [
    ("Sujud", CanonicalClass::Sujud),
    ("sujud", CanonicalClass::Sujud),
    ("julus", CanonicalClass::Sitting),
    ("sitting", CanonicalClass::Sitting),
    ("qiyam", CanonicalClass::Qiyam),
    ("ruku", CanonicalClass::Ruku),
];

/// Map a raw annotation label to its canonical class.
///
/// Surrounding whitespace is ignored; matching is otherwise exact, so
/// `"Ruku"` is not recognized.
pub fn normalize_label(raw: &str) -> Option<CanonicalClass> {
    let raw = raw.trim();
    LABEL_TABLE
        .iter()
        .find(|(spelling, _)| *spelling == raw)
        .map(|(_, class)| *class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_spellings_map_to_classes() {
        assert_eq!(normalize_label("Sujud"), Some(CanonicalClass::Sujud));
        assert_eq!(normalize_label("sujud"), Some(CanonicalClass::Sujud));
        assert_eq!(normalize_label("julus"), Some(CanonicalClass::Sitting));
        assert_eq!(normalize_label("sitting"), Some(CanonicalClass::Sitting));
        assert_eq!(normalize_label("qiyam"), Some(CanonicalClass::Qiyam));
        assert_eq!(normalize_label("ruku"), Some(CanonicalClass::Ruku));
    }

    #[test]
    fn lookup_trims_but_is_case_sensitive() {
        assert_eq!(normalize_label("  julus\n"), Some(CanonicalClass::Sitting));
        assert_eq!(normalize_label("Ruku"), None);
        assert_eq!(normalize_label("standing"), None);
        assert_eq!(normalize_label(""), None);
    }

    #[test]
    fn every_table_target_is_listed_in_all() {
        for (_, class) in LABEL_TABLE {
            assert!(CanonicalClass::ALL.contains(&class));
        }
        let names: Vec<_> = CanonicalClass::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, ["qiyam", "ruku", "sitting", "sujud"]);
    }
}
