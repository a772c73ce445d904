//! MIME-type classification for the file-type filter.
//!
//! Classification is a static ordered table of `(class, patterns)` pairs
//! evaluated top to bottom with first-match-wins semantics. A MIME type
//! belongs to a class when it contains *any* of the class's patterns as a
//! substring. The same pattern lists drive the SQL-side filter, so the
//! in-process and query-level views of a class always agree.

use serde::{Deserialize, Serialize};

/// File classification derived from the MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileClass {
    /// No classification constraint.
    All,
    /// Raster/vector images.
    Image,
    /// Video files.
    Video,
    /// Audio files.
    Audio,
    /// Documents (PDF, office formats, plain text).
    Document,
    /// Compressed archives.
    Archive,
    /// Anything that matches no other class.
    Other,
}

/// Ordered classification table. Order matters: `text/` under `Document`
/// must not be reachable for MIME types already claimed by an earlier row.
const CLASS_TABLE: &[(FileClass, &[&str])] = &[
    (FileClass::Image, &["image/"]),
    (FileClass::Video, &["video/"]),
    (FileClass::Audio, &["audio/"]),
    (
        FileClass::Document,
        &[
            "pdf",
            "word",
            "document",
            "text/",
            "presentation",
            "spreadsheet",
        ],
    ),
    (
        FileClass::Archive,
        &["zip", "rar", "7z", "tar", "gz", "compressed"],
    ),
];

impl FileClass {
    /// Classify a MIME type. Returns [`FileClass::Other`] when no pattern
    /// in the table matches.
    pub fn classify(mime_type: &str) -> Self {
        let mime = mime_type.to_ascii_lowercase();
        for (class, patterns) in CLASS_TABLE {
            if patterns.iter().any(|p| mime.contains(p)) {
                return *class;
            }
        }
        Self::Other
    }

    /// The substring patterns for this class, or `None` for the
    /// pattern-less pseudo-classes `All` and `Other`.
    pub fn patterns(&self) -> Option<&'static [&'static str]> {
        CLASS_TABLE
            .iter()
            .find(|(class, _)| class == self)
            .map(|(_, patterns)| *patterns)
    }

    /// Every pattern in the table, across all classes. Used to express
    /// `Other` as "matches none of these" in SQL.
    pub fn all_patterns() -> impl Iterator<Item = &'static str> {
        CLASS_TABLE.iter().flat_map(|(_, patterns)| patterns.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_mime_prefix() {
        assert_eq!(FileClass::classify("image/png"), FileClass::Image);
        assert_eq!(FileClass::classify("video/mp4"), FileClass::Video);
        assert_eq!(FileClass::classify("audio/mpeg"), FileClass::Audio);
    }

    #[test]
    fn classifies_documents_by_fragment() {
        assert_eq!(FileClass::classify("application/pdf"), FileClass::Document);
        assert_eq!(
            FileClass::classify("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
            FileClass::Document
        );
        assert_eq!(FileClass::classify("text/plain"), FileClass::Document);
    }

    #[test]
    fn classifies_archives_by_fragment() {
        assert_eq!(FileClass::classify("application/zip"), FileClass::Archive);
        assert_eq!(FileClass::classify("application/x-tar"), FileClass::Archive);
        assert_eq!(
            FileClass::classify("application/x-7z-compressed"),
            FileClass::Archive
        );
    }

    #[test]
    fn unknown_mime_is_other() {
        assert_eq!(
            FileClass::classify("application/octet-stream"),
            FileClass::Other
        );
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(FileClass::classify("Image/PNG"), FileClass::Image);
    }

    #[test]
    fn pseudo_classes_have_no_patterns() {
        assert!(FileClass::All.patterns().is_none());
        assert!(FileClass::Other.patterns().is_none());
        assert!(FileClass::Image.patterns().is_some());
    }
}
