//! JSON publication stage.
//!
//! Reads a canonical text file and writes one JSON document per
//! chapter under `<out>/<version>/<Book>/<chapter>.json`, plus a
//! `manifest.json` describing the whole version. The chapter files
//! are the interchange format the HTML stage consumes, and are small
//! enough to fetch individually from a static host.

use crate::canon::{self, CanonError};
use crate::config::VersionConfig;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("canonical parse error: {0}")]
    Canon(#[from] CanonError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no books found in {0}")]
    Empty(PathBuf),
}

/// One chapter as published to disk.
///
/// Verse keys are numeric so they serialize in verse order; serde_json
/// renders them as string keys.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChapterDoc {
    pub book: String,
    pub chapter: u32,
    pub version: String,
    pub verses: BTreeMap<u32, String>,
    pub metadata: ChapterMetadata,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChapterMetadata {
    pub verse_count: usize,
    pub last_updated: String,
}

/// Version-level index written next to the book directories.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub name: String,
    pub generated: String,
    /// SHA-256 of the canonical source text, hex encoded.
    pub source_sha256: String,
    pub books: Vec<ManifestBook>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ManifestBook {
    pub name: String,
    pub chapters: usize,
}

/// What the publish stage produced.
#[derive(Debug)]
pub struct PublishSummary {
    pub books: usize,
    pub chapters: usize,
    pub verses: usize,
    pub out_dir: PathBuf,
}

/// Publish a canonical text file as per-chapter JSON under
/// `out_dir/<version.code>/`.
pub fn publish(
    input: &Path,
    out_dir: &Path,
    version: &VersionConfig,
) -> Result<PublishSummary, PublishError> {
    let source = fs::read_to_string(input)?;
    let books = canon::parse_canonical(&source);
    if books.is_empty() {
        return Err(PublishError::Empty(input.to_path_buf()));
    }

    let version_dir = out_dir.join(&version.code);
    let timestamp = Utc::now().to_rfc3339();
    let mut chapters = 0;
    let mut verses = 0;
    let mut manifest_books = Vec::with_capacity(books.len());

    for book in &books {
        let book_dir = version_dir.join(&book.name);
        fs::create_dir_all(&book_dir)?;
        for chapter in &book.chapters {
            let doc = ChapterDoc {
                book: book.name.clone(),
                chapter: chapter.number,
                version: version.code.clone(),
                verses: chapter
                    .verses
                    .iter()
                    .map(|v| (v.number, v.text.clone()))
                    .collect(),
                metadata: ChapterMetadata {
                    verse_count: chapter.verses.len(),
                    last_updated: timestamp.clone(),
                },
            };
            let path = book_dir.join(format!("{}.json", chapter.number));
            fs::write(&path, serde_json::to_string_pretty(&doc)?)?;
            chapters += 1;
            verses += chapter.verses.len();
        }
        manifest_books.push(ManifestBook {
            name: book.name.clone(),
            chapters: book.chapters.len(),
        });
    }

    let manifest = Manifest {
        version: version.code.clone(),
        name: version.display_name(),
        generated: timestamp,
        source_sha256: hex_digest(&source),
        books: manifest_books,
    };
    fs::write(
        version_dir.join("manifest.json"),
        serde_json::to_string_pretty(&manifest)?,
    )?;

    Ok(PublishSummary {
        books: books.len(),
        chapters,
        verses,
        out_dir: version_dir,
    })
}

/// What the verification pass found.
#[derive(Debug)]
pub struct VerifySummary {
    pub chapters: usize,
    pub problems: Vec<String>,
}

impl VerifySummary {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Check a published version directory against its manifest.
///
/// Every chapter file the manifest promises must exist, parse as a
/// [`ChapterDoc`], and agree with its own path and metadata. Problems
/// are collected rather than failing fast so one bad file does not
/// hide the rest.
pub fn verify(version_dir: &Path) -> Result<VerifySummary, PublishError> {
    let raw = fs::read_to_string(version_dir.join("manifest.json"))?;
    let manifest: Manifest = serde_json::from_str(&raw)?;

    let mut chapters = 0;
    let mut problems = Vec::new();

    for book in &manifest.books {
        for number in 1..=book.chapters as u32 {
            chapters += 1;
            let path = version_dir.join(&book.name).join(format!("{number}.json"));
            let reference = format!("{} {number}", book.name);

            let raw = match fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(_) => {
                    problems.push(format!("{reference}: missing {}", path.display()));
                    continue;
                }
            };
            let doc: ChapterDoc = match serde_json::from_str(&raw) {
                Ok(doc) => doc,
                Err(err) => {
                    problems.push(format!("{reference}: unreadable JSON ({err})"));
                    continue;
                }
            };

            if doc.book != book.name || doc.chapter != number {
                problems.push(format!(
                    "{reference}: file claims to be {} {}",
                    doc.book, doc.chapter
                ));
            }
            if doc.version != manifest.version {
                problems.push(format!(
                    "{reference}: version {:?} does not match manifest {:?}",
                    doc.version, manifest.version
                ));
            }
            if doc.verses.is_empty() {
                problems.push(format!("{reference}: no verses"));
            }
            if doc.metadata.verse_count != doc.verses.len() {
                problems.push(format!(
                    "{reference}: verse_count {} but {} verses",
                    doc.metadata.verse_count,
                    doc.verses.len()
                ));
            }
        }
    }

    Ok(VerifySummary { chapters, problems })
}

fn hex_digest(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
Genesis

Chapter 1

1 In the beginning God created the heaven and the earth.
2 And the earth was without form, and void.

Chapter 2

1 Thus the heavens and the earth were finished.

Exodus

Chapter 1

1 Now these are the names of the children of Israel.
";

    fn publish_sample(tmp: &TempDir) -> PublishSummary {
        let input = tmp.path().join("kjv.txt");
        fs::write(&input, SAMPLE).unwrap();
        publish(&input, tmp.path(), &VersionConfig::default()).unwrap()
    }

    #[test]
    fn writes_one_file_per_chapter() {
        let tmp = TempDir::new().unwrap();
        let summary = publish_sample(&tmp);

        assert_eq!(summary.books, 2);
        assert_eq!(summary.chapters, 3);
        assert_eq!(summary.verses, 4);
        assert!(tmp.path().join("kjv/Genesis/1.json").exists());
        assert!(tmp.path().join("kjv/Genesis/2.json").exists());
        assert!(tmp.path().join("kjv/Exodus/1.json").exists());
    }

    #[test]
    fn chapter_doc_fields() {
        let tmp = TempDir::new().unwrap();
        publish_sample(&tmp);

        let raw = fs::read_to_string(tmp.path().join("kjv/Genesis/1.json")).unwrap();
        let doc: ChapterDoc = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc.book, "Genesis");
        assert_eq!(doc.chapter, 1);
        assert_eq!(doc.version, "kjv");
        assert_eq!(doc.metadata.verse_count, 2);
        assert_eq!(
            doc.verses.get(&1).map(String::as_str),
            Some("In the beginning God created the heaven and the earth.")
        );
    }

    #[test]
    fn verse_keys_serialize_in_numeric_order() {
        let mut verses = BTreeMap::new();
        for n in [10, 2, 1] {
            verses.insert(n, format!("verse {n}"));
        }
        let doc = ChapterDoc {
            book: "Psalms".to_string(),
            chapter: 119,
            version: "kjv".to_string(),
            metadata: ChapterMetadata {
                verse_count: 3,
                last_updated: "2024-01-01T00:00:00+00:00".to_string(),
            },
            verses,
        };
        let json = serde_json::to_string(&doc).unwrap();
        let one = json.find("\"1\":").unwrap();
        let two = json.find("\"2\":").unwrap();
        let ten = json.find("\"10\":").unwrap();
        assert!(one < two && two < ten);
    }

    #[test]
    fn manifest_lists_books_and_checksum() {
        let tmp = TempDir::new().unwrap();
        publish_sample(&tmp);

        let raw = fs::read_to_string(tmp.path().join("kjv/manifest.json")).unwrap();
        let manifest: Manifest = serde_json::from_str(&raw).unwrap();
        assert_eq!(manifest.version, "kjv");
        assert_eq!(manifest.name, "KJV");
        assert_eq!(manifest.books.len(), 2);
        assert_eq!(manifest.books[0].name, "Genesis");
        assert_eq!(manifest.books[0].chapters, 2);
        assert_eq!(manifest.source_sha256.len(), 64);
    }

    #[test]
    fn verify_accepts_a_fresh_publish() {
        let tmp = TempDir::new().unwrap();
        publish_sample(&tmp);

        let summary = verify(&tmp.path().join("kjv")).unwrap();
        assert_eq!(summary.chapters, 3);
        assert!(summary.is_clean());
    }

    #[test]
    fn verify_reports_missing_and_mismatched_chapters() {
        let tmp = TempDir::new().unwrap();
        publish_sample(&tmp);
        let version_dir = tmp.path().join("kjv");

        fs::remove_file(version_dir.join("Exodus/1.json")).unwrap();
        let path = version_dir.join("Genesis/2.json");
        let mut doc: ChapterDoc =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        doc.metadata.verse_count = 99;
        fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();

        let summary = verify(&version_dir).unwrap();
        assert_eq!(summary.chapters, 3);
        assert_eq!(summary.problems.len(), 2);
        assert!(summary.problems.iter().any(|p| p.contains("Exodus 1")));
        assert!(
            summary
                .problems
                .iter()
                .any(|p| p.contains("verse_count 99 but 1 verses"))
        );
    }

    #[test]
    fn verify_without_a_manifest_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(verify(tmp.path()), Err(PublishError::Io(_))));
    }

    #[test]
    fn empty_input_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("empty.txt");
        fs::write(&input, "").unwrap();

        let result = publish(&input, tmp.path(), &VersionConfig::default());
        assert!(matches!(result, Err(PublishError::Empty(_))));
    }
}
