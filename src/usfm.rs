//! USFM markup → canonical model.
//!
//! USFM (Unified Standard Format Markup) marks Bible text with
//! backslash tags: `\c N` opens a chapter, `\v N text` opens a verse,
//! and a zoo of inline markers wraps footnotes, cross-references, and
//! word-level annotations:
//!
//! ```text
//! \c 1
//! \v 1 \w In|strong="H7225"\w* the beginning God created
//! \f + \fr 1:1 \ft Or, the heavens \f* the heaven and the earth.
//! ```
//!
//! Each input file carries one book, identified by the 3-letter code in
//! its filename. Output books follow canonical order regardless of
//! directory listing order.
//!
//! ## Tag stripping
//!
//! Verse text is cleaned by [`clean_usfm_text`]: an ordered table of
//! (pattern, replacement) rules in [`CLEAN_RULES`], each annotated with
//! the USFM artifact it targets. Order matters — structured footnotes
//! must go before the general backslash-code sweep, and word-marker
//! unwrapping before attribute stripping. The whole pass is idempotent:
//! cleaning already-clean text is a no-op.
//!
//! ## Duplicate verses
//!
//! Some USFM sources repeat a verse number within a chapter (split
//! poetry lines, versification quirks). Duplicates merge by
//! concatenation in first-occurrence order, and each merge is reported
//! as a warning.

use crate::books;
use crate::canon::{Book, Chapter, Verse};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UsfmError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no USFM files found in {0}")]
    NoFiles(PathBuf),
}

/// One tag-stripping rule: the artifact it targets, the pattern, and
/// its replacement (regex `$n` groups allowed).
struct CleanRule {
    /// USFM artifact the rule removes or unwraps.
    artifact: &'static str,
    pattern: &'static str,
    replacement: &'static str,
}

/// Ordered tag-stripping rules. Applied top to bottom, each with
/// `replace_all`.
const CLEAN_RULES: &[CleanRule] = &[
    CleanRule {
        artifact: "structured footnote (\\f + \\fr ref \\ft text \\f*)",
        pattern: r"\\f\s+[^\\]*?\\fr\s+[^\\]*?\\ft\s+[^\\]*?\\f\*",
        replacement: "",
    },
    CleanRule {
        artifact: "simple footnote (\\f ... \\f*)",
        pattern: r"\\f[^\\]*?\\f\*",
        replacement: "",
    },
    CleanRule {
        artifact: "cross-reference (\\x ... \\x*)",
        pattern: r"\\x[^\\]*?\\x\*",
        replacement: "",
    },
    CleanRule {
        artifact: "word marker with attributes (\\w text|strong=\"...\"\\w*)",
        pattern: r#"\\w\s+([^\\|]*?)\|[^\\]*?\\w\*"#,
        replacement: "$1 ",
    },
    CleanRule {
        artifact: "plain word marker (\\w text\\w*)",
        pattern: r"\\w\s+([^\\|]*?)\\w\*",
        replacement: "$1 ",
    },
    CleanRule {
        artifact: "bare word attribute left outside a \\w pair",
        pattern: r#"\|\s*strong="[^"]*""#,
        replacement: "",
    },
    CleanRule {
        artifact: "stray strong's attribute (\\strong=\"...\")",
        pattern: r#"\\strong="[^"]*""#,
        replacement: "",
    },
    CleanRule {
        artifact: "legacy character marker pair (+wh ... +wh*)",
        pattern: r"\+wh[^+]*\+wh\*",
        replacement: "",
    },
    CleanRule {
        artifact: "inline footnote body (+ C:V text.)",
        pattern: r"\+\s*\d+:\d+\s+[^.]*\.",
        replacement: "",
    },
    CleanRule {
        artifact: "stray footnote caller (+)",
        pattern: r"\+",
        replacement: "",
    },
    CleanRule {
        artifact: "reference remnant left by a stripped footnote caller",
        // Leaves the surrounding whitespace for the whitespace rule to
        // normalize, so adjacent remnants all go in one pass.
        pattern: r"\s\d+:\d+",
        replacement: "",
    },
    CleanRule {
        artifact: "Hebrew transliteration run (letters, points, accents)",
        pattern: r"[\x{0591}-\x{05F4}]+",
        replacement: "",
    },
    CleanRule {
        artifact: "residual backslash code (\\q1, \\p, \\wj*, ...)",
        pattern: r"\\[A-Za-z0-9*]+\s*",
        replacement: "",
    },
    CleanRule {
        artifact: "whitespace runs",
        pattern: r"\s+",
        replacement: " ",
    },
    CleanRule {
        artifact: "space before punctuation",
        pattern: r"\s+([,.;:!?])",
        replacement: "$1",
    },
];

static COMPILED_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    CLEAN_RULES
        .iter()
        .map(|rule| {
            let regex = Regex::new(rule.pattern)
                .unwrap_or_else(|e| panic!("rule for {}: {e}", rule.artifact));
            (regex, rule.replacement)
        })
        .collect()
});

/// Verse marker at line start: `\v N text`.
static VERSE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\\v\s+(\d+)\s+(.*)$").expect("verse marker pattern"));

/// Chapter marker: `\c N`.
static CHAPTER_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\\c\s+(\d+)").expect("chapter marker pattern"));

/// Metadata lines skipped wholesale.
const METADATA_TAGS: &[&str] = &["\\id", "\\ide", "\\h", "\\toc", "\\mt"];

/// Result of converting a USFM directory.
#[derive(Debug)]
pub struct UsfmOutput {
    pub books: Vec<Book>,
    /// One entry per duplicate-verse merge, e.g. `"Genesis 1:5: duplicate verse merged"`.
    pub warnings: Vec<String>,
}

/// Strip all USFM markers from verse text.
///
/// Applies [`CLEAN_RULES`] in order, then trims and unwraps whole-text
/// quotes. Idempotent.
pub fn clean_usfm_text(text: &str) -> String {
    let mut cleaned = text.to_string();
    for (regex, replacement) in COMPILED_RULES.iter() {
        cleaned = regex.replace_all(&cleaned, *replacement).into_owned();
    }
    let mut cleaned = cleaned.trim().to_string();

    // Quotes wrapping the entire verse are a transcription artifact
    if cleaned.len() >= 2 && cleaned.starts_with('"') && cleaned.ends_with('"') {
        cleaned = cleaned[1..cleaned.len() - 1].trim().to_string();
    }
    cleaned
}

/// Convert a directory of `.usfm`/`.sfm` files into the canonical model.
///
/// Files are matched to books by the 3-letter code in their filename,
/// ordered canonically, and each book is emitted at most once.
pub fn convert_dir(input_dir: &Path) -> Result<UsfmOutput, UsfmError> {
    let mut files: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| is_usfm_file(p))
        .collect();

    if files.is_empty() {
        return Err(UsfmError::NoFiles(input_dir.to_path_buf()));
    }

    // Canonical book order, unknown codes last; name as tiebreaker so
    // the order is stable across filesystems.
    files.sort_by_key(|p| {
        let name = p.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
        let order = books::code_from_filename(&name)
            .and_then(books::usfm_order)
            .unwrap_or(usize::MAX);
        (order, name)
    });

    let mut books_out: Vec<Book> = Vec::new();
    let mut warnings = Vec::new();

    for file in &files {
        let filename = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let Some(code) = books::code_from_filename(&filename) else {
            continue;
        };
        let name = books::from_usfm_code(code).expect("code from table");

        if books_out.iter().any(|b| b.name == name) {
            continue;
        }

        let text = fs::read_to_string(file)?;
        let chapters = parse_book(&text, name, &mut warnings);
        if !chapters.is_empty() {
            books_out.push(Book {
                name: name.to_string(),
                chapters,
            });
        }
    }

    Ok(UsfmOutput {
        books: books_out,
        warnings,
    })
}

fn is_usfm_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext_ok = path
        .extension()
        .map(|e| {
            let e = e.to_string_lossy().to_lowercase();
            e == "usfm" || e == "sfm"
        })
        .unwrap_or(false);
    // 00-* is publisher front matter, not a book
    let front_matter = path
        .file_name()
        .map(|n| n.to_string_lossy().starts_with("00-"))
        .unwrap_or(false);
    ext_ok && !front_matter
}

/// Parse one book's USFM text into chapters. Pure — no I/O.
pub fn parse_book(text: &str, book_name: &str, warnings: &mut Vec<String>) -> Vec<Chapter> {
    let mut chapters: Vec<Chapter> = Vec::new();
    let mut current_chapter: Option<u32> = None;
    let mut current_verse: Option<(u32, Vec<String>)> = None;

    let mut flush_verse = |chapter_num: Option<u32>,
                           current: &mut Option<(u32, Vec<String>)>,
                           chapters: &mut Vec<Chapter>,
                           warnings: &mut Vec<String>| {
        let Some((number, parts)) = current.take() else {
            return;
        };
        let text = clean_usfm_text(parts.join(" ").trim());
        if text.is_empty() {
            return;
        }
        let Some(chapter_num) = chapter_num else {
            return;
        };
        let chapter = match chapters.last_mut() {
            Some(c) if c.number == chapter_num => c,
            _ => {
                chapters.push(Chapter {
                    number: chapter_num,
                    verses: Vec::new(),
                });
                chapters.last_mut().expect("just pushed")
            }
        };
        // Duplicate verse numbers merge by concatenation, first
        // occurrence keeps its position.
        if let Some(existing) = chapter.verses.iter_mut().find(|v| v.number == number) {
            existing.text.push(' ');
            existing.text.push_str(&text);
            warnings.push(format!(
                "{book_name} {chapter_num}:{number}: duplicate verse merged"
            ));
        } else {
            chapter.verses.push(Verse { number, text });
        }
    };

    for raw in text.lines() {
        let line = raw.trim_end();

        if METADATA_TAGS.iter().any(|tag| line.starts_with(tag)) {
            continue;
        }

        if let Some(caps) = CHAPTER_MARKER.captures(line) {
            flush_verse(current_chapter, &mut current_verse, &mut chapters, warnings);
            current_chapter = caps[1].parse().ok();
            continue;
        }

        if let Some(caps) = VERSE_MARKER.captures(line) {
            flush_verse(current_chapter, &mut current_verse, &mut chapters, warnings);
            if let Ok(number) = caps[1].parse() {
                current_verse = Some((number, vec![caps[2].to_string()]));
            }
            continue;
        }

        if let Some((_, parts)) = current_verse.as_mut() {
            parts.push(line.to_string());
        }
    }

    flush_verse(current_chapter, &mut current_verse, &mut chapters, warnings);

    // Stable numeric order within each chapter; merged duplicates keep
    // their first-occurrence slot.
    for chapter in &mut chapters {
        chapter.verses.sort_by_key(|v| v.number);
    }

    chapters
}
