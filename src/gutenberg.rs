//! Project Gutenberg plaintext → canonical model.
//!
//! The Gutenberg KJV dump interleaves front matter, book title lines,
//! and verse text. Verses are marked by bare `chapter:verse` references
//! embedded in the prose, with verse text wrapped across lines and —
//! in dense passages — several references sharing one line:
//!
//! ```text
//! 1:5 And God called the light Day, and the darkness he called
//! Night. And the evening and the morning were the first day.
//!
//! 1:6 And God said, Let there be a firmament 1:7 And God made the
//! firmament ...
//! ```
//!
//! The scanner:
//! - skips `*** START` / `*** END` Gutenberg sentinels anywhere;
//! - skips the table of contents — content begins at the second
//!   occurrence of the Genesis long title;
//! - opens a book on an exact long-title match;
//! - splits every `C:V` reference on a line, so each verse's text stops
//!   where the next reference starts;
//! - accumulates unmarked lines into the current verse.
//!
//! Verses whose accumulated text is empty after normalization are
//! dropped.

use crate::books;
use crate::canon::{self, Book, VerseRecord};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GutenbergError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no book content found in input")]
    NoContent,
}

/// `chapter:verse` reference, anywhere in a line.
static VERSE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+):(\d+)").expect("verse reference pattern"));

const GENESIS_TITLE: &str = "The First Book of Moses: Called Genesis";

/// Convert a Gutenberg plaintext file into the canonical model.
pub fn convert(input: &Path) -> Result<Vec<Book>, GutenbergError> {
    let text = fs::read_to_string(input)?;
    let books = parse(&text);
    if books.is_empty() {
        return Err(GutenbergError::NoContent);
    }
    Ok(books)
}

/// Scanner state: the verse currently accumulating text.
struct CurrentVerse {
    chapter: u32,
    verse: u32,
    text: Vec<String>,
}

impl CurrentVerse {
    /// Normalize accumulated text; empty verses are dropped.
    fn finish(self) -> Option<VerseRecord> {
        let text = self.text.join(" ").trim().to_string();
        if text.is_empty() {
            return None;
        }
        Some(VerseRecord {
            chapter: self.chapter,
            verse: self.verse,
            text,
        })
    }
}

/// Parse Gutenberg plaintext into books. Pure — no I/O.
pub fn parse(text: &str) -> Vec<Book> {
    let mut books: Vec<Book> = Vec::new();
    let mut records: Vec<VerseRecord> = Vec::new();
    let mut current_book: Option<String> = None;
    let mut current: Option<CurrentVerse> = None;
    let mut genesis_seen = 0u32;
    let mut content_started = false;

    let mut flush_verse = |current: &mut Option<CurrentVerse>, records: &mut Vec<VerseRecord>| {
        if let Some(record) = current.take().and_then(CurrentVerse::finish) {
            records.push(record);
        }
    };

    for raw in text.lines() {
        let line = raw.trim();

        if line.contains("*** START") || line.contains("*** END") {
            continue;
        }

        // The TOC lists every title once; real content starts at the
        // second Genesis heading, which also opens the Genesis book.
        if line.contains(GENESIS_TITLE) {
            genesis_seen += 1;
            if genesis_seen == 2 {
                content_started = true;
                current_book = Some("Genesis".to_string());
            }
            continue;
        }
        if !content_started {
            continue;
        }

        if let Some(name) = books::from_gutenberg_title(line) {
            flush_verse(&mut current, &mut records);
            if let Some(finished) = current_book.take() {
                books.push(Book {
                    name: finished,
                    chapters: canon::group_into_chapters(std::mem::take(&mut records)),
                });
            }
            current_book = Some(name.to_string());
            continue;
        }

        if line.is_empty() {
            continue;
        }

        let refs: Vec<_> = VERSE_REF.captures_iter(line).collect();
        if refs.is_empty() {
            // Continuation of the current verse, if any
            if let Some(current) = current.as_mut() {
                current.text.push(line.to_string());
            }
            continue;
        }

        for (idx, caps) in refs.iter().enumerate() {
            let whole = caps.get(0).expect("match 0");
            let chapter: u32 = caps[1].parse().unwrap_or(0);
            let verse: u32 = caps[2].parse().unwrap_or(0);

            flush_verse(&mut current, &mut records);

            // Text runs from this reference to the next one (or EOL)
            let end = refs
                .get(idx + 1)
                .map(|next| next.get(0).expect("match 0").start())
                .unwrap_or(line.len());
            let segment = line[whole.end()..end].trim();

            current = Some(CurrentVerse {
                chapter,
                verse,
                text: if segment.is_empty() {
                    Vec::new()
                } else {
                    vec![segment.to_string()]
                },
            });
        }
    }

    flush_verse(&mut current, &mut records);
    if let Some(finished) = current_book.take() {
        books.push(Book {
            name: finished,
            chapters: canon::group_into_chapters(records),
        });
    }

    books
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "\
*** START OF THE PROJECT GUTENBERG EBOOK ***
The First Book of Moses: Called Genesis
The Second Book of Moses: Called Exodus
";

    fn with_header(body: &str) -> String {
        format!("{HEADER}\n{body}")
    }

    #[test]
    fn front_matter_skipped_until_second_genesis_title() {
        let text = with_header(
            "The First Book of Moses: Called Genesis\n\n1:1 In the beginning God created.\n",
        );
        let books = parse(&text);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "Genesis");
        assert_eq!(books[0].chapters[0].verses.len(), 1);
    }

    #[test]
    fn multiple_references_on_one_line_split_cleanly() {
        let text = with_header(
            "The First Book of Moses: Called Genesis\n\n1:6 And God said, Let there be a firmament 1:7 And God made the firmament\n",
        );
        let books = parse(&text);
        let verses = &books[0].chapters[0].verses;
        assert_eq!(verses.len(), 2);
        assert_eq!(verses[0].number, 6);
        assert_eq!(verses[0].text, "And God said, Let there be a firmament");
        assert!(!verses[0].text.contains("1:7"));
        assert!(!verses[0].text.contains('7'));
        assert_eq!(verses[1].number, 7);
        assert_eq!(verses[1].text, "And God made the firmament");
    }

    #[test]
    fn wrapped_verse_text_accumulates() {
        let text = with_header(
            "The First Book of Moses: Called Genesis\n\n1:5 And God called the light Day,\nand the darkness he called Night.\n",
        );
        let books = parse(&text);
        assert_eq!(
            books[0].chapters[0].verses[0].text,
            "And God called the light Day, and the darkness he called Night."
        );
    }

    #[test]
    fn book_boundary_flushes_pending_verse() {
        let text = with_header(
            "The First Book of Moses: Called Genesis\n\n50:26 So Joseph died\n\nThe Second Book of Moses: Called Exodus\n\n1:1 Now these are the names\n",
        );
        let books = parse(&text);
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].chapters[0].number, 50);
        assert_eq!(books[1].name, "Exodus");
    }

    #[test]
    fn empty_verses_dropped() {
        let text = with_header("The First Book of Moses: Called Genesis\n\n1:1\n1:2 Real text\n");
        let books = parse(&text);
        let verses = &books[0].chapters[0].verses;
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].number, 2);
    }

    #[test]
    fn chapter_changes_open_new_chapters() {
        let text = with_header(
            "The First Book of Moses: Called Genesis\n\n1:31 And God saw every thing\n2:1 Thus the heavens\n2:2 And on the seventh day\n",
        );
        let books = parse(&text);
        assert_eq!(books[0].chapters.len(), 2);
        assert_eq!(books[0].chapters[1].verses.len(), 2);
    }

    #[test]
    fn sentinel_lines_ignored() {
        let text = "*** START OF THIS PROJECT ***\nThe First Book of Moses: Called Genesis\nThe First Book of Moses: Called Genesis\n1:1 In the beginning\n*** END OF THIS PROJECT ***\n";
        let books = parse(text);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].chapters[0].verses[0].text, "In the beginning");
    }
}
