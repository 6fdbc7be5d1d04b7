//! The canonical verse format — model, writer, and parser.
//!
//! Every converter produces this model, and the publishing stages
//! consume it. The serialized form is the interchange format between
//! pipeline runs:
//!
//! ```text
//! Genesis
//! Chapter 1
//! 1 In the beginning God created the heaven and the earth.
//! 2 And the earth was without form, and void; ...
//!
//! Chapter 2
//! 1 Thus the heavens and the earth were finished, ...
//!
//! Exodus
//! Chapter 1
//! ...
//! ```
//!
//! Rules:
//! - A book-name header line opens each book.
//! - A `Chapter N` header groups consecutive verses until the chapter
//!   number changes.
//! - Each verse is `"<num> <text>"` on its own line.
//! - Blank lines separate chapters and books; the file ends with a
//!   newline when non-empty.
//!
//! The canonical file is read, patched, and re-derived — never mutated
//! in place. [`write_canonical`] and [`parse_canonical`] round-trip
//! losslessly for valid model data.

use crate::books;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CanonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single verse: number plus normalized text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    pub number: u32,
    pub text: String,
}

/// A chapter: number plus its verses in emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub number: u32,
    pub verses: Vec<Verse>,
}

/// A book: canonical name plus chapters in emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub name: String,
    pub chapters: Vec<Chapter>,
}

impl Book {
    pub fn verse_count(&self) -> usize {
        self.chapters.iter().map(|c| c.verses.len()).sum()
    }
}

/// A flat verse record before chapter grouping.
///
/// The converters scan text sequentially and know only "the current
/// chapter number" at each verse; [`group_into_chapters`] turns the flat
/// run into [`Chapter`]s.
#[derive(Debug, Clone)]
pub struct VerseRecord {
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

/// Group a flat verse run into chapters.
///
/// A new chapter opens whenever the chapter number differs from the
/// previous record's — chapter numbers are monotonically introduced, so
/// consecutive runs map one-to-one onto chapters.
pub fn group_into_chapters(records: Vec<VerseRecord>) -> Vec<Chapter> {
    let mut chapters: Vec<Chapter> = Vec::new();
    for record in records {
        match chapters.last_mut() {
            Some(chapter) if chapter.number == record.chapter => {
                chapter.verses.push(Verse {
                    number: record.verse,
                    text: record.text,
                });
            }
            _ => chapters.push(Chapter {
                number: record.chapter,
                verses: vec![Verse {
                    number: record.verse,
                    text: record.text,
                }],
            }),
        }
    }
    chapters
}

/// Serialize books into the canonical text format.
pub fn write_canonical(books: &[Book]) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (book_idx, book) in books.iter().enumerate() {
        if book_idx > 0 {
            lines.push(String::new());
        }
        lines.push(book.name.clone());

        for (chapter_idx, chapter) in book.chapters.iter().enumerate() {
            if chapter_idx > 0 {
                lines.push(String::new());
            }
            lines.push(format!("Chapter {}", chapter.number));
            for verse in &chapter.verses {
                // Interior whitespace collapses to single spaces on output
                let text = verse.text.split_whitespace().collect::<Vec<_>>().join(" ");
                lines.push(format!("{} {}", verse.number, text));
            }
        }
    }

    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Write the canonical form of `books` to `path`.
pub fn write_canonical_file(books: &[Book], path: &Path) -> Result<(), CanonError> {
    fs::write(path, write_canonical(books))?;
    Ok(())
}

/// Parse canonical text back into the model.
///
/// Recognized lines, in priority order:
/// - a canonical book name (exact match) opens a book;
/// - `Chapter N` opens a chapter;
/// - `<num> <text>` appends a verse to the current chapter;
/// - anything else continues the previous verse's text (a line whose
///   leading token fails to parse as a number is passed through as
///   continuation, never an error).
///
/// Blank lines and content outside any book/chapter are skipped.
pub fn parse_canonical(text: &str) -> Vec<Book> {
    let mut books: Vec<Book> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if books::is_canonical_book(line) {
            books.push(Book {
                name: line.to_string(),
                chapters: Vec::new(),
            });
            continue;
        }

        if let Some(number) = parse_chapter_header(line) {
            if let Some(book) = books.last_mut() {
                book.chapters.push(Chapter {
                    number,
                    verses: Vec::new(),
                });
            }
            continue;
        }

        let Some(chapter) = books.last_mut().and_then(|b| b.chapters.last_mut()) else {
            continue;
        };

        match parse_verse_line(line) {
            Some((number, text)) => chapter.verses.push(Verse { number, text }),
            None => {
                if let Some(last) = chapter.verses.last_mut() {
                    last.text.push(' ');
                    last.text.push_str(line);
                }
            }
        }
    }

    books
}

/// Read and parse a canonical file.
pub fn parse_canonical_file(path: &Path) -> Result<Vec<Book>, CanonError> {
    let text = fs::read_to_string(path)?;
    Ok(parse_canonical(&text))
}

fn parse_chapter_header(line: &str) -> Option<u32> {
    line.strip_prefix("Chapter ")
        .and_then(|rest| rest.trim().parse().ok())
}

fn parse_verse_line(line: &str) -> Option<(u32, String)> {
    let (num, rest) = line.split_once(' ')?;
    let number = num.parse().ok()?;
    let text = rest.trim();
    if text.is_empty() {
        return None;
    }
    Some((number, text.to_string()))
}
