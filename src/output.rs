//! CLI output formatting for all pipeline stages.
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ## Convert
//!
//! ```text
//! Genesis (50 chapters, 1533 verses)
//! Exodus (40 chapters, 1213 verses)
//!
//! Converted 66 books, 1189 chapters, 31102 verses → kjv.txt
//! ```
//!
//! ## Fix
//!
//! ```text
//! Patched Leviticus 11:14
//! Patched Nehemiah 7:24
//!
//! Applied 2 verse corrections
//! ```
//!
//! ## Publish / Render
//!
//! ```text
//! Published 66 books, 1189 chapters, 31102 verses → out/kjv
//! Verified 1189 chapter files
//! Rendered 1189 chapter pages (0 skipped) → site/kjv
//! ```

use crate::canon::Book;
use crate::publish::{PublishSummary, VerifySummary};
use crate::render::RenderSummary;
use std::path::Path;

/// Format conversion output: one line per book plus a totals line.
pub fn format_convert_output(books: &[Book], warnings: &[String], dest: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let mut total_chapters = 0;
    let mut total_verses = 0;

    for book in books {
        let verses: usize = book.chapters.iter().map(|c| c.verses.len()).sum();
        total_chapters += book.chapters.len();
        total_verses += verses;
        lines.push(format!(
            "{} ({} chapters, {} verses)",
            book.name,
            book.chapters.len(),
            verses
        ));
    }

    if !warnings.is_empty() {
        lines.push(String::new());
        for warning in warnings {
            lines.push(format!("Warning: {warning}"));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Converted {} books, {} chapters, {} verses \u{2192} {}",
        books.len(),
        total_chapters,
        total_verses,
        dest.display()
    ));
    lines
}

/// Print conversion output to stdout.
pub fn print_convert_output(books: &[Book], warnings: &[String], dest: &Path) {
    for line in format_convert_output(books, warnings, dest) {
        println!("{}", line);
    }
}

/// Format verse-fix output: one line per patched reference plus a total.
pub fn format_fix_output(patched: &[String]) -> Vec<String> {
    let mut lines = Vec::new();
    for reference in patched {
        lines.push(format!("Patched {reference}"));
    }
    if !patched.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!("Applied {} verse corrections", patched.len()));
    lines
}

/// Print verse-fix output to stdout.
pub fn print_fix_output(patched: &[String]) {
    for line in format_fix_output(patched) {
        println!("{}", line);
    }
}

/// Format publish stage summary.
pub fn format_publish_output(summary: &PublishSummary) -> Vec<String> {
    vec![format!(
        "Published {} books, {} chapters, {} verses \u{2192} {}",
        summary.books,
        summary.chapters,
        summary.verses,
        summary.out_dir.display()
    )]
}

/// Print publish summary to stdout.
pub fn print_publish_output(summary: &PublishSummary) {
    for line in format_publish_output(summary) {
        println!("{}", line);
    }
}

/// Format verification output: one line per problem plus a verdict.
pub fn format_verify_output(summary: &VerifySummary) -> Vec<String> {
    let mut lines = Vec::new();
    for problem in &summary.problems {
        lines.push(format!("Problem: {problem}"));
    }
    if !summary.problems.is_empty() {
        lines.push(String::new());
    }
    if summary.is_clean() {
        lines.push(format!("Verified {} chapter files", summary.chapters));
    } else {
        lines.push(format!(
            "Verified {} chapter files, {} problems",
            summary.chapters,
            summary.problems.len()
        ));
    }
    lines
}

/// Print verification output to stdout.
pub fn print_verify_output(summary: &VerifySummary) {
    for line in format_verify_output(summary) {
        println!("{}", line);
    }
}

/// Format render stage summary.
pub fn format_render_output(summary: &RenderSummary) -> Vec<String> {
    vec![format!(
        "Rendered {} chapter pages ({} skipped) \u{2192} {}",
        summary.converted,
        summary.skipped,
        summary.out_dir.display()
    )]
}

/// Print render summary to stdout.
pub fn print_render_output(summary: &RenderSummary) {
    for line in format_render_output(summary) {
        println!("{}", line);
    }
}
