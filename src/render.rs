//! HTML rendering stage.
//!
//! Takes the per-chapter JSON tree produced by the publish stage and
//! writes a static HTML page per chapter, plus an index page per
//! version built from `manifest.json`.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): Book list with chapter links
//! - **Chapter pages** (`/{Book}/{n}.html`): Verse text with prev/next
//!   chapter navigation and per-verse anchors (`#v3`)
//!
//! ## Output Structure
//!
//! ```text
//! site/
//! ├── index.html
//! ├── Genesis/
//! │   ├── 1.html
//! │   ├── 2.html
//! │   └── ...
//! └── Exodus/
//!     └── ...
//! ```
//!
//! Chapter files render independently, so the walk is parallelized
//! with rayon. A chapter JSON that fails to parse is reported and
//! skipped; its siblings still render.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML
//! templating. Templates are type-safe Rust code with automatic XSS
//! escaping. The stylesheet is embedded at compile time from
//! `static/chapter.css` and inlined into every page.

use crate::config::HtmlConfig;
use crate::publish::{ChapterDoc, Manifest};
use maud::{DOCTYPE, Markup, html};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no chapter files found under {0}")]
    Empty(PathBuf),
}

const CSS: &str = include_str!("../static/chapter.css");

/// What the render stage produced.
#[derive(Debug)]
pub struct RenderSummary {
    pub converted: usize,
    pub skipped: usize,
    pub out_dir: PathBuf,
}

/// Render every chapter JSON under `json_dir` to HTML under `out_dir`.
///
/// `html.base_url` prefixes absolute asset links (empty means
/// root-relative); chapter-to-chapter links stay relative.
pub fn render(
    json_dir: &Path,
    out_dir: &Path,
    html: &HtmlConfig,
) -> Result<RenderSummary, RenderError> {
    let chapter_files: Vec<PathBuf> = WalkDir::new(json_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension().is_some_and(|ext| ext == "json")
                && p.file_name().is_some_and(|n| n != "manifest.json")
        })
        .collect();

    if chapter_files.is_empty() {
        return Err(RenderError::Empty(json_dir.to_path_buf()));
    }

    fs::create_dir_all(out_dir)?;

    let results: Vec<Result<(), String>> = chapter_files
        .par_iter()
        .map(|path| {
            render_chapter_file(path, out_dir, &html.base_url)
                .map_err(|e| format!("{}: {}", path.display(), e))
        })
        .collect();

    let mut converted = 0;
    let mut skipped = 0;
    for result in results {
        match result {
            Ok(()) => converted += 1,
            Err(message) => {
                eprintln!("Skipping {message}");
                skipped += 1;
            }
        }
    }

    // Index page is optional; older JSON trees may lack a manifest.
    let manifest_path = json_dir.join("manifest.json");
    if manifest_path.exists() {
        let manifest: Manifest = serde_json::from_str(&fs::read_to_string(&manifest_path)?)?;
        let index = render_index(&manifest, &html.base_url);
        fs::write(out_dir.join("index.html"), index.into_string())?;
    }

    Ok(RenderSummary {
        converted,
        skipped,
        out_dir: out_dir.to_path_buf(),
    })
}

/// Render one chapter JSON file into `out_dir/<Book>/<n>.html`.
fn render_chapter_file(path: &Path, out_dir: &Path, base_url: &str) -> Result<(), RenderError> {
    let doc: ChapterDoc = serde_json::from_str(&fs::read_to_string(path)?)?;

    // Prev/next links come from sibling files on disk, so gaps in
    // chapter numbering never produce dead links.
    let parent = path.parent().unwrap_or(Path::new(""));
    let has_prev = doc.chapter > 1 && parent.join(format!("{}.json", doc.chapter - 1)).exists();
    let has_next = parent.join(format!("{}.json", doc.chapter + 1)).exists();

    let page = render_chapter_page(&doc, has_prev, has_next, base_url);

    let book_dir = out_dir.join(&doc.book);
    fs::create_dir_all(&book_dir)?;
    fs::write(
        book_dir.join(format!("{}.html", doc.chapter)),
        page.into_string(),
    )?;
    Ok(())
}

/// Renders the base HTML document structure
fn base_document(title: &str, base_url: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="icon" href={ (base_url) "/static/favicon.ico" };
                style { (CSS) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders a single chapter page with verse anchors and chapter nav
pub fn render_chapter_page(
    doc: &ChapterDoc,
    has_prev: bool,
    has_next: bool,
    base_url: &str,
) -> Markup {
    let title = format!("{} {} ({})", doc.book, doc.chapter, doc.version.to_uppercase());

    let nav = html! {
        nav.chapter-nav {
            @if has_prev {
                a.prev href={ (doc.chapter - 1) ".html" } { "\u{2190} Chapter " (doc.chapter - 1) }
            } @else {
                span.prev {}
            }
            a.up href="../index.html" { (doc.book) }
            @if has_next {
                a.next href={ (doc.chapter + 1) ".html" } { "Chapter " (doc.chapter + 1) " \u{2192}" }
            } @else {
                span.next {}
            }
        }
    };

    let content = html! {
        header.chapter-header {
            h1 { (doc.book) " " (doc.chapter) }
            p.version-label { (doc.version.to_uppercase()) }
        }
        (nav)
        main.chapter-body {
            ol.verses {
                @for (number, text) in &doc.verses {
                    li id={ "v" (number) } value=(number) {
                        a.verse-ref href={ "#v" (number) }
                            title={ (doc.book) "." (doc.chapter) "." (number) } {
                            (number)
                        }
                        span.verse-text { " " (text) }
                    }
                }
            }
        }
        (nav)
    };

    base_document(&title, base_url, content)
}

/// Renders the version index page from the manifest
fn render_index(manifest: &Manifest, base_url: &str) -> Markup {
    let content = html! {
        header.chapter-header {
            h1 { (manifest.name) }
            p.version-label { (manifest.books.len()) " books" }
        }
        main.book-index {
            @for book in &manifest.books {
                section.book {
                    h2 { (book.name) }
                    ol.chapter-links {
                        @for n in 1..=book.chapters {
                            li { a href={ (book.name) "/" (n) ".html" } { (n) } }
                        }
                    }
                }
            }
        }
    };

    base_document(&manifest.name, base_url, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publish::{ChapterMetadata, ManifestBook};
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn sample_doc(chapter: u32) -> ChapterDoc {
        let mut verses = BTreeMap::new();
        verses.insert(1, "In the beginning God created the heaven and the earth.".to_string());
        verses.insert(2, "And the earth was without form, and void.".to_string());
        ChapterDoc {
            book: "Genesis".to_string(),
            chapter,
            version: "kjv".to_string(),
            metadata: ChapterMetadata {
                verse_count: 2,
                last_updated: "2024-01-01T00:00:00+00:00".to_string(),
            },
            verses,
        }
    }

    #[test]
    fn chapter_page_has_verse_anchors() {
        let html = render_chapter_page(&sample_doc(1), false, true, "").into_string();
        assert!(html.contains(r#"id="v1""#));
        assert!(html.contains(r#"id="v2""#));
        assert!(html.contains(r##"href="#v2""##));
    }

    #[test]
    fn chapter_page_has_canonical_refs() {
        let html = render_chapter_page(&sample_doc(1), false, true, "").into_string();
        assert!(html.contains(r#"title="Genesis.1.2""#));
    }

    #[test]
    fn chapter_page_title_and_heading() {
        let html = render_chapter_page(&sample_doc(3), true, true, "").into_string();
        assert!(html.contains("<title>Genesis 3 (KJV)</title>"));
        assert!(html.contains("Genesis 3"));
    }

    #[test]
    fn first_chapter_has_no_prev_link() {
        let html = render_chapter_page(&sample_doc(1), false, true, "").into_string();
        assert!(!html.contains(r#"href="0.html""#));
        assert!(html.contains(r#"href="2.html""#));
    }

    #[test]
    fn last_chapter_has_no_next_link() {
        let html = render_chapter_page(&sample_doc(50), true, false, "").into_string();
        assert!(html.contains(r#"href="49.html""#));
        assert!(!html.contains(r#"href="51.html""#));
    }

    #[test]
    fn verse_text_is_escaped() {
        let mut doc = sample_doc(1);
        doc.verses
            .insert(3, "<script>alert('xss')</script>".to_string());
        let html = render_chapter_page(&doc, false, false, "").into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn empty_base_url_gives_root_relative_asset_links() {
        let html = render_chapter_page(&sample_doc(1), false, false, "").into_string();
        assert!(html.contains(r#"href="/static/favicon.ico""#));
    }

    #[test]
    fn base_url_prefixes_asset_links() {
        let base = "https://example.org/bible";
        let html = render_chapter_page(&sample_doc(1), false, false, base).into_string();
        assert!(html.contains(r#"href="https://example.org/bible/static/favicon.ico""#));
    }

    #[test]
    fn renders_tree_and_counts() {
        let tmp = TempDir::new().unwrap();
        let json_dir = tmp.path().join("json");
        let book_dir = json_dir.join("Genesis");
        fs::create_dir_all(&book_dir).unwrap();
        for n in 1..=2 {
            let doc = sample_doc(n);
            fs::write(
                book_dir.join(format!("{n}.json")),
                serde_json::to_string(&doc).unwrap(),
            )
            .unwrap();
        }

        let out = tmp.path().join("site");
        let summary = render(&json_dir, &out, &HtmlConfig::default()).unwrap();
        assert_eq!(summary.converted, 2);
        assert_eq!(summary.skipped, 0);
        assert!(out.join("Genesis/1.html").exists());
        assert!(out.join("Genesis/2.html").exists());

        let page1 = fs::read_to_string(out.join("Genesis/1.html")).unwrap();
        assert!(page1.contains(r#"href="2.html""#));
    }

    #[test]
    fn corrupt_chapter_is_skipped_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let json_dir = tmp.path().join("json");
        let book_dir = json_dir.join("Genesis");
        fs::create_dir_all(&book_dir).unwrap();
        fs::write(
            book_dir.join("1.json"),
            serde_json::to_string(&sample_doc(1)).unwrap(),
        )
        .unwrap();
        fs::write(book_dir.join("2.json"), "{not json").unwrap();

        let out = tmp.path().join("site");
        let summary = render(&json_dir, &out, &HtmlConfig::default()).unwrap();
        assert_eq!(summary.converted, 1);
        assert_eq!(summary.skipped, 1);
        assert!(out.join("Genesis/1.html").exists());
        assert!(!out.join("Genesis/2.html").exists());
    }

    #[test]
    fn empty_tree_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let json_dir = tmp.path().join("json");
        fs::create_dir_all(&json_dir).unwrap();

        let result = render(&json_dir, &tmp.path().join("site"), &HtmlConfig::default());
        assert!(matches!(result, Err(RenderError::Empty(_))));
    }

    #[test]
    fn index_page_from_manifest() {
        let tmp = TempDir::new().unwrap();
        let json_dir = tmp.path().join("json");
        let book_dir = json_dir.join("Genesis");
        fs::create_dir_all(&book_dir).unwrap();
        fs::write(
            book_dir.join("1.json"),
            serde_json::to_string(&sample_doc(1)).unwrap(),
        )
        .unwrap();
        let manifest = Manifest {
            version: "kjv".to_string(),
            name: "KJV".to_string(),
            generated: "2024-01-01T00:00:00+00:00".to_string(),
            source_sha256: "00".repeat(32),
            books: vec![ManifestBook {
                name: "Genesis".to_string(),
                chapters: 2,
            }],
        };
        fs::write(
            json_dir.join("manifest.json"),
            serde_json::to_string(&manifest).unwrap(),
        )
        .unwrap();

        let out = tmp.path().join("site");
        render(&json_dir, &out, &HtmlConfig::default()).unwrap();

        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains("Genesis"));
        assert!(index.contains(r#"href="Genesis/2.html""#));
    }
}
