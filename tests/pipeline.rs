//! End-to-end pipeline tests: source text → canonical → JSON → HTML.

use std::fs;
use tempfile::TempDir;
use versepress::config::{HtmlConfig, VersionConfig};
use versepress::{canon, gutenberg, patch, publish, render, usfm};

const GUTENBERG_SAMPLE: &str = "\
The Project Gutenberg eBook of The King James Version of the Bible

*** START OF THE PROJECT GUTENBERG EBOOK ***

The Old Testament of the King James Version of the Bible

The First Book of Moses: Called Genesis
The Second Book of Moses: Called Exodus

The First Book of Moses: Called Genesis


1:1 In the beginning God created the heaven and the earth.

1:2 And the earth was without form, and void; and darkness was upon
the face of the deep.

2:1 Thus the heavens and the earth were finished, and all the host of
them.

10:16 And the Jebusite,


The Second Book of Moses: Called Exodus


1:1 Now these are the names of the children of Israel, which came
into Egypt; 1:2 Reuben, Simeon, Levi, and Judah,

*** END OF THE PROJECT GUTENBERG EBOOK ***
";

#[test]
fn gutenberg_to_html_full_pipeline() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("pg10.txt");
    fs::write(&source, GUTENBERG_SAMPLE).unwrap();

    // Stage 1: convert
    let mut books = gutenberg::convert(&source).unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0].name, "Genesis");
    assert_eq!(books[1].name, "Exodus");

    // Stage 2: patch truncated verses
    let patched = patch::apply_fixes(&mut books);
    assert_eq!(patched, vec!["Genesis 10:16"]);

    let canonical_path = tmp.path().join("kjv.txt");
    canon::write_canonical_file(&books, &canonical_path).unwrap();
    let canonical = fs::read_to_string(&canonical_path).unwrap();
    assert!(canonical.contains("Genesis\nChapter 1\n1 In the beginning"));
    assert!(canonical.contains("16 And the Jebusite, and the Amorite, and the Girgasite,"));

    // Stage 3: publish JSON
    let summary = publish::publish(&canonical_path, tmp.path(), &VersionConfig::default()).unwrap();
    assert_eq!(summary.books, 2);
    assert_eq!(summary.chapters, 4);
    assert!(tmp.path().join("kjv/Genesis/10.json").exists());
    assert!(tmp.path().join("kjv/manifest.json").exists());

    let verified = publish::verify(&summary.out_dir).unwrap();
    assert_eq!(verified.chapters, 4);
    assert!(verified.is_clean());

    // Stage 4: render HTML
    let site = tmp.path().join("site");
    let rendered = render::render(&summary.out_dir, &site, &HtmlConfig::default()).unwrap();
    assert_eq!(rendered.converted, 4);
    assert_eq!(rendered.skipped, 0);

    let page = fs::read_to_string(site.join("Exodus/1.html")).unwrap();
    assert!(page.contains("Exodus 1"));
    assert!(page.contains("Reuben, Simeon, Levi, and Judah,"));
    assert!(page.contains(r##"href="#v2""##));

    let index = fs::read_to_string(site.join("index.html")).unwrap();
    assert!(index.contains("Genesis"));
    assert!(index.contains("Exodus"));
}

#[test]
fn usfm_directory_to_canonical() {
    let tmp = TempDir::new().unwrap();
    let usfm_dir = tmp.path().join("usfm");
    fs::create_dir_all(&usfm_dir).unwrap();

    fs::write(
        usfm_dir.join("02-GENeng-kjv.usfm"),
        "\\id GEN - King James Version\n\
         \\h Genesis\n\
         \\c 1\n\
         \\v 1 In the beginning God created \\w the|strong=\"H0000\"\\w* heaven and the earth.\n\
         \\v 2 And the earth was without form, and void.\n\
         \\c 2\n\
         \\v 1 Thus the heavens and the earth were finished.\n",
    )
    .unwrap();
    fs::write(
        usfm_dir.join("03-EXOeng-kjv.usfm"),
        "\\id EXO\n\\c 1\n\\v 1 Now these are the names of the children of Israel.\n",
    )
    .unwrap();

    let result = usfm::convert_dir(&usfm_dir).unwrap();
    assert_eq!(result.books.len(), 2);
    assert!(result.warnings.is_empty());

    let canonical = canon::write_canonical(&result.books);
    assert!(canonical.contains(
        "1 In the beginning God created the heaven and the earth."
    ));
    assert!(canonical.contains("Exodus\nChapter 1\n"));

    // Canonical text survives a parse/write round trip unchanged
    let reparsed = canon::parse_canonical(&canonical);
    assert_eq!(canon::write_canonical(&reparsed), canonical);
}

#[test]
fn corrupt_chapter_json_does_not_break_siblings() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("pg10.txt");
    fs::write(&source, GUTENBERG_SAMPLE).unwrap();

    let books = gutenberg::convert(&source).unwrap();
    let canonical_path = tmp.path().join("kjv.txt");
    canon::write_canonical_file(&books, &canonical_path).unwrap();
    let summary = publish::publish(&canonical_path, tmp.path(), &VersionConfig::default()).unwrap();

    // Damage one chapter file
    fs::write(summary.out_dir.join("Genesis/2.json"), "{truncated").unwrap();

    let site = tmp.path().join("site");
    let rendered = render::render(&summary.out_dir, &site, &HtmlConfig::default()).unwrap();
    assert_eq!(rendered.converted, 3);
    assert_eq!(rendered.skipped, 1);
    assert!(site.join("Genesis/1.html").exists());
    assert!(!site.join("Genesis/2.html").exists());
    assert!(site.join("Exodus/1.html").exists());
}
