//! # Versepress
//!
//! A build pipeline for publishing public-domain Bible texts as a
//! static website. Raw source texts (Project Gutenberg plaintext or
//! USFM-marked files) are normalized into one canonical plain-text
//! format, split into per-chapter JSON documents, and rendered to
//! static HTML.
//!
//! # Architecture: Staged Pipeline
//!
//! Each stage reads the previous stage's output from disk, so every
//! intermediate artifact is inspectable and any stage can be rerun in
//! isolation:
//!
//! ```text
//! 1. Convert   pg10.txt / usfm/  →  kjv.txt        (source → canonical text)
//! 2. Fix       kjv.txt           →  kjv.txt        (known truncated verses patched)
//! 3. Publish   kjv.txt           →  out/kjv/       (per-chapter JSON + manifest)
//! 4. Render    out/kjv/          →  site/kjv/      (static HTML pages)
//! 5. Favicon   config.toml       →  favicon.ico    (lettermark icon)
//! ```
//!
//! The canonical text format is deliberately trivial — book name
//! lines, `Chapter N` lines, `<num> <text>` verse lines, blank lines
//! between sections — so any verse of any translation diffs cleanly
//! under version control.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`books`] | The 66-book canon: USFM codes, Gutenberg titles, canonical ordering |
//! | [`canon`] | Canonical text model (`Book`/`Chapter`/`Verse`), writer and parser |
//! | [`gutenberg`] | Stage 1a — Project Gutenberg plaintext to canonical text |
//! | [`usfm`] | Stage 1b — USFM directory to canonical text, with markup cleaning rules |
//! | [`patch`] | Stage 2 — corrections for verses truncated in common source etexts |
//! | [`publish`] | Stage 3 — canonical text to per-chapter JSON + version manifest |
//! | [`render`] | Stage 4 — JSON tree to static HTML chapter pages using Maud |
//! | [`favicon`] | Stage 5 — lettermark `favicon.ico` from an embedded bitmap font |
//! | [`config`] | `config.toml` loading and validation |
//! | [`output`] | CLI output formatting for pipeline results |
//!
//! # Design Decisions
//!
//! ## One Canonical Format In The Middle
//!
//! Every source format converges on the same plain-text representation
//! before anything downstream runs. Adding a new translation or source
//! format means writing one converter; JSON, HTML and fixups come for
//! free.
//!
//! ## Ordered, Named Cleaning Rules
//!
//! USFM cleanup is a table of named regex rules applied in a fixed
//! order ([`usfm::CLEAN_RULES`]), not an ad-hoc chain of replacements.
//! Each rule names the artifact it removes, the full pass is
//! idempotent, and a new artifact in a source file means adding one
//! table row.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a
//! compile-time HTML macro system. Malformed markup is a build error,
//! interpolation is auto-escaped, and there is no template directory
//! to ship or get out of sync.

pub mod books;
pub mod canon;
pub mod config;
pub mod favicon;
pub mod gutenberg;
pub mod output;
pub mod patch;
pub mod publish;
pub mod render;
pub mod usfm;
